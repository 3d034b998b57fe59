//! Translation providers.

use async_trait::async_trait;

use crate::language::TargetLanguage;
use crate::PipelineError;

pub mod google;

pub use google::GoogleTranslator;

/// Trait for translation backends.
///
/// Providers detect the source language themselves; callers only name the
/// target. One blob of text in, one translated blob out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationProvider: Send + Sync {
    /// Translate `text` into `target`, detecting the source language.
    async fn translate(&self, text: &str, target: TargetLanguage)
        -> Result<String, PipelineError>;

    /// Name of this provider, for logs and record metadata.
    fn provider_name(&self) -> &'static str;
}
