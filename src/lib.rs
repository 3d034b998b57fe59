//! Subtrans - fetch YouTube subtitles and translate them to another language
//!
//! This library wires a three-stage pipeline: extract a video ID from a URL,
//! fetch the video's transcript for a fixed source language, and translate the
//! joined caption text into a user-selected target language. The result can be
//! printed, saved, or served through a small web UI with a download action.

pub mod cli;
pub mod config;
pub mod language;
pub mod output;
pub mod pipeline;
pub mod server;
pub mod translate;
pub mod youtube;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use language::TargetLanguage;
pub use pipeline::{TranslationPipeline, TranslationRecord};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Errors produced by the translation pipeline stages
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("Invalid YouTube URL: {0}")]
    InvalidUrl(String),

    #[error("Subtitles are disabled for video '{video_id}'")]
    SubtitlesDisabled { video_id: String },

    #[error("No subtitles found for video '{video_id}' in language '{language}'")]
    TranscriptNotFound { video_id: String, language: String },

    #[error("Failed to fetch subtitles: {0}")]
    FetchFailed(String),

    #[error("Failed to translate to '{language}': {message}")]
    TranslationFailed { language: String, message: String },
}

impl PipelineError {
    /// Stable machine-readable tag for API responses and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidUrl(_) => "invalid_url",
            PipelineError::SubtitlesDisabled { .. } => "subtitles_disabled",
            PipelineError::TranscriptNotFound { .. } => "transcript_not_found",
            PipelineError::FetchFailed(_) => "fetch_failed",
            PipelineError::TranslationFailed { .. } => "translation_failed",
        }
    }
}
