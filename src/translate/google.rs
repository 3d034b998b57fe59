use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::TranslationProvider;
use crate::language::TargetLanguage;
use crate::PipelineError;

const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// The web endpoint rejects oversized queries around 5000 characters, so
/// longer transcripts are translated in whitespace-aligned chunks.
pub const MAX_CHUNK_CHARS: usize = 4500;

/// Translator backed by Google's public web endpoint.
///
/// Uses the `gtx` client with `sl=auto`, the same interface the original
/// deep-translator style tools rely on. No API key required.
pub struct GoogleTranslator {
    http: reqwest::Client,
    endpoint: String,
    max_chunk_chars: usize,
}

impl GoogleTranslator {
    pub fn new(timeout: Duration) -> crate::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            max_chunk_chars: MAX_CHUNK_CHARS,
        })
    }

    /// Point the translator at a different endpoint (test servers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn translate_chunk(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<String, PipelineError> {
        let fail = |message: String| PipelineError::TranslationFailed {
            language: target.code().to_string(),
            message,
        };

        let url = Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", "auto"),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| fail(e.to_string()))?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| fail(e.to_string()))?;

        if !response.status().is_success() {
            return Err(fail(format!("HTTP {} from provider", response.status())));
        }

        let body: Value = response.json().await.map_err(|e| fail(e.to_string()))?;
        parse_response(&body).ok_or_else(|| fail("unexpected response shape".to_string()))
    }
}

#[async_trait]
impl TranslationProvider for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        target: TargetLanguage,
    ) -> Result<String, PipelineError> {
        let chunks = chunk_text(text, self.max_chunk_chars);
        tracing::debug!(
            target = target.code(),
            chunk_count = chunks.len(),
            "translating text"
        );

        let mut translated = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            translated.push(self.translate_chunk(&chunk, target).await?);
        }
        Ok(translated.join(" "))
    }

    fn provider_name(&self) -> &'static str {
        "google"
    }
}

/// The endpoint answers with nested arrays; the first element holds segment
/// pairs of `[translated, original, ...]`. Concatenate the translated parts.
fn parse_response(body: &Value) -> Option<String> {
    let segments = body.get(0)?.as_array()?;
    let mut out = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(Value::as_str) {
            out.push_str(part);
        }
    }
    if out.is_empty() {
        None
    } else {
        Some(out)
    }
}

/// Split `text` on whitespace into chunks of at most `max_chars` characters.
///
/// A single word longer than the limit becomes its own chunk rather than
/// being split mid-word.
fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_chars = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        if current_chars > 0 && current_chars + 1 + word_chars > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_chars = 0;
        }
        if current_chars > 0 {
            current.push(' ');
            current_chars += 1;
        }
        current.push_str(word);
        current_chars += word_chars;
    }
    if !current.is_empty() {
        chunks.push(current);
    }
    if chunks.is_empty() {
        chunks.push(String::new());
    }
    chunks
}
