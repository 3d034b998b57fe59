//! The parse → fetch → translate pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

use crate::config::Config;
use crate::language::TargetLanguage;
use crate::translate::{GoogleTranslator, TranslationProvider};
use crate::youtube::transcript::{TranscriptClient, TranscriptSource};
use crate::youtube::extract_video_id;
use crate::PipelineError;

/// Outcome of one translation run.
#[derive(Debug, Clone, Serialize)]
pub struct TranslationRecord {
    /// Video the subtitles came from
    pub video_id: String,

    /// Language the subtitles were fetched in
    pub source_language: String,

    /// Language the text was translated into
    pub target_language: TargetLanguage,

    /// The translated subtitle text
    pub text: String,

    /// Run metadata
    pub metadata: RecordMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordMetadata {
    /// Translation provider that produced the text
    pub provider: String,

    /// Character count of the fetched source transcript
    pub source_chars: usize,

    /// Timestamp when the run completed
    pub completed_at: DateTime<Utc>,
}

impl TranslationRecord {
    /// Filename offered for download: `<video_id>_<target>.txt`.
    pub fn download_file_name(&self) -> String {
        format!("{}_{}.txt", self.video_id, self.target_language.code())
    }
}

/// Glues the three stages together. One call per user interaction; nothing is
/// cached or retried between runs.
pub struct TranslationPipeline {
    source_language: String,
    transcripts: Box<dyn TranscriptSource>,
    translator: Box<dyn TranslationProvider>,
}

impl TranslationPipeline {
    /// Build the default pipeline from configuration.
    pub fn new(config: &Config) -> crate::Result<Self> {
        let transcripts = TranscriptClient::new(Duration::from_secs(
            config.subtitles.request_timeout_secs,
        ))?;
        let translator = GoogleTranslator::new(Duration::from_secs(
            config.translation.request_timeout_secs,
        ))?;

        Ok(Self {
            source_language: config.subtitles.source_language.clone(),
            transcripts: Box::new(transcripts),
            translator: Box::new(translator),
        })
    }

    /// Build a pipeline from explicit stage implementations.
    pub fn with_stages(
        source_language: impl Into<String>,
        transcripts: Box<dyn TranscriptSource>,
        translator: Box<dyn TranslationProvider>,
    ) -> Self {
        Self {
            source_language: source_language.into(),
            transcripts,
            translator,
        }
    }

    /// Override the subtitle source language for this pipeline.
    pub fn with_source_language(mut self, language: impl Into<String>) -> Self {
        self.source_language = language.into();
        self
    }

    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    /// Run the full pipeline for one URL.
    ///
    /// The URL is parsed before any network call; an unrecognizable URL never
    /// reaches the transcript service.
    pub async fn translate_from_url(
        &self,
        url: &str,
        target: TargetLanguage,
    ) -> Result<TranslationRecord, PipelineError> {
        let video_id = extract_video_id(url)?;
        tracing::info!(video_id, target = target.code(), "starting translation run");

        let subtitles = self
            .transcripts
            .fetch(&video_id, &self.source_language)
            .await?;
        tracing::info!(chars = subtitles.len(), "fetched subtitles");

        let text = self.translator.translate(&subtitles, target).await?;
        tracing::info!(chars = text.len(), "translation completed");

        Ok(TranslationRecord {
            video_id,
            source_language: self.source_language.clone(),
            target_language: target,
            metadata: RecordMetadata {
                provider: self.translator.provider_name().to_string(),
                source_chars: subtitles.chars().count(),
                completed_at: Utc::now(),
            },
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::MockTranslationProvider;
    use crate::youtube::transcript::MockTranscriptSource;

    fn pipeline_with(
        transcripts: MockTranscriptSource,
        translator: MockTranslationProvider,
    ) -> TranslationPipeline {
        TranslationPipeline::with_stages("ko", Box::new(transcripts), Box::new(translator))
    }

    #[tokio::test]
    async fn test_successful_run_produces_record_and_filename() {
        let mut transcripts = MockTranscriptSource::new();
        transcripts
            .expect_fetch()
            .withf(|video_id, language| video_id == "XYZ123" && language == "ko")
            .once()
            .returning(|_, _| Ok("안녕하세요 세계".to_string()));

        let mut translator = MockTranslationProvider::new();
        translator
            .expect_translate()
            .withf(|text, target| text == "안녕하세요 세계" && *target == TargetLanguage::Spanish)
            .once()
            .returning(|_, _| Ok("Hola mundo".to_string()));
        translator.expect_provider_name().return_const("google");

        let pipeline = pipeline_with(transcripts, translator);
        let record = pipeline
            .translate_from_url("https://youtube.com/watch?v=XYZ123", TargetLanguage::Spanish)
            .await
            .unwrap();

        assert_eq!(record.video_id, "XYZ123");
        assert_eq!(record.text, "Hola mundo");
        assert_eq!(record.source_language, "ko");
        assert_eq!(record.download_file_name(), "XYZ123_es.txt");
        assert_eq!(record.metadata.provider, "google");
        assert_eq!(record.metadata.source_chars, "안녕하세요 세계".chars().count());
    }

    #[tokio::test]
    async fn test_invalid_url_fails_before_any_network_call() {
        // Mocks with no expectations panic if either stage is reached.
        let pipeline = pipeline_with(
            MockTranscriptSource::new(),
            MockTranslationProvider::new(),
        );

        let err = pipeline
            .translate_from_url("https://example.com/video/123", TargetLanguage::English)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::InvalidUrl(_)));
    }

    #[tokio::test]
    async fn test_fetch_failure_stops_before_translation() {
        let mut transcripts = MockTranscriptSource::new();
        transcripts.expect_fetch().once().returning(|video_id, _| {
            Err(PipelineError::SubtitlesDisabled {
                video_id: video_id.to_string(),
            })
        });

        let pipeline = pipeline_with(transcripts, MockTranslationProvider::new());
        let err = pipeline
            .translate_from_url("https://youtube.com/watch?v=ABC", TargetLanguage::Hindi)
            .await
            .unwrap_err();
        assert!(matches!(err, PipelineError::SubtitlesDisabled { .. }));
    }

    #[tokio::test]
    async fn test_translation_failure_surfaces_language_and_detail() {
        let mut transcripts = MockTranscriptSource::new();
        transcripts
            .expect_fetch()
            .once()
            .returning(|_, _| Ok("text".to_string()));

        let mut translator = MockTranslationProvider::new();
        translator.expect_translate().once().returning(|_, target| {
            Err(PipelineError::TranslationFailed {
                language: target.code().to_string(),
                message: "provider unavailable".to_string(),
            })
        });

        let pipeline = pipeline_with(transcripts, translator);
        let err = pipeline
            .translate_from_url("https://youtube.com/v/ABC", TargetLanguage::Indonesian)
            .await
            .unwrap_err();
        match err {
            PipelineError::TranslationFailed { language, message } => {
                assert_eq!(language, "id");
                assert!(message.contains("unavailable"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_source_language_override() {
        let pipeline = pipeline_with(MockTranscriptSource::new(), MockTranslationProvider::new())
            .with_source_language("ja");
        assert_eq!(pipeline.source_language(), "ja");
    }
}
