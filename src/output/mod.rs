use anyhow::Result;
use std::path::Path;

use crate::cli::OutputFormat;
use crate::pipeline::TranslationRecord;

/// Save a translation record to a file
pub fn save_to_file(record: &TranslationRecord, path: &Path, format: &OutputFormat) -> Result<()> {
    let content = match format {
        OutputFormat::Text => format_as_text(record),
        OutputFormat::Json => format_as_json(record)?,
    };

    fs_err::write(path, content)?;
    Ok(())
}

/// Print a translation record to the console
pub fn print_to_console(record: &TranslationRecord, format: &OutputFormat) -> Result<()> {
    let content = match format {
        OutputFormat::Text => format_as_text(record),
        OutputFormat::Json => format_as_json(record)?,
    };

    println!("{}", content);
    Ok(())
}

/// Plain text output: the translated blob, nothing else.
///
/// This matches the body of the downloadable file the web UI offers.
pub fn format_as_text(record: &TranslationRecord) -> String {
    record.text.clone()
}

/// JSON output with metadata, for scripting
pub fn format_as_json(record: &TranslationRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::TargetLanguage;
    use crate::pipeline::RecordMetadata;
    use chrono::Utc;

    fn sample_record() -> TranslationRecord {
        TranslationRecord {
            video_id: "XYZ123".to_string(),
            source_language: "ko".to_string(),
            target_language: TargetLanguage::Spanish,
            text: "Hola mundo".to_string(),
            metadata: RecordMetadata {
                provider: "google".to_string(),
                source_chars: 8,
                completed_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_text_format_is_just_the_translation() {
        assert_eq!(format_as_text(&sample_record()), "Hola mundo");
    }

    #[test]
    fn test_json_format_carries_metadata() {
        let json = format_as_json(&sample_record()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["video_id"], "XYZ123");
        assert_eq!(value["target_language"], "es");
        assert_eq!(value["metadata"]["provider"], "google");
    }

    #[test]
    fn test_save_to_file_writes_plain_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(sample_record().download_file_name());
        save_to_file(&sample_record(), &path, &OutputFormat::Text).unwrap();

        assert_eq!(path.file_name().unwrap(), "XYZ123_es.txt");
        assert_eq!(fs_err::read_to_string(&path).unwrap(), "Hola mundo");
    }
}
