use clap::ValueEnum;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::str::FromStr;

/// Target languages offered by the UI dropdown and the CLI.
///
/// The set is deliberately fixed; the translation provider accepts many more
/// codes, but the product surface only exposes these four.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TargetLanguage {
    #[value(alias = "en")]
    English,
    #[value(alias = "id")]
    Indonesian,
    #[value(alias = "hi")]
    Hindi,
    #[value(alias = "es")]
    Spanish,
}

impl TargetLanguage {
    /// ISO 639-1 code sent to the translation provider.
    pub fn code(&self) -> &'static str {
        match self {
            TargetLanguage::English => "en",
            TargetLanguage::Indonesian => "id",
            TargetLanguage::Hindi => "hi",
            TargetLanguage::Spanish => "es",
        }
    }

    /// Human-readable name shown in the dropdown and CLI listings.
    pub fn label(&self) -> &'static str {
        match self {
            TargetLanguage::English => "English",
            TargetLanguage::Indonesian => "Indonesian",
            TargetLanguage::Hindi => "Hindi",
            TargetLanguage::Spanish => "Spanish",
        }
    }

    /// All supported target languages, in dropdown order.
    pub fn all() -> &'static [TargetLanguage] {
        &[
            TargetLanguage::English,
            TargetLanguage::Indonesian,
            TargetLanguage::Hindi,
            TargetLanguage::Spanish,
        ]
    }
}

impl FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(TargetLanguage::English),
            "id" | "indonesian" => Ok(TargetLanguage::Indonesian),
            "hi" | "hindi" => Ok(TargetLanguage::Hindi),
            "es" | "spanish" => Ok(TargetLanguage::Spanish),
            other => Err(format!("Unsupported target language: {}", other)),
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// Serialized as the ISO code so API payloads carry "es" rather than "Spanish".
impl Serialize for TargetLanguage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code())
    }
}

impl<'de> Deserialize<'de> for TargetLanguage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_and_labels() {
        assert_eq!(TargetLanguage::English.code(), "en");
        assert_eq!(TargetLanguage::Indonesian.code(), "id");
        assert_eq!(TargetLanguage::Hindi.code(), "hi");
        assert_eq!(TargetLanguage::Spanish.code(), "es");
        assert_eq!(TargetLanguage::Spanish.label(), "Spanish");
    }

    #[test]
    fn test_from_str_accepts_codes_and_names() {
        assert_eq!("es".parse::<TargetLanguage>(), Ok(TargetLanguage::Spanish));
        assert_eq!(
            "Indonesian".parse::<TargetLanguage>(),
            Ok(TargetLanguage::Indonesian)
        );
        assert!("fr".parse::<TargetLanguage>().is_err());
    }

    #[test]
    fn test_serde_uses_iso_codes() {
        let json = serde_json::to_string(&TargetLanguage::Hindi).unwrap();
        assert_eq!(json, "\"hi\"");
        let parsed: TargetLanguage = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(parsed, TargetLanguage::Spanish);
    }

    #[test]
    fn test_all_preserves_dropdown_order() {
        let codes: Vec<&str> = TargetLanguage::all().iter().map(|l| l.code()).collect();
        assert_eq!(codes, vec!["en", "id", "hi", "es"]);
    }
}
