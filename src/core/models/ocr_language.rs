use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Language hint offered by the upload form.
///
/// The current vision model reads English and Hindi without being told which
/// one to expect, so the hint is accepted and logged but never sent to it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum OcrLanguage {
    English,
    Hindi,
    #[default]
    Both,
}

impl OcrLanguage {
    pub const ALL: [OcrLanguage; 3] = [OcrLanguage::English, OcrLanguage::Hindi, OcrLanguage::Both];
}

impl fmt::Display for OcrLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OcrLanguage::English => write!(f, "English"),
            OcrLanguage::Hindi => write!(f, "Hindi"),
            OcrLanguage::Both => write!(f, "Both"),
        }
    }
}

impl FromStr for OcrLanguage {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "english" | "en" => Ok(OcrLanguage::English),
            "hindi" | "hi" => Ok(OcrLanguage::Hindi),
            "both" | "" => Ok(OcrLanguage::Both),
            other => anyhow::bail!("Unsupported OCR language: {}", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ocr_language_default_is_both() {
        assert_eq!(OcrLanguage::default(), OcrLanguage::Both);
    }

    #[test]
    fn test_ocr_language_parses_form_values_case_insensitively() {
        assert_eq!("English".parse::<OcrLanguage>().unwrap(), OcrLanguage::English);
        assert_eq!("HINDI".parse::<OcrLanguage>().unwrap(), OcrLanguage::Hindi);
        assert_eq!(" both ".parse::<OcrLanguage>().unwrap(), OcrLanguage::Both);
        assert_eq!("".parse::<OcrLanguage>().unwrap(), OcrLanguage::Both);
    }

    #[test]
    fn test_ocr_language_rejects_unknown_values() {
        assert!("Klingon".parse::<OcrLanguage>().is_err());
    }

    #[test]
    fn test_ocr_language_display_matches_form_labels() {
        let labels: Vec<String> = OcrLanguage::ALL.iter().map(|l| l.to_string()).collect();
        assert_eq!(labels, vec!["English", "Hindi", "Both"]);
    }

    #[test]
    fn test_ocr_language_serialization() {
        let serialized = serde_json::to_string(&OcrLanguage::Hindi).unwrap();
        assert_eq!(serialized, "\"Hindi\"");
    }
}
