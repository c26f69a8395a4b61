use thiserror::Error;

/// Text recognized in a single uploaded image.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionResult {
    full_text: String,
}

impl ExtractionResult {
    pub fn from_text(full_text: impl Into<String>) -> Self {
        Self {
            full_text: full_text.into(),
        }
    }

    pub fn full_text(&self) -> &str {
        &self.full_text
    }

    pub fn is_empty(&self) -> bool {
        self.full_text.is_empty()
    }

    pub fn into_text(self) -> String {
        self.full_text
    }
}

/// Failures reported by a text extraction backend.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("failed to encode image: {0}")]
    ImageEncoding(String),

    #[error("could not reach model endpoint: {0}")]
    Connection(String),

    #[error("model endpoint returned an error: {0}")]
    Api(String),

    #[error("could not parse model response: {0}")]
    Parse(String),

    #[error("model response contained no choices")]
    EmptyResponse,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_result_from_text_keeps_text_verbatim() {
        let result = ExtractionResult::from_text("  नमस्ते World  ");

        assert_eq!(result.full_text(), "  नमस्ते World  ");
        assert!(!result.is_empty());
    }

    #[test]
    fn test_extraction_result_default_is_empty() {
        let result = ExtractionResult::default();

        assert!(result.is_empty());
        assert_eq!(result.into_text(), "");
    }

    #[test]
    fn test_extraction_error_messages_are_descriptive() {
        let error = ExtractionError::Api("HTTP 500: model crashed".to_string());
        assert_eq!(
            error.to_string(),
            "model endpoint returned an error: HTTP 500: model crashed"
        );

        let error = ExtractionError::EmptyResponse;
        assert_eq!(error.to_string(), "model response contained no choices");
    }
}
