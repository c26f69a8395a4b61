use std::sync::Arc;

use serde::Serialize;

use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{OcrLanguage, SearchQuery, UploadedImage};
use crate::core::services::keyword_highlighter;
use crate::global_constants;

/// The two text fields shown to the user after a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    pub extracted_text: String,
    pub result_text: String,
}

impl ProcessOutcome {
    pub fn missing_image() -> Self {
        Self {
            extracted_text: global_constants::MESSAGE_NO_IMAGE_PROVIDED.to_string(),
            result_text: global_constants::MESSAGE_UPLOAD_IMAGE_PROMPT.to_string(),
        }
    }
}

/// Runs extraction and the optional keyword search for one submission.
///
/// Every failure ends up as text in the returned [`ProcessOutcome`].
pub struct OcrSearchOrchestrator {
    ocr_service: Arc<dyn OcrService>,
}

impl OcrSearchOrchestrator {
    pub fn build(ocr_service: Arc<dyn OcrService>) -> Self {
        Self { ocr_service }
    }

    pub async fn process_submission(
        &self,
        image: Option<&UploadedImage>,
        language: OcrLanguage,
        keyword: &str,
    ) -> ProcessOutcome {
        match image {
            Some(image) => self.process(image, language, keyword).await,
            None => {
                log::info!("[ORCHESTRATOR] Submission without an image, skipping extraction");
                ProcessOutcome::missing_image()
            }
        }
    }

    pub async fn process(
        &self,
        image: &UploadedImage,
        language: OcrLanguage,
        keyword: &str,
    ) -> ProcessOutcome {
        let extracted_text = self.extract_text(image, language).await;
        Self::outcome_for_text(extracted_text, keyword)
    }

    /// Pairs `extracted_text` with its search result. Used for model output
    /// and for error text that stands in for it.
    pub fn outcome_for_text(extracted_text: String, keyword: &str) -> ProcessOutcome {
        let query = SearchQuery::new(extracted_text, keyword);

        let result_text = if query.is_search_requested() {
            Self::search_text(&query)
        } else {
            query.text().to_string()
        };

        ProcessOutcome {
            extracted_text: query.text().to_string(),
            result_text,
        }
    }

    pub async fn extract_text(&self, image: &UploadedImage, language: OcrLanguage) -> String {
        log::info!(
            "[ORCHESTRATOR] Extracting text from {}x{} image (language hint: {}, unused)",
            image.width,
            image.height,
            language
        );

        match self.ocr_service.extract_text_from_image(image.image()).await {
            Ok(result) => {
                if result.is_empty() {
                    log::warn!("[ORCHESTRATOR] Model returned no text for this image");
                }
                log::info!(
                    "[ORCHESTRATOR] Extraction complete, {} characters",
                    result.full_text().chars().count()
                );
                result.into_text()
            }
            Err(error) => {
                log::error!("[ORCHESTRATOR] Extraction failed: {}", error);
                format!("{}{}", global_constants::MESSAGE_OCR_ERROR_PREFIX, error)
            }
        }
    }

    pub fn search_text(query: &SearchQuery) -> String {
        if query.text().is_empty() {
            return global_constants::MESSAGE_NO_TEXT_EXTRACTED.to_string();
        }

        keyword_highlighter::highlight_query(query).into_display_text()
    }
}
