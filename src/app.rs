use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::adapters::{OllamaVisionOcrService, OpenAiVisionOcrService};
use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{ModelProvider, OcrLanguage, ServiceSettings, UploadedImage};
use crate::core::orchestrators::{OcrSearchOrchestrator, ProcessOutcome};
use crate::presentation::{self, AppState};

/// Process-wide wiring: settings plus the model client, built once at startup
/// and shared by every request.
pub struct OcrApp {
    settings: ServiceSettings,
    orchestrator: Arc<OcrSearchOrchestrator>,
}

impl OcrApp {
    pub fn build(settings: ServiceSettings) -> Result<Self> {
        log::info!("[APP] Initializing application");

        let ocr_service = Self::build_ocr_service(&settings)?;
        let orchestrator = Arc::new(OcrSearchOrchestrator::build(ocr_service));

        Ok(Self {
            settings,
            orchestrator,
        })
    }

    fn build_ocr_service(settings: &ServiceSettings) -> Result<Arc<dyn OcrService>> {
        log::info!(
            "[APP] Using {} model provider with {}",
            settings.model_provider,
            settings.model_name
        );

        let service: Arc<dyn OcrService> = match settings.model_provider {
            ModelProvider::OpenAi => Arc::new(OpenAiVisionOcrService::build(settings)?),
            ModelProvider::Ollama => Arc::new(OllamaVisionOcrService::build(settings)?),
        };

        Ok(service)
    }

    pub async fn run_server(&self, bind_override: Option<&str>) -> Result<()> {
        let bind_address = bind_override.unwrap_or(self.settings.bind_address.as_str());

        let state = AppState {
            orchestrator: Arc::clone(&self.orchestrator),
            default_language: self.settings.default_language,
            max_upload_bytes: self.settings.max_upload_bytes,
        };

        presentation::serve(state, bind_address).await
    }

    pub async fn run_single_extraction(
        &self,
        image_path: &Path,
        language: Option<OcrLanguage>,
        keyword: &str,
    ) -> Result<ProcessOutcome> {
        log::info!("[APP] Extracting text from {:?}", image_path);

        let bytes = tokio::fs::read(image_path)
            .await
            .with_context(|| format!("Failed to read image {:?}", image_path))?;

        let file_name = image_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        let image = UploadedImage::decode_from_bytes(file_name, &bytes)?;

        let language = language.unwrap_or(self.settings.default_language);
        Ok(self.orchestrator.process(&image, language, keyword).await)
    }
}
