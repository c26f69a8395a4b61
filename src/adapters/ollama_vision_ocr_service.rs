use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use super::image_payload;
use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{ExtractionError, ExtractionResult, ServiceSettings};
use crate::global_constants;

/// Extracts text through Ollama's `/api/generate` with a vision model such
/// as `qwen2.5vl`.
pub struct OllamaVisionOcrService {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    max_new_tokens: u32,
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    images: Vec<String>,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaVisionOcrService {
    pub fn build(settings: &ServiceSettings) -> Result<Self> {
        log::info!(
            "[OLLAMA_VL] Initializing client for model {} at {}",
            settings.model_name,
            settings.model_endpoint
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: settings.model_endpoint.trim_end_matches('/').to_string(),
            model: settings.model_name.clone(),
            max_new_tokens: settings.max_new_tokens,
        })
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.endpoint)
    }

    fn build_request(&self, image_base64: String) -> GenerateRequest {
        GenerateRequest {
            model: self.model.clone(),
            prompt: global_constants::EXTRACTION_PROMPT.to_string(),
            images: vec![image_base64],
            stream: false,
            options: GenerateOptions {
                num_predict: self.max_new_tokens,
            },
        }
    }
}

#[async_trait]
impl OcrService for OllamaVisionOcrService {
    async fn extract_text_from_image(
        &self,
        image: &DynamicImage,
    ) -> Result<ExtractionResult, ExtractionError> {
        log::info!("[OLLAMA_VL] Starting text extraction");

        let image_base64 = image_payload::encode_png_base64(image)?;
        let request = self.build_request(image_base64);

        let response = self
            .client
            .post(self.generate_url())
            .json(&request)
            .send()
            .await
            .map_err(|e| ExtractionError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api(format!("HTTP {}: {}", status, body)));
        }

        let generate_response: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        let result = ExtractionResult::from_text(generate_response.response.trim());

        log::info!(
            "[OLLAMA_VL] Text extraction complete. Extracted {} characters",
            result.full_text().chars().count()
        );
        log::debug!("[OLLAMA_VL] Extracted text: {}", result.full_text());

        Ok(result)
    }
}
