use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use image::DynamicImage;
use serde::{Deserialize, Serialize};

use super::image_payload;
use crate::core::interfaces::adapters::OcrService;
use crate::core::models::{ExtractionError, ExtractionResult, ServiceSettings};
use crate::global_constants;

/// Extracts text through an OpenAI-compatible chat completions endpoint,
/// e.g. vLLM serving `Qwen/Qwen2-VL-2B-Instruct`.
pub struct OpenAiVisionOcrService {
    client: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    max_new_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: Vec<ChatContent>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum ChatContent {
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ChatImageUrl },
    #[serde(rename = "text")]
    Text { text: String },
}

#[derive(Debug, Serialize)]
struct ChatImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

impl OpenAiVisionOcrService {
    pub fn build(settings: &ServiceSettings) -> Result<Self> {
        log::info!(
            "[OPENAI_VL] Initializing client for model {} at {}",
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
            api_key: settings.api_key.clone(),
            max_new_tokens: settings.max_new_tokens,
        })
    }

    fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.endpoint)
    }

    fn build_request(&self, data_url: String) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: vec![
                    ChatContent::ImageUrl {
                        image_url: ChatImageUrl { url: data_url },
                    },
                    ChatContent::Text {
                        text: global_constants::EXTRACTION_PROMPT.to_string(),
                    },
                ],
            }],
            max_tokens: self.max_new_tokens,
        }
    }

    fn parse_response(response: ChatResponse) -> Result<ExtractionResult, ExtractionError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(ExtractionError::EmptyResponse)?;

        let text = choice.message.content.unwrap_or_default();
        Ok(ExtractionResult::from_text(text.trim()))
    }
}

#[async_trait]
impl OcrService for OpenAiVisionOcrService {
    async fn extract_text_from_image(
        &self,
        image: &DynamicImage,
    ) -> Result<ExtractionResult, ExtractionError> {
        log::info!("[OPENAI_VL] Starting text extraction");
        log::debug!(
            "[OPENAI_VL] Image dimensions: {}x{}",
            image.width(),
            image.height()
        );

        let data_url = image_payload::encode_png_data_url(image)?;
        let request = self.build_request(data_url);

        let mut builder = self.client.post(self.chat_completions_url()).json(&request);
        if let Some(api_key) = &self.api_key {
            builder = builder.bearer_auth(api_key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ExtractionError::Connection(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ExtractionError::Api(format!("HTTP {}: {}", status, body)));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        let result = Self::parse_response(chat_response)?;

        log::info!(
            "[OPENAI_VL] Text extraction complete. Extracted {} characters",
            result.full_text().chars().count()
        );
        log::debug!("[OPENAI_VL] Extracted text: {}", result.full_text());

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{routing::post, Json, Router};

    fn create_test_settings(endpoint: &str) -> ServiceSettings {
        ServiceSettings {
            model_endpoint: endpoint.to_string(),
            ..ServiceSettings::default()
        }
    }

    async fn spawn_model_server(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", address)
    }

    #[test]
    fn test_chat_completions_url_strips_trailing_slash() {
        let service = OpenAiVisionOcrService::build(&create_test_settings("http://gpu:8000/")).unwrap();

        assert_eq!(service.chat_completions_url(), "http://gpu:8000/v1/chat/completions");
    }

    #[test]
    fn test_build_request_sends_image_then_prompt() {
        let service = OpenAiVisionOcrService::build(&create_test_settings("http://gpu:8000")).unwrap();

        let request = service.build_request("data:image/png;base64,AAAA".to_string());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "Qwen/Qwen2-VL-2B-Instruct");
        assert_eq!(json["max_tokens"], 128);
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"][0]["type"], "image_url");
        assert_eq!(
            json["messages"][0]["content"][0]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
        assert_eq!(json["messages"][0]["content"][1]["type"], "text");
        assert_eq!(
            json["messages"][0]["content"][1]["text"],
            "Extract the text from this image."
        );
    }

    #[test]
    fn test_parse_response_trims_content() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"  Hello World\n"}}]}"#,
        )
        .unwrap();

        let result = OpenAiVisionOcrService::parse_response(response).unwrap();

        assert_eq!(result.full_text(), "Hello World");
    }

    #[test]
    fn test_parse_response_without_choices_is_an_error() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();

        let result = OpenAiVisionOcrService::parse_response(response);

        assert!(matches!(result, Err(ExtractionError::EmptyResponse)));
    }

    #[test]
    fn test_parse_response_with_null_content_is_empty_text() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();

        let result = OpenAiVisionOcrService::parse_response(response).unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_extract_text_from_image_calls_model_server() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<serde_json::Value>| async move {
                let prompt = body["messages"][0]["content"][1]["text"]
                    .as_str()
                    .unwrap_or_default()
                    .to_string();
                Json(serde_json::json!({
                    "choices": [{ "message": { "content": format!("echo: {}", prompt) } }]
                }))
            }),
        );
        let endpoint = spawn_model_server(router).await;
        let service = OpenAiVisionOcrService::build(&create_test_settings(&endpoint)).unwrap();

        let result = service
            .extract_text_from_image(&DynamicImage::new_rgb8(4, 4))
            .await
            .unwrap();

        assert_eq!(result.full_text(), "echo: Extract the text from this image.");
    }

    #[tokio::test]
    async fn test_extract_text_from_image_reports_http_errors() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (axum::http::StatusCode::SERVICE_UNAVAILABLE, "model loading") }),
        );
        let endpoint = spawn_model_server(router).await;
        let service = OpenAiVisionOcrService::build(&create_test_settings(&endpoint)).unwrap();

        let error = service
            .extract_text_from_image(&DynamicImage::new_rgb8(4, 4))
            .await
            .unwrap_err();

        match error {
            ExtractionError::Api(message) => {
                assert!(message.contains("503"));
                assert!(message.contains("model loading"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
