mod image_payload;
mod ollama_vision_ocr_service;
mod openai_vision_ocr_service;

pub use ollama_vision_ocr_service::OllamaVisionOcrService;
pub use openai_vision_ocr_service::OpenAiVisionOcrService;
