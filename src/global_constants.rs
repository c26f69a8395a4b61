pub const APPLICATION_NAME: &str = "OCR & Keyword Search";
pub const APPLICATION_TITLE: &str = "Hindi & English OCR with Keyword Search using Qwen2-VL";
pub const APPLICATION_DESCRIPTION: &str = "Upload an image with text in Hindi or English, extract the text, and optionally search for keywords within it.";

pub const EXTRACTION_PROMPT: &str = "Extract the text from this image.";

pub const HIGHLIGHT_MARKER: &str = "**";

pub const MESSAGE_NO_IMAGE_PROVIDED: &str = "No image provided";
pub const MESSAGE_UPLOAD_IMAGE_PROMPT: &str = "Please upload an image.";
pub const MESSAGE_NO_TEXT_EXTRACTED: &str = "No text extracted.";
pub const MESSAGE_KEYWORD_NOT_FOUND: &str = "Keyword not found in the text.";
pub const MESSAGE_OCR_ERROR_PREFIX: &str = "Error occurred during OCR: ";

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:7860";
pub const DEFAULT_MODEL_ENDPOINT: &str = "http://localhost:8000";
pub const DEFAULT_MODEL_NAME: &str = "Qwen/Qwen2-VL-2B-Instruct";
pub const DEFAULT_MAX_NEW_TOKENS: u32 = 128;
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 120;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

pub const SETTINGS_DIRECTORY_NAME: &str = "ocr-keyword-search";
pub const SETTINGS_FILE_NAME: &str = "settings.json";

pub const ENV_BIND_ADDRESS: &str = "OCR_BIND_ADDRESS";
pub const ENV_MODEL_PROVIDER: &str = "OCR_MODEL_PROVIDER";
pub const ENV_MODEL_ENDPOINT: &str = "OCR_MODEL_ENDPOINT";
pub const ENV_MODEL_NAME: &str = "OCR_MODEL_NAME";
pub const ENV_API_KEY: &str = "OCR_API_KEY";
pub const ENV_MAX_NEW_TOKENS: &str = "OCR_MAX_NEW_TOKENS";

pub const STARTUP_BANNER: &str = r#"
╔════════════════════════════════════════════════════════╗
║  OCR & Keyword Search                                  ║
║                                                        ║
║  Upload an image in the browser to extract its text    ║
║  Press Ctrl+C to exit                                  ║
║                                                        ║
╚════════════════════════════════════════════════════════╝
"#;
