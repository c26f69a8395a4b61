mod ocr;
mod ocr_language;
mod search_query;
mod service_settings;
mod uploaded_image;

pub use ocr::{ExtractionError, ExtractionResult};
pub use ocr_language::OcrLanguage;
pub use search_query::SearchQuery;
pub use service_settings::{ModelProvider, ServiceSettings};
pub use uploaded_image::UploadedImage;
