use base64::Engine;
use image::DynamicImage;

use crate::core::models::ExtractionError;

pub const PNG_MIME_TYPE: &str = "image/png";

/// Re-encodes an image as PNG and returns it base64-encoded, which every model
/// server accepts regardless of the uploaded format.
pub fn encode_png_base64(image: &DynamicImage) -> Result<String, ExtractionError> {
    log::debug!(
        "[IMAGE_PAYLOAD] Encoding {}x{} image as PNG",
        image.width(),
        image.height()
    );

    let mut buffer = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut buffer), image::ImageFormat::Png)
        .map_err(|e| ExtractionError::ImageEncoding(e.to_string()))?;

    Ok(base64::engine::general_purpose::STANDARD.encode(&buffer))
}

pub fn encode_png_data_url(image: &DynamicImage) -> Result<String, ExtractionError> {
    Ok(format!(
        "data:{};base64,{}",
        PNG_MIME_TYPE,
        encode_png_base64(image)?
    ))
}
