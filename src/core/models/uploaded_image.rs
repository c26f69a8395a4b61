use anyhow::{Context, Result};
use image::DynamicImage;

#[derive(Clone)]
pub struct UploadedImage {
    pub file_name: Option<String>,
    pub width: u32,
    pub height: u32,
    image: DynamicImage,
}

impl std::fmt::Debug for UploadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedImage")
            .field("file_name", &self.file_name)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl UploadedImage {
    pub fn decode_from_bytes(file_name: Option<String>, bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            anyhow::bail!("Uploaded image is empty");
        }

        let image = image::load_from_memory(bytes)
            .context("Uploaded file is not a supported raster image")?;

        log::debug!(
            "[UPLOADED_IMAGE] decoded {:?}: {}x{}",
            file_name,
            image.width(),
            image.height()
        );

        Ok(Self::from_dynamic_image(file_name, image))
    }

    pub fn from_dynamic_image(file_name: Option<String>, image: DynamicImage) -> Self {
        Self {
            file_name,
            width: image.width(),
            height: image.height(),
            image,
        }
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}
