use anyhow::{Context, Result};
use image::ImageFormat;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ImageValidationError {
    #[error("Payload is not a recognized image format")]
    UnrecognizedFormat,
    #[error("Image format {0:?} is not supported")]
    UnsupportedFormat(ImageFormat),
    #[error("Image data is corrupt or truncated")]
    DecodeFailed,
}

/// Stores recipe images on the local filesystem under the configured media
/// root, keyed by a fresh UUID so replacements never collide.
#[derive(Debug, Clone)]
pub struct ImageStorageService {
    media_root: PathBuf,
}

impl ImageStorageService {
    pub fn new(media_root: PathBuf) -> Self {
        Self { media_root }
    }

    /// Check that the payload decodes as a supported image format
    pub fn validate(data: &[u8]) -> Result<ImageFormat, ImageValidationError> {
        let format =
            image::guess_format(data).map_err(|_| ImageValidationError::UnrecognizedFormat)?;

        if !matches!(
            format,
            ImageFormat::Jpeg
                | ImageFormat::Png
                | ImageFormat::Gif
                | ImageFormat::WebP
                | ImageFormat::Bmp
        ) {
            return Err(ImageValidationError::UnsupportedFormat(format));
        }

        image::load_from_memory(data).map_err(|_| ImageValidationError::DecodeFailed)?;

        Ok(format)
    }

    /// Write a validated payload to disk and return its stored reference
    pub async fn store_recipe_image(&self, data: &[u8], format: ImageFormat) -> Result<String> {
        let ext = format.extensions_str().first().copied().unwrap_or("img");
        let reference = format!("uploads/recipes/{}.{}", Uuid::new_v4(), ext);
        let path = self.media_root.join(&reference);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("creating media directory")?;
        }

        tokio::fs::write(&path, data)
            .await
            .with_context(|| format!("writing image to {}", path.display()))?;

        debug!("Stored recipe image at {}", path.display());
        Ok(reference)
    }

    /// Best-effort removal of a replaced image file
    pub async fn remove(&self, reference: &str) {
        let path = self.media_root.join(reference);
        if let Err(err) = tokio::fs::remove_file(&path).await {
            warn!("Failed to remove replaced image {}: {}", path.display(), err);
        }
    }
}
