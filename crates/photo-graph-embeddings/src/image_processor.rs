//! Image preprocessing: decode, convert, resize, scale.
//!
//! 1. Decode image bytes (PNG, JPEG, WebP, GIF)
//! 2. Convert to RGB, unless native channels are kept
//! 3. Resize to the model input size with bilinear interpolation
//! 4. Scale each channel value to `[0, 1]`

use std::path::Path;

use image::imageops::FilterType;
use image::DynamicImage;
use photo_graph_core::config::{EmbeddingConfig, SourceConfig};
use photo_graph_core::{CoreError, CoreResult, InputShape, PixelTensor};

/// Turns image files into model input tensors.
#[derive(Debug, Clone)]
pub struct ImageProcessor {
    height: u32,
    width: u32,
    convert_to_rgb: bool,
}

impl ImageProcessor {
    pub fn new(height: u32, width: u32, convert_to_rgb: bool) -> Self {
        Self {
            height,
            width,
            convert_to_rgb,
        }
    }

    pub fn from_config(embedding: &EmbeddingConfig, source: &SourceConfig) -> Self {
        Self::new(
            embedding.input_height,
            embedding.input_width,
            source.convert_to_rgb,
        )
    }

    /// Shape of tensors produced for RGB input.
    pub fn target_shape(&self) -> InputShape {
        InputShape::new(self.height, self.width, 3)
    }

    /// Reads and preprocesses the file at `path`.
    pub fn preprocess_path(&self, path: &Path) -> CoreResult<PixelTensor> {
        let bytes = std::fs::read(path).map_err(|e| CoreError::ImageDecode {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        self.preprocess_bytes(&bytes, &path.display().to_string())
    }

    /// Preprocesses encoded image bytes; `label` names the image in errors.
    pub fn preprocess_bytes(&self, bytes: &[u8], label: &str) -> CoreResult<PixelTensor> {
        if bytes.is_empty() {
            return Err(CoreError::ImageDecode {
                path: label.to_string(),
                message: "file is empty".to_string(),
            });
        }

        let img = image::load_from_memory(bytes).map_err(|e| {
            tracing::debug!(image = label, error = %e, "Failed to decode image");
            CoreError::ImageDecode {
                path: label.to_string(),
                message: e.to_string(),
            }
        })?;

        let resized = img.resize_exact(self.width, self.height, FilterType::Triangle);
        let (channels, raw) = if self.convert_to_rgb {
            (3, resized.to_rgb8().into_raw())
        } else {
            native_channels(&resized)
        };

        let data = raw.into_iter().map(|v| v as f32 / 255.0).collect();
        PixelTensor::new(InputShape::new(self.height, self.width, channels), data)
    }
}

/// 8-bit samples in the image's own channel layout.
fn native_channels(img: &DynamicImage) -> (u32, Vec<u8>) {
    match img.color().channel_count() {
        1 => (1, img.to_luma8().into_raw()),
        2 => (2, img.to_luma_alpha8().into_raw()),
        4 => (4, img.to_rgba8().into_raw()),
        _ => (3, img.to_rgb8().into_raw()),
    }
}
