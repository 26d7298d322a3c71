//! Single-page document assembly.
//!
//! The pipeline hands the finished raster to a [`PageEncoder`], which turns
//! it into an encoded one-page document byte stream. [`PngPage`] is the
//! built-in implementation.

use image::RgbaImage;

use crate::error::ZebritaError;

/// External collaborator that encodes a fixed-size raster into a single-page
/// document.
pub trait PageEncoder {
    fn encode(&self, raster: &RgbaImage) -> Result<Vec<u8>, ZebritaError>;
}

/// PNG document encoding via the `image` codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngPage;

impl PageEncoder for PngPage {
    fn encode(&self, raster: &RgbaImage) -> Result<Vec<u8>, ZebritaError> {
        use image::ImageEncoder;

        let mut bytes = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut bytes);
        encoder
            .write_image(
                raster.as_raw(),
                raster.width(),
                raster.height(),
                image::ExtendedColorType::Rgba8,
            )
            .map_err(|e: image::ImageError| ZebritaError::Image(e.to_string()))?;

        Ok(bytes)
    }
}
