//! Raster reader backed by the `image` crate.
//!
//! Accepts any format the crate can sniff from the bytes (PNG, JPEG, BMP, TIFF, ...)
//! and flattens it to 8-bit RGB.

use tracing::debug;
use image::RgbImage;
use crate::waveform_pipeline::common::error::{PipelineError, Result};
use crate::waveform_pipeline::extract::reader::RasterReader;

pub struct ImageCrateReader;

impl RasterReader for ImageCrateReader {
    fn read_raster(&self, data: &[u8]) -> Result<RgbImage> {
        debug!("Decoding raster image, {} bytes", data.len());

        let decoded = image::load_from_memory(data)
            .map_err(|e| PipelineError::DecodeError(e.to_string()))?;

        debug!("Decoded image: {}x{} ({:?})", decoded.width(), decoded.height(), decoded.color());

        Ok(decoded.to_rgb8())
    }
}
