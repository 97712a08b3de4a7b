//! Boolean ink mask derived from a raster image.

use image::RgbImage;
use crate::waveform_pipeline::extract::hsv::{ColorRange, Hsv};

/// Row-major ink mask with the same dimensions as its source image.
#[derive(Debug, Clone)]
pub struct ColorMask {
    width: usize,
    height: usize,
    data: Vec<bool>,
}

impl ColorMask {
    pub fn from_image(image: &RgbImage, ink_range: &ColorRange) -> Self {
        let data = image
            .pixels()
            .map(|pixel| ink_range.contains(Hsv::from_rgb(pixel.0)))
            .collect();

        Self {
            width: image.width() as usize,
            height: image.height() as usize,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_ink(&self, row: usize, col: usize) -> bool {
        self.data[row * self.width + col]
    }

    /// Rows in column `col` that are ink, top to bottom.
    pub fn ink_rows(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        (0..self.height).filter(move |&row| self.is_ink(row, col))
    }

    pub fn ink_count(&self) -> usize {
        self.data.iter().filter(|&&ink| ink).count()
    }
}
