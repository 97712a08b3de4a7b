//! Column-scan waveform extractor.
//!
//! The drawn line is assumed single-valued in x. Every column is reduced on its
//! own: the rows flagged as ink collapse to one y value, and columns without ink
//! are skipped rather than interpolated.

use tracing::{debug, instrument, warn};
use image::RgbImage;

use crate::waveform_pipeline::common::error::Result;
use crate::waveform_pipeline::extract::image_reader::ImageCrateReader;
use crate::waveform_pipeline::extract::mask::ColorMask;
use crate::waveform_pipeline::extract::reader::RasterReader;
use crate::waveform_pipeline::extract::types::ExtractionConfig;
use crate::waveform_pipeline::trace::{Sample, Trace};

pub struct WaveformExtractor<R: RasterReader> {
    reader: R,
    config: ExtractionConfig,
}

impl WaveformExtractor<ImageCrateReader> {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            reader: ImageCrateReader,
            config,
        }
    }
}

impl<R: RasterReader> WaveformExtractor<R> {
    pub fn with_custom(reader: R, config: ExtractionConfig) -> Self {
        Self { reader, config }
    }

    /// Decodes `data` and extracts its waveform.
    ///
    /// Never fails: an undecodable image is logged and yields an empty trace,
    /// the same result as an image without ink.
    pub fn extract(&self, data: &[u8]) -> Trace {
        match self.try_extract(data) {
            Ok(trace) => trace,
            Err(e) => {
                warn!("Treating undecodable image as empty waveform: {}", e);
                Trace::new()
            }
        }
    }

    /// Like [`extract`](Self::extract) but reports decode failures.
    #[instrument(skip(self, data), fields(input_size = data.len()))]
    pub fn try_extract(&self, data: &[u8]) -> Result<Trace> {
        let image = {
            let _span = tracing::debug_span!("decode_raster").entered();
            self.reader.read_raster(data)?
        };

        Ok(self.extract_image(&image))
    }

    /// Extracts the waveform from an already decoded image.
    pub fn extract_image(&self, image: &RgbImage) -> Trace {
        let mask = {
            let _span = tracing::debug_span!("build_mask",
                width = image.width(),
                height = image.height()
            ).entered();
            ColorMask::from_image(image, &self.config.ink_range)
        };

        let trace = self.extract_mask(&mask);

        debug!(
            ink_pixels = mask.ink_count(),
            samples = trace.len(),
            "Column scan complete"
        );
        trace
    }

    /// Reduces each column of `mask` to at most one sample, left to right.
    pub fn extract_mask(&self, mask: &ColorMask) -> Trace {
        let mut trace = Trace::new();
        (0..mask.width())
            .filter_map(|col| self.column_sample(mask, col))
            .for_each(|sample| trace.push_ordered(sample));
        trace
    }

    fn column_sample(&self, mask: &ColorMask, col: usize) -> Option<Sample> {
        let (row_sum, row_count) = mask
            .ink_rows(col)
            .fold((0usize, 0usize), |(sum, count), row| (sum + row, count + 1));

        if row_count == 0 {
            return None;
        }

        let y = self.config.row_reduction.reduce(row_sum, row_count);
        Some(Sample::new(col as i64, y))
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }
}
