//! Extraction configuration types

use crate::waveform_pipeline::extract::hsv::ColorRange;

/// How the ink rows of one column collapse into a single y value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowReduction {
    /// Arithmetic mean of the ink rows (default)
    Mean,
    /// Mean truncated toward zero to a whole pixel row
    TruncatedMean,
}

impl RowReduction {
    pub fn reduce(self, row_sum: usize, row_count: usize) -> f64 {
        let mean = row_sum as f64 / row_count as f64;
        match self {
            RowReduction::Mean => mean,
            RowReduction::TruncatedMean => mean.trunc(),
        }
    }
}

/// Configuration for waveform extraction
#[derive(Debug, Clone)]
pub struct ExtractionConfig {
    /// HSV range a pixel must fall into to count as ink
    pub ink_range: ColorRange,
    /// Reduction applied to each column's ink rows
    pub row_reduction: RowReduction,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            ink_range: ColorRange::dark_ink(),
            row_reduction: RowReduction::Mean,
        }
    }
}

impl ExtractionConfig {
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder::default()
    }
}

/// Builder for ExtractionConfig
#[derive(Default)]
pub struct ExtractionConfigBuilder {
    ink_range: Option<ColorRange>,
    row_reduction: Option<RowReduction>,
}

impl ExtractionConfigBuilder {
    pub fn ink_range(mut self, ink_range: ColorRange) -> Self {
        self.ink_range = Some(ink_range);
        self
    }

    /// Shorthand for a brightness-only ink range.
    pub fn value_max(mut self, value_max: u8) -> Self {
        self.ink_range = Some(ColorRange::brightness_at_most(value_max));
        self
    }

    pub fn row_reduction(mut self, row_reduction: RowReduction) -> Self {
        self.row_reduction = Some(row_reduction);
        self
    }

    pub fn build(self) -> ExtractionConfig {
        let default = ExtractionConfig::default();
        ExtractionConfig {
            ink_range: self.ink_range.unwrap_or(default.ink_range),
            row_reduction: self.row_reduction.unwrap_or(default.row_reduction),
        }
    }
}
