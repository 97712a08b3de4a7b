//! Plot rendering configuration types

use crate::waveform_pipeline::common::error::{PipelineError, Result};

/// Configuration for rendering a trace to a PNG line plot
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Blank border between the image edge and the axis frame
    pub margin: u32,
    /// Number of tick marks along each axis
    pub ticks: u32,
    /// Draw larger y values lower, matching the row order of a source image
    pub flip_y: bool,
    pub background: [u8; 3],
    pub axis_color: [u8; 3],
    pub line_color: [u8; 3],
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            margin: 40,
            ticks: 10,
            flip_y: false,
            background: [255, 255, 255],
            axis_color: [0, 0, 0],
            line_color: [31, 119, 180],
        }
    }
}

impl PlotConfig {
    pub fn builder() -> PlotConfigBuilder {
        PlotConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        let min_extent = 2 * self.margin + 2;
        if self.width < min_extent || self.height < min_extent {
            return Err(PipelineError::InvalidConfig(format!(
                "plot size {}x{} leaves no drawing area inside a {}px margin",
                self.width, self.height, self.margin
            )));
        }
        Ok(())
    }
}

/// Builder for PlotConfig
#[derive(Default)]
pub struct PlotConfigBuilder {
    size: Option<(u32, u32)>,
    margin: Option<u32>,
    ticks: Option<u32>,
    flip_y: Option<bool>,
    line_color: Option<[u8; 3]>,
}

impl PlotConfigBuilder {
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn ticks(mut self, ticks: u32) -> Self {
        self.ticks = Some(ticks);
        self
    }

    pub fn flip_y(mut self, flip: bool) -> Self {
        self.flip_y = Some(flip);
        self
    }

    pub fn line_color(mut self, color: [u8; 3]) -> Self {
        self.line_color = Some(color);
        self
    }

    pub fn build(self) -> PlotConfig {
        let default = PlotConfig::default();
        let (width, height) = self.size.unwrap_or((default.width, default.height));
        PlotConfig {
            width,
            height,
            margin: self.margin.unwrap_or(default.margin),
            ticks: self.ticks.unwrap_or(default.ticks),
            flip_y: self.flip_y.unwrap_or(default.flip_y),
            line_color: self.line_color.unwrap_or(default.line_color),
            ..default
        }
    }
}
