//! PNG line-plot writer.
//!
//! Draws the trace as a polyline fitted to the area inside an axis frame, with
//! evenly spaced tick marks. No text is drawn.

use std::io::{Cursor, Write};

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use imageproc::drawing::{draw_cross_mut, draw_line_segment_mut};
use tracing::debug;

use crate::waveform_pipeline::common::error::{PipelineError, Result};
use crate::waveform_pipeline::render::types::PlotConfig;
use crate::waveform_pipeline::render::writer::PlotWriter;
use crate::waveform_pipeline::trace::Trace;

/// Length of a tick mark outside the frame, in pixels.
const TICK_LENGTH: f32 = 6.0;

pub struct PngPlotWriter;

/// Maps data coordinates onto the pixel area inside the frame.
struct PlotArea {
    left: f32,
    right: f32,
    top: f32,
    bottom: f32,
    x_range: (f64, f64),
    y_range: (f64, f64),
    flip_y: bool,
}

impl PlotArea {
    fn new(trace: &Trace, config: &PlotConfig) -> Self {
        let margin = config.margin as f32;
        Self {
            left: margin,
            right: (config.width - 1) as f32 - margin,
            top: margin,
            bottom: (config.height - 1) as f32 - margin,
            x_range: padded_range(trace.xs().map(|x| x as f64)),
            y_range: padded_range(trace.ys()),
            flip_y: config.flip_y,
        }
    }

    fn project(&self, x: f64, y: f64) -> (f32, f32) {
        let fx = (x - self.x_range.0) / (self.x_range.1 - self.x_range.0);
        let mut fy = (y - self.y_range.0) / (self.y_range.1 - self.y_range.0);
        if !self.flip_y {
            fy = 1.0 - fy;
        }
        (
            self.left + fx as f32 * (self.right - self.left),
            self.top + fy as f32 * (self.bottom - self.top),
        )
    }
}

/// Min/max of `values`, widened by one unit each way when they coincide.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if max > min { (min, max) } else { (min - 1.0, min + 1.0) }
}

impl PngPlotWriter {
    /// Renders the trace into an in-memory RGB image.
    pub fn render(&self, trace: &Trace, config: &PlotConfig) -> Result<RgbImage> {
        config.validate()?;
        if trace.is_empty() {
            return Err(PipelineError::EmptyTrace("nothing to plot".to_string()));
        }

        let mut canvas = RgbImage::from_pixel(config.width, config.height, Rgb(config.background));
        let area = PlotArea::new(trace, config);

        Self::draw_frame(&mut canvas, &area, config);

        let line = Rgb(config.line_color);
        let points: Vec<(f32, f32)> = trace.iter().map(|s| area.project(s.x as f64, s.y)).collect();
        if let [point] = points.as_slice() {
            draw_cross_mut(&mut canvas, line, point.0.round() as i32, point.1.round() as i32);
        }
        for segment in points.windows(2) {
            draw_line_segment_mut(&mut canvas, segment[0], segment[1], line);
        }

        Ok(canvas)
    }

    fn draw_frame(canvas: &mut RgbImage, area: &PlotArea, config: &PlotConfig) {
        let axis = Rgb(config.axis_color);
        let (l, r, t, b) = (area.left, area.right, area.top, area.bottom);

        draw_line_segment_mut(canvas, (l, t), (r, t), axis);
        draw_line_segment_mut(canvas, (l, b), (r, b), axis);
        draw_line_segment_mut(canvas, (l, t), (l, b), axis);
        draw_line_segment_mut(canvas, (r, t), (r, b), axis);

        for i in 0..=config.ticks.max(1) {
            let f = i as f32 / config.ticks.max(1) as f32;
            let x = l + f * (r - l);
            let y = t + f * (b - t);
            draw_line_segment_mut(canvas, (x, b), (x, b + TICK_LENGTH), axis);
            draw_line_segment_mut(canvas, (l - TICK_LENGTH, y), (l, y), axis);
        }
    }
}

impl PlotWriter for PngPlotWriter {
    fn write_plot(&self, trace: &Trace, output: &mut dyn Write, config: &PlotConfig) -> Result<()> {
        debug!("Rendering {} samples to {}x{} PNG", trace.len(), config.width, config.height);

        let canvas = self.render(trace, config)?;

        let mut buffer = Vec::new();
        DynamicImage::ImageRgb8(canvas)
            .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .map_err(|e| PipelineError::RenderError(e.to_string()))?;

        output.write_all(&buffer)?;

        debug!("PNG encoding complete, {} bytes", buffer.len());
        Ok(())
    }
}
