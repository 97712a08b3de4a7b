//! Plot rendering module
//!
//! Turns a trace back into a PNG line plot for visual inspection.

mod writer;
mod png_plot_writer;
pub mod types;


pub use writer::PlotWriter;
pub use png_plot_writer::PngPlotWriter;
pub use types::{PlotConfig, PlotConfigBuilder};
