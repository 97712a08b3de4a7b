//! Waveform extraction module
//!
//! Recovers a single-valued `y(x)` trace from a chart image by brightness-based
//! ink segmentation followed by a per-column reduction.

mod reader;
mod image_reader;
mod extractor;
pub mod hsv;
pub mod mask;
pub mod types;


pub use reader::RasterReader;
pub use image_reader::ImageCrateReader;
pub use extractor::WaveformExtractor;
pub use hsv::{ColorRange, Hsv};
pub use mask::ColorMask;
pub use types::{ExtractionConfig, ExtractionConfigBuilder, RowReduction};
