//! Pipeline conversions module
//!
//! Directory-level drivers chaining the engines through files: images to CSV
//! traces, CSV traces to augmented CSV traces, and CSV traces to PNG plots.

mod image_to_csv;
mod csv_augment;
mod csv_to_png;
pub mod batch;
pub mod timing;
pub mod types;

#[cfg(test)]
mod tests;

pub use image_to_csv::ImageToCsvPipeline;
pub use csv_augment::CsvAugmentPipeline;
pub use csv_to_png::CsvToPngPipeline;
pub use batch::{BatchReport, augmented_file_name, default_extract_output_dir};
pub use timing::{BatchTimings, StageTiming, Timer};
pub use types::{
    AugmentBatchConfig, AugmentBatchConfigBuilder, ExtractBatchConfig, ExtractBatchConfigBuilder,
    RenderBatchConfig, RenderBatchConfigBuilder,
};
