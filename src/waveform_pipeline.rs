//! Waveform pipeline module
//!
//! Extraction of pulse-waveform traces from chart images, synthetic augmentation
//! of those traces, and rendering them back to plots. The engines are pure; file
//! handling lives in `conversions`.

pub mod common;
pub mod trace;
pub mod extract;
pub mod augment;
pub mod render;
pub mod conversions;

pub use common::{
    PipelineError,
    Result,
};

pub use trace::{
    Sample,
    Trace,
    CsvHeader,
    TraceReader,
    TraceWriter,
    CsvTraceReader,
    CsvTraceWriter,
};

pub use extract::{
    Hsv,
    ColorRange,
    ColorMask,
    RowReduction,
    ExtractionConfig,
    RasterReader,
    ImageCrateReader,
    WaveformExtractor,
};

pub use augment::{
    AugmentConfig,
    AugmentDraw,
    TraceAugmenter,
};

pub use render::{
    PlotConfig,
    PlotWriter,
    PngPlotWriter,
};

pub use conversions::{
    BatchReport,
    ImageToCsvPipeline,
    CsvAugmentPipeline,
    CsvToPngPipeline,
    ExtractBatchConfig,
    AugmentBatchConfig,
    RenderBatchConfig,
};
