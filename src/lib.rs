pub mod logger;
pub mod waveform_pipeline;
