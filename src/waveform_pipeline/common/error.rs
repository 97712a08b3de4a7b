use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read input: {0}")]
    InputReadError(String),

    #[error("Failed to write output: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Trace x values must strictly increase: sample {index} has x={found} after x={previous}")]
    UnorderedTrace { index: usize, previous: i64, found: i64 },

    #[error("Trace contains no samples: {0}")]
    EmptyTrace(String),

    #[error("Failed to render plot: {0}")]
    RenderError(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
