//! Common utilities module
//!
//! Shared error type used across the waveform pipeline.

pub mod error;

pub use error::{PipelineError, Result};
