//! Trace augmentation module
//!
//! Generates structurally similar synthetic variants of a trace for training sets.

mod augmenter;
pub mod types;


pub use augmenter::{AugmentDraw, TraceAugmenter, sample_std_dev};
pub use types::{AugmentConfig, AugmentConfigBuilder};
