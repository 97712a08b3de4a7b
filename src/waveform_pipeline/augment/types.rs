//! Augmentation configuration types

use crate::waveform_pipeline::common::error::{PipelineError, Result};

/// Configuration for synthetic trace augmentation
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentConfig {
    /// Jitter deviation as a fraction of the trace's own y standard deviation
    pub jitter_strength: f64,
    /// Inclusive range for the single amplitude factor applied to all y values
    pub scale_range: (f64, f64),
    /// Inclusive range for the fraction of samples kept by the window slice
    pub slice_ratio_range: (f64, f64),
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            jitter_strength: 0.02,
            scale_range: (0.98, 1.02),
            slice_ratio_range: (0.9, 1.0),
        }
    }
}

impl AugmentConfig {
    pub fn builder() -> AugmentConfigBuilder {
        AugmentConfigBuilder::default()
    }

    pub fn validate(&self) -> Result<()> {
        if !self.jitter_strength.is_finite() || self.jitter_strength < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "jitter_strength must be a finite non-negative number, got {}",
                self.jitter_strength
            )));
        }
        validate_range("scale_range", self.scale_range)?;
        validate_range("slice_ratio_range", self.slice_ratio_range)?;
        if self.slice_ratio_range.0 < 0.0 {
            return Err(PipelineError::InvalidConfig(format!(
                "slice_ratio_range must not be negative, got {:?}",
                self.slice_ratio_range
            )));
        }
        Ok(())
    }
}

fn validate_range(name: &str, (lo, hi): (f64, f64)) -> Result<()> {
    if !lo.is_finite() || !hi.is_finite() || lo > hi {
        return Err(PipelineError::InvalidConfig(format!(
            "{name} must be finite with min <= max, got ({lo}, {hi})"
        )));
    }
    // uniform sampling needs a representable span
    if !(hi - lo).is_finite() {
        return Err(PipelineError::InvalidConfig(format!(
            "{name} span overflows, got ({lo}, {hi})"
        )));
    }
    Ok(())
}

/// Builder for AugmentConfig
#[derive(Default)]
pub struct AugmentConfigBuilder {
    jitter_strength: Option<f64>,
    scale_range: Option<(f64, f64)>,
    slice_ratio_range: Option<(f64, f64)>,
}

impl AugmentConfigBuilder {
    pub fn jitter_strength(mut self, strength: f64) -> Self {
        self.jitter_strength = Some(strength);
        self
    }

    pub fn scale_range(mut self, min: f64, max: f64) -> Self {
        self.scale_range = Some((min, max));
        self
    }

    pub fn slice_ratio_range(mut self, min: f64, max: f64) -> Self {
        self.slice_ratio_range = Some((min, max));
        self
    }

    pub fn build(self) -> AugmentConfig {
        let default = AugmentConfig::default();
        AugmentConfig {
            jitter_strength: self.jitter_strength.unwrap_or(default.jitter_strength),
            scale_range: self.scale_range.unwrap_or(default.scale_range),
            slice_ratio_range: self.slice_ratio_range.unwrap_or(default.slice_ratio_range),
        }
    }
}
