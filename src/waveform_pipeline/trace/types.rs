//! Trace data types

use crate::waveform_pipeline::common::error::{PipelineError, Result};

/// One point of a waveform: column position and (possibly averaged) row value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub x: i64,
    pub y: f64,
}

impl Sample {
    pub fn new(x: i64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ordered left-to-right waveform with strictly increasing `x`.
///
/// A trace may be empty; that is the normal result when no waveform was found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trace {
    samples: Vec<Sample>,
}

impl Trace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a trace from arbitrary samples, rejecting any that break x ordering.
    pub fn from_samples(samples: Vec<Sample>) -> Result<Self> {
        for (index, pair) in samples.windows(2).enumerate() {
            if pair[1].x <= pair[0].x {
                return Err(PipelineError::UnorderedTrace {
                    index: index + 1,
                    previous: pair[0].x,
                    found: pair[1].x,
                });
            }
        }
        Ok(Self { samples })
    }

    /// Builds a trace with x set to the ordinal position of each value.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let samples = values
            .into_iter()
            .enumerate()
            .map(|(i, y)| Sample::new(i as i64, y))
            .collect();
        Self { samples }
    }

    /// Appends a sample whose x the caller guarantees is past the last one.
    pub(crate) fn push_ordered(&mut self, sample: Sample) {
        debug_assert!(self.samples.last().is_none_or(|last| last.x < sample.x));
        self.samples.push(sample);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn xs(&self) -> impl Iterator<Item = i64> + '_ {
        self.samples.iter().map(|s| s.x)
    }

    pub fn ys(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().map(|s| s.y)
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
