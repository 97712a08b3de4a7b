//! Randomized trace augmenter.
//!
//! Each call applies, in order: relative Gaussian jitter, one shared amplitude
//! scale, an optional contiguous window slice, then re-indexes x from zero. The
//! random source is always supplied by the caller.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, warn};

use crate::waveform_pipeline::augment::types::AugmentConfig;
use crate::waveform_pipeline::common::error::Result;
use crate::waveform_pipeline::trace::Trace;

/// The random draws behind one augmented trace.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AugmentDraw {
    /// Standard deviation of the Gaussian noise added to y (0 means no noise)
    pub noise_std: f64,
    /// Amplitude factor applied to every y value
    pub scale_factor: f64,
    /// `(start, length)` of the kept window, `None` when slicing was skipped
    pub window: Option<(usize, usize)>,
}

pub struct TraceAugmenter {
    config: AugmentConfig,
}

impl TraceAugmenter {
    pub fn new(config: AugmentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn augment<R: Rng + ?Sized>(&self, source: &Trace, rng: &mut R) -> Trace {
        self.augment_with_draw(source, rng).0
    }

    /// Same as [`augment`](Self::augment), also returning what was drawn.
    pub fn augment_with_draw<R: Rng + ?Sized>(
        &self,
        source: &Trace,
        rng: &mut R,
    ) -> (Trace, AugmentDraw) {
        let mut values: Vec<f64> = source.ys().collect();

        let noise_std = sample_std_dev(&values) * self.config.jitter_strength;
        add_jitter(&mut values, noise_std, rng);

        let (scale_min, scale_max) = self.config.scale_range;
        let scale_factor = rng.random_range(scale_min..=scale_max);
        values.iter_mut().for_each(|y| *y *= scale_factor);

        let window = self.draw_window(values.len(), rng);
        if let Some((start, length)) = window {
            values.truncate(start + length);
            values.drain(..start);
        }

        let draw = AugmentDraw {
            noise_std,
            scale_factor,
            window,
        };
        debug!(
            source_len = source.len(),
            output_len = values.len(),
            ?draw,
            "Augmented trace"
        );

        (Trace::from_values(values), draw)
    }

    fn draw_window<R: Rng + ?Sized>(&self, len: usize, rng: &mut R) -> Option<(usize, usize)> {
        if len == 0 {
            return None;
        }

        let (ratio_min, ratio_max) = self.config.slice_ratio_range;
        let ratio = rng.random_range(ratio_min..=ratio_max);
        let slice_length = (len as f64 * ratio).floor() as usize;

        if slice_length == 0 || slice_length >= len {
            return None;
        }

        let start = rng.random_range(0..=len - slice_length);
        Some((start, slice_length))
    }

    pub fn config(&self) -> &AugmentConfig {
        &self.config
    }
}

/// Sample standard deviation (n - 1 denominator); zero for fewer than two values.
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let sum_sq: f64 = values.iter().map(|y| (y - mean).powi(2)).sum();
    (sum_sq / (n - 1.0)).sqrt()
}

fn add_jitter<R: Rng + ?Sized>(values: &mut [f64], noise_std: f64, rng: &mut R) {
    if noise_std == 0.0 {
        return;
    }

    match Normal::new(0.0, noise_std) {
        Ok(normal) => {
            for y in values.iter_mut() {
                *y += normal.sample(rng);
            }
        }
        Err(e) => warn!("Skipping jitter, invalid noise deviation {}: {}", noise_std, e),
    }
}
