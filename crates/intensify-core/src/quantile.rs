//! Sampled rank statistics.
//!
//! Quantiles are integers in `[0, QUANTILE_SCALE]` (ten-thousandths of the
//! sampled population), estimated from a random sample rather than the full
//! image, so they are deterministic only up to the sample drawn.

use rand::Rng;

use crate::consts::QUANTILE_SCALE;
use crate::error::{IntensifyError, Result};
use crate::frame::Frame;

/// Sorted pixel intensities drawn from one frame, at integer granularity.
#[derive(Clone, Debug)]
pub struct SampleSet {
    sorted: Vec<i64>,
}

impl SampleSet {
    /// Build a sample set from raw intensities. Values are truncated toward
    /// zero; an empty input yields `EmptySample`.
    pub fn from_values<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = f32>,
    {
        let mut sorted: Vec<i64> = values.into_iter().map(|v| v.trunc() as i64).collect();
        if sorted.is_empty() {
            return Err(IntensifyError::EmptySample);
        }
        sorted.sort_unstable();
        Ok(Self { sorted })
    }

    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    pub fn values(&self) -> &[i64] {
        &self.sorted
    }

    pub fn min(&self) -> i64 {
        self.sorted[0]
    }

    pub fn max(&self) -> i64 {
        self.sorted[self.sorted.len() - 1]
    }

    /// Rank of `value` in ten-thousandths: the share of samples strictly
    /// below it (binary-search insertion point), rounded.
    pub fn quantile_of(&self, value: f64) -> u32 {
        let fraction = self.count_below(value) as f64 / self.sorted.len() as f64;
        (fraction * QUANTILE_SCALE as f64).round() as u32
    }

    /// Number of samples strictly below `value`.
    pub fn count_below(&self, value: f64) -> usize {
        self.sorted.partition_point(|&s| (s as f64) < value)
    }

    /// Largest sample strictly below `value`, or one less than the smallest
    /// sample when none is.
    pub fn value_below(&self, value: f64) -> i64 {
        match self.count_below(value) {
            0 => self.min() - 1,
            below => self.sorted[below - 1],
        }
    }

    /// Intensity threshold for `ceiling`: its quantile mapped back through
    /// this same sample, capped at the largest sample below the ceiling.
    pub fn threshold_for(&self, ceiling: f64) -> i64 {
        self.value_at_quantile(self.quantile_of(ceiling))
            .min(self.value_below(ceiling))
    }

    /// Reverse lookup: the largest sample ranked strictly below `quantile`.
    ///
    /// `quantile` 0 maps to the smallest sample. With more than
    /// `QUANTILE_SCALE` samples one quantile step spans several samples, so
    /// the result may sit past the value the quantile was computed from.
    pub fn value_at_quantile(&self, quantile: u32) -> i64 {
        let n = self.sorted.len();
        let q = quantile.min(QUANTILE_SCALE) as f64 / QUANTILE_SCALE as f64;
        let rank = (q * n as f64).round() as usize;
        self.sorted[rank.saturating_sub(1).min(n - 1)]
    }
}

/// Draw `min(sample_size, pixels)` intensities uniformly at random, with
/// replacement, using the thread-local RNG.
pub fn sample(frame: &Frame, sample_size: usize) -> Result<SampleSet> {
    sample_with_rng(frame, sample_size, &mut rand::rng())
}

/// Same as [`sample`] with an explicit random source.
pub fn sample_with_rng<R: Rng + ?Sized>(
    frame: &Frame,
    sample_size: usize,
    rng: &mut R,
) -> Result<SampleSet> {
    if sample_size == 0 {
        return Err(IntensifyError::InvalidParameter(
            "sample size must be positive".into(),
        ));
    }
    if frame.is_empty() {
        return Err(IntensifyError::EmptySample);
    }

    let w = frame.width();
    let count = sample_size.min(frame.len());
    let values = (0..count).map(|_| {
        let idx = rng.random_range(0..frame.len());
        frame.data[[idx / w, idx % w]]
    });
    SampleSet::from_values(values)
}

/// Estimate the quantile of `value` within `frame` from a fresh sample.
pub fn estimate_quantile(frame: &Frame, value: f64, sample_size: usize) -> Result<u32> {
    let samples = sample(frame, sample_size)?;
    Ok(samples.quantile_of(value))
}
