use rand::Rng;
use tracing::debug;

use crate::error::{IntensifyError, Result};
use crate::frame::Frame;
use crate::quantile::sample_with_rng;
use crate::stats;

/// A signal-suppressed frame plus the values used to build it.
#[derive(Clone, Debug)]
pub struct BackgroundExtraction {
    /// Input with every pixel above `threshold` replaced by `median`.
    pub frame: Frame,
    /// Sampled quantile of the ceiling intensity, in ten-thousandths.
    pub quantile: u32,
    /// Intensity threshold recovered from `quantile` in the same sample.
    pub threshold: f32,
    /// Exact median of the input, used as the replacement value.
    pub median: f32,
    /// Number of pixels that were replaced.
    pub replaced: usize,
}

/// Suppress tissue signal brighter than `ceiling`, leaving only background variation.
pub fn extract_background(
    frame: &Frame,
    ceiling: f64,
    sample_size: usize,
) -> Result<BackgroundExtraction> {
    extract_background_with_rng(frame, ceiling, sample_size, &mut rand::rng())
}

/// Same as [`extract_background`] with an explicit random source for sampling.
///
/// The ceiling is ranked against a fresh sample and the rank is mapped back
/// to an intensity in that same sample, so classification agrees with the
/// reported quantile. The threshold never reaches the ceiling: it is at most
/// the largest sampled intensity below it.
pub fn extract_background_with_rng<R: Rng + ?Sized>(
    frame: &Frame,
    ceiling: f64,
    sample_size: usize,
    rng: &mut R,
) -> Result<BackgroundExtraction> {
    if !ceiling.is_finite() {
        return Err(IntensifyError::InvalidParameter(format!(
            "ceiling intensity must be finite, got {ceiling}"
        )));
    }

    let samples = sample_with_rng(frame, sample_size, rng)?;
    let quantile = samples.quantile_of(ceiling);
    let threshold = samples.threshold_for(ceiling) as f32;
    let median = stats::median(frame).ok_or(IntensifyError::EmptySample)?;

    let replaced = frame.data.iter().filter(|&&v| v > threshold).count();
    let data = frame
        .data
        .mapv(|v| if v > threshold { median } else { v });

    debug!(
        ceiling,
        quantile,
        threshold,
        median,
        replaced,
        samples = samples.len(),
        "Background extracted"
    );

    Ok(BackgroundExtraction {
        frame: Frame::new(data, frame.bit_depth),
        quantile,
        threshold,
        median,
        replaced,
    })
}
