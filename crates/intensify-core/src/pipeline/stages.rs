use tracing::{debug, Level};

use crate::background::{extract_background, BackgroundExtraction};
use crate::error::{IntensifyError, Result};
use crate::filters::kernel::KernelCache;
use crate::filters::normalize::normalize;
use crate::filters::smooth::smooth_with_kernel;
use crate::frame::Frame;
use crate::stats::frame_stats;

use super::config::{BackgroundConfig, NormalizationConfig, SmoothingConfig};
use super::types::FlattenOutput;

/// Replace tissue signal above the configured ceiling with the image median.
pub fn estimate_and_suppress_background(
    frame: &Frame,
    config: &BackgroundConfig,
) -> Result<BackgroundExtraction> {
    config.validate()?;
    log_stats("input", frame);
    let extraction = extract_background(frame, config.max_tissue_intensity, config.sample_size)?;
    log_stats("background", &extraction.frame);
    Ok(extraction)
}

/// Smooth `background` and divide `original` by it.
pub fn smooth_and_normalize(
    original: &Frame,
    background: &Frame,
    smoothing: &SmoothingConfig,
    normalization: &NormalizationConfig,
    cache: &KernelCache,
) -> Result<FlattenOutput> {
    if original.data.dim() != background.data.dim() {
        return Err(IntensifyError::DimensionMismatch {
            expected: original.data.dim(),
            actual: background.data.dim(),
        });
    }
    normalization.validate()?;

    let kernel = cache.get(smoothing.kernel, smoothing.window_size)?;
    let smoothed = smooth_with_kernel(background, &kernel)?;
    log_stats("smoothed", &smoothed);

    let corrected = normalize(
        original,
        &smoothed,
        normalization.policy,
        normalization.output_depth,
    )?;
    log_stats("corrected", &corrected);

    Ok(FlattenOutput {
        smoothed,
        corrected,
    })
}

/// Run every stage on one in-memory frame.
pub fn flatten_frame(
    frame: &Frame,
    background: &BackgroundConfig,
    smoothing: &SmoothingConfig,
    normalization: &NormalizationConfig,
    cache: &KernelCache,
) -> Result<(BackgroundExtraction, FlattenOutput)> {
    let extraction = estimate_and_suppress_background(frame, background)?;
    let output = smooth_and_normalize(frame, &extraction.frame, smoothing, normalization, cache)?;
    Ok((extraction, output))
}

fn log_stats(stage: &str, frame: &Frame) {
    if !tracing::enabled!(Level::DEBUG) {
        return;
    }
    if let Some(stats) = frame_stats(frame) {
        debug!(
            stage,
            min = stats.min,
            median = stats.median,
            max = stats.max,
            "Frame statistics"
        );
    }
}
