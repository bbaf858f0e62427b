use ndarray::{s, Array2, Axis};
use rayon::prelude::*;

use crate::consts::{FLAT_IMAGE_OFFSET, NORMALIZATION_OFFSET_FRACTION, PARALLEL_PIXEL_THRESHOLD};
use crate::error::{IntensifyError, Result};
use crate::frame::Frame;

use super::kernel::{Kernel, KernelStrategy};
use super::padding::mirror_pad;

/// Smooth a frame with a freshly generated `window_size` kernel.
///
/// Fails with `InvalidParameter` for even windows or windows below 3.
pub fn smooth(frame: &Frame, window_size: usize, strategy: KernelStrategy) -> Result<Frame> {
    let kernel = Kernel::generate(strategy, window_size)?;
    smooth_with_kernel(frame, &kernel)
}

/// Smooth a frame with an existing kernel.
///
/// Pixels are first mapped to roughly (0, 1] with
/// `(v - min + offset) / (max - min + offset)` where `offset` is 0.1% of the
/// range (or `FLAT_IMAGE_OFFSET` for a flat frame), so no value sits at zero
/// under the negative lobes of a least-squares kernel. The inverse mapping is
/// applied after convolution, then values are clamped and rounded to the
/// frame's bit depth.
pub fn smooth_with_kernel(frame: &Frame, kernel: &Kernel) -> Result<Frame> {
    let (min, max) = frame.min_max().ok_or(IntensifyError::EmptySample)?;
    let (min, max) = (min as f64, max as f64);
    let range = max - min;
    let offset = if range > 0.0 {
        range * NORMALIZATION_OFFSET_FRACTION
    } else {
        FLAT_IMAGE_OFFSET
    };
    let scale = range + offset;

    let normalized = frame.data.mapv(|v| (v as f64 - min + offset) / scale);
    let padded = mirror_pad(&normalized, kernel.half_window());
    let filtered = convolve_padded(&padded, kernel, frame.data.dim());

    let depth = frame.bit_depth;
    let data = filtered.mapv(|v| depth.quantize(v * scale + min - offset));
    Ok(Frame::new(data, depth))
}

/// Convolve every interior pixel of a padded buffer, producing an `out_dim` result.
///
/// `padded` must be `out_dim` grown by the kernel's half window on each side.
pub fn convolve_padded(
    padded: &Array2<f64>,
    kernel: &Kernel,
    out_dim: (usize, usize),
) -> Array2<f64> {
    let (h, w) = out_dim;
    let weights = kernel.weights();
    let k = kernel.size();

    let at = |row: usize, col: usize| -> f64 {
        padded
            .slice(s![row..row + k, col..col + k])
            .iter()
            .zip(weights.iter())
            .map(|(p, wt)| p * wt)
            .sum()
    };

    if h * w >= PARALLEL_PIXEL_THRESHOLD {
        let mut result = Array2::<f64>::zeros((h, w));
        result
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(row, mut line)| {
                for (col, out) in line.iter_mut().enumerate() {
                    *out = at(row, col);
                }
            });
        result
    } else {
        Array2::from_shape_fn((h, w), |(row, col)| at(row, col))
    }
}
