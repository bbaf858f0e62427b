use ndarray::Zip;
use serde::{Deserialize, Serialize};

use crate::error::{IntensifyError, Result};
use crate::frame::{BitDepth, Frame};

/// How the smoothed background is rescaled before dividing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum NormalizationPolicy {
    /// `value / max`: the brightest background pixel becomes 1.
    #[default]
    DivideByMax,
    /// `(value - min) / (max - min)`: full stretch to [0, 1].
    MinMaxStretch,
}

impl std::fmt::Display for NormalizationPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DivideByMax => write!(f, "Divide by max"),
            Self::MinMaxStretch => write!(f, "Min-max stretch"),
        }
    }
}

/// Flat-field correct `original` by dividing it by the rescaled `background`.
///
/// Where the rescaled background is not positive the original pixel is kept.
/// A flat background under `MinMaxStretch` has no range and is rescaled by
/// its maximum instead. The result is clamped and rounded into `output_depth`.
pub fn normalize(
    original: &Frame,
    background: &Frame,
    policy: NormalizationPolicy,
    output_depth: BitDepth,
) -> Result<Frame> {
    if original.data.dim() != background.data.dim() {
        return Err(IntensifyError::DimensionMismatch {
            expected: original.data.dim(),
            actual: background.data.dim(),
        });
    }
    let (min, max) = background.min_max().ok_or(IntensifyError::EmptySample)?;
    let (min, max) = (min as f64, max as f64);

    let rescale = |v: f64| -> f64 {
        match policy {
            NormalizationPolicy::MinMaxStretch if max > min => (v - min) / (max - min),
            _ if max > 0.0 => v / max,
            _ => 0.0,
        }
    };

    let data = Zip::from(&original.data)
        .and(&background.data)
        .map_collect(|&orig, &bg| {
            let orig = orig as f64;
            let bg = rescale(bg as f64);
            let corrected = if bg > 0.0 { orig / bg } else { orig };
            output_depth.quantize(corrected)
        });

    Ok(Frame::new(data, output_depth))
}
