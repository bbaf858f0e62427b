use ndarray::Array2;
use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};

use crate::error::{IntensifyError, Result};

/// A single grayscale image.
/// Pixel values are f32 in the native intensity unit of `bit_depth`
/// (e.g. 0..=65535 for 16-bit), not rescaled to [0.0, 1.0].
#[derive(Clone, Debug)]
pub struct Frame {
    /// Pixel data, row-major, shape = (height, width)
    pub data: Array2<f32>,
    /// Storage depth; defines the largest representable value.
    pub bit_depth: BitDepth,
}

impl Frame {
    pub fn new(data: Array2<f32>, bit_depth: BitDepth) -> Self {
        Self { data, bit_depth }
    }

    /// Build a frame from a row-major buffer of raw samples.
    pub fn from_samples<T: Sample>(width: usize, height: usize, samples: &[T]) -> Result<Self> {
        if samples.len() != width * height {
            return Err(IntensifyError::InvalidDimensions { width, height });
        }
        let pixels: Vec<f32> = samples.iter().map(|s| s.intensity()).collect();
        let data = Array2::from_shape_vec((height, width), pixels)
            .map_err(|_| IntensifyError::InvalidDimensions { width, height })?;
        Ok(Self::new(data, T::BIT_DEPTH))
    }

    pub fn width(&self) -> usize {
        self.data.ncols()
    }

    pub fn height(&self) -> usize {
        self.data.nrows()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Smallest and largest pixel value, or `None` for an empty frame.
    pub fn min_max(&self) -> Option<(f32, f32)> {
        if self.data.is_empty() {
            return None;
        }
        let (lo, hi) = self
            .data
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        Some((lo, hi))
    }

    /// Re-quantize every pixel into `depth` (clamped, rounded for integer depths).
    pub fn converted(&self, depth: BitDepth) -> Frame {
        let data = self.data.mapv(|v| depth.quantize(v as f64));
        Frame::new(data, depth)
    }
}

/// Pixel storage depth.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitDepth {
    Eight,
    #[default]
    Sixteen,
    ThirtyTwo,
    Float,
}

impl BitDepth {
    /// Largest value a pixel of this depth can hold.
    pub fn max_value(self) -> f64 {
        match self {
            Self::Eight => u8::MAX as f64,
            Self::Sixteen => u16::MAX as f64,
            Self::ThirtyTwo => u32::MAX as f64,
            Self::Float => f32::MAX as f64,
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, Self::Float)
    }

    pub fn bits(self) -> u8 {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::ThirtyTwo | Self::Float => 32,
        }
    }

    /// Clamp to `[0, max_value]`, rounding to the nearest integer for integer depths.
    pub fn quantize(self, value: f64) -> f32 {
        let clamped = if value.is_nan() {
            0.0
        } else {
            value.clamp(0.0, self.max_value())
        };
        if self.is_integer() {
            clamped.round() as f32
        } else {
            clamped as f32
        }
    }
}

impl std::fmt::Display for BitDepth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Eight => write!(f, "8-bit"),
            Self::Sixteen => write!(f, "16-bit"),
            Self::ThirtyTwo => write!(f, "32-bit"),
            Self::Float => write!(f, "32-bit float"),
        }
    }
}

/// A raw pixel sample type accepted by the pipeline.
///
/// Signed 8/16-bit storage is read with unsigned semantics: the bit pattern is
/// reinterpreted, so `-1i16` reads as 65535.
pub trait Sample: Copy + Send + Sync + 'static {
    const BIT_DEPTH: BitDepth;

    fn intensity(self) -> f32;
}

impl Sample for u8 {
    const BIT_DEPTH: BitDepth = BitDepth::Eight;

    fn intensity(self) -> f32 {
        self.as_()
    }
}

impl Sample for i8 {
    const BIT_DEPTH: BitDepth = BitDepth::Eight;

    fn intensity(self) -> f32 {
        (self as u8).as_()
    }
}

impl Sample for u16 {
    const BIT_DEPTH: BitDepth = BitDepth::Sixteen;

    fn intensity(self) -> f32 {
        self.as_()
    }
}

impl Sample for i16 {
    const BIT_DEPTH: BitDepth = BitDepth::Sixteen;

    fn intensity(self) -> f32 {
        (self as u16).as_()
    }
}

impl Sample for u32 {
    const BIT_DEPTH: BitDepth = BitDepth::ThirtyTwo;

    fn intensity(self) -> f32 {
        self.as_()
    }
}

impl Sample for f32 {
    const BIT_DEPTH: BitDepth = BitDepth::Float;

    fn intensity(self) -> f32 {
        self
    }
}
