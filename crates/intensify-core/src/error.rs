use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntensifyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Image dimensions differ: {expected:?} vs {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Unsupported pixel sample type: {0}")]
    UnsupportedSampleType(String),

    #[error("No valid pixels to sample")]
    EmptySample,

    #[error("Missing background image for {}", .0.display())]
    MissingPairedArtifact(PathBuf),

    #[error("No images found in {}", .0.display())]
    EmptySequence(PathBuf),
}

pub type Result<T> = std::result::Result<T, IntensifyError>;
