use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MAX_TISSUE_INTENSITY, DEFAULT_SAMPLE_SIZE, DEFAULT_WINDOW_SIZE};
use crate::error::{IntensifyError, Result};
use crate::filters::kernel::{validate_window_size, KernelStrategy};
use crate::filters::normalize::NormalizationPolicy;
use crate::frame::BitDepth;

/// Full configuration of a directory batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlattenConfig {
    /// Directory holding the TIFF stack.
    pub input: PathBuf,
    /// Output root; corrected images land here, intermediates in subdirectories.
    pub output: PathBuf,
    /// Worker threads; 0 lets rayon decide.
    #[serde(default)]
    pub threads: usize,
    /// Write smoothed backgrounds alongside the corrected images.
    #[serde(default = "default_true")]
    pub save_intermediates: bool,
    /// Skip background extraction and pair with backgrounds already on disk.
    #[serde(default)]
    pub reuse_backgrounds: bool,
    #[serde(default)]
    pub background: BackgroundConfig,
    #[serde(default)]
    pub smoothing: SmoothingConfig,
    #[serde(default)]
    pub normalization: NormalizationConfig,
}

fn default_true() -> bool {
    true
}

impl FlattenConfig {
    pub fn new(input: PathBuf, output: PathBuf) -> Self {
        Self {
            input,
            output,
            threads: 0,
            save_intermediates: true,
            reuse_backgrounds: false,
            background: BackgroundConfig::default(),
            smoothing: SmoothingConfig::default(),
            normalization: NormalizationConfig::default(),
        }
    }

    /// Reject parameter combinations the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        self.background.validate()?;
        self.smoothing.validate()?;
        self.normalization.validate()?;
        if self.input == self.output {
            return Err(IntensifyError::InvalidParameter(
                "output directory must differ from the input directory".into(),
            ));
        }
        Ok(())
    }
}

/// Signal-suppression parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackgroundConfig {
    /// Ceiling intensity: brighter pixels are treated as tissue signal.
    #[serde(default = "default_max_tissue_intensity")]
    pub max_tissue_intensity: f64,
    /// Pixels drawn for quantile estimation.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,
}

fn default_max_tissue_intensity() -> f64 {
    DEFAULT_MAX_TISSUE_INTENSITY
}
fn default_sample_size() -> usize {
    DEFAULT_SAMPLE_SIZE
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            max_tissue_intensity: DEFAULT_MAX_TISSUE_INTENSITY,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

impl BackgroundConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.max_tissue_intensity.is_finite() || self.max_tissue_intensity < 0.0 {
            return Err(IntensifyError::InvalidParameter(format!(
                "max tissue intensity must be a non-negative number, got {}",
                self.max_tissue_intensity
            )));
        }
        if self.sample_size == 0 {
            return Err(IntensifyError::InvalidParameter(
                "sample size must be positive".into(),
            ));
        }
        Ok(())
    }
}

/// Background smoothing parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Odd kernel edge length, at least 3.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    #[serde(default)]
    pub kernel: KernelStrategy,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            kernel: KernelStrategy::default(),
        }
    }
}

impl SmoothingConfig {
    pub fn validate(&self) -> Result<()> {
        validate_window_size(self.window_size)
    }
}

/// Flat-field division parameters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NormalizationConfig {
    #[serde(default)]
    pub policy: NormalizationPolicy,
    /// Depth of the corrected images.
    #[serde(default)]
    pub output_depth: BitDepth,
}

impl NormalizationConfig {
    pub fn validate(&self) -> Result<()> {
        if !self.output_depth.is_integer() {
            return Err(IntensifyError::InvalidParameter(format!(
                "output depth must be an integer format, got {}",
                self.output_depth
            )));
        }
        Ok(())
    }
}
