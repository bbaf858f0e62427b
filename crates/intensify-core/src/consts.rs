/// Minimum pixel count (h*w) to use row-level Rayon parallelism.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Default number of pixels drawn for quantile estimation.
pub const DEFAULT_SAMPLE_SIZE: usize = 10_000;

/// Quantiles are expressed in ten-thousandths of the sampled population.
pub const QUANTILE_SCALE: u32 = 10_000;

/// Default intensity ceiling separating background from tissue signal.
pub const DEFAULT_MAX_TISSUE_INTENSITY: f64 = 255.0;

/// Default smoothing window edge length (pixels, odd).
pub const DEFAULT_WINDOW_SIZE: usize = 15;

/// Smallest usable smoothing window.
pub const MIN_WINDOW_SIZE: usize = 3;

/// Fraction of the intensity range added before filtering to keep values
/// strictly positive.
pub const NORMALIZATION_OFFSET_FRACTION: f64 = 0.001;

/// Offset used instead of `NORMALIZATION_OFFSET_FRACTION` when the image is flat.
pub const FLAT_IMAGE_OFFSET: f64 = 1e-6;

/// Circular Gaussian kernels use sigma = window_size / this divisor.
pub const GAUSSIAN_SIGMA_DIVISOR: f64 = 3.0;

/// Directory (under the output root) holding signal-suppressed backgrounds.
pub const BACKGROUND_DIR_NAME: &str = "noise_images";

/// Directory (under the output root) holding smoothed backgrounds.
pub const SMOOTHED_DIR_NAME: &str = "norm_noise";
