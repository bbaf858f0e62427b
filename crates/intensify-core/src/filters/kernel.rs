use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

use crate::consts::{GAUSSIAN_SIGMA_DIVISOR, MIN_WINDOW_SIZE};
use crate::error::{IntensifyError, Result};

/// Number of terms in the 2D quadratic surface `1, x, y, x², xy, y²`.
const QUADRATIC_TERMS: usize = 6;

/// How the smoothing kernel weights are generated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KernelStrategy {
    /// Savitzky-Golay: least-squares quadratic surface fitted to a centre impulse.
    #[default]
    LeastSquaresQuadratic,
    /// Gaussian weights inside a disc of radius `window_size / 2`.
    CircularGaussian,
}

impl std::fmt::Display for KernelStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LeastSquaresQuadratic => write!(f, "Least-squares quadratic"),
            Self::CircularGaussian => write!(f, "Circular Gaussian"),
        }
    }
}

/// Reject even windows and windows smaller than `MIN_WINDOW_SIZE`.
pub fn validate_window_size(window_size: usize) -> Result<()> {
    if window_size < MIN_WINDOW_SIZE || window_size % 2 == 0 {
        return Err(IntensifyError::InvalidParameter(format!(
            "window size must be odd and >= {MIN_WINDOW_SIZE}, got {window_size}"
        )));
    }
    Ok(())
}

/// Square, odd-sized 2D convolution kernel whose weights sum to 1.
#[derive(Clone, Debug)]
pub struct Kernel {
    weights: Array2<f64>,
}

impl Kernel {
    pub fn generate(strategy: KernelStrategy, window_size: usize) -> Result<Self> {
        match strategy {
            KernelStrategy::LeastSquaresQuadratic => Self::least_squares_quadratic(window_size),
            KernelStrategy::CircularGaussian => Self::circular_gaussian(window_size),
        }
    }

    /// 2nd-order Savitzky-Golay kernel.
    ///
    /// Solves the normal equations `(AᵀA)c = Aᵀb` where `A` holds the quadratic
    /// terms of every window offset and `b` is a unit impulse at the centre.
    /// The weight at each offset is the fitted surface evaluated there. Because
    /// the constant term is in the basis, the weights sum to 1.
    pub fn least_squares_quadratic(window_size: usize) -> Result<Self> {
        validate_window_size(window_size)?;
        let half = (window_size / 2) as isize;

        let mut ata = Array2::<f64>::zeros((QUADRATIC_TERMS, QUADRATIC_TERMS));
        for y in -half..=half {
            for x in -half..=half {
                let terms = quadratic_terms(x as f64, y as f64);
                for i in 0..QUADRATIC_TERMS {
                    for j in 0..QUADRATIC_TERMS {
                        ata[[i, j]] += terms[i] * terms[j];
                    }
                }
            }
        }
        // Only the centre row of A meets the impulse.
        let atb = Array1::from(quadratic_terms(0.0, 0.0).to_vec());

        let coeffs = solve_linear_system(ata, atb).ok_or_else(|| {
            IntensifyError::InvalidParameter(format!(
                "singular normal equations for window size {window_size}"
            ))
        })?;

        let weights = Array2::from_shape_fn((window_size, window_size), |(row, col)| {
            let x = col as f64 - half as f64;
            let y = row as f64 - half as f64;
            quadratic_terms(x, y)
                .iter()
                .zip(coeffs.iter())
                .map(|(t, c)| t * c)
                .sum::<f64>()
        });

        Ok(Self { weights })
    }

    /// Gaussian-weighted disc, sigma = `window_size / 3`, normalized to sum 1.
    pub fn circular_gaussian(window_size: usize) -> Result<Self> {
        validate_window_size(window_size)?;
        let half = (window_size / 2) as f64;
        let radius = window_size as f64 / 2.0;
        let sigma = window_size as f64 / GAUSSIAN_SIGMA_DIVISOR;
        let s2 = 2.0 * sigma * sigma;

        let mut weights = Array2::from_shape_fn((window_size, window_size), |(row, col)| {
            let dx = col as f64 - half;
            let dy = row as f64 - half;
            let d2 = dx * dx + dy * dy;
            if d2 <= radius * radius {
                (-d2 / s2).exp()
            } else {
                0.0
            }
        });

        let sum = weights.sum();
        weights.mapv_inplace(|w| w / sum);
        Ok(Self { weights })
    }

    /// Edge length of the kernel.
    pub fn size(&self) -> usize {
        self.weights.nrows()
    }

    pub fn half_window(&self) -> usize {
        self.size() / 2
    }

    pub fn weights(&self) -> &Array2<f64> {
        &self.weights
    }

    pub fn sum(&self) -> f64 {
        self.weights.sum()
    }
}

fn quadratic_terms(x: f64, y: f64) -> [f64; QUADRATIC_TERMS] {
    [1.0, x, y, x * x, x * y, y * y]
}

/// Gaussian elimination with partial pivoting. Returns `None` for a singular system.
fn solve_linear_system(mut a: Array2<f64>, mut b: Array1<f64>) -> Option<Array1<f64>> {
    let n = b.len();

    for col in 0..n {
        let pivot = (col..n).max_by(|&i, &j| a[[i, col]].abs().total_cmp(&a[[j, col]].abs()))?;
        if a[[pivot, col]].abs() < 1e-12 {
            return None;
        }
        if pivot != col {
            for k in 0..n {
                a.swap([col, k], [pivot, k]);
            }
            b.swap(col, pivot);
        }

        for row in col + 1..n {
            let factor = a[[row, col]] / a[[col, col]];
            for k in col..n {
                a[[row, k]] -= factor * a[[col, k]];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut x = Array1::<f64>::zeros(n);
    for row in (0..n).rev() {
        let tail: f64 = (row + 1..n).map(|k| a[[row, k]] * x[k]).sum();
        x[row] = (b[row] - tail) / a[[row, row]];
    }
    Some(x)
}

/// Kernels keyed by strategy and window size.
///
/// Owned by whoever drives a batch and shared by reference across worker
/// threads. Entries are immutable and never invalidated.
#[derive(Debug, Default)]
pub struct KernelCache {
    kernels: RwLock<HashMap<(KernelStrategy, usize), Arc<Kernel>>>,
}

impl KernelCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached kernel, generating and storing it on first use.
    pub fn get(&self, strategy: KernelStrategy, window_size: usize) -> Result<Arc<Kernel>> {
        let key = (strategy, window_size);
        if let Some(kernel) = self
            .kernels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Ok(Arc::clone(kernel));
        }

        let kernel = Arc::new(Kernel::generate(strategy, window_size)?);
        let mut kernels = self
            .kernels
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(kernels.entry(key).or_insert(kernel)))
    }

    pub fn len(&self) -> usize {
        self.kernels
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
