pub mod background;
pub mod config;
pub mod flatten;
pub mod quantile;
pub mod run;

use clap::ValueEnum;
use intensify_core::filters::kernel::KernelStrategy;
use intensify_core::filters::normalize::NormalizationPolicy;
use intensify_core::frame::BitDepth;

#[derive(Clone, Copy, ValueEnum)]
pub enum KernelArg {
    LeastSquares,
    Gaussian,
}

impl From<KernelArg> for KernelStrategy {
    fn from(arg: KernelArg) -> Self {
        match arg {
            KernelArg::LeastSquares => KernelStrategy::LeastSquaresQuadratic,
            KernelArg::Gaussian => KernelStrategy::CircularGaussian,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum NormalizationArg {
    Max,
    MinMax,
}

impl From<NormalizationArg> for NormalizationPolicy {
    fn from(arg: NormalizationArg) -> Self {
        match arg {
            NormalizationArg::Max => NormalizationPolicy::DivideByMax,
            NormalizationArg::MinMax => NormalizationPolicy::MinMaxStretch,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum DepthArg {
    #[value(name = "8")]
    Eight,
    #[value(name = "16")]
    Sixteen,
}

impl From<DepthArg> for BitDepth {
    fn from(arg: DepthArg) -> Self {
        match arg {
            DepthArg::Eight => BitDepth::Eight,
            DepthArg::Sixteen => BitDepth::Sixteen,
        }
    }
}
