use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use intensify_core::consts::{DEFAULT_MAX_TISSUE_INTENSITY, DEFAULT_WINDOW_SIZE};
use intensify_core::filters::kernel::KernelCache;
use intensify_core::io::image_io::{load_image, save_image};
use intensify_core::pipeline::config::{BackgroundConfig, NormalizationConfig, SmoothingConfig};
use intensify_core::pipeline::flatten_frame;
use intensify_core::stats::frame_stats;

use super::{DepthArg, KernelArg, NormalizationArg};

#[derive(Args)]
pub struct FlattenArgs {
    /// Input image (8/16-bit grayscale TIFF or PNG)
    pub file: PathBuf,

    /// Maximum tissue intensity; brighter pixels are treated as signal
    #[arg(long, default_value_t = DEFAULT_MAX_TISSUE_INTENSITY)]
    pub ceiling: f64,

    /// Smoothing window size (odd, >= 3)
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window: usize,

    /// Smoothing kernel
    #[arg(long, value_enum, default_value = "least-squares")]
    pub kernel: KernelArg,

    /// Background rescaling before division
    #[arg(long, value_enum, default_value = "max")]
    pub normalization: NormalizationArg,

    /// Bit depth of the corrected image
    #[arg(long, value_enum, default_value = "16")]
    pub depth: DepthArg,

    /// Also write the smoothed background here
    #[arg(long)]
    pub background: Option<PathBuf>,

    /// Output file path
    #[arg(short, long, default_value = "flattened.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &FlattenArgs) -> Result<()> {
    let frame = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;

    let background = BackgroundConfig {
        max_tissue_intensity: args.ceiling,
        ..Default::default()
    };
    let smoothing = SmoothingConfig {
        window_size: args.window,
        kernel: args.kernel.into(),
    };
    let normalization = NormalizationConfig {
        policy: args.normalization.into(),
        output_depth: args.depth.into(),
    };

    println!(
        "Flattening {} (window {}, {})",
        args.file.display(),
        smoothing.window_size,
        smoothing.kernel
    );
    let (extraction, output) = flatten_frame(
        &frame,
        &background,
        &smoothing,
        &normalization,
        &KernelCache::new(),
    )?;
    println!(
        "Suppressed {} pixels above {}",
        extraction.replaced, extraction.threshold
    );

    if let Some(stats) = frame_stats(&output.corrected) {
        println!("Corrected:   {stats}");
    }

    if let Some(ref path) = args.background {
        save_image(&output.smoothed, path)?;
        println!("Smoothed background saved to {}", path.display());
    }
    save_image(&output.corrected, &args.output)?;
    println!("Output saved to {}", args.output.display());
    Ok(())
}
