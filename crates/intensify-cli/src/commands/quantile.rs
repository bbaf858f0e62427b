use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use intensify_core::consts::{DEFAULT_SAMPLE_SIZE, QUANTILE_SCALE};
use intensify_core::io::image_io::load_image;
use intensify_core::quantile::sample;
use intensify_core::stats::frame_stats;

#[derive(Args)]
pub struct QuantileArgs {
    /// Input image
    pub file: PathBuf,

    /// Intensity to rank
    #[arg(long)]
    pub intensity: f64,

    /// Pixels sampled for the estimate
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,
}

pub fn run(args: &QuantileArgs) -> Result<()> {
    let frame = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let samples = sample(&frame, args.sample_size)?;
    let quantile = samples.quantile_of(args.intensity);

    println!("File:        {}", args.file.display());
    println!("Dimensions:  {}x{}", frame.width(), frame.height());
    println!("Bit depth:   {}", frame.bit_depth);
    if let Some(stats) = frame_stats(&frame) {
        println!("Intensity:   {stats}");
    }
    println!("Samples:     {}", samples.len());
    println!(
        "Quantile:    {}/{} ({:.2}% of pixels below {})",
        quantile,
        QUANTILE_SCALE,
        quantile as f64 / 100.0,
        args.intensity
    );
    println!("Threshold:   {}", samples.threshold_for(args.intensity));
    Ok(())
}
