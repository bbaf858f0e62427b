use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use intensify_core::consts::{DEFAULT_MAX_TISSUE_INTENSITY, DEFAULT_SAMPLE_SIZE};
use intensify_core::io::image_io::{load_image, save_image};
use intensify_core::pipeline::config::BackgroundConfig;
use intensify_core::pipeline::estimate_and_suppress_background;

#[derive(Args)]
pub struct BackgroundArgs {
    /// Input image (8/16-bit grayscale TIFF or PNG)
    pub file: PathBuf,

    /// Maximum tissue intensity; brighter pixels are replaced by the median
    #[arg(long, default_value_t = DEFAULT_MAX_TISSUE_INTENSITY)]
    pub ceiling: f64,

    /// Pixels sampled for the quantile estimate
    #[arg(long, default_value_t = DEFAULT_SAMPLE_SIZE)]
    pub sample_size: usize,

    /// Output file path
    #[arg(short, long, default_value = "background.tiff")]
    pub output: PathBuf,
}

pub fn run(args: &BackgroundArgs) -> Result<()> {
    let frame = load_image(&args.file)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    println!(
        "Loaded {}x{} {} image",
        frame.width(),
        frame.height(),
        frame.bit_depth
    );

    let config = BackgroundConfig {
        max_tissue_intensity: args.ceiling,
        sample_size: args.sample_size,
    };
    let extraction = estimate_and_suppress_background(&frame, &config)?;

    println!(
        "Ceiling {} sits at quantile {:.2}%",
        args.ceiling,
        extraction.quantile as f64 / 100.0
    );
    println!("Threshold:   {}", extraction.threshold);
    println!("Median:      {}", extraction.median);
    println!(
        "Replaced:    {} of {} pixels",
        extraction.replaced,
        frame.len()
    );

    save_image(&extraction.frame, &args.output)?;
    println!("Background saved to {}", args.output.display());
    Ok(())
}
