use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use intensify_core::pipeline::config::FlattenConfig;
use intensify_core::pipeline::run_batch_with_progress;
use tracing::info;

use super::{DepthArg, KernelArg, NormalizationArg};
use crate::progress::BarReporter;
use crate::summary::{print_batch_report, print_batch_summary};

#[derive(Args)]
pub struct RunArgs {
    /// Directory holding the TIFF stack
    pub dir: PathBuf,

    /// Batch config file (TOML); flags below override its values
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output directory [default: <dir>/flattened]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum tissue intensity; brighter pixels are treated as signal
    #[arg(long)]
    pub ceiling: Option<f64>,

    /// Smoothing window size (odd, >= 3)
    #[arg(long)]
    pub window: Option<usize>,

    /// Smoothing kernel
    #[arg(long, value_enum)]
    pub kernel: Option<KernelArg>,

    /// Background rescaling before division
    #[arg(long, value_enum)]
    pub normalization: Option<NormalizationArg>,

    /// Bit depth of corrected images
    #[arg(long, value_enum)]
    pub depth: Option<DepthArg>,

    /// Worker threads (0 = one per core)
    #[arg(long)]
    pub threads: Option<usize>,

    /// Do not keep smoothed backgrounds
    #[arg(long)]
    pub no_intermediates: bool,

    /// Pair with backgrounds already in <output>/noise_images
    #[arg(long)]
    pub reuse_backgrounds: bool,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = build_config(args)?;
    print_batch_summary(&config);

    let reporter = Arc::new(BarReporter::new()?);
    let report = run_batch_with_progress(&config, reporter.clone())
        .with_context(|| format!("Batch failed for {}", config.input.display()))?;
    reporter.finish();

    print_batch_report(&report, &config.output);
    Ok(())
}

fn build_config(args: &RunArgs) -> Result<FlattenConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        let mut config: FlattenConfig =
            toml::from_str(&contents).context("Invalid batch config")?;
        config.input = args.dir.clone();
        info!(config = %config_path.display(), "Loaded batch config");
        config
    } else {
        FlattenConfig::new(args.dir.clone(), args.dir.join("flattened"))
    };

    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    if let Some(ceiling) = args.ceiling {
        config.background.max_tissue_intensity = ceiling;
    }
    if let Some(window) = args.window {
        config.smoothing.window_size = window;
    }
    if let Some(kernel) = args.kernel {
        config.smoothing.kernel = kernel.into();
    }
    if let Some(normalization) = args.normalization {
        config.normalization.policy = normalization.into();
    }
    if let Some(depth) = args.depth {
        config.normalization.output_depth = depth.into();
    }
    if let Some(threads) = args.threads {
        config.threads = threads;
    }
    if args.no_intermediates {
        config.save_intermediates = false;
    }
    if args.reuse_backgrounds {
        config.reuse_backgrounds = true;
    }

    config.validate()?;
    Ok(config)
}
