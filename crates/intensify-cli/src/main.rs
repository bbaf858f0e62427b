mod commands;
mod progress;
mod summary;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "intensify",
    about = "Flat-field background correction for fluorescence image stacks"
)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correct every TIFF in a directory
    Run(commands::run::RunArgs),
    /// Extract the signal-suppressed background of one image
    Background(commands::background::BackgroundArgs),
    /// Flat-field correct a single image
    Flatten(commands::flatten::FlattenArgs),
    /// Estimate the quantile of an intensity within an image
    Quantile(commands::quantile::QuantileArgs),
    /// Print or save the default batch config as TOML
    Config(commands::config::ConfigArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match &cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Background(args) => commands::background::run(args),
        Commands::Flatten(args) => commands::flatten::run(args),
        Commands::Quantile(args) => commands::quantile::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
