use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::consts::{BACKGROUND_DIR_NAME, SMOOTHED_DIR_NAME};
use crate::error::{IntensifyError, Result};
use crate::filters::kernel::KernelCache;
use crate::io::discover::discover_images;
use crate::io::image_io::{load_image, save_image};

use super::config::FlattenConfig;
use super::stages::{estimate_and_suppress_background, smooth_and_normalize};
use super::types::{BatchReport, NoOpReporter, PipelineStage, ProgressReporter, SkippedImage};

enum Outcome {
    Done,
    Skipped(String),
    Cancelled,
}

/// Flatten every TIFF in `config.input`, writing results under `config.output`.
pub fn run_batch(config: &FlattenConfig) -> Result<BatchReport> {
    run_batch_with_progress(config, Arc::new(NoOpReporter))
}

/// Like [`run_batch`], reporting progress to `reporter`. The batch runs to
/// completion.
pub fn run_batch_with_progress(
    config: &FlattenConfig,
    reporter: Arc<dyn ProgressReporter>,
) -> Result<BatchReport> {
    let cache = KernelCache::new();
    let cancel = AtomicBool::new(false);
    run_batch_reported(config, &cache, reporter, &cancel)
}

/// Run the two-phase batch with progress reporting and cancellation.
///
/// Phase one writes a signal-suppressed background for each image into
/// `noise_images/`. Phase two pairs each original with its background by file
/// name, smooths the background (kept in `norm_noise/` when intermediates are
/// saved) and writes the corrected image to the output root. Images are
/// processed in parallel; `cancel` is checked before each image starts.
/// Per-image failures are logged and reported as skipped, they do not abort
/// the batch.
pub fn run_batch_reported(
    config: &FlattenConfig,
    cache: &KernelCache,
    reporter: Arc<dyn ProgressReporter>,
    cancel: &AtomicBool,
) -> Result<BatchReport> {
    config.validate()?;

    reporter.begin_stage(PipelineStage::Discovering, None);
    let images = discover_images(&config.input)?;
    reporter.finish_stage();
    if images.is_empty() {
        return Err(IntensifyError::EmptySequence(config.input.clone()));
    }
    info!(
        images = images.len(),
        input = %config.input.display(),
        "Discovered image stack"
    );

    let background_dir = config.output.join(BACKGROUND_DIR_NAME);
    let smoothed_dir = config.output.join(SMOOTHED_DIR_NAME);
    std::fs::create_dir_all(&background_dir)?;
    if config.save_intermediates {
        std::fs::create_dir_all(&smoothed_dir)?;
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .build()
        .map_err(|e| IntensifyError::InvalidParameter(format!("thread pool: {e}")))?;

    let mut report = BatchReport {
        discovered: images.len(),
        ..Default::default()
    };

    let mut pending = images;
    if config.reuse_backgrounds {
        info!(dir = %background_dir.display(), "Reusing existing backgrounds");
    } else {
        reporter.begin_stage(PipelineStage::ExtractingBackground, Some(pending.len()));
        let outcomes = pool.install(|| {
            run_stage(&pending, cancel, &reporter, |path| {
                extract_one(path, &background_dir, config)
            })
        });
        reporter.finish_stage();
        pending = absorb(
            &mut report,
            pending,
            outcomes,
            PipelineStage::ExtractingBackground,
        );
        info!(
            extracted = pending.len(),
            skipped = report.skipped.len(),
            "Background extraction complete"
        );
    }

    if !report.cancelled {
        reporter.begin_stage(PipelineStage::Flattening, Some(pending.len()));
        let outcomes = pool.install(|| {
            run_stage(&pending, cancel, &reporter, |path| {
                flatten_one(path, &background_dir, &smoothed_dir, config, cache)
            })
        });
        reporter.finish_stage();
        let done = absorb(&mut report, pending, outcomes, PipelineStage::Flattening);
        report.processed = done.len();
    }

    info!(
        processed = report.processed,
        skipped = report.skipped.len(),
        cancelled = report.cancelled,
        "Batch complete"
    );
    Ok(report)
}

fn run_stage<F>(
    images: &[PathBuf],
    cancel: &AtomicBool,
    reporter: &Arc<dyn ProgressReporter>,
    work: F,
) -> Vec<Outcome>
where
    F: Fn(&Path) -> Result<()> + Sync,
{
    let done = AtomicUsize::new(0);
    images
        .par_iter()
        .map(|path| {
            if cancel.load(Ordering::Relaxed) {
                return Outcome::Cancelled;
            }
            let outcome = match work(path) {
                Ok(()) => Outcome::Done,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping image");
                    Outcome::Skipped(e.to_string())
                }
            };
            reporter.advance(done.fetch_add(1, Ordering::Relaxed) + 1);
            outcome
        })
        .collect()
}

/// Fold stage outcomes into the report and return the images that succeeded.
fn absorb(
    report: &mut BatchReport,
    images: Vec<PathBuf>,
    outcomes: Vec<Outcome>,
    stage: PipelineStage,
) -> Vec<PathBuf> {
    let mut succeeded = Vec::with_capacity(images.len());
    for (path, outcome) in images.into_iter().zip(outcomes) {
        match outcome {
            Outcome::Done => succeeded.push(path),
            Outcome::Skipped(reason) => report.skipped.push(SkippedImage {
                path,
                stage,
                reason,
            }),
            Outcome::Cancelled => report.cancelled = true,
        }
    }
    succeeded
}

fn extract_one(path: &Path, background_dir: &Path, config: &FlattenConfig) -> Result<()> {
    let frame = load_image(path)?;
    let extraction = estimate_and_suppress_background(&frame, &config.background)?;
    debug!(
        path = %path.display(),
        quantile = extraction.quantile,
        threshold = extraction.threshold,
        replaced = extraction.replaced,
        "Background written"
    );
    save_image(&extraction.frame, &background_dir.join(file_name(path)?))
}

fn flatten_one(
    path: &Path,
    background_dir: &Path,
    smoothed_dir: &Path,
    config: &FlattenConfig,
    cache: &KernelCache,
) -> Result<()> {
    let name = file_name(path)?;
    let background_path = background_dir.join(name);
    if !background_path.is_file() {
        return Err(IntensifyError::MissingPairedArtifact(background_path));
    }

    let original = load_image(path)?;
    let background = load_image(&background_path)?;
    let output = smooth_and_normalize(
        &original,
        &background,
        &config.smoothing,
        &config.normalization,
        cache,
    )?;

    if config.save_intermediates {
        save_image(&output.smoothed, &smoothed_dir.join(name))?;
    }
    save_image(&output.corrected, &config.output.join(name))?;
    info!(path = %path.display(), "Image flattened");
    Ok(())
}

fn file_name(path: &Path) -> Result<&OsStr> {
    path.file_name().ok_or_else(|| {
        IntensifyError::InvalidParameter(format!("{} has no file name", path.display()))
    })
}
