use std::path::PathBuf;

use crate::frame::Frame;

/// Pipeline processing stage, used for progress reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PipelineStage {
    Discovering,
    ExtractingBackground,
    Flattening,
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Discovering => write!(f, "Finding images"),
            Self::ExtractingBackground => write!(f, "Extracting backgrounds"),
            Self::Flattening => write!(f, "Flattening"),
        }
    }
}

/// Smoothed background and corrected image for one input.
#[derive(Clone, Debug)]
pub struct FlattenOutput {
    pub smoothed: Frame,
    pub corrected: Frame,
}

/// An image the batch gave up on, with the reason.
#[derive(Clone, Debug)]
pub struct SkippedImage {
    pub path: PathBuf,
    pub stage: PipelineStage,
    pub reason: String,
}

/// Outcome of a directory batch.
#[derive(Clone, Debug, Default)]
pub struct BatchReport {
    /// Images found in the input directory.
    pub discovered: usize,
    /// Images fully corrected and written.
    pub processed: usize,
    pub skipped: Vec<SkippedImage>,
    /// Set when the cancel flag stopped the batch early.
    pub cancelled: bool,
}

/// Thread-safe progress reporting for the pipeline.
///
/// Implementors can use this to drive progress bars, logging, or any other
/// UI feedback. All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    /// A new pipeline stage has started. `total_items` is the number of
    /// work items in this stage (e.g., image count), if known.
    fn begin_stage(&self, _stage: PipelineStage, _total_items: Option<usize>) {}

    /// One work item within the current stage has completed.
    fn advance(&self, _items_done: usize) {}

    /// The current stage is finished.
    fn finish_stage(&self) {}
}

/// No-op progress reporter, used when `run_batch` delegates.
pub(super) struct NoOpReporter;
impl ProgressReporter for NoOpReporter {}
