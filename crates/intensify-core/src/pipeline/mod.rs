pub mod config;
mod orchestrator;
mod stages;
mod types;

pub use orchestrator::{run_batch, run_batch_reported, run_batch_with_progress};
pub use stages::{estimate_and_suppress_background, flatten_frame, smooth_and_normalize};
pub use types::{BatchReport, FlattenOutput, PipelineStage, ProgressReporter, SkippedImage};
