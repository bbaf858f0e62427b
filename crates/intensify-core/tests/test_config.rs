use std::path::PathBuf;

use intensify_core::error::IntensifyError;
use intensify_core::filters::kernel::KernelStrategy;
use intensify_core::filters::normalize::NormalizationPolicy;
use intensify_core::frame::BitDepth;
use intensify_core::pipeline::config::{
    BackgroundConfig, FlattenConfig, NormalizationConfig, SmoothingConfig,
};
use intensify_core::pipeline::PipelineStage;

fn config() -> FlattenConfig {
    FlattenConfig::new(PathBuf::from("stack"), PathBuf::from("stack/flat"))
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn test_defaults() {
    let cfg = config();
    assert_eq!(cfg.threads, 0);
    assert!(cfg.save_intermediates);
    assert!(!cfg.reuse_backgrounds);
    assert_eq!(cfg.background.max_tissue_intensity, 255.0);
    assert_eq!(cfg.background.sample_size, 10_000);
    assert_eq!(cfg.smoothing.window_size, 15);
    assert_eq!(cfg.smoothing.kernel, KernelStrategy::LeastSquaresQuadratic);
    assert_eq!(cfg.normalization.policy, NormalizationPolicy::DivideByMax);
    assert_eq!(cfg.normalization.output_depth, BitDepth::Sixteen);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_minimal_json_fills_defaults() {
    let json = r#"{ "input": "in", "output": "out" }"#;
    let cfg: FlattenConfig = serde_json::from_str(json).unwrap();
    assert_eq!(cfg.input, PathBuf::from("in"));
    assert!(cfg.save_intermediates);
    assert_eq!(cfg.smoothing.window_size, 15);
    assert_eq!(cfg.background.sample_size, 10_000);
}

#[test]
fn test_partial_section_fills_defaults() {
    let json = r#"{
        "input": "in",
        "output": "out",
        "smoothing": { "kernel": "CircularGaussian" },
        "normalization": { "policy": "MinMaxStretch", "output_depth": "Eight" }
    }"#;
    let cfg: FlattenConfig = serde_json::from_str(json).unwrap();
    assert_eq!(cfg.smoothing.window_size, 15);
    assert_eq!(cfg.smoothing.kernel, KernelStrategy::CircularGaussian);
    assert_eq!(cfg.normalization.policy, NormalizationPolicy::MinMaxStretch);
    assert_eq!(cfg.normalization.output_depth, BitDepth::Eight);
}

#[test]
fn test_json_roundtrip() {
    let mut cfg = config();
    cfg.threads = 4;
    cfg.smoothing.window_size = 21;
    let json = serde_json::to_string(&cfg).unwrap();
    let restored: FlattenConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.threads, 4);
    assert_eq!(restored.smoothing.window_size, 21);
    assert_eq!(restored.output, cfg.output);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_even_window_invalid() {
    let cfg = SmoothingConfig {
        window_size: 10,
        kernel: KernelStrategy::default(),
    };
    assert!(matches!(
        cfg.validate(),
        Err(IntensifyError::InvalidParameter(_))
    ));
}

#[test]
fn test_negative_ceiling_invalid() {
    let cfg = BackgroundConfig {
        max_tissue_intensity: -1.0,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = BackgroundConfig {
        max_tissue_intensity: f64::INFINITY,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_zero_sample_size_invalid() {
    let cfg = BackgroundConfig {
        sample_size: 0,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_float_output_invalid() {
    let cfg = NormalizationConfig {
        output_depth: BitDepth::Float,
        ..Default::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_output_equal_to_input_invalid() {
    let cfg = FlattenConfig::new(PathBuf::from("stack"), PathBuf::from("stack"));
    assert!(matches!(
        cfg.validate(),
        Err(IntensifyError::InvalidParameter(_))
    ));
}

// ---------------------------------------------------------------------------
// Display
// ---------------------------------------------------------------------------

#[test]
fn test_display_impls() {
    assert_eq!(
        format!("{}", KernelStrategy::LeastSquaresQuadratic),
        "Least-squares quadratic"
    );
    assert_eq!(
        format!("{}", KernelStrategy::CircularGaussian),
        "Circular Gaussian"
    );
    assert_eq!(
        format!("{}", NormalizationPolicy::DivideByMax),
        "Divide by max"
    );
    assert_eq!(
        format!("{}", NormalizationPolicy::MinMaxStretch),
        "Min-max stretch"
    );
    assert_eq!(format!("{}", PipelineStage::Discovering), "Finding images");
    assert_eq!(
        format!("{}", PipelineStage::ExtractingBackground),
        "Extracting backgrounds"
    );
    assert_eq!(format!("{}", PipelineStage::Flattening), "Flattening");
}

#[test]
fn test_error_messages() {
    let err = IntensifyError::MissingPairedArtifact(PathBuf::from("out/noise_images/a.tif"));
    assert_eq!(
        err.to_string(),
        "Missing background image for out/noise_images/a.tif"
    );
    assert_eq!(
        IntensifyError::EmptySample.to_string(),
        "No valid pixels to sample"
    );
}
