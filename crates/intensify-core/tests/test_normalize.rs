use ndarray::{array, Array2};

use intensify_core::error::IntensifyError;
use intensify_core::filters::normalize::{normalize, NormalizationPolicy};
use intensify_core::frame::{BitDepth, Frame};

fn frame16(data: Array2<f32>) -> Frame {
    Frame::new(data, BitDepth::Sixteen)
}

#[test]
fn test_divide_by_max() {
    let original = frame16(array![[100.0, 100.0], [30.0, 0.0]]);
    let background = frame16(array![[50.0, 100.0], [25.0, 100.0]]);
    let out = normalize(
        &original,
        &background,
        NormalizationPolicy::DivideByMax,
        BitDepth::Sixteen,
    )
    .unwrap();
    assert_eq!(out.data, array![[200.0, 100.0], [120.0, 0.0]]);
    assert_eq!(out.bit_depth, BitDepth::Sixteen);
}

#[test]
fn test_min_max_stretch() {
    let original = frame16(array![[10.0, 10.0, 10.0]]);
    let background = frame16(array![[50.0, 100.0, 150.0]]);
    let out = normalize(
        &original,
        &background,
        NormalizationPolicy::MinMaxStretch,
        BitDepth::Sixteen,
    )
    .unwrap();
    // Rescaled background 0, 0.5, 1: the zero keeps the original pixel.
    assert_eq!(out.data, array![[10.0, 20.0, 10.0]]);
}

#[test]
fn test_flat_background_min_max_falls_back_to_max() {
    let original = frame16(array![[7.0, 9.0], [11.0, 13.0]]);
    let background = frame16(Array2::from_elem((2, 2), 200.0));
    let out = normalize(
        &original,
        &background,
        NormalizationPolicy::MinMaxStretch,
        BitDepth::Sixteen,
    )
    .unwrap();
    assert_eq!(out.data, original.data);
}

#[test]
fn test_zero_background_keeps_original() {
    let original = frame16(array![[123.0, 456.0], [789.0, 1.0]]);
    let background = frame16(Array2::zeros((2, 2)));
    for policy in [
        NormalizationPolicy::DivideByMax,
        NormalizationPolicy::MinMaxStretch,
    ] {
        let out = normalize(&original, &background, policy, BitDepth::Sixteen).unwrap();
        assert_eq!(out.data, original.data, "{policy}");
    }
}

#[test]
fn test_self_normalization_gives_ones() {
    let image = Frame::new(
        array![[0.25, 0.5], [0.75, 1.0], [0.1, 0.9]],
        BitDepth::Float,
    );
    let out = normalize(
        &image,
        &image,
        NormalizationPolicy::DivideByMax,
        BitDepth::Sixteen,
    )
    .unwrap();
    assert!(out.data.iter().all(|&v| v == 1.0));
}

#[test]
fn test_clamped_to_output_depth() {
    let original = frame16(array![[60_000.0, 200.0]]);
    let background = frame16(array![[50.0, 100.0]]);

    let out16 = normalize(
        &original,
        &background,
        NormalizationPolicy::DivideByMax,
        BitDepth::Sixteen,
    )
    .unwrap();
    assert_eq!(out16.data, array![[65_535.0, 200.0]]);

    let out8 = normalize(
        &original,
        &background,
        NormalizationPolicy::DivideByMax,
        BitDepth::Eight,
    )
    .unwrap();
    assert_eq!(out8.data, array![[255.0, 200.0]]);
    assert_eq!(out8.bit_depth, BitDepth::Eight);
}

#[test]
fn test_results_rounded() {
    let original = frame16(array![[10.0, 10.0]]);
    let background = frame16(array![[30.0, 90.0]]);
    let out = normalize(
        &original,
        &background,
        NormalizationPolicy::DivideByMax,
        BitDepth::Sixteen,
    )
    .unwrap();
    // 10 / (1/3) = 30, 10 / 1 = 10
    assert_eq!(out.data, array![[30.0, 10.0]]);
}

#[test]
fn test_dimension_mismatch() {
    let original = frame16(Array2::zeros((4, 5)));
    let background = frame16(Array2::zeros((5, 4)));
    match normalize(
        &original,
        &background,
        NormalizationPolicy::DivideByMax,
        BitDepth::Sixteen,
    ) {
        Err(IntensifyError::DimensionMismatch { expected, actual }) => {
            assert_eq!(expected, (4, 5));
            assert_eq!(actual, (5, 4));
        }
        other => panic!("expected DimensionMismatch, got {other:?}"),
    }
}
