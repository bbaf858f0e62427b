use ndarray::array;

use intensify_core::error::IntensifyError;
use intensify_core::frame::{BitDepth, Frame};
use intensify_core::stats::{frame_stats, median};

// ---------------------------------------------------------------------------
// Sample types
// ---------------------------------------------------------------------------

#[test]
fn test_from_u16_samples() {
    let frame = Frame::from_samples(3, 2, &[0u16, 1, 2, 3, 4, 65_535]).unwrap();
    assert_eq!(frame.bit_depth, BitDepth::Sixteen);
    assert_eq!(frame.width(), 3);
    assert_eq!(frame.height(), 2);
    assert_eq!(frame.data[[1, 2]], 65_535.0);
}

#[test]
fn test_signed_16bit_read_as_unsigned() {
    let frame = Frame::from_samples(2, 1, &[-1i16, i16::MIN]).unwrap();
    assert_eq!(frame.bit_depth, BitDepth::Sixteen);
    assert_eq!(frame.data, array![[65_535.0, 32_768.0]]);
}

#[test]
fn test_signed_8bit_read_as_unsigned() {
    let frame = Frame::from_samples(3, 1, &[-1i8, -128, 127]).unwrap();
    assert_eq!(frame.bit_depth, BitDepth::Eight);
    assert_eq!(frame.data, array![[255.0, 128.0, 127.0]]);
}

#[test]
fn test_u32_and_float_samples() {
    let frame = Frame::from_samples(2, 1, &[7u32, 1_000_000]).unwrap();
    assert_eq!(frame.bit_depth, BitDepth::ThirtyTwo);
    assert_eq!(frame.data, array![[7.0, 1_000_000.0]]);

    let frame = Frame::from_samples(1, 2, &[0.5f32, 2.5]).unwrap();
    assert_eq!(frame.bit_depth, BitDepth::Float);
    assert_eq!(frame.data, array![[0.5], [2.5]]);
}

#[test]
fn test_sample_count_mismatch() {
    assert!(matches!(
        Frame::from_samples(4, 4, &[0u8; 15]),
        Err(IntensifyError::InvalidDimensions { width: 4, height: 4 })
    ));
}

// ---------------------------------------------------------------------------
// Bit depth
// ---------------------------------------------------------------------------

#[test]
fn test_quantize_integer_depths() {
    assert_eq!(BitDepth::Eight.quantize(-3.0), 0.0);
    assert_eq!(BitDepth::Eight.quantize(254.6), 255.0);
    assert_eq!(BitDepth::Eight.quantize(1_000.0), 255.0);
    assert_eq!(BitDepth::Sixteen.quantize(70_000.0), 65_535.0);
    assert_eq!(BitDepth::Sixteen.quantize(12.4), 12.0);
    assert_eq!(BitDepth::Sixteen.quantize(f64::NAN), 0.0);
}

#[test]
fn test_quantize_float_keeps_fraction() {
    assert_eq!(BitDepth::Float.quantize(0.375), 0.375);
    assert_eq!(BitDepth::Float.quantize(-1.0), 0.0);
}

#[test]
fn test_bit_depth_properties() {
    assert_eq!(BitDepth::default(), BitDepth::Sixteen);
    assert_eq!(BitDepth::Eight.bits(), 8);
    assert_eq!(BitDepth::Float.bits(), 32);
    assert!(!BitDepth::Float.is_integer());
    assert_eq!(BitDepth::Sixteen.max_value(), 65_535.0);
    assert_eq!(format!("{}", BitDepth::Float), "32-bit float");
}

#[test]
fn test_converted_requantizes() {
    let frame = Frame::new(array![[0.4, 300.7]], BitDepth::Float);
    let eight = frame.converted(BitDepth::Eight);
    assert_eq!(eight.bit_depth, BitDepth::Eight);
    assert_eq!(eight.data, array![[0.0, 255.0]]);
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

#[test]
fn test_min_max_and_stats() {
    let frame = Frame::new(array![[4.0, 1.0], [9.0, 2.0]], BitDepth::Sixteen);
    assert_eq!(frame.min_max(), Some((1.0, 9.0)));

    let stats = frame_stats(&frame).unwrap();
    assert_eq!(stats.min, 1.0);
    assert_eq!(stats.median, 3.0);
    assert_eq!(stats.max, 9.0);
    assert_eq!(format!("{stats}"), "min=1.0 median=3.0 max=9.0");
}

#[test]
fn test_empty_frame_has_no_stats() {
    let frame = Frame::new(ndarray::Array2::zeros((0, 3)), BitDepth::Eight);
    assert!(frame.is_empty());
    assert_eq!(frame.min_max(), None);
    assert_eq!(median(&frame), None);
    assert!(frame_stats(&frame).is_none());
}
