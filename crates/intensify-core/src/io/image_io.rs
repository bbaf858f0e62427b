use std::path::Path;

use image::{DynamicImage, ImageBuffer, ImageFormat, Luma};

use crate::error::{IntensifyError, Result};
use crate::frame::{BitDepth, Frame};

/// Load a grayscale image, keeping its raw intensities and bit depth.
///
/// 8-bit and 16-bit grayscale are supported; anything with colour or alpha
/// channels is rejected with `UnsupportedSampleType`.
pub fn load_image(path: &Path) -> Result<Frame> {
    match image::open(path)? {
        DynamicImage::ImageLuma8(buf) => {
            let (w, h) = buf.dimensions();
            Frame::from_samples(w as usize, h as usize, buf.as_raw())
        }
        DynamicImage::ImageLuma16(buf) => {
            let (w, h) = buf.dimensions();
            Frame::from_samples(w as usize, h as usize, buf.as_raw())
        }
        other => Err(IntensifyError::UnsupportedSampleType(format!(
            "{:?} in {}",
            other.color(),
            path.display()
        ))),
    }
}

/// Save a frame as grayscale TIFF at its own bit depth (8 or 16).
pub fn save_tiff(frame: &Frame, path: &Path) -> Result<()> {
    save_with_format(frame, path, ImageFormat::Tiff)
}

/// Save a frame as grayscale PNG at its own bit depth.
pub fn save_png(frame: &Frame, path: &Path) -> Result<()> {
    save_with_format(frame, path, ImageFormat::Png)
}

/// Save frame, choosing format from file extension (TIFF when unknown).
pub fn save_image(frame: &Frame, path: &Path) -> Result<()> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => save_png(frame, path),
        _ => save_tiff(frame, path),
    }
}

fn save_with_format(frame: &Frame, path: &Path, format: ImageFormat) -> Result<()> {
    let w = frame.width() as u32;
    let h = frame.height() as u32;
    let invalid = || IntensifyError::InvalidDimensions {
        width: frame.width(),
        height: frame.height(),
    };

    match frame.bit_depth {
        BitDepth::Eight => {
            let pixels: Vec<u8> = frame
                .data
                .iter()
                .map(|&v| BitDepth::Eight.quantize(v as f64) as u8)
                .collect();
            let img =
                ImageBuffer::<Luma<u8>, Vec<u8>>::from_raw(w, h, pixels).ok_or_else(invalid)?;
            img.save_with_format(path, format)?;
        }
        BitDepth::Sixteen => {
            let pixels: Vec<u16> = frame
                .data
                .iter()
                .map(|&v| BitDepth::Sixteen.quantize(v as f64) as u16)
                .collect();
            let img =
                ImageBuffer::<Luma<u16>, Vec<u16>>::from_raw(w, h, pixels).ok_or_else(invalid)?;
            img.save_with_format(path, format)?;
        }
        depth => {
            return Err(IntensifyError::UnsupportedSampleType(format!(
                "cannot write {depth} frames to {}",
                path.display()
            )));
        }
    }
    Ok(())
}
