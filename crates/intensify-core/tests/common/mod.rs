use std::path::{Path, PathBuf};

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use intensify_core::frame::{BitDepth, Frame};
use intensify_core::io::image_io::save_tiff;

/// Background level of the synthetic scene.
pub const SCENE_BACKGROUND: f32 = 100.0;
/// Intensity of the bright square in the synthetic scene.
pub const SCENE_SIGNAL: f32 = 5000.0;
/// Edge length of the synthetic scene.
pub const SCENE_SIZE: usize = 20;
/// Rows/cols covered by the bright square (5x5, centred).
pub const SQUARE: std::ops::Range<usize> = 8..13;

pub fn make_frame(h: usize, w: usize, fill: f32, depth: BitDepth) -> Frame {
    Frame::new(Array2::from_elem((h, w), fill), depth)
}

pub fn in_square(row: usize, col: usize) -> bool {
    SQUARE.contains(&row) && SQUARE.contains(&col)
}

/// 20x20 16-bit frame: background 100 with sparse ±5 jitter spikes on a
/// 5-pixel lattice, plus a 5x5 square of 5000 in the centre.
///
/// Spikes sit at least two pixels from every edge so mirrored padding never
/// folds one onto itself.
pub fn make_scene(seed: u64) -> Frame {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut data = Array2::from_elem((SCENE_SIZE, SCENE_SIZE), SCENE_BACKGROUND);

    let lattice = [2usize, 7, 12, 17];
    for (i, &row) in lattice.iter().enumerate() {
        for (j, &col) in lattice.iter().enumerate() {
            let jitter = match (i, j) {
                (0, 0) => 5.0,
                (0, 1) => -5.0,
                _ => {
                    if rng.random_bool(0.5) {
                        5.0
                    } else {
                        -5.0
                    }
                }
            };
            data[[row, col]] += jitter;
        }
    }

    for row in SQUARE {
        for col in SQUARE {
            data[[row, col]] = SCENE_SIGNAL;
        }
    }

    Frame::new(data, BitDepth::Sixteen)
}

/// Dense uniform jitter in `[-amplitude, amplitude]` around `level`.
pub fn make_noisy_frame(
    h: usize,
    w: usize,
    level: f32,
    amplitude: f32,
    depth: BitDepth,
    seed: u64,
) -> Frame {
    let mut rng = StdRng::seed_from_u64(seed);
    let data = Array2::from_shape_fn((h, w), |_| {
        level + rng.random_range(-amplitude..=amplitude)
    });
    Frame::new(data, depth)
}

pub fn spread(frame: &Frame) -> f32 {
    let (lo, hi) = frame.min_max().expect("non-empty frame");
    hi - lo
}

/// Write `frame` as a TIFF named `name` inside `dir`.
pub fn write_tiff(dir: &Path, name: &str, frame: &Frame) -> PathBuf {
    let path = dir.join(name);
    save_tiff(frame, &path).expect("write test tiff");
    path
}
