use ndarray::Array2;

/// Extend `data` by `pad` pixels on every side by mirroring across the edges.
///
/// The pixel `i` steps outside an edge takes the value of the pixel `i` steps
/// inside it (the edge row/column itself is repeated once). Both axes are
/// reflected independently, so corner blocks mirror diagonally. Pads wider
/// than the image keep folding back and forth.
pub fn mirror_pad(data: &Array2<f64>, pad: usize) -> Array2<f64> {
    let (h, w) = data.dim();
    if pad == 0 || h == 0 || w == 0 {
        return data.clone();
    }

    Array2::from_shape_fn((h + 2 * pad, w + 2 * pad), |(row, col)| {
        let src_row = reflect(row as isize - pad as isize, h);
        let src_col = reflect(col as isize - pad as isize, w);
        data[[src_row, src_col]]
    })
}

/// Map a possibly out-of-range index onto `[0, len)` by symmetric reflection.
fn reflect(index: isize, len: usize) -> usize {
    let period = 2 * len as isize;
    let m = index.rem_euclid(period);
    if m < len as isize {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}
