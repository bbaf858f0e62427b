use crate::frame::Frame;

/// Summary statistics of one frame, logged between pipeline stages.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameStats {
    pub min: f32,
    pub median: f32,
    pub max: f32,
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "min={:.1} median={:.1} max={:.1}",
            self.min, self.median, self.max
        )
    }
}

/// Compute min/median/max of a frame. Returns `None` for an empty frame.
pub fn frame_stats(frame: &Frame) -> Option<FrameStats> {
    let (min, max) = frame.min_max()?;
    let median = median(frame)?;
    Some(FrameStats { min, median, max })
}

/// Exact median over every pixel (not sampled).
pub fn median(frame: &Frame) -> Option<f32> {
    if frame.is_empty() {
        return None;
    }
    let mut values: Vec<f32> = frame.data.iter().copied().collect();
    Some(median_of(&mut values))
}

/// Median via `select_nth_unstable` (O(n), no full sort). Reorders `values`.
/// Even counts average the two middle elements.
pub(crate) fn median_of(values: &mut [f32]) -> f32 {
    let n = values.len();
    if n == 1 {
        values[0]
    } else if n % 2 == 1 {
        let mid = n / 2;
        *values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b)).1
    } else {
        let mid = n / 2;
        values.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
        let upper = values[mid];
        let lower = *values[..mid]
            .select_nth_unstable_by(mid - 1, |a, b| a.total_cmp(b))
            .1;
        (lower + upper) / 2.0
    }
}
