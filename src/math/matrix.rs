use ndarray::ArrayView2;

/// Returns the location of the maximum element in the slice, or `None` if it is
/// empty. The earliest index wins on ties.
pub fn arg_max(values: &[f32]) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, max)) if v <= max => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// The largest value in the matrix, or 0.0 when it is empty.
pub fn global_max(matrix: ArrayView2<f32>) -> f32 {
    matrix.iter().fold(0.0f32, |max, &v| max.max(v))
}

/// Cells that are a strict maximum along the time axis (rows) for their column,
/// comparing against every cell within `spread` frames on each side.
///
/// Edge frames compare only against the neighbours that exist. Plateaus produce no
/// peak since the comparison is strict.
pub fn time_axis_peaks(matrix: ArrayView2<f32>, spread: usize) -> Vec<(usize, usize)> {
    let (n_frames, n_bins) = matrix.dim();
    let mut peaks = Vec::new();

    for bin in 0..n_bins {
        for frame in 0..n_frames {
            let value = matrix[[frame, bin]];
            let lo = frame.saturating_sub(spread);
            let hi = (frame + spread).min(n_frames - 1);
            let is_peak = (lo..=hi)
                .filter(|&other| other != frame)
                .all(|other| value > matrix[[other, bin]]);
            if is_peak {
                peaks.push((frame, bin));
            }
        }
    }

    peaks
}

/// Symmetric gaussian window `w(n) = exp(-1/2 * ((n - mid) / sigma)^2)`, maximum
/// normalized to 1. Empty for `m == 0`.
pub fn gaussian(m: usize, std: f32) -> Vec<f32> {
    if m == 0 {
        return vec![];
    }

    let midpoint = (m - 1) as f32 / 2.0;
    (0..m)
        .map(|n| (-(n as f32 - midpoint).powi(2) / (2.0 * std.powi(2))).exp())
        .collect()
}
