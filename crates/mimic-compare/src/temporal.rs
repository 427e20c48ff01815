//! Temporal weighting of per-frame similarity scores.
//!
//! Start and end transitions are noisier than sustained mid-movement form, so
//! frames are weighted with a Gaussian bell over their normalized position:
//!
//! ```text
//! pos(i) = (i / (n − 1))·2 − 1        ∈ [−1, 1]
//! w(i)   = exp(−2·pos²)
//! score  = Σ wᵢ·sᵢ / Σ wᵢ
//! ```
//!
//! A single frame sits at `pos = 0` and therefore has weight 1.

/// Gaussian-weighted mean of `frame_scores`; 0 for an empty slice
pub fn aggregate(frame_scores: &[f64]) -> f64 {
    if frame_scores.is_empty() {
        return 0.0;
    }

    let n = frame_scores.len();
    let (weighted_sum, total_weight) = frame_scores
        .iter()
        .enumerate()
        .map(|(i, &score)| {
            let w = frame_weight(i, n);
            (score * w, w)
        })
        .fold((0.0, 0.0), |(s, t), (ws, w)| (s + ws, t + w));

    weighted_sum / total_weight
}

/// Bell-curve weight of frame `index` in a sequence of `len` frames
pub fn frame_weight(index: usize, len: usize) -> f64 {
    let pos = if len > 1 {
        (index as f64 / (len - 1) as f64) * 2.0 - 1.0
    } else {
        0.0
    };
    (-2.0 * pos * pos).exp()
}

/// Mean scores of the beginning, middle and end of a sequence.
///
/// Thirds use `⌊n/3⌋` as the boundary with the remainder going to the end
/// phase. A phase with no frames yields `None`.
pub fn phase_means(frame_scores: &[f64]) -> [Option<f64>; 3] {
    let n = frame_scores.len();
    let third = n / 3;
    let bounds = [(0, third), (third, 2 * third), (2 * third, n)];

    bounds.map(|(start, end)| {
        let phase = &frame_scores[start..end];
        if phase.is_empty() {
            None
        } else {
            Some(phase.iter().sum::<f64>() / phase.len() as f64)
        }
    })
}
