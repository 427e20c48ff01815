//! Frame-count alignment for movement sequences.

use mimic_core::{MovementSequence, TimestampedFrame};

/// Resample `sequence` to exactly `target_len` frames.
///
/// Output frame `i` is a copy of source frame `⌊i·len/target_len⌋` (clamped
/// to the last frame), i.e. zero-order hold rather than interpolation.
/// Timestamps are copied from the picked frame. An equal-length request
/// returns a plain copy; an empty sequence or a zero target yields an empty
/// sequence.
pub fn resample(sequence: &[TimestampedFrame], target_len: usize) -> MovementSequence {
    if sequence.len() == target_len {
        return sequence.to_vec();
    }

    let Some(last_idx) = sequence.len().checked_sub(1) else {
        return Vec::new();
    };

    (0..target_len)
        .map(|i| {
            let src = (i * sequence.len() / target_len).min(last_idx);
            sequence[src].clone()
        })
        .collect()
}

/// Resample both sequences onto each other's original length.
///
/// The two directions are not symmetric, so both are computed; callers
/// compare over the shorter of the two results.
pub fn cross_resample(
    recorded: &[TimestampedFrame],
    current: &[TimestampedFrame],
) -> (MovementSequence, MovementSequence) {
    (
        resample(recorded, current.len()),
        resample(current, recorded.len()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mimic_core::Landmark;

    fn sequence(len: usize) -> MovementSequence {
        (0..len)
            .map(|i| {
                TimestampedFrame::new(
                    i as f64 * 33.0,
                    vec![Landmark::with_visibility(i as f64 / len as f64, 0.5, 0.0, 0.9)],
                )
            })
            .collect()
    }

    fn timestamps(seq: &[TimestampedFrame]) -> Vec<f64> {
        seq.iter().map(|f| f.timestamp.as_millis()).collect()
    }

    #[test]
    fn test_equal_length_passthrough() {
        let seq = sequence(30);
        let out = resample(&seq, 30);
        assert_eq!(out, seq);
    }

    #[test]
    fn test_downsample_picks_earlier_frames() {
        let seq = sequence(10);
        let out = resample(&seq, 4);
        // floor(i * 10 / 4) = 0, 2, 5, 7
        assert_eq!(timestamps(&out), vec![0.0, 66.0, 165.0, 231.0]);
    }

    #[test]
    fn test_upsample_repeats_frames() {
        let seq = sequence(3);
        let out = resample(&seq, 7);
        // floor(i * 3 / 7) = 0, 0, 0, 1, 1, 2, 2
        assert_eq!(
            timestamps(&out),
            vec![0.0, 0.0, 0.0, 33.0, 33.0, 66.0, 66.0]
        );
    }

    #[test]
    fn test_degenerate_inputs() {
        assert!(resample(&[], 5).is_empty());
        assert!(resample(&sequence(4), 0).is_empty());
    }

    #[test]
    fn test_output_is_independent_copy() {
        let seq = sequence(5);
        let mut out = resample(&seq, 5);
        out[0].landmarks[0].x = 0.99;
        assert_ne!(seq[0].landmarks[0].x, 0.99);
    }

    #[test]
    fn test_cross_resample_lengths() {
        let (recorded, current) = cross_resample(&sequence(12), &sequence(5));
        assert_eq!(recorded.len(), 5);
        assert_eq!(current.len(), 12);
    }
}
