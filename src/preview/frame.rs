//! Frame index arithmetic shared by both preview variants.

use std::num::NonZeroUsize;

/// Horizontal offset of frame `index`, as a percentage of the total sprite width.
///
/// The percentage is converted to pixels by the surface at draw time, so a
/// resized tile still lands exactly on frame boundaries.
pub fn compute_frame_position(index: usize, frame_count: NonZeroUsize) -> f32 {
    index as f32 / frame_count.get() as f32 * 100.0
}

/// The frame after `index`, wrapping back to 0.
pub fn next_frame(index: usize, frame_count: NonZeroUsize) -> usize {
    (index + 1) % frame_count.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_frame_position_matches_percentage() {
        for n in 1..=24 {
            for index in 0..n {
                assert_eq!(
                    compute_frame_position(index, count(n)),
                    index as f32 / n as f32 * 100.0
                );
            }
        }
    }

    #[test]
    fn test_frame_position_examples() {
        assert_eq!(compute_frame_position(0, count(4)), 0.0);
        assert_eq!(compute_frame_position(1, count(4)), 25.0);
        assert_eq!(compute_frame_position(3, count(4)), 75.0);
    }

    #[test]
    fn test_next_frame_wraps() {
        let sequence: Vec<usize> = (0..4)
            .scan(0, |index, _| {
                *index = next_frame(*index, count(4));
                Some(*index)
            })
            .collect();
        assert_eq!(sequence, vec![1, 2, 3, 0]);
        assert_eq!(next_frame(0, count(1)), 0);
    }
}
