//! Difficulty mapping
//!
//! Grid grows by score ranges (one point per cleared level):
//! - Levels 1-15  -> 3x3
//! - Levels 16-30 -> 4x4
//! - Levels 31-45 -> 5x5
//! - Levels 46-60 -> 6x6
//! - Levels 61-75 -> 7x7
//! - Levels 76+   -> 8x8 (cap)

/// Map the running score to the grid dimension N (grid is NxN).
///
/// Pure, total, and monotonic non-decreasing; score 0 corresponds to level 1.
pub fn grid_size_from_score(score: u32) -> usize {
    if score >= 75 {
        8
    } else if score >= 60 {
        7
    } else if score >= 45 {
        6
    } else if score >= 30 {
        5
    } else if score >= 15 {
        4
    } else {
        3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRID_MAX, GRID_MIN};
    use proptest::prelude::*;

    #[test]
    fn test_threshold_boundaries() {
        assert_eq!(grid_size_from_score(0), 3);
        assert_eq!(grid_size_from_score(14), 3);
        assert_eq!(grid_size_from_score(15), 4);
        assert_eq!(grid_size_from_score(29), 4);
        assert_eq!(grid_size_from_score(30), 5);
        assert_eq!(grid_size_from_score(45), 6);
        assert_eq!(grid_size_from_score(60), 7);
        assert_eq!(grid_size_from_score(74), 7);
        assert_eq!(grid_size_from_score(75), 8);
        assert_eq!(grid_size_from_score(1000), 8);
    }

    proptest! {
        #[test]
        fn prop_monotonic_and_bounded(score in 0u32..10_000) {
            let n = grid_size_from_score(score);
            prop_assert!((GRID_MIN..=GRID_MAX).contains(&n));
            prop_assert!(n <= grid_size_from_score(score + 1));
        }
    }
}
