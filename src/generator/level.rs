//! Level assembly
//!
//! Orchestrates one generation pass: grid size from score, patterned
//! backdrop, anomaly site, mutation, validation, and the single-difference
//! check. Attempt failures are expected and recovered locally by restarting
//! the whole attempt (new base shape and pattern, not just a new mutation);
//! only total exhaustion is visible to the caller, and it degrades to a
//! guaranteed-valid fallback level rather than an error.

use serde::{Deserialize, Serialize};

use super::anomaly::{apply_anomaly, is_anomaly_visible};
use super::difficulty::grid_size_from_score;
use super::pattern::{build_pattern_grid, Pattern};
use super::rng::GenRng;
use super::shape::{select_base_shape, ShapeDescriptor, ShapeFamily};
use crate::consts::MAX_ATTEMPTS;
use crate::tuning::SCORE_CORNER_EXCLUSION_MAX;

/// How the returned level was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleApplied {
    /// Normal pattern + anomaly generation
    Generated,
    /// Deterministic substitute after exhausting all attempts
    Fallback,
}

/// One generated level: an NxN grid of shape descriptors with exactly one
/// anomaly cell. Immutable once returned; a fresh descriptor is produced per
/// generation call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Grid dimension N (grid is NxN)
    pub grid_size: usize,
    /// Row-major cells, index = row * N + col
    pub shapes: Vec<ShapeDescriptor>,
    /// The one cell that differs from the backdrop
    pub anomaly_index: usize,
    pub rule_applied: RuleApplied,
    /// Difficulty tier active at generation time
    pub difficulty: u32,
}

impl LevelDescriptor {
    /// Total cell count (N squared).
    pub fn total_cells(&self) -> usize {
        self.grid_size * self.grid_size
    }

    /// Cell at (row, col).
    pub fn cell(&self, row: usize, col: usize) -> &ShapeDescriptor {
        &self.shapes[row * self.grid_size + col]
    }

    /// (row, col) for a flat index, the inverse of `row * N + col`.
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.grid_size, index % self.grid_size)
    }
}

/// Visibility predicate signature, swappable for exhaustion testing.
type VisibilityCheck<'a> = &'a dyn Fn(&ShapeDescriptor, &ShapeDescriptor) -> bool;

/// Generate one level from the caller's RNG stream and running score.
///
/// Always returns a structurally valid level. `rule_applied` distinguishes a
/// normal generation from the fallback taken after [`MAX_ATTEMPTS`] failed
/// attempts.
pub fn generate_level(rng: &mut GenRng, difficulty: u32, score: u32) -> LevelDescriptor {
    generate_level_with(rng, difficulty, score, &is_anomaly_visible)
}

fn generate_level_with(
    rng: &mut GenRng,
    difficulty: u32,
    score: u32,
    visible: VisibilityCheck<'_>,
) -> LevelDescriptor {
    let grid_size = grid_size_from_score(score);

    for attempt in 1..=MAX_ATTEMPTS {
        match try_generate(rng, grid_size, score, visible) {
            Some(attempt_result) => {
                log::info!(
                    "generated {grid_size}x{grid_size} level on attempt {attempt} \
                     (pattern {:?}, anomaly at {})",
                    attempt_result.base_grid[0].pattern,
                    attempt_result.anomaly_index
                );
                return LevelDescriptor {
                    grid_size,
                    shapes: attempt_result.shapes,
                    anomaly_index: attempt_result.anomaly_index,
                    rule_applied: RuleApplied::Generated,
                    difficulty,
                };
            }
            None => log::debug!("attempt {attempt}/{MAX_ATTEMPTS} rejected, retrying"),
        }
    }

    log::warn!("exhausted {MAX_ATTEMPTS} attempts at score {score}, substituting fallback level");
    fallback_level(grid_size)
}

/// Outcome of one successful attempt; the backdrop is kept so the
/// single-difference invariant can be audited.
struct Attempt {
    shapes: Vec<ShapeDescriptor>,
    base_grid: Vec<ShapeDescriptor>,
    anomaly_index: usize,
}

/// One full attempt. Returns `None` when the candidate fails validation or
/// the single-difference check.
fn try_generate(
    rng: &mut GenRng,
    grid_size: usize,
    score: u32,
    visible: VisibilityCheck<'_>,
) -> Option<Attempt> {
    let base = select_base_shape(rng, score);
    let base_grid = build_pattern_grid(rng, grid_size, score, base.family);

    let anomaly_index = pick_anomaly_index(rng, grid_size, score);

    let candidate = apply_anomaly(rng, &base_grid[anomaly_index], score);
    if !visible(&base_grid[anomaly_index], &candidate) {
        return None;
    }

    let mut shapes = base_grid.clone();
    shapes[anomaly_index] = candidate;

    // Guard against a degenerate mutation coinciding with a secondary cell
    // or a pattern bug: exactly one cell may differ from the backdrop
    let diff_count = shapes
        .iter()
        .zip(&base_grid)
        .filter(|(a, b)| !a.approx_eq(b))
        .count();
    if diff_count != 1 {
        return None;
    }

    Some(Attempt {
        shapes,
        base_grid,
        anomaly_index,
    })
}

/// Uniform anomaly site; through the early-game scores the four corners are
/// excluded by resampling, so first levels never hide the anomaly in the
/// hardest-to-scan cells.
fn pick_anomaly_index(rng: &mut GenRng, grid_size: usize, score: u32) -> usize {
    let total = grid_size * grid_size;
    if score > SCORE_CORNER_EXCLUSION_MAX {
        return rng.index(total);
    }
    let corners = [0, grid_size - 1, total - grid_size, total - 1];
    loop {
        let index = rng.index(total);
        if !corners.contains(&index) {
            return index;
        }
    }
}

/// Deterministic substitute level: a uniform circle grid with a square at the
/// center. Passes the single-difference invariant by construction.
fn fallback_level(grid_size: usize) -> LevelDescriptor {
    let total = grid_size * grid_size;
    let base = ShapeDescriptor::baseline(ShapeFamily::Circle, 28.0, Pattern::Uniform);
    let mut shapes = vec![base; total];
    let anomaly_index = total / 2;
    shapes[anomaly_index].family = ShapeFamily::Square;
    LevelDescriptor {
        grid_size,
        shapes,
        anomaly_index,
        rule_applied: RuleApplied::Fallback,
        difficulty: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn corners(grid_size: usize) -> [usize; 4] {
        let total = grid_size * grid_size;
        [0, grid_size - 1, total - grid_size, total - 1]
    }

    #[test]
    fn test_determinism_bit_identical() {
        for seed in [0u32, 1, 42, 0xDEAD_BEEF] {
            for score in [0u32, 20, 55, 90] {
                let a = generate_level(&mut GenRng::new(seed), 1, score);
                let b = generate_level(&mut GenRng::new(seed), 1, score);
                assert_eq!(a, b);
            }
        }
    }

    #[test]
    fn test_score_zero_scenario() {
        let mut generated = 0;
        for seed in 0..100 {
            let level = generate_level(&mut GenRng::new(seed), 1, 0);
            assert_eq!(level.grid_size, 3);
            assert_eq!(level.shapes.len(), 9);
            assert!(level.anomaly_index < 9);
            assert!(!corners(3).contains(&level.anomaly_index));
            if level.rule_applied == RuleApplied::Generated {
                generated += 1;
            }
        }
        // Generation should almost never exhaust its attempts
        assert!(generated >= 95, "only {generated}/100 generated");
    }

    #[test]
    fn test_score_eighty_scenario() {
        for seed in 0..50 {
            let level = generate_level(&mut GenRng::new(seed), 3, 80);
            assert_eq!(level.grid_size, 8);
            assert_eq!(level.shapes.len(), 64);
            assert!(level.anomaly_index < 64);
            assert_eq!(level.difficulty, 3);
        }
    }

    #[test]
    fn test_exactly_one_difference_from_backdrop() {
        let mut successes = 0;
        for seed in 0..200 {
            let mut rng = GenRng::new(seed);
            if let Some(attempt) = try_generate(&mut rng, 5, 40, &is_anomaly_visible) {
                successes += 1;
                let diffs: Vec<usize> = attempt
                    .shapes
                    .iter()
                    .zip(&attempt.base_grid)
                    .enumerate()
                    .filter(|(_, (a, b))| !a.approx_eq(b))
                    .map(|(i, _)| i)
                    .collect();
                assert_eq!(diffs, vec![attempt.anomaly_index], "seed {seed}");
                // And the difference the validator accepted is real
                assert!(is_anomaly_visible(
                    &attempt.base_grid[attempt.anomaly_index],
                    &attempt.shapes[attempt.anomaly_index],
                ));
            }
        }
        assert!(successes > 150, "only {successes}/200 attempts succeeded");
    }

    #[test]
    fn test_fallback_on_exhaustion() {
        let mut rng = GenRng::new(7);
        let level = generate_level_with(&mut rng, 4, 30, &|_, _| false);
        assert_eq!(level.rule_applied, RuleApplied::Fallback);
        assert_eq!(level.grid_size, 5);
        assert_eq!(level.difficulty, 1);
        assert_eq!(level.anomaly_index, 12);
        let non_circle: Vec<usize> = level
            .shapes
            .iter()
            .enumerate()
            .filter(|(_, s)| s.family != ShapeFamily::Circle)
            .map(|(i, _)| i)
            .collect();
        assert_eq!(non_circle, vec![12]);
        assert_eq!(level.shapes[12].family, ShapeFamily::Square);
    }

    #[test]
    fn test_fallback_uniform_backdrop() {
        let mut rng = GenRng::new(7);
        let level = generate_level_with(&mut rng, 1, 0, &|_, _| false);
        for (i, s) in level.shapes.iter().enumerate() {
            if i == level.anomaly_index {
                assert_eq!(s.family, ShapeFamily::Square);
            } else {
                assert_eq!(s.family, ShapeFamily::Circle);
            }
        }
    }

    #[test]
    fn test_indexing_helpers() {
        let mut rng = GenRng::new(1);
        let level = generate_level(&mut rng, 1, 20);
        assert_eq!(level.grid_size, 4);
        assert_eq!(level.total_cells(), 16);
        assert_eq!(level.row_col(0), (0, 0));
        assert_eq!(level.row_col(7), (1, 3));
        let (r, c) = level.row_col(9);
        assert!(std::ptr::eq(level.cell(r, c), &level.shapes[9]));
    }

    #[test]
    fn test_serde_tags() {
        let mut rng = GenRng::new(9);
        let level = generate_level(&mut rng, 1, 0);
        let json = serde_json::to_string(&level).unwrap();
        assert!(json.contains("\"generated\"") || json.contains("\"fallback\""));
        let back: LevelDescriptor = serde_json::from_str(&json).unwrap();
        assert_eq!(level, back);
    }

    proptest! {
        #[test]
        fn prop_anomaly_index_in_bounds(seed in any::<u32>(), score in 0u32..120) {
            let level = generate_level(&mut GenRng::new(seed), 1, score);
            prop_assert_eq!(level.shapes.len(), level.total_cells());
            prop_assert!(level.anomaly_index < level.total_cells());
        }

        #[test]
        fn prop_corner_exclusion_early_game(seed in any::<u32>(), score in 0u32..=10) {
            let level = generate_level(&mut GenRng::new(seed), 1, score);
            if level.rule_applied == RuleApplied::Generated {
                prop_assert!(!corners(level.grid_size).contains(&level.anomaly_index));
            }
        }

        #[test]
        fn prop_determinism(seed in any::<u32>(), score in 0u32..120) {
            let a = generate_level(&mut GenRng::new(seed), 2, score);
            let b = generate_level(&mut GenRng::new(seed), 2, score);
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_grid_size_matches_score(seed in any::<u32>(), score in 0u32..200) {
            let level = generate_level(&mut GenRng::new(seed), 1, score);
            prop_assert_eq!(level.grid_size, grid_size_from_score(score));
        }
    }
}
