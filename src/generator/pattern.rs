//! Spatial pattern grid builder
//!
//! Lays the base shape (and up to two secondary families) across the grid so
//! the backdrop is non-uniform but internally consistent. Every placement
//! rule is a pure function of (row, col, grid_size); mirror and rotational
//! patterns copy already-computed source cells so the symmetry is exact.

use serde::{Deserialize, Serialize};

use super::rng::GenRng;
use super::shape::{ShapeDescriptor, ShapeFamily};
use crate::consts::CELL_SIZE;
use crate::tuning::SCORE_FULL_VOCABULARY;

/// A deterministic rule assigning one of up to three shape descriptors to
/// each grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pattern {
    Uniform,
    Checker,
    RowAlt,
    ColAlt,
    StripesH,
    StripesV,
    Triad,
    Diagonal,
    Border,
    Quadrants,
    XPattern,
    Concentric,
    Spiral,
    Diamonds,
    MirrorH,
    MirrorV,
    SymmetryBreak,
    RotationSymmetry,
}

/// Patterns available at `score`, in unlock order.
///
/// The pool only ever grows with score; the order is load-bearing for
/// reproducibility since the builder indexes into it with a single draw.
pub fn pattern_pool(score: u32) -> Vec<Pattern> {
    let mut pool = vec![Pattern::Uniform];
    if score >= 15 {
        pool.extend([Pattern::Checker, Pattern::RowAlt, Pattern::ColAlt]);
    }
    if score >= 25 {
        pool.extend([
            Pattern::Diagonal,
            Pattern::Border,
            Pattern::Quadrants,
            Pattern::XPattern,
        ]);
    }
    if score >= 50 {
        pool.extend([Pattern::Spiral, Pattern::Concentric, Pattern::Diamonds]);
    }
    if score >= 75 {
        pool.extend([
            Pattern::MirrorH,
            Pattern::MirrorV,
            Pattern::SymmetryBreak,
            Pattern::RotationSymmetry,
        ]);
    }
    if score >= 50 {
        pool.extend([Pattern::StripesH, Pattern::StripesV]);
    }
    if score >= 75 {
        pool.push(Pattern::Triad);
    }
    pool
}

/// Secondary families always eligible as pattern accents.
const SECONDARY_POOL: [ShapeFamily; 13] = [
    ShapeFamily::Square,
    ShapeFamily::Circle,
    ShapeFamily::Triangle,
    ShapeFamily::Diamond,
    ShapeFamily::Rectangle,
    ShapeFamily::Semicircle,
    ShapeFamily::QuarterCircle,
    ShapeFamily::Ring,
    ShapeFamily::Plus,
    ShapeFamily::Cross,
    ShapeFamily::Pentagon,
    ShapeFamily::Hexagon,
    ShapeFamily::Trapezoid,
];

/// Extra secondaries once the full vocabulary is unlocked.
const SECONDARY_EXTENDED_POOL: [ShapeFamily; 11] = [
    ShapeFamily::Pacman,
    ShapeFamily::Arc,
    ShapeFamily::Zigzag,
    ShapeFamily::NotchedSquare,
    ShapeFamily::Dash,
    ShapeFamily::Line,
    ShapeFamily::Heart,
    ShapeFamily::Chevron,
    ShapeFamily::Crescent,
    ShapeFamily::Octagon,
    ShapeFamily::Star,
];

/// Draw a secondary family distinct from the base.
fn pick_secondary(rng: &mut GenRng, score: u32, base_family: ShapeFamily) -> ShapeFamily {
    loop {
        let family = if score >= SCORE_FULL_VOCABULARY {
            let n = SECONDARY_POOL.len() + SECONDARY_EXTENDED_POOL.len();
            let i = rng.index(n);
            if i < SECONDARY_POOL.len() {
                SECONDARY_POOL[i]
            } else {
                SECONDARY_EXTENDED_POOL[i - SECONDARY_POOL.len()]
            }
        } else {
            SECONDARY_POOL[rng.index(SECONDARY_POOL.len())]
        };
        if family != base_family {
            return family;
        }
    }
}

/// Build the patterned backdrop for one level: pick a pattern from the
/// score-gated pool, then fill `grid_size * grid_size` cells.
pub fn build_pattern_grid(
    rng: &mut GenRng,
    grid_size: usize,
    score: u32,
    base_family: ShapeFamily,
) -> Vec<ShapeDescriptor> {
    let pool = pattern_pool(score);
    let pattern = pool[rng.index(pool.len())];
    fill_grid(rng, grid_size, score, base_family, pattern)
}

/// Fill the grid for a known pattern. Split from [`build_pattern_grid`] so
/// tests can exercise individual placement rules.
pub(crate) fn fill_grid(
    rng: &mut GenRng,
    grid_size: usize,
    score: u32,
    base_family: ShapeFamily,
    pattern: Pattern,
) -> Vec<ShapeDescriptor> {
    let total = grid_size * grid_size;

    let base = ShapeDescriptor::baseline(base_family, CELL_SIZE, pattern);
    // Both secondaries are drawn up front, whether or not the pattern uses
    // them, to keep the stream layout identical across patterns.
    let second = ShapeDescriptor {
        family: pick_secondary(rng, score, base_family),
        ..base
    };
    let third = ShapeDescriptor {
        family: pick_secondary(rng, score, base_family),
        ..base
    };

    let center = grid_size / 2;
    let mut shapes: Vec<Option<ShapeDescriptor>> = vec![None; total];

    for i in 0..total {
        let row = i / grid_size;
        let col = i % grid_size;
        // Any referenced source cell that is somehow uncomputed falls back
        // to the base descriptor
        let copied = |shapes: &[Option<ShapeDescriptor>], src: usize| shapes[src].unwrap_or(base);

        let cell = match pattern {
            Pattern::Uniform => base,
            Pattern::Checker => {
                if (row + col) % 2 == 0 {
                    base
                } else {
                    second
                }
            }
            Pattern::RowAlt => {
                if row % 2 == 0 {
                    base
                } else {
                    second
                }
            }
            Pattern::ColAlt => {
                if col % 2 == 0 {
                    base
                } else {
                    second
                }
            }
            Pattern::StripesH => {
                if row % 2 == 0 {
                    // Horizontal bars punctuate alternating rows
                    ShapeDescriptor {
                        family: ShapeFamily::Line,
                        size: 34.0,
                        stroke_width: 6.0,
                        ..base
                    }
                } else {
                    base
                }
            }
            Pattern::StripesV => {
                if col % 2 == 0 {
                    // Vertical bars on alternating columns
                    ShapeDescriptor {
                        family: ShapeFamily::Dash,
                        size: 34.0,
                        stroke_width: 6.0,
                        ..base
                    }
                } else {
                    base
                }
            }
            Pattern::Triad => match (row + col) % 3 {
                0 => base,
                1 => second,
                _ => third,
            },
            Pattern::Diagonal => {
                // Alternates along NW-SE diagonals
                if row.abs_diff(col) % 2 == 0 {
                    base
                } else {
                    second
                }
            }
            Pattern::Border => {
                let edge = row == 0 || row == grid_size - 1 || col == 0 || col == grid_size - 1;
                if edge {
                    second
                } else {
                    base
                }
            }
            Pattern::Quadrants => {
                let top = 2 * row < grid_size;
                let left = 2 * col < grid_size;
                match (top, left) {
                    (true, true) => base,
                    (true, false) => second,
                    (false, true) => third,
                    (false, false) => second,
                }
            }
            Pattern::XPattern => {
                let on_x = row == col || row + col == grid_size - 1;
                if on_x {
                    second
                } else {
                    base
                }
            }
            Pattern::Concentric => {
                // Chebyshev distance from the border defines rings
                let ring = row.min(col).min(grid_size - 1 - row).min(grid_size - 1 - col);
                if ring % 2 == 0 {
                    base
                } else {
                    second
                }
            }
            Pattern::Spiral => {
                // Spiral approximation: ring distance plus a diagonal toggle
                let ring = row.min(col).min(grid_size - 1 - row).min(grid_size - 1 - col);
                let parity = (ring + if row <= col { 0 } else { 1 }) % 2;
                if parity == 0 {
                    base
                } else {
                    second
                }
            }
            Pattern::Diamonds => {
                // Manhattan distance from the center cell
                let d = row.abs_diff(center) + col.abs_diff(center);
                if d % 2 == 0 {
                    base
                } else {
                    second
                }
            }
            Pattern::MirrorH => {
                if 2 * col < grid_size {
                    base
                } else {
                    copied(&shapes, row * grid_size + (grid_size - 1 - col))
                }
            }
            Pattern::MirrorV => {
                if 2 * row < grid_size {
                    base
                } else {
                    copied(&shapes, (grid_size - 1 - row) * grid_size + col)
                }
            }
            Pattern::SymmetryBreak => {
                // Checkered left half mirrored to the right; the anomaly
                // mutation later breaks the symmetry
                if 2 * col < grid_size {
                    if (row + col) % 2 == 0 {
                        base
                    } else {
                        second
                    }
                } else {
                    copied(&shapes, row * grid_size + (grid_size - 1 - col))
                }
            }
            Pattern::RotationSymmetry => {
                // 180-degree rotational symmetry about the grid center
                let src = (grid_size - 1 - row) * grid_size + (grid_size - 1 - col);
                if i <= src {
                    if (row + col) % 2 == 0 {
                        base
                    } else {
                        second
                    }
                } else {
                    copied(&shapes, src)
                }
            }
        };

        shapes[i] = Some(cell);
    }

    shapes.into_iter().map(|s| s.unwrap_or(base)).collect()
}
