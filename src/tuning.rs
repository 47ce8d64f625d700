//! Data-driven game balance
//!
//! Empirically tuned constants for fairness: unlock tiers, perceptual
//! thresholds, and mutation magnitudes. These were dialed in by playtesting,
//! not derived from a model; treat them as configuration data. The mutator
//! draws its magnitudes from the same tables the validator checks against, so
//! changing a value here moves both sides in lock-step.

use crate::generator::shape::ShapeFamily;

/// Score at which the full 25-family vocabulary (and wider secondary pools)
/// unlocks; below it only the basic tier appears.
pub const SCORE_FULL_VOCABULARY: u32 = 25;

/// Through this score the anomaly never lands on a corner cell.
pub const SCORE_CORNER_EXCLUSION_MAX: u32 = 10;

/// From this score the offset anomaly uses its wider displacement band.
pub const SCORE_WIDE_OFFSET: u32 = 75;

/// Minimum rotation delta (degrees) that reads as an anomaly.
pub const ROTATION_MIN_DEG: f32 = 18.0;

/// Minimum per-axis offset (px) that reads as an anomaly.
pub const OFFSET_MIN_PX: f32 = 10.0;

/// Minimum relative size delta for a family.
///
/// Bar-like silhouettes (plus, cross) and near-round ones (octagon, ring)
/// change less per unit of scale, so they need a wider margin.
pub fn size_threshold(family: ShapeFamily) -> f32 {
    match family {
        ShapeFamily::Plus | ShapeFamily::Cross => 0.35,
        ShapeFamily::Octagon => 0.32,
        ShapeFamily::Ring => 0.30,
        _ => 0.28,
    }
}

/// Minimum stroke-width delta (px) for a family with a visible stroke.
pub fn stroke_min(family: ShapeFamily) -> f32 {
    match family {
        // Zigzag strokes are thin and busy; small deltas vanish
        ShapeFamily::Zigzag => 3.0,
        _ => 2.0,
    }
}
