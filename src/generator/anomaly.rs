//! Anomaly mutation and visibility validation
//!
//! The mutator perturbs exactly one semantic dimension of a cell; the
//! validator independently checks that the perturbation crosses the minimum
//! perceptual threshold for that attribute and family. Both sides read the
//! same capability profile ([`ShapeFamily::caps`]) and the same tuning
//! tables, so a candidate the mutator can produce is one the validator can
//! credit. Magnitudes are drawn with margin above the thresholds; clamping at
//! the size/stroke bounds can still push a candidate under threshold, which
//! is what the assembler's retry loop absorbs.

use serde::{Deserialize, Serialize};

use super::rng::GenRng;
use super::shape::{FillVariant, ShapeDescriptor, ShapeFamily};
use crate::consts::{SIZE_MAX, SIZE_MIN, STROKE_MAX};
use crate::tuning::{
    size_threshold, stroke_min, OFFSET_MIN_PX, ROTATION_MIN_DEG, SCORE_WIDE_OFFSET,
};

/// The single semantic dimension an anomaly perturbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnomalyKind {
    WrongShape,
    WrongRotation,
    WrongSize,
    WrongStrokeWidth,
    FilledVsOutline,
    OffsetPosition,
}

const ALL_KINDS: [AnomalyKind; 6] = [
    AnomalyKind::WrongShape,
    AnomalyKind::WrongRotation,
    AnomalyKind::WrongSize,
    AnomalyKind::WrongStrokeWidth,
    AnomalyKind::FilledVsOutline,
    AnomalyKind::OffsetPosition,
];

/// Replacement families for the wrong-shape anomaly.
const WRONG_SHAPE_POOL: [ShapeFamily; 20] = [
    ShapeFamily::Square,
    ShapeFamily::Circle,
    ShapeFamily::Triangle,
    ShapeFamily::Diamond,
    ShapeFamily::Rectangle,
    ShapeFamily::Star,
    ShapeFamily::Ring,
    ShapeFamily::Semicircle,
    ShapeFamily::Plus,
    ShapeFamily::Cross,
    ShapeFamily::Octagon,
    ShapeFamily::Pentagon,
    ShapeFamily::Hexagon,
    ShapeFamily::Trapezoid,
    ShapeFamily::NotchedSquare,
    ShapeFamily::Chevron,
    ShapeFamily::Crescent,
    ShapeFamily::Heart,
    ShapeFamily::Arc,
    ShapeFamily::Pacman,
];

/// Anomaly kinds the renderer can actually show for this family.
fn eligible_kinds(family: ShapeFamily) -> Vec<AnomalyKind> {
    let caps = family.caps();
    ALL_KINDS
        .into_iter()
        .filter(|kind| match kind {
            AnomalyKind::WrongRotation => caps.rotation_visible,
            AnomalyKind::WrongStrokeWidth => caps.stroke_visible,
            AnomalyKind::FilledVsOutline => caps.variant_visible,
            _ => true,
        })
        .collect()
}

/// Mutate one cell into an anomaly candidate.
///
/// Picks one eligible kind uniformly and perturbs that dimension with enough
/// margin to clear the validator's threshold in the common case.
pub fn apply_anomaly(rng: &mut GenRng, base: &ShapeDescriptor, score: u32) -> ShapeDescriptor {
    let kinds = eligible_kinds(base.family);
    let kind = kinds[rng.index(kinds.len())];
    let mut anomaly = *base;

    match kind {
        AnomalyKind::WrongShape => {
            loop {
                anomaly.family = WRONG_SHAPE_POOL[rng.index(WRONG_SHAPE_POOL.len())];
                if anomaly.family != base.family {
                    break;
                }
            }
        }
        AnomalyKind::WrongRotation => {
            // 18-35 whole degrees; never a clean symmetry multiple
            anomaly.rotation = base.rotation + ROTATION_MIN_DEG + rng.index(18) as f32;
        }
        AnomalyKind::WrongSize => {
            // Bars (plus, cross) change less per unit of scale and get
            // wider factor bands
            let heavy = matches!(base.family, ShapeFamily::Plus | ShapeFamily::Cross);
            let grow = rng.coin();
            let factor = match (heavy, grow) {
                (true, true) => rng.range_f32(1.4, 1.7),
                (true, false) => rng.range_f32(0.45, 0.6),
                (false, true) => rng.range_f32(1.3, 1.6),
                (false, false) => rng.range_f32(0.5, 0.7),
            };
            anomaly.size = (base.size * factor).clamp(SIZE_MIN, SIZE_MAX);
        }
        AnomalyKind::WrongStrokeWidth => {
            // Outline mode makes the stroke visible at all, where supported
            if base.family.caps().variant_visible {
                anomaly.variant = FillVariant::Outline;
            }
            let bump = if rng.coin() { 3.0 } else { 2.0 };
            anomaly.stroke_width = (base.stroke_width + bump).clamp(2.0, STROKE_MAX);
        }
        AnomalyKind::FilledVsOutline => {
            anomaly.variant = base.variant.toggled();
        }
        AnomalyKind::OffsetPosition => {
            // Noticeable but still inside the cell
            let floor = if score >= SCORE_WIDE_OFFSET { 14.0 } else { 10.0 };
            let delta = floor + rng.next_f32() * 8.0;
            let sign_x = if rng.coin() { 1.0 } else { -1.0 };
            let sign_y = if rng.coin() { 1.0 } else { -1.0 };
            anomaly.offset_x = (delta * sign_x).round();
            anomaly.offset_y = (delta * sign_y).round();
        }
    }

    anomaly
}

/// Does the candidate read as an anomaly next to the base cell?
///
/// Rules fire in order; any single hit accepts. Attributes the family's
/// renderer does not show are never credited. Pure function of its inputs.
pub fn is_anomaly_visible(base: &ShapeDescriptor, candidate: &ShapeDescriptor) -> bool {
    let caps = base.family.caps();

    let size_diff = (candidate.size - base.size).abs() / base.size.max(1.0);
    if size_diff >= size_threshold(base.family) {
        return true;
    }

    let rot_diff = (candidate.rotation - base.rotation).abs();
    if caps.rotation_visible && rot_diff >= ROTATION_MIN_DEG {
        return true;
    }

    if caps.stroke_visible {
        let stroke_diff = (candidate.stroke_width - base.stroke_width).abs();
        if stroke_diff >= stroke_min(base.family) {
            return true;
        }
    }

    if caps.variant_visible && candidate.variant != base.variant {
        return true;
    }

    if candidate.family != base.family {
        return true;
    }

    candidate.offset_x.abs() >= OFFSET_MIN_PX || candidate.offset_y.abs() >= OFFSET_MIN_PX
}
