//! Shape vocabulary and descriptors
//!
//! The vocabulary is a closed enum plus one capability profile per family.
//! The capability profile is the single source of truth for which attributes
//! the renderer actually shows for a family; both the anomaly mutator and the
//! visibility validator consult it, so they can never disagree about what
//! counts as a perceptible change.

use serde::{Deserialize, Serialize};

use super::pattern::Pattern;
use super::rng::GenRng;
use crate::consts::STROKE_BASE;
use crate::tuning::SCORE_FULL_VOCABULARY;

/// A silhouette kind the renderer can draw in one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeFamily {
    // Basic tier (always unlocked)
    Square,
    Circle,
    Triangle,
    Diamond,
    Rectangle,
    // Advanced tier
    Star,
    Ring,
    Semicircle,
    Horseshoe,
    Octagon,
    Plus,
    Cross,
    Pentagon,
    Hexagon,
    Trapezoid,
    // Complex tier
    Pacman,
    QuarterCircle,
    Arc,
    Zigzag,
    NotchedSquare,
    Dash,
    Line,
    Heart,
    Chevron,
    Crescent,
}

/// What the renderer visibly applies for a family.
///
/// A flagged-off attribute must never be mutated into an anomaly nor credited
/// by the validator; otherwise generation either spins on invisible
/// candidates or ships undetectable levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeCaps {
    /// Rotation changes the drawn silhouette
    pub rotation_visible: bool,
    /// Stroke width changes are drawn
    pub stroke_visible: bool,
    /// Filled vs outline variants render differently
    pub variant_visible: bool,
}

impl ShapeFamily {
    /// Capability profile for this family.
    ///
    /// Exclusions are empirically tuned against the renderer: rotation-
    /// invariant silhouettes (circle, ring), families whose renderer never
    /// applies the attribute (cross, line, dash, zigzag), and near-symmetric
    /// ones where small rotations read as noise (octagon, plus).
    pub const fn caps(self) -> ShapeCaps {
        use ShapeFamily::*;
        ShapeCaps {
            rotation_visible: !matches!(
                self,
                Circle | Ring | Cross | Line | Dash | Zigzag | Octagon | Plus
            ),
            stroke_visible: !matches!(self, Plus | Cross | Ring),
            variant_visible: !matches!(self, Plus | Cross | Ring | Line | Dash | Zigzag),
        }
    }
}

/// Families available from score 0.
pub const BASIC_FAMILIES: [ShapeFamily; 5] = [
    ShapeFamily::Square,
    ShapeFamily::Circle,
    ShapeFamily::Triangle,
    ShapeFamily::Diamond,
    ShapeFamily::Rectangle,
];

/// Families unlocked alongside the basics at the full-vocabulary tier.
pub const ADVANCED_FAMILIES: [ShapeFamily; 10] = [
    ShapeFamily::Star,
    ShapeFamily::Ring,
    ShapeFamily::Semicircle,
    ShapeFamily::Horseshoe,
    ShapeFamily::Octagon,
    ShapeFamily::Plus,
    ShapeFamily::Cross,
    ShapeFamily::Pentagon,
    ShapeFamily::Hexagon,
    ShapeFamily::Trapezoid,
];

/// Highest-tier families, also part of the full vocabulary.
pub const COMPLEX_FAMILIES: [ShapeFamily; 10] = [
    ShapeFamily::Pacman,
    ShapeFamily::QuarterCircle,
    ShapeFamily::Arc,
    ShapeFamily::Zigzag,
    ShapeFamily::NotchedSquare,
    ShapeFamily::Dash,
    ShapeFamily::Line,
    ShapeFamily::Heart,
    ShapeFamily::Chevron,
    ShapeFamily::Crescent,
];

/// Full vocabulary in unlock order (basic, advanced, complex).
pub const ALL_FAMILIES: [ShapeFamily; 25] = [
    ShapeFamily::Square,
    ShapeFamily::Circle,
    ShapeFamily::Triangle,
    ShapeFamily::Diamond,
    ShapeFamily::Rectangle,
    ShapeFamily::Star,
    ShapeFamily::Ring,
    ShapeFamily::Semicircle,
    ShapeFamily::Horseshoe,
    ShapeFamily::Octagon,
    ShapeFamily::Plus,
    ShapeFamily::Cross,
    ShapeFamily::Pentagon,
    ShapeFamily::Hexagon,
    ShapeFamily::Trapezoid,
    ShapeFamily::Pacman,
    ShapeFamily::QuarterCircle,
    ShapeFamily::Arc,
    ShapeFamily::Zigzag,
    ShapeFamily::NotchedSquare,
    ShapeFamily::Dash,
    ShapeFamily::Line,
    ShapeFamily::Heart,
    ShapeFamily::Chevron,
    ShapeFamily::Crescent,
];

/// Filled vs outline rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FillVariant {
    #[default]
    Filled,
    Outline,
}

impl FillVariant {
    /// The other variant.
    pub fn toggled(self) -> Self {
        match self {
            FillVariant::Filled => FillVariant::Outline,
            FillVariant::Outline => FillVariant::Filled,
        }
    }
}

/// The atomic visual unit placed in one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    pub family: ShapeFamily,
    /// Size in device-independent pixels, roughly [16, 52]
    pub size: f32,
    /// Degrees; ignored by families without visible rotation
    pub rotation: f32,
    /// Only meaningful for families with a visible outline
    pub stroke_width: f32,
    pub variant: FillVariant,
    /// Signed displacement from the cell's visual center
    pub offset_x: f32,
    pub offset_y: f32,
    /// Which spatial pattern placed this cell (provenance only)
    pub pattern: Pattern,
}

impl ShapeDescriptor {
    /// A baseline cell for `family`: default rotation/stroke/variant, no offset.
    pub fn baseline(family: ShapeFamily, size: f32, pattern: Pattern) -> Self {
        Self {
            family,
            size,
            rotation: 0.0,
            stroke_width: STROKE_BASE,
            variant: FillVariant::Filled,
            offset_x: 0.0,
            offset_y: 0.0,
            pattern,
        }
    }

    /// Structural equality under the single-difference invariant: family and
    /// variant exact, numeric fields within one unit. The pattern provenance
    /// tag is informational and ignored.
    pub fn approx_eq(&self, other: &Self) -> bool {
        self.family == other.family
            && self.variant == other.variant
            && (self.size - other.size).abs() < 1.0
            && (self.rotation - other.rotation).abs() < 1.0
            && (self.stroke_width - other.stroke_width).abs() < 1.0
            && (self.offset_x - other.offset_x).abs() < 1.0
            && (self.offset_y - other.offset_y).abs() < 1.0
    }
}

/// Pick the base shape for a level.
///
/// Below the full-vocabulary score the pick is uniform over the five basic
/// families; from there on it is uniform over all 25. Baseline size is an
/// integer in [26, 40) so cells stay readable at every grid dimension.
pub fn select_base_shape(rng: &mut GenRng, score: u32) -> ShapeDescriptor {
    let family = if score >= SCORE_FULL_VOCABULARY {
        ALL_FAMILIES[rng.index(ALL_FAMILIES.len())]
    } else {
        BASIC_FAMILIES[rng.index(BASIC_FAMILIES.len())]
    };
    let size = 26.0 + rng.index(14) as f32;
    ShapeDescriptor::baseline(family, size, Pattern::Uniform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_caps_exclusions() {
        assert!(!ShapeFamily::Circle.caps().rotation_visible);
        assert!(!ShapeFamily::Ring.caps().stroke_visible);
        assert!(!ShapeFamily::Zigzag.caps().variant_visible);
        assert!(ShapeFamily::Zigzag.caps().stroke_visible);
        let caps = ShapeFamily::Square.caps();
        assert!(caps.rotation_visible && caps.stroke_visible && caps.variant_visible);
    }

    #[test]
    fn test_vocabulary_tiers_are_disjoint_and_complete() {
        for f in ALL_FAMILIES {
            let tiers = [
                BASIC_FAMILIES.contains(&f),
                ADVANCED_FAMILIES.contains(&f),
                COMPLEX_FAMILIES.contains(&f),
            ];
            assert_eq!(tiers.iter().filter(|t| **t).count(), 1, "{f:?}");
        }
        assert_eq!(ALL_FAMILIES.len(), 25);
    }

    #[test]
    fn test_base_shape_low_score_stays_basic() {
        let mut rng = GenRng::new(123);
        for _ in 0..200 {
            let shape = select_base_shape(&mut rng, 24);
            assert!(BASIC_FAMILIES.contains(&shape.family));
        }
    }

    #[test]
    fn test_base_shape_full_vocab_reaches_complex() {
        let mut rng = GenRng::new(123);
        let mut saw_non_basic = false;
        for _ in 0..200 {
            let shape = select_base_shape(&mut rng, 25);
            if !BASIC_FAMILIES.contains(&shape.family) {
                saw_non_basic = true;
            }
        }
        assert!(saw_non_basic);
    }

    #[test]
    fn test_base_shape_defaults() {
        let mut rng = GenRng::new(5);
        for _ in 0..100 {
            let shape = select_base_shape(&mut rng, 0);
            assert!((26.0..40.0).contains(&shape.size));
            assert_eq!(shape.size.fract(), 0.0);
            assert_eq!(shape.rotation, 0.0);
            assert_eq!(shape.stroke_width, 2.0);
            assert_eq!(shape.variant, FillVariant::Filled);
        }
    }

    #[test]
    fn test_approx_eq_tolerance() {
        let a = ShapeDescriptor::baseline(ShapeFamily::Square, 28.0, Pattern::Uniform);
        let mut b = a;
        b.size = 28.9;
        assert!(a.approx_eq(&b));
        b.size = 29.1;
        assert!(!a.approx_eq(&b));
        let mut c = a;
        c.variant = FillVariant::Outline;
        assert!(!a.approx_eq(&c));
        let mut d = a;
        d.pattern = Pattern::Checker;
        assert!(a.approx_eq(&d));
    }
}
