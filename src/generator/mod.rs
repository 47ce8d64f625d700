//! Deterministic level generation
//!
//! Everything gameplay-visible is produced here. This module must stay pure
//! and deterministic:
//! - Seeded RNG only, owned by the caller and passed by `&mut`
//! - No I/O, no clocks, no platform dependencies
//! - Same seed + same (difficulty, score) => bit-identical level

pub mod anomaly;
pub mod difficulty;
pub mod level;
pub mod pattern;
pub mod rng;
pub mod shape;

pub use anomaly::{apply_anomaly, is_anomaly_visible, AnomalyKind};
pub use difficulty::grid_size_from_score;
pub use level::{generate_level, LevelDescriptor, RuleApplied};
pub use pattern::{build_pattern_grid, pattern_pool, Pattern};
pub use rng::GenRng;
pub use shape::{
    select_base_shape, FillVariant, ShapeCaps, ShapeDescriptor, ShapeFamily, ALL_FAMILIES,
    BASIC_FAMILIES,
};
