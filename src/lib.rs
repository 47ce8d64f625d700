//! Anomaly Grid - seeded level generator for a spot-the-anomaly puzzle game
//!
//! Core modules:
//! - `generator`: Deterministic level generation (RNG, difficulty, pattern grids, anomaly)
//! - `tuning`: Data-driven balance (visibility thresholds, unlock tiers)
//!
//! The generator is pure and deterministic: it consumes a caller-owned
//! [`generator::GenRng`] stream plus the running score, and returns an immutable
//! [`generator::LevelDescriptor`]. Rendering shapes to pixels, touch hit testing,
//! audio, and persistence all live outside this crate and only consume the
//! returned descriptor.

pub mod generator;
pub mod tuning;

pub use generator::{
    generate_level, FillVariant, GenRng, LevelDescriptor, Pattern, RuleApplied, ShapeDescriptor,
    ShapeFamily,
};

/// Generation constants
pub mod consts {
    /// Smallest shape size the mutator may produce (device-independent px)
    pub const SIZE_MIN: f32 = 16.0;
    /// Largest shape size the mutator may produce
    pub const SIZE_MAX: f32 = 52.0;
    /// Baseline size for pattern-grid cells
    pub const CELL_SIZE: f32 = 28.0;
    /// Default stroke width
    pub const STROKE_BASE: f32 = 2.0;
    /// Stroke width cap after mutation
    pub const STROKE_MAX: f32 = 8.0;

    /// Smallest grid dimension (3x3)
    pub const GRID_MIN: usize = 3;
    /// Largest grid dimension (8x8 cap)
    pub const GRID_MAX: usize = 8;

    /// Bounded retries before the assembler substitutes the fallback level
    pub const MAX_ATTEMPTS: u32 = 12;
}
