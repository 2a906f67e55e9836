//! SummitAI balance data
//!
//! Mountain records, difficulty ratios and descriptive catalog for the
//! SummitAI step-climbing game, together with the consistency checks and the
//! recalibration that keeps step counts proportional to elevation gain.
//! This crate performs no I/O; rendering and file output live in the tools.

pub mod catalog;
pub mod constants;
pub mod dataset;
pub mod difficulty;
pub mod fixer;
pub mod mountain;
pub mod numbers;
pub mod validation;

// Re-export commonly used types
pub use catalog::{
    ClimbingSeason, DEFAULT_PROFILE, Equipment, Hazard, MountainProfile, WeatherPattern,
    profile_or_default,
};
pub use dataset::{DatasetId, calibrated_mountains, legacy_mountains};
pub use difficulty::{DifficultyTier, RatioConfigError, RatioTable};
pub use fixer::{ElevationModelFixer, MountainFix, fixed_records};
pub use mountain::{CampCheckpoint, CampList, MountainRecord};
pub use validation::{
    CheckCategory, ElevationModelValidator, RatioExpectation, TestResult, ValidationReport,
};
