//! Centralized balance and validation constants for SummitAI mountain data.
//!
//! Values here define the deterministic math behind both the validator and
//! the fixer, so a balance change is always a reviewed code change.

// HealthKit conversion -----------------------------------------------------
pub const FEET_PER_FLIGHT: f64 = 10.0;
pub const METERS_PER_FOOT: f64 = 0.3048;
pub const METERS_PER_FLIGHT: f64 = FEET_PER_FLIGHT * METERS_PER_FOOT;

/// Reference cases for the flights-to-meters conversion check.
pub const CONVERSION_REFERENCE_CASES: [(u32, f64); 4] =
    [(1, 3.048), (10, 30.48), (100, 304.8), (1000, 3048.0)];

// Tolerances (percent) -----------------------------------------------------
pub const CONVERSION_TOLERANCE_PCT: f64 = 0.01;
pub const RATIO_TOLERANCE_PCT: f64 = 50.0;
pub const ELEVATION_GAIN_TOLERANCE_PCT: f64 = 1.0;
pub const CAMP_ELEVATION_TOLERANCE_PCT: f64 = 5.0;

/// Denominator floor, in meters, for elevation error percentages.
pub const ELEVATION_ERROR_FLOOR_M: f64 = 1.0;

// Steps-per-meter ratios by difficulty tier ---------------------------------
pub const RATIO_BEGINNER: f64 = 15.0;
pub const RATIO_INTERMEDIATE: f64 = 25.0;
pub const RATIO_ADVANCED: f64 = 40.0;
pub const RATIO_EXPERT: f64 = 60.0;
pub const RATIO_EXTREME: f64 = 100.0;

// In-app difficulty multipliers --------------------------------------------
pub const MULTIPLIER_BEGINNER: f64 = 3.0;
pub const MULTIPLIER_INTERMEDIATE: f64 = 8.0;
pub const MULTIPLIER_ADVANCED: f64 = 12.0;
pub const MULTIPLIER_EXPERT: f64 = 15.0;
pub const MULTIPLIER_EXTREME: f64 = 25.0;

// Daily progress realism ---------------------------------------------------
/// `(steps, meters climbed)` for a light, moderate, active and intense day.
pub const DAILY_PROGRESS_CASES: [(u32, u32); 4] =
    [(5_000, 50), (10_000, 200), (15_000, 500), (20_000, 800)];
pub const DAILY_EXPECTED_STEPS_PER_METER: f64 = 25.0;
pub const DAILY_MIN_STEPS_PER_METER: f64 = 10.0;
pub const DAILY_MAX_STEPS_PER_METER: f64 = 100.0;
