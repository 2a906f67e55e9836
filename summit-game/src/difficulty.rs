//! Difficulty tiers and the steps-per-meter ratio table.
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::constants::{
    MULTIPLIER_ADVANCED, MULTIPLIER_BEGINNER, MULTIPLIER_EXPERT, MULTIPLIER_EXTREME,
    MULTIPLIER_INTERMEDIATE, RATIO_ADVANCED, RATIO_BEGINNER, RATIO_EXPERT, RATIO_EXTREME,
    RATIO_INTERMEDIATE,
};

/// Difficulty class assigned to a mountain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifficultyTier {
    /// Well-maintained trails, ~15 steps per meter climbed.
    Beginner,
    /// Long non-technical treks, ~25 steps per meter.
    Intermediate,
    /// Glacier travel and steep approaches, ~40 steps per meter.
    Advanced,
    /// Technical alpine or big-wall climbing, ~60 steps per meter.
    Expert,
    /// High-altitude expeditions, ~100 steps per meter.
    Extreme,
}

impl DifficultyTier {
    pub const ALL: [Self; 5] = [
        Self::Beginner,
        Self::Intermediate,
        Self::Advanced,
        Self::Expert,
        Self::Extreme,
    ];

    /// Title-case label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
            Self::Extreme => "Extreme",
        }
    }

    /// Terrain label used in ratio plausibility messages.
    #[must_use]
    pub const fn terrain_label(self) -> &'static str {
        match self {
            Self::Beginner => "easy",
            Self::Intermediate => "moderate",
            Self::Advanced => "difficult",
            Self::Expert => "technical",
            Self::Extreme => "extreme",
        }
    }

    /// Multiplier the app applies on top of raw step counts.
    #[must_use]
    pub const fn difficulty_multiplier(self) -> f64 {
        match self {
            Self::Beginner => MULTIPLIER_BEGINNER,
            Self::Intermediate => MULTIPLIER_INTERMEDIATE,
            Self::Advanced => MULTIPLIER_ADVANCED,
            Self::Expert => MULTIPLIER_EXPERT,
            Self::Extreme => MULTIPLIER_EXTREME,
        }
    }

    /// Case name of the app's `MountainDifficulty` enum.
    ///
    /// The app stops at `expert`, so extreme mountains share that case.
    #[must_use]
    pub const fn swift_case(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert | Self::Extreme => "expert",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors raised when a ratio table is malformed.
#[derive(Debug, Error)]
pub enum RatioConfigError {
    #[error("ratio for {tier} must be a positive finite number (got {value})")]
    InvalidRatio { tier: DifficultyTier, value: f64 },
    #[error("ratio table is not valid JSON")]
    Parse(#[from] serde_json::Error),
}

/// Steps-per-meter ratio for each difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioTable {
    #[serde(default = "RatioTable::default_beginner")]
    pub beginner: f64,
    #[serde(default = "RatioTable::default_intermediate")]
    pub intermediate: f64,
    #[serde(default = "RatioTable::default_advanced")]
    pub advanced: f64,
    #[serde(default = "RatioTable::default_expert")]
    pub expert: f64,
    #[serde(default = "RatioTable::default_extreme")]
    pub extreme: f64,
}

impl RatioTable {
    const fn default_beginner() -> f64 {
        RATIO_BEGINNER
    }

    const fn default_intermediate() -> f64 {
        RATIO_INTERMEDIATE
    }

    const fn default_advanced() -> f64 {
        RATIO_ADVANCED
    }

    const fn default_expert() -> f64 {
        RATIO_EXPERT
    }

    const fn default_extreme() -> f64 {
        RATIO_EXTREME
    }

    /// Parse a ratio table from JSON. Missing tiers keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a ratio is not a positive
    /// finite number.
    pub fn from_json(json: &str) -> Result<Self, RatioConfigError> {
        let table: Self = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Check every ratio is usable as a divisor and a multiplier.
    ///
    /// # Errors
    ///
    /// Returns the first tier whose ratio is zero, negative or non-finite.
    pub fn validate(&self) -> Result<(), RatioConfigError> {
        for tier in DifficultyTier::ALL {
            let value = self.ratio(tier);
            if !value.is_finite() || value <= 0.0 {
                return Err(RatioConfigError::InvalidRatio { tier, value });
            }
        }
        Ok(())
    }

    #[must_use]
    pub const fn ratio(&self, tier: DifficultyTier) -> f64 {
        match tier {
            DifficultyTier::Beginner => self.beginner,
            DifficultyTier::Intermediate => self.intermediate,
            DifficultyTier::Advanced => self.advanced,
            DifficultyTier::Expert => self.expert,
            DifficultyTier::Extreme => self.extreme,
        }
    }
}

impl Default for RatioTable {
    fn default() -> Self {
        Self {
            beginner: Self::default_beginner(),
            intermediate: Self::default_intermediate(),
            advanced: Self::default_advanced(),
            expert: Self::default_expert(),
            extreme: Self::default_extreme(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_ratios_span_tiers() {
        let table = RatioTable::default();
        let ratios: Vec<f64> = DifficultyTier::ALL
            .iter()
            .map(|tier| table.ratio(*tier))
            .collect();
        assert_eq!(ratios, vec![15.0, 25.0, 40.0, 60.0, 100.0]);
        assert!(table.validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let table = RatioTable::from_json(r#"{ "expert": 55.0 }"#).unwrap();
        assert!((table.expert - 55.0).abs() < f64::EPSILON);
        assert!((table.beginner - 15.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rejects_non_positive_ratio() {
        let err = RatioTable::from_json(r#"{ "advanced": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            RatioConfigError::InvalidRatio {
                tier: DifficultyTier::Advanced,
                ..
            }
        ));
        assert!(err.to_string().contains("Advanced"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            RatioTable::from_json("{ nope"),
            Err(RatioConfigError::Parse(_))
        ));
    }

    #[test]
    fn extreme_shares_expert_swift_case() {
        assert_eq!(DifficultyTier::Extreme.swift_case(), "expert");
        assert_eq!(DifficultyTier::Beginner.terrain_label(), "easy");
        assert!((DifficultyTier::Extreme.difficulty_multiplier() - 25.0).abs() < f64::EPSILON);
    }
}
