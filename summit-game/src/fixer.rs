//! Recalibration of mountain step and elevation requirements.
//!
//! Each mountain's step counts are rederived from its elevation deltas using
//! the steps-per-meter ratio of its difficulty tier, so the corrected records
//! satisfy the validator's progression, elevation and summit checks by
//! construction.
use serde::Serialize;

use crate::catalog;
use crate::difficulty::{DifficultyTier, RatioTable};
use crate::mountain::{CampCheckpoint, MountainRecord};
use crate::numbers::round_f64_to_u32;

/// A mountain before and after recalibration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountainFix {
    pub tier: DifficultyTier,
    pub step_ratio: f64,
    pub original: MountainRecord,
    pub fixed: MountainRecord,
}

impl MountainFix {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.fixed.name
    }

    /// Signed change of the base step count, in percent of the original.
    #[must_use]
    pub fn base_steps_change_pct(&self) -> f64 {
        let before = f64::from(self.original.base_steps);
        if before == 0.0 {
            return 0.0;
        }
        (f64::from(self.fixed.base_steps) - before) / before * 100.0
    }

    /// Original checkpoint paired with its corrected counterpart.
    pub fn camp_pairs(&self) -> impl Iterator<Item = (&CampCheckpoint, &CampCheckpoint)> {
        self.original.camps.iter().zip(self.fixed.camps.iter())
    }
}

#[derive(Debug, Clone, Default)]
pub struct ElevationModelFixer {
    ratios: RatioTable,
}

impl ElevationModelFixer {
    #[must_use]
    pub const fn new(ratios: RatioTable) -> Self {
        Self { ratios }
    }

    #[must_use]
    pub const fn ratios(&self) -> &RatioTable {
        &self.ratios
    }

    /// Recalibrate every mountain using its catalog difficulty tier.
    #[must_use]
    pub fn fix_all(&self, mountains: &[MountainRecord]) -> Vec<MountainFix> {
        mountains
            .iter()
            .map(|mountain| {
                let tier = catalog::profile_or_default(&mountain.name).difficulty;
                self.fix_mountain(mountain, tier)
            })
            .collect()
    }

    /// Recalibrate a single mountain for an explicit tier.
    #[must_use]
    pub fn fix_mountain(&self, mountain: &MountainRecord, tier: DifficultyTier) -> MountainFix {
        let step_ratio = self.ratios.ratio(tier);
        let camps = mountain.camps.iter().enumerate().map(|(index, camp)| {
            if index == 0 {
                return CampCheckpoint {
                    steps: 0,
                    elevation: 0,
                    ..camp.clone()
                };
            }
            let elevation = camp.altitude - mountain.base_elevation_start;
            CampCheckpoint {
                steps: round_f64_to_u32(f64::from(elevation) * step_ratio),
                elevation,
                ..camp.clone()
            }
        });
        let fixed = MountainRecord {
            base_steps: round_f64_to_u32(f64::from(mountain.total_elevation_gain) * step_ratio),
            camps: camps.collect(),
            ..mountain.clone()
        };
        log::debug!(
            "{}: {} -> {} base steps at {step_ratio} steps/m",
            mountain.name,
            mountain.base_steps,
            fixed.base_steps
        );
        MountainFix {
            tier,
            step_ratio,
            original: mountain.clone(),
            fixed,
        }
    }
}

/// Corrected records from a set of fixes.
#[must_use]
pub fn fixed_records(fixes: &[MountainFix]) -> Vec<MountainRecord> {
    fixes.iter().map(|fix| fix.fixed.clone()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{calibrated_mountains, legacy_mountains};

    #[test]
    fn legacy_table_recalibrates_to_calibrated_table() {
        let fixer = ElevationModelFixer::default();
        let fixes = fixer.fix_all(&legacy_mountains());
        assert_eq!(fixed_records(&fixes), calibrated_mountains());
    }

    #[test]
    fn base_camp_is_zeroed() {
        let mut mountain = legacy_mountains().remove(0);
        mountain.camps[0].steps = 40;
        mountain.camps[0].elevation = 12;
        let fix = ElevationModelFixer::default().fix_mountain(&mountain, DifficultyTier::Beginner);
        assert_eq!(fix.fixed.camps[0].steps, 0);
        assert_eq!(fix.fixed.camps[0].elevation, 0);
        assert_eq!(fix.fixed.camps[0].altitude, mountain.camps[0].altitude);
    }

    #[test]
    fn change_percentage_is_signed() {
        let fixes = ElevationModelFixer::default().fix_all(&legacy_mountains());
        let kilimanjaro = &fixes[0];
        assert_eq!(kilimanjaro.fixed.base_steps, 101_675);
        assert!(kilimanjaro.base_steps_change_pct() < 0.0);
        let fuji = fixes.iter().find(|f| f.name() == "Mount Fuji").unwrap();
        assert!(fuji.base_steps_change_pct() > 0.0);
    }

    #[test]
    fn zero_original_steps_yield_zero_change() {
        let mut mountain = legacy_mountains().remove(2);
        mountain.base_steps = 0;
        let fix = ElevationModelFixer::default().fix_mountain(&mountain, DifficultyTier::Beginner);
        assert!(fix.base_steps_change_pct().abs() < f64::EPSILON);
    }

    #[test]
    fn unknown_mountain_uses_intermediate_ratio() {
        let mountain = MountainRecord::new(
            "Mount Nowhere",
            1100,
            100,
            1000,
            1,
            [
                CampCheckpoint::new("Base", 100, 0, 0),
                CampCheckpoint::new("Summit", 1100, 1, 1000),
            ],
        );
        let fixes = ElevationModelFixer::default().fix_all(&[mountain]);
        assert_eq!(fixes[0].tier, DifficultyTier::Intermediate);
        assert_eq!(fixes[0].fixed.base_steps, 25_000);
    }

    #[test]
    fn custom_ratios_flow_through() {
        let ratios = RatioTable {
            beginner: 20.0,
            ..RatioTable::default()
        };
        let fuji = legacy_mountains().remove(2);
        let fix = ElevationModelFixer::new(ratios).fix_mountain(&fuji, DifficultyTier::Beginner);
        assert_eq!(fix.fixed.base_steps, 1471 * 20);
        assert!((fix.step_ratio - 20.0).abs() < f64::EPSILON);
    }
}
