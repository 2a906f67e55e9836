//! Embedded mountain balance tables.
//!
//! `legacy` holds the values the app shipped before recalibration; the
//! `calibrated` table is the ratio-consistent reference the validator runs
//! against by default.
use serde::{Deserialize, Serialize};

use crate::mountain::{CampCheckpoint, MountainRecord};

/// Identifies one of the embedded datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetId {
    Calibrated,
    Legacy,
}

impl DatasetId {
    #[must_use]
    pub fn records(self) -> Vec<MountainRecord> {
        match self {
            Self::Calibrated => calibrated_mountains(),
            Self::Legacy => legacy_mountains(),
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Calibrated => "calibrated",
            Self::Legacy => "legacy",
        }
    }
}

/// Ratio-consistent mountain table.
#[must_use]
pub fn calibrated_mountains() -> Vec<MountainRecord> {
    vec![
        MountainRecord::new(
            "Mount Kilimanjaro",
            5895,
            1828,
            4067,
            101_675,
            [
                CampCheckpoint::new("Base Camp", 1828, 0, 0),
                CampCheckpoint::new("Camp 1 - Mandara", 2700, 21_800, 872),
                CampCheckpoint::new("Camp 2 - Horombo", 3720, 47_300, 1892),
                CampCheckpoint::new("Camp 3 - Kibo", 4700, 71_800, 2872),
                CampCheckpoint::new("Uhuru Peak", 5895, 101_675, 4067),
            ],
        ),
        MountainRecord::new(
            "Mount Everest",
            8848,
            5364,
            3484,
            348_400,
            [
                CampCheckpoint::new("Base Camp", 5364, 0, 0),
                CampCheckpoint::new("Camp 1", 6065, 70_100, 701),
                CampCheckpoint::new("Camp 2", 6400, 103_600, 1036),
                CampCheckpoint::new("Camp 3", 7200, 183_600, 1836),
                CampCheckpoint::new("Camp 4", 8000, 263_600, 2636),
                CampCheckpoint::new("Summit", 8848, 348_400, 3484),
            ],
        ),
        MountainRecord::new(
            "Mount Fuji",
            3776,
            2305,
            1471,
            22_065,
            [
                CampCheckpoint::new("Base Camp", 2305, 0, 0),
                CampCheckpoint::new("Station 5", 2390, 1275, 85),
                CampCheckpoint::new("Station 8", 3100, 11_925, 795),
                CampCheckpoint::new("Summit", 3776, 22_065, 1471),
            ],
        ),
        MountainRecord::new(
            "Mount Rainier",
            4392,
            1500,
            2892,
            115_680,
            [
                CampCheckpoint::new("Base Camp", 1500, 0, 0),
                CampCheckpoint::new("Camp Muir", 3000, 60_000, 1500),
                CampCheckpoint::new("Summit", 4392, 115_680, 2892),
            ],
        ),
        MountainRecord::new(
            "Mont Blanc",
            4808,
            1000,
            3808,
            228_480,
            [
                CampCheckpoint::new("Base Camp", 1000, 0, 0),
                CampCheckpoint::new("Refuge du Goûter", 3000, 120_000, 2000),
                CampCheckpoint::new("Summit", 4808, 228_480, 3808),
            ],
        ),
        MountainRecord::new(
            "El Capitan",
            2121,
            1207,
            914,
            54_840,
            [
                CampCheckpoint::new("Base", 1207, 0, 0),
                CampCheckpoint::new("Pitch 10", 1400, 11_580, 193),
                CampCheckpoint::new("Pitch 20", 1600, 23_580, 393),
                CampCheckpoint::new("Pitch 30", 1800, 35_580, 593),
                CampCheckpoint::new("Summit", 2121, 54_840, 914),
            ],
        ),
    ]
}

/// Pre-recalibration mountain table as shipped in the app.
#[must_use]
pub fn legacy_mountains() -> Vec<MountainRecord> {
    vec![
        MountainRecord::new(
            "Mount Kilimanjaro",
            5895,
            1828,
            4067,
            283_752,
            [
                CampCheckpoint::new("Base Camp", 1828, 0, 0),
                CampCheckpoint::new("Camp 1 - Mandara", 2700, 25_000, 500),
                CampCheckpoint::new("Camp 2 - Horombo", 3720, 75_000, 1200),
                CampCheckpoint::new("Camp 3 - Kibo", 4700, 150_000, 2000),
                CampCheckpoint::new("Uhuru Peak", 5895, 283_752, 4067),
            ],
        ),
        MountainRecord::new(
            "Mount Everest",
            8848,
            5364,
            3484,
            3_399_000,
            [
                CampCheckpoint::new("Base Camp", 5364, 0, 0),
                CampCheckpoint::new("Camp 1", 6065, 500_000, 800),
                CampCheckpoint::new("Camp 2", 6400, 1_000_000, 1500),
                CampCheckpoint::new("Camp 3", 7200, 1_800_000, 2500),
                CampCheckpoint::new("Camp 4", 8000, 2_800_000, 3500),
                CampCheckpoint::new("Summit", 8848, 3_399_000, 3484),
            ],
        ),
        MountainRecord::new(
            "Mount Fuji",
            3776,
            2305,
            1471,
            9413,
            [
                CampCheckpoint::new("Base Camp", 2305, 0, 0),
                CampCheckpoint::new("Station 5", 2390, 2000, 200),
                CampCheckpoint::new("Station 8", 3100, 6000, 500),
                CampCheckpoint::new("Summit", 3776, 9413, 1471),
            ],
        ),
        MountainRecord::new(
            "Mount Rainier",
            4392,
            1500,
            2892,
            125_112,
            [
                CampCheckpoint::new("Base Camp", 1500, 0, 0),
                CampCheckpoint::new("Camp Muir", 3000, 40_000, 400),
                CampCheckpoint::new("Summit", 4392, 125_112, 2892),
            ],
        ),
        MountainRecord::new(
            "Mont Blanc",
            4808,
            1000,
            3808,
            200_000,
            [
                CampCheckpoint::new("Base Camp", 1000, 0, 0),
                CampCheckpoint::new("Refuge du Goûter", 3000, 80_000, 500),
                CampCheckpoint::new("Summit", 4808, 200_000, 3808),
            ],
        ),
        MountainRecord::new(
            "El Capitan",
            2121,
            1207,
            914,
            66_840,
            [
                CampCheckpoint::new("Base", 1207, 0, 0),
                CampCheckpoint::new("Pitch 10", 1400, 15_000, 200),
                CampCheckpoint::new("Pitch 20", 1600, 30_000, 400),
                CampCheckpoint::new("Pitch 30", 1800, 50_000, 600),
                CampCheckpoint::new("Summit", 2121, 66_840, 914),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn both_tables_cover_the_same_mountains() {
        let calibrated: Vec<String> = calibrated_mountains().into_iter().map(|m| m.name).collect();
        let legacy: Vec<String> = legacy_mountains().into_iter().map(|m| m.name).collect();
        assert_eq!(calibrated, legacy);
    }

    #[test]
    fn every_embedded_mountain_is_catalogued() {
        for mountain in calibrated_mountains() {
            assert!(
                catalog::lookup(&mountain.name).is_some(),
                "{} missing from catalog",
                mountain.name
            );
        }
    }

    #[test]
    fn fuji_gain_matches_height() {
        let fuji = calibrated_mountains()
            .into_iter()
            .find(|m| m.name == "Mount Fuji")
            .unwrap();
        assert_eq!(fuji.height, 3776);
        assert_eq!(fuji.base_elevation_start, 2305);
        assert_eq!(fuji.derived_elevation_gain(), 1471);
    }

    #[test]
    fn dataset_ids_resolve_tables() {
        assert_eq!(DatasetId::Legacy.records(), legacy_mountains());
        assert_eq!(DatasetId::Calibrated.label(), "calibrated");
    }
}
