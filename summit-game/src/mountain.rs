//! Mountain and camp checkpoint records.
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Camp sequences are short; six checkpoints stay inline.
pub type CampList = SmallVec<[CampCheckpoint; 6]>;

/// A checkpoint along a mountain's route.
///
/// `altitude` is absolute meters above sea level, `elevation` is meters
/// climbed from the mountain's starting elevation, and `steps` is the
/// cumulative step requirement to unlock the checkpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampCheckpoint {
    pub name: String,
    pub altitude: i32,
    pub steps: u32,
    pub elevation: i32,
}

impl CampCheckpoint {
    #[must_use]
    pub fn new(name: &str, altitude: i32, steps: u32, elevation: i32) -> Self {
        Self {
            name: name.to_string(),
            altitude,
            steps,
            elevation,
        }
    }

    #[must_use]
    pub fn looks_like_base_camp(&self) -> bool {
        self.name.to_lowercase().contains("base")
    }

    #[must_use]
    pub fn looks_like_summit(&self) -> bool {
        let lowered = self.name.to_lowercase();
        lowered.contains("summit") || lowered.contains("peak")
    }
}

/// Balance data for a single climbable mountain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MountainRecord {
    pub name: String,
    pub height: i32,
    pub base_elevation_start: i32,
    pub total_elevation_gain: i32,
    pub base_steps: u32,
    pub camps: CampList,
}

impl MountainRecord {
    #[must_use]
    pub fn new(
        name: &str,
        height: i32,
        base_elevation_start: i32,
        total_elevation_gain: i32,
        base_steps: u32,
        camps: impl IntoIterator<Item = CampCheckpoint>,
    ) -> Self {
        Self {
            name: name.to_string(),
            height,
            base_elevation_start,
            total_elevation_gain,
            base_steps,
            camps: camps.into_iter().collect(),
        }
    }

    /// Elevation gain implied by the height and starting elevation.
    #[must_use]
    pub const fn derived_elevation_gain(&self) -> i32 {
        self.height - self.base_elevation_start
    }

    /// Steps required per meter of elevation gain, 0 when the gain is not positive.
    #[must_use]
    pub fn steps_per_meter(&self) -> f64 {
        if self.total_elevation_gain <= 0 {
            return 0.0;
        }
        f64::from(self.base_steps) / f64::from(self.total_elevation_gain)
    }

    #[must_use]
    pub fn summit(&self) -> Option<&CampCheckpoint> {
        self.camps.last()
    }
}
