//! Descriptive metadata for each mountain, keyed by display name.
//!
//! Names missing from the catalog resolve to [`DEFAULT_PROFILE`].
use serde::Serialize;

use crate::difficulty::DifficultyTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimbingSeason {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl ClimbingSeason {
    #[must_use]
    pub const fn swift_case(self) -> &'static str {
        match self {
            Self::Spring => "spring",
            Self::Summer => "summer",
            Self::Autumn => "autumn",
            Self::Winter => "winter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherPattern {
    Clear,
    Cloudy,
    Windy,
    Storm,
    Blizzard,
}

impl WeatherPattern {
    #[must_use]
    pub const fn swift_case(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Cloudy => "cloudy",
            Self::Windy => "windy",
            Self::Storm => "storm",
            Self::Blizzard => "blizzard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Hazard {
    AltitudeSickness,
    Avalanches,
    Crevasses,
    Rockfall,
    Frostbite,
}

impl Hazard {
    #[must_use]
    pub const fn swift_case(self) -> &'static str {
        match self {
            Self::AltitudeSickness => "altitudeSickness",
            Self::Avalanches => "avalanches",
            Self::Crevasses => "crevasses",
            Self::Rockfall => "rockfall",
            Self::Frostbite => "frostbite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Equipment {
    IceAxe,
    Crampons,
    Helmet,
    OxygenBottle,
    Rope,
    Gps,
}

impl Equipment {
    #[must_use]
    pub const fn swift_case(self) -> &'static str {
        match self {
            Self::IceAxe => "iceAxe",
            Self::Crampons => "crampons",
            Self::Helmet => "helmet",
            Self::OxygenBottle => "oxygenBottle",
            Self::Rope => "rope",
            Self::Gps => "gps",
        }
    }
}

/// Presentation and difficulty attributes the app shows for a mountain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MountainProfile {
    pub difficulty: DifficultyTier,
    pub location: &'static str,
    pub description: &'static str,
    pub paywalled: bool,
    pub estimated_days: u32,
    pub season: ClimbingSeason,
    pub weather: &'static [WeatherPattern],
    pub hazards: &'static [Hazard],
    pub equipment: &'static [Equipment],
}

/// Profile used for any mountain the catalog does not know.
pub const DEFAULT_PROFILE: MountainProfile = MountainProfile {
    difficulty: DifficultyTier::Intermediate,
    location: "Unknown",
    description: "A challenging mountain climb.",
    paywalled: false,
    estimated_days: 5,
    season: ClimbingSeason::Summer,
    weather: &[WeatherPattern::Clear, WeatherPattern::Cloudy],
    hazards: &[],
    equipment: &[],
};

const PROFILES: &[(&str, MountainProfile)] = &[
    (
        "Mount Kilimanjaro",
        MountainProfile {
            difficulty: DifficultyTier::Intermediate,
            location: "Tanzania, Africa",
            description: "The highest peak in Africa and the highest free-standing mountain in the world. A non-technical climb but requires excellent fitness and acclimatization.",
            paywalled: false,
            estimated_days: 7,
            season: ClimbingSeason::Spring,
            weather: &[
                WeatherPattern::Clear,
                WeatherPattern::Cloudy,
                WeatherPattern::Windy,
            ],
            hazards: &[Hazard::AltitudeSickness, Hazard::Frostbite],
            equipment: &[Equipment::Helmet, Equipment::Rope],
        },
    ),
    (
        "Mount Everest",
        MountainProfile {
            difficulty: DifficultyTier::Extreme,
            location: "Nepal/Tibet, Asia",
            description: "The world's highest peak and ultimate mountaineering challenge. Requires extreme fitness, technical skills, and months of preparation.",
            paywalled: true,
            estimated_days: 35,
            season: ClimbingSeason::Spring,
            weather: &[
                WeatherPattern::Clear,
                WeatherPattern::Cloudy,
                WeatherPattern::Windy,
                WeatherPattern::Storm,
                WeatherPattern::Blizzard,
            ],
            hazards: &[
                Hazard::AltitudeSickness,
                Hazard::Avalanches,
                Hazard::Crevasses,
                Hazard::Frostbite,
            ],
            equipment: &[
                Equipment::IceAxe,
                Equipment::Crampons,
                Equipment::Helmet,
                Equipment::OxygenBottle,
                Equipment::Rope,
                Equipment::Gps,
            ],
        },
    ),
    (
        "Mount Fuji",
        MountainProfile {
            difficulty: DifficultyTier::Beginner,
            location: "Japan, Asia",
            description: "Japan's most iconic mountain and a sacred symbol. A popular day hike with well-maintained trails.",
            paywalled: false,
            estimated_days: 1,
            season: ClimbingSeason::Summer,
            weather: &[WeatherPattern::Clear, WeatherPattern::Cloudy],
            hazards: &[],
            equipment: &[],
        },
    ),
    (
        "Mount Rainier",
        MountainProfile {
            difficulty: DifficultyTier::Advanced,
            location: "Washington, USA",
            description: "The most glaciated peak in the contiguous United States. Requires glacier travel skills and crevasse rescue knowledge.",
            paywalled: false,
            estimated_days: 3,
            season: ClimbingSeason::Summer,
            weather: &[
                WeatherPattern::Clear,
                WeatherPattern::Cloudy,
                WeatherPattern::Windy,
                WeatherPattern::Storm,
            ],
            hazards: &[
                Hazard::Crevasses,
                Hazard::Avalanches,
                Hazard::AltitudeSickness,
            ],
            equipment: &[
                Equipment::IceAxe,
                Equipment::Crampons,
                Equipment::Helmet,
                Equipment::Rope,
            ],
        },
    ),
    (
        "Mont Blanc",
        MountainProfile {
            difficulty: DifficultyTier::Expert,
            location: "France/Italy, Europe",
            description: "The highest peak in the Alps and Western Europe. Requires alpine climbing skills and experience with high altitude.",
            paywalled: true,
            estimated_days: 5,
            season: ClimbingSeason::Summer,
            weather: &[
                WeatherPattern::Clear,
                WeatherPattern::Cloudy,
                WeatherPattern::Windy,
                WeatherPattern::Storm,
            ],
            hazards: &[
                Hazard::AltitudeSickness,
                Hazard::Avalanches,
                Hazard::Rockfall,
            ],
            equipment: &[
                Equipment::IceAxe,
                Equipment::Crampons,
                Equipment::Helmet,
                Equipment::Rope,
            ],
        },
    ),
    (
        "El Capitan",
        MountainProfile {
            difficulty: DifficultyTier::Expert,
            location: "Yosemite, USA",
            description: "The legendary granite monolith in Yosemite Valley. Requires advanced rock climbing skills and multi-day commitment.",
            paywalled: true,
            estimated_days: 4,
            season: ClimbingSeason::Summer,
            weather: &[
                WeatherPattern::Clear,
                WeatherPattern::Cloudy,
                WeatherPattern::Windy,
            ],
            hazards: &[Hazard::Rockfall],
            equipment: &[Equipment::Rope, Equipment::Helmet],
        },
    ),
];

/// Look up a mountain's profile by exact display name.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static MountainProfile> {
    PROFILES
        .iter()
        .find(|(key, _)| *key == name)
        .map(|(_, profile)| profile)
}

/// Look up a profile, falling back to [`DEFAULT_PROFILE`] on a miss.
#[must_use]
pub fn profile_or_default(name: &str) -> &'static MountainProfile {
    lookup(name).unwrap_or_else(|| {
        log::warn!("no catalog profile for {name:?}; using defaults");
        &DEFAULT_PROFILE
    })
}

/// Names of every catalogued mountain, in catalog order.
pub fn catalog_names() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|(name, _)| *name)
}
