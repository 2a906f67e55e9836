//! Swift source listing of recalibrated mountains.
//!
//! Output is meant to be pasted into the app's `Mountain.swift` by hand and is
//! byte-identical for identical input.
use std::fmt::Write as _;

use summit_game::{
    CampCheckpoint, Equipment, Hazard, MountainFix, MountainProfile, WeatherPattern,
    profile_or_default,
};

/// Swift symbol for a mountain: lowercase, no spaces, `mount`/`mont` removed.
#[must_use]
pub fn swift_identifier(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "")
        .replace("mount", "")
        .replace("mont", "")
}

fn swift_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}

fn swift_case_list<T: Copy>(items: &[T], case: fn(T) -> &'static str) -> String {
    let cases: Vec<String> = items.iter().map(|&item| format!(".{}", case(item))).collect();
    format!("[{}]", cases.join(", "))
}

fn camp_description(camp: &CampCheckpoint) -> &'static str {
    if camp.looks_like_base_camp() {
        "Starting point of your expedition"
    } else if camp.looks_like_summit() {
        "The summit of the mountain"
    } else {
        "Intermediate camp on the mountain"
    }
}

fn camp_unlock_message(camp: &CampCheckpoint) -> String {
    if camp.looks_like_base_camp() {
        "Welcome to the mountain!".to_string()
    } else if camp.looks_like_summit() {
        "Congratulations! You've reached the summit!".to_string()
    } else {
        format!("You've reached {}!", camp.name)
    }
}

fn write_camp(out: &mut String, camp: &CampCheckpoint) -> std::fmt::Result {
    writeln!(
        out,
        "            Camp(name: {}, altitude: {}, stepsRequired: {}, elevationRequired: {}, description: {}, unlockedMessage: {}, isBaseCamp: {}, isSummit: {}),",
        swift_string(&camp.name),
        camp.altitude,
        camp.steps,
        camp.elevation,
        swift_string(camp_description(camp)),
        swift_string(&camp_unlock_message(camp)),
        camp.looks_like_base_camp(),
        camp.looks_like_summit()
    )
}

fn write_mountain(
    out: &mut String,
    fix: &MountainFix,
    profile: &MountainProfile,
) -> std::fmt::Result {
    let mountain = &fix.fixed;
    let ident = swift_identifier(&mountain.name);
    writeln!(out, "    static let {ident} = Mountain(")?;
    writeln!(out, "        name: {},", swift_string(&mountain.name))?;
    writeln!(out, "        height: {},", mountain.height)?;
    writeln!(out, "        location: {},", swift_string(profile.location))?;
    writeln!(out, "        difficulty: .{},", fix.tier.swift_case())?;
    writeln!(out, "        description: {},", swift_string(profile.description))?;
    writeln!(out, "        imageName: {},", swift_string(&ident))?;
    writeln!(out, "        isPaywalled: {},", profile.paywalled)?;
    writeln!(out, "        camps: [")?;
    for camp in &mountain.camps {
        write_camp(out, camp)?;
    }
    writeln!(out, "        ],")?;
    writeln!(out, "        baseSteps: {},", mountain.base_steps)?;
    writeln!(out, "        baseElevation: {},", mountain.total_elevation_gain)?;
    writeln!(out, "        baseElevationStart: {},", mountain.base_elevation_start)?;
    writeln!(out, "        totalElevationGain: {},", mountain.total_elevation_gain)?;
    writeln!(
        out,
        "        difficultyMultiplier: {:.1},",
        fix.tier.difficulty_multiplier()
    )?;
    writeln!(out, "        estimatedDays: {},", profile.estimated_days)?;
    writeln!(out, "        climbingSeason: .{},", profile.season.swift_case())?;
    writeln!(
        out,
        "        weatherPatterns: {},",
        swift_case_list(profile.weather, WeatherPattern::swift_case)
    )?;
    writeln!(
        out,
        "        hazards: {},",
        swift_case_list(profile.hazards, Hazard::swift_case)
    )?;
    writeln!(
        out,
        "        equipmentRequirements: {},",
        swift_case_list(profile.equipment, Equipment::swift_case)
    )?;
    writeln!(out, "        historicalData: .{ident}")?;
    writeln!(out, "    )")?;
    writeln!(out)
}

/// Render one `static let` definition per corrected mountain.
#[must_use]
pub fn generate_swift_definitions(fixes: &[MountainFix]) -> String {
    let mut out = String::new();
    for fix in fixes {
        let profile = profile_or_default(fix.name());
        // Writing into a String cannot fail.
        let _ = write_mountain(&mut out, fix, profile);
    }
    out
}
