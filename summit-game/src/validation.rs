//! Consistency checks over mountain balance data.
//!
//! Every check is independent and pure: it reads the dataset and returns
//! [`TestResult`]s. [`ElevationModelValidator::run_all`] collects them into a
//! [`ValidationReport`] keyed by [`CheckCategory`] in report order.
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog;
use crate::constants::{
    CAMP_ELEVATION_TOLERANCE_PCT, CONVERSION_REFERENCE_CASES, CONVERSION_TOLERANCE_PCT,
    DAILY_EXPECTED_STEPS_PER_METER, DAILY_MAX_STEPS_PER_METER, DAILY_MIN_STEPS_PER_METER,
    DAILY_PROGRESS_CASES, ELEVATION_ERROR_FLOOR_M, ELEVATION_GAIN_TOLERANCE_PCT,
    METERS_PER_FLIGHT, RATIO_TOLERANCE_PCT,
};
use crate::difficulty::{DifficultyTier, RatioTable};
use crate::mountain::MountainRecord;
use crate::numbers::{relative_error_pct, share_pct, usize_to_f64};

/// Check families, ordered as they appear in reports.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckCategory {
    HealthkitConversion,
    StepToElevationRatios,
    CampProgression,
    ElevationGainCalculation,
    CampElevationConsistency,
    DailyProgressRealism,
    MountainCompletionAccuracy,
}

impl CheckCategory {
    pub const ALL: [Self; 7] = [
        Self::HealthkitConversion,
        Self::StepToElevationRatios,
        Self::CampProgression,
        Self::ElevationGainCalculation,
        Self::CampElevationConsistency,
        Self::DailyProgressRealism,
        Self::MountainCompletionAccuracy,
    ];

    /// Stable snake_case key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::HealthkitConversion => "healthkit_conversion",
            Self::StepToElevationRatios => "step_to_elevation_ratios",
            Self::CampProgression => "camp_progression",
            Self::ElevationGainCalculation => "elevation_gain_calculation",
            Self::CampElevationConsistency => "camp_elevation_consistency",
            Self::DailyProgressRealism => "daily_progress_realism",
            Self::MountainCompletionAccuracy => "mountain_completion_accuracy",
        }
    }

    /// Key rendered in title case, e.g. `Step To Elevation Ratios`.
    #[must_use]
    pub fn title(self) -> String {
        self.key()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test_name: String,
    pub passed: bool,
    pub expected: f64,
    pub actual: f64,
    pub error_percentage: f64,
    pub message: String,
}

/// Results of a full validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub categories: BTreeMap<CheckCategory, Vec<TestResult>>,
}

impl ValidationReport {
    #[must_use]
    pub fn results(&self, category: CheckCategory) -> &[TestResult] {
        self.categories.get(&category).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.categories.values().map(Vec::len).sum()
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.categories
            .values()
            .flatten()
            .filter(|result| result.passed)
            .count()
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.total() - self.passed()
    }

    /// Passed share in percent, 0 for an empty report.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        share_pct(self.passed(), self.total())
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    pub fn failures(&self, category: CheckCategory) -> impl Iterator<Item = &TestResult> {
        self.results(category).iter().filter(|result| !result.passed)
    }
}

/// Expected steps-per-meter for a mountain and the label used in messages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatioExpectation {
    pub tier: DifficultyTier,
    pub ratio: f64,
    pub label: &'static str,
}

/// Runs the fixed battery of balance checks over a dataset.
#[derive(Debug, Clone)]
pub struct ElevationModelValidator {
    mountains: Vec<MountainRecord>,
    ratios: RatioTable,
}

impl ElevationModelValidator {
    #[must_use]
    pub fn new(mountains: Vec<MountainRecord>, ratios: RatioTable) -> Self {
        Self { mountains, ratios }
    }

    #[must_use]
    pub fn mountains(&self) -> &[MountainRecord] {
        &self.mountains
    }

    #[must_use]
    pub fn run_all(&self) -> ValidationReport {
        let categories = CheckCategory::ALL
            .into_iter()
            .map(|category| (category, self.run_category(category)))
            .collect();
        ValidationReport { categories }
    }

    #[must_use]
    pub fn run_category(&self, category: CheckCategory) -> Vec<TestResult> {
        match category {
            CheckCategory::HealthkitConversion => check_healthkit_conversion(),
            CheckCategory::StepToElevationRatios => self.check_step_ratios(),
            CheckCategory::CampProgression => self.check_camp_progression(),
            CheckCategory::ElevationGainCalculation => self.check_elevation_gain(),
            CheckCategory::CampElevationConsistency => self.check_camp_elevations(),
            CheckCategory::DailyProgressRealism => check_daily_progress(),
            CheckCategory::MountainCompletionAccuracy => self.check_summit_records(),
        }
    }

    /// Ratio expectation from the catalog tier; unknown names use the
    /// intermediate ratio and the `unknown` label.
    #[must_use]
    pub fn expectation_for(&self, name: &str) -> RatioExpectation {
        catalog::lookup(name).map_or(
            RatioExpectation {
                tier: DifficultyTier::Intermediate,
                ratio: self.ratios.ratio(DifficultyTier::Intermediate),
                label: "unknown",
            },
            |profile| RatioExpectation {
                tier: profile.difficulty,
                ratio: self.ratios.ratio(profile.difficulty),
                label: profile.difficulty.terrain_label(),
            },
        )
    }

    fn check_step_ratios(&self) -> Vec<TestResult> {
        self.mountains
            .iter()
            .map(|mountain| {
                let steps_per_meter = mountain.steps_per_meter();
                let expectation = self.expectation_for(&mountain.name);
                let error_percentage =
                    relative_error_pct(expectation.ratio, steps_per_meter, 0.0);
                TestResult {
                    test_name: format!("{} Step-to-Elevation Ratio", mountain.name),
                    passed: error_percentage < RATIO_TOLERANCE_PCT,
                    expected: expectation.ratio,
                    actual: steps_per_meter,
                    error_percentage,
                    message: format!(
                        "{}: {steps_per_meter:.1} steps/meter (expected ~{} for {} hiking)",
                        mountain.name, expectation.ratio, expectation.label
                    ),
                }
            })
            .collect()
    }

    fn check_camp_progression(&self) -> Vec<TestResult> {
        let mut results = Vec::new();
        for mountain in &self.mountains {
            let issues = progression_issues(mountain);
            let passed = issues.is_empty();
            results.push(TestResult {
                test_name: format!("{} Camp Progression", mountain.name),
                passed,
                expected: 0.0,
                actual: usize_to_f64(issues.len()),
                error_percentage: 0.0,
                message: format!(
                    "{}: {} - {} progression issues found",
                    mountain.name,
                    if passed { "PASS" } else { "FAIL" },
                    issues.len()
                ),
            });
            results.extend(issues.into_iter().map(|issue| TestResult {
                test_name: format!("{} - {issue}", mountain.name),
                passed: false,
                expected: 0.0,
                actual: 1.0,
                error_percentage: 0.0,
                message: issue,
            }));
        }
        results
    }

    fn check_elevation_gain(&self) -> Vec<TestResult> {
        self.mountains
            .iter()
            .map(|mountain| {
                let calculated = f64::from(mountain.derived_elevation_gain());
                let recorded = f64::from(mountain.total_elevation_gain);
                let error_percentage =
                    relative_error_pct(calculated, recorded, ELEVATION_ERROR_FLOOR_M);
                TestResult {
                    test_name: format!("{} Elevation Gain Calculation", mountain.name),
                    passed: error_percentage < ELEVATION_GAIN_TOLERANCE_PCT,
                    expected: calculated,
                    actual: recorded,
                    error_percentage,
                    message: format!(
                        "{}: Calculated {calculated:.0}m, Actual {recorded:.0}m",
                        mountain.name
                    ),
                }
            })
            .collect()
    }

    fn check_camp_elevations(&self) -> Vec<TestResult> {
        let mut results = Vec::new();
        for mountain in &self.mountains {
            for (index, camp) in mountain.camps.iter().enumerate() {
                let expected = if index == 0 {
                    0.0
                } else {
                    f64::from(camp.altitude - mountain.base_elevation_start)
                };
                let actual = f64::from(camp.elevation);
                let error_percentage =
                    relative_error_pct(expected, actual, ELEVATION_ERROR_FLOOR_M);
                results.push(TestResult {
                    test_name: format!("{} - {} Elevation", mountain.name, camp.name),
                    passed: error_percentage < CAMP_ELEVATION_TOLERANCE_PCT,
                    expected,
                    actual,
                    error_percentage,
                    message: format!(
                        "{}: Expected {expected:.0}m, Actual {actual:.0}m",
                        camp.name
                    ),
                });
            }
        }
        results
    }

    fn check_summit_records(&self) -> Vec<TestResult> {
        self.mountains
            .iter()
            .map(|mountain| {
                let test_name = format!("{} Summit Accuracy", mountain.name);
                let Some(summit) = mountain.summit() else {
                    return TestResult {
                        test_name,
                        passed: false,
                        expected: 1.0,
                        actual: 0.0,
                        error_percentage: 0.0,
                        message: format!("{}: no camp checkpoints defined", mountain.name),
                    };
                };
                let steps_match = summit.steps == mountain.base_steps;
                let elevation_match = summit.elevation == mountain.total_elevation_gain;
                let altitude_match = summit.altitude == mountain.height;
                let all_match = steps_match && elevation_match && altitude_match;
                TestResult {
                    test_name,
                    passed: all_match,
                    expected: 1.0,
                    actual: if all_match { 1.0 } else { 0.0 },
                    error_percentage: 0.0,
                    message: format!(
                        "{}: Steps={steps_match}, Elevation={elevation_match}, Altitude={altitude_match}",
                        mountain.name
                    ),
                }
            })
            .collect()
    }
}

/// Describe every non-monotonic step in a camp sequence: steps first, then
/// elevation, then altitude.
#[must_use]
pub fn progression_issues(mountain: &MountainRecord) -> Vec<String> {
    let camps = &mountain.camps;
    let mut step_issues = Vec::new();
    let mut elevation_issues = Vec::new();
    let mut altitude_issues = Vec::new();
    for (index, pair) in camps.windows(2).enumerate() {
        let (previous, current) = (&pair[0], &pair[1]);
        let camp = index + 1;
        if current.steps < previous.steps {
            step_issues.push(format!("Camp {camp} has fewer steps than previous camp"));
        }
        if current.elevation < previous.elevation {
            elevation_issues.push(format!("Camp {camp} has less elevation than previous camp"));
        }
        if current.altitude < previous.altitude {
            altitude_issues.push(format!("Camp {camp} has lower altitude than previous camp"));
        }
    }
    step_issues
        .into_iter()
        .chain(elevation_issues)
        .chain(altitude_issues)
        .collect()
}

/// Meters climbed for a HealthKit flights-climbed sample.
#[must_use]
pub fn flights_to_meters(flights: u32) -> f64 {
    f64::from(flights) * METERS_PER_FLIGHT
}

fn check_healthkit_conversion() -> Vec<TestResult> {
    CONVERSION_REFERENCE_CASES
        .iter()
        .map(|&(flights, expected_meters)| {
            let actual_meters = flights_to_meters(flights);
            let error_percentage = relative_error_pct(expected_meters, actual_meters, 0.0);
            TestResult {
                test_name: format!("HealthKit Conversion: {flights} flights"),
                passed: error_percentage < CONVERSION_TOLERANCE_PCT,
                expected: expected_meters,
                actual: actual_meters,
                error_percentage,
                message: format!(
                    "Converted {flights} flights to {actual_meters:.3}m (expected {expected_meters:.3}m)"
                ),
            }
        })
        .collect()
}

fn check_daily_progress() -> Vec<TestResult> {
    DAILY_PROGRESS_CASES
        .iter()
        .map(|&(steps, meters)| {
            let steps_per_meter = if meters == 0 {
                0.0
            } else {
                f64::from(steps) / f64::from(meters)
            };
            let realistic = (DAILY_MIN_STEPS_PER_METER..=DAILY_MAX_STEPS_PER_METER)
                .contains(&steps_per_meter);
            TestResult {
                test_name: format!("Daily Progress: {steps} steps, {meters}m elevation"),
                passed: realistic,
                expected: DAILY_EXPECTED_STEPS_PER_METER,
                actual: steps_per_meter,
                error_percentage: relative_error_pct(
                    DAILY_EXPECTED_STEPS_PER_METER,
                    steps_per_meter,
                    0.0,
                ),
                message: format!(
                    "Daily progress: {steps_per_meter:.1} steps/meter ({})",
                    if realistic { "Realistic" } else { "Unrealistic" }
                ),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{calibrated_mountains, legacy_mountains};
    use crate::mountain::CampCheckpoint;

    fn validator(mountains: Vec<MountainRecord>) -> ElevationModelValidator {
        ElevationModelValidator::new(mountains, RatioTable::default())
    }

    #[test]
    fn conversion_cases_pass() {
        let results = check_healthkit_conversion();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.passed));
        assert!((flights_to_meters(1000) - 3048.0).abs() < 1e-9);
    }

    #[test]
    fn calibrated_dataset_passes_everything() {
        let report = validator(calibrated_mountains()).run_all();
        let failing: Vec<&str> = report
            .categories
            .values()
            .flatten()
            .filter(|r| !r.passed)
            .map(|r| r.test_name.as_str())
            .collect();
        assert!(failing.is_empty(), "unexpected failures: {failing:?}");
        assert!((report.success_rate() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn legacy_everest_progression_fails() {
        let report = validator(legacy_mountains()).run_all();
        let issues: Vec<&str> = report
            .failures(CheckCategory::CampProgression)
            .map(|r| r.message.as_str())
            .collect();
        assert!(issues.contains(&"Camp 5 has less elevation than previous camp"));
        assert!(issues.contains(&"Mount Everest: FAIL - 1 progression issues found"));
    }

    #[test]
    fn legacy_ratios_are_flagged() {
        let report = validator(legacy_mountains()).run_all();
        let flagged: Vec<&str> = report
            .failures(CheckCategory::StepToElevationRatios)
            .map(|r| r.test_name.as_str())
            .collect();
        assert!(flagged.contains(&"Mount Fuji Step-to-Elevation Ratio"));
        assert!(flagged.contains(&"Mount Everest Step-to-Elevation Ratio"));
    }

    #[test]
    fn fuji_gain_check_passes() {
        let fuji = MountainRecord::new("Mount Fuji", 3776, 2305, 1471, 22_065, []);
        let results = validator(vec![fuji]).run_category(CheckCategory::ElevationGainCalculation);
        assert!(results[0].passed);
        assert!(results[0].error_percentage < 1.0);
        assert_eq!(results[0].message, "Mount Fuji: Calculated 1471m, Actual 1471m");
    }

    #[test]
    fn zero_gain_is_not_fatal() {
        let flat = MountainRecord::new(
            "Salt Flat",
            100,
            100,
            0,
            500,
            [CampCheckpoint::new("Base", 100, 0, 0)],
        );
        let results = validator(vec![flat]).run_category(CheckCategory::StepToElevationRatios);
        assert!(results[0].actual.abs() < f64::EPSILON);
        assert!(!results[0].passed);
        assert!(results[0].message.contains("for unknown hiking"));
    }

    #[test]
    fn each_progression_violation_is_its_own_result() {
        let jumbled = MountainRecord::new(
            "Jumbled",
            300,
            0,
            300,
            300,
            [
                CampCheckpoint::new("Base", 0, 0, 0),
                CampCheckpoint::new("High", 200, 200, 200),
                CampCheckpoint::new("Low", 100, 100, 100),
                CampCheckpoint::new("Summit", 300, 300, 300),
            ],
        );
        let results = validator(vec![jumbled]).run_category(CheckCategory::CampProgression);
        assert_eq!(results.len(), 4);
        assert_eq!(results[0].actual, 3.0);
        assert_eq!(results[1].message, "Camp 2 has fewer steps than previous camp");
        assert_eq!(results[2].message, "Camp 2 has less elevation than previous camp");
        assert_eq!(results[3].message, "Camp 2 has lower altitude than previous camp");
        assert_eq!(results[1].test_name, "Jumbled - Camp 2 has fewer steps than previous camp");
    }

    #[test]
    fn base_camp_elevation_expected_zero() {
        let offset_base = MountainRecord::new(
            "Offset",
            1000,
            500,
            500,
            100,
            [
                CampCheckpoint::new("Base Camp", 520, 0, 0),
                CampCheckpoint::new("Summit", 1000, 100, 500),
            ],
        );
        let results =
            validator(vec![offset_base]).run_category(CheckCategory::CampElevationConsistency);
        assert!(results.iter().all(|r| r.passed));
        assert!(results[0].expected.abs() < f64::EPSILON);
    }

    #[test]
    fn summit_check_fails_without_camps() {
        let empty = MountainRecord::new("Empty", 10, 0, 10, 10, []);
        let results = validator(vec![empty]).run_category(CheckCategory::MountainCompletionAccuracy);
        assert!(!results[0].passed);
    }

    #[test]
    fn daily_progress_cases_are_realistic() {
        let results = check_daily_progress();
        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.passed));
        assert_eq!(results[0].message, "Daily progress: 100.0 steps/meter (Realistic)");
    }

    #[test]
    fn category_titles_match_report_headers() {
        assert_eq!(
            CheckCategory::StepToElevationRatios.title(),
            "Step To Elevation Ratios"
        );
        assert_eq!(CheckCategory::HealthkitConversion.title(), "Healthkit Conversion");
    }

    #[test]
    fn empty_report_has_zero_success_rate() {
        let report = ValidationReport::default();
        assert_eq!(report.total(), 0);
        assert!(report.success_rate().abs() < f64::EPSILON);
    }
}
