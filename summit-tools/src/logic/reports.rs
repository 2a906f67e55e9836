use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

use summit_game::{CheckCategory, TestResult, ValidationReport};

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: &'a str,
    dataset: &'a str,
    total: usize,
    passed: usize,
    failed: usize,
    success_rate: f64,
    categories: &'a BTreeMap<CheckCategory, Vec<TestResult>>,
}

pub fn generate_json_report<W: Write + ?Sized>(
    out: &mut W,
    report: &ValidationReport,
    dataset: &str,
    generated_at: &str,
) -> Result<()> {
    let payload = JsonReport {
        generated_at,
        dataset,
        total: report.total(),
        passed: report.passed(),
        failed: report.failed(),
        success_rate: report.success_rate(),
        categories: &report.categories,
    };
    writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
    Ok(())
}

pub fn generate_markdown_report<W: Write + ?Sized>(
    out: &mut W,
    report: &ValidationReport,
    generated_at: &str,
) -> Result<()> {
    writeln!(out, "# SummitAI Elevation Model Test Report")?;
    writeln!(out, "Generated: {generated_at}")?;
    writeln!(out)?;

    for (category, results) in &report.categories {
        writeln!(out, "## {}", category.title())?;
        writeln!(out)?;

        for result in results {
            let status = if result.passed { "✅ PASS" } else { "❌ FAIL" };
            writeln!(out, "- **{}**: {status}", result.test_name)?;
            writeln!(out, "  - {}", result.message)?;
            if !result.passed && result.error_percentage > 0.0 {
                writeln!(out, "  - Error: {:.1}%", result.error_percentage)?;
            }
            writeln!(out)?;
        }

        let category_passed = results.iter().filter(|r| r.passed).count();
        writeln!(
            out,
            "**Category Summary**: {category_passed}/{} tests passed",
            results.len()
        )?;
        writeln!(out)?;
    }

    writeln!(out, "## Overall Summary")?;
    writeln!(out)?;
    writeln!(out, "**Total Tests**: {}", report.total())?;
    writeln!(out, "**Passed**: {}", report.passed())?;
    writeln!(out, "**Failed**: {}", report.failed())?;
    writeln!(out, "**Success Rate**: {:.1}%", report.success_rate())?;
    writeln!(out)?;

    write_key_findings(out, report)
}

fn write_key_findings<W: Write + ?Sized>(out: &mut W, report: &ValidationReport) -> Result<()> {
    writeln!(out, "## Key Findings")?;
    writeln!(out)?;

    let ratios: Vec<&TestResult> = report
        .failures(CheckCategory::StepToElevationRatios)
        .collect();
    let progression: Vec<&TestResult> = report.failures(CheckCategory::CampProgression).collect();
    let elevation: Vec<&TestResult> = report
        .failures(CheckCategory::ElevationGainCalculation)
        .collect();

    if ratios.is_empty() && progression.is_empty() && elevation.is_empty() {
        writeln!(out, "No ratio, progression or elevation gain issues found.")?;
        return Ok(());
    }

    if !ratios.is_empty() {
        writeln!(out, "### ⚠️ Unrealistic Step-to-Elevation Ratios")?;
        for result in ratios {
            writeln!(
                out,
                "- {}: {:.1} steps/meter (expected ~{})",
                result.test_name, result.actual, result.expected
            )?;
        }
        writeln!(out)?;
    }

    if !progression.is_empty() {
        writeln!(out, "### ⚠️ Camp Progression Issues")?;
        for result in progression {
            writeln!(out, "- {}", result.message)?;
        }
        writeln!(out)?;
    }

    if !elevation.is_empty() {
        writeln!(out, "### ⚠️ Elevation Calculation Issues")?;
        for result in elevation {
            writeln!(out, "- {}", result.message)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

pub fn generate_console_report<W: Write + ?Sized>(
    out: &mut W,
    report: &ValidationReport,
) -> Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", "📊 Elevation Model Results".bright_cyan().bold())?;
    writeln!(out, "{}", "==========================".cyan())?;

    for (category, results) in &report.categories {
        let passed = results.iter().filter(|r| r.passed).count();
        let status = if passed == results.len() {
            "✅".green()
        } else {
            "❌".red()
        };
        writeln!(
            out,
            "{status} {} ({passed}/{})",
            category.title().bold(),
            results.len()
        )?;
        for result in results.iter().filter(|r| !r.passed) {
            writeln!(out, "     • {}", result.message.red())?;
        }
    }

    writeln!(out)?;
    writeln!(out, "Total checks: {}", report.total())?;
    writeln!(out, "Passed: {}", report.passed().to_string().green())?;
    writeln!(out, "Failed: {}", report.failed().to_string().red())?;
    writeln!(out, "Success rate: {:.1}%", report.success_rate())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use summit_game::{DatasetId, ElevationModelValidator, RatioTable};

    fn report_for(dataset: DatasetId) -> ValidationReport {
        ElevationModelValidator::new(dataset.records(), RatioTable::default()).run_all()
    }

    fn render_markdown(report: &ValidationReport) -> String {
        let mut buffer = Vec::new();
        generate_markdown_report(&mut buffer, report, "2025-01-01 00:00:00").unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn markdown_lists_categories_and_summary() {
        let content = render_markdown(&report_for(DatasetId::Calibrated));
        assert!(content.starts_with("# SummitAI Elevation Model Test Report\nGenerated: 2025-01-01 00:00:00\n"));
        assert!(content.contains("## Healthkit Conversion"));
        assert!(content.contains("## Mountain Completion Accuracy"));
        assert!(content.contains("**Category Summary**: 4/4 tests passed"));
        assert!(content.contains("**Success Rate**: 100.0%"));
        assert!(content.contains("No ratio, progression or elevation gain issues found."));
    }

    #[test]
    fn markdown_key_findings_only_list_failures() {
        let content = render_markdown(&report_for(DatasetId::Legacy));
        assert!(content.contains("### ⚠️ Unrealistic Step-to-Elevation Ratios"));
        assert!(content.contains("- Mount Fuji Step-to-Elevation Ratio: 6.4 steps/meter (expected ~15)"));
        assert!(content.contains("### ⚠️ Camp Progression Issues"));
        assert!(content.contains("- Camp 5 has less elevation than previous camp"));
        assert!(!content.contains("### ⚠️ Elevation Calculation Issues"));
        assert!(content.contains("  - Error: "));
    }

    #[test]
    fn markdown_handles_empty_report() {
        let content = render_markdown(&ValidationReport::default());
        assert!(content.contains("**Total Tests**: 0"));
        assert!(content.contains("**Success Rate**: 0.0%"));
    }

    #[test]
    fn json_report_carries_totals() {
        let report = report_for(DatasetId::Legacy);
        let mut buffer = Vec::new();
        generate_json_report(&mut buffer, &report, "legacy", "now").unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["dataset"], "legacy");
        assert_eq!(value["total"].as_u64(), Some(report.total() as u64));
        assert!(value["categories"]["camp_progression"].is_array());
    }

    #[test]
    fn console_report_mentions_failures() {
        colored::control::set_override(false);
        let mut buffer = Vec::new();
        generate_console_report(&mut buffer, &report_for(DatasetId::Legacy)).unwrap();
        let content = String::from_utf8(buffer).unwrap();
        assert!(content.contains("Elevation Model Results"));
        assert!(content.contains("Camp 5 has less elevation than previous camp"));
    }
}
