use anyhow::Result;
use std::io::Write;

use summit_game::MountainFix;

use crate::util::group_thousands;

pub fn generate_fix_report<W: Write + ?Sized>(out: &mut W, fixes: &[MountainFix]) -> Result<()> {
    writeln!(out, "# SummitAI Elevation Model Fix Report")?;
    writeln!(out)?;
    writeln!(out, "## Summary of Changes")?;
    writeln!(out)?;

    for fix in fixes {
        writeln!(out, "### {}", fix.name())?;
        writeln!(out)?;
        writeln!(out, "**Difficulty**: {}", fix.tier.label())?;
        writeln!(out, "**Step Ratio**: {:.1} steps/meter", fix.step_ratio)?;
        writeln!(out)?;
        writeln!(out, "| Metric | Before | After | Change |")?;
        writeln!(out, "|--------|--------|-------|--------|")?;
        writeln!(
            out,
            "| Base Steps | {} | {} | {:+.1}% |",
            group_thousands(u64::from(fix.original.base_steps)),
            group_thousands(u64::from(fix.fixed.base_steps)),
            fix.base_steps_change_pct()
        )?;
        writeln!(out)?;
        writeln!(out, "**Camp Details**:")?;
        writeln!(out)?;
        writeln!(
            out,
            "| Camp | Altitude | Steps (Before) | Steps (After) | Elevation (Before) | Elevation (After) |"
        )?;
        writeln!(
            out,
            "|------|----------|----------------|---------------|-------------------|------------------|"
        )?;
        for (before, after) in fix.camp_pairs() {
            writeln!(
                out,
                "| {} | {}m | {} | {} | {}m | {}m |",
                after.name,
                after.altitude,
                group_thousands(u64::from(before.steps)),
                group_thousands(u64::from(after.steps)),
                before.elevation,
                after.elevation
            )?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// One `old → new steps (+x.x%)` line per mountain.
#[must_use]
pub fn change_summary_lines(fixes: &[MountainFix]) -> Vec<String> {
    fixes
        .iter()
        .map(|fix| {
            format!(
                "- {}: {} → {} steps ({:+.1}%)",
                fix.name(),
                group_thousands(u64::from(fix.original.base_steps)),
                group_thousands(u64::from(fix.fixed.base_steps)),
                fix.base_steps_change_pct()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use summit_game::{ElevationModelFixer, legacy_mountains};

    fn legacy_fixes() -> Vec<MountainFix> {
        ElevationModelFixer::default().fix_all(&legacy_mountains())
    }

    #[test]
    fn report_shows_before_and_after_values() {
        let mut buffer = Vec::new();
        generate_fix_report(&mut buffer, &legacy_fixes()).unwrap();
        let content = String::from_utf8(buffer).unwrap();
        assert!(content.starts_with("# SummitAI Elevation Model Fix Report\n\n## Summary of Changes\n"));
        assert!(content.contains("### Mount Fuji\n\n**Difficulty**: Beginner\n**Step Ratio**: 15.0 steps/meter"));
        assert!(content.contains("| Base Steps | 9,413 | 22,065 | +134.4% |"));
        assert!(content.contains("| Station 5 | 2390m | 2,000 | 1,275 | 200m | 85m |"));
        assert!(content.contains("**Difficulty**: Extreme"));
    }

    #[test]
    fn zero_original_steps_report_zero_change() {
        let mut mountain = legacy_mountains().remove(2);
        mountain.base_steps = 0;
        let fixes = ElevationModelFixer::default().fix_all(&[mountain]);
        let lines = change_summary_lines(&fixes);
        assert_eq!(lines, vec!["- Mount Fuji: 0 → 22,065 steps (+0.0%)".to_string()]);
    }

    #[test]
    fn summary_lines_cover_every_mountain() {
        let lines = change_summary_lines(&legacy_fixes());
        assert_eq!(lines.len(), 6);
        assert!(lines[0].starts_with("- Mount Kilimanjaro: 283,752 → 101,675 steps (-"));
    }
}
