mod logic;
mod recalibration;
mod util;
mod xcode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::{Path, PathBuf};

use summit_game::{
    DatasetId, ElevationModelFixer, ElevationModelValidator, MountainRecord, RatioTable,
    ValidationReport, fixed_records, legacy_mountains, profile_or_default,
};
use util::{ensure_parent_dir, group_thousands, split_csv, write_text_file};
use xcode::{NewFile, PatchOutcome, StepStatus, patch_manifest_file};

const DEFAULT_TEST_REPORT: &str = "SummitAI/elevation_model_test_report.md";
const FIX_REPORT_FILE: &str = "elevation_model_fix_report.md";
const SWIFT_DEFINITIONS_FILE: &str = "fixed_mountain_definitions.swift";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DatasetChoice {
    /// Current calibrated mountain table
    Calibrated,
    /// Pre-calibration table with hand-tuned step counts
    Legacy,
    /// Legacy table after recalibration
    Fixed,
}

impl DatasetChoice {
    const fn label(self) -> &'static str {
        match self {
            Self::Calibrated => "calibrated",
            Self::Legacy => "legacy",
            Self::Fixed => "fixed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Markdown,
    Console,
    Json,
}

#[derive(Debug, Parser)]
#[command(name = "summit-tools", version)]
#[command(about = "Balance QA, recalibration and Xcode project tooling for SummitAI")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check the elevation model for internal consistency
    Validate(ValidateArgs),
    /// Recalibrate step counts and emit a fix report plus Swift definitions
    Fix(FixArgs),
    /// Register new source files in an Xcode project
    PatchManifest(PatchArgs),
    /// List the embedded mountains with their difficulty tiers
    List(ListArgs),
}

#[derive(Debug, clap::Args)]
struct ValidateArgs {
    /// Mountain table to validate
    #[arg(long, value_enum, default_value_t = DatasetChoice::Calibrated)]
    dataset: DatasetChoice,

    /// JSON file overriding the steps-per-meter ratio of each tier
    #[arg(long)]
    ratios: Option<PathBuf>,

    /// Restrict to these mountains (comma-separated names)
    #[arg(long)]
    mountains: Option<String>,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Markdown)]
    report: ReportFormat,

    /// Report destination; `-` for stdout. Markdown defaults to
    /// SummitAI/elevation_model_test_report.md, other formats to stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Exit with status 1 when any check fails
    #[arg(long)]
    strict: bool,
}

#[derive(Debug, clap::Args)]
struct FixArgs {
    /// JSON file overriding the steps-per-meter ratio of each tier
    #[arg(long)]
    ratios: Option<PathBuf>,

    /// Restrict to these mountains (comma-separated names)
    #[arg(long)]
    mountains: Option<String>,

    /// Directory receiving the fix report and Swift definitions
    #[arg(long, default_value = "SummitAI")]
    output_dir: PathBuf,

    /// Validate the recalibrated table and print its pass rate
    #[arg(long)]
    verify: bool,
}

#[derive(Debug, clap::Args)]
struct PatchArgs {
    /// Path to the project.pbxproj to edit
    #[arg(long, default_value = "SummitAI.xcodeproj/project.pbxproj")]
    project: PathBuf,

    /// File to register as NAME:GROUP (repeatable)
    #[arg(long = "file", value_name = "NAME:GROUP")]
    files: Vec<NewFile>,

    /// Print what would change without writing
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, clap::Args)]
struct ListArgs {
    /// JSON file overriding the steps-per-meter ratio of each tier
    #[arg(long)]
    ratios: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    announce_banner();

    match args.command {
        Command::Validate(validate) => {
            let report = run_validate(&validate)?;
            if validate.strict && !report.all_passed() {
                std::process::exit(1);
            }
        }
        Command::Fix(fix) => run_fix(&fix)?,
        Command::PatchManifest(patch) => {
            let outcome = run_patch(&patch)?;
            print_patch_outcome(&patch, &outcome);
        }
        Command::List(list) => {
            let ratios = load_ratios(list.ratios.as_deref())?;
            let mut target = OutputTarget::new(None)?;
            write_mountain_list(&mut target, &ratios)?;
            target.flush_inner()?;
        }
    }

    Ok(())
}

fn announce_banner() {
    println!("{}", "⛰️  SummitAI Balance Tools".bright_cyan().bold());
    println!("{}", "================================".cyan());
}

fn load_ratios(path: Option<&Path>) -> Result<RatioTable> {
    let Some(path) = path else {
        return Ok(RatioTable::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read ratio table {}", path.display()))?;
    let ratios = RatioTable::from_json(&text)
        .with_context(|| format!("invalid ratio table {}", path.display()))?;
    log::info!("loaded ratio overrides from {}", path.display());
    Ok(ratios)
}

fn load_dataset(choice: DatasetChoice, ratios: RatioTable) -> Vec<MountainRecord> {
    match choice {
        DatasetChoice::Calibrated => DatasetId::Calibrated.records(),
        DatasetChoice::Legacy => DatasetId::Legacy.records(),
        DatasetChoice::Fixed => {
            let fixer = ElevationModelFixer::new(ratios);
            fixed_records(&fixer.fix_all(&legacy_mountains()))
        }
    }
}

fn filter_mountains(
    records: Vec<MountainRecord>,
    selection: Option<&str>,
) -> Result<Vec<MountainRecord>> {
    let Some(selection) = selection else {
        return Ok(records);
    };
    let names = split_csv(selection);
    if let Some(unknown) = names
        .iter()
        .find(|name| !records.iter().any(|record| &record.name == *name))
    {
        bail!("unknown mountain: {unknown}");
    }
    Ok(records
        .into_iter()
        .filter(|record| names.contains(&record.name))
        .collect())
}

fn resolve_output(output: Option<&Path>, format: ReportFormat) -> Option<PathBuf> {
    match output {
        Some(path) if path == Path::new("-") => None,
        Some(path) => Some(path.to_path_buf()),
        None if format == ReportFormat::Markdown => Some(PathBuf::from(DEFAULT_TEST_REPORT)),
        None => None,
    }
}

fn generated_at() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn run_validate(args: &ValidateArgs) -> Result<ValidationReport> {
    let ratios = load_ratios(args.ratios.as_deref())?;
    let mountains = filter_mountains(
        load_dataset(args.dataset, ratios),
        args.mountains.as_deref(),
    )?;
    println!(
        "🧪 Validating {} dataset ({} mountains)",
        args.dataset.label(),
        mountains.len()
    );

    let report = ElevationModelValidator::new(mountains, ratios).run_all();
    let destination = resolve_output(args.output.as_deref(), args.report);
    write_validation_report(&report, args, destination.as_deref())?;
    if let Some(path) = &destination {
        println!("✅ Report saved to: {}", path.display());
    }

    println!();
    println!(
        "🎯 Test Summary: {}/{} tests passed ({:.1}%)",
        report.passed(),
        report.total(),
        report.success_rate()
    );
    if report.all_passed() {
        println!("{}", "✅ Elevation model is consistent".green());
    } else {
        println!(
            "{}",
            format!("⚠️  {} checks failed; see the report for details", report.failed())
                .yellow()
        );
    }
    Ok(report)
}

fn write_validation_report(
    report: &ValidationReport,
    args: &ValidateArgs,
    destination: Option<&Path>,
) -> Result<()> {
    let mut target = OutputTarget::new(destination.map(Path::to_path_buf))?;
    let timestamp = generated_at();
    match args.report {
        ReportFormat::Markdown => {
            logic::generate_markdown_report(&mut target, report, &timestamp)?;
        }
        ReportFormat::Json => {
            logic::generate_json_report(&mut target, report, args.dataset.label(), &timestamp)?;
        }
        ReportFormat::Console => logic::generate_console_report(&mut target, report)?,
    }
    target.flush_inner()?;
    Ok(())
}

fn run_fix(args: &FixArgs) -> Result<()> {
    let ratios = load_ratios(args.ratios.as_deref())?;
    let mountains = filter_mountains(legacy_mountains(), args.mountains.as_deref())?;

    println!("📊 Calculating fixed values...");
    let fixes = ElevationModelFixer::new(ratios).fix_all(&mountains);

    println!("📋 Generating comparison report...");
    let mut report = Vec::new();
    recalibration::generate_fix_report(&mut report, &fixes)?;
    let report_path = args.output_dir.join(FIX_REPORT_FILE);
    write_text_file(&report_path, &String::from_utf8_lossy(&report))?;
    println!("✅ Fix report saved to: {}", report_path.display());

    println!("💻 Generating Swift code...");
    let swift_path = args.output_dir.join(SWIFT_DEFINITIONS_FILE);
    write_text_file(&swift_path, &recalibration::generate_swift_definitions(&fixes))?;
    println!("✅ Swift code saved to: {}", swift_path.display());

    println!();
    println!("{}", "📈 Summary of Changes:".bright_yellow().bold());
    for line in recalibration::change_summary_lines(&fixes) {
        println!("{line}");
    }

    if args.verify {
        let report = ElevationModelValidator::new(fixed_records(&fixes), ratios).run_all();
        println!();
        println!(
            "🔍 Verification: {}/{} checks pass on the fixed table ({:.1}%)",
            report.passed(),
            report.total(),
            report.success_rate()
        );
    }

    println!();
    println!("{}", "🎯 Next Steps:".bright_cyan().bold());
    println!("1. Review the fix report: {}", report_path.display());
    println!("2. Update Mountain.swift with the new definitions");
    println!("3. Run `summit-tools validate --dataset fixed` to confirm");
    Ok(())
}

fn run_patch(args: &PatchArgs) -> Result<PatchOutcome> {
    let files = if args.files.is_empty() {
        NewFile::defaults()
    } else {
        args.files.clone()
    };
    patch_manifest_file(&args.project, &files, args.dry_run)
        .with_context(|| format!("failed to patch {}", args.project.display()))
}

fn print_patch_outcome(args: &PatchArgs, outcome: &PatchOutcome) {
    for name in &outcome.already_registered {
        println!("ℹ️  {name} is already registered");
    }
    for registration in &outcome.registrations {
        println!(
            "📄 {} → {} (ref {}, build {})",
            registration.file.name,
            registration.file.group,
            registration.file_ref_id,
            registration.build_file_id
        );
    }
    for report in &outcome.steps {
        match &report.status {
            StepStatus::Applied { entries } => {
                println!("{} {}: {entries} added", "✅".green(), report.step);
            }
            StepStatus::Skipped { reason } => {
                println!("{} {} skipped: {reason}", "⚠️ ".yellow(), report.step);
            }
        }
    }
    if outcome.written {
        println!("✅ Updated {}", args.project.display());
    } else if args.dry_run && outcome.changed() {
        println!("🔍 Dry run: {} left unchanged", args.project.display());
    } else {
        println!("ℹ️  Nothing to change in {}", args.project.display());
    }
}

fn write_mountain_list(out: &mut dyn Write, ratios: &RatioTable) -> Result<()> {
    writeln!(out, "Embedded mountains:")?;
    for mountain in DatasetId::Calibrated.records() {
        let tier = profile_or_default(&mountain.name).difficulty;
        writeln!(
            out,
            "  {:20} {:13} {:>5.1} steps/m  {:>9} steps  {}m",
            mountain.name,
            tier.label(),
            ratios.ratio(tier),
            group_thousands(u64::from(mountain.base_steps)),
            mountain.height
        )?;
    }
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            ensure_parent_dir(&path)?;
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
