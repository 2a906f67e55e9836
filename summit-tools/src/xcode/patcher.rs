//! Registers new source files in an Xcode `project.pbxproj`.
//!
//! [`plan_patch`] is pure: it threads a [`ManifestText`] through four
//! independent insertion steps and records what happened to each. A step
//! whose anchor is missing is skipped with a warning while the others still
//! apply. [`patch_manifest_file`] adds the single read and the single write.
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use super::ids::{IdAllocator, IdRole};
use super::manifest::{ManifestError, ManifestText, Section};

/// A file to register and the group it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewFile {
    pub name: String,
    pub group: String,
}

impl NewFile {
    #[must_use]
    pub fn new(name: &str, group: &str) -> Self {
        Self {
            name: name.to_string(),
            group: group.to_string(),
        }
    }

    /// Parse a `NAME:GROUP` pair.
    ///
    /// # Errors
    ///
    /// [`ManifestError::InvalidFileSpec`] when either side is empty or the
    /// separator is missing.
    pub fn parse(input: &str) -> Result<Self, ManifestError> {
        let invalid = || ManifestError::InvalidFileSpec {
            input: input.to_string(),
        };
        let (name, group) = input.split_once(':').ok_or_else(invalid)?;
        let (name, group) = (name.trim(), group.trim());
        if name.is_empty() || group.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(name, group))
    }

    #[must_use]
    pub fn last_known_file_type(&self) -> &'static str {
        match Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some("swift") => "sourcecode.swift",
            Some("m") => "sourcecode.c.objc",
            Some("h") => "sourcecode.c.h",
            Some("c") => "sourcecode.c.c",
            _ => "text",
        }
    }

    /// Files registered when none are given on the command line.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        vec![
            Self::new("StreakManager.swift", "Services"),
            Self::new("StreakView.swift", "Components"),
        ]
    }
}

impl FromStr for NewFile {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Identifiers allocated for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub file: NewFile,
    pub file_ref_id: String,
    pub build_file_id: String,
}

impl Registration {
    fn file_reference_line(&self) -> String {
        format!(
            "\t\t{} /* {} */ = {{isa = PBXFileReference; lastKnownFileType = {}; path = {}; sourceTree = \"<group>\"; }};\n",
            self.file_ref_id,
            self.file.name,
            self.file.last_known_file_type(),
            self.file.name
        )
    }

    fn build_file_line(&self) -> String {
        format!(
            "\t\t{} /* {} in Sources */ = {{isa = PBXBuildFile; fileRef = {} /* {} */; }};\n",
            self.build_file_id, self.file.name, self.file_ref_id, self.file.name
        )
    }

    fn group_child_line(&self) -> String {
        format!("\t\t\t\t{} /* {} */,\n", self.file_ref_id, self.file.name)
    }

    fn sources_line(&self) -> String {
        format!(
            "\t\t\t\t{} /* {} in Sources */,\n",
            self.build_file_id, self.file.name
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchStep {
    FileReferences,
    BuildFiles,
    GroupMembership { group: String },
    SourcesBuildPhase,
}

impl fmt::Display for PatchStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileReferences => write!(f, "{} entries", Section::FileReference),
            Self::BuildFiles => write!(f, "{} entries", Section::BuildFile),
            Self::GroupMembership { group } => write!(f, "group {group}"),
            Self::SourcesBuildPhase => write!(f, "{} files", Section::SourcesBuildPhase),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepStatus {
    Applied { entries: usize },
    Skipped { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub step: PatchStep,
    pub status: StepStatus,
}

#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub manifest: ManifestText,
    pub registrations: Vec<Registration>,
    pub already_registered: Vec<String>,
    pub steps: Vec<StepReport>,
    pub written: bool,
}

impl PatchOutcome {
    #[must_use]
    pub fn applied_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|report| matches!(report.status, StepStatus::Applied { .. }))
            .count()
    }

    #[must_use]
    pub fn changed(&self) -> bool {
        self.applied_count() > 0
    }
}

fn apply_step(
    current: ManifestText,
    step: PatchStep,
    anchor: Result<usize, ManifestError>,
    lines: &[String],
    steps: &mut Vec<StepReport>,
) -> ManifestText {
    match anchor {
        Ok(offset) => {
            let next = current.insert_at(offset, &lines.concat());
            log::info!("inserted {} line(s) into {step}", lines.len());
            steps.push(StepReport {
                step,
                status: StepStatus::Applied {
                    entries: lines.len(),
                },
            });
            next
        }
        Err(err) => {
            log::warn!("skipping {step}: {err}");
            steps.push(StepReport {
                step,
                status: StepStatus::Skipped {
                    reason: err.to_string(),
                },
            });
            current
        }
    }
}

/// Compute the patched manifest without touching the filesystem.
#[must_use]
pub fn plan_patch(manifest: &ManifestText, files: &[NewFile]) -> PatchOutcome {
    let mut already_registered = Vec::new();
    let mut pending: Vec<&NewFile> = Vec::new();
    for file in files {
        if manifest.has_file_reference(&file.name) {
            log::info!("{} is already registered, skipping", file.name);
            already_registered.push(file.name.clone());
        } else if pending.iter().any(|seen| seen.name == file.name) {
            log::warn!("{} listed more than once, keeping the first entry", file.name);
        } else {
            pending.push(file);
        }
    }

    let mut allocator = IdAllocator::new(manifest.object_ids());
    let registrations: Vec<Registration> = pending
        .into_iter()
        .map(|file| Registration {
            file_ref_id: allocator.allocate(&file.name, IdRole::FileReference),
            build_file_id: allocator.allocate(&file.name, IdRole::BuildFile),
            file: file.clone(),
        })
        .collect();

    let mut steps = Vec::new();
    let mut current = manifest.clone();
    if registrations.is_empty() {
        return PatchOutcome {
            manifest: current,
            registrations,
            already_registered,
            steps,
            written: false,
        };
    }

    let lines: Vec<String> = registrations
        .iter()
        .map(Registration::file_reference_line)
        .collect();
    let anchor = current.section_anchor(Section::FileReference);
    current = apply_step(current, PatchStep::FileReferences, anchor, &lines, &mut steps);

    let lines: Vec<String> = registrations
        .iter()
        .map(Registration::build_file_line)
        .collect();
    let anchor = current.section_anchor(Section::BuildFile);
    current = apply_step(current, PatchStep::BuildFiles, anchor, &lines, &mut steps);

    let mut groups: Vec<&str> = Vec::new();
    for registration in &registrations {
        if !groups.contains(&registration.file.group.as_str()) {
            groups.push(&registration.file.group);
        }
    }
    for group in groups {
        let lines: Vec<String> = registrations
            .iter()
            .filter(|registration| registration.file.group == group)
            .map(Registration::group_child_line)
            .collect();
        let anchor = current.group_children_anchor(group);
        let step = PatchStep::GroupMembership {
            group: group.to_string(),
        };
        current = apply_step(current, step, anchor, &lines, &mut steps);
    }

    let lines: Vec<String> = registrations
        .iter()
        .map(Registration::sources_line)
        .collect();
    let anchor = current.sources_files_anchor();
    current = apply_step(current, PatchStep::SourcesBuildPhase, anchor, &lines, &mut steps);

    PatchOutcome {
        manifest: current,
        registrations,
        already_registered,
        steps,
        written: false,
    }
}

/// Read, patch and (unless `dry_run`) rewrite a manifest on disk. The file is
/// written only when at least one step applied.
///
/// # Errors
///
/// [`ManifestError::Io`] when the manifest cannot be read or written.
pub fn patch_manifest_file(
    path: &Path,
    files: &[NewFile],
    dry_run: bool,
) -> Result<PatchOutcome, ManifestError> {
    let io_error = |source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    };
    let text = std::fs::read_to_string(path).map_err(io_error)?;
    let mut outcome = plan_patch(&ManifestText::new(text), files);
    if outcome.changed() && !dry_run {
        std::fs::write(path, outcome.manifest.as_str()).map_err(io_error)?;
        outcome.written = true;
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xcode::manifest::is_object_id;

    const FIXTURE: &str = include_str!("../../tests/fixtures/project.pbxproj");

    fn fixture() -> ManifestText {
        ManifestText::new(FIXTURE)
    }

    #[test]
    fn parses_name_group_pairs() {
        assert_eq!(
            NewFile::parse("StreakView.swift:Components").unwrap(),
            NewFile::new("StreakView.swift", "Components")
        );
        assert!(NewFile::parse("StreakView.swift").is_err());
        assert!(NewFile::parse(":Components").is_err());
        assert!(NewFile::parse("StreakView.swift:").is_err());
        assert!("A.swift:B".parse::<NewFile>().is_ok());
    }

    #[test]
    fn file_types_follow_extension() {
        assert_eq!(NewFile::new("A.swift", "G").last_known_file_type(), "sourcecode.swift");
        assert_eq!(NewFile::new("A.h", "G").last_known_file_type(), "sourcecode.c.h");
        assert_eq!(NewFile::new("README", "G").last_known_file_type(), "text");
    }

    #[test]
    fn registers_default_files_in_every_section() {
        let outcome = plan_patch(&fixture(), &NewFile::defaults());
        assert_eq!(outcome.applied_count(), 5);
        assert_eq!(outcome.registrations.len(), 2);

        let text = outcome.manifest.as_str();
        let manager = &outcome.registrations[0];
        assert!(is_object_id(&manager.file_ref_id));
        assert!(is_object_id(&manager.build_file_id));
        assert!(text.contains(&format!(
            "\t\t{} /* StreakManager.swift */ = {{isa = PBXFileReference; lastKnownFileType = sourcecode.swift; path = StreakManager.swift; sourceTree = \"<group>\"; }};\n",
            manager.file_ref_id
        )));
        assert!(text.contains(&format!(
            "\t\t{} /* StreakManager.swift in Sources */ = {{isa = PBXBuildFile; fileRef = {} /* StreakManager.swift */; }};\n",
            manager.build_file_id, manager.file_ref_id
        )));
        assert!(text.contains(&format!(
            "\t\t\t\t{} /* StreakManager.swift in Sources */,\n",
            manager.build_file_id
        )));

        let services = outcome.manifest.group_children_anchor("Services").unwrap();
        assert!(text[services..].starts_with(&format!(
            "\t\t\t\t{} /* StreakManager.swift */,\n",
            manager.file_ref_id
        )));
        let view = &outcome.registrations[1];
        let components = outcome.manifest.group_children_anchor("Components").unwrap();
        assert!(text[components..].starts_with(&format!(
            "\t\t\t\t{} /* StreakView.swift */,\n",
            view.file_ref_id
        )));
    }

    #[test]
    fn allocated_ids_are_unique() {
        let outcome = plan_patch(&fixture(), &NewFile::defaults());
        let mut ids: Vec<&String> = outcome
            .registrations
            .iter()
            .flat_map(|r| [&r.file_ref_id, &r.build_file_id])
            .collect();
        let existing = fixture().object_ids();
        assert!(ids.iter().all(|id| !existing.contains(*id)));
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 4);
    }

    #[test]
    fn second_application_is_a_no_op() {
        let once = plan_patch(&fixture(), &NewFile::defaults());
        let twice = plan_patch(&once.manifest, &NewFile::defaults());
        assert!(!twice.changed());
        assert_eq!(twice.manifest, once.manifest);
        assert_eq!(
            twice.already_registered,
            vec!["StreakManager.swift".to_string(), "StreakView.swift".to_string()]
        );
    }

    #[test]
    fn missing_section_skips_only_that_step() {
        let without_sources = FIXTURE.replace(
            "/* Begin PBXSourcesBuildPhase section */",
            "/* Begin PBXShellScriptBuildPhase section */",
        );
        let outcome = plan_patch(&ManifestText::new(without_sources), &NewFile::defaults());
        assert_eq!(outcome.applied_count(), 4);
        let skipped = outcome
            .steps
            .iter()
            .find(|report| report.step == PatchStep::SourcesBuildPhase)
            .unwrap();
        assert!(matches!(skipped.status, StepStatus::Skipped { .. }));
        assert!(outcome.manifest.has_file_reference("StreakView.swift"));
    }

    #[test]
    fn missing_group_skips_only_that_group() {
        let files = [
            NewFile::new("StreakView.swift", "Components"),
            NewFile::new("Widget.swift", "Widgets"),
        ];
        let outcome = plan_patch(&fixture(), &files);
        let statuses: Vec<(&PatchStep, bool)> = outcome
            .steps
            .iter()
            .map(|r| (&r.step, matches!(r.status, StepStatus::Applied { .. })))
            .collect();
        assert!(statuses.contains(&(
            &PatchStep::GroupMembership {
                group: "Components".to_string()
            },
            true
        )));
        assert!(statuses.contains(&(
            &PatchStep::GroupMembership {
                group: "Widgets".to_string()
            },
            false
        )));
    }

    #[test]
    fn manifest_without_sections_is_unchanged() {
        let bare = ManifestText::new("// !$*UTF8*$!\n{\n}\n");
        let outcome = plan_patch(&bare, &NewFile::defaults());
        assert!(!outcome.changed());
        assert_eq!(outcome.manifest, bare);
        assert_eq!(outcome.steps.len(), 5);
    }

    #[test]
    fn patch_file_writes_once_and_respects_dry_run() {
        let dir = std::env::temp_dir().join(format!(
            "summit-patch-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("project.pbxproj");
        std::fs::write(&path, FIXTURE).unwrap();

        let dry = patch_manifest_file(&path, &NewFile::defaults(), true).unwrap();
        assert!(dry.changed());
        assert!(!dry.written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), FIXTURE);

        let applied = patch_manifest_file(&path, &NewFile::defaults(), false).unwrap();
        assert!(applied.written);
        let after = std::fs::read_to_string(&path).unwrap();
        assert_eq!(after, applied.manifest.as_str());

        let again = patch_manifest_file(&path, &NewFile::defaults(), false).unwrap();
        assert!(!again.written);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), after);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = patch_manifest_file(Path::new("/nonexistent/project.pbxproj"), &[], false)
            .unwrap_err();
        assert!(matches!(err, ManifestError::Io { .. }));
    }
}
