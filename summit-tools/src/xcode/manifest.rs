use regex::Regex;
use std::collections::HashSet;
use std::fmt;
use std::ops::Range;
use std::path::PathBuf;
use thiserror::Error;

/// Length of an Xcode object identifier in hex digits.
pub const OBJECT_ID_LEN: usize = 24;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("section {section} not found")]
    SectionNotFound { section: Section },
    #[error("group {group:?} not found in {section}")]
    GroupNotFound { group: String, section: Section },
    #[error("anchor {anchor:?} not found in {section}")]
    AnchorNotFound {
        anchor: &'static str,
        section: Section,
    },
    #[error("invalid file entry {input:?}; expected NAME:GROUP")]
    InvalidFileSpec { input: String },
    #[error("invalid group pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Object sections of a `project.pbxproj` touched by the patcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    BuildFile,
    FileReference,
    Group,
    SourcesBuildPhase,
}

impl Section {
    #[must_use]
    pub const fn isa(self) -> &'static str {
        match self {
            Self::BuildFile => "PBXBuildFile",
            Self::FileReference => "PBXFileReference",
            Self::Group => "PBXGroup",
            Self::SourcesBuildPhase => "PBXSourcesBuildPhase",
        }
    }

    fn begin_marker(self) -> String {
        format!("/* Begin {} section */", self.isa())
    }

    fn end_marker(self) -> String {
        format!("/* End {} section */", self.isa())
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.isa())
    }
}

/// Immutable manifest text. Edits produce a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestText {
    text: String,
}

impl ManifestText {
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Byte range from the line after the section's begin marker up to its
    /// end marker.
    ///
    /// # Errors
    ///
    /// [`ManifestError::SectionNotFound`] when either marker is missing or the
    /// begin marker is not followed by a newline.
    pub fn section_span(&self, section: Section) -> Result<Range<usize>, ManifestError> {
        let missing = || ManifestError::SectionNotFound { section };
        let begin = section.begin_marker();
        let marker_at = self.text.find(&begin).ok_or_else(missing)?;
        let after_marker = marker_at + begin.len();
        let newline = self.text[after_marker..].find('\n').ok_or_else(missing)?;
        let start = after_marker + newline + 1;
        let end = self.text[start..]
            .find(&section.end_marker())
            .map(|offset| start + offset)
            .ok_or_else(missing)?;
        Ok(start..end)
    }

    /// Insertion point directly after a section's begin marker line.
    ///
    /// # Errors
    ///
    /// Propagates [`ManifestText::section_span`] failures.
    pub fn section_anchor(&self, section: Section) -> Result<usize, ManifestError> {
        self.section_span(section).map(|span| span.start)
    }

    /// Insertion point after the `children = (` line of the group whose
    /// comment name is `group`.
    ///
    /// # Errors
    ///
    /// [`ManifestError::SectionNotFound`] without a PBXGroup section and
    /// [`ManifestError::GroupNotFound`] when no group block matches.
    pub fn group_children_anchor(&self, group: &str) -> Result<usize, ManifestError> {
        let span = self.section_span(Section::Group)?;
        let pattern = Regex::new(&format!(
            r"[0-9A-F]{{{OBJECT_ID_LEN}}} /\* {} \*/ = \{{\s*isa = PBXGroup;\s*children = \(\n",
            regex::escape(group)
        ))?;
        pattern
            .find(&self.text[span.clone()])
            .map(|found| span.start + found.end())
            .ok_or_else(|| ManifestError::GroupNotFound {
                group: group.to_string(),
                section: Section::Group,
            })
    }

    /// Insertion point after the first `files = (` line of the sources phase.
    ///
    /// # Errors
    ///
    /// [`ManifestError::SectionNotFound`] or [`ManifestError::AnchorNotFound`].
    pub fn sources_files_anchor(&self) -> Result<usize, ManifestError> {
        const ANCHOR: &str = "files = (\n";
        let span = self.section_span(Section::SourcesBuildPhase)?;
        self.text[span.clone()]
            .find(ANCHOR)
            .map(|offset| span.start + offset + ANCHOR.len())
            .ok_or(ManifestError::AnchorNotFound {
                anchor: "files = (",
                section: Section::SourcesBuildPhase,
            })
    }

    /// Whether a file reference with `path = {file_name};` already exists.
    #[must_use]
    pub fn has_file_reference(&self, file_name: &str) -> bool {
        let Ok(span) = self.section_span(Section::FileReference) else {
            return false;
        };
        let body = &self.text[span];
        body.contains(&format!("path = {file_name};"))
            || body.contains(&format!("path = \"{file_name}\";"))
    }

    /// Every 24-digit uppercase hex token in the manifest.
    #[must_use]
    pub fn object_ids(&self) -> HashSet<String> {
        self.text
            .split(|ch: char| !ch.is_ascii_alphanumeric())
            .filter(|token| is_object_id(token))
            .map(str::to_string)
            .collect()
    }

    /// Copy of the manifest with `insertion` placed at byte `offset`.
    #[must_use]
    pub fn insert_at(&self, offset: usize, insertion: &str) -> Self {
        let mut text = String::with_capacity(self.text.len() + insertion.len());
        text.push_str(&self.text[..offset]);
        text.push_str(insertion);
        text.push_str(&self.text[offset..]);
        Self { text }
    }
}

#[must_use]
pub fn is_object_id(token: &str) -> bool {
    token.len() == OBJECT_ID_LEN
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(&b))
}
