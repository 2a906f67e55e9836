//! Xcode project manifest editing.
pub mod ids;
pub mod manifest;
pub mod patcher;

pub use patcher::{NewFile, PatchOutcome, StepStatus, patch_manifest_file};
