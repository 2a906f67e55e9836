use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt::Write as _;

use super::manifest::OBJECT_ID_LEN;

/// What a new object identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdRole {
    FileReference,
    BuildFile,
}

impl IdRole {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FileReference => "file-reference",
            Self::BuildFile => "build-file",
        }
    }
}

/// Hands out object identifiers that collide neither with the manifest nor
/// with each other.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    taken: HashSet<String>,
}

impl IdAllocator {
    #[must_use]
    pub fn new(existing: HashSet<String>) -> Self {
        Self { taken: existing }
    }

    pub fn allocate(&mut self, file_name: &str, role: IdRole) -> String {
        let mut attempt: u32 = 0;
        loop {
            let candidate = derive_id(file_name, role, attempt);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            log::debug!("id {candidate} for {file_name} already taken, retrying");
            attempt = attempt.wrapping_add(1);
        }
    }
}

/// First 24 uppercase hex digits of `SHA-256(file_name, role, attempt)`.
#[must_use]
pub fn derive_id(file_name: &str, role: IdRole, attempt: u32) -> String {
    let mut hasher = Sha256::new();
    hasher.update(file_name.as_bytes());
    hasher.update([0]);
    hasher.update(role.label().as_bytes());
    hasher.update(attempt.to_le_bytes());
    let digest = hasher.finalize();
    let mut out = String::with_capacity(OBJECT_ID_LEN);
    for byte in digest.iter().take(OBJECT_ID_LEN / 2) {
        let _ = write!(out, "{byte:02X}");
    }
    out
}
