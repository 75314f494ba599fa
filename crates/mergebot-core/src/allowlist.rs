//! Path-allowlist eligibility.
//!
//! A pull request qualifies for unattended handling only when every changed
//! file sits under one of the configured path prefixes. Matching is plain
//! string-prefix, not glob: `docs/` matches `docs/readme.md` but also
//! `docs2.md` would need its own entry.

use crate::event::ChangedFile;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allowlist {
    prefixes: Vec<String>,
}

impl Allowlist {
    pub fn new(prefixes: Vec<String>) -> Self {
        Self { prefixes }
    }

    /// The stock allowlist: paths low-risk enough to merge without a human.
    pub fn default_paths() -> Self {
        Self::new(vec![
            "resources/".to_string(),
            "docs/".to_string(),
            "README.md".to_string(),
            ".github/workflows/".to_string(),
        ])
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Whether a single filename starts with any allowlisted prefix.
    pub fn permits(&self, filename: &str) -> bool {
        self.prefixes.iter().any(|p| filename.starts_with(p))
    }

    /// Whether every changed file is allowlisted.
    ///
    /// An empty change set is vacuously eligible. That is a deliberate policy
    /// choice carried over from the original behavior: a PR with no changed
    /// files has nothing to gate on.
    pub fn covers_all(&self, files: &[ChangedFile]) -> bool {
        files.iter().all(|f| self.permits(&f.filename))
    }
}

impl Default for Allowlist {
    fn default() -> Self {
        Self::default_paths()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
