//! AI review verdict parsing.
//!
//! The model is instructed to answer with a line starting `PASS:` or
//! `FAIL:`. Classification is an exact leading-token check on the trimmed
//! response. Deliberately no fuzzy matching: `"Passed"`, `"pass:"`, or a
//! verdict buried mid-sentence all classify as `Fail`, the safe default.

use serde::{Deserialize, Serialize};

/// Text posted (and persisted) when the review service cannot be reached.
pub const SERVICE_UNAVAILABLE: &str = "FAIL: AI review service unavailable";

/// Outcome of one AI review. The payload is the full trimmed response text,
/// so the exact model output survives into comments and the audit log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", content = "text", rename_all = "snake_case")]
pub enum ReviewVerdict {
    Pass(String),
    Fail(String),
}

impl ReviewVerdict {
    /// Classify a raw model response.
    ///
    /// `Pass` iff the trimmed text starts with the literal `PASS:`; every
    /// other shape — `FAIL:`-prefixed, unprefixed, empty — is `Fail`.
    pub fn parse(response: &str) -> Self {
        let trimmed = response.trim();
        if trimmed.starts_with("PASS:") {
            Self::Pass(trimmed.to_string())
        } else {
            Self::Fail(trimmed.to_string())
        }
    }

    /// The fixed verdict substituted when the review call itself fails.
    pub fn service_unavailable() -> Self {
        Self::Fail(SERVICE_UNAVAILABLE.to_string())
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Self::Pass(_))
    }

    /// The full response text, whichever way it classified.
    pub fn text(&self) -> &str {
        match self {
            Self::Pass(t) | Self::Fail(t) => t,
        }
    }
}

impl std::fmt::Display for ReviewVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
