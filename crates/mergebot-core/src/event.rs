//! Inbound webhook payload model.

use serde::Deserialize;

/// Actions on `pull_request` events that we care about. Everything else
/// collapses into `Other` and is acknowledged but ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullRequestAction {
    Opened,
    Synchronize,
    #[default]
    #[serde(other)]
    Other,
}

impl PullRequestAction {
    /// Whether this action starts a review cycle.
    pub fn triggers_review(self) -> bool {
        matches!(self, Self::Opened | Self::Synchronize)
    }
}

/// The slice of a webhook body the pipeline needs. The raw bytes are
/// verified before this is ever parsed; fields beyond these are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub action: PullRequestAction,
    /// PR number. Absent on non-PR events.
    #[serde(default)]
    pub number: Option<u64>,
}

/// One changed file in a pull request, as reported by the host's
/// list-files endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChangedFile {
    pub filename: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
