//! Upstream mergeability state and the merge decision.

use crate::verdict::ReviewVerdict;
use serde::{Deserialize, Serialize};

/// Host-computed readiness classification for a pull request.
///
/// `clean` means no conflicts and all required checks satisfied; only that
/// state permits an automatic merge. Values we do not model explicitly
/// deserialize as `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeableState {
    Clean,
    Unstable,
    Dirty,
    Blocked,
    Behind,
    Draft,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Mergeability snapshot fetched per review cycle, never cached.
///
/// GitHub computes `mergeable` asynchronously and reports `null` until it is
/// known; `#[serde(default)]` turns that into `false`, which is the safe
/// direction for an auto-merger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CiState {
    #[serde(default, deserialize_with = "null_as_false")]
    pub mergeable: bool,
    #[serde(default)]
    pub mergeable_state: MergeableState,
}

fn null_as_false<'de, D>(de: D) -> Result<bool, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(de)?.unwrap_or(false))
}

/// The merge decision: a pure conjunction of the four gates.
///
/// `eligible ∧ verdict.is_pass ∧ ci.mergeable ∧ ci.mergeable_state == clean`
/// — no hidden state, deterministic for identical inputs.
pub fn should_merge(eligible: bool, verdict: &ReviewVerdict, ci: &CiState) -> bool {
    eligible && verdict.is_pass() && ci.mergeable && ci.mergeable_state == MergeableState::Clean
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
