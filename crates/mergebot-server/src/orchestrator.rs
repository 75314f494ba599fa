//! The per-PR review cycle.
//!
//! One cycle runs the full pipeline for a single pull request:
//!
//! ```text
//! Received → FilesFetched → DiffFetched → Reviewed → Persisted
//!          → Commented → CIChecked → {Merged | NotMerged}
//! ```
//!
//! Transitions are strictly sequential. A fetch failure (files, diff, CI) or
//! a merge failure aborts the cycle into `Failed`, which posts a best-effort
//! "manual review required" comment. Everything else degrades toward "do not
//! auto-merge": an unreachable AI service becomes a `Fail` verdict, a storage
//! outage is logged and swallowed, a failed review comment is a warning.
//!
//! Collaborators are injected behind object-safe traits so cycles run
//! against in-memory substitutes in tests. Cycles share no mutable state
//! besides the append-only record sink, so concurrent cycles for different
//! PRs are independent. Duplicate deliveries for the same PR are *not*
//! deduplicated — a retried webhook runs a second full cycle.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};

use mergebot_core::{
    should_merge, Allowlist, ChangedFile, CiState, MergebotError, ReviewRecord, ReviewVerdict,
};

// ---------------------------------------------------------------------------
// Collaborator traits
// ---------------------------------------------------------------------------

/// Source-control host operations the cycle needs.
#[async_trait]
pub trait HostApi: Send + Sync {
    async fn list_changed_files(
        &self,
        pr_number: u64,
    ) -> Result<Vec<ChangedFile>, MergebotError>;

    async fn fetch_diff(&self, pr_number: u64) -> Result<String, MergebotError>;

    async fn ci_state(&self, pr_number: u64) -> Result<CiState, MergebotError>;

    async fn post_comment(&self, pr_number: u64, body: &str) -> Result<(), MergebotError>;

    /// Squash-merge the PR with the fixed commit template.
    async fn merge(&self, pr_number: u64) -> Result<(), MergebotError>;
}

/// Produces a verdict for a change set. Infallible by contract: a reviewer
/// that cannot reach its service must return a `Fail` verdict, not an error.
#[async_trait]
pub trait VerdictSource: Send + Sync {
    async fn review(&self, diff: &str, files: &[ChangedFile]) -> ReviewVerdict;
}

/// Append-only audit log for review records.
#[async_trait]
pub trait RecordSink: Send + Sync {
    async fn append(&self, record: &ReviewRecord) -> Result<(), MergebotError>;
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Terminal state of one review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    Merged,
    NotMerged,
    Failed,
}

// ---------------------------------------------------------------------------
// Comment bodies
// ---------------------------------------------------------------------------

const MERGE_NOTICE: &str = "**Auto-merged** by mergebot after all safety checks passed.";
const FAILURE_NOTICE: &str = "**AI review failed** - manual review required.";

fn review_comment(verdict: &ReviewVerdict, eligible: bool) -> String {
    let allowlist_line = if eligible {
        "All changed files are in allowlisted paths"
    } else {
        "Files outside allowlisted paths detected"
    };
    format!("**AI Review Result**\n\n{verdict}\n\n{allowlist_line}")
}

// ---------------------------------------------------------------------------
// Orchestrator
// ---------------------------------------------------------------------------

/// Sequences one review cycle per invocation. Reentrant: holds no per-cycle
/// state, so concurrent invocations for different PR numbers are safe.
pub struct Orchestrator {
    host: Arc<dyn HostApi>,
    reviewer: Arc<dyn VerdictSource>,
    sink: Arc<dyn RecordSink>,
    allowlist: Allowlist,
}

impl Orchestrator {
    pub fn new(
        host: Arc<dyn HostApi>,
        reviewer: Arc<dyn VerdictSource>,
        sink: Arc<dyn RecordSink>,
        allowlist: Allowlist,
    ) -> Self {
        Self {
            host,
            reviewer,
            sink,
            allowlist,
        }
    }

    /// Run one full review cycle for a PR.
    ///
    /// Never returns an error: fatal failures resolve to
    /// [`CycleOutcome::Failed`] after the best-effort failure notice.
    pub async fn run_cycle(&self, pr_number: u64) -> CycleOutcome {
        match self.try_cycle(pr_number).await {
            Ok(outcome) => outcome,
            Err(err) => {
                error!(pr = pr_number, error = %err, "review cycle failed");
                // Best-effort terminal notice; its own failure is swallowed.
                if let Err(e) = self.host.post_comment(pr_number, FAILURE_NOTICE).await {
                    warn!(pr = pr_number, error = %e, "failed to post failure notice");
                }
                CycleOutcome::Failed
            }
        }
    }

    async fn try_cycle(&self, pr_number: u64) -> Result<CycleOutcome, MergebotError> {
        info!(pr = pr_number, "starting review cycle");

        let files = self.host.list_changed_files(pr_number).await?;
        let diff = self.host.fetch_diff(pr_number).await?;

        let eligible = self.allowlist.covers_all(&files);
        info!(pr = pr_number, eligible, "allowlist check");

        let verdict = self.reviewer.review(&diff, &files).await;
        info!(pr = pr_number, verdict = %verdict, "AI review result");

        // Exactly one record per completed cycle; a storage outage must not
        // block the externally visible effects.
        let record = ReviewRecord::new(pr_number, &verdict, &files);
        if let Err(e) = self.sink.append(&record).await {
            warn!(pr = pr_number, error = %e, "failed to persist review record");
        }

        if let Err(e) = self
            .host
            .post_comment(pr_number, &review_comment(&verdict, eligible))
            .await
        {
            warn!(pr = pr_number, error = %e, "failed to post review comment");
        }

        // No safe default for merge-readiness: a CI query failure is fatal.
        let ci = self.host.ci_state(pr_number).await?;

        if should_merge(eligible, &verdict, &ci) {
            info!(pr = pr_number, "auto-merging");
            self.host.merge(pr_number).await?;
            if let Err(e) = self.host.post_comment(pr_number, MERGE_NOTICE).await {
                warn!(pr = pr_number, error = %e, "failed to post merge notice");
            }
            Ok(CycleOutcome::Merged)
        } else {
            info!(
                pr = pr_number,
                allowlist = eligible,
                ai_pass = verdict.is_pass(),
                mergeable = ci.mergeable,
                clean = (ci.mergeable_state == mergebot_core::MergeableState::Clean),
                "not auto-merged"
            );
            Ok(CycleOutcome::NotMerged)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
