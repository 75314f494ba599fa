//! The append-only review audit record.

use crate::event::ChangedFile;
use crate::verdict::ReviewVerdict;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of the review audit log: exactly one is written per completed
/// review cycle, and rows are never updated or deleted by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub pr_number: u64,
    /// Full verdict text as returned by the reviewer.
    pub review_result: String,
    pub files_changed: Vec<String>,
    pub reviewed_at: DateTime<Utc>,
}

impl ReviewRecord {
    pub fn new(pr_number: u64, verdict: &ReviewVerdict, files: &[ChangedFile]) -> Self {
        Self {
            pr_number,
            review_result: verdict.text().to_string(),
            files_changed: files.iter().map(|f| f.filename.clone()).collect(),
            reviewed_at: Utc::now(),
        }
    }
}
