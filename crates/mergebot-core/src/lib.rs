//! `mergebot-core` — domain logic for automated pull-request review.
//!
//! Everything in this crate is synchronous and side-effect free: signature
//! verification, allowlist eligibility, verdict parsing, and the merge
//! decision are all pure functions over their inputs. Network collaborators
//! (GitHub, OpenAI, Postgres) live in `mergebot-server`.

pub mod allowlist;
pub mod config;
pub mod decision;
pub mod error;
pub mod event;
pub mod record;
pub mod signature;
pub mod verdict;

pub use allowlist::Allowlist;
pub use config::Config;
pub use decision::{should_merge, CiState, MergeableState};
pub use error::{MergebotError, Result};
pub use event::{ChangedFile, PullRequestAction, WebhookPayload};
pub use record::ReviewRecord;
pub use verdict::ReviewVerdict;
