use thiserror::Error;

#[derive(Debug, Error)]
pub enum MergebotError {
    #[error("invalid webhook signature")]
    InvalidSignature,

    #[error("failed to fetch {what}: {message}")]
    Fetch { what: &'static str, message: String },

    #[error("AI review service error: {0}")]
    ReviewService(String),

    #[error("failed to persist review record: {0}")]
    Persistence(String),

    #[error("failed to post comment on PR #{pr_number}: {message}")]
    Comment { pr_number: u64, message: String },

    #[error("failed to merge PR #{pr_number}: {message}")]
    Merge { pr_number: u64, message: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl MergebotError {
    pub fn fetch(what: &'static str, message: impl Into<String>) -> Self {
        Self::Fetch {
            what,
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MergebotError>;
