use thiserror::Error;

#[derive(Debug, Error)]
pub enum OpenAiAgentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("response contained no completion text")]
    EmptyResponse,
}
