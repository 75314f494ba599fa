//! `openai-agent` — minimal typed client for the OpenAI chat-completions API.
//!
//! This crate covers exactly what mergebot needs from the API: send one
//! prompt, get one completion back as text. No streaming, no tool calls.
//!
//! ```rust,ignore
//! use openai_agent::{ChatRequest, OpenAiClient};
//!
//! let client = OpenAiClient::new("sk-...");
//! let req = ChatRequest::user_prompt("gpt-4", "Review this diff…")
//!     .max_tokens(150)
//!     .temperature(0.1);
//! let text = client.chat(&req).await?;
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::OpenAiClient;
pub use error::OpenAiAgentError;
pub use types::{ChatMessage, ChatRequest, ChatResponse};

/// Convenience `Result` alias for this crate.
pub type Result<T> = std::result::Result<T, OpenAiAgentError>;
