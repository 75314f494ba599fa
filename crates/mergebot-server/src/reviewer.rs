//! AI reviewer.
//!
//! Sends the diff and the changed-file names to the text-generation service
//! and classifies the answer. Only file *names* are exposed alongside the
//! diff; nothing else about the PR reaches the model. A transport, rate-limit,
//! or service error is downgraded locally to the fixed `Fail` verdict — an
//! unreachable review service must never abort a cycle.

use async_trait::async_trait;
use tracing::warn;

use mergebot_core::{ChangedFile, ReviewVerdict};
use openai_agent::{ChatRequest, OpenAiClient};

use crate::orchestrator::VerdictSource;

/// Token budget for the fixed-format response. The instructed reply is at
/// most ~200 characters, so this leaves comfortable headroom.
const MAX_TOKENS: u32 = 150;

pub struct AiReviewer {
    client: OpenAiClient,
    model: String,
    temperature: f32,
}

impl AiReviewer {
    pub fn new(client: OpenAiClient, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
        }
    }

    fn build_prompt(diff: &str, files: &[ChangedFile]) -> String {
        let file_list = files
            .iter()
            .map(|f| f.filename.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "You are an automated code reviewer for a project repository. \
             Review the following changes and provide a security and safety assessment.\n\
             \n\
             Focus on:\n\
             1. Security vulnerabilities (injection, unsafe file operations, credential leaks)\n\
             2. Breaking changes that could take down the service\n\
             3. Malicious code or backdoors\n\
             \n\
             Files changed: {file_list}\n\
             \n\
             Code diff:\n\
             {diff}\n\
             \n\
             Respond with either:\n\
             - \"PASS: [brief reason]\" if the changes are safe\n\
             - \"FAIL: [specific concern]\" if there are issues\n\
             \n\
             Keep your response concise (max 200 characters)."
        )
    }
}

#[async_trait]
impl VerdictSource for AiReviewer {
    async fn review(&self, diff: &str, files: &[ChangedFile]) -> ReviewVerdict {
        let request = ChatRequest::user_prompt(&self.model, Self::build_prompt(diff, files))
            .max_tokens(MAX_TOKENS)
            .temperature(self.temperature);

        match self.client.chat(&request).await {
            Ok(text) => ReviewVerdict::parse(&text),
            Err(err) => {
                warn!(error = %err, "AI review call failed; falling back to Fail verdict");
                ReviewVerdict::service_unavailable()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
