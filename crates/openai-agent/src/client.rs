//! HTTP client for the chat-completions endpoint.

use std::time::Duration;

use crate::error::OpenAiAgentError;
use crate::types::{ChatRequest, ChatResponse};
use crate::Result;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Outbound request timeout. The API has no server-side bound we can rely
/// on; without this, a stalled completion pins its caller forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Override the API base URL. Tests point this at a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Send one chat request and return the first completion's text.
    ///
    /// Non-2xx statuses (including 429 rate limits) surface as
    /// [`OpenAiAgentError::Api`]; a 2xx response with no completion text is
    /// [`OpenAiAgentError::EmptyResponse`].
    pub async fn chat(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        tracing::debug!(model = %request.model, "sending chat completion request");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OpenAiAgentError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .first_content()
            .map(|s| s.to_string())
            .ok_or(OpenAiAgentError::EmptyResponse)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ChatRequest {
        ChatRequest::user_prompt("gpt-4", "say hello")
            .max_tokens(150)
            .temperature(0.1)
    }

    #[tokio::test]
    async fn chat_returns_first_completion_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new("test-key").with_base_url(server.url());
        let text = client.chat(&request()).await.unwrap();
        assert_eq!(text, "hello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(429)
            .with_body(r#"{"error":{"message":"rate limited"}}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new("test-key").with_base_url(server.url());
        let err = client.chat(&request()).await.unwrap_err();
        match err {
            OpenAiAgentError::Api { status, body } => {
                assert_eq!(status, 429);
                assert!(body.contains("rate limited"));
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_choices_is_empty_response_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new("test-key").with_base_url(server.url());
        let err = client.chat(&request()).await.unwrap_err();
        assert!(matches!(err, OpenAiAgentError::EmptyResponse));
    }

    #[tokio::test]
    async fn malformed_body_is_http_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = OpenAiClient::new("test-key").with_base_url(server.url());
        let err = client.chat(&request()).await.unwrap_err();
        assert!(matches!(err, OpenAiAgentError::Http(_)));
    }
}
