//! GitHub REST collaborator.
//!
//! Five calls, one per pipeline side effect: list changed files, fetch the
//! unified diff, fetch mergeability, create a comment, squash merge. Endpoint
//! paths and media types follow the v3 REST API. No internal retries — each
//! operation fails once and lets the orchestrator apply its failure policy.

use std::time::Duration;

use async_trait::async_trait;

use mergebot_core::{ChangedFile, CiState, Config, MergebotError};

use crate::orchestrator::HostApi;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const ACCEPT_JSON: &str = "application/vnd.github.v3+json";
const ACCEPT_DIFF: &str = "application/vnd.github.v3.diff";

/// Outbound request timeout (the REST API itself imposes none).
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    owner: String,
    repo: String,
}

impl GithubClient {
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .user_agent("mergebot")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: DEFAULT_BASE_URL.to_string(),
            token: config.github_token.clone(),
            owner: config.repo_owner.clone(),
            repo: config.repo_name.clone(),
        }
    }

    /// Override the API base URL. Tests point this at a local mock server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn pull_url(&self, pr_number: u64, suffix: &str) -> String {
        format!(
            "{}/repos/{}/{}/pulls/{}{}",
            self.base_url, self.owner, self.repo, pr_number, suffix
        )
    }

    async fn ensure_success(
        response: reqwest::Response,
        what: &'static str,
    ) -> Result<reqwest::Response, MergebotError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(MergebotError::fetch(
            what,
            format!("status {status}: {body}"),
        ))
    }
}

#[async_trait]
impl HostApi for GithubClient {
    async fn list_changed_files(
        &self,
        pr_number: u64,
    ) -> Result<Vec<ChangedFile>, MergebotError> {
        let response = self
            .http
            .get(self.pull_url(pr_number, "/files"))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|e| MergebotError::fetch("changed files", e.to_string()))?;
        let response = Self::ensure_success(response, "changed files").await?;
        response
            .json()
            .await
            .map_err(|e| MergebotError::fetch("changed files", e.to_string()))
    }

    async fn fetch_diff(&self, pr_number: u64) -> Result<String, MergebotError> {
        let response = self
            .http
            .get(self.pull_url(pr_number, ""))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_DIFF)
            .send()
            .await
            .map_err(|e| MergebotError::fetch("diff", e.to_string()))?;
        let response = Self::ensure_success(response, "diff").await?;
        response
            .text()
            .await
            .map_err(|e| MergebotError::fetch("diff", e.to_string()))
    }

    async fn ci_state(&self, pr_number: u64) -> Result<CiState, MergebotError> {
        let response = self
            .http
            .get(self.pull_url(pr_number, ""))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(|e| MergebotError::fetch("mergeability", e.to_string()))?;
        let response = Self::ensure_success(response, "mergeability").await?;
        response
            .json()
            .await
            .map_err(|e| MergebotError::fetch("mergeability", e.to_string()))
    }

    async fn post_comment(&self, pr_number: u64, body: &str) -> Result<(), MergebotError> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/comments",
            self.base_url, self.owner, self.repo, pr_number
        );
        let response = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await
            .map_err(|e| MergebotError::Comment {
                pr_number,
                message: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MergebotError::Comment {
                pr_number,
                message: format!("status {status}: {body}"),
            });
        }
        Ok(())
    }

    async fn merge(&self, pr_number: u64) -> Result<(), MergebotError> {
        let payload = serde_json::json!({
            "commit_title": format!("Auto-merge PR #{pr_number}"),
            "commit_message": "Automatically merged by mergebot after safety checks passed.",
            "merge_method": "squash",
        });
        let response = self
            .http
            .put(self.pull_url(pr_number, "/merge"))
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_JSON)
            .json(&payload)
            .send()
            .await
            .map_err(|e| MergebotError::Merge {
                pr_number,
                message: e.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MergebotError::Merge {
                pr_number,
                message: format!("status {status}: {body}"),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
