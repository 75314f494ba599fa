//! Runtime configuration.
//!
//! Values come from CLI flags / environment (see `mergebot-cli`); this
//! struct is what gets injected into the server and its collaborators.
//! No component reads the environment on its own.

use crate::allowlist::Allowlist;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Shared secret for webhook signature verification.
    pub webhook_secret: String,
    /// Bearer token for the source-control host API.
    pub github_token: String,
    pub repo_owner: String,
    pub repo_name: String,
    #[serde(default)]
    pub allowlist: Allowlist,
    /// API key for the text-generation service.
    pub openai_api_key: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database_url: String,
}

fn default_model() -> String {
    "gpt-4".to_string()
}

fn default_temperature() -> f32 {
    0.1
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// `owner/name` slug used in host API paths.
    pub fn repo(&self) -> String {
        format!("{}/{}", self.repo_owner, self.repo_name)
    }
}
