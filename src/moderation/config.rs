// Moderation engine configuration.

use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Default model identifier sent to the generation endpoint.
pub const DEFAULT_MODEL: &str = "llama3";

/// Default remote request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// What to do when the remote classifier can't produce a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FallbackPolicy {
    /// Let the lexical matcher decide.
    #[default]
    Lexical,
    /// Let the comment through.
    FailOpen,
}

impl FallbackPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackPolicy::Lexical => "lexical",
            FallbackPolicy::FailOpen => "fail-open",
        }
    }
}

impl FromStr for FallbackPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lexical" => Ok(FallbackPolicy::Lexical),
            "fail-open" | "fail_open" | "failopen" => Ok(FallbackPolicy::FailOpen),
            other => anyhow::bail!("Unknown fallback policy {other:?} (expected \"lexical\" or \"fail-open\")"),
        }
    }
}

/// Options for one Moderator. Immutable once the moderator is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationConfig {
    /// Generation endpoint, e.g. `http://localhost:11434/api/generate`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    /// Model identifier passed in the request body.
    #[serde(default = "default_model")]
    pub model: String,
    /// Hard timeout for one remote request.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Ask the remote classifier first.
    #[serde(default)]
    pub enable_remote: bool,
    /// Run the lexical matcher (alone, or as the fallback).
    #[serde(default = "default_true")]
    pub enable_lexical: bool,
    /// Behaviour when the remote classifier can't decide.
    #[serde(default)]
    pub fallback: FallbackPolicy,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

impl Default for ModerationConfig {
    fn default() -> Self {
        Self {
            endpoint_url: None,
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            enable_remote: false,
            enable_lexical: true,
            fallback: FallbackPolicy::default(),
        }
    }
}

impl ModerationConfig {
    /// Remote classification against `endpoint_url`, lexical fallback.
    pub fn with_remote(endpoint_url: impl Into<String>) -> Self {
        Self {
            endpoint_url: Some(endpoint_url.into()),
            enable_remote: true,
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the configuration.
    ///
    /// Problems here are programming or deployment errors, so they surface
    /// when the moderator is built rather than on each comment.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            anyhow::bail!("timeout_secs must be greater than zero");
        }

        if self.enable_remote {
            let endpoint = self
                .endpoint_url
                .as_deref()
                .map(str::trim)
                .unwrap_or_default();
            if endpoint.is_empty() {
                anyhow::bail!("Remote classification is enabled but no endpoint URL is configured");
            }
            let url = Url::parse(endpoint)
                .with_context(|| format!("Endpoint URL is not a valid URL: {endpoint:?}"))?;
            if !matches!(url.scheme(), "http" | "https") {
                anyhow::bail!("Endpoint URL must start with http:// or https://, got {endpoint:?}");
            }
            if self.model.trim().is_empty() {
                anyhow::bail!("Remote classification is enabled but the model name is empty");
            }
        }

        Ok(())
    }
}
