use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::moderation::config::{
    FallbackPolicy, ModerationConfig, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS,
};
use crate::moderation::intake::{CommentPolicy, DEFAULT_MAX_COMMENT_CHARS};

pub const ENV_ENDPOINT_URL: &str = "COMMENTGATE_ENDPOINT_URL";
pub const ENV_MODEL: &str = "COMMENTGATE_MODEL";
pub const ENV_TIMEOUT_SECS: &str = "COMMENTGATE_TIMEOUT_SECS";
pub const ENV_REMOTE: &str = "COMMENTGATE_REMOTE";
pub const ENV_LEXICAL: &str = "COMMENTGATE_LEXICAL";
pub const ENV_FALLBACK: &str = "COMMENTGATE_FALLBACK";
pub const ENV_BLACKLIST_FILE: &str = "COMMENTGATE_BLACKLIST_FILE";
pub const ENV_MAX_COMMENT_CHARS: &str = "COMMENTGATE_MAX_COMMENT_CHARS";

/// Central configuration loaded from environment variables.
///
/// Read once at startup. The .env file is loaded automatically by the
/// binary via dotenvy before this runs.
#[derive(Debug, Clone)]
pub struct Config {
    /// Engine options handed to the Moderator.
    pub moderation: ModerationConfig,
    /// Extra blacklist terms, one per line.
    pub blacklist_file: Option<PathBuf>,
    /// Longest comment accepted by intake, in characters.
    pub max_comment_chars: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Everything has a default. Remote classification switches on by itself
    /// when an endpoint is set, unless COMMENTGATE_REMOTE says otherwise.
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let endpoint_url = get(ENV_ENDPOINT_URL).map(|v| v.trim().to_string());

        let enable_remote = match get(ENV_REMOTE) {
            Some(v) => parse_bool(ENV_REMOTE, &v)?,
            None => endpoint_url.is_some(),
        };

        let enable_lexical = match get(ENV_LEXICAL) {
            Some(v) => parse_bool(ENV_LEXICAL, &v)?,
            None => true,
        };

        let timeout_secs = match get(ENV_TIMEOUT_SECS) {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .with_context(|| format!("{ENV_TIMEOUT_SECS} must be a whole number of seconds, got {v:?}"))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let fallback = match get(ENV_FALLBACK) {
            Some(v) => v
                .parse::<FallbackPolicy>()
                .with_context(|| format!("Invalid {ENV_FALLBACK}"))?,
            None => FallbackPolicy::default(),
        };

        let max_comment_chars = match get(ENV_MAX_COMMENT_CHARS) {
            Some(v) => v
                .trim()
                .parse::<usize>()
                .with_context(|| format!("{ENV_MAX_COMMENT_CHARS} must be a whole number, got {v:?}"))?,
            None => DEFAULT_MAX_COMMENT_CHARS,
        };

        Ok(Self {
            moderation: ModerationConfig {
                endpoint_url,
                model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                timeout_secs,
                enable_remote,
                enable_lexical,
                fallback,
            },
            blacklist_file: get(ENV_BLACKLIST_FILE).map(PathBuf::from),
            max_comment_chars,
        })
    }

    /// Check that the configuration is usable before building a moderator.
    pub fn validate(&self) -> Result<()> {
        self.moderation.validate()?;

        if self.max_comment_chars == 0 {
            anyhow::bail!("{ENV_MAX_COMMENT_CHARS} must be greater than zero");
        }

        if let Some(path) = &self.blacklist_file {
            if !path.is_file() {
                anyhow::bail!(
                    "Blacklist file not found: {}\n\
                     Unset {ENV_BLACKLIST_FILE} or point it at a readable file.",
                    path.display()
                );
            }
        }

        Ok(())
    }

    pub fn comment_policy(&self) -> CommentPolicy {
        CommentPolicy {
            max_chars: self.max_comment_chars,
        }
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        other => anyhow::bail!("{key} must be a boolean (true/false, on/off, 1/0), got {other:?}"),
    }
}
