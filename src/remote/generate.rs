// Text-generation endpoint classifier.
//
// Sends a fixed yes/no moderation prompt as `{model, prompt, stream: false}`
// (the Ollama /api/generate request shape, which most self-hosted gateways
// accept) and reads the answer with the extraction strategies in `extract`.
// The reqwest client carries a hard timeout; hitting it is handled exactly
// like any other transport failure.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use super::extract::verdict_from_body;
use super::traits::{RemoteClassifier, RemoteError, RemoteVerdict};
use crate::moderation::config::ModerationConfig;
use crate::output::truncate_chars;

/// Remote classifier backed by an HTTP text-generation endpoint.
pub struct GenerateClassifier {
    client: Client,
    endpoint_url: String,
    model: String,
    timeout: Duration,
}

impl GenerateClassifier {
    /// Create a classifier for `endpoint_url` using `model`, giving up on any
    /// single request after `timeout`.
    pub fn new(endpoint_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("commentgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            endpoint_url: endpoint_url.to_string(),
            model: model.to_string(),
            timeout,
        })
    }

    /// Build from moderation config. The config must name an endpoint.
    pub fn from_config(config: &ModerationConfig) -> Result<Self> {
        let endpoint = config
            .endpoint_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .context("Remote classifier needs an endpoint URL")?;
        Self::new(endpoint, &config.model, config.timeout())
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }

    async fn request_verdict(&self, text: &str) -> Result<RemoteVerdict, RemoteError> {
        let request = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(text),
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint_url)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: truncate_chars(&body, 200),
            });
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                RemoteError::Timeout(self.timeout)
            } else {
                RemoteError::Body(e.to_string())
            }
        })?;

        Ok(verdict_from_body(&body))
    }

    fn transport_error(&self, error: reqwest::Error) -> RemoteError {
        if error.is_timeout() {
            RemoteError::Timeout(self.timeout)
        } else {
            RemoteError::Http(error.to_string())
        }
    }
}

#[async_trait]
impl RemoteClassifier for GenerateClassifier {
    fn name(&self) -> &str {
        "generate"
    }

    async fn classify(&self, text: &str) -> RemoteVerdict {
        match self.request_verdict(text).await {
            Ok(verdict) => {
                debug!(
                    verdict = ?verdict,
                    model = %self.model,
                    text_preview = %truncate_chars(text, 50),
                    "Remote classifier answered"
                );
                verdict
            }
            Err(e) => {
                warn!(
                    error = %e,
                    endpoint = %self.endpoint_url,
                    "Remote classifier failed, treating as unparseable"
                );
                RemoteVerdict::Unparseable
            }
        }
    }
}

/// The moderation question sent to the model. The comment is fenced so the
/// model can't confuse it with the instructions.
pub fn build_prompt(text: &str) -> String {
    format!(
        "És um moderador de comentários de uma galeria de arte online.\n\
         O comentário abaixo contém linguagem ofensiva, insultos, obscenidades \
         ou discurso de ódio, em qualquer língua?\n\
         Responde apenas com uma palavra: SIM ou NAO.\n\n\
         Comentário:\n\"\"\"\n{text}\n\"\"\"\n\n\
         Resposta:"
    )
}

// --- Generate API request type ---

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_fences_comment() {
        let prompt = build_prompt("olá mundo");
        assert!(prompt.contains("\"\"\"\nolá mundo\n\"\"\""));
        assert!(prompt.contains("SIM ou NAO"));
    }

    #[test]
    fn test_request_serialization() {
        let request = GenerateRequest {
            model: "llama3",
            prompt: "p".to_string(),
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"model": "llama3", "prompt": "p", "stream": false})
        );
    }

    #[test]
    fn test_from_config_requires_endpoint() {
        let config = ModerationConfig::default();
        assert!(GenerateClassifier::from_config(&config).is_err());

        let config = ModerationConfig {
            endpoint_url: Some("http://localhost:11434/api/generate".to_string()),
            ..Default::default()
        };
        let classifier = GenerateClassifier::from_config(&config).unwrap();
        assert_eq!(classifier.endpoint_url(), "http://localhost:11434/api/generate");
    }
}
