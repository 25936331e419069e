// Remote classifier trait.
//
// Implementations must never fail outward: transport errors, bad statuses and
// unreadable bodies all collapse into RemoteVerdict::Unparseable so the
// orchestrator can fall back without any error plumbing.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

/// What the remote classifier said about a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteVerdict {
    /// The model answered with an affirmative token: the comment is offensive.
    Block,
    /// The model answered with a negative token: the comment is fine.
    Allow,
    /// No verdict could be extracted, or the call itself failed.
    Unparseable,
}

/// Failures inside a remote call. These never leave the classifier; they are
/// logged and turned into [`RemoteVerdict::Unparseable`].
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Classifier returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Trait for remote comment classifiers. Async because every real backend is
/// a network call.
#[async_trait]
pub trait RemoteClassifier: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Classify a single comment. Must not panic and must not block past the
    /// backend's own timeout.
    async fn classify(&self, text: &str) -> RemoteVerdict;
}
