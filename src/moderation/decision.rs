// Moderation decision types.
//
// A decision is a boolean plus the stage that produced it. Callers only need
// `blocked`; `source` and `matched` are for logs and for telling the user why.

use serde::Serialize;

/// Which stage produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecisionSource {
    /// Lexical matcher, remote classification disabled.
    Lexical,
    /// The remote classifier answered.
    Remote,
    /// The remote classifier was tried but couldn't decide; lexical matcher decided.
    RemoteFallbackHeuristic,
    /// No classifier could decide, so the comment was let through.
    FailOpen,
}

impl DecisionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionSource::Lexical => "lexical",
            DecisionSource::Remote => "remote",
            DecisionSource::RemoteFallbackHeuristic => "remote-fallback-heuristic",
            DecisionSource::FailOpen => "fail-open",
        }
    }
}

impl std::fmt::Display for DecisionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The outcome of moderating one comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModerationDecision {
    /// Whether the comment should be rejected.
    pub blocked: bool,
    /// Which stage decided.
    pub source: DecisionSource,
    /// The blacklist entry that fired, for lexical blocks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched: Option<String>,
}

impl ModerationDecision {
    /// A "let it through" decision from `source`.
    pub fn allow(source: DecisionSource) -> Self {
        Self {
            blocked: false,
            source,
            matched: None,
        }
    }

    /// A "reject" decision from `source`.
    pub fn block(source: DecisionSource) -> Self {
        Self {
            blocked: true,
            source,
            matched: None,
        }
    }

    /// A lexical block naming the entry that matched.
    pub fn block_on(source: DecisionSource, term: String) -> Self {
        Self {
            blocked: true,
            source,
            matched: Some(term),
        }
    }

    /// Nothing could classify the comment.
    pub fn fail_open() -> Self {
        Self::allow(DecisionSource::FailOpen)
    }
}
