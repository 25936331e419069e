// The moderation orchestrator.
//
// Linear, no retries:
//   1. remote classifier (if enabled); Block/Allow is final
//   2. remote Unparseable, timed out, or panicked: fallback policy decides
//      (lexical matcher by default, or fail open)
//   3. remote disabled: lexical matcher decides
// With no usable classifier at all the comment is let through.
//
// Nothing here is mutable after construction, so one Moderator behind an Arc
// serves any number of concurrent callers.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use anyhow::Result;
use futures::FutureExt;
use tracing::{debug, info, warn};

use super::config::{FallbackPolicy, ModerationConfig};
use super::decision::{DecisionSource, ModerationDecision};
use crate::lexical::{find_match, Blacklist};
use crate::output::truncate_chars;
use crate::remote::{GenerateClassifier, RemoteClassifier, RemoteVerdict};
use crate::text::canonicalize;

/// Decides whether comments should be blocked.
pub struct Moderator {
    blacklist: Arc<Blacklist>,
    remote: Option<Box<dyn RemoteClassifier>>,
    enable_lexical: bool,
    fallback: FallbackPolicy,
}

impl Moderator {
    /// Build a moderator from validated configuration.
    ///
    /// Fails if the configuration is inconsistent (e.g. remote enabled with no
    /// endpoint) so that misconfiguration shows up at startup.
    pub fn new(config: &ModerationConfig, blacklist: Arc<Blacklist>) -> Result<Self> {
        config.validate()?;

        let remote: Option<Box<dyn RemoteClassifier>> = if config.enable_remote {
            Some(Box::new(GenerateClassifier::from_config(config)?))
        } else {
            None
        };

        info!(
            remote = config.enable_remote,
            lexical = config.enable_lexical,
            fallback = config.fallback.as_str(),
            blacklist_terms = blacklist.len(),
            "Moderator ready"
        );

        Ok(Self {
            blacklist,
            remote,
            enable_lexical: config.enable_lexical,
            fallback: config.fallback,
        })
    }

    /// Lexical matching only, with the default fallback policy.
    pub fn lexical_only(blacklist: Arc<Blacklist>) -> Self {
        Self {
            blacklist,
            remote: None,
            enable_lexical: true,
            fallback: FallbackPolicy::Lexical,
        }
    }

    /// Use `classifier` as the remote stage, replacing any configured one.
    pub fn with_remote(mut self, classifier: impl RemoteClassifier + 'static) -> Self {
        self.remote = Some(Box::new(classifier));
        self
    }

    pub fn with_fallback(mut self, fallback: FallbackPolicy) -> Self {
        self.fallback = fallback;
        self
    }

    pub fn with_lexical(mut self, enabled: bool) -> Self {
        self.enable_lexical = enabled;
        self
    }

    pub fn blacklist(&self) -> &Blacklist {
        &self.blacklist
    }

    pub fn remote_name(&self) -> Option<&str> {
        self.remote.as_ref().map(|r| r.name())
    }

    /// Decide whether `text` should be blocked. Never fails.
    pub async fn should_block(&self, text: &str) -> ModerationDecision {
        let decision = match &self.remote {
            Some(remote) => match self.ask_remote(remote.as_ref(), text).await {
                RemoteVerdict::Block => ModerationDecision::block(DecisionSource::Remote),
                RemoteVerdict::Allow => ModerationDecision::allow(DecisionSource::Remote),
                RemoteVerdict::Unparseable => match self.fallback {
                    FallbackPolicy::Lexical => {
                        self.lexical_decision(text, DecisionSource::RemoteFallbackHeuristic)
                    }
                    FallbackPolicy::FailOpen => ModerationDecision::fail_open(),
                },
            },
            None => self.lexical_decision(text, DecisionSource::Lexical),
        };

        debug!(
            blocked = decision.blocked,
            source = %decision.source,
            matched = ?decision.matched,
            text_preview = %truncate_chars(text, 50),
            "Moderation decision"
        );

        decision
    }

    /// Call the remote stage, treating a panic inside it like any other
    /// failure to decide.
    async fn ask_remote(&self, remote: &dyn RemoteClassifier, text: &str) -> RemoteVerdict {
        match AssertUnwindSafe(remote.classify(text)).catch_unwind().await {
            Ok(verdict) => verdict,
            Err(_) => {
                warn!(
                    classifier = remote.name(),
                    "Remote classifier panicked, treating as unparseable"
                );
                RemoteVerdict::Unparseable
            }
        }
    }

    fn lexical_decision(&self, text: &str, source: DecisionSource) -> ModerationDecision {
        if !self.enable_lexical {
            return ModerationDecision::fail_open();
        }

        match find_match(&self.blacklist, &canonicalize(text)) {
            Some(hit) => ModerationDecision::block_on(source, hit.term),
            None => ModerationDecision::allow(source),
        }
    }
}
