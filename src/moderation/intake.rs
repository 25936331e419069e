// Comment intake: the checks a comment passes before it may be persisted.
//
// Cheap structural checks run first (empty, too long) so an invalid comment
// never costs a remote call. Only then is the text moderated.

use thiserror::Error;

use super::decision::{DecisionSource, ModerationDecision};
use super::moderator::Moderator;

/// Default maximum comment length, in characters.
pub const DEFAULT_MAX_COMMENT_CHARS: usize = 140;

/// Structural limits for a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentPolicy {
    pub max_chars: usize,
}

impl Default for CommentPolicy {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_COMMENT_CHARS,
        }
    }
}

/// Why a comment was rejected. Messages are shown to the commenter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntakeError {
    #[error("Comment is empty")]
    Empty,

    #[error("Comment is too long ({length} characters, maximum is {max})")]
    TooLong { length: usize, max: usize },

    #[error("Comment contains inappropriate language")]
    Offensive { decided_by: DecisionSource },
}

/// Structural checks only; no moderation.
pub fn check_comment(policy: &CommentPolicy, text: &str) -> Result<(), IntakeError> {
    if text.trim().is_empty() {
        return Err(IntakeError::Empty);
    }

    let length = text.chars().count();
    if length > policy.max_chars {
        return Err(IntakeError::TooLong {
            length,
            max: policy.max_chars,
        });
    }

    Ok(())
}

/// Run the structural checks, then moderate. Returns the (allowing) decision
/// when the comment may be stored.
pub async fn review_comment(
    moderator: &Moderator,
    policy: &CommentPolicy,
    text: &str,
) -> Result<ModerationDecision, IntakeError> {
    check_comment(policy, text)?;

    let decision = moderator.should_block(text).await;
    if decision.blocked {
        return Err(IntakeError::Offensive {
            decided_by: decision.source,
        });
    }

    Ok(decision)
}
