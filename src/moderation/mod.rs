// Moderation orchestration: one comment in, one decision out.
//
// The Moderator asks the remote classifier first when one is configured and
// falls back to the lexical matcher (or fails open, depending on policy) when
// the remote can't decide. Intake wraps that with the length checks a comment
// box enforces before anything is persisted.

pub mod config;
pub mod decision;
pub mod intake;
pub mod moderator;

pub use config::{FallbackPolicy, ModerationConfig};
pub use decision::{DecisionSource, ModerationDecision};
pub use intake::{check_comment, review_comment, CommentPolicy, IntakeError};
pub use moderator::Moderator;
