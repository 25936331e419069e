// Batch review: many comments through intake, concurrently.
//
// Each comment is independent, so they fan out through buffer_unordered and
// are put back in input order afterwards. One shared Moderator serves every
// task.

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use serde::Serialize;

use crate::moderation::{review_comment, CommentPolicy, IntakeError, ModerationDecision, Moderator};

/// Default number of comments reviewed at once.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// The outcome for one comment of a batch.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Position in the input, starting at zero.
    pub index: usize,
    pub text: String,
    pub outcome: Result<ModerationDecision, IntakeError>,
}

impl BatchItem {
    pub fn accepted(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Counts per outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub accepted: usize,
    pub offensive: usize,
    pub too_long: usize,
    pub empty: usize,
}

impl BatchSummary {
    pub fn from_items(items: &[BatchItem]) -> Self {
        let mut summary = Self {
            total: items.len(),
            ..Default::default()
        };
        for item in items {
            match &item.outcome {
                Ok(_) => summary.accepted += 1,
                Err(IntakeError::Offensive { .. }) => summary.offensive += 1,
                Err(IntakeError::TooLong { .. }) => summary.too_long += 1,
                Err(IntakeError::Empty) => summary.empty += 1,
            }
        }
        summary
    }

    pub fn rejected(&self) -> usize {
        self.total - self.accepted
    }
}

/// Review every comment, at most `concurrency` at a time.
///
/// The progress bar is advanced once per finished comment; pass
/// `ProgressBar::hidden()` when no display is wanted. Results come back in
/// input order.
pub async fn review_batch(
    moderator: &Moderator,
    policy: &CommentPolicy,
    comments: Vec<String>,
    concurrency: usize,
    progress: &ProgressBar,
) -> Vec<BatchItem> {
    let mut items: Vec<BatchItem> = stream::iter(comments.into_iter().enumerate().map(
        |(index, text)| async move {
            let outcome = review_comment(moderator, policy, &text).await;
            BatchItem {
                index,
                text,
                outcome,
            }
        },
    ))
    .buffer_unordered(concurrency.max(1))
    .inspect(|_| progress.inc(1))
    .collect()
    .await;

    items.sort_by_key(|item| item.index);
    items
}

/// Split input text into comments: one per line, blank lines skipped.
pub fn comments_from_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::Blacklist;
    use crate::moderation::DecisionSource;
    use std::sync::Arc;

    #[test]
    fn test_comments_from_lines_skips_blanks() {
        let input = "primeiro\r\n\n   \nsegundo comentário\n";
        assert_eq!(
            comments_from_lines(input),
            vec!["primeiro".to_string(), "segundo comentário".to_string()]
        );
    }

    #[tokio::test]
    async fn test_review_batch_keeps_input_order() {
        let moderator = Moderator::lexical_only(Arc::new(Blacklist::default()));
        let policy = CommentPolicy { max_chars: 20 };
        let comments = vec![
            "Lindo quadro".to_string(),
            "que merda".to_string(),
            "x".repeat(21),
            "gostei muito".to_string(),
        ];

        let items = review_batch(&moderator, &policy, comments, 3, &ProgressBar::hidden()).await;

        let indexes: Vec<usize> = items.iter().map(|i| i.index).collect();
        assert_eq!(indexes, vec![0, 1, 2, 3]);
        assert!(items[0].accepted());
        assert_eq!(
            items[1].outcome,
            Err(IntakeError::Offensive {
                decided_by: DecisionSource::Lexical
            })
        );
        assert!(matches!(items[2].outcome, Err(IntakeError::TooLong { .. })));
        assert!(items[3].accepted());

        let summary = BatchSummary::from_items(&items);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.accepted, 2);
        assert_eq!(summary.offensive, 1);
        assert_eq!(summary.too_long, 1);
        assert_eq!(summary.rejected(), 2);
    }

    #[tokio::test]
    async fn test_zero_concurrency_still_runs() {
        let moderator = Moderator::lexical_only(Arc::new(Blacklist::default()));
        let items = review_batch(
            &moderator,
            &CommentPolicy::default(),
            vec!["ok".to_string()],
            0,
            &ProgressBar::hidden(),
        )
        .await;
        assert_eq!(items.len(), 1);
    }
}
