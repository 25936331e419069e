// Three-pass blacklist matcher.
//
// 1. exact token
// 2. contiguous token n-grams up to MAX_NGRAM tokens (catches phrases)
// 3. substring of the whole text for entries of at least MIN_SUBSTRING_LEN
//    characters
//
// Pass 3 is coarse: it catches glued-together compounds and also flags
// innocent words that happen to contain a banned entry.

use serde::Serialize;

use super::blacklist::Blacklist;

/// Longest token n-gram compared against the blacklist.
pub const MAX_NGRAM: usize = 4;

/// Shortest entry eligible for the substring pass.
pub const MIN_SUBSTRING_LEN: usize = 4;

/// Which pass produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPass {
    Token,
    Ngram,
    Substring,
}

/// A blacklist hit: the canonical entry and the pass that found it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalMatch {
    pub term: String,
    pub pass: MatchPass,
}

/// Find the first blacklist entry present in `text`.
///
/// `text` must already be canonical (see [`crate::text::canonicalize`]).
/// Empty text never matches.
pub fn find_match(blacklist: &Blacklist, text: &str) -> Option<LexicalMatch> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    if let Some(token) = tokens.iter().find(|t| blacklist.contains(t)) {
        return Some(LexicalMatch {
            term: (*token).to_string(),
            pass: MatchPass::Token,
        });
    }

    if let Some(ngram) = ngrams(&tokens, MAX_NGRAM).find(|g| blacklist.contains(g)) {
        return Some(LexicalMatch {
            term: ngram,
            pass: MatchPass::Ngram,
        });
    }

    blacklist
        .iter()
        .find(|entry| entry.len() >= MIN_SUBSTRING_LEN && text.contains(entry))
        .map(|entry| LexicalMatch {
            term: entry.to_string(),
            pass: MatchPass::Substring,
        })
}

/// True if any pass finds a blacklist entry in `text`.
pub fn matches_blacklist(blacklist: &Blacklist, text: &str) -> bool {
    find_match(blacklist, text).is_some()
}

/// All contiguous n-grams of 1..=max_len tokens, shortest first.
fn ngrams<'a>(tokens: &'a [&'a str], max_len: usize) -> impl Iterator<Item = String> + 'a {
    (1..=max_len.min(tokens.len())).flat_map(move |len| {
        tokens.windows(len).map(|window| window.join(" "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ngrams_cover_all_offsets() {
        let tokens = ["a", "b", "c"];
        let grams: Vec<String> = ngrams(&tokens, 4).collect();
        assert_eq!(grams, vec!["a", "b", "c", "a b", "b c", "a b c"]);
    }

    #[test]
    fn test_ngrams_respect_max_len() {
        let tokens = ["a", "b", "c", "d", "e"];
        assert!(ngrams(&tokens, 4).all(|g| g.split(' ').count() <= 4));
        assert_eq!(ngrams(&tokens, 4).count(), 5 + 4 + 3 + 2);
    }

    #[test]
    fn test_token_pass() {
        let blacklist = Blacklist::new(["merda"]);
        let hit = find_match(&blacklist, "que merda e esta").unwrap();
        assert_eq!(hit.pass, MatchPass::Token);
        assert_eq!(hit.term, "merda");
    }

    #[test]
    fn test_ngram_pass() {
        let blacklist = Blacklist::new(["filho da puta"]);
        let hit = find_match(&blacklist, "seu filho da puta").unwrap();
        assert_eq!(hit.pass, MatchPass::Ngram);
        assert_eq!(hit.term, "filho da puta");
    }

    #[test]
    fn test_substring_pass() {
        let blacklist = Blacklist::new(["fuck"]);
        let hit = find_match(&blacklist, "absofuckinglutely").unwrap();
        assert_eq!(hit.pass, MatchPass::Substring);
    }

    #[test]
    fn test_short_entries_skip_substring_pass() {
        let blacklist = Blacklist::new(["fdp"]);
        assert!(matches_blacklist(&blacklist, "fdp"));
        assert!(!matches_blacklist(&blacklist, "fdpx"));
    }

    #[test]
    fn test_empty_text_is_allowed() {
        let blacklist = Blacklist::default();
        assert!(find_match(&blacklist, "").is_none());
        assert!(!matches_blacklist(&blacklist, "   "));
    }
}
