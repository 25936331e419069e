// Lexical classification: deterministic blacklist matching.
//
// The blacklist is built once at startup and shared read-only. The matcher
// runs three passes over canonical text (exact token, token n-grams, coarse
// substring) and reports the first entry that fires.

pub mod blacklist;
pub mod matcher;

pub use blacklist::{Blacklist, DEFAULT_TERMS};
pub use matcher::{find_match, matches_blacklist, LexicalMatch, MatchPass};
