// Text canonicalization for lexical comparison.
//
// Raw comments go through two pure steps before they are compared against the
// blacklist: normalization (accents, case, punctuation, whitespace) and then
// deobfuscation (leetspeak digits and symbols). Blacklist entries go through
// the exact same pipeline so both sides live in the same alphabet.

pub mod deobfuscate;
pub mod normalize;

pub use deobfuscate::deobfuscate;
pub use normalize::normalize;

/// Normalize, then deobfuscate. This is the form the lexical matcher expects.
pub fn canonicalize(text: &str) -> String {
    deobfuscate(&normalize(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonicalize_strips_accents_and_leetspeak() {
        assert_eq!(canonicalize("Isso é F0DA!!"), "isso e foda");
    }

    #[test]
    fn test_canonicalize_is_idempotent() {
        let once = canonicalize("  C@r4lh0 -- p0rr4?! ");
        assert_eq!(canonicalize(&once), once);
    }
}
