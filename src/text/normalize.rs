// Unicode-aware normalization for comment text.
//
// Decomposes with NFKD so accented letters split into a base letter plus a
// combining mark, drops the marks, lower-cases, and replaces anything outside
// `[a-z0-9]` and whitespace with a space. Hyphens inside a word are removed
// outright so "fo-da" reads as one token instead of two.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Hyphen-like characters that join two halves of a word.
const HYPHENS: [char; 4] = ['-', '\u{2010}', '\u{2011}', '\u{00AD}'];

/// Canonicalize raw text for lexical comparison.
///
/// The output only contains `[a-z0-9 ]`, has no leading, trailing or repeated
/// spaces, and is a fixed point: `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let folded: Vec<char> = text
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect();

    let mut out = String::with_capacity(folded.len());
    let mut i = 0;
    while i < folded.len() {
        let c = folded[i];

        if is_hyphen(c) {
            let mut end = i;
            while end < folded.len() && is_hyphen(folded[end]) {
                end += 1;
            }
            let inside_word =
                i > 0 && is_word_char(folded[i - 1]) && folded.get(end).is_some_and(|n| is_word_char(*n));
            if !inside_word {
                out.push(' ');
            }
            i = end;
            continue;
        }

        if is_word_char(c) || c.is_whitespace() {
            out.push(c);
        } else {
            out.push(' ');
        }
        i += 1;
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_hyphen(c: char) -> bool {
    HYPHENS.contains(&c)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit()
}
