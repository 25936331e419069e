// Leetspeak reversal.
//
// Only single-character substitutions are undone. Spaced-out letters
// ("f o d a") and multi-character tricks are not handled.

/// Map each obfuscation character to the letter it imitates.
///
/// None of the outputs is itself a mapped character, so applying this twice
/// gives the same result as applying it once.
pub fn deobfuscate(text: &str) -> String {
    text.chars().map(substitute).collect()
}

fn substitute(c: char) -> char {
    match c {
        '0' => 'o',
        '1' => 'i',
        '3' => 'e',
        '4' => 'a',
        '5' => 's',
        '7' => 't',
        '@' => 'a',
        '$' => 's',
        other => other,
    }
}
