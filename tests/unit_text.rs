// Unit tests for text canonicalization.
//
// normalize and deobfuscate are pure, so everything here is input -> output:
// accent folding, punctuation handling, the word-internal hyphen rule,
// leetspeak mapping, and idempotency of the whole pipeline.

use commentgate::text::{canonicalize, deobfuscate, normalize};

// ============================================================
// normalize
// ============================================================

#[test]
fn normalize_folds_accents_and_case() {
    assert_eq!(normalize("Olá, Mundo!"), "ola mundo");
    assert_eq!(normalize("CORAÇÃO"), "coracao");
    assert_eq!(normalize("Über naïve façade"), "uber naive facade");
}

#[test]
fn normalize_empty_and_whitespace() {
    assert_eq!(normalize(""), "");
    assert_eq!(normalize("   \t\n "), "");
    assert_eq!(normalize("?!..."), "");
}

#[test]
fn normalize_collapses_whitespace() {
    assert_eq!(normalize("  muito   \t bom \n trabalho  "), "muito bom trabalho");
}

#[test]
fn normalize_punctuation_becomes_separator() {
    assert_eq!(normalize("bom,trabalho.obrigado"), "bom trabalho obrigado");
    assert_eq!(normalize("(isto)[aquilo]"), "isto aquilo");
}

#[test]
fn normalize_keeps_digits() {
    assert_eq!(normalize("F0DA 2024"), "f0da 2024");
}

#[test]
fn normalize_word_internal_hyphen_is_removed() {
    assert_eq!(normalize("fo-da"), "foda");
    assert_eq!(normalize("m--e--r--d--a"), "merda");
    assert_eq!(normalize("guarda-chuva"), "guardachuva");
}

#[test]
fn normalize_free_standing_hyphen_is_separator() {
    assert_eq!(normalize("isto - aquilo"), "isto aquilo");
    assert_eq!(normalize("-fim-"), "fim");
}

#[test]
fn normalize_fullwidth_letters() {
    assert_eq!(normalize("ＦＯＤＡ"), "foda");
}

#[test]
fn normalize_non_latin_script_is_dropped() {
    assert_eq!(normalize("привет мир"), "");
    assert_eq!(normalize("arte 芸術"), "arte");
}

#[test]
fn normalize_is_idempotent() {
    for input in [
        "Que caralho é isto?",
        "  ÇÃO  fo-da  ",
        "c@r4lh0!!",
        "guarda—chuva",
        "",
    ] {
        let once = normalize(input);
        assert_eq!(normalize(&once), once, "not idempotent for {input:?}");
    }
}

// ============================================================
// deobfuscate
// ============================================================

#[test]
fn deobfuscate_maps_leetspeak() {
    assert_eq!(deobfuscate("f0d4"), "foda");
    assert_eq!(deobfuscate("m3rd4"), "merda");
    assert_eq!(deobfuscate("5h17"), "shit");
    assert_eq!(deobfuscate("c@ralho"), "caralho");
    assert_eq!(deobfuscate("$hit"), "shit");
}

#[test]
fn deobfuscate_leaves_other_digits_alone() {
    assert_eq!(deobfuscate("2 8 9 6"), "2 8 9 6");
}

#[test]
fn deobfuscate_is_idempotent() {
    let once = deobfuscate("p0rr4 $@1");
    assert_eq!(deobfuscate(&once), once);
}

// ============================================================
// canonicalize (normalize, then deobfuscate)
// ============================================================

#[test]
fn canonicalize_chains_both_steps() {
    assert_eq!(canonicalize("Que M3RD4!"), "que merda");
    assert_eq!(canonicalize("Isso é F0-D4"), "isso e foda");
}

#[test]
fn canonicalize_symbols_are_gone_before_deobfuscation() {
    // normalize runs first, so '@' inside running text is already a separator
    assert_eq!(canonicalize("c@ralho"), "c ralho");
}

#[test]
fn canonicalize_is_idempotent() {
    for input in ["Isso é F0DA!!", "  C@r4lh0 -- p0rr4?! ", "hello friend"] {
        let once = canonicalize(input);
        assert_eq!(canonicalize(&once), once, "not idempotent for {input:?}");
    }
}
