// Verdict extraction from heterogeneous generation responses.
//
// Different servers wrap the generated text differently: Ollama puts it in a
// top-level `response` string, Hugging Face returns a list of objects, the
// Responses and Gemini APIs nest typed parts inside content, and OpenAI-style
// completions use `choices`. Each shape gets its own strategy; they run in a
// fixed order and the first one that yields non-empty text wins.

use serde_json::Value;
use unicode_normalization::UnicodeNormalization;

use super::traits::RemoteVerdict;

/// Whole-word answers that mean "yes, this is offensive".
pub const AFFIRMATIVE_TOKENS: &[&str] = &["SIM", "YES"];

/// Whole-word answers that mean "no, this is fine".
pub const NEGATIVE_TOKENS: &[&str] = &["NAO", "NÃO"];

/// Negative answers that only count as the first word of the answer. "no" is
/// also the Portuguese contraction for "in the".
pub const LEADING_NEGATIVE_TOKENS: &[&str] = &["NO"];

/// Top-level keys that may hold the generated text as a plain string.
const TOP_LEVEL_KEYS: &[&str] = &["response", "generated_text", "output", "text"];

/// Keys under which a list of result objects may live.
const RESULT_LIST_KEYS: &[&str] = &["output", "results", "candidates", "data"];

/// Keys that carry text inside a result object or a typed content part.
const TEXT_KEYS: &[&str] = &["text", "content", "output_text", "value", "generated_text"];

/// A single extraction strategy over a decoded JSON body.
pub type Strategy = fn(&Value) -> Option<String>;

/// Strategies in the order they are tried.
pub const STRATEGIES: &[(&str, Strategy)] = &[
    ("top_level_text", top_level_text),
    ("result_list", result_list),
    ("choices", choices),
];

/// Turn a raw response body into a verdict.
///
/// JSON bodies go through the strategy chain. A body that isn't JSON at all
/// only counts if it contains an affirmative token somewhere; anything else is
/// unparseable.
pub fn verdict_from_body(raw: &str) -> RemoteVerdict {
    match serde_json::from_str::<Value>(raw) {
        Ok(body) => match extract_text(&body) {
            Some(text) => verdict_from_text(&text),
            None => RemoteVerdict::Unparseable,
        },
        Err(_) => {
            if contains_token(raw, AFFIRMATIVE_TOKENS) {
                RemoteVerdict::Block
            } else {
                RemoteVerdict::Unparseable
            }
        }
    }
}

/// Run the strategy chain, returning the first non-empty extracted text.
pub fn extract_text(body: &Value) -> Option<String> {
    STRATEGIES.iter().find_map(|(_, strategy)| strategy(body))
}

/// Classify extracted text by its answer tokens. Affirmative wins over
/// negative when both appear; a bare "no" only counts as the opening word.
pub fn verdict_from_text(text: &str) -> RemoteVerdict {
    if contains_token(text, AFFIRMATIVE_TOKENS) {
        RemoteVerdict::Block
    } else if contains_token(text, NEGATIVE_TOKENS)
        || starts_with_token(text, LEADING_NEGATIVE_TOKENS)
    {
        RemoteVerdict::Allow
    } else {
        RemoteVerdict::Unparseable
    }
}

/// A string field directly on the body, or the body itself being a string.
pub fn top_level_text(body: &Value) -> Option<String> {
    if let Value::String(s) = body {
        return non_empty(s);
    }
    TOP_LEVEL_KEYS
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str).and_then(non_empty))
}

/// A list of result objects, either as the body itself or under a known key.
/// Each item may carry `message.content`, `content`, or a text key directly.
pub fn result_list(body: &Value) -> Option<String> {
    let items = match body {
        Value::Array(items) => items,
        _ => RESULT_LIST_KEYS
            .iter()
            .find_map(|key| body.get(key).and_then(Value::as_array))?,
    };
    join_non_empty(items.iter().filter_map(item_text))
}

/// OpenAI-style `choices`, each with `text` or `message.content`.
pub fn choices(body: &Value) -> Option<String> {
    let choices = body.get("choices")?.as_array()?;
    join_non_empty(choices.iter().filter_map(|choice| {
        choice
            .get("text")
            .and_then(Value::as_str)
            .and_then(non_empty)
            .or_else(|| {
                choice
                    .get("message")
                    .and_then(|m| m.get("content"))
                    .and_then(content_text)
            })
    }))
}

fn item_text(item: &Value) -> Option<String> {
    item.get("message")
        .and_then(|m| m.get("content"))
        .or_else(|| item.get("content"))
        .and_then(content_text)
        .or_else(|| text_field(item))
}

/// Content may be a string, a list of parts, or an object holding `parts`.
fn content_text(content: &Value) -> Option<String> {
    match content {
        Value::String(s) => non_empty(s),
        Value::Array(parts) => parts_text(parts),
        Value::Object(_) => content
            .get("parts")
            .and_then(Value::as_array)
            .and_then(|parts| parts_text(parts))
            .or_else(|| text_field(content)),
        _ => None,
    }
}

fn parts_text(parts: &[Value]) -> Option<String> {
    let texts = join_non_empty(parts.iter().filter_map(|part| match part {
        Value::String(s) => non_empty(s),
        _ => text_field(part),
    }));
    if texts.is_some() {
        return texts;
    }
    // No part has a text-bearing key; fall back to each part's string form.
    join_non_empty(parts.iter().map(Value::to_string))
}

fn text_field(value: &Value) -> Option<String> {
    TEXT_KEYS
        .iter()
        .find_map(|key| value.get(key).and_then(Value::as_str).and_then(non_empty))
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn join_non_empty(texts: impl Iterator<Item = String>) -> Option<String> {
    let texts: Vec<String> = texts.filter(|t| !t.trim().is_empty()).collect();
    (!texts.is_empty()).then(|| texts.join("\n"))
}

/// Whole-word, case-insensitive token check. NFC first so a decomposed "NÃO"
/// still reads as one word.
fn contains_token(text: &str, tokens: &[&str]) -> bool {
    words(text).iter().any(|word| tokens.contains(&word.as_str()))
}

/// Like `contains_token`, but only the first word is checked.
fn starts_with_token(text: &str, tokens: &[&str]) -> bool {
    words(text)
        .first()
        .is_some_and(|word| tokens.contains(&word.as_str()))
}

fn words(text: &str) -> Vec<String> {
    text.nfc()
        .collect::<String>()
        .to_uppercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_top_level_response_field() {
        let body = json!({"model": "llama3", "response": " SIM ", "done": true});
        assert_eq!(top_level_text(&body).as_deref(), Some("SIM"));
    }

    #[test]
    fn test_top_level_bare_string() {
        assert_eq!(top_level_text(&json!("NAO")).as_deref(), Some("NAO"));
        assert_eq!(top_level_text(&json!("   ")), None);
    }

    #[test]
    fn test_top_level_ignores_non_string_output() {
        let body = json!({"output": [{"content": "SIM"}]});
        assert_eq!(top_level_text(&body), None);
    }

    #[test]
    fn test_result_list_top_level_array() {
        let body = json!([{"generated_text": "Sim."}]);
        assert_eq!(result_list(&body).as_deref(), Some("Sim."));
    }

    #[test]
    fn test_result_list_typed_parts() {
        let body = json!({
            "output": [{
                "type": "message",
                "content": [
                    {"type": "output_text", "text": "NAO"}
                ]
            }]
        });
        assert_eq!(result_list(&body).as_deref(), Some("NAO"));
    }

    #[test]
    fn test_result_list_content_object_with_parts() {
        let body = json!({
            "candidates": [{"content": {"role": "model", "parts": [{"text": "SIM"}]}}]
        });
        assert_eq!(result_list(&body).as_deref(), Some("SIM"));
    }

    #[test]
    fn test_result_list_nested_message() {
        let body = json!({"results": [{"message": {"role": "assistant", "content": "não"}}]});
        assert_eq!(result_list(&body).as_deref(), Some("não"));
    }

    #[test]
    fn test_parts_without_text_fall_back_to_string_form() {
        let body = json!({"output": [{"content": [{"kind": "answer", "label": "SIM"}]}]});
        let text = result_list(&body).unwrap();
        assert!(text.contains("SIM"), "got {text}");
    }

    #[test]
    fn test_choices_text_and_message() {
        assert_eq!(
            choices(&json!({"choices": [{"text": "NAO"}]})).as_deref(),
            Some("NAO")
        );
        assert_eq!(
            choices(&json!({"choices": [{"message": {"content": "YES"}}]})).as_deref(),
            Some("YES")
        );
        assert_eq!(choices(&json!({"choices": []})), None);
    }

    #[test]
    fn test_strategy_order_prefers_top_level() {
        let body = json!({"response": "NAO", "choices": [{"text": "SIM"}]});
        assert_eq!(extract_text(&body).as_deref(), Some("NAO"));
    }

    #[test]
    fn test_verdict_tokens_are_whole_words() {
        assert_eq!(verdict_from_text("Sim, é ofensivo"), RemoteVerdict::Block);
        assert_eq!(verdict_from_text("Não."), RemoteVerdict::Allow);
        assert_eq!(verdict_from_text("no"), RemoteVerdict::Allow);
        assert_eq!(verdict_from_text("SIMPLE NOTHING"), RemoteVerdict::Unparseable);
        assert_eq!(verdict_from_text("maybe"), RemoteVerdict::Unparseable);
    }

    #[test]
    fn test_portuguese_no_inside_answer_is_not_a_negative() {
        assert_eq!(
            verdict_from_text("O comentário contém um insulto no final."),
            RemoteVerdict::Unparseable
        );
        assert_eq!(
            verdict_from_text("Contém linguagem ofensiva no texto."),
            RemoteVerdict::Unparseable
        );
        assert_eq!(verdict_from_text("NAO, nada de ofensivo no texto"), RemoteVerdict::Allow);
    }

    #[test]
    fn test_leading_no_is_a_negative() {
        assert_eq!(verdict_from_text("No."), RemoteVerdict::Allow);
        assert_eq!(verdict_from_text("  no, it is fine"), RemoteVerdict::Allow);
    }

    #[test]
    fn test_verdict_affirmative_wins_over_negative() {
        assert_eq!(verdict_from_text("NO... actually YES"), RemoteVerdict::Block);
    }

    #[test]
    fn test_decomposed_nao_is_recognized() {
        assert_eq!(verdict_from_text("NA\u{0303}O"), RemoteVerdict::Allow);
    }

    #[test]
    fn test_body_shapes_from_known_servers() {
        assert_eq!(verdict_from_body(r#"{"response": "SIM"}"#), RemoteVerdict::Block);
        assert_eq!(
            verdict_from_body(r#"{"choices": [{"text": "NAO"}]}"#),
            RemoteVerdict::Allow
        );
        assert_eq!(verdict_from_body(r#"{"error": "model not found"}"#), RemoteVerdict::Unparseable);
    }

    #[test]
    fn test_non_json_body_only_counts_affirmative() {
        assert_eq!(verdict_from_body("answer: SIM"), RemoteVerdict::Block);
        assert_eq!(verdict_from_body("answer: NAO"), RemoteVerdict::Unparseable);
        assert_eq!(verdict_from_body("<html>502 Bad Gateway</html>"), RemoteVerdict::Unparseable);
    }
}
