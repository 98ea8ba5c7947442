//! Defensive decoding of extraction responses
//!
//! Models tend to wrap JSON in markdown fences and sprinkle non-breaking
//! spaces. Those are stripped before structural parsing. Anything that is not
//! a JSON array after cleaning is unparsable.

use polo_common::events::decode_candidates;
use serde_json::Value;
use tracing::debug;

use super::ExtractionOutcome;

/// Strip fencing artifacts and non-breaking spaces
pub fn clean_response(raw: &str) -> String {
    raw.replace('\u{00a0}', " ")
        .replace("```json", "")
        .replace("```JSON", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Clean and decode a raw response
pub fn parse_response(raw: &str) -> ExtractionOutcome {
    let cleaned = clean_response(raw);
    debug!(response = %cleaned, "Extraction response (cleaned)");

    match serde_json::from_str::<Value>(&cleaned) {
        Ok(Value::Array(items)) => ExtractionOutcome::Parsed(decode_candidates(items)),
        Ok(other) => ExtractionOutcome::Unparsable(format!(
            "expected a JSON list, got {}",
            kind(&other)
        )),
        Err(e) => ExtractionOutcome::Unparsable(e.to_string()),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polo_common::{Candidate, RawEvent};

    #[test]
    fn test_clean_strips_fences_and_nbsp() {
        let raw = "```json\n[{\"player\":\u{00a0}\"Alex Kim\", \"action\": \"goal\"}]\n```\n";
        assert_eq!(
            clean_response(raw),
            "[{\"player\": \"Alex Kim\", \"action\": \"goal\"}]"
        );
    }

    #[test]
    fn test_parse_array_with_mixed_items() {
        let outcome = parse_response(r#"[{"player": "Sam Lee", "action": "save"}, 3, {"action": "goal"}]"#);
        match outcome {
            ExtractionOutcome::Parsed(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], Candidate::Event(RawEvent::new("Sam Lee", "save")));
                assert!(items[1].is_malformed());
                assert!(items[2].is_malformed());
            }
            other => panic!("expected Parsed, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_array_is_parsed() {
        assert_eq!(parse_response("```\n[]\n```"), ExtractionOutcome::Parsed(vec![]));
    }

    #[test]
    fn test_non_list_is_unparsable() {
        assert!(matches!(
            parse_response(r#"{"player": "Sam Lee", "action": "save"}"#),
            ExtractionOutcome::Unparsable(ref r) if r.contains("an object")
        ));
        assert!(matches!(
            parse_response("Here are the events: none"),
            ExtractionOutcome::Unparsable(_)
        ));
        assert!(matches!(parse_response(""), ExtractionOutcome::Unparsable(_)));
    }
}
