use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{Result, SuggestionError};
use crate::models::SuggestionResult;

/// Returns the span from the first `{` to the last `}` inclusive.
///
/// Greedy on purpose: prose and markdown fences around a single object are
/// stripped, nested braces stay inside. This is a heuristic, not a parser.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Turns a raw model completion into a suggestion or a typed error.
pub fn normalize(raw: &str) -> Result<SuggestionResult> {
    if raw.is_empty() {
        return Err(SuggestionError::EmptyResponse);
    }

    let candidate = extract_json_object(raw).ok_or_else(|| {
        warn!(response_len = raw.len(), "No JSON object found in model response");
        SuggestionError::MalformedJson("no brace-delimited object in response".to_string())
    })?;

    let value: Value = serde_json::from_str(candidate).map_err(|e| {
        warn!(error = %e, "Model response is not valid JSON");
        SuggestionError::MalformedJson(e.to_string())
    })?;

    debug!(candidate_len = candidate.len(), "Parsed model response");
    Ok(SuggestionResult::from_json(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GiftRecommendation;

    const FENCED: &str = "Sure! ```json\n{\"recipient\":\"Dad\",\"occasion\":\"Birthday\",\
\"gift_recommendations\":[{\"gift\":\"Watch\",\"description\":\"Classic\",\
\"estimated_price\":\"$150\"}],\"reminder_message\":\"Buy by Friday\",\
\"pro_tips\":\"Engrave it\"}\n``` Hope that helps!";

    #[test]
    fn extracts_object_wrapped_in_prose_and_fences() {
        let result = normalize(FENCED).unwrap();
        assert_eq!(
            result,
            SuggestionResult {
                recipient: Some("Dad".into()),
                occasion: Some("Birthday".into()),
                gift_recommendations: vec![GiftRecommendation {
                    gift: Some("Watch".into()),
                    description: Some("Classic".into()),
                    estimated_price: Some("$150".into()),
                    link: None,
                }],
                reminder_message: Some("Buy by Friday".into()),
                pro_tips: Some("Engrave it".into()),
            }
        );
    }

    #[test]
    fn extraction_is_greedy_across_nested_objects() {
        let text = r#"noise {"a": {"b": 1}} trailing"#;
        assert_eq!(extract_json_object(text), Some(r#"{"a": {"b": 1}}"#));
    }

    #[test]
    fn extraction_requires_open_before_close() {
        assert_eq!(extract_json_object("} backwards {"), None);
        assert_eq!(extract_json_object("no braces at all"), None);
        assert_eq!(extract_json_object("{ unbalanced"), None);
    }

    #[test]
    fn empty_response_is_reported_before_scanning() {
        assert!(matches!(normalize(""), Err(SuggestionError::EmptyResponse)));
    }

    #[test]
    fn whitespace_response_is_malformed_not_empty() {
        assert!(matches!(normalize("   "), Err(SuggestionError::MalformedJson(_))));
    }

    #[test]
    fn missing_or_unbalanced_braces_are_malformed() {
        for raw in ["I cannot help with that.", "{\"recipient\": \"Mom\"", "\"recipient\": \"Mom\"}"] {
            assert!(
                matches!(normalize(raw), Err(SuggestionError::MalformedJson(_))),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn trailing_commas_are_malformed() {
        let raw = r#"{
  "recipient": "Friend",
  "gift_recommendations": [
    { "gift": "Book", "estimated_price": "$20", },
  ],
}"#;
        assert!(matches!(normalize(raw), Err(SuggestionError::MalformedJson(_))));
    }

    #[test]
    fn two_objects_span_into_invalid_json() {
        let raw = r#"{"recipient": "A"} and also {"recipient": "B"}"#;
        assert!(matches!(normalize(raw), Err(SuggestionError::MalformedJson(_))));
    }

    #[test]
    fn serialized_result_round_trips() {
        let original = SuggestionResult {
            recipient: Some("Best Friend (turning 25)".into()),
            occasion: Some("Birthday".into()),
            gift_recommendations: vec![
                GiftRecommendation {
                    gift: Some("Concert tickets".into()),
                    description: Some("They love live music".into()),
                    estimated_price: Some("$80-$150".into()),
                    link: Some("https://tickets.example.com".into()),
                },
                GiftRecommendation {
                    gift: Some("Vinyl record".into()),
                    description: None,
                    estimated_price: Some("$30".into()),
                    link: None,
                },
            ],
            reminder_message: Some("Book tickets two weeks out".into()),
            pro_tips: None,
        };

        let serialized = serde_json::to_string_pretty(&original).unwrap();
        assert_eq!(normalize(&serialized).unwrap(), original);
    }
}
