use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::SuggestionError;

/// A single gift idea as produced by the model.
///
/// Every field is optional because the model is not bound to any schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GiftRecommendation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gift: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl GiftRecommendation {
    fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };
        Self {
            gift: text_field(object, "gift"),
            description: text_field(object, "description"),
            estimated_price: text_field(object, "estimated_price"),
            link: text_field(object, "link"),
        }
    }
}

/// Successful suggestion payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuggestionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occasion: Option<String>,
    pub gift_recommendations: Vec<GiftRecommendation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pro_tips: Option<String>,
}

impl SuggestionResult {
    /// Maps an already parsed JSON value onto the suggestion shape.
    ///
    /// Missing or mistyped fields read as absent, a non-array
    /// `gift_recommendations` reads as an empty list. This never fails:
    /// strictness lives in the parse step, not here.
    pub fn from_json(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        let gift_recommendations = object
            .get("gift_recommendations")
            .and_then(Value::as_array)
            .map(|items| items.iter().map(GiftRecommendation::from_json).collect())
            .unwrap_or_default();

        Self {
            recipient: text_field(object, "recipient"),
            occasion: text_field(object, "occasion"),
            gift_recommendations,
            reminder_message: text_field(object, "reminder_message"),
            pro_tips: text_field(object, "pro_tips"),
        }
    }
}

/// Display-only failure payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResult {
    pub error: String,
}

impl From<&SuggestionError> for ErrorResult {
    fn from(err: &SuggestionError) -> Self {
        Self {
            error: err.user_message().to_string(),
        }
    }
}

/// What the presentation layer renders once a submission has been handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuggestionOutcome {
    Suggestion(SuggestionResult),
    Error(ErrorResult),
}

impl From<&crate::error::Result<SuggestionResult>> for SuggestionOutcome {
    fn from(result: &crate::error::Result<SuggestionResult>) -> Self {
        match result {
            Ok(suggestion) => Self::Suggestion(suggestion.clone()),
            Err(err) => Self::Error(err.into()),
        }
    }
}

fn text_field(object: &Map<String, Value>, key: &str) -> Option<String> {
    match object.get(key)? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn maps_complete_object() {
        let value = json!({
            "recipient": "Sister (turning 18)",
            "occasion": "Birthday",
            "gift_recommendations": [
                {
                    "gift": "Instant camera",
                    "description": "Captures the party",
                    "estimated_price": "$70-$100",
                    "link": "https://example.com/camera"
                }
            ],
            "reminder_message": "Order a week ahead",
            "pro_tips": "Add a handwritten card"
        });

        let result = SuggestionResult::from_json(&value);
        assert_eq!(result.recipient.as_deref(), Some("Sister (turning 18)"));
        assert_eq!(result.gift_recommendations.len(), 1);
        assert_eq!(
            result.gift_recommendations[0].link.as_deref(),
            Some("https://example.com/camera")
        );
        assert_eq!(result.pro_tips.as_deref(), Some("Add a handwritten card"));
    }

    #[test]
    fn tolerates_missing_and_mistyped_fields() {
        let value = json!({
            "recipient": ["not", "a", "string"],
            "gift_recommendations": "a mug",
            "pro_tips": null
        });

        let result = SuggestionResult::from_json(&value);
        assert_eq!(result.recipient, None);
        assert_eq!(result.occasion, None);
        assert!(result.gift_recommendations.is_empty());
        assert_eq!(result.pro_tips, None);
    }

    #[test]
    fn non_object_gift_entries_become_empty_recommendations() {
        let value = json!({
            "gift_recommendations": ["Mug", { "gift": "Scarf", "estimated_price": 25 }]
        });

        let result = SuggestionResult::from_json(&value);
        assert_eq!(result.gift_recommendations[0], GiftRecommendation::default());
        assert_eq!(result.gift_recommendations[1].gift.as_deref(), Some("Scarf"));
        assert_eq!(
            result.gift_recommendations[1].estimated_price.as_deref(),
            Some("25")
        );
    }

    #[test]
    fn absent_fields_are_omitted_when_serialized() {
        let result = SuggestionResult {
            recipient: Some("Dad".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({ "recipient": "Dad", "gift_recommendations": [] }));
    }
}
