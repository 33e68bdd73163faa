use crate::error::{Result, SuggestionError};

/// Any of these, case-insensitively, marks a query as in-domain.
pub const TOPIC_KEYWORDS: &[&str] = &[
    "gift",
    "birthday",
    "present",
    "remind",
    "reminder",
    "gift idea",
    "birthday gift",
    "upcoming birthday",
    "birthday suggestions",
    "what to gift",
    "buy",
    "purchase",
    "gift recommendation",
];

/// Narrower set that asks the model for purchase links.
pub const PURCHASE_KEYWORDS: &[&str] = &["buy", "purchase", "link"];

/// Plain substring containment over the lower-cased text.
pub fn is_birthday_related(text: &str) -> bool {
    contains_any(text, TOPIC_KEYWORDS)
}

pub fn wants_purchase_links(text: &str) -> bool {
    contains_any(text, PURCHASE_KEYWORDS)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|keyword| lower.contains(keyword))
}

/// A submission that passed the empty and topic checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
}

impl Query {
    /// Rejects blank input before classifying, so whitespace gets the
    /// empty-query message rather than the off-topic one.
    pub fn accept(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Err(SuggestionError::EmptyQuery);
        }
        if !is_birthday_related(raw) {
            return Err(SuggestionError::OffTopic);
        }
        Ok(Self {
            text: raw.to_string(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn wants_purchase_links(&self) -> bool {
        wants_purchase_links(&self.text)
    }
}
