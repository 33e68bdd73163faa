use std::time::Duration;

use thiserror::Error;

/// Shown when a query is rejected as off-topic.
pub const OFF_TOPIC_GUIDANCE: &str = "This assistant is for BIRTHDAY gift ideas & reminders! 🎉\n\
Try asking:\n\
- 'Gift ideas for dad turning 50'\n\
- 'Remind me to buy a gift for my friend next week'";

const EMPTY_QUERY_MESSAGE: &str = "Please type a birthday or gift query!";
const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong. Try again later!";
const BUSY_MESSAGE: &str =
    "Your previous request is still being generated. Please wait for it to finish.";

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("query is not about birthdays or gifts")]
    OffTopic,

    #[error("model returned no text")]
    EmptyResponse,

    #[error("model output is not a JSON object: {0}")]
    MalformedJson(String),

    #[error("generation request failed: {0}")]
    Generation(String),

    #[error("generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("a request for this client is already in flight")]
    Busy,
}

impl SuggestionError {
    /// Stable, machine-readable name of the failure.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmptyQuery => "empty-input",
            Self::OffTopic => "off-topic-input",
            Self::EmptyResponse => "empty-response",
            Self::MalformedJson(_) => "malformed-json",
            Self::Generation(_) => "transport",
            Self::Timeout(_) => "timeout",
            Self::Busy => "busy",
        }
    }

    /// Message rendered in the response area.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::EmptyQuery => EMPTY_QUERY_MESSAGE,
            Self::OffTopic => OFF_TOPIC_GUIDANCE,
            Self::Busy => BUSY_MESSAGE,
            Self::EmptyResponse
            | Self::MalformedJson(_)
            | Self::Generation(_)
            | Self::Timeout(_) => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Short, transient notice shown alongside the message.
    pub fn notification(&self) -> &'static str {
        match self {
            Self::EmptyQuery => EMPTY_QUERY_MESSAGE,
            Self::OffTopic => "Only birthday and gift related queries allowed! 🎂",
            Self::Busy => BUSY_MESSAGE,
            Self::EmptyResponse
            | Self::MalformedJson(_)
            | Self::Generation(_)
            | Self::Timeout(_) => "Error fetching data.",
        }
    }

    /// True when the query never reached the model.
    pub fn is_rejection(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::OffTopic | Self::Busy)
    }
}

pub type Result<T> = std::result::Result<T, SuggestionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_off_topic_have_distinct_messages() {
        assert_ne!(
            SuggestionError::EmptyQuery.user_message(),
            SuggestionError::OffTopic.user_message()
        );
        assert!(SuggestionError::OffTopic.user_message().contains("Try asking"));
    }

    #[test]
    fn model_failures_share_the_generic_message() {
        let failures = [
            SuggestionError::EmptyResponse,
            SuggestionError::MalformedJson("eof".into()),
            SuggestionError::Generation("connection reset".into()),
            SuggestionError::Timeout(Duration::from_secs(1)),
        ];
        for err in &failures {
            assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
            assert_eq!(err.notification(), "Error fetching data.");
            assert!(!err.is_rejection());
        }
    }

    #[test]
    fn kinds_are_stable() {
        assert_eq!(SuggestionError::EmptyQuery.kind(), "empty-input");
        assert_eq!(SuggestionError::OffTopic.kind(), "off-topic-input");
        assert_eq!(SuggestionError::MalformedJson(String::new()).kind(), "malformed-json");
        assert_eq!(SuggestionError::Generation(String::new()).kind(), "transport");
    }
}
