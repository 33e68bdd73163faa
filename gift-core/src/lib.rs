pub mod classifier;
pub mod error;
pub mod model;
pub mod models;
pub mod normalizer;
pub mod pipeline;
pub mod prompt;

// Re-export commonly used types
pub use classifier::{Query, is_birthday_related, wants_purchase_links};
pub use error::{OFF_TOPIC_GUIDANCE, Result, SuggestionError};
#[cfg(feature = "gemini")]
pub use model::GeminiModel;
pub use model::{CannedModel, DEFAULT_MODEL, GenerativeModel};
pub use models::{ErrorResult, GiftRecommendation, SuggestionOutcome, SuggestionResult};
pub use normalizer::{extract_json_object, normalize};
pub use pipeline::{DEFAULT_TIMEOUT, SuggestionPipeline};
pub use prompt::build_prompt;

/// Notification shown after a successful submission.
pub const SUCCESS_NOTIFICATION: &str = "Gift ideas and reminder generated! 🎂";
