use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use crate::classifier::Query;
use crate::error::{Result, SuggestionError};
use crate::model::GenerativeModel;
use crate::models::SuggestionResult;
use crate::normalizer::normalize;
use crate::prompt::build_prompt;

/// Default bound on a single generation call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Classify → prompt → generate → normalize, for one submission at a time.
///
/// Holds no per-request state. Dropping the future returned by
/// [`SuggestionPipeline::suggest`] abandons the in-flight model call.
#[derive(Clone)]
pub struct SuggestionPipeline {
    model: Arc<dyn GenerativeModel>,
    timeout: Duration,
}

impl SuggestionPipeline {
    pub fn new(model: Arc<dyn GenerativeModel>, timeout: Duration) -> Self {
        Self { model, timeout }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub async fn suggest(&self, raw_input: &str) -> Result<SuggestionResult> {
        let query = Query::accept(raw_input).inspect_err(|e| {
            info!(kind = %e.kind(), "Query rejected before generation");
        })?;
        self.suggest_for(&query).await
    }

    /// Runs generation for a query that has already been accepted.
    pub async fn suggest_for(&self, query: &Query) -> Result<SuggestionResult> {
        let prompt = build_prompt(query);
        info!(
            model = %self.model.model_name(),
            links_requested = query.wants_purchase_links(),
            "Requesting gift suggestions"
        );

        let raw = tokio::time::timeout(self.timeout, self.model.generate(&prompt))
            .await
            .map_err(|_| {
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Generation timed out");
                SuggestionError::Timeout(self.timeout)
            })?
            .map_err(|e| {
                error!(error = %e, "Generation request failed");
                SuggestionError::Generation(e.to_string())
            })?;

        let suggestion = normalize(&raw)?;
        info!(
            gifts = suggestion.gift_recommendations.len(),
            "Gift suggestions generated"
        );
        Ok(suggestion)
    }
}
