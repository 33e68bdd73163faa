use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

/// Model id used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";

/// The external text-completion service.
///
/// Output is free text from an untrusted collaborator; callers must run it
/// through [`crate::normalize`] before assuming any shape.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    fn model_name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// A model that answers every prompt the same way.
pub struct CannedModel {
    name: String,
    reply: std::result::Result<String, String>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl CannedModel {
    pub fn replying(reply: impl Into<String>) -> Self {
        Self {
            name: "canned".to_string(),
            reply: Ok(reply.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            name: "canned".to_string(),
            reply: Err(message.into()),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleeps before answering; useful for exercising timeouts and the busy guard.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerativeModel for CannedModel {
    fn model_name(&self) -> &str {
        &self.name
    }

    async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(message) => Err(anyhow::anyhow!(message.clone())),
        }
    }
}

#[cfg(feature = "gemini")]
pub use gemini::GeminiModel;

#[cfg(feature = "gemini")]
mod gemini {
    use async_trait::async_trait;
    use rig::{
        agent::Agent,
        client::CompletionClient,
        completion::Prompt,
        providers::gemini::{self, completion::CompletionModel},
    };
    use tracing::debug;

    use super::GenerativeModel;

    /// Gemini behind a `rig` agent with no preamble; the prompt carries
    /// all instructions.
    pub struct GeminiModel {
        name: String,
        agent: Agent<CompletionModel>,
    }

    impl GeminiModel {
        pub fn new(api_key: &str, model: &str) -> Self {
            let client = gemini::Client::new(api_key);
            Self {
                name: model.to_string(),
                agent: client.agent(model).build(),
            }
        }
    }

    #[async_trait]
    impl GenerativeModel for GeminiModel {
        fn model_name(&self) -> &str {
            &self.name
        }

        async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
            debug!(model = %self.name, prompt_len = prompt.len(), "Sending prompt to Gemini");
            let response = self.agent.prompt(prompt.to_string()).await?;
            Ok(response)
        }
    }
}
