use std::env;
use std::time::Duration;

use anyhow::Context;
use gift_core::{DEFAULT_MODEL, DEFAULT_TIMEOUT};

/// Configuration for the gift suggestion service, read once at start-up.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub api_key: String,
    pub model: String,
    pub port: u16,
    pub generation_timeout: Duration,
}

impl ServiceConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = env::var("GEMINI_API_KEY").context("GEMINI_API_KEY not set")?;
        if api_key.trim().is_empty() {
            anyhow::bail!("GEMINI_API_KEY is empty");
        }

        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let port = env::var("PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3000);

        let generation_timeout = env::var("GENERATION_TIMEOUT_MS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_TIMEOUT);

        Ok(Self {
            api_key,
            model,
            port,
            generation_timeout,
        })
    }
}
