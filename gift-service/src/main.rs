use std::sync::Arc;

use gift_core::{GeminiModel, GenerativeModel};
use gift_service::{AppState, ServiceConfig, build_router, telemetry::init_tracing};
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = match ServiceConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            std::process::exit(1);
        }
    };

    let model: Arc<dyn GenerativeModel> = Arc::new(GeminiModel::new(&config.api_key, &config.model));
    let state = AppState::new(model, config.generation_timeout);
    let app = build_router(state);

    let listener = TcpListener::bind(("0.0.0.0", config.port)).await?;
    let addr = listener.local_addr()?;

    info!(
        model = %config.model,
        timeout_ms = config.generation_timeout.as_millis() as u64,
        "Gift suggestion service starting on {}",
        addr
    );
    info!("Landing page: http://{}/", addr);
    info!("Suggestion API: POST http://{}/api/suggest", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
