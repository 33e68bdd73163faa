pub mod config;
pub mod inflight;
pub mod models;
pub mod render;
pub mod service;
pub mod telemetry;

pub use config::ServiceConfig;
pub use inflight::{InFlightGuard, InFlightRegistry};
pub use service::{AppState, CLIENT_ID_HEADER, build_router, status_for};
