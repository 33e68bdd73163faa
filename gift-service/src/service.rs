use std::sync::Arc;
use std::time::Duration;

use axum::{
    Form, Router,
    extract::{Query as QueryParams, State},
    http::{HeaderMap, HeaderValue, Request, StatusCode},
    middleware::{Next, from_fn},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use gift_core::{
    GenerativeModel, Query, SUCCESS_NOTIFICATION, SuggestionError, SuggestionOutcome,
    SuggestionPipeline, SuggestionResult,
};
use serde_json::{Value, json};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, info, warn};
use uuid::Uuid;

use crate::{
    inflight::InFlightRegistry,
    models::{ErrorResponse, LandingParams, SuggestForm, SuggestRequest},
    render::{Notification, PageView, render_page},
};

pub const CLIENT_ID_HEADER: &str = "x-client-id";

type ApiError = (StatusCode, Json<ErrorResponse>);
type ApiResult<T> = Result<Json<T>, ApiError>;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SuggestionPipeline>,
    pub in_flight: InFlightRegistry,
}

impl AppState {
    pub fn new(model: Arc<dyn GenerativeModel>, timeout: Duration) -> Self {
        Self {
            pipeline: Arc::new(SuggestionPipeline::new(model, timeout)),
            in_flight: InFlightRegistry::new(),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(landing))
        .route("/suggest", post(suggest_form))
        .route("/api/suggest", post(suggest_api))
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(from_fn(correlation_id_middleware))
        .with_state(state)
}

/// Tags every request with a correlation id and runs it inside a span carrying it.
async fn correlation_id_middleware(mut request: Request<axum::body::Body>, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        request.headers_mut().insert("x-correlation-id", value);
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

/// HTTP status used for each failure kind.
pub fn status_for(err: &SuggestionError) -> StatusCode {
    match err {
        SuggestionError::EmptyQuery => StatusCode::BAD_REQUEST,
        SuggestionError::OffTopic => StatusCode::UNPROCESSABLE_ENTITY,
        SuggestionError::Busy => StatusCode::CONFLICT,
        SuggestionError::EmptyResponse
        | SuggestionError::MalformedJson(_)
        | SuggestionError::Generation(_) => StatusCode::BAD_GATEWAY,
        SuggestionError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
    }
}

fn api_error(err: &SuggestionError) -> ApiError {
    (
        status_for(err),
        Json(ErrorResponse {
            error: err.user_message().to_string(),
            kind: Some(err.kind().to_string()),
            notification: Some(err.notification().to_string()),
        }),
    )
}

/// Validates the query, claims the client's busy slot and runs the pipeline.
///
/// Input checks come first so a busy client still gets the empty/off-topic
/// message for bad input.
async fn submit(
    state: &AppState,
    client_id: Option<&str>,
    raw_query: &str,
) -> gift_core::Result<SuggestionResult> {
    let query = Query::accept(raw_query).inspect_err(|e| {
        info!(kind = %e.kind(), "Query rejected");
    })?;

    let _guard = match client_id.filter(|id| !id.trim().is_empty()) {
        Some(id) => Some(state.in_flight.try_acquire(id).ok_or_else(|| {
            warn!(client_id = %id, "Duplicate submission while a request is in flight");
            SuggestionError::Busy
        })?),
        None => None,
    };

    state.pipeline.suggest_for(&query).await.inspect_err(|e| {
        warn!(kind = %e.kind(), error = %e, "Suggestion failed");
    })
}

async fn suggest_api(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SuggestRequest>,
) -> ApiResult<SuggestionResult> {
    let client_id = request.client_id.or_else(|| {
        headers
            .get(CLIENT_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
    });

    info!(
        client_id = ?client_id,
        query_length = request.query.len(),
        "Processing suggestion request"
    );

    submit(&state, client_id.as_deref(), &request.query)
        .await
        .map(Json)
        .map_err(|e| api_error(&e))
}

async fn suggest_form(State(state): State<AppState>, Form(form): Form<SuggestForm>) -> Response {
    let client_id = if form.client_id.trim().is_empty() {
        Uuid::new_v4().to_string()
    } else {
        form.client_id
    };

    info!(
        client_id = %client_id,
        query_length = form.query.len(),
        "Processing suggestion form"
    );

    let result = submit(&state, Some(&client_id), &form.query).await;
    let (status, notification) = match &result {
        Ok(_) => (StatusCode::OK, Notification::success(SUCCESS_NOTIFICATION)),
        Err(e) => (status_for(e), Notification::error(e.notification())),
    };

    let view = PageView {
        input: form.query,
        busy: state.in_flight.is_busy(&client_id),
        client_id,
        outcome: Some(SuggestionOutcome::from(&result)),
        notification: Some(notification),
    };

    (status, Html(render_page(&view))).into_response()
}

async fn landing(
    State(state): State<AppState>,
    QueryParams(params): QueryParams<LandingParams>,
) -> Html<String> {
    let client_id = params
        .client_id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let view = PageView {
        busy: state.in_flight.is_busy(&client_id),
        client_id,
        ..Default::default()
    };
    Html(render_page(&view))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "model": state.pipeline.model_name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            error: "Not found".to_string(),
            kind: None,
            notification: None,
        }),
    )
}
