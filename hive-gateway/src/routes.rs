//! HTTP routes and handlers
//!
//! Two endpoints: `GET /` liveness, `POST /pulse` signal intake. The pulse
//! handler checks the credential header before touching the body, so a
//! missing key answers 401 whatever the payload looks like; malformed bodies
//! are rejected by the framework (422 for shape errors).

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{debug, warn};

use hive_common::{HiveError, PulseReceipt, Signal, ASSESSMENT_SPAN};
use hive_window::aggregate::assess;

use crate::state::AppState;

/// Header carrying the caller's credential
const API_KEY_HEADER: &str = "x-api-key";

/// Request-scoped API error
#[derive(Debug)]
pub enum ApiError {
    /// Credential header absent or empty
    MissingApiKey,
    /// Window store failure; surfaced as 500, no retry or fallback
    Storage(String),
    /// Body rejected by the framework; its status (422/400) passes through
    Rejection(JsonRejection),
}

impl From<HiveError> for ApiError {
    fn from(err: HiveError) -> Self {
        match err {
            HiveError::MissingApiKey => ApiError::MissingApiKey,
            other => ApiError::Storage(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Rejection(rejection)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::MissingApiKey => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"detail": "Missing API Key"})),
            )
                .into_response(),
            ApiError::Storage(detail) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({"detail": detail})),
            )
                .into_response(),
            ApiError::Rejection(rejection) => rejection.into_response(),
        }
    }
}

/// Build the gateway router
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/pulse", post(report_pulse))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "The Nervous System is Online"}))
}

async fn report_pulse(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Signal>, JsonRejection>,
) -> Result<Json<PulseReceipt>, ApiError> {
    // Presence-of-header only; the key is not checked against any registry
    let api_key = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .ok_or(ApiError::MissingApiKey)?;

    let Json(signal) = payload?;

    // Only the distinguished label is written; everything else is observed
    if signal.is_pain() {
        state.window.record(&signal.sector, &signal.state).await?;
    }

    let entries = state.window.recent(&signal.sector, ASSESSMENT_SPAN).await?;
    let assessment = assess(&entries);
    debug!(
        sector = %signal.sector,
        agent = %signal.agent_id,
        pain_level = assessment.pain_level,
        "Assessed sector"
    );

    // Fire-and-forget: usage recording must never block or fail the response
    let billing = state.billing.clone();
    tokio::spawn(async move {
        if let Err(e) = billing.record(&api_key).await {
            warn!("Usage recording failed: {}", e);
        }
    });

    Ok(Json(PulseReceipt::new(
        assessment.status,
        assessment.pain_level,
    )))
}
