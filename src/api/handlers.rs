//! HTTP request handlers

use super::types::{ErrorResponse, HealthResponse};
use super::AppState;
use crate::transport::{self, PlatformRequest, PlatformResponse, Turn};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

/// Create the API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Voice platform webhook
        .route("/alexa", post(handle_skill_request))
        .route("/health", get(health))
        .route("/version", get(get_version))
        .with_state(state)
}

// ============================================================
// Skill Webhook
// ============================================================

async fn handle_skill_request(
    State(state): State<AppState>,
    Json(request): Json<PlatformRequest>,
) -> Result<Json<PlatformResponse>, AppError> {
    if let Some(expected) = state.app_id.as_deref() {
        if request.application_id() != Some(expected) {
            tracing::warn!(
                app_id = ?request.application_id(),
                "Rejecting request for another application"
            );
            return Err(AppError::BadRequest("Invalid application id".to_string()));
        }
    }

    let turn = transport::parse_turn(&request).map_err(|e| {
        tracing::warn!(error = %e, session_id = ?request.session_id(), "Unparseable skill request");
        AppError::BadRequest(e.to_string())
    })?;

    match turn {
        Turn::SessionEnded { reason } => {
            tracing::info!(session_id = ?request.session_id(), reason = ?reason, "Session ended");
            Ok(Json(PlatformResponse::empty()))
        }
        Turn::Event { user_id, event } => {
            let reply = state.runtime.handle_turn(&user_id, event).await;
            Ok(Json(transport::render(&reply)))
        }
    }
}

// ============================================================
// Health & Version
// ============================================================

async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    let sessions = state
        .db
        .session_count()
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(Json(HealthResponse {
        status: "ok",
        sessions,
        search_provider: state.search_provider.clone(),
    }))
}

async fn get_version() -> &'static str {
    concat!("restaurant-finder ", env!("CARGO_PKG_VERSION"))
}

// ============================================================
// Error Handling
// ============================================================

enum AppError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(ErrorResponse::new(message));
        (status, body).into_response()
    }
}
