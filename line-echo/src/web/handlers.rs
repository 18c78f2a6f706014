//! Shared state, router and the small endpoints.

use std::sync::Arc;

use axum::{
    body::Bytes,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::ConfigError;
use crate::line::LineClient;
use crate::web::callback::callback;
use crate::{puzzle, Config};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub channel_secret: Arc<[u8]>,
    pub line: LineClient,
}

impl AppState {
    /// Build the state from loaded configuration.
    ///
    /// Only the channel secret is kept; the access token already lives in
    /// `line`.
    ///
    /// # Errors
    /// Fails if the channel secret is not configured.
    pub fn new(config: Config, line: LineClient) -> Result<Self, ConfigError> {
        let channel_secret: Arc<[u8]> = config
            .channel_secret
            .as_deref()
            .map(|s| Arc::from(s.as_bytes()))
            .ok_or(ConfigError::Missing("LINE_CHANNEL_SECRET"))?;

        Ok(Self {
            channel_secret,
            line,
        })
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/callback", post(callback))
        .route("/puzzle", post(puzzle_notification))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Puzzle Notification
// =============================================================================

/// Puzzle notification endpoint.
///
/// Unauthenticated. A body that does not decode gets a 500 with the decoder's
/// error text.
pub async fn puzzle_notification(body: Bytes) -> Response {
    match puzzle::handle(&body) {
        Ok(response) => {
            info!(reply = %response.message, "puzzle_notification_answered");
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!(error = %e, body_length = body.len(), "puzzle_decode_failed");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}
