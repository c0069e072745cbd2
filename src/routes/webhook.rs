//! Webhook route configuration

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, webhook};
use crate::state::AppState;
use std::sync::Arc;

/// Create the webhook router
///
/// # Endpoints
///
/// - `GET /` - health check
/// - `POST /inbound` - answer an inbound call with the `AudioStream` command
/// - `POST /callback` - stream outcome reported by the platform
pub fn create_webhook_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(api::health_check))
        .route("/inbound", post(webhook::inbound_call))
        .route("/callback", post(webhook::stream_callback))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
