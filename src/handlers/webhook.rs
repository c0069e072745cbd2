//! Call-setup webhooks
//!
//! `POST /inbound` answers an inbound call with the `AudioStream` PerCL
//! document, which makes the platform dial the gRPC relay. `POST /callback`
//! receives the platform's report once the stream is done.

use axum::{Json, body::Bytes, extract::State, response::IntoResponse};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use tracing::{debug, info};

use crate::errors::app_error::{AppError, AppResult};
use crate::state::AppState;

pub async fn inbound_call(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Answering inbound call with AudioStream");
    Json(state.inbound_document.clone())
}

/// Log the stream outcome reported by the platform.
///
/// The body must be a JSON object (or `null`). It is parsed by hand so a
/// malformed payload gets a plain `Invalid JSON` reply instead of axum's
/// extractor rejection.
pub async fn stream_callback(body: Bytes) -> AppResult<Json<Value>> {
    let payload: Option<Map<String, Value>> = serde_json::from_slice(&body)
        .map_err(|_| AppError::BadRequest("Invalid JSON".to_string()))?;
    let payload = payload.map(Value::Object).unwrap_or(Value::Null);

    info!(payload = %payload, "Audio stream callback");

    Ok(Json(json!({})))
}
