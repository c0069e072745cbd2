use std::sync::Arc;

use crate::config::WebhookConfig;
use crate::core::percl::{PerclCommand, audio_stream_document};

/// Shared state for the webhook HTTP service
#[derive(Debug)]
pub struct AppState {
    /// Answer to every `/inbound` request; built once at startup
    pub inbound_document: Vec<PerclCommand>,
}

impl AppState {
    /// Build the state from the webhook configuration.
    ///
    /// Fails when either host is missing, since the inbound document
    /// cannot be answered without them.
    pub fn new(webhook: &WebhookConfig) -> Result<Arc<Self>, Box<dyn std::error::Error>> {
        let audio_stream_host = webhook
            .audio_stream_host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or("No AUDIO_STREAM_HOST set")?;
        let webhook_host = webhook
            .webhook_host
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or("No WEBHOOK_HOST set")?;

        Ok(Arc::new(Self {
            inbound_document: audio_stream_document(
                audio_stream_host,
                webhook_host,
                &webhook.content_type,
                &webhook.metadata,
            ),
        }))
    }
}
