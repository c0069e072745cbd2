//! Configuration validation

use super::{ServerConfig, WebhookConfig};

pub(super) fn validate_ports(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.grpc_port == 0 {
        return Err("GRPC_PORT must be non-zero".into());
    }

    if config.webhook.enabled {
        if config.webhook.port == 0 {
            return Err("WEBHOOK_PORT must be non-zero".into());
        }
        if config.webhook.port == config.grpc_port {
            return Err(format!(
                "WEBHOOK_PORT and GRPC_PORT must differ (both are {})",
                config.grpc_port
            )
            .into());
        }
    }

    Ok(())
}

pub(super) fn validate_stream(config: &ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    if config.stream_channel_capacity == 0 {
        return Err("STREAM_CHANNEL_CAPACITY must be greater than zero".into());
    }
    Ok(())
}

/// The call-setup document cannot be built without both hosts
pub(super) fn validate_webhook(webhook: &WebhookConfig) -> Result<(), Box<dyn std::error::Error>> {
    if !webhook.enabled {
        return Ok(());
    }

    if is_blank(webhook.audio_stream_host.as_deref()) {
        return Err("AUDIO_STREAM_HOST is required when the webhook service is enabled".into());
    }
    if is_blank(webhook.webhook_host.as_deref()) {
        return Err("WEBHOOK_HOST is required when the webhook service is enabled".into());
    }

    Ok(())
}

fn is_blank(host: Option<&str>) -> bool {
    host.is_none_or(|h| h.trim().is_empty())
}
