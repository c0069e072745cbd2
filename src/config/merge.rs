//! Merging YAML overrides onto the environment-derived configuration

use super::ServerConfig;
use super::env::load_from_env;
use super::yaml::YamlConfig;

/// Load the environment configuration and apply YAML values on top.
///
/// Any value present in YAML wins over its environment counterpart.
pub(super) fn merge_config(
    yaml: Option<YamlConfig>,
) -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let mut config = load_from_env()?;

    let Some(yaml) = yaml else {
        return Ok(config);
    };

    if let Some(server) = yaml.server {
        if let Some(host) = server.host {
            config.host = host;
        }
        if let Some(port) = server.grpc_port {
            config.grpc_port = port;
        }
    }

    if let Some(capacity) = yaml.stream.and_then(|s| s.channel_capacity) {
        config.stream_channel_capacity = capacity;
    }

    if let Some(webhook) = yaml.webhook {
        let target = &mut config.webhook;
        if let Some(enabled) = webhook.enabled {
            target.enabled = enabled;
        }
        if let Some(port) = webhook.port {
            target.port = port;
        }
        if webhook.audio_stream_host.is_some() {
            target.audio_stream_host = webhook.audio_stream_host;
        }
        if webhook.webhook_host.is_some() {
            target.webhook_host = webhook.webhook_host;
        }
        if let Some(content_type) = webhook.content_type {
            target.content_type = content_type;
        }
        if let Some(metadata) = webhook.metadata {
            target.metadata = metadata;
        }
    }

    Ok(config)
}
