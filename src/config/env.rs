//! Environment variable loading

use std::env;
use std::str::FromStr;

use super::{
    DEFAULT_AUDIO_CONTENT_TYPE, DEFAULT_GRPC_PORT, DEFAULT_HOST, DEFAULT_WEBHOOK_PORT,
    ServerConfig, WebhookConfig, default_metadata,
};
use crate::transport::DEFAULT_CHANNEL_CAPACITY;

/// Build a configuration from environment variables, falling back to defaults
pub(super) fn load_from_env() -> Result<ServerConfig, Box<dyn std::error::Error>> {
    let webhook = WebhookConfig {
        enabled: parse_bool("WEBHOOK_ENABLED")?.unwrap_or(false),
        port: parse_var("WEBHOOK_PORT")?.unwrap_or(DEFAULT_WEBHOOK_PORT),
        audio_stream_host: non_empty_var("AUDIO_STREAM_HOST"),
        webhook_host: non_empty_var("WEBHOOK_HOST"),
        content_type: non_empty_var("AUDIO_STREAM_CONTENT_TYPE")
            .unwrap_or_else(|| DEFAULT_AUDIO_CONTENT_TYPE.to_string()),
        metadata: non_empty_var("AUDIO_STREAM_METADATA")
            .map(|raw| split_list(&raw))
            .unwrap_or_else(default_metadata),
    };

    Ok(ServerConfig {
        host: non_empty_var("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
        grpc_port: parse_var("GRPC_PORT")?.unwrap_or(DEFAULT_GRPC_PORT),
        stream_channel_capacity: parse_var("STREAM_CHANNEL_CAPACITY")?
            .unwrap_or(DEFAULT_CHANNEL_CAPACITY),
        webhook,
    })
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(key: &str) -> Result<Option<T>, Box<dyn std::error::Error>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match non_empty_var(key) {
        Some(raw) => raw
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("Invalid {key} value '{raw}': {e}").into()),
        None => Ok(None),
    }
}

fn parse_bool(key: &str) -> Result<Option<bool>, Box<dyn std::error::Error>> {
    match non_empty_var(key) {
        Some(raw) => match raw.to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(format!("Invalid {key} value '{raw}': expected true or false").into()),
        },
        None => Ok(None),
    }
}

/// Split a comma-separated list, dropping blank entries
pub(super) fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
