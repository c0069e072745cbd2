//! Configuration module for the IVR relay
//!
//! Configuration comes from .env files, environment variables and an optional
//! YAML file. Priority: YAML > ENV vars > .env values > defaults.
//!
//! # Modules
//! - `yaml`: YAML configuration file loading
//! - `env`: Environment variable loading
//! - `merge`: Merging YAML and environment configurations
//! - `validation`: Configuration validation logic
//!
//! # Example
//! ```rust,no_run
//! use ivr_relay::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable overrides
//! let config_path = PathBuf::from("config.yaml");
//! let config = ServerConfig::from_file(&config_path)?;
//!
//! println!("gRPC listening on {}", config.grpc_address());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

mod env;
mod merge;
mod validation;
mod yaml;

pub use yaml::YamlConfig;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_GRPC_PORT: u16 = 50051;
pub const DEFAULT_WEBHOOK_PORT: u16 = 5001;
pub const DEFAULT_AUDIO_CONTENT_TYPE: &str = "audio/mulaw;rate=8000";

pub(crate) fn default_metadata() -> Vec<String> {
    vec!["testing".to_string()]
}

/// Call-setup webhook settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// Serve the webhook HTTP service alongside the gRPC listener
    pub enabled: bool,
    pub port: u16,
    /// Address the platform dials for the audio stream
    pub audio_stream_host: Option<String>,
    /// Public base URL of the webhook service; `/callback` is appended
    pub webhook_host: Option<String>,
    /// Content type requested in the `AudioStream` command
    pub content_type: String,
    pub metadata: Vec<String>,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: DEFAULT_WEBHOOK_PORT,
            audio_stream_host: None,
            webhook_host: None,
            content_type: DEFAULT_AUDIO_CONTENT_TYPE.to_string(),
            metadata: default_metadata(),
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub grpc_port: u16,
    /// Responses buffered per stream before the dispatcher waits on the peer
    pub stream_channel_capacity: usize,
    pub webhook: WebhookConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            grpc_port: DEFAULT_GRPC_PORT,
            stream_channel_capacity: crate::transport::DEFAULT_CHANNEL_CAPACITY,
            webhook: WebhookConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// The .env file is loaded in main.rs before this runs, so its values
    /// show up here as ordinary environment variables.
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        let config = merge::merge_config(None)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file with environment variable base
    ///
    /// Priority order (highest to lowest):
    /// 1. YAML file values
    /// 2. Environment variables (actual ENV vars override .env values)
    /// 3. .env file values
    /// 4. Default values
    ///
    /// # Errors
    /// Returns an error if:
    /// - The YAML file cannot be read or is malformed
    /// - Environment variables have invalid formats
    /// - Configuration validation fails
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let yaml_config = yaml::YamlConfig::from_file(path)?;
        let config = merge::merge_config(Some(yaml_config))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the configuration for values the listeners cannot run with
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        validation::validate_ports(self)?;
        validation::validate_stream(self)?;
        validation::validate_webhook(&self.webhook)?;
        Ok(())
    }

    /// gRPC listen address as "host:port"
    pub fn grpc_address(&self) -> String {
        format!("{}:{}", self.host, self.grpc_port)
    }

    /// Webhook listen address as "host:port"
    pub fn webhook_address(&self) -> String {
        format!("{}:{}", self.host, self.webhook.port)
    }
}
