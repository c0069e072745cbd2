use serde::Deserialize;
use std::path::PathBuf;

/// Complete YAML configuration structure
///
/// Every field is optional so a file can carry a partial configuration.
/// Values found here override environment variables.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   grpc_port: 50051
///
/// stream:
///   channel_capacity: 32
///
/// webhook:
///   enabled: true
///   port: 5001
///   audio_stream_host: "relay.example.com:50051"
///   webhook_host: "https://hooks.example.com"
///   content_type: "audio/mulaw;rate=8000"
///   metadata:
///     - "testing"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct YamlConfig {
    pub server: Option<ServerYaml>,
    pub stream: Option<StreamYaml>,
    pub webhook: Option<WebhookYaml>,
}

/// Listener configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ServerYaml {
    pub host: Option<String>,
    pub grpc_port: Option<u16>,
}

/// Per-stream tuning from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StreamYaml {
    /// Buffered responses per stream before the dispatcher waits on the peer
    pub channel_capacity: Option<usize>,
}

/// Call-setup webhook configuration from YAML
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct WebhookYaml {
    pub enabled: Option<bool>,
    pub port: Option<u16>,
    /// Address the platform dials for the gRPC audio stream
    pub audio_stream_host: Option<String>,
    /// Public base URL of this webhook service
    pub webhook_host: Option<String>,
    pub content_type: Option<String>,
    pub metadata: Option<Vec<String>>,
}

impl YamlConfig {
    /// Load YAML configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;

        let config: YamlConfig = serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse YAML config: {e}"))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_yaml_config_full() {
        let yaml = r#"
server:
  host: "127.0.0.1"
  grpc_port: 6000

stream:
  channel_capacity: 8

webhook:
  enabled: true
  port: 6001
  audio_stream_host: "relay.example.com:6000"
  webhook_host: "https://hooks.example.com"
  content_type: "audio/l16;rate=16000"
  metadata:
    - "alpha"
    - "beta"
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();

        let server = config.server.as_ref().unwrap();
        assert_eq!(server.host, Some("127.0.0.1".to_string()));
        assert_eq!(server.grpc_port, Some(6000));
        assert_eq!(config.stream.as_ref().unwrap().channel_capacity, Some(8));

        let webhook = config.webhook.as_ref().unwrap();
        assert_eq!(webhook.enabled, Some(true));
        assert_eq!(webhook.port, Some(6001));
        assert_eq!(
            webhook.audio_stream_host.as_deref(),
            Some("relay.example.com:6000")
        );
        assert_eq!(
            webhook.webhook_host.as_deref(),
            Some("https://hooks.example.com")
        );
        assert_eq!(
            webhook.content_type.as_deref(),
            Some("audio/l16;rate=16000")
        );
        assert_eq!(
            webhook.metadata,
            Some(vec!["alpha".to_string(), "beta".to_string()])
        );
    }

    #[test]
    fn test_yaml_config_partial() {
        let yaml = r#"
server:
  grpc_port: 9000
"#;

        let config: YamlConfig = serde_yaml::from_str(yaml).unwrap();

        assert!(config.server.as_ref().unwrap().host.is_none());
        assert_eq!(config.server.as_ref().unwrap().grpc_port, Some(9000));
        assert!(config.stream.is_none());
        assert!(config.webhook.is_none());
    }

    #[test]
    fn test_yaml_config_empty() {
        let config: YamlConfig = serde_yaml::from_str("").unwrap();

        assert!(config.server.is_none());
        assert!(config.stream.is_none());
        assert!(config.webhook.is_none());
    }

    #[test]
    fn test_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.yaml");

        fs::write(
            &config_path,
            "server:\n  host: \"localhost\"\n  grpc_port: 3000\n",
        )
        .unwrap();

        let config = YamlConfig::from_file(&config_path).unwrap();

        assert_eq!(
            config.server.as_ref().unwrap().host,
            Some("localhost".to_string())
        );
        assert_eq!(config.server.as_ref().unwrap().grpc_port, Some(3000));
    }

    #[test]
    fn test_from_file_not_found() {
        let path = PathBuf::from("/nonexistent/config.yaml");
        let result = YamlConfig::from_file(&path);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to read config file")
        );
    }

    #[test]
    fn test_from_file_invalid_yaml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("invalid.yaml");

        fs::write(&config_path, "invalid: yaml: content:").unwrap();

        let result = YamlConfig::from_file(&config_path);

        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("Failed to parse YAML")
        );
    }
}
