//! Consumer configuration
//!
//! Loaded from a TOML file at startup; every field has a default so the
//! binary runs against a local publisher with no config at all.
//!
//! ```toml
//! [subscriber]
//! endpoint = "127.0.0.1:5556"
//! filter = ""              # empty = subscribe to everything
//! max_frame_bytes = 65536
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors surfaced at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Top-level consumer configuration
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct ConsumerConfig {
    #[serde(default)]
    pub subscriber: SubscriberSettings,
}

/// Subscriber connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SubscriberSettings {
    /// Publisher endpoint to connect to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Subscription filter prefix; empty subscribes to all messages.
    #[serde(default)]
    pub filter: String,

    /// Cap on a single frame body from the publisher.
    #[serde(default = "default_max_frame_bytes")]
    pub max_frame_bytes: usize,
}

fn default_endpoint() -> String {
    "127.0.0.1:5556".to_string()
}

fn default_max_frame_bytes() -> usize {
    64 * 1024
}

impl Default for SubscriberSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            filter: String::new(),
            max_frame_bytes: default_max_frame_bytes(),
        }
    }
}

impl ConsumerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.subscriber.endpoint.is_empty() {
            return Err(ConfigError::Invalid(
                "subscriber.endpoint must not be empty".to_string(),
            ));
        }

        if self.subscriber.max_frame_bytes == 0 {
            return Err(ConfigError::Invalid(
                "subscriber.max_frame_bytes must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_local_publisher() {
        let config = ConsumerConfig::default();
        assert_eq!(config.subscriber.endpoint, "127.0.0.1:5556");
        assert!(config.subscriber.filter.is_empty());
        assert_eq!(config.subscriber.max_frame_bytes, 65536);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[subscriber]\nendpoint = \"10.0.0.7:5556\"").unwrap();

        let config = ConsumerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.subscriber.endpoint, "10.0.0.7:5556");
        assert_eq!(config.subscriber.max_frame_bytes, 65536);
    }

    #[test]
    fn empty_endpoint_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[subscriber]\nendpoint = \"\"").unwrap();

        assert!(matches!(
            ConsumerConfig::from_file(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn zero_frame_cap_is_rejected() {
        let config = ConsumerConfig {
            subscriber: SubscriberSettings {
                max_frame_bytes: 0,
                ..Default::default()
            },
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[subscriber\nendpoint =").unwrap();

        assert!(matches!(
            ConsumerConfig::from_file(file.path()),
            Err(ConfigError::Parse(_))
        ));
    }
}
