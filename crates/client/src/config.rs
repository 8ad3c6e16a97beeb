//! Client configuration via a TOML file
//!
//! Every field has a default, so an empty file (or no file at all) yields a
//! working client that waits on the channel without a local timeout.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use replicadb_core::Limits;

/// Client configuration.
///
/// # Example
///
/// ```toml
/// # Give up waiting after 5 seconds (outcome unknown)
/// request_timeout_ms = 5000
/// max_batch_size = 10000
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Caller-side timeout per call in milliseconds. Absent means wait for
    /// the channel to resolve.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_ms: Option<u64>,
    /// Maximum number of requests in one batch.
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_max_batch_size() -> usize {
    Limits::default().max_batch_size
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: None,
            max_batch_size: default_max_batch_size(),
        }
    }
}

/// Errors loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file '{path}': {reason}")]
    Read { path: String, reason: String },

    /// The file is not valid TOML for [`ClientConfig`].
    #[error("failed to parse config file '{path}': {reason}")]
    Parse { path: String, reason: String },

    /// A value is out of range.
    #[error("invalid config: {reason}")]
    Invalid { reason: String },
}

impl ClientConfig {
    /// The configured caller-side timeout.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_ms.map(Duration::from_millis)
    }

    /// Client-side limits derived from this config. Only the batch size is
    /// enforced before submission.
    pub fn limits(&self) -> Limits {
        Limits {
            max_batch_size: self.max_batch_size,
            ..Limits::default()
        }
    }

    /// Reject values that would make every call fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_batch_size == 0 {
            return Err(ConfigError::Invalid {
                reason: "max_batch_size must be at least 1".into(),
            });
        }
        if self.request_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid {
                reason: "request_timeout_ms must be positive when set".into(),
            });
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# ReplicaDB client configuration
#
# Caller-side timeout per call, in milliseconds. When it elapses the call
# fails with a timeout error and the command MAY still commit.
# Leave unset to wait for the submission channel to resolve.
# request_timeout_ms = 5000

# Maximum number of requests in one batchRead / batchWrite call.
max_batch_size = 10000
"#
    }

    /// Read, parse and validate config from a file path.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        let config: ClientConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }
}
