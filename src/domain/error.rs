use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// The resource file could not be loaded. Aborts the whole run.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid setting {name}: {reason}")]
    Setting { name: &'static str, reason: String },
}

/// A single descriptor could not be turned into a probe
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error("invalid timeout format: {0}")]
    InvalidTimeout(String),

    #[error("unsupported resource type: {0}")]
    UnsupportedType(String),

    #[error("invalid field: {0}")]
    InvalidField(String),
}

/// A probe attempt failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConnectionError {
    #[error("HTTP connection failed: {0}")]
    HttpTransport(String),

    #[error("HTTP request failed with status: {0}")]
    HttpStatus(u16),

    #[error("failed to connect to MySQL: {0}")]
    MySqlOpen(String),

    #[error("MySQL ping failed: {0}")]
    MySqlPing(String),

    #[error("failed to query tables: {0}")]
    MySqlQuery(String),

    #[error("failed to create Redis client: {0}")]
    RedisClient(String),

    #[error("Redis ping failed: {0}")]
    RedisPing(String),

    #[error("failed to create Pub/Sub client: {0}")]
    PubSubClient(String),

    #[error("failed to check topic existence: {0}")]
    TopicCheck(String),

    #[error("topic {0} does not exist")]
    TopicNotFound(String),

    #[error("{operation} timed out after {}", format_timeout(.timeout))]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },
}

fn format_timeout(timeout: &Duration) -> humantime::FormattedDuration {
    humantime::format_duration(*timeout)
}
