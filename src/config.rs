use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::domain::{ConfigError, ConnectionEntry};

pub const DEFAULT_CONFIG_PATH: &str = "cmd/default.yaml";
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

/// How the check report is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Table,
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: PathBuf,
    pub log_level: String,
    pub attempt_timeout: Duration,
    pub report_format: ReportFormat,
    pub pubsub_emulator_host: Option<String>,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let attempt_timeout = match var("CONNPROBE_ATTEMPT_TIMEOUT") {
            Some(raw) => humantime::parse_duration(raw.trim()).map_err(|e| ConfigError::Setting {
                name: "CONNPROBE_ATTEMPT_TIMEOUT",
                reason: e.to_string(),
            })?,
            None => DEFAULT_ATTEMPT_TIMEOUT,
        };

        let report_format = match var("CONNPROBE_REPORT_FORMAT").as_deref().map(str::trim) {
            None | Some("table") => ReportFormat::Table,
            Some("json") => ReportFormat::Json,
            Some(other) => {
                return Err(ConfigError::Setting {
                    name: "CONNPROBE_REPORT_FORMAT",
                    reason: format!("expected table or json, got {}", other),
                })
            }
        };

        Ok(Self {
            config_path: var("CONNPROBE_CONFIG")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
            log_level: var("CONNPROBE_LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            attempt_timeout,
            report_format,
            pubsub_emulator_host: var("PUBSUB_EMULATOR_HOST"),
        })
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
            log_level: "info".to_string(),
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
            report_format: ReportFormat::Table,
            pubsub_emulator_host: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    check: CheckSection,
}

#[derive(Debug, Default, Deserialize)]
struct CheckSection {
    #[serde(default)]
    connections: BTreeMap<String, ConnectionEntry>,
}

/// Configured resources keyed by name, iterated in name order
pub type Connections = BTreeMap<String, ConnectionEntry>;

/// Read `check.connections` from a YAML file
pub fn load_connections(path: &Path) -> Result<Connections, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_connections(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse `check.connections` from YAML text. An empty document has no connections.
pub fn parse_connections(content: &str) -> Result<Connections, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Connections::new());
    }
    let file: Option<ConfigFile> = serde_yaml::from_str(content)?;
    Ok(file.unwrap_or_default().check.connections)
}
