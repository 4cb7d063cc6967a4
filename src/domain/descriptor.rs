use std::fmt::Display;
use std::str::FromStr;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_yaml::Value;

use super::{ConstructionError, ResourceKind};

/// One entry under `check.connections`, keyed by resource name
///
/// Carries the union of every kind's fields. Fields a kind does not use are
/// ignored, and absent keys fall back to zero values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourceDescriptor {
    #[serde(rename = "type")]
    pub kind: ResourceKind,
    #[serde(rename = "is_checked", deserialize_with = "lenient")]
    pub checked: bool,

    // mysql / redis
    pub host: String,
    #[serde(deserialize_with = "lenient")]
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    #[serde(deserialize_with = "lenient")]
    pub db: i64,

    // http
    pub url: String,
    pub method: String,
    pub timeout: String,

    // pubsub
    pub project_id: String,
    pub credentials_json: String,
    pub topic_id: String,
}

/// Accept a scalar in its native YAML form or spelled as a string
/// (`port: "3306"`, `is_checked: "true"`). Null takes the zero value.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + FromStr + Default,
    T::Err: Display,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(T::default()),
        Value::String(text) => text
            .trim()
            .parse()
            .map_err(|e| D::Error::custom(format!("{:?}: {}", text, e))),
        other => T::deserialize(other).map_err(D::Error::custom),
    }
}

/// One `check.connections` entry as written in the file
///
/// Typing is deferred until the entry is used, so a malformed entry only
/// affects its own report row.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ConnectionEntry(Value);

impl ConnectionEntry {
    /// Declared `type`, readable even when other fields are malformed
    pub fn kind(&self) -> ResourceKind {
        match self.0.get("type") {
            Some(Value::String(kind)) => ResourceKind::from(kind.as_str()),
            _ => ResourceKind::default(),
        }
    }

    pub fn descriptor(&self) -> Result<ResourceDescriptor, ConstructionError> {
        if self.0.is_null() {
            return Ok(ResourceDescriptor::default());
        }
        serde_yaml::from_value(self.0.clone())
            .map_err(|e| ConstructionError::InvalidField(e.to_string()))
    }
}

#[cfg(test)]
impl From<ResourceDescriptor> for ConnectionEntry {
    fn from(descriptor: ResourceDescriptor) -> Self {
        Self(serde_yaml::to_value(descriptor).unwrap())
    }
}

#[cfg(test)]
impl ResourceDescriptor {
    pub fn new(kind: impl Into<ResourceKind>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_endpoint(mut self, host: impl Into<String>, port: u16) -> Self {
        self.host = host.into();
        self.port = port;
        self
    }

    pub fn with_url(mut self, method: impl Into<String>, url: impl Into<String>) -> Self {
        self.method = method.into();
        self.url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: impl Into<String>) -> Self {
        self.timeout = timeout.into();
        self
    }
}
