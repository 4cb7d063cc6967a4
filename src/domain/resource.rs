use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::Probe;

/// Declared kind of a configured resource
///
/// Kinds the prober does not know are kept verbatim so the factory can
/// report them back to the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceKind {
    MySql,
    Http,
    Redis,
    PubSub,
    Other(String),
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::MySql => "mysql",
            Self::Http => "http",
            Self::Redis => "redis",
            Self::PubSub => "pubsub",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for ResourceKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "mysql" => Self::MySql,
            "http" => Self::Http,
            "redis" => Self::Redis,
            "pubsub" => Self::PubSub,
            _ => Self::Other(kind),
        }
    }
}

impl From<&str> for ResourceKind {
    fn from(kind: &str) -> Self {
        Self::from(kind.to_string())
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        kind.as_str().to_string()
    }
}

impl Default for ResourceKind {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A materialized resource: the probe plus the flags it was declared with.
/// Lives for a single check run.
#[derive(Debug, Clone)]
pub struct Resource {
    pub name: String,
    pub kind: ResourceKind,
    pub checked: bool,
    pub probe: Probe,
}

impl Resource {
    pub fn new(name: impl Into<String>, kind: ResourceKind, checked: bool, probe: Probe) -> Self {
        Self {
            name: name.into(),
            kind,
            checked,
            probe,
        }
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.probe.timeout()
    }
}
