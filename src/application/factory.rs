use std::time::Duration;

use tracing::warn;

use crate::config::Settings;
use crate::domain::{
    ConstructionError, HttpProbe, MySqlProbe, Probe, PubSubCredentials, PubSubProbe, RedisProbe,
    Resource, ResourceDescriptor, ResourceKind,
};

/// Ambient Pub/Sub credential source handed to every Pub/Sub probe that
/// does not carry its own key
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AmbientCredentials {
    #[default]
    ApplicationDefault,
    Emulator(String),
}

/// Turns configuration records into probes. Performs no I/O.
#[derive(Debug, Clone)]
pub struct ResourceFactory {
    attempt_timeout: Duration,
    ambient: AmbientCredentials,
}

impl ResourceFactory {
    pub fn new(attempt_timeout: Duration, ambient: AmbientCredentials) -> Self {
        Self {
            attempt_timeout,
            ambient,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let ambient = match &settings.pubsub_emulator_host {
            Some(host) => AmbientCredentials::Emulator(host.clone()),
            None => AmbientCredentials::ApplicationDefault,
        };
        Self::new(settings.attempt_timeout, ambient)
    }

    /// Build the resource for one named descriptor
    pub fn materialize(
        &self,
        name: &str,
        descriptor: &ResourceDescriptor,
    ) -> Result<Resource, ConstructionError> {
        let probe = self.probe_for(descriptor)?;
        Ok(Resource::new(
            name,
            descriptor.kind.clone(),
            descriptor.checked,
            probe,
        ))
    }

    fn probe_for(&self, d: &ResourceDescriptor) -> Result<Probe, ConstructionError> {
        let probe = match &d.kind {
            ResourceKind::MySql => Probe::MySql(MySqlProbe {
                host: d.host.clone(),
                port: d.port,
                user: d.user.clone(),
                password: d.password.clone(),
                database: d.database.clone(),
                timeout: self.optional_timeout(d),
            }),
            ResourceKind::Http => Probe::Http(HttpProbe {
                url: d.url.clone(),
                method: d.method.clone(),
                timeout: parse_timeout(&d.timeout)?,
            }),
            ResourceKind::Redis => Probe::Redis(RedisProbe {
                host: d.host.clone(),
                port: d.port,
                password: d.password.clone(),
                db: d.db,
                timeout: self.optional_timeout(d),
            }),
            ResourceKind::PubSub => Probe::PubSub(PubSubProbe {
                project_id: d.project_id.clone(),
                topic_id: d.topic_id.clone(),
                credentials: self.pubsub_credentials(&d.credentials_json),
                timeout: self.optional_timeout(d),
            }),
            ResourceKind::Other(kind) => {
                return Err(ConstructionError::UnsupportedType(kind.clone()));
            }
        };
        Ok(probe)
    }

    /// `timeout` is only required for http. Elsewhere an unreadable value
    /// falls back to the attempt timeout.
    fn optional_timeout(&self, d: &ResourceDescriptor) -> Duration {
        if d.timeout.trim().is_empty() {
            return self.attempt_timeout;
        }
        parse_timeout(&d.timeout).unwrap_or_else(|e| {
            warn!(kind = %d.kind, "Ignoring {}, using {:?}", e, self.attempt_timeout);
            self.attempt_timeout
        })
    }

    fn pubsub_credentials(&self, credentials_json: &str) -> PubSubCredentials {
        if !credentials_json.trim().is_empty() {
            return PubSubCredentials::ServiceAccountJson(credentials_json.to_string());
        }
        match &self.ambient {
            AmbientCredentials::ApplicationDefault => PubSubCredentials::Ambient,
            AmbientCredentials::Emulator(host) => PubSubCredentials::Emulator(host.clone()),
        }
    }
}

impl Default for ResourceFactory {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

/// Parse a duration such as `5s`, `750ms` or `1m30s`
fn parse_timeout(raw: &str) -> Result<Duration, ConstructionError> {
    humantime::parse_duration(raw.trim())
        .map_err(|e| ConstructionError::InvalidTimeout(format!("{:?}: {}", raw, e)))
}
