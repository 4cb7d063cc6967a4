use std::time::Duration;

/// HTTP endpoint probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpProbe {
    pub url: String,
    pub method: String,
    pub timeout: Duration,
}

/// MySQL server probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlProbe {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub timeout: Duration,
}

impl MySqlProbe {
    /// Bound on opening the connection, independent of the attempt timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Connection string without the password
    pub fn dsn(&self) -> String {
        format!("mysql://{}@{}:{}/{}", self.user, self.host, self.port, self.database)
    }
}

/// Redis server probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisProbe {
    pub host: String,
    pub port: u16,
    pub password: String,
    pub db: i64,
    pub timeout: Duration,
}

/// Where a Pub/Sub probe gets its credentials from
#[derive(Clone, PartialEq, Eq)]
pub enum PubSubCredentials {
    /// Service account key supplied inline in the resource file
    ServiceAccountJson(String),
    /// Application default credentials, resolved when the attempt runs
    Ambient,
    /// Local emulator reachable at `host:port`, no authentication
    Emulator(String),
}

impl std::fmt::Debug for PubSubCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ServiceAccountJson(_) => f.write_str("ServiceAccountJson(<redacted>)"),
            Self::Ambient => f.write_str("Ambient"),
            Self::Emulator(host) => f.debug_tuple("Emulator").field(host).finish(),
        }
    }
}

/// Google Cloud Pub/Sub topic probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PubSubProbe {
    pub project_id: String,
    pub topic_id: String,
    pub credentials: PubSubCredentials,
    pub timeout: Duration,
}

/// A single-resource connectivity check
///
/// Built once from a descriptor and never mutated. Connection attempts live
/// in the adapters layer; describing is pure and available here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    Http(HttpProbe),
    MySql(MySqlProbe),
    Redis(RedisProbe),
    PubSub(PubSubProbe),
}

impl Probe {
    /// Human-readable identifier used in reports. Passwords and keys are left out.
    pub fn describe(&self) -> String {
        match self {
            Self::Http(p) => format!("{}:{}", p.method, p.url),
            Self::MySql(p) => p.dsn(),
            Self::Redis(p) => format!("redis://{}:{}/{}", p.host, p.port, p.db),
            Self::PubSub(p) => format!("pubsub://{}/topics/{}", p.project_id, p.topic_id),
        }
    }

    /// Upper bound for a whole attempt
    pub fn timeout(&self) -> Duration {
        match self {
            Self::Http(p) => p.timeout,
            Self::MySql(p) => p.timeout,
            Self::Redis(p) => p.timeout,
            Self::PubSub(p) => p.timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mysql() -> Probe {
        Probe::MySql(MySqlProbe {
            host: "db.internal".to_string(),
            port: 3306,
            user: "app".to_string(),
            password: "hunter2".to_string(),
            database: "orders".to_string(),
            timeout: Duration::from_secs(10),
        })
    }

    #[test]
    fn test_describe_formats() {
        assert_eq!(mysql().describe(), "mysql://app@db.internal:3306/orders");

        let http = Probe::Http(HttpProbe {
            url: "https://example.com/health".to_string(),
            method: "GET".to_string(),
            timeout: Duration::from_secs(3),
        });
        assert_eq!(http.describe(), "GET:https://example.com/health");

        let redis = Probe::Redis(RedisProbe {
            host: "cache".to_string(),
            port: 6379,
            password: String::new(),
            db: 2,
            timeout: Duration::from_secs(10),
        });
        assert_eq!(redis.describe(), "redis://cache:6379/2");

        let pubsub = Probe::PubSub(PubSubProbe {
            project_id: "acme".to_string(),
            topic_id: "events".to_string(),
            credentials: PubSubCredentials::Ambient,
            timeout: Duration::from_secs(10),
        });
        assert_eq!(pubsub.describe(), "pubsub://acme/topics/events");
    }

    #[test]
    fn test_describe_is_deterministic_and_hides_password() {
        let probe = mysql();
        assert_eq!(probe.describe(), probe.describe());
        assert!(!probe.describe().contains("hunter2"));
    }

    #[test]
    fn test_credentials_debug_is_redacted() {
        let creds = PubSubCredentials::ServiceAccountJson("{\"private_key\":\"k\"}".to_string());
        assert!(!format!("{:?}", creds).contains("private_key"));
    }
}
