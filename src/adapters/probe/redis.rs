use reqwest::Url;

use crate::domain::{ConnectionError, RedisProbe};

/// `redis://[:password@]host:port/db`, with the password percent-encoded
fn connection_url(probe: &RedisProbe) -> Result<Url, ConnectionError> {
    let mut url = Url::parse(&format!("redis://{}:{}/{}", probe.host, probe.port, probe.db))
        .map_err(|e| ConnectionError::RedisClient(e.to_string()))?;
    if !probe.password.is_empty() {
        url.set_password(Some(&probe.password))
            .map_err(|_| ConnectionError::RedisClient("cannot attach password to address".to_string()))?;
    }
    Ok(url)
}

/// Open a client against the configured database and send PING
pub async fn attempt(probe: &RedisProbe) -> Result<(), ConnectionError> {
    let url = connection_url(probe)?;
    let client =
        redis::Client::open(url.as_str()).map_err(|e| ConnectionError::RedisClient(e.to_string()))?;

    let mut conn = client
        .get_multiplexed_async_connection()
        .await
        .map_err(|e| ConnectionError::RedisPing(e.to_string()))?;

    let _: String = redis::cmd("PING")
        .query_async(&mut conn)
        .await
        .map_err(|e| ConnectionError::RedisPing(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn probe(host: &str, port: u16, password: &str) -> RedisProbe {
        RedisProbe {
            host: host.to_string(),
            port,
            password: password.to_string(),
            db: 2,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_connection_url() {
        let url = connection_url(&probe("cache", 6379, "")).unwrap();
        assert_eq!(url.as_str(), "redis://cache:6379/2");

        let url = connection_url(&probe("cache", 6379, "p@ss word")).unwrap();
        assert_eq!(url.as_str(), "redis://:p%40ss%20word@cache:6379/2");
    }

    #[test]
    fn test_empty_host_is_client_error() {
        let err = connection_url(&probe("", 6379, "")).unwrap_err();
        assert!(matches!(err, ConnectionError::RedisClient(_)));
    }

    #[tokio::test]
    async fn test_unreachable_server_fails_ping() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = attempt(&probe("127.0.0.1", port, "")).await.unwrap_err();
        assert!(matches!(err, ConnectionError::RedisPing(_)));
        assert!(err.to_string().starts_with("Redis ping failed"));
    }
}
