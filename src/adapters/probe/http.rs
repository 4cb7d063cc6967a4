use tracing::debug;

use crate::domain::{ConnectionError, HttpProbe};

/// Issue one GET against the probe's URL. Status codes >= 400 count as failures.
pub async fn attempt(probe: &HttpProbe) -> Result<(), ConnectionError> {
    let client = reqwest::Client::builder()
        .timeout(probe.timeout)
        .build()
        .map_err(|e| ConnectionError::HttpTransport(e.to_string()))?;

    let response = client
        .get(&probe.url)
        .send()
        .await
        .map_err(|e| ConnectionError::HttpTransport(e.to_string()))?;

    let status = response.status();
    debug!(url = %probe.url, status = status.as_u16(), "HTTP probe response");

    if status.as_u16() >= 400 {
        return Err(ConnectionError::HttpStatus(status.as_u16()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::net::SocketAddr;
    use std::time::Duration;

    use axum::{http::StatusCode, routing::get, Router};

    use super::*;

    async fn serve() -> SocketAddr {
        let app = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
            .route("/boom", get(|| async { StatusCode::INTERNAL_SERVER_ERROR }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn probe(url: String) -> HttpProbe {
        HttpProbe {
            url,
            method: "GET".to_string(),
            timeout: Duration::from_secs(2),
        }
    }

    #[tokio::test]
    async fn test_success_status_connects() {
        let addr = serve().await;
        assert_eq!(attempt(&probe(format!("http://{}/ok", addr))).await, Ok(()));
    }

    #[tokio::test]
    async fn test_error_statuses_fail() {
        let addr = serve().await;
        assert_eq!(
            attempt(&probe(format!("http://{}/missing", addr))).await,
            Err(ConnectionError::HttpStatus(404))
        );
        assert_eq!(
            attempt(&probe(format!("http://{}/boom", addr))).await,
            Err(ConnectionError::HttpStatus(500))
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = attempt(&probe(format!("http://{}/", addr))).await.unwrap_err();
        assert!(matches!(err, ConnectionError::HttpTransport(_)));
        assert!(err.to_string().starts_with("HTTP connection failed"));
    }

    #[tokio::test]
    async fn test_configured_timeout_applies() {
        let addr = serve().await;
        let mut slow = probe(format!("http://{}/slow", addr));
        slow.timeout = Duration::from_millis(100);

        let err = attempt(&slow).await.unwrap_err();
        assert!(matches!(err, ConnectionError::HttpTransport(_)));
    }

    #[tokio::test]
    async fn test_malformed_url_fails_at_attempt() {
        let err = attempt(&probe("not a url".to_string())).await.unwrap_err();
        assert!(matches!(err, ConnectionError::HttpTransport(_)));
    }
}
