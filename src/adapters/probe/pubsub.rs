use gcp_auth::{CustomServiceAccount, TokenProvider};
use reqwest::{StatusCode, Url};
use tracing::debug;

use crate::domain::{ConnectionError, PubSubCredentials, PubSubProbe};

const PUBSUB_ENDPOINT: &str = "https://pubsub.googleapis.com";
const PUBSUB_SCOPE: &str = "https://www.googleapis.com/auth/pubsub";

/// Minimal Pub/Sub REST client, scoped to one attempt
struct PubSubClient {
    http: reqwest::Client,
    endpoint: Url,
    bearer: Option<String>,
}

impl PubSubClient {
    async fn connect(probe: &PubSubProbe) -> Result<Self, ConnectionError> {
        let http = reqwest::Client::builder()
            .timeout(probe.timeout)
            .build()
            .map_err(|e| ConnectionError::PubSubClient(e.to_string()))?;

        let (endpoint, bearer) = match &probe.credentials {
            PubSubCredentials::Emulator(host) => (format!("http://{}", host), None),
            PubSubCredentials::ServiceAccountJson(json) => {
                let account = CustomServiceAccount::from_json(json)
                    .map_err(|e| ConnectionError::PubSubClient(e.to_string()))?;
                let token = account
                    .token(&[PUBSUB_SCOPE])
                    .await
                    .map_err(|e| ConnectionError::PubSubClient(e.to_string()))?;
                (PUBSUB_ENDPOINT.to_string(), Some(token.as_str().to_string()))
            }
            PubSubCredentials::Ambient => {
                let provider = gcp_auth::provider()
                    .await
                    .map_err(|e| ConnectionError::PubSubClient(e.to_string()))?;
                let token = provider
                    .token(&[PUBSUB_SCOPE])
                    .await
                    .map_err(|e| ConnectionError::PubSubClient(e.to_string()))?;
                (PUBSUB_ENDPOINT.to_string(), Some(token.as_str().to_string()))
            }
        };

        let endpoint =
            Url::parse(&endpoint).map_err(|e| ConnectionError::PubSubClient(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            bearer,
        })
    }

    fn topic_url(&self, project_id: &str, topic_id: &str) -> Result<Url, ConnectionError> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| ConnectionError::PubSubClient(format!("invalid endpoint {}", self.endpoint)))?
            .pop_if_empty()
            .extend(["v1", "projects", project_id, "topics", topic_id]);
        Ok(url)
    }

    async fn topic_exists(&self, project_id: &str, topic_id: &str) -> Result<bool, ConnectionError> {
        let url = self.topic_url(project_id, topic_id)?;
        let mut request = self.http.get(url);
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ConnectionError::TopicCheck(e.to_string()))?;

        let status = response.status();
        debug!(project_id, topic_id, status = status.as_u16(), "Pub/Sub topic lookup");

        match status {
            s if s.is_success() => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            s => {
                let body = response.text().await.unwrap_or_default();
                Err(ConnectionError::TopicCheck(format!("{} {}", s, body.trim())))
            }
        }
    }
}

/// Build a client for the project and confirm the topic exists
pub async fn attempt(probe: &PubSubProbe) -> Result<(), ConnectionError> {
    let client = PubSubClient::connect(probe).await?;
    if client.topic_exists(&probe.project_id, &probe.topic_id).await? {
        Ok(())
    } else {
        Err(ConnectionError::TopicNotFound(probe.topic_id.clone()))
    }
}
