//! HTTP side of the fetcher.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::error::PresenceError;
use crate::types::{ApiEnvelope, LanyardData, PresenceSnapshot};

/// Anything that can produce a presence snapshot for an identity.
#[async_trait]
pub trait PresenceSource: Send + Sync {
    async fn fetch_presence(&self, identity: &str) -> Result<PresenceSnapshot, PresenceError>;
}

/// HTTP client settings for [`LanyardHttp`].
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// API base, e.g. `https://api.lanyard.rest`.
    pub api_base_url: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.lanyard.rest".into(),
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(10),
        }
    }
}

/// Lanyard REST client.
pub struct LanyardHttp {
    config: HttpConfig,
    http: reqwest::Client,
}

impl LanyardHttp {
    pub fn new(config: HttpConfig) -> Result<Self, PresenceError> {
        let http = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| PresenceError::Network(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { config, http })
    }

    pub(crate) fn user_url(&self, identity: &str) -> String {
        user_url(&self.config.api_base_url, identity)
    }
}

#[async_trait]
impl PresenceSource for LanyardHttp {
    async fn fetch_presence(&self, identity: &str) -> Result<PresenceSnapshot, PresenceError> {
        let url = self.user_url(identity);
        debug!(identity = %identity, "Fetching presence");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| PresenceError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PresenceError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| PresenceError::Network(e.to_string()))?;

        parse_user_response(identity, &body)
    }
}

pub(crate) fn user_url(base: &str, identity: &str) -> String {
    format!("{}/v1/users/{identity}", base.trim_end_matches('/'))
}

/// Decode a `/v1/users/{id}` body into a snapshot.
pub(crate) fn parse_user_response(
    identity: &str,
    body: &str,
) -> Result<PresenceSnapshot, PresenceError> {
    let envelope: ApiEnvelope =
        serde_json::from_str(body).map_err(|e| PresenceError::Decode(e.to_string()))?;

    if !envelope.success {
        let message = envelope
            .error
            .map(|e| {
                if e.message.is_empty() {
                    e.code
                } else {
                    e.message
                }
            })
            .unwrap_or_else(|| "success=false".to_string());
        return Err(PresenceError::Unsuccessful {
            identity: identity.to_string(),
            message,
        });
    }

    let data = envelope
        .data
        .ok_or_else(|| PresenceError::Decode("missing data".into()))?;
    let data: LanyardData =
        serde_json::from_value(data).map_err(|e| PresenceError::Decode(e.to_string()))?;
    Ok(data.into())
}
