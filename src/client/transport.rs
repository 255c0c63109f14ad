use super::error::ClientError;
use crate::config::StatboardConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header;
use std::time::Duration;
use url::Url;

/// HTTP capability of the client. The production implementation wraps a
/// `reqwest` client; tests substitute their own.
///
/// Implementations perform the status check themselves, so a returned
/// body always came with a 2xx status.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn get(&self, path: &str) -> Result<String, ClientError>;
    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<String, ClientError>;
}

pub struct HttpTransport {
    base: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        // Parse once so a bad base URL fails at construction, not on the
        // first request.
        let base = Url::parse(base_url)
            .with_context(|| format!("invalid API base URL: {base_url}"))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            base: base.as_str().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &StatboardConfig) -> Result<Self> {
        Self::new(
            &config.api_url,
            Duration::from_secs(config.request_timeout_seconds),
        )
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }
}

fn check_status(path: &str, response: &reqwest::Response) -> Result<(), ClientError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(ClientError::Status {
            path: path.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl ApiTransport for HttpTransport {
    async fn get(&self, path: &str) -> Result<String, ClientError> {
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|source| ClientError::Network {
                path: path.to_string(),
                source,
            })?;
        check_status(path, &response)?;
        response.text().await.map_err(|source| ClientError::Network {
            path: path.to_string(),
            source,
        })
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<String, ClientError> {
        let response = self
            .client
            .post(self.endpoint(path))
            .header(header::ACCEPT, "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|source| ClientError::Network {
                path: path.to_string(),
                source,
            })?;
        check_status(path, &response)?;
        response.text().await.map_err(|source| ClientError::Network {
            path: path.to_string(),
            source,
        })
    }
}
