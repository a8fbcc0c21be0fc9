//! HTTP access to marketplace stats endpoints

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::shared::errors::FetchError;
use super::traits::StatsSource;

const USER_AGENT: &str = concat!("floorwatch/", env!("CARGO_PKG_VERSION"));

/// Stats source backed by a shared reqwest client.
/// Every request is bounded by the client timeout.
pub struct HttpStatsSource {
    http_client: Client,
}

impl HttpStatsSource {
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let http_client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self::from_client(http_client))
    }

    pub fn from_client(http_client: Client) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl StatsSource for HttpStatsSource {
    async fn fetch_json(&self, url: &str) -> Result<Value, FetchError> {
        debug!("GET {}", url);

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
