use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::config::Config;
use crate::models::{NewsDetail, NewsSummary, RouteId, WelcomeMessage};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid backend url: {0}")]
    InvalidUrl(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("backend returned status {status}")]
    Status { status: u16, detail: Option<String> },

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// Message the backend attached to an error response, if any.
    pub fn detail(&self) -> Option<&str> {
        match self {
            FetchError::Status {
                detail: Some(detail),
                ..
            } => Some(detail),
            _ => None,
        }
    }

    /// What to show the reader: the backend's own message or `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.detail().unwrap_or(fallback).to_string()
    }
}

/// HTTP client for the news backend.
pub struct BackendClient {
    client: Client,
    base: Url,
}

impl BackendClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent("Papergum/1.0 (News Frontend)")
            .build()?;
        let base = Url::parse(&config.backend_url)?;
        if base.cannot_be_a_base() {
            anyhow::bail!("backend_url cannot be used as a base: {}", config.backend_url);
        }

        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// `GET /api/news`
    pub async fn fetch_news(&self) -> Result<Vec<NewsSummary>, FetchError> {
        let url = self.endpoint(&["api", "news"])?;
        let body = self.get(url).await?;
        let items: Vec<NewsSummary> = serde_json::from_slice(&body)?;
        debug!("Received {} news items", items.len());
        Ok(items)
    }

    /// `GET /api/news/{id}`. `Ok(None)` means the backend answered
    /// successfully without a record.
    pub async fn fetch_news_detail(&self, id: &RouteId) -> Result<Option<NewsDetail>, FetchError> {
        let url = self.endpoint(&["api", "news", id.as_str()])?;
        let body = self.get(url).await?;
        let detail = Self::parse_optional::<NewsDetail>(&body)?;
        debug!("Received detail for {}: {}", id, detail.is_some());
        Ok(detail)
    }

    /// `GET /` on the backend, returning its `message` field.
    pub async fn fetch_welcome(&self) -> Result<String, FetchError> {
        let url = self.endpoint(&[])?;
        let body = self.get(url).await?;
        let welcome: WelcomeMessage = serde_json::from_slice(&body)?;
        Ok(welcome.message)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = self.base.clone();
        if !segments.is_empty() {
            url.path_segments_mut()
                .map_err(|_| FetchError::InvalidUrl(self.base.to_string()))?
                .pop_if_empty()
                .extend(segments);
        }
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                detail: Self::extract_detail(&bytes),
            });
        }

        Ok(bytes.to_vec())
    }

    /// Pull a string `detail` field out of an error body.
    pub fn extract_detail(body: &[u8]) -> Option<String> {
        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        value
            .get("detail")
            .and_then(|d| d.as_str())
            .map(|d| d.to_string())
    }

    /// Empty bodies, `null` and `{}` carry no record.
    pub fn parse_optional<T: DeserializeOwned>(body: &[u8]) -> Result<Option<T>, FetchError> {
        if body.iter().all(|b| b.is_ascii_whitespace()) {
            return Ok(None);
        }

        let value: serde_json::Value = serde_json::from_slice(body)?;
        match &value {
            serde_json::Value::Null => Ok(None),
            serde_json::Value::Object(map) if map.is_empty() => Ok(None),
            _ => Ok(Some(serde_json::from_value(value)?)),
        }
    }
}
