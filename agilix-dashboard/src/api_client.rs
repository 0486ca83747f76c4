//! REST client for the contacts API.

use crate::config::DashboardConfig;
use agilix_api::ApiError as ApiServerError;
use agilix_core::{ContactProvider, ContactRecord, ProviderError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ApiClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Unexpected response: {0}")]
    InvalidResponse(String),
    #[error("Config error: {0}")]
    Config(String),
}

impl From<ApiClientError> for ProviderError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::Status { status, message } => {
                ProviderError::RequestFailed { status, message }
            }
            ApiClientError::Http(e) if e.is_decode() => ProviderError::InvalidResponse {
                reason: e.to_string(),
            },
            ApiClientError::InvalidResponse(reason) => ProviderError::InvalidResponse { reason },
            other => ProviderError::Transport {
                reason: other.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderMap,
}

impl RestClient {
    pub fn new(config: &DashboardConfig) -> Result<Self, ApiClientError> {
        let timeout = Duration::from_millis(config.request_timeout_ms);
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        let auth_header = build_auth_headers(config.auth_token.as_deref())?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list_contacts(&self) -> Result<Vec<ContactRecord>, ApiClientError> {
        self.get_json("/api/contacts").await
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, ApiClientError>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(url)
            .headers(self.auth_header.clone())
            .send()
            .await?;
        self.parse_response(response).await
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ApiClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(response.json::<T>().await?)
        } else {
            let text = response.text().await?;
            let message = match serde_json::from_str::<ApiServerError>(&text) {
                Ok(api_error) => format!("{}: {}", api_error.code, api_error.message),
                Err(_) => text,
            };
            Err(ApiClientError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ContactProvider for RestClient {
    async fn fetch_contacts(&self) -> Result<Vec<ContactRecord>, ProviderError> {
        self.list_contacts().await.map_err(|e| {
            tracing::debug!(base_url = %self.base_url, error = %e, "contacts request failed");
            ProviderError::from(e)
        })
    }
}

fn build_auth_headers(token: Option<&str>) -> Result<HeaderMap, ApiClientError> {
    let mut headers = HeaderMap::new();
    if let Some(jwt) = token {
        let value = format!("Bearer {}", jwt.trim());
        headers.insert(
            HeaderName::from_static("authorization"),
            HeaderValue::from_str(&value).map_err(|e| ApiClientError::Config(e.to_string()))?,
        );
    }
    Ok(headers)
}
