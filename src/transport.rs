//! HTTP transport used by the client
//!
//! The client only needs two operations from the network: a JSON `POST` and a
//! `GET`, both returning the HTTP status and the decoded JSON body. They are
//! expressed as the [`Transport`] trait so that tests and embedders can supply
//! their own implementation; [`HttpTransport`] is the reqwest-backed default.

use crate::error::TransportError;
use crate::types::DEFAULT_BASE_URL;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default request timeout of [`HttpTransport`]
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Decoded reply of a transport call
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Parsed JSON body
    pub data: Value,
}

/// Network capability the client depends on
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send `body` as JSON to `path`
    async fn post(&self, path: &str, body: &Value) -> Result<TransportResponse, TransportError>;

    /// Fetch `path`
    async fn get(&self, path: &str) -> Result<TransportResponse, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn post(&self, path: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        (**self).post(path, body).await
    }

    async fn get(&self, path: &str) -> Result<TransportResponse, TransportError> {
        (**self).get(path).await
    }
}

/// reqwest-backed transport talking JSON to the gateway
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL every path is appended to
    base_url: String,
    /// HTTP client
    client: Client,
}

impl HttpTransport {
    /// Create a transport for `base_url` with an optional timeout
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut client_builder = Client::builder().default_headers(headers);
        if let Some(timeout) = timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// Wrap an already configured reqwest client
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of this transport
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> Result<String, TransportError> {
        if !path.starts_with('/') {
            return Err(TransportError::InvalidUrl {
                message: format!("path must start with '/': {}", path),
            });
        }
        Ok(format!("{}{}", self.base_url, path))
    }

    async fn read_response(response: Response) -> Result<TransportResponse, TransportError> {
        let status = response.status();
        let body = response.text().await.map_err(strip_url)?;

        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = serde_json::from_str(&body)?;
        Ok(TransportResponse {
            status: status.as_u16(),
            data,
        })
    }
}

// Status paths embed the API key, so request URLs stay out of error messages.
fn strip_url(error: reqwest::Error) -> TransportError {
    TransportError::Http(error.without_url())
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL, Some(DEFAULT_TIMEOUT))
            .unwrap_or_else(|_| Self::with_client(DEFAULT_BASE_URL, Client::new()))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post(&self, path: &str, body: &Value) -> Result<TransportResponse, TransportError> {
        let url = self.url_for(path)?;
        debug!(%path, "POST to gateway");

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(strip_url)?;
        Self::read_response(response).await
    }

    async fn get(&self, path: &str) -> Result<TransportResponse, TransportError> {
        let url = self.url_for(path)?;
        debug!("GET from gateway");

        let response = self.client.get(url).send().await.map_err(strip_url)?;
        Self::read_response(response).await
    }
}
