//! RPKI HTTP client implementation.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use rpki_core::{RecordFilter, RpkiRecord};

use crate::error::ClientError;

/// RPKI records API client.
#[derive(Debug, Clone)]
pub struct RpkiClient {
    client: Client,
    base_url: String,
}

impl RpkiClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the service (e.g., `"http://rpki-service:8080"`)
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is empty or the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ClientError::Configuration("base URL is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Fetch records matching `filter`.
    ///
    /// Only populated filter keys are sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn query(&self, filter: &RecordFilter) -> Result<Vec<RpkiRecord>, ClientError> {
        let url = format!("{}/rpki", self.base_url);

        tracing::debug!(url = %url, ?filter, "Querying RPKI records");

        let response = self.client.get(&url).query(filter).send().await?;

        Self::handle_response(response).await
    }

    /// Check service health.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        let url = format!("{}/health", self.base_url);

        let response = self.client.get(&url).send().await?;

        Self::handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return Ok(serde_json::from_str(&body)?);
        }

        match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(api_error) => Err(ClientError::Api {
                code: api_error.error.code,
                message: api_error.error.message,
                status: status.as_u16(),
            }),
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: if body.is_empty() {
                    format!("HTTP {status}")
                } else {
                    body
                },
                status: status.as_u16(),
            }),
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
        }
    }
}
