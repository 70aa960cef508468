//! Shopfront API - the remote resource client.
//!
//! A thin, stateless wrapper over the storefront's REST API: build the
//! URL, attach the bearer token when the endpoint is protected, send,
//! and either parse the JSON body or normalize the failure. No caching,
//! no retries, no business logic.
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_api::ApiClient;
//!
//! let api = ApiClient::new("https://shop.example.com")?;
//! let page = api.list_products("?keyword=phone&page=1").await?;
//! println!("{} products", page.products.len());
//! ```

mod endpoints;
mod error;
mod payloads;

pub use error::ApiError;
pub use payloads::{PaymentResult, ProductUpdate, ProfileUpdate, UserUpdate};

use http::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

/// Shape of the server's failure body.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: String,
}

/// HTTP client for the storefront REST API.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for `base_url` with no whole-request timeout
    /// beyond the transport's own.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, None)
    }

    /// Create a client with an optional whole-request timeout.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|e| ApiError::Setup(e.to_string()))?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, base_url })
    }

    /// The base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Begin an unauthenticated request.
    pub(crate) fn start(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        tracing::debug!(%method, path, "api request");
        self.http.request(method, self.url(path))
    }

    /// Begin a protected request. A missing token is a caller error:
    /// nothing is sent and nothing is retried.
    pub(crate) fn start_authed(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let token = token.ok_or(ApiError::MissingToken)?;
        Ok(self.start(method, path).bearer_auth(token))
    }

    /// Send the request and parse a JSON response body.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self.check(request).await?;
        response.json().await.map_err(ApiError::from_reqwest)
    }

    /// Send the request and discard any response body.
    pub(crate) async fn execute_empty(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<(), ApiError> {
        self.check(request).await.map(|_| ())
    }

    /// Send the request and return the raw response text.
    pub(crate) async fn execute_text(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<String, ApiError> {
        let response = self.check(request).await?;
        response.text().await.map_err(ApiError::from_reqwest)
    }

    /// Send and fail on non-2xx, extracting `detail` from the failure
    /// body when present.
    async fn check(&self, request: reqwest::RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(ApiError::from_reqwest)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.detail)
            .unwrap_or_else(|_| {
                status
                    .canonical_reason()
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()))
            });
        tracing::warn!(status = status.as_u16(), %detail, "api request failed");
        Err(ApiError::Api {
            status: status.as_u16(),
            detail,
        })
    }
}
