//! HTTP client for the Square Connect v2 API.
//!
//! Wraps `reqwest` with bearer authentication, the pinned `Square-Version`
//! header, typed response deserialization and Square's error envelope.
//! Nothing here retries: every failure is returned to the caller as a
//! [`SquareError`].

mod catalog;

use std::time::{Duration, Instant};

use menubridge_core::SquareEnvironment;
use reqwest::{Client, Method, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SquareError;
use crate::types::{ListLocationsResponse, SquareErrorResponse, SquareLocation};

/// API version pinned on every request.
pub const SQUARE_VERSION: &str = "2025-01-23";

/// Default ceiling on catalog search pages followed before returning an
/// error. Prevents infinite loops on cycling cursors.
pub const MAX_PAGES: usize = 500;

/// Client for the Square Connect API.
///
/// Use [`SquareClient::new`] for a real Square environment or
/// [`SquareClient::with_base_url`] to point at a mock server in tests.
pub struct SquareClient {
    client: Client,
    access_token: Option<String>,
    base_url: Url,
    max_pages: usize,
}

impl SquareClient {
    /// Creates a client for the given Square environment.
    ///
    /// A missing `access_token` is not an error here; each request fails
    /// with [`SquareError::MissingAccessToken`] instead.
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        access_token: Option<&str>,
        environment: SquareEnvironment,
        timeout_secs: u64,
    ) -> Result<Self, SquareError> {
        Self::with_base_url(access_token, timeout_secs, environment.base_url())
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SquareError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SquareError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        access_token: Option<&str>,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SquareError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("menubridge/0.1")
            .build()?;

        let base_url = Url::parse(base_url).map_err(|e| SquareError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            access_token: access_token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_owned),
            base_url,
            max_pages: MAX_PAGES,
        })
    }

    /// Overrides the catalog search page ceiling (default [`MAX_PAGES`]).
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn has_access_token(&self) -> bool {
        self.access_token.is_some()
    }

    /// Lists every location on the Square account, active or not.
    ///
    /// # Errors
    ///
    /// - [`SquareError::MissingAccessToken`] if no token is configured.
    /// - [`SquareError::RequestFailed`] on a non-2xx status.
    /// - [`SquareError::Http`] on network failure.
    /// - [`SquareError::Deserialize`] if the body does not match the expected shape.
    pub async fn fetch_locations(&self) -> Result<Vec<SquareLocation>, SquareError> {
        let response: ListLocationsResponse = self
            .request_json(Method::GET, "/v2/locations", None::<&()>)
            .await?;
        Ok(response.locations)
    }

    /// Sends one authenticated request and decodes the JSON response.
    ///
    /// Logs method, path, status and duration at `debug`, and the extracted
    /// Square error details at `warn` when the status is not a success.
    pub(crate) async fn request_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<T, SquareError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let token = self
            .access_token
            .as_deref()
            .ok_or(SquareError::MissingAccessToken)?;
        let url = self.endpoint(path)?;

        let mut request = self
            .client
            .request(method.clone(), url)
            .bearer_auth(token)
            .header("Square-Version", SQUARE_VERSION)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }

        let started_at = Instant::now();
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!(
            method = %method,
            path,
            status = status.as_u16(),
            duration_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Square API request completed"
        );

        if !status.is_success() {
            // An unreadable error body still reports the upstream status.
            let details = response
                .text()
                .await
                .ok()
                .as_deref()
                .and_then(extract_error_details);
            tracing::warn!(
                method = %method,
                path,
                status = status.as_u16(),
                details = ?details,
                "Square API request failed"
            );
            return Err(SquareError::RequestFailed {
                method: method.to_string(),
                path: path.to_owned(),
                status: status.as_u16(),
                details,
            });
        }

        let text = response.text().await?;
        serde_json::from_str::<T>(&text).map_err(|e| SquareError::Deserialize {
            context: format!("{method} {path}"),
            source: e,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, SquareError> {
        self.base_url
            .join(path)
            .map_err(|e| SquareError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join path \"{path}\": {e}"),
            })
    }
}

/// Pulls `errors[].detail` out of a Square error body.
///
/// Returns `None` when the body is not a JSON error envelope or carries no
/// `errors` list. Entries without a `detail` become `"Unknown error"`.
pub(crate) fn extract_error_details(body: &str) -> Option<Vec<String>> {
    let parsed: SquareErrorResponse = serde_json::from_str(body).ok()?;
    let errors = parsed.errors?;
    Some(
        errors
            .into_iter()
            .map(|err| err.detail.unwrap_or_else(|| "Unknown error".to_string()))
            .collect(),
    )
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
