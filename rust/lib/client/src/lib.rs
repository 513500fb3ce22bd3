//! HTTP client for the property API.
//!
//! # Usage
//!
//! ```ignore
//! use estate_client::{PropertyClient, resolve_base_url};
//!
//! let client = PropertyClient::new(resolve_base_url(None));
//! let all = client.list().await?;
//! ```

use estate_core::FieldError;
use property::model::{NewProperty, Property, PropertyPatch};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

/// Base URL used when neither a flag nor the environment names one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3001";

/// Environment variable holding the API base URL.
pub const BASE_URL_ENV: &str = "ESTATE_API_URL";

/// Resolve the API base URL: explicit value, then `ESTATE_API_URL`, then
/// [`DEFAULT_BASE_URL`].
pub fn resolve_base_url(explicit: Option<&str>) -> String {
    pick_base_url(explicit, std::env::var(BASE_URL_ENV).ok().as_deref())
}

fn pick_base_url(explicit: Option<&str>, env: Option<&str>) -> String {
    explicit
        .or(env)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string()
}

// ── Error ───────────────────────────────────────────────────────────

/// Client-side API error.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the payload (HTTP 400).
    #[error("validation failed: {}", join_details(.details))]
    Validation { details: Vec<FieldError> },

    /// The server has no such property (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),
}

impl ApiError {
    /// Field-level details of a validation failure; empty otherwise.
    pub fn details(&self) -> &[FieldError] {
        match self {
            ApiError::Validation { details } => details,
            _ => &[],
        }
    }
}

fn join_details(details: &[FieldError]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(default)]
    details: Vec<FieldError>,
}

/// Map a non-success response to an [`ApiError`].
pub fn error_from_body(status: u16, body: &str) -> ApiError {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    match (status, parsed) {
        (400, Some(b)) => ApiError::Validation { details: b.details },
        (404, Some(b)) => ApiError::NotFound(b.error),
        (404, None) => ApiError::NotFound(body.to_string()),
        (_, Some(b)) => ApiError::Server { status, message: b.error },
        (_, None) => ApiError::Server { status, message: body.to_string() },
    }
}

// ── PropertyClient ──────────────────────────────────────────────────

/// Typed client for the five property endpoints.
#[derive(Clone)]
pub struct PropertyClient {
    http: reqwest::Client,
    base_url: String,
}

impl PropertyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn fail(resp: reqwest::Response) -> ApiError {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        debug!(status, "property API error: {}", body);
        error_from_body(status, &body)
    }

    /// Parse an API response, mapping HTTP errors to `ApiError`.
    async fn parse<R: DeserializeOwned>(resp: reqwest::Response) -> Result<R, ApiError> {
        if !resp.status().is_success() {
            return Err(Self::fail(resp).await);
        }
        resp.json::<R>()
            .await
            .map_err(|e| ApiError::Decode(format!("response body: {}", e)))
    }

    /// List all properties.
    pub async fn list(&self) -> Result<Vec<Property>, ApiError> {
        let resp = self.http.get(self.url("/")).send().await?;
        Self::parse(resp).await
    }

    /// Get a property by ID.
    pub async fn get(&self, id: &str) -> Result<Property, ApiError> {
        let resp = self.http.get(self.url(&format!("/get/{id}"))).send().await?;
        Self::parse(resp).await
    }

    pub async fn create(&self, payload: &NewProperty) -> Result<Property, ApiError> {
        let resp = self.http.post(self.url("/create")).json(payload).send().await?;
        Self::parse(resp).await
    }

    /// Update the supplied fields of an existing property.
    pub async fn update(&self, id: &str, patch: &PropertyPatch) -> Result<Property, ApiError> {
        let resp = self
            .http
            .put(self.url(&format!("/update/{id}")))
            .json(patch)
            .send()
            .await?;
        Self::parse(resp).await
    }

    /// Server health document (`GET /health`).
    pub async fn health(&self) -> Result<serde_json::Value, ApiError> {
        let resp = self.http.get(self.url("/health")).send().await?;
        Self::parse(resp).await
    }

    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let resp = self.http.delete(self.url(&format!("/delete/{id}"))).send().await?;
        if !resp.status().is_success() {
            return Err(Self::fail(resp).await);
        }
        Ok(())
    }
}
