//! provider::foursquare
//!
//! Foursquare venues API implementation over REST.
//!
//! # Design
//!
//! Two endpoints are used:
//! - `GET /venues/search` for the bulk seed search
//! - `GET /venues/{id}` for a single venue's details
//!
//! Both responses arrive in the `{meta, response}` envelope; this module
//! unwraps the envelope and hands back the inner payload. A success
//! response whose `venue` object is absent or empty decodes to `None`
//! ("no data available") rather than an error.
//!
//! # Authentication
//!
//! Requests carry `client_id`/`client_secret` query parameters plus the
//! pinned API version. There is no token refresh; bad credentials come
//! back as an API error status.
//!
//! # Rate Limiting
//!
//! The API has rate limits. This implementation returns
//! `ProviderError::RateLimited` when they are hit and does not retry
//! (caller's responsibility).

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use super::traits::{PlaceProvider, ProviderError, SearchRequest};
use crate::core::config::ProviderConfig;
use crate::core::types::{PlaceDetails, PlaceId, RawPlace};

/// Default API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.foursquare.com/v2";

/// Pinned API version, sent as the `v` parameter.
const API_VERSION: &str = "20180101";

/// Foursquare provider implementation.
///
/// # Example
///
/// ```ignore
/// use venuemap::provider::FoursquareProvider;
///
/// let provider = FoursquareProvider::new("CLIENT_ID", "CLIENT_SECRET");
/// let venues = provider.search(request).await?;
/// ```
pub struct FoursquareProvider {
    /// HTTP client for making requests
    client: Client,
    /// API client id
    client_id: String,
    /// API client secret
    client_secret: String,
    /// API base URL (configurable for tests)
    api_base: String,
}

// Custom Debug to avoid exposing client_secret
impl std::fmt::Debug for FoursquareProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FoursquareProvider")
            .field("client_id", &self.client_id)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl FoursquareProvider {
    /// Create a provider against the public API endpoint.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a provider with a custom API base URL.
    ///
    /// Tests point this at a local mock server.
    pub fn with_api_base(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_base: api_base.into(),
        }
    }

    /// Create a provider from a validated [`ProviderConfig`].
    pub fn from_config(config: &ProviderConfig) -> Self {
        match &config.api_base {
            Some(base) => {
                Self::with_api_base(&config.client_id, &config.client_secret, base)
            }
            None => Self::new(&config.client_id, &config.client_secret),
        }
    }

    /// Build URL for a venues endpoint.
    fn venues_url(&self, path: &str) -> String {
        format!("{}/venues/{}", self.api_base, path)
    }

    /// Credential and version parameters every request carries.
    fn auth_params(&self) -> [(&'static str, &str); 3] {
        [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("v", API_VERSION),
        ]
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        response: Response,
    ) -> Result<T, ProviderError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| ProviderError::Decode(format!("failed to parse response: {}", e)))
        } else {
            Err(self.error_for_status(response, status).await)
        }
    }

    /// Map an error response to a ProviderError.
    async fn error_for_status(&self, response: Response, status: StatusCode) -> ProviderError {
        // Try to get the errorDetail from the meta envelope
        let message = match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => envelope
                .meta
                .error_detail
                .unwrap_or_else(|| "unknown error".to_string()),
            Err(_) => "unknown error".to_string(),
        };

        match status {
            StatusCode::TOO_MANY_REQUESTS => ProviderError::RateLimited,
            _ => ProviderError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[async_trait]
impl PlaceProvider for FoursquareProvider {
    fn name(&self) -> &'static str {
        "foursquare"
    }

    async fn search(&self, request: SearchRequest) -> Result<Vec<RawPlace>, ProviderError> {
        let ll = format!("{},{}", request.center.lat(), request.center.lng());
        let radius = request.radius_m.to_string();
        let limit = request.limit.to_string();

        let response = self
            .client
            .get(self.venues_url("search"))
            .query(&self.auth_params())
            .query(&[
                ("ll", ll.as_str()),
                ("radius", radius.as_str()),
                ("limit", limit.as_str()),
                ("query", request.query.as_str()),
            ])
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let envelope: SearchEnvelope = self.handle_response(response).await?;
        Ok(envelope.response.venues)
    }

    async fn details(&self, id: &PlaceId) -> Result<Option<PlaceDetails>, ProviderError> {
        let response = self
            .client
            .get(self.venues_url(id.as_str()))
            .query(&self.auth_params())
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let envelope: DetailsEnvelope = self.handle_response(response).await?;

        // Absent or empty venue object is the "no data" sentinel
        let venue = match envelope.response.venue {
            Some(value) if !is_empty_object(&value) => value,
            _ => return Ok(None),
        };

        serde_json::from_value(venue)
            .map(Some)
            .map_err(|e| ProviderError::Decode(format!("failed to parse venue details: {}", e)))
    }
}

/// Whether a JSON value is `{}` (or null), the provider's no-data shape.
fn is_empty_object(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => true,
        serde_json::Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Envelope of a search response.
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    response: SearchResponse,
}

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    venues: Vec<RawPlace>,
}

/// Envelope of a details response.
#[derive(Debug, Deserialize)]
struct DetailsEnvelope {
    #[serde(default)]
    response: DetailsResponse,
}

#[derive(Debug, Default, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    venue: Option<serde_json::Value>,
}

/// Error envelope: `{meta: {code, errorType, errorDetail}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    meta: ErrorMeta,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorMeta {
    #[serde(rename = "errorDetail")]
    error_detail: Option<String>,
}
