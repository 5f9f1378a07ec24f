//! provider::traits
//!
//! Place provider trait definition.
//!
//! # Design
//!
//! The `PlaceProvider` trait is async because provider operations involve
//! network I/O. All methods return `Result` to handle API errors
//! gracefully. A well-formed-but-empty detail payload is not an error: it
//! decodes to `Ok(None)` so callers can distinguish "no data available"
//! from a failed request.
//!
//! # Example
//!
//! ```ignore
//! use venuemap::provider::{PlaceProvider, SearchRequest};
//!
//! async fn seed(provider: &dyn PlaceProvider) -> Result<(), ProviderError> {
//!     let venues = provider.search(SearchRequest {
//!         center: Coordinates::new(40.74, -73.99)?,
//!         radius_m: 2000,
//!         limit: 10,
//!         query: "rehearsal studios".to_string(),
//!     }).await?;
//!     println!("{} venues", venues.len());
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::{Coordinates, PlaceDetails, PlaceId, RawPlace};

/// Errors from provider operations.
///
/// These error types map to common failure modes when talking to a
/// remote places API.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// API returned a non-success status.
    #[error("API error: {status} - {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// Network or connection error.
    #[error("network error: {0}")]
    Network(String),

    /// A response arrived but could not be decoded.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Request for the bulk seed search.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    /// Geographic center of the search.
    pub center: Coordinates,
    /// Search radius in meters.
    pub radius_m: u32,
    /// Maximum number of results.
    pub limit: u32,
    /// Free-text query.
    pub query: String,
}

/// The PlaceProvider trait for talking to an external places API.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, ProviderError>`. Callers should handle:
/// - `Api`: Display a "request failed" status to the user
/// - `RateLimited`: Back off; no automatic retry is performed
/// - `Network`: Check connectivity
/// - `Decode`: Treat like an API failure
#[async_trait]
pub trait PlaceProvider: Send + Sync {
    /// Get the provider name (e.g., "foursquare", "mock").
    fn name(&self) -> &'static str;

    /// Search for venues around a geographic center.
    ///
    /// Returns the raw place records in provider order; records are
    /// validated later, at store initialization. An empty list is a valid
    /// response meaning no venues matched.
    async fn search(&self, request: SearchRequest) -> Result<Vec<RawPlace>, ProviderError>;

    /// Fetch the detail payload for a single venue.
    ///
    /// Returns `Ok(None)` when the provider responds successfully but has
    /// no data for the venue (the empty-object sentinel).
    async fn details(&self, id: &PlaceId) -> Result<Option<PlaceDetails>, ProviderError>;
}
