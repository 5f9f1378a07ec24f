//! provider::mock
//!
//! Mock provider implementation for deterministic testing.
//!
//! # Design
//!
//! The mock provider serves canned venue data from memory, records every
//! operation for call-count assertions, and allows configuring failure
//! scenarios per method.
//!
//! # Example
//!
//! ```
//! use venuemap::core::types::{RawLocation, RawPlace};
//! use venuemap::provider::mock::MockProvider;
//! use venuemap::provider::{PlaceProvider, SearchRequest};
//! use venuemap::core::types::Coordinates;
//!
//! # tokio_test::block_on(async {
//! let provider = MockProvider::new().with_venues(vec![RawPlace {
//!     id: Some("a".into()),
//!     name: Some("Jazz Room".into()),
//!     location: Some(RawLocation { lat: Some(40.7), lng: Some(-73.9) }),
//!     ..RawPlace::default()
//! }]);
//!
//! let venues = provider.search(SearchRequest {
//!     center: Coordinates::new(40.74, -73.99).unwrap(),
//!     radius_m: 2000,
//!     limit: 10,
//!     query: "jazz".to_string(),
//! }).await.unwrap();
//!
//! assert_eq!(venues.len(), 1);
//! assert_eq!(provider.search_calls(), 1);
//! # });
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{PlaceProvider, ProviderError, SearchRequest};
use crate::core::types::{PlaceDetails, PlaceId, RawPlace};

/// Mock provider for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share
/// state.
#[derive(Debug, Clone, Default)]
pub struct MockProvider {
    inner: Arc<Mutex<MockProviderInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockProviderInner {
    /// Venues returned from search.
    venues: Vec<RawPlace>,
    /// Detail replies by venue id.
    details: HashMap<String, DetailsReply>,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<ProviderOperation>,
}

/// Canned reply for a details request.
#[derive(Debug, Clone)]
pub enum DetailsReply {
    /// A populated detail payload.
    Payload(PlaceDetails),
    /// The empty-object sentinel: well-formed response, no data.
    Empty,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail search with the given error.
    Search(ProviderError),
    /// Fail details with the given error.
    Details(ProviderError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderOperation {
    Search { query: String },
    Details { id: String },
}

impl MockProvider {
    /// Create a new empty mock provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the venues returned from search.
    pub fn with_venues(self, venues: Vec<RawPlace>) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.venues = venues;
        }
        self
    }

    /// Serve a populated detail payload for a venue id.
    pub fn with_details(self, id: &str, details: PlaceDetails) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner
                .details
                .insert(id.to_string(), DetailsReply::Payload(details));
        }
        self
    }

    /// Serve the empty-object sentinel for a venue id.
    pub fn with_empty_details(self, id: &str) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.details.insert(id.to_string(), DetailsReply::Empty);
        }
        self
    }

    /// Configure the mock to fail on a specific operation.
    ///
    /// # Example
    ///
    /// ```
    /// use venuemap::provider::mock::{FailOn, MockProvider};
    /// use venuemap::provider::ProviderError;
    ///
    /// let provider = MockProvider::new()
    ///     .fail_on(FailOn::Details(ProviderError::RateLimited));
    /// ```
    pub fn fail_on(self, fail_on: FailOn) -> Self {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.fail_on = Some(fail_on);
        }
        self
    }

    /// Clear the failure configuration.
    pub fn clear_fail_on(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_on = None;
    }

    /// Get all recorded operations.
    ///
    /// Useful for verifying the mock was called correctly.
    pub fn operations(&self) -> Vec<ProviderOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Count of search calls issued.
    pub fn search_calls(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, ProviderOperation::Search { .. }))
            .count()
    }

    /// Count of details calls issued, across all venue ids.
    pub fn details_calls(&self) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, ProviderOperation::Details { .. }))
            .count()
    }

    /// Count of details calls issued for one venue id.
    pub fn details_calls_for(&self, id: &str) -> usize {
        self.operations()
            .iter()
            .filter(|op| matches!(op, ProviderOperation::Details { id: called } if called == id))
            .count()
    }

    /// Record an operation.
    fn record(&self, op: ProviderOperation) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(op);
    }

    /// Check if we should fail and return the error if so.
    fn check_fail(&self, expected: &str) -> Option<ProviderError> {
        let inner = self.inner.lock().unwrap();
        match &inner.fail_on {
            Some(FailOn::Search(e)) if expected == "search" => Some(e.clone()),
            Some(FailOn::Details(e)) if expected == "details" => Some(e.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl PlaceProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search(&self, request: SearchRequest) -> Result<Vec<RawPlace>, ProviderError> {
        self.record(ProviderOperation::Search {
            query: request.query.clone(),
        });

        if let Some(err) = self.check_fail("search") {
            return Err(err);
        }

        let inner = self.inner.lock().unwrap();
        Ok(inner.venues.clone())
    }

    async fn details(&self, id: &PlaceId) -> Result<Option<PlaceDetails>, ProviderError> {
        self.record(ProviderOperation::Details {
            id: id.as_str().to_string(),
        });

        if let Some(err) = self.check_fail("details") {
            return Err(err);
        }

        let inner = self.inner.lock().unwrap();
        match inner.details.get(id.as_str()) {
            Some(DetailsReply::Payload(details)) => Ok(Some(details.clone())),
            Some(DetailsReply::Empty) => Ok(None),
            None => Err(ProviderError::Api {
                status: 400,
                message: format!("unknown venue id: {}", id),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Coordinates, RawLocation};

    fn raw_place(id: &str, name: &str) -> RawPlace {
        RawPlace {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            location: Some(RawLocation {
                lat: Some(40.74),
                lng: Some(-73.99),
            }),
            ..RawPlace::default()
        }
    }

    fn request() -> SearchRequest {
        SearchRequest {
            center: Coordinates::new(40.74, -73.99).unwrap(),
            radius_m: 2000,
            limit: 10,
            query: "jazz".to_string(),
        }
    }

    #[tokio::test]
    async fn search_returns_canned_venues() {
        let provider = MockProvider::new().with_venues(vec![raw_place("a", "Jazz Room")]);

        let venues = provider.search(request()).await.unwrap();
        assert_eq!(venues.len(), 1);
        assert_eq!(venues[0].id.as_deref(), Some("a"));
    }

    #[tokio::test]
    async fn details_serves_payload_and_sentinel() {
        let provider = MockProvider::new()
            .with_details(
                "a",
                PlaceDetails {
                    rating: Some(9.0),
                    ..PlaceDetails::default()
                },
            )
            .with_empty_details("b");

        let populated = provider.details(&PlaceId::new("a").unwrap()).await.unwrap();
        assert_eq!(populated.unwrap().rating, Some(9.0));

        let sentinel = provider.details(&PlaceId::new("b").unwrap()).await.unwrap();
        assert!(sentinel.is_none());
    }

    #[tokio::test]
    async fn details_unknown_id_is_api_error() {
        let provider = MockProvider::new();
        let err = provider
            .details(&PlaceId::new("zzz").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: 400, .. }));
    }

    #[tokio::test]
    async fn fail_on_search() {
        let provider =
            MockProvider::new().fail_on(FailOn::Search(ProviderError::Network("down".into())));

        assert!(provider.search(request()).await.is_err());

        provider.clear_fail_on();
        assert!(provider.search(request()).await.is_ok());
    }

    #[tokio::test]
    async fn operations_count_calls() {
        let provider = MockProvider::new()
            .with_venues(vec![raw_place("a", "Jazz Room")])
            .with_empty_details("a");

        provider.search(request()).await.unwrap();
        let id = PlaceId::new("a").unwrap();
        provider.details(&id).await.unwrap();
        provider.details(&id).await.unwrap();

        assert_eq!(provider.search_calls(), 1);
        assert_eq!(provider.details_calls(), 2);
        assert_eq!(provider.details_calls_for("a"), 2);
        assert_eq!(provider.details_calls_for("b"), 0);
    }
}
