//! fetcher
//!
//! Lazy, cache-first detail fetching.
//!
//! # Design
//!
//! `DetailsFetcher::get` resolves a place's detail payload:
//!
//! 1. If the store already holds details for the place, they are returned
//!    immediately with zero provider calls.
//! 2. Otherwise exactly one outbound request is issued. On success with
//!    data, the store is updated (including its best-effort persistence
//!    attempt) *before* the call resolves, so a re-entrant read right
//!    after a completion observes the update.
//! 3. A well-formed empty response resolves to [`FetchOutcome::NoData`]
//!    and is not cached: the next `get` for the place fetches again.
//!
//! # Known limitation
//!
//! There is no retry, no timeout, and no deduplication of concurrent
//! in-flight requests for the same id: calling `get` twice before the
//! first resolves issues two network requests. The loser of that race
//! finds the details already populated and resolves with the stored
//! payload, so both callers still succeed.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::core::store::{PlaceStore, StoreError};
use crate::core::types::{PlaceDetails, PlaceId};
use crate::provider::{PlaceProvider, ProviderError};

/// Errors from detail fetching.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The place id is not in the store.
    #[error("place not found: {0}")]
    NotFound(PlaceId),

    /// The provider request failed. Recoverable: `details` stays absent,
    /// so a later retry by the user is possible.
    #[error("details request failed: {0}")]
    Failed(#[from] ProviderError),
}

/// Outcome of a successful fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    /// A detail payload, from the store or freshly fetched.
    Details(PlaceDetails),
    /// The provider responded but has no data for this venue. Not cached.
    NoData,
}

/// Lazily populates place details from the provider, store-first.
#[derive(Clone)]
pub struct DetailsFetcher {
    provider: Arc<dyn PlaceProvider>,
}

// Custom Debug because the provider is a trait object.
impl std::fmt::Debug for DetailsFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailsFetcher")
            .field("provider", &self.provider.name())
            .finish()
    }
}

impl DetailsFetcher {
    /// Create a fetcher over the given provider.
    pub fn new(provider: Arc<dyn PlaceProvider>) -> Self {
        Self { provider }
    }

    /// Resolve the detail payload for `id`, fetching it if absent.
    ///
    /// By the time this returns `Ok(FetchOutcome::Details(..))` for a
    /// fresh fetch, the store has already been updated and the
    /// persistence attempt has completed.
    ///
    /// # Errors
    ///
    /// - [`FetchError::NotFound`] if `id` is not in the store
    /// - [`FetchError::Failed`] on transport or provider failure; no
    ///   partial data is carried and the store is left untouched
    pub async fn get(
        &self,
        store: &mut PlaceStore,
        id: &PlaceId,
    ) -> Result<FetchOutcome, FetchError> {
        let place = store
            .find_by_id(id)
            .map_err(|_| FetchError::NotFound(id.clone()))?;

        // Cache hit: no network activity
        if let Some(details) = place.details() {
            debug!(%id, "details served from store");
            return Ok(FetchOutcome::Details(details.clone()));
        }

        let fetched = match self.provider.details(id).await? {
            Some(details) => details,
            None => {
                debug!(%id, "provider has no data for venue");
                return Ok(FetchOutcome::NoData);
            }
        };

        match store.set_details(id, fetched.clone()) {
            Ok(()) => Ok(FetchOutcome::Details(fetched)),
            // Lost a race against another in-flight get: the stored
            // payload wins, and this call resolves with it.
            Err(StoreError::AlreadyPopulated(_)) => {
                debug!(%id, "details populated concurrently; using stored payload");
                let stored = store
                    .find_by_id(id)
                    .map_err(|_| FetchError::NotFound(id.clone()))?
                    .details()
                    .cloned()
                    .unwrap_or(fetched);
                Ok(FetchOutcome::Details(stored))
            }
            Err(_) => Err(FetchError::NotFound(id.clone())),
        }
    }
}
