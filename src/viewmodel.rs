//! viewmodel
//!
//! Explicit context object wiring the core to the seams.
//!
//! # Architecture
//!
//! The host constructs a [`MapViewModel`] once, at startup, via
//! [`MapViewModel::bootstrap`], and routes every discrete user action
//! through it: search-box input to [`filter`], marker clicks and list
//! clicks to [`select`]. There are no ambient singletons; everything the
//! core needs is injected here and owned here.
//!
//! All operations run on one logical thread of control. The only
//! suspension points are the bulk seed search during bootstrap and the
//! per-place detail fetch during selection; neither supports
//! cancellation.
//!
//! [`filter`]: MapViewModel::filter
//! [`select`]: MapViewModel::select

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};

use crate::cache::{CacheStore, PlaceRepository};
use crate::core::config::{AppConfig, ConfigError};
use crate::core::selection::{SelectionChange, SelectionController};
use crate::core::store::{PlaceStore, StoreError};
use crate::core::types::PlaceId;
use crate::fetcher::{DetailsFetcher, FetchError, FetchOutcome};
use crate::map::{MapWidget, MarkerAnimation};
use crate::provider::{PlaceProvider, ProviderError, SearchRequest};

/// Errors from view-model construction.
///
/// All of these are fatal to startup: no partial view-model is produced.
#[derive(Debug, Error)]
pub enum BootstrapError {
    /// The configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The seed search succeeded but returned no venues.
    #[error("no places data available")]
    NoPlaces,

    /// The seed search failed.
    #[error("places request failed: {0}")]
    Search(#[from] ProviderError),

    /// The seed records could not be made into a store.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors from selecting a place.
#[derive(Debug, Error)]
pub enum SelectError {
    /// The place id is not in the store.
    #[error("place not found: {0}")]
    NotFound(PlaceId),

    /// The detail fetch failed. The selection itself stands; the host
    /// shows a "request failed" status and the user can select again.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// The view-model: owns the store, the fetcher, and the selection, and
/// drives the map widget.
pub struct MapViewModel {
    store: PlaceStore,
    fetcher: DetailsFetcher,
    selection: SelectionController,
    map: Arc<dyn MapWidget>,
}

// Custom Debug because the widget is a trait object.
impl std::fmt::Debug for MapViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapViewModel")
            .field("store", &self.store)
            .field("selection", &self.selection)
            .finish()
    }
}

impl MapViewModel {
    /// Construct the view-model: rehydrate the place list from the side
    /// channel if possible, otherwise run the bulk seed search, then
    /// populate the map.
    ///
    /// When the list came fresh from the network it is persisted
    /// immediately (best-effort), so the next start can skip the search.
    /// An unreadable cached blob is discarded and treated as absent; the
    /// format has no migration scheme.
    ///
    /// # Errors
    ///
    /// - [`BootstrapError::Config`] if `config` fails validation
    /// - [`BootstrapError::Search`] if the seed search fails
    /// - [`BootstrapError::NoPlaces`] if the seed search returns nothing
    /// - [`BootstrapError::Store`] if the seed records are malformed
    pub async fn bootstrap(
        config: AppConfig,
        provider: Arc<dyn PlaceProvider>,
        cache: Arc<dyn CacheStore>,
        map: Arc<dyn MapWidget>,
    ) -> Result<Self, BootstrapError> {
        config.validate()?;
        let repository = PlaceRepository::new(cache, &config.cache_key);

        let cached = match repository.load() {
            Ok(cached) => cached,
            Err(err) => {
                warn!("discarding unreadable place cache: {err}");
                None
            }
        };

        let (records, rehydrated) = match cached {
            Some(records) => {
                debug!(count = records.len(), "rehydrated place list from cache");
                (records, true)
            }
            None => {
                let request = SearchRequest {
                    center: config.search.center,
                    radius_m: config.search.radius_m,
                    limit: config.search.limit,
                    query: config.search.query.clone(),
                };
                let records = provider.search(request).await?;
                if records.is_empty() {
                    return Err(BootstrapError::NoPlaces);
                }
                debug!(count = records.len(), "seeded place list from provider");
                (records, false)
            }
        };

        let store = PlaceStore::initialize(records, repository)?;
        if !rehydrated {
            store.persist_best_effort();
        }

        map.center_map(config.search.center);
        for place in store.all() {
            map.create_marker(place);
            map.set_animation(place, Some(MarkerAnimation::Drop));
        }

        Ok(Self {
            store,
            fetcher: DetailsFetcher::new(provider),
            selection: SelectionController::new(),
            map,
        })
    }

    /// The place store, read-only.
    pub fn store(&self) -> &PlaceStore {
        &self.store
    }

    /// The currently active place id, if any.
    pub fn active(&self) -> Option<&PlaceId> {
        self.selection.active()
    }

    /// Register an observer for selection changes.
    pub fn on_selection_change(
        &mut self,
        observer: impl Fn(&SelectionChange) + Send + Sync + 'static,
    ) {
        self.selection.on_change(observer);
    }

    /// Apply a filter query and reconcile marker visibility: markers of
    /// places that dropped out of the displayed subset are hidden, those
    /// of places that (re-)entered are shown.
    pub fn filter(&mut self, query: &str) {
        self.store.apply_filter(query);
        for place in self.store.all() {
            if self.store.is_displayed(place.id()) {
                self.map.create_marker(place);
            } else {
                self.map.remove_marker(place);
            }
        }
    }

    /// Select a place and resolve its details for display.
    ///
    /// Selection is unconditional and independent of filter membership.
    /// The selected place's marker bounces; every other displayed
    /// marker's animation is cleared. Details are then resolved lazily
    /// through the fetcher, so the first selection of a place costs one
    /// provider call and later ones are free.
    ///
    /// # Errors
    ///
    /// - [`SelectError::NotFound`] if `id` is not in the store; the
    ///   current selection is left unchanged
    /// - [`SelectError::Fetch`] if the detail request fails; the
    ///   selection stands, details stay absent, and the user can retry by
    ///   selecting again
    pub async fn select(&mut self, id: &PlaceId) -> Result<FetchOutcome, SelectError> {
        self.store
            .find_by_id(id)
            .map_err(|_| SelectError::NotFound(id.clone()))?;

        self.selection.select(id.clone());

        for place in self.store.displayed() {
            if place.id() == id {
                self.map.set_animation(place, Some(MarkerAnimation::Bounce));
            } else {
                self.map.set_animation(place, None);
            }
        }

        Ok(self.fetcher.get(&mut self.store, id).await?)
    }
}
