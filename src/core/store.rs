//! core::store
//!
//! The authoritative place list and its displayed subset.
//!
//! # Architecture
//!
//! The store owns every [`Place`] exclusively. The displayed subset is
//! kept as indices into the master list, so it is always a view in master
//! order, never an independent copy. The master list is append-only after
//! initialization; nothing in the core deletes a place.
//!
//! After every successful `set_details` the store serializes the entire
//! master list through its injected [`PlaceRepository`] so a later
//! process start can rehydrate without re-fetching. That persistence is
//! best-effort: a failure is logged and swallowed, and the in-memory
//! mutation stands.
//!
//! # Example
//!
//! ```ignore
//! let store = PlaceStore::initialize(records, repository)?;
//!
//! store.apply_filter("jazz");
//! for place in store.displayed() {
//!     println!("{}", place.name());
//! }
//! ```

use thiserror::Error;
use tracing::warn;

use crate::cache::PlaceRepository;

use super::filter;
use super::types::{Place, PlaceDetails, PlaceId, RawPlace, TypeError};

/// Errors from store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Initialization failed: the seed sequence was empty. Fatal to store
    /// construction; no partial store is produced.
    #[error("cannot initialize store from an empty place list")]
    EmptySeed,

    /// Initialization failed: a seed record was malformed. Fatal to store
    /// construction; no partial store is produced.
    #[error("malformed place record at index {index}: {source}")]
    MalformedRecord {
        /// Position of the offending record in the seed sequence.
        index: usize,
        /// The underlying validation failure.
        source: TypeError,
    },

    /// Initialization failed: two seed records share an id.
    #[error("duplicate place id in seed data: {0}")]
    DuplicateId(PlaceId),

    /// Lookup miss. Recoverable; the caller decides the fallback.
    #[error("place not found: {0}")]
    NotFound(PlaceId),

    /// `set_details` was called for a place whose details are already
    /// populated. Details transition from absent to present exactly once.
    #[error("details already populated for place: {0}")]
    AlreadyPopulated(PlaceId),
}

/// The authoritative list of place records and their lazily-populated
/// detail payloads.
///
/// # Invariants
///
/// - Every place's `id` is unique and never changes after initialization
/// - The master list is append-only (and in this crate, never appended
///   to after initialization)
/// - The displayed subset is a subset of the master list, in master order
/// - `details` transitions at most once from absent to present
#[derive(Debug)]
pub struct PlaceStore {
    /// Master list, in seed order.
    places: Vec<Place>,
    /// Indices into `places` currently displayed.
    displayed: Vec<usize>,
    /// Injected persistence capability.
    repository: PlaceRepository,
}

impl PlaceStore {
    /// Construct a store from raw seed records, in input order.
    ///
    /// Every record must carry `id`, `name`, and `location`; records may
    /// already carry details (rehydration from the side channel). The
    /// displayed subset starts as the full list.
    ///
    /// # Errors
    ///
    /// - [`StoreError::EmptySeed`] if `records` is empty
    /// - [`StoreError::MalformedRecord`] if a record fails validation
    /// - [`StoreError::DuplicateId`] if two records share an id
    pub fn initialize(
        records: Vec<RawPlace>,
        repository: PlaceRepository,
    ) -> Result<Self, StoreError> {
        if records.is_empty() {
            return Err(StoreError::EmptySeed);
        }

        let mut places = Vec::with_capacity(records.len());
        for (index, raw) in records.into_iter().enumerate() {
            let place =
                Place::from_raw(raw).map_err(|source| StoreError::MalformedRecord { index, source })?;
            if places.iter().any(|p: &Place| p.id() == place.id()) {
                return Err(StoreError::DuplicateId(place.id().clone()));
            }
            places.push(place);
        }

        let displayed = (0..places.len()).collect();
        Ok(Self {
            places,
            displayed,
            repository,
        })
    }

    /// The master list, read-only, in seed order.
    pub fn all(&self) -> &[Place] {
        &self.places
    }

    /// Number of places in the master list.
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether the master list is empty. Always false for an initialized
    /// store; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// The currently displayed subset, in master order.
    pub fn displayed(&self) -> impl Iterator<Item = &Place> {
        self.displayed.iter().map(|&i| &self.places[i])
    }

    /// Whether the place with `id` is in the displayed subset.
    pub fn is_displayed(&self, id: &PlaceId) -> bool {
        self.displayed().any(|p| p.id() == id)
    }

    /// Look up a place by id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::NotFound`] on a lookup miss.
    pub fn find_by_id(&self, id: &PlaceId) -> Result<&Place, StoreError> {
        self.places
            .iter()
            .find(|p| p.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))
    }

    /// Set the detail payload on the matching record, exactly once, then
    /// persist the master list (best-effort).
    ///
    /// The persistence attempt completes (success or swallowed failure)
    /// before this method returns, so re-entrant reads immediately after
    /// a completion observe the update.
    ///
    /// # Errors
    ///
    /// - [`StoreError::NotFound`] if no place has `id`
    /// - [`StoreError::AlreadyPopulated`] if details were already set; the
    ///   in-memory payload is left untouched
    pub fn set_details(&mut self, id: &PlaceId, details: PlaceDetails) -> Result<(), StoreError> {
        let place = self
            .places
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;

        if place.details().is_some() {
            return Err(StoreError::AlreadyPopulated(id.clone()));
        }
        place.put_details(details);

        self.persist_best_effort();
        Ok(())
    }

    /// Recompute the displayed subset from a filter query.
    ///
    /// Matching is the stable, case-insensitive literal substring rule of
    /// [`filter::matches`]; the empty query restores the full list. The
    /// caller is expected to hide the visual marker of every place that
    /// dropped out of the subset and show every place that re-entered.
    pub fn apply_filter(&mut self, query: &str) {
        self.displayed = filter::filter_indices(&self.places, query);
    }

    /// Serialize the master list through the repository, swallowing any
    /// failure. Persistence only affects the rehydration cache, never the
    /// correctness of the in-memory model.
    pub(crate) fn persist_best_effort(&self) {
        if let Err(err) = self.repository.save(&self.places) {
            warn!(key = self.repository.key(), "failed to persist place list: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::memory::{CacheOperation, FailOn};
    use crate::cache::{CacheError, MemoryCacheStore};
    use crate::core::types::RawLocation;
    use std::sync::Arc;

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

    fn store_with(records: Vec<RawPlace>) -> (Arc<MemoryCacheStore>, PlaceStore) {
        let cache = Arc::new(MemoryCacheStore::new());
        let repository =
            PlaceRepository::new(Arc::clone(&cache) as Arc<dyn crate::cache::CacheStore>, "venues-map");
        let store = PlaceStore::initialize(records, repository).unwrap();
        (cache, store)
    }

    fn id(s: &str) -> PlaceId {
        PlaceId::new(s).unwrap()
    }

    #[test]
    fn initialize_preserves_length_and_order() {
        let (_cache, store) = store_with(vec![
            raw_place("a", "Jazz Room"),
            raw_place("b", "Rock Cave"),
            raw_place("c", "Blues Bar"),
        ]);

        assert_eq!(store.len(), 3);
        let ids: Vec<&str> = store.all().iter().map(|p| p.id().as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert!(store.all().iter().all(|p| p.details().is_none()));
    }

    #[test]
    fn initialize_rejects_empty_seed() {
        let repository = PlaceRepository::new(Arc::new(MemoryCacheStore::new()), "venues-map");
        assert!(matches!(
            PlaceStore::initialize(vec![], repository),
            Err(StoreError::EmptySeed)
        ));
    }

    #[test]
    fn initialize_rejects_malformed_record() {
        let repository = PlaceRepository::new(Arc::new(MemoryCacheStore::new()), "venues-map");
        let mut bad = raw_place("b", "Rock Cave");
        bad.name = None;

        let err = PlaceStore::initialize(vec![raw_place("a", "Jazz Room"), bad], repository)
            .unwrap_err();
        match err {
            StoreError::MalformedRecord { index, .. } => assert_eq!(index, 1),
            other => panic!("expected MalformedRecord, got {other:?}"),
        }
    }

    #[test]
    fn initialize_rejects_duplicate_ids() {
        let repository = PlaceRepository::new(Arc::new(MemoryCacheStore::new()), "venues-map");
        let err = PlaceStore::initialize(
            vec![raw_place("a", "Jazz Room"), raw_place("a", "Jazz Annex")],
            repository,
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::DuplicateId(dup) if dup == id("a")));
    }

    #[test]
    fn displayed_starts_as_full_list() {
        let (_cache, store) = store_with(vec![raw_place("a", "Jazz Room"), raw_place("b", "Rock Cave")]);
        let displayed: Vec<&str> = store.displayed().map(|p| p.id().as_str()).collect();
        assert_eq!(displayed, vec!["a", "b"]);
    }

    #[test]
    fn find_by_id_hits_and_misses() {
        let (_cache, store) = store_with(vec![raw_place("a", "Jazz Room")]);

        assert_eq!(store.find_by_id(&id("a")).unwrap().name(), "Jazz Room");
        assert!(matches!(
            store.find_by_id(&id("zzz")),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn set_details_populates_and_persists() {
        let (cache, mut store) = store_with(vec![raw_place("a", "Jazz Room")]);

        let details = PlaceDetails {
            description: Some("A jazz venue".into()),
            ..PlaceDetails::default()
        };
        store.set_details(&id("a"), details).unwrap();

        assert!(store.find_by_id(&id("a")).unwrap().details().is_some());

        // Whole master list serialized to the side channel
        let blob = cache.entry("venues-map").expect("persisted");
        let json: serde_json::Value = serde_json::from_str(&blob).unwrap();
        assert_eq!(json[0]["details"]["description"], "A jazz venue");
    }

    #[test]
    fn set_details_twice_fails_and_keeps_first_payload() {
        let (_cache, mut store) = store_with(vec![raw_place("a", "Jazz Room")]);

        let first = PlaceDetails {
            description: Some("first".into()),
            ..PlaceDetails::default()
        };
        let second = PlaceDetails {
            description: Some("second".into()),
            ..PlaceDetails::default()
        };

        store.set_details(&id("a"), first).unwrap();
        assert!(matches!(
            store.set_details(&id("a"), second),
            Err(StoreError::AlreadyPopulated(_))
        ));

        assert_eq!(
            store
                .find_by_id(&id("a"))
                .unwrap()
                .details()
                .unwrap()
                .description
                .as_deref(),
            Some("first")
        );
    }

    #[test]
    fn set_details_unknown_id_is_not_found() {
        let (cache, mut store) = store_with(vec![raw_place("a", "Jazz Room")]);

        assert!(matches!(
            store.set_details(&id("zzz"), PlaceDetails::default()),
            Err(StoreError::NotFound(_))
        ));
        // Nothing persisted for a failed mutation
        assert_eq!(cache.save_count(), 0);
    }

    #[test]
    fn persistence_failure_does_not_fail_set_details() {
        let cache = Arc::new(
            MemoryCacheStore::new().fail_on(FailOn::Save(CacheError::WriteError("quota".into()))),
        );
        let repository =
            PlaceRepository::new(Arc::clone(&cache) as Arc<dyn crate::cache::CacheStore>, "venues-map");
        let mut store = PlaceStore::initialize(vec![raw_place("a", "Jazz Room")], repository).unwrap();

        // The save fails underneath, but set_details succeeds regardless
        store.set_details(&id("a"), PlaceDetails::default()).unwrap();
        assert!(store.find_by_id(&id("a")).unwrap().details().is_some());

        // And the attempt did happen before set_details returned
        assert!(cache
            .operations()
            .contains(&CacheOperation::Save { key: "venues-map".into() }));
    }

    #[test]
    fn apply_filter_narrows_and_restores() {
        let (_cache, mut store) = store_with(vec![
            raw_place("a", "Jazz Room"),
            raw_place("b", "Rock Cave"),
            raw_place("c", "Jazz Cellar"),
        ]);

        store.apply_filter("jazz");
        let displayed: Vec<&str> = store.displayed().map(|p| p.id().as_str()).collect();
        assert_eq!(displayed, vec!["a", "c"]);
        assert!(store.is_displayed(&id("a")));
        assert!(!store.is_displayed(&id("b")));

        // Empty query implies the full set
        store.apply_filter("");
        assert_eq!(store.displayed().count(), 3);
    }

    #[test]
    fn filtering_does_not_touch_master_list() {
        let (_cache, mut store) = store_with(vec![
            raw_place("a", "Jazz Room"),
            raw_place("b", "Rock Cave"),
        ]);

        store.apply_filter("jazz");
        assert_eq!(store.len(), 2);
        assert_eq!(store.all().len(), 2);
    }

    #[test]
    fn rehydrated_records_may_carry_details() {
        let mut raw = raw_place("a", "Jazz Room");
        raw.details = Some(PlaceDetails {
            rating: Some(9.0),
            ..PlaceDetails::default()
        });
        let (_cache, mut store) = store_with(vec![raw]);

        // Already populated from the cache: the once-only rule applies
        assert!(matches!(
            store.set_details(&id("a"), PlaceDetails::default()),
            Err(StoreError::AlreadyPopulated(_))
        ));
    }
}
