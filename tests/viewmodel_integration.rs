//! End-to-end scenario tests for the view-model.
//!
//! These tests drive a bootstrapped view-model through the full
//! filter/select/fetch flow against the mock provider, cache, and map.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use venuemap::cache::MemoryCacheStore;
use venuemap::core::config::AppConfig;
use venuemap::core::types::{PlaceDetails, PlaceId, RawLocation, RawPlace};
use venuemap::fetcher::FetchOutcome;
use venuemap::map::MockMap;
use venuemap::provider::mock::MockProvider;
use venuemap::viewmodel::MapViewModel;

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

fn config() -> AppConfig {
    let mut config = AppConfig::default();
    config.provider.client_id = "id".into();
    config.provider.client_secret = "secret".into();
    config
}

fn place_id(s: &str) -> PlaceId {
    PlaceId::new(s).unwrap()
}

/// Two venues, the full user journey: filter narrows to the jazz room,
/// double-selecting the rock cave notifies once, and an empty detail
/// payload resolves to "no data" without being cached.
#[tokio::test]
async fn two_venue_scenario() {
    let provider = MockProvider::new()
        .with_venues(vec![raw_place("A", "Jazz Room"), raw_place("B", "Rock Cave")])
        .with_empty_details("A")
        .with_empty_details("B");
    let map = MockMap::new();

    let mut vm = MapViewModel::bootstrap(
        config(),
        Arc::new(provider.clone()),
        Arc::new(MemoryCacheStore::new()),
        Arc::new(map.clone()),
    )
    .await
    .unwrap();

    let notifications = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&notifications);
    vm.on_selection_change(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    // filter(all, "jazz") -> ["A"]
    vm.filter("jazz");
    let displayed: Vec<&str> = vm.store().displayed().map(|p| p.id().as_str()).collect();
    assert_eq!(displayed, vec!["A"]);
    assert!(map.is_shown(&place_id("A")));
    assert!(!map.is_shown(&place_id("B")));

    // select(placeB) twice -> exactly one notification total
    vm.select(&place_id("B")).await.unwrap();
    vm.select(&place_id("B")).await.unwrap();
    assert_eq!(notifications.load(Ordering::SeqCst), 1);
    assert_eq!(vm.active(), Some(&place_id("B")));

    // get(placeA) against an empty payload -> NoData, and a subsequent
    // get still attempts a new fetch (no caching of the empty result)
    let outcome = vm.select(&place_id("A")).await.unwrap();
    assert_eq!(outcome, FetchOutcome::NoData);
    let outcome = vm.select(&place_id("A")).await.unwrap();
    assert_eq!(outcome, FetchOutcome::NoData);
    assert_eq!(provider.details_calls_for("A"), 2);
}

#[tokio::test]
async fn first_selection_fetches_later_selections_hit_the_store() {
    let details = PlaceDetails {
        description: Some("Live jazz nightly".into()),
        rating: Some(9.1),
        ..PlaceDetails::default()
    };
    let provider = MockProvider::new()
        .with_venues(vec![raw_place("A", "Jazz Room")])
        .with_details("A", details.clone());
    let cache = MemoryCacheStore::new();

    let mut vm = MapViewModel::bootstrap(
        config(),
        Arc::new(provider.clone()),
        Arc::new(cache.clone()),
        Arc::new(MockMap::new()),
    )
    .await
    .unwrap();

    let outcome = vm.select(&place_id("A")).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Details(details.clone()));
    assert_eq!(provider.details_calls_for("A"), 1);

    // Bootstrap persisted once, the successful fetch persisted again
    assert_eq!(cache.save_count(), 2);

    // Reselecting costs nothing
    let outcome = vm.select(&place_id("A")).await.unwrap();
    assert_eq!(outcome, FetchOutcome::Details(details));
    assert_eq!(provider.details_calls_for("A"), 1);
}

#[tokio::test]
async fn fetched_details_survive_a_restart() {
    let provider = MockProvider::new()
        .with_venues(vec![raw_place("A", "Jazz Room")])
        .with_details(
            "A",
            PlaceDetails {
                rating: Some(8.8),
                ..PlaceDetails::default()
            },
        );
    let cache = MemoryCacheStore::new();

    // First run: seed from the provider and fetch details
    {
        let mut vm = MapViewModel::bootstrap(
            config(),
            Arc::new(provider.clone()),
            Arc::new(cache.clone()),
            Arc::new(MockMap::new()),
        )
        .await
        .unwrap();
        vm.select(&place_id("A")).await.unwrap();
    }

    // Second run: rehydrates from the side channel; no search, and the
    // details come along, so selecting is free
    let mut vm = MapViewModel::bootstrap(
        config(),
        Arc::new(provider.clone()),
        Arc::new(cache),
        Arc::new(MockMap::new()),
    )
    .await
    .unwrap();

    let outcome = vm.select(&place_id("A")).await.unwrap();
    assert!(matches!(outcome, FetchOutcome::Details(d) if d.rating == Some(8.8)));
    assert_eq!(provider.search_calls(), 1);
    assert_eq!(provider.details_calls_for("A"), 1);
}

#[tokio::test]
async fn filter_then_reselect_keeps_marker_contract() {
    let provider = MockProvider::new()
        .with_venues(vec![
            raw_place("A", "Jazz Room"),
            raw_place("B", "Rock Cave"),
            raw_place("C", "Jazz Cellar"),
        ])
        .with_empty_details("C");
    let map = MockMap::new();

    let mut vm = MapViewModel::bootstrap(
        config(),
        Arc::new(provider),
        Arc::new(MemoryCacheStore::new()),
        Arc::new(map.clone()),
    )
    .await
    .unwrap();

    vm.filter("jazz");
    assert_eq!(map.shown_markers().len(), 2);

    vm.select(&place_id("C")).await.unwrap();

    // Widening the filter brings "B" back without touching the selection
    vm.filter("");
    assert_eq!(map.shown_markers().len(), 3);
    assert_eq!(vm.active(), Some(&place_id("C")));
}
