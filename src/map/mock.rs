//! map::mock
//!
//! Recording map widget for deterministic testing.
//!
//! # Design
//!
//! `MockMap` tracks which markers are currently shown, remembers each
//! marker's last animation state, and records every call so tests can
//! assert on the exact widget traffic the view-model produces.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use super::{MapWidget, MarkerAnimation};
use crate::core::types::{Coordinates, Place, PlaceId};

/// Mock map widget for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share
/// state.
#[derive(Debug, Clone, Default)]
pub struct MockMap {
    inner: Arc<Mutex<MockMapInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockMapInner {
    /// Markers currently shown.
    shown: HashSet<PlaceId>,
    /// Last animation set per marker.
    animations: HashMap<PlaceId, Option<MarkerAnimation>>,
    /// Recorded operations for verification.
    operations: Vec<MapOperation>,
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq)]
pub enum MapOperation {
    CreateMarker {
        id: PlaceId,
    },
    RemoveMarker {
        id: PlaceId,
    },
    SetAnimation {
        id: PlaceId,
        animation: Option<MarkerAnimation>,
    },
    CenterMap {
        center: Coordinates,
    },
}

impl MockMap {
    /// Create a new mock map with no markers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the place's marker is currently shown.
    pub fn is_shown(&self, id: &PlaceId) -> bool {
        let inner = self.inner.lock().unwrap();
        inner.shown.contains(id)
    }

    /// Ids of all currently shown markers.
    pub fn shown_markers(&self) -> Vec<PlaceId> {
        let inner = self.inner.lock().unwrap();
        inner.shown.iter().cloned().collect()
    }

    /// The last animation set for the place's marker, if any was set.
    pub fn animation_of(&self, id: &PlaceId) -> Option<Option<MarkerAnimation>> {
        let inner = self.inner.lock().unwrap();
        inner.animations.get(id).copied()
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<MapOperation> {
        let inner = self.inner.lock().unwrap();
        inner.operations.clone()
    }

    /// Clear recorded operations (shown markers are kept).
    pub fn clear_operations(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.clear();
    }
}

impl MapWidget for MockMap {
    fn create_marker(&self, place: &Place) {
        let mut inner = self.inner.lock().unwrap();
        inner.shown.insert(place.id().clone());
        inner.operations.push(MapOperation::CreateMarker {
            id: place.id().clone(),
        });
    }

    fn remove_marker(&self, place: &Place) {
        let mut inner = self.inner.lock().unwrap();
        inner.shown.remove(place.id());
        inner.operations.push(MapOperation::RemoveMarker {
            id: place.id().clone(),
        });
    }

    fn set_animation(&self, place: &Place, animation: Option<MarkerAnimation>) {
        let mut inner = self.inner.lock().unwrap();
        inner.animations.insert(place.id().clone(), animation);
        inner.operations.push(MapOperation::SetAnimation {
            id: place.id().clone(),
            animation,
        });
    }

    fn center_map(&self, center: Coordinates) {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MapOperation::CenterMap { center });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Place, RawLocation, RawPlace};

    fn place(id: &str, name: &str) -> Place {
        Place::from_raw(RawPlace {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            location: Some(RawLocation {
                lat: Some(40.74),
                lng: Some(-73.99),
            }),
            ..RawPlace::default()
        })
        .unwrap()
    }

    #[test]
    fn create_and_remove_track_shown_set() {
        let map = MockMap::new();
        let a = place("a", "Jazz Room");

        map.create_marker(&a);
        assert!(map.is_shown(a.id()));

        map.remove_marker(&a);
        assert!(!map.is_shown(a.id()));
    }

    #[test]
    fn redundant_calls_are_tolerated() {
        let map = MockMap::new();
        let a = place("a", "Jazz Room");

        map.create_marker(&a);
        map.create_marker(&a);
        assert_eq!(map.shown_markers().len(), 1);

        map.remove_marker(&a);
        map.remove_marker(&a);
        assert!(map.shown_markers().is_empty());
    }

    #[test]
    fn animations_are_remembered() {
        let map = MockMap::new();
        let a = place("a", "Jazz Room");

        assert_eq!(map.animation_of(a.id()), None);

        map.set_animation(&a, Some(MarkerAnimation::Bounce));
        assert_eq!(map.animation_of(a.id()), Some(Some(MarkerAnimation::Bounce)));

        map.set_animation(&a, None);
        assert_eq!(map.animation_of(a.id()), Some(None));
    }

    #[test]
    fn operations_are_recorded_in_order() {
        let map = MockMap::new();
        let a = place("a", "Jazz Room");

        map.create_marker(&a);
        map.center_map(a.location());

        let ops = map.operations();
        assert_eq!(ops.len(), 2);
        assert!(matches!(ops[0], MapOperation::CreateMarker { .. }));
        assert!(matches!(ops[1], MapOperation::CenterMap { .. }));
    }
}
