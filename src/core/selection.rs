//! core::selection
//!
//! Active-place tracking with change notifications.
//!
//! # State machine
//!
//! Two logical states: `NoSelection` and `Selected(place)`. The first
//! `select` moves to `Selected`; a later `select` with a different place
//! replaces it. There is no transition back to `NoSelection`; selection
//! persists for the lifetime of the controller.
//!
//! Selection is independent of display-filter membership: filtering a
//! place out of the displayed subset leaves the active selection as-is.
//!
//! # Notifications
//!
//! Observers fire exactly when the active place's identity changes.
//! Re-selecting the current place is an idempotent no-op and emits
//! nothing.

use super::types::PlaceId;

/// A selection transition delivered to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// The previously active place, if any.
    pub previous: Option<PlaceId>,
    /// The newly active place.
    pub current: PlaceId,
}

/// Observer callback invoked on every selection change.
pub type SelectionObserver = Box<dyn Fn(&SelectionChange) + Send + Sync>;

/// Tracks which single place is active and notifies observers on change.
///
/// # Example
///
/// ```
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
/// use venuemap::core::selection::SelectionController;
/// use venuemap::core::types::PlaceId;
///
/// let mut selection = SelectionController::new();
/// let fired = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&fired);
/// selection.on_change(move |_| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// let id = PlaceId::new("a").unwrap();
/// selection.select(id.clone());
/// selection.select(id); // idempotent, no second notification
///
/// assert_eq!(fired.load(Ordering::SeqCst), 1);
/// ```
#[derive(Default)]
pub struct SelectionController {
    active: Option<PlaceId>,
    observers: Vec<SelectionObserver>,
}

// Custom Debug because observers are opaque closures.
impl std::fmt::Debug for SelectionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectionController")
            .field("active", &self.active)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl SelectionController {
    /// Create a controller with no selection and no observers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently active place, or `None` before the first selection.
    pub fn active(&self) -> Option<&PlaceId> {
        self.active.as_ref()
    }

    /// Register an observer for selection changes.
    ///
    /// Observers are invoked in registration order, synchronously, on the
    /// caller's thread.
    pub fn on_change(&mut self, observer: impl Fn(&SelectionChange) + Send + Sync + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Set the active place.
    ///
    /// Unconditional: selecting a place that is filtered out of the
    /// displayed subset still activates it. Selecting the already-active
    /// place is a no-op and emits no notification.
    ///
    /// Returns `true` if the active place's identity changed.
    pub fn select(&mut self, place: PlaceId) -> bool {
        if self.active.as_ref() == Some(&place) {
            return false;
        }

        let change = SelectionChange {
            previous: self.active.replace(place.clone()),
            current: place,
        };
        for observer in &self.observers {
            observer(&change);
        }
        true
    }
}
