//! map
//!
//! Single interface for all map-widget operations.
//!
//! # Architecture
//!
//! The core never talks to a rendering engine directly. Everything it
//! needs from the map goes through the [`MapWidget`] trait: marker
//! lifecycle, marker animation, and recentering. The host implements the
//! trait over its actual widget and forwards marker clicks back into the
//! view-model as selections.
//!
//! Widget calls are fire-and-forget: presentation failures are the
//! host's concern and never propagate into the core.
//!
//! # Modules
//!
//! - [`mock`]: Recording implementation for deterministic testing

pub mod mock;

pub use mock::MockMap;

use crate::core::types::{Coordinates, Place};

/// Marker animation states the core requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerAnimation {
    /// One-shot drop-in, used when a marker first appears.
    Drop,
    /// Continuous bounce, used to highlight the selected place.
    Bounce,
}

impl std::fmt::Display for MarkerAnimation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerAnimation::Drop => write!(f, "drop"),
            MarkerAnimation::Bounce => write!(f, "bounce"),
        }
    }
}

/// The MapWidget trait for driving the host's map.
///
/// # Idempotency
///
/// The view-model drives marker visibility from filter membership and
/// calls `create_marker`/`remove_marker` for every place on each pass.
/// Implementations must tolerate redundant calls: creating a marker that
/// is already shown and removing one that is already hidden are no-ops.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`.
pub trait MapWidget: Send + Sync {
    /// Show a marker for the place.
    fn create_marker(&self, place: &Place);

    /// Hide the place's marker.
    fn remove_marker(&self, place: &Place);

    /// Set or clear the animation on the place's marker.
    fn set_animation(&self, place: &Place, animation: Option<MarkerAnimation>);

    /// Recenter the map.
    fn center_map(&self, center: Coordinates);
}
