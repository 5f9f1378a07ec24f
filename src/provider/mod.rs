//! provider
//!
//! Abstraction for the external places API.
//!
//! # Architecture
//!
//! The `PlaceProvider` trait defines the two requests the core makes of
//! the outside world: a bulk seed search and a per-venue detail lookup.
//! Provider failures never compromise the in-memory model; results are
//! written only to the store's lazily-populated detail fields.
//!
//! # Modules
//!
//! - `traits`: Core `PlaceProvider` trait and request/response types
//! - [`foursquare`]: Foursquare venues API implementation over REST
//! - [`mock`]: Mock implementation for deterministic testing

pub mod foursquare;
pub mod mock;
mod traits;

pub use foursquare::FoursquareProvider;
pub use traits::*;
