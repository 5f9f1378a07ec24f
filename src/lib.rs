//! Venuemap - core view-model for an interactive venue map
//!
//! Venuemap holds a fixed list of venues, filters it incrementally by name,
//! tracks a single selected venue, and fetches venue details lazily from an
//! external places API, caching results in a persistent key-value side
//! channel so a later process start can rehydrate without re-fetching.
//!
//! # Architecture
//!
//! The codebase follows a strict layered architecture:
//!
//! - [`viewmodel`] - Explicit context object wiring the core to the seams
//! - [`core`] - Domain types, store, filter, selection, and configuration
//! - [`fetcher`] - Lazy, cache-first detail fetching
//! - [`provider`] - Abstraction for the external places API (Foursquare v1)
//! - [`cache`] - Persistent key-value side channel and typed repository
//! - [`map`] - Single interface for all map-widget operations
//!
//! Map rendering, HTML templating, and input handling belong to the host;
//! the host forwards marker clicks and search-box input to the view-model
//! and renders whatever the view-model resolves.
//!
//! # Correctness Invariants
//!
//! Venuemap maintains the following invariants:
//!
//! 1. The master place list is append-only; ids never change after load
//! 2. A place's details transition at most once from absent to present
//! 3. The displayed subset is always a view of the master list, in order
//! 4. Persistence is best-effort and never fails an in-memory mutation

pub mod cache;
pub mod core;
pub mod fetcher;
pub mod map;
pub mod provider;
pub mod viewmodel;
