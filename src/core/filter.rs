//! core::filter
//!
//! Case-insensitive, order-preserving name filtering.
//!
//! # Policy
//!
//! The query is data, not a pattern language: it is matched as a literal
//! substring of the place name, case-insensitively. There is no pattern
//! compilation step, so no query can ever fail to parse. The empty query
//! matches everything.
//!
//! # Stability
//!
//! Filtering preserves the relative order of the input; it never re-sorts.

use super::types::Place;

/// Check whether a place name matches a filter query.
///
/// Matching is a case-insensitive literal substring test. The empty query
/// matches every name.
///
/// # Example
///
/// ```
/// use venuemap::core::filter::matches;
///
/// assert!(matches("The Jazz Room", "jazz"));
/// assert!(matches("The Jazz Room", ""));
/// assert!(!matches("Rock Cave", "jazz"));
///
/// // Queries are literal, never patterns
/// assert!(!matches("The Jazz Room", "j.zz"));
/// assert!(matches("Room (annex)", "(annex)"));
/// ```
pub fn matches(name: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    name.to_lowercase().contains(&query.to_lowercase())
}

/// Filter places by name, preserving relative order.
///
/// Returns references into `places` for every element whose name matches
/// `query` (see [`matches`]). The empty query returns everything.
pub fn filter<'a>(places: &'a [Place], query: &str) -> Vec<&'a Place> {
    places.iter().filter(|p| matches(p.name(), query)).collect()
}

/// Filter places by name, returning indices into the input slice.
///
/// The store keeps its displayed subset as indices so the subset stays a
/// view of the master list rather than a copy.
pub(crate) fn filter_indices(places: &[Place], query: &str) -> Vec<usize> {
    places
        .iter()
        .enumerate()
        .filter(|(_, p)| matches(p.name(), query))
        .map(|(i, _)| i)
        .collect()
}
