//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`PlaceId`] - Validated external venue identifier
//! - [`Coordinates`] - Range-checked geographic position
//! - [`Place`] - A venue record owned by the store
//! - [`RawPlace`] - An untrusted seed record from the provider or the cache
//! - [`PlaceDetails`] - Extended venue information fetched on demand
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs. Seed data
//! arrives as [`RawPlace`] and is promoted to [`Place`] exactly once, at
//! store initialization.
//!
//! # Examples
//!
//! ```
//! use venuemap::core::types::{Coordinates, PlaceId};
//!
//! // Valid constructions
//! let id = PlaceId::new("4af5a3a5f964a520e4f921e3").unwrap();
//! let pos = Coordinates::new(40.7413549, -73.9980244).unwrap();
//!
//! // Invalid constructions fail at creation time
//! assert!(PlaceId::new("").is_err());
//! assert!(Coordinates::new(91.0, 0.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq)]
pub enum TypeError {
    #[error("invalid place id: {0}")]
    InvalidPlaceId(String),

    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// A validated external venue identifier.
///
/// Ids are assigned by the places provider and treated as opaque. They
/// must be non-empty and free of control characters; beyond that, no
/// structure is assumed.
///
/// # Example
///
/// ```
/// use venuemap::core::types::PlaceId;
///
/// let id = PlaceId::new("4af5a3a5f964a520e4f921e3").unwrap();
/// assert_eq!(id.as_str(), "4af5a3a5f964a520e4f921e3");
///
/// assert!(PlaceId::new("").is_err());
/// assert!(PlaceId::new("bad\nid").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlaceId(String);

impl PlaceId {
    /// Create a new validated place id.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidPlaceId` if the id is empty or contains
    /// control characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into();
        if id.is_empty() {
            return Err(TypeError::InvalidPlaceId("id cannot be empty".into()));
        }
        if id.chars().any(|c| c.is_control()) {
            return Err(TypeError::InvalidPlaceId(
                "id cannot contain control characters".into(),
            ));
        }
        Ok(Self(id))
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for PlaceId {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlaceId> for String {
    fn from(id: PlaceId) -> Self {
        id.0
    }
}

impl std::fmt::Display for PlaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A range-checked geographic position.
///
/// Latitude must be within [-90, 90], longitude within [-180, 180], and
/// both must be finite.
///
/// # Example
///
/// ```
/// use venuemap::core::types::Coordinates;
///
/// let pos = Coordinates::new(40.7413549, -73.9980244).unwrap();
/// assert_eq!(pos.lat(), 40.7413549);
/// assert_eq!(pos.lng(), -73.9980244);
///
/// assert!(Coordinates::new(f64::NAN, 0.0).is_err());
/// assert!(Coordinates::new(0.0, 181.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CoordinatesWire")]
pub struct Coordinates {
    lat: f64,
    lng: f64,
}

/// Wire shape for [`Coordinates`] deserialization.
#[derive(Debug, Clone, Copy, Deserialize)]
struct CoordinatesWire {
    lat: f64,
    lng: f64,
}

impl Coordinates {
    /// Create a new validated coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidCoordinates` if either component is
    /// non-finite or outside its valid range.
    pub fn new(lat: f64, lng: f64) -> Result<Self, TypeError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(TypeError::InvalidCoordinates(
                "coordinates must be finite".into(),
            ));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(TypeError::InvalidCoordinates(format!(
                "latitude {} outside [-90, 90]",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(TypeError::InvalidCoordinates(format!(
                "longitude {} outside [-180, 180]",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees.
    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl TryFrom<CoordinatesWire> for Coordinates {
    type Error = TypeError;

    fn try_from(wire: CoordinatesWire) -> Result<Self, Self::Error> {
        Self::new(wire.lat, wire.lng)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// A venue record owned by the store.
///
/// A `Place` is created once, at store initialization, from a validated
/// [`RawPlace`]. Its id never changes; its `details` field transitions at
/// most once from absent to present (enforced by the store).
///
/// Serializes to the fixed side-channel format:
/// `{id, name, location: {lat, lng}, contact, details}`, with `details`
/// null until populated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    id: PlaceId,
    name: String,
    location: Coordinates,
    #[serde(default)]
    contact: serde_json::Value,
    #[serde(default)]
    details: Option<PlaceDetails>,
}

impl Place {
    /// Promote an untrusted seed record to a `Place`.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::MissingField` if `id`, `name`, or `location`
    /// is absent, and the underlying validation error if a present field
    /// is invalid.
    pub fn from_raw(raw: RawPlace) -> Result<Self, TypeError> {
        let id = PlaceId::new(raw.id.ok_or(TypeError::MissingField("id"))?)?;
        let name = raw.name.ok_or(TypeError::MissingField("name"))?;
        let location = raw.location.ok_or(TypeError::MissingField("location"))?;
        let location = Coordinates::new(
            location.lat.ok_or(TypeError::MissingField("location.lat"))?,
            location.lng.ok_or(TypeError::MissingField("location.lng"))?,
        )?;

        Ok(Self {
            id,
            name,
            location,
            contact: raw.contact,
            details: raw.details,
        })
    }

    /// The venue's external identifier.
    pub fn id(&self) -> &PlaceId {
        &self.id
    }

    /// The venue's display name, used for filtering.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The venue's geographic position.
    pub fn location(&self) -> Coordinates {
        self.location
    }

    /// Free-form contact blob, opaque to the core.
    pub fn contact(&self) -> &serde_json::Value {
        &self.contact
    }

    /// The detail payload, if it has been fetched.
    pub fn details(&self) -> Option<&PlaceDetails> {
        self.details.as_ref()
    }

    /// Set the detail payload. The once-only invariant is the store's to
    /// enforce; this is the raw field write.
    pub(crate) fn put_details(&mut self, details: PlaceDetails) {
        self.details = Some(details);
    }
}

/// An untrusted seed record, as received from the places provider or read
/// back from the side channel.
///
/// Every field is optional at this stage; [`Place::from_raw`] decides
/// what is required. Unknown wire fields are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPlace {
    pub id: Option<String>,
    pub name: Option<String>,
    pub location: Option<RawLocation>,
    pub contact: serde_json::Value,
    pub details: Option<PlaceDetails>,
}

/// Location sub-record of a [`RawPlace`].
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawLocation {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Extended venue information from the details provider.
///
/// Field names follow the provider's camelCase wire format, which is also
/// the side-channel format. Everything is optional; the host renders
/// whatever is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub description: Option<String>,
    pub best_photo: Option<VenuePhoto>,
    pub verified: bool,
    pub location: DetailsLocation,
    pub contact: DetailsContact,
    pub rating: Option<f64>,
    pub rating_color: Option<String>,
    pub rating_signals: Option<u64>,
}

impl PlaceDetails {
    /// The address to display: the joined formatted address when the
    /// provider supplies one, otherwise the plain address line.
    pub fn display_address(&self) -> Option<String> {
        if !self.location.formatted_address.is_empty() {
            Some(self.location.formatted_address.join(", "))
        } else {
            self.location.address.clone()
        }
    }
}

/// A provider photo reference. The full URL is `prefix + size + suffix`,
/// where size is a string like `"500x300"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenuePhoto {
    pub prefix: String,
    pub suffix: String,
}

impl VenuePhoto {
    /// Build the photo URL for the given size (e.g. `"500x300"`).
    pub fn url(&self, size: &str) -> String {
        format!("{}{}{}", self.prefix, size, self.suffix)
    }
}

/// Location sub-record of [`PlaceDetails`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailsLocation {
    pub formatted_address: Vec<String>,
    pub address: Option<String>,
}

/// Contact sub-record of [`PlaceDetails`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DetailsContact {
    pub formatted_phone: Option<String>,
}
