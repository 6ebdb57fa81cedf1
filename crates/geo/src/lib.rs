//! Geospatial utilities for ranking emergency facilities.
//!
//! This crate provides:
//! - Haversine great-circle distance
//! - Coordinate extraction from map-link strings published by the wait-time feed
//!
//! # Example
//!
//! ```
//! use waitroom_geo::{haversine_distance, Location};
//!
//! let edmonton = Location::new(53.5461, -113.4938);
//! let calgary = Location::new(51.0447, -114.0719);
//!
//! let distance_km = haversine_distance(&edmonton, &calgary);
//! assert!((distance_km - 281.0).abs() < 5.0);
//! ```

mod error;
mod haversine;
mod map_link;

pub use error::{GeoError, GeoErrorCode, Result};
pub use haversine::{
    EARTH_RADIUS_KM, EARTH_RADIUS_M, haversine_distance, haversine_distance_meters, haversine_km,
};
pub use map_link::{extract_coordinates, parse_map_link};

/// A geographic point with latitude and longitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Location {
    /// Latitude in degrees (-90 to 90)
    pub lat: f64,
    /// Longitude in degrees (-180 to 180)
    pub lng: f64,
}

impl Location {
    /// `{0, 0}`, used when a facility's coordinates cannot be recovered.
    pub const ORIGIN: Location = Location { lat: 0.0, lng: 0.0 };

    /// Creates a new location.
    #[inline]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if both components are finite and within range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    #[inline]
    pub(crate) fn to_radians(self) -> (f64, f64) {
        (self.lat.to_radians(), self.lng.to_radians())
    }
}

impl From<(f64, f64)> for Location {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.5},{:.5}", self.lat, self.lng)
    }
}
