//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.

use crate::Location;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Earth's mean radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Calculates the great-circle distance between two locations in kilometers.
///
/// Non-finite input produces `NaN` rather than a panic; callers comparing
/// distances must order `NaN` explicitly.
///
/// # Example
/// ```
/// use waitroom_geo::{haversine_distance, Location};
///
/// let edmonton = Location::new(53.5461, -113.4938);
/// let red_deer = Location::new(52.2681, -113.8112);
///
/// let distance = haversine_distance(&edmonton, &red_deer);
/// assert!((distance - 143.0).abs() < 5.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Location, to: &Location) -> f64 {
    haversine_distance_with_radius(*from, *to, EARTH_RADIUS_KM)
}

/// Same as [`haversine_distance`] but takes the four components in degrees.
#[inline]
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    haversine_distance_with_radius(Location::new(lat1, lng1), Location::new(lat2, lng2), EARTH_RADIUS_KM)
}

/// Calculates the great-circle distance between two locations in meters.
#[inline]
pub fn haversine_distance_meters(from: &Location, to: &Location) -> f64 {
    haversine_distance_with_radius(*from, *to, EARTH_RADIUS_M)
}

#[inline]
fn haversine_distance_with_radius(from: Location, to: Location, radius: f64) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    radius * c
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EDMONTON: Location = Location { lat: 53.5461, lng: -113.4938 };
    const CALGARY: Location = Location { lat: 51.0447, lng: -114.0719 };
    const TORONTO: Location = Location { lat: 43.6532, lng: -79.3832 };

    #[test]
    fn test_edmonton_to_calgary() {
        let distance = haversine_distance(&EDMONTON, &CALGARY);
        // Expected: ~281 km
        assert!((distance - 281.0).abs() < 5.0, "Edmonton-Calgary: {}", distance);
    }

    #[test]
    fn test_edmonton_to_toronto() {
        let distance = haversine_distance(&EDMONTON, &TORONTO);
        // Expected: ~2,700 km
        assert!((distance - 2700.0).abs() < 30.0, "Edmonton-Toronto: {}", distance);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(haversine_distance(&EDMONTON, &EDMONTON), 0.0);
    }

    #[test]
    fn test_symmetry() {
        let d1 = haversine_distance(&EDMONTON, &CALGARY);
        let d2 = haversine_distance(&CALGARY, &EDMONTON);
        assert!((d1 - d2).abs() < 1e-9);
    }

    #[test]
    fn test_degree_form_matches_location_form() {
        let d1 = haversine_km(EDMONTON.lat, EDMONTON.lng, CALGARY.lat, CALGARY.lng);
        let d2 = haversine_distance(&EDMONTON, &CALGARY);
        assert_eq!(d1, d2);
    }

    #[test]
    fn test_meters_conversion() {
        let km = haversine_distance(&EDMONTON, &CALGARY);
        let meters = haversine_distance_meters(&EDMONTON, &CALGARY);
        assert!((meters - km * 1000.0).abs() < 1.0);
    }

    #[test]
    fn test_non_finite_input_propagates_nan() {
        assert!(haversine_km(f64::NAN, 0.0, 0.0, 0.0).is_nan());
        assert!(haversine_km(0.0, f64::INFINITY, 0.0, 0.0).is_nan());
    }

    proptest! {
        #[test]
        fn prop_identity_is_zero(lat in -90.0f64..=90.0, lng in -180.0f64..=180.0) {
            let p = Location::new(lat, lng);
            prop_assert_eq!(haversine_distance(&p, &p), 0.0);
        }

        #[test]
        fn prop_symmetric(
            lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
        ) {
            let a = Location::new(lat1, lng1);
            let b = Location::new(lat2, lng2);
            prop_assert!((haversine_distance(&a, &b) - haversine_distance(&b, &a)).abs() < 1e-6);
        }

        #[test]
        fn prop_bounded_by_half_circumference(
            lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
        ) {
            let d = haversine_km(lat1, lng1, lat2, lng2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= std::f64::consts::PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
