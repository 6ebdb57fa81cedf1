//! Coordinate extraction from feed map links.
//!
//! The wait-time feed publishes a directions link per facility rather than
//! structured coordinates. Links seen in practice carry the destination as a
//! `lat,lng` pair in a query parameter, an `@lat,lng,zoom` path segment or a
//! `/lat/lng` path pair, sometimes percent-encoded.
//!
//! Grammar: the first two adjacent signed decimal numbers (both with a
//! fractional part) separated by `,` or `/` and optional whitespace, where the
//! first is a valid latitude and the second a valid longitude.

use crate::{GeoError, Location, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static DECIMAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"-?\d+\.\d+").unwrap());

/// Parse a map link into a location.
///
/// # Errors
/// * [`GeoError::InvalidMapLink`] when the link holds no `lat,lng` pair
/// * [`GeoError::InvalidCoordinate`] when every candidate pair is out of range
///
/// # Example
/// ```
/// use waitroom_geo::parse_map_link;
///
/// let link = "https://www.google.com/maps/dir/?api=1&destination=53.5206,-113.5236";
/// let loc = parse_map_link(link).unwrap();
/// assert!((loc.lat - 53.5206).abs() < 1e-9);
/// assert!((loc.lng + 113.5236).abs() < 1e-9);
/// ```
pub fn parse_map_link(link: &str) -> Result<Location> {
    let decoded = percent_decode_separators(link);
    let numbers: Vec<_> = DECIMAL.find_iter(&decoded).collect();

    let mut saw_pair = false;
    for pair in numbers.windows(2) {
        let (first, second) = (pair[0], pair[1]);
        let separator = decoded[first.end()..second.start()].trim();
        if separator != "," && separator != "/" {
            continue;
        }

        let (Ok(lat), Ok(lng)) = (first.as_str().parse::<f64>(), second.as_str().parse::<f64>()) else {
            continue;
        };
        saw_pair = true;

        let location = Location::new(lat, lng);
        if location.is_valid() {
            return Ok(location);
        }
    }

    if saw_pair {
        Err(GeoError::InvalidCoordinate(format!("no in-range lat,lng pair in: {link}")))
    } else {
        Err(GeoError::InvalidMapLink(link.to_string()))
    }
}

/// Extract a location from a map link, falling back to [`Location::ORIGIN`].
///
/// One unusable link must not abort processing of the rest of a feed, so
/// this never fails. A facility with the fallback location ranks as far away
/// from any real user position.
pub fn extract_coordinates(link: &str) -> Location {
    parse_map_link(link).unwrap_or(Location::ORIGIN)
}

fn percent_decode_separators(link: &str) -> String {
    link.replace("%2C", ",")
        .replace("%2c", ",")
        .replace("%2F", "/")
        .replace("%2f", "/")
        .replace("%20", " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_location(loc: Location, lat: f64, lng: f64) {
        assert!((loc.lat - lat).abs() < 1e-9, "lat {} != {}", loc.lat, lat);
        assert!((loc.lng - lng).abs() < 1e-9, "lng {} != {}", loc.lng, lng);
    }

    #[test]
    fn test_query_parameter() {
        let loc = parse_map_link("https://maps.google.com/maps?daddr=53.5206,-113.5236").unwrap();
        assert_location(loc, 53.5206, -113.5236);
    }

    #[test]
    fn test_at_path_segment_with_zoom() {
        let loc = parse_map_link("https://www.google.com/maps/place/@53.4592,-113.4302,15z").unwrap();
        assert_location(loc, 53.4592, -113.4302);
    }

    #[test]
    fn test_slash_separated_segments() {
        let loc = parse_map_link("https://example.org/dir/53.5/-113.5").unwrap();
        assert_location(loc, 53.5, -113.5);
    }

    #[test]
    fn test_percent_encoded_comma() {
        let loc = parse_map_link("https://www.google.com/maps/dir/?api=1&destination=53.5%2C-113.5").unwrap();
        assert_location(loc, 53.5, -113.5);
    }

    #[test]
    fn test_whitespace_around_separator() {
        let loc = parse_map_link("q=53.5 , -113.5").unwrap();
        assert_location(loc, 53.5, -113.5);
    }

    #[test]
    fn test_skips_out_of_range_pair() {
        let loc = parse_map_link("https://example.org/?bbox=200.5,53.5,-113.5").unwrap();
        assert_location(loc, 53.5, -113.5);
    }

    #[test]
    fn test_integers_are_not_coordinates() {
        assert!(matches!(
            parse_map_link("https://example.org/dir/1/2"),
            Err(GeoError::InvalidMapLink(_))
        ));
    }

    #[test]
    fn test_out_of_range_only() {
        assert!(matches!(
            parse_map_link("https://example.org/?q=95.0,-200.0"),
            Err(GeoError::InvalidCoordinate(_))
        ));
    }

    #[test]
    fn test_extract_falls_back_to_origin() {
        assert_eq!(extract_coordinates("not a link"), Location::ORIGIN);
        assert_eq!(extract_coordinates(""), Location::ORIGIN);
        assert_eq!(extract_coordinates("https://maps.google.com/?q=Royal+Alexandra"), Location::ORIGIN);
    }
}
