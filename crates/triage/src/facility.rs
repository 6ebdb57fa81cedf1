//! Facility records and enrichment.
//!
//! [`RawFacilityRecord`] is the boundary type for the untrusted feed: it is
//! built field by field from whatever JSON the feed sent. [`enrich`] adds the
//! parsed wait, the extracted coordinates and the distance to the user.

use crate::wait_time::{UNKNOWN_WAIT_MINUTES, try_parse_wait_time};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use waitroom_geo::{Location, haversine_distance, parse_map_link};

/// Key under which each city lists its emergency departments
const EMERGENCY_KEY: &str = "Emergency";

/// A facility as published by the feed
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawFacilityRecord {
    /// Facility name (`Name`)
    pub name: String,
    /// Wait description as published (`WaitTime`)
    pub wait_time: String,
    /// Street address (`Address`)
    pub address: String,
    /// Directions link carrying the coordinates (`GoogleMapsLinkDirection`)
    pub map_link: String,
    /// Facility page (`URL`)
    pub url: String,
    /// Informational note (`Note`)
    pub note: String,
}

impl RawFacilityRecord {
    /// Coerce a feed entry into a record.
    ///
    /// Missing fields become empty strings; numbers and booleans are
    /// stringified. Strings are kept exactly as published. Never fails.
    pub fn from_value(value: &Value) -> Self {
        Self {
            name: text_field(value, "Name"),
            wait_time: text_field(value, "WaitTime"),
            address: text_field(value, "Address"),
            map_link: text_field(value, "GoogleMapsLinkDirection"),
            url: text_field(value, "URL"),
            note: text_field(value, "Note"),
        }
    }
}

fn text_field(value: &Value, key: &str) -> String {
    match value.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(v @ (Value::Number(_) | Value::Bool(_))) => v.to_string(),
        _ => String::new(),
    }
}

/// A feed record plus everything computed from it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedFacility {
    /// The record this was computed from, unchanged
    #[serde(flatten)]
    pub record: RawFacilityRecord,
    /// Location parsed from the map link, `{0,0}` when unusable
    pub coordinates: Location,
    /// Parsed wait, [`UNKNOWN_WAIT_MINUTES`] when unusable
    pub wait_time_minutes: u32,
    /// Great-circle distance from the user in kilometers
    pub distance_km: f64,
}

impl EnrichedFacility {
    /// Facility name
    pub fn name(&self) -> &str {
        &self.record.name
    }

    /// Wait description as published
    pub fn wait_time(&self) -> &str {
        &self.record.wait_time
    }

    /// Whether the published wait was understood
    pub fn has_known_wait(&self) -> bool {
        self.wait_time_minutes != UNKNOWN_WAIT_MINUTES
    }
}

/// Facilities enriched for one query, with counts of degraded records
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    /// Enriched facilities in feed order
    pub facilities: Vec<EnrichedFacility>,
    /// Records whose map link yielded no coordinates
    pub coordinate_fallbacks: usize,
    /// Records whose wait could not be parsed
    pub unknown_waits: usize,
}

/// Enrich one record relative to the user's location.
pub fn enrich(raw: RawFacilityRecord, user_location: &Location) -> EnrichedFacility {
    enrich_flagged(raw, user_location).0
}

/// Enrich every record of a city.
pub fn enrich_all(records: Vec<RawFacilityRecord>, user_location: &Location) -> Enrichment {
    let mut enrichment = Enrichment {
        facilities: Vec::with_capacity(records.len()),
        ..Enrichment::default()
    };

    for raw in records {
        let (facility, flags) = enrich_flagged(raw, user_location);
        if flags.coordinate_fallback {
            enrichment.coordinate_fallbacks += 1;
        }
        if flags.unknown_wait {
            enrichment.unknown_waits += 1;
        }
        enrichment.facilities.push(facility);
    }

    enrichment
}

#[derive(Debug, Clone, Copy, Default)]
struct EnrichFlags {
    coordinate_fallback: bool,
    unknown_wait: bool,
}

fn enrich_flagged(raw: RawFacilityRecord, user_location: &Location) -> (EnrichedFacility, EnrichFlags) {
    let mut flags = EnrichFlags::default();

    let coordinates = match parse_map_link(&raw.map_link) {
        Ok(location) => location,
        Err(e) => {
            warn!(facility = %raw.name, error = %e, "Unusable map link, using origin coordinates");
            flags.coordinate_fallback = true;
            Location::ORIGIN
        }
    };

    let wait_time_minutes = if let Some(minutes) = try_parse_wait_time(&raw.wait_time) {
        minutes
    } else {
        warn!(facility = %raw.name, wait_time = %raw.wait_time, "Unparseable wait time");
        flags.unknown_wait = true;
        UNKNOWN_WAIT_MINUTES
    };

    let distance_km = haversine_distance(user_location, &coordinates);

    let facility = EnrichedFacility {
        record: raw,
        coordinates,
        wait_time_minutes,
        distance_km,
    };
    (facility, flags)
}

/// Pick one city's records out of the feed payload.
///
/// The city key is matched exactly, then ASCII case-insensitively. An absent
/// city or a city without an `Emergency` list yields no records. Entries that
/// are not JSON objects are skipped.
pub fn select_city(feed: &Value, city: &str) -> Vec<RawFacilityRecord> {
    let Some(root) = feed.as_object() else {
        return Vec::new();
    };

    let city = city.trim();
    let entry = root.get(city).or_else(|| {
        root.iter()
            .find(|(key, _)| key.trim().eq_ignore_ascii_case(city))
            .map(|(_, value)| value)
    });

    let Some(entry) = entry else {
        info!(city, "City not present in feed");
        return Vec::new();
    };

    let Some(list) = entry.get(EMERGENCY_KEY).and_then(Value::as_array) else {
        info!(city, "City has no emergency listing");
        return Vec::new();
    };

    let records: Vec<_> = list
        .iter()
        .filter_map(|item| {
            if item.is_object() {
                Some(RawFacilityRecord::from_value(item))
            } else {
                warn!(city, "Skipping non-object facility entry");
                None
            }
        })
        .collect();

    debug!(city, count = records.len(), "Selected city records");
    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(name: &str, wait: &str, link: &str) -> RawFacilityRecord {
        RawFacilityRecord {
            name: name.to_string(),
            wait_time: wait.to_string(),
            address: "10240 Kingsway NW".to_string(),
            map_link: link.to_string(),
            url: "https://example.org/facility".to_string(),
            note: "Adults only".to_string(),
        }
    }

    #[test]
    fn test_from_value_reads_upstream_keys() {
        let value = json!({
            "Name": "Royal Alexandra Hospital",
            "WaitTime": "2 hr 15 min",
            "Address": "10240 Kingsway NW",
            "GoogleMapsLinkDirection": "https://maps.google.com/?daddr=53.5584,-113.4980",
            "URL": "https://example.org/rah",
            "Note": "Adults only"
        });

        let record = RawFacilityRecord::from_value(&value);
        assert_eq!(record.name, "Royal Alexandra Hospital");
        assert_eq!(record.wait_time, "2 hr 15 min");
        assert_eq!(record.address, "10240 Kingsway NW");
        assert!(record.map_link.contains("53.5584"));
        assert_eq!(record.url, "https://example.org/rah");
        assert_eq!(record.note, "Adults only");
    }

    #[test]
    fn test_from_value_coerces_missing_and_mistyped_fields() {
        let value = json!({"Name": "Clinic", "WaitTime": 45, "Note": null, "URL": ["x"]});

        let record = RawFacilityRecord::from_value(&value);
        assert_eq!(record.name, "Clinic");
        assert_eq!(record.wait_time, "45");
        assert_eq!(record.address, "");
        assert_eq!(record.note, "");
        assert_eq!(record.url, "");
    }

    #[test]
    fn test_from_value_keeps_surrounding_whitespace() {
        let user = Location::new(53.5, -113.4);
        let value = json!({
            "Name": " Grey Nuns ",
            "WaitTime": "  2 hr 15 min ",
            "GoogleMapsLinkDirection": " https://maps.google.com/?daddr=53.46,-113.43\n"
        });

        let record = RawFacilityRecord::from_value(&value);
        assert_eq!(record.name, " Grey Nuns ");
        assert_eq!(record.wait_time, "  2 hr 15 min ");

        let facility = enrich(record, &user);
        assert_eq!(facility.wait_time_minutes, 135);
        assert_eq!(facility.coordinates, Location::new(53.46, -113.43));
        assert_eq!(facility.record.wait_time, "  2 hr 15 min ");
    }

    #[test]
    fn test_enrich_preserves_record_and_adds_fields() {
        let user = Location::new(53.5, -113.4);
        let record = raw("A", "1 hr", "https://maps.google.com/?daddr=53.5,-113.5");

        let facility = enrich(record.clone(), &user);

        assert_eq!(facility.record, record);
        assert_eq!(facility.coordinates, Location::new(53.5, -113.5));
        assert_eq!(facility.wait_time_minutes, 60);
        assert!(facility.distance_km > 0.0 && facility.distance_km < 10.0);
        assert!(facility.has_known_wait());
    }

    #[test]
    fn test_enrich_is_deterministic() {
        let user = Location::new(53.5, -113.4);
        let record = raw("A", "2 hr 15 min", "https://maps.google.com/?daddr=53.52,-113.52");
        assert_eq!(enrich(record.clone(), &user), enrich(record, &user));
    }

    #[test]
    fn test_enrich_degrades_bad_record() {
        let user = Location::new(53.5, -113.4);
        let facility = enrich(raw("B", "Closed", "no coordinates here"), &user);

        assert_eq!(facility.coordinates, Location::ORIGIN);
        assert_eq!(facility.wait_time_minutes, UNKNOWN_WAIT_MINUTES);
        assert!(facility.distance_km > 5000.0);
        assert!(!facility.has_known_wait());
    }

    #[test]
    fn test_enrich_all_counts_fallbacks() {
        let user = Location::new(53.5, -113.4);
        let records = vec![
            raw("A", "1 hr", "https://maps.google.com/?daddr=53.5,-113.5"),
            raw("B", "Unavailable", "https://maps.google.com/?daddr=53.6,-113.6"),
            raw("C", "30 min", ""),
        ];

        let enrichment = enrich_all(records, &user);
        assert_eq!(enrichment.facilities.len(), 3);
        assert_eq!(enrichment.coordinate_fallbacks, 1);
        assert_eq!(enrichment.unknown_waits, 1);
        let names: Vec<_> = enrichment.facilities.iter().map(EnrichedFacility::name).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn test_enriched_serialization_is_flat_camel_case() {
        let user = Location::new(53.5, -113.4);
        let facility = enrich(raw("A", "1 hr", "https://maps.google.com/?daddr=53.5,-113.5"), &user);

        let json = serde_json::to_value(&facility).unwrap();
        assert_eq!(json["name"], "A");
        assert_eq!(json["waitTime"], "1 hr");
        assert_eq!(json["waitTimeMinutes"], 60);
        assert_eq!(json["coordinates"]["lat"], 53.5);
        assert!(json["distanceKm"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_select_city() {
        let feed = json!({
            "Edmonton": {"Emergency": [{"Name": "A"}, {"Name": "B"}]},
            "Calgary": {"Emergency": [{"Name": "C"}]}
        });

        let names: Vec<_> = select_city(&feed, "Edmonton").into_iter().map(|r| r.name).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn test_select_city_case_insensitive_fallback() {
        let feed = json!({"Edmonton": {"Emergency": [{"Name": "A"}]}});
        assert_eq!(select_city(&feed, "edmonton").len(), 1);
        assert_eq!(select_city(&feed, "  EDMONTON ").len(), 1);
    }

    #[test]
    fn test_select_city_missing_shapes_yield_empty() {
        let feed = json!({
            "Edmonton": {"Emergency": [{"Name": "A"}]},
            "Red Deer": {"Urgent": []},
            "Lethbridge": "unavailable",
            "Banff": {"Emergency": {"Name": "not a list"}}
        });

        assert!(select_city(&feed, "Toronto").is_empty());
        assert!(select_city(&feed, "Red Deer").is_empty());
        assert!(select_city(&feed, "Lethbridge").is_empty());
        assert!(select_city(&feed, "Banff").is_empty());
        assert!(select_city(&json!([]), "Edmonton").is_empty());
    }

    #[test]
    fn test_select_city_skips_non_object_entries() {
        let feed = json!({"Edmonton": {"Emergency": [null, "A", {"Name": "B"}]}});
        let records = select_city(&feed, "Edmonton");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "B");
    }
}
