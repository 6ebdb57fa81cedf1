//! Compact result summary for size-constrained consumers such as LLM tool
//! responses.

use crate::facility::EnrichedFacility;
use serde::{Deserialize, Serialize};

/// Message returned in place of any failure detail
pub const FAILURE_MESSAGE: &str = "Failed to retrieve wait room information";

/// Bounded digest of a ranked result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Facilities left after filtering
    pub total_facilities: usize,
    /// Best facilities by blended score, at most the configured top count
    pub recommended_facilities: Vec<RecommendedFacility>,
}

/// One recommended facility in display form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedFacility {
    /// Facility name
    pub name: String,
    /// Wait as published, not the parsed minutes
    pub wait_time: String,
    /// Distance such as `"4.21873km"`
    pub distance: String,
    /// Informational note from the feed
    pub note: String,
}

impl From<&EnrichedFacility> for RecommendedFacility {
    fn from(facility: &EnrichedFacility) -> Self {
        Self {
            name: facility.record.name.clone(),
            wait_time: facility.record.wait_time.clone(),
            distance: format_distance(facility.distance_km),
            note: facility.record.note.clone(),
        }
    }
}

impl Summary {
    /// Summarize `top` out of `total_facilities` ranked facilities
    pub fn new(total_facilities: usize, top: &[EnrichedFacility]) -> Self {
        Self {
            total_facilities,
            recommended_facilities: top.iter().map(RecommendedFacility::from).collect(),
        }
    }
}

/// Format a distance with five decimals and a `km` suffix
pub fn format_distance(distance_km: f64) -> String {
    format!("{distance_km:.5}km")
}

/// Status line naming the best facility
pub fn status_message(city: &str, total: usize, best: Option<&EnrichedFacility>) -> String {
    match best {
        Some(best) => format!(
            "Found {total} facilities in {city}. Best option is {} ({} wait) at {:.1}km away.",
            best.record.name, best.record.wait_time, best.distance_km
        ),
        None => format!(
            "Found {total} facilities in {city}. No emergency facilities matched the search."
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facility::RawFacilityRecord;
    use waitroom_geo::Location;

    fn facility(name: &str, wait: &str, distance_km: f64) -> EnrichedFacility {
        EnrichedFacility {
            record: RawFacilityRecord {
                name: name.to_string(),
                wait_time: wait.to_string(),
                note: "Open 24 hours".to_string(),
                ..RawFacilityRecord::default()
            },
            coordinates: Location::ORIGIN,
            wait_time_minutes: 60,
            distance_km,
        }
    }

    #[test]
    fn test_format_distance() {
        assert_eq!(format_distance(6.62741234), "6.62741km");
        assert_eq!(format_distance(0.0), "0.00000km");
    }

    #[test]
    fn test_summary_keeps_original_wait_string() {
        let top = vec![facility("Royal Alexandra", "1 hr", 6.627_412)];
        let summary = Summary::new(4, &top);

        assert_eq!(summary.total_facilities, 4);
        assert_eq!(
            summary.recommended_facilities,
            vec![RecommendedFacility {
                name: "Royal Alexandra".to_string(),
                wait_time: "1 hr".to_string(),
                distance: "6.62741km".to_string(),
                note: "Open 24 hours".to_string(),
            }]
        );
    }

    #[test]
    fn test_summary_serializes_camel_case() {
        let summary = Summary::new(1, &[facility("A", "45 min", 2.5)]);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["totalFacilities"], 1);
        assert_eq!(json["recommendedFacilities"][0]["waitTime"], "45 min");
        assert!(json["recommendedFacilities"][0].get("score").is_none());
    }

    #[test]
    fn test_status_message() {
        let best = facility("Grey Nuns", "2 hr 15 min", 12.345);
        assert_eq!(
            status_message("Edmonton", 5, Some(&best)),
            "Found 5 facilities in Edmonton. Best option is Grey Nuns (2 hr 15 min wait) at 12.3km away."
        );
        assert_eq!(
            status_message("Toronto", 0, None),
            "Found 0 facilities in Toronto. No emergency facilities matched the search."
        );
    }
}
