//! Radius filtering and ranking.

use crate::facility::EnrichedFacility;
use std::cmp::Ordering;

/// Wait difference (minutes) above which wait time decides the order
pub const WAIT_TIME_THRESHOLD_MINUTES: u32 = 30;

/// Weight of the wait in the blended score
pub const WAIT_TIME_WEIGHT: f64 = 0.7;

/// Weight of the distance in the blended score
pub const DISTANCE_WEIGHT: f64 = 0.3;

/// Facilities kept in the summary by default
pub const DEFAULT_TOP_COUNT: usize = 3;

/// Two-tier ordering of facilities.
///
/// Wait time decides when the waits differ by more than
/// [`WAIT_TIME_THRESHOLD_MINUTES`]; otherwise the closer facility comes first.
/// NaN distances compare as +∞.
///
/// This is not a total order: with waits 0, 20 and 40 the first and last are
/// ordered by wait while each adjacent pair is ordered by distance.
pub fn compare_facilities(a: &EnrichedFacility, b: &EnrichedFacility) -> Ordering {
    if a.wait_time_minutes.abs_diff(b.wait_time_minutes) > WAIT_TIME_THRESHOLD_MINUTES {
        a.wait_time_minutes.cmp(&b.wait_time_minutes)
    } else {
        distance_key(a.distance_km).total_cmp(&distance_key(b.distance_km))
    }
}

/// Drop facilities beyond `max_distance_km` and order the rest.
///
/// The filter is strict: a facility whose distance is NaN is dropped too.
/// Without a radius everything is kept.
pub fn filter_and_rank(
    facilities: Vec<EnrichedFacility>,
    max_distance_km: Option<f64>,
) -> Vec<EnrichedFacility> {
    let mut ranked: Vec<_> = match max_distance_km {
        Some(max) => facilities
            .into_iter()
            .filter(|f| f.distance_km <= max)
            .collect(),
        None => facilities,
    };

    insertion_sort_by(&mut ranked, compare_facilities);
    ranked
}

/// A requested radius worth applying.
///
/// Zero, negative and non-finite values mean "no radius". Tool callers fill
/// the optional argument with `0` when they have no limit in mind.
pub fn usable_radius(max_distance_km: Option<f64>) -> Option<f64> {
    max_distance_km.filter(|km| km.is_finite() && *km > 0.0)
}

/// Blended ranking score, lower is better
#[inline]
pub fn blended_score(facility: &EnrichedFacility) -> f64 {
    WAIT_TIME_WEIGHT * f64::from(facility.wait_time_minutes)
        + DISTANCE_WEIGHT * distance_key(facility.distance_km)
}

/// The `count` facilities with the lowest [`blended_score`].
///
/// Equal scores keep their input order.
pub fn select_top(facilities: &[EnrichedFacility], count: usize) -> Vec<EnrichedFacility> {
    let mut scored: Vec<(f64, &EnrichedFacility)> =
        facilities.iter().map(|f| (blended_score(f), f)).collect();
    scored.sort_by(|a, b| a.0.total_cmp(&b.0));

    scored
        .into_iter()
        .take(count)
        .map(|(_, f)| f.clone())
        .collect()
}

fn distance_key(distance_km: f64) -> f64 {
    if distance_km.is_nan() {
        f64::INFINITY
    } else {
        distance_km
    }
}

/// Stable insertion sort that tolerates comparators without a total order.
///
/// Each element moves left past every neighbor that compares greater, so the
/// result is locally consistent with `compare` and never panics.
fn insertion_sort_by<T, F>(items: &mut [T], mut compare: F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    for i in 1..items.len() {
        let mut j = i;
        while j > 0 && compare(&items[j - 1], &items[j]) == Ordering::Greater {
            items.swap(j - 1, j);
            j -= 1;
        }
    }
}
