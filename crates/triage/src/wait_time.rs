//! Wait-time parsing.
//!
//! The feed reports waits as free text such as `"2 hr 15 min"`, `"45 mins"`,
//! `"1.5 hours"`, `"2:15"` or a status like `"Closed"`. Recognized forms:
//!
//! - amount + unit pairs, summed: hours as `h`, `hr`, `hrs`, `hour`, `hours`;
//!   minutes as `m`, `min`, `mins`, `minute`, `minutes` (any case). A bare
//!   number after the hours is minutes, so `"1 hr 30"` and `"1h30"` are 90.
//! - `H:MM`
//! - a bare integer, read as minutes
//!
//! Everything else maps to [`UNKNOWN_WAIT_MINUTES`].

use once_cell::sync::Lazy;
use regex::Regex;

/// Sentinel for a wait that could not be determined.
///
/// Large enough to rank after any real wait. Never 0, which would read as
/// "no wait".
pub const UNKNOWN_WAIT_MINUTES: u32 = 9_999;

static AMOUNT_UNIT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\d+(?:\.\d+)?)\s*(hours|hour|hrs|hr|h|minutes|minute|mins|min|m)\.?").unwrap()
});

static CLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3}):([0-5]\d)(?:\s*(?:hours|hrs|hr|h))?$").unwrap());

static BARE_MINUTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{1,6}$").unwrap());

static TRAILING_MINUTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*(\d{1,2})\.?$").unwrap());

/// Parse a wait description into minutes, or [`UNKNOWN_WAIT_MINUTES`].
///
/// # Example
/// ```
/// use waitroom_triage::wait_time::{parse_wait_time, UNKNOWN_WAIT_MINUTES};
///
/// assert_eq!(parse_wait_time("2 hr 15 min"), 135);
/// assert_eq!(parse_wait_time("45 min"), 45);
/// assert_eq!(parse_wait_time("Closed"), UNKNOWN_WAIT_MINUTES);
/// ```
pub fn parse_wait_time(text: &str) -> u32 {
    try_parse_wait_time(text).unwrap_or(UNKNOWN_WAIT_MINUTES)
}

/// Parse a wait description into minutes, `None` when unrecognized.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn try_parse_wait_time(text: &str) -> Option<u32> {
    let normalized = text.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return None;
    }

    if BARE_MINUTES.is_match(&normalized) {
        return normalized.parse().ok();
    }

    if let Some(caps) = CLOCK.captures(&normalized) {
        let hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = caps[2].parse().ok()?;
        return hours.checked_mul(60)?.checked_add(minutes);
    }

    let mut total = 0.0_f64;
    let mut matched = false;
    // end of the last pair when its unit was hours
    let mut after_hours = None;
    for caps in AMOUNT_UNIT.captures_iter(&normalized) {
        let (Some(amount), Some(unit)) = (caps.get(1), caps.get(2)) else {
            continue;
        };

        // "3 months" is not "3 m"
        if normalized[unit.end()..]
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic())
        {
            continue;
        }

        let Ok(amount) = amount.as_str().parse::<f64>() else {
            continue;
        };
        let is_hours = unit.as_str().starts_with('h');
        total += if is_hours { amount * 60.0 } else { amount };
        after_hours = is_hours.then(|| caps.get(0).map_or(unit.end(), |m| m.end()));
        matched = true;
    }

    if !matched {
        return None;
    }

    if let Some(caps) = after_hours.and_then(|end| TRAILING_MINUTES.captures(&normalized[end..])) {
        total += caps[1].parse::<f64>().ok()?;
    }

    let rounded = total.round();
    if rounded.is_finite() && rounded <= f64::from(u32::MAX) {
        Some(rounded as u32)
    } else {
        None
    }
}
