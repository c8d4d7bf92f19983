//! Run-date resolution.
//!
//! What this module provides:
//! - [`parse_tz`]: Parse an IANA time zone name (e.g., "Asia/Shanghai").
//! - [`date_in`]: The calendar date of a UTC instant as seen in a zone, or in
//!   the machine's local zone when none is given.
//! - [`today`]: [`date_in`] applied to the current instant.
//!
//! Notes:
//! - The provider publishes in China Standard Time. A host running in another
//!   zone around midnight would otherwise ask for a window ending on a
//!   different day than the provider's "today".

use anyhow::Context;
use chrono::{DateTime, Local, NaiveDate, Utc};
use chrono_tz::Tz;

/// Parse an IANA time zone name.
///
/// Errors:
/// - Unknown zone name
pub fn parse_tz(name: &str) -> anyhow::Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("bad tz: {name}"))
}

/// The calendar date of `now` in `tz`, or in the local zone when `tz` is `None`.
pub fn date_in(now: DateTime<Utc>, tz: Option<Tz>) -> NaiveDate {
    match tz {
        Some(tz) => now.with_timezone(&tz).date_naive(),
        None => now.with_timezone(&Local).date_naive(),
    }
}

/// Today's date in `tz`, or in the local zone when `tz` is `None`.
pub fn today(tz: Option<Tz>) -> NaiveDate {
    date_in(Utc::now(), tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn shanghai_is_ahead_of_utc_near_midnight() {
        // 2024-06-01 17:30Z is 2024-06-02 01:30 in Shanghai (UTC+8).
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 17, 30, 0).unwrap();
        let tz = parse_tz("Asia/Shanghai").unwrap();
        assert_eq!(date_in(now, Some(tz)), NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
    }

    #[test]
    fn new_york_is_behind_utc_after_midnight() {
        // 2024-01-15 03:00Z is 2024-01-14 22:00 in New York (EST).
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 3, 0, 0).unwrap();
        let tz = parse_tz(" America/New_York ").unwrap();
        assert_eq!(date_in(now, Some(tz)), NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
    }

    #[test]
    fn unknown_zone_is_error() {
        let err = parse_tz("Mars/Olympus_Mons").unwrap_err();
        assert!(err.to_string().contains("bad tz"));
    }

    #[test]
    fn local_zone_matches_chrono_local() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        assert_eq!(date_in(now, None), now.with_timezone(&Local).date_naive());
    }
}
