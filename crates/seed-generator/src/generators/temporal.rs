//! Date and timestamp generators.
//!
//! All windows are expressed relative to the caller's `now` anchor so that a
//! run is reproducible when the anchor is pinned.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::Rng;

/// Uniform timestamp in `start..=end` with second resolution.
///
/// Returns `start` when the window is empty or inverted.
pub fn datetime_between<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> NaiveDateTime {
    let span = (end - start).num_seconds();
    if span <= 0 {
        return start;
    }
    start + Duration::seconds(rng.gen_range(0..=span))
}

/// Uniform date in `start..=end`.
///
/// Returns `start` when the window is empty or inverted.
pub fn date_between<R: Rng + ?Sized>(rng: &mut R, start: NaiveDate, end: NaiveDate) -> NaiveDate {
    let span = (end - start).num_days();
    if span <= 0 {
        return start;
    }
    start + Duration::days(rng.gen_range(0..=span))
}

/// Uniform date within the last `days` days, ending today.
pub fn date_within_days<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime, days: i64) -> NaiveDate {
    let today = now.date();
    date_between(rng, today - Duration::days(days), today)
}

/// Uniform timestamp within the last `days` days, ending now.
pub fn datetime_within_days<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    days: i64,
) -> NaiveDateTime {
    datetime_between(rng, now - Duration::days(days), now)
}

/// Birth date for someone aged `min_age..=max_age` years today.
pub fn birth_date<R: Rng + ?Sized>(
    rng: &mut R,
    now: NaiveDateTime,
    min_age: i64,
    max_age: i64,
) -> NaiveDate {
    let today = now.date();
    date_between(
        rng,
        today - Duration::days((max_age + 1) * 365 - 1),
        today - Duration::days(min_age * 365),
    )
}

/// `start` shifted by a random offset of up to `days`, `hours`, `minutes`
/// and `seconds` (each component drawn independently, inclusive).
pub fn offset_from<R: Rng + ?Sized>(
    rng: &mut R,
    start: NaiveDateTime,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
) -> NaiveDateTime {
    start
        + Duration::days(rng.gen_range(0..=days))
        + Duration::hours(rng.gen_range(0..=hours))
        + Duration::minutes(rng.gen_range(0..=minutes))
        + Duration::seconds(rng.gen_range(0..=seconds))
}

/// ISO-8601 timestamp string within the last ten years.
pub fn iso8601<R: Rng + ?Sized>(rng: &mut R, now: NaiveDateTime) -> String {
    datetime_within_days(rng, now, 3650)
        .format("%Y-%m-%dT%H:%M:%S")
        .to_string()
}
