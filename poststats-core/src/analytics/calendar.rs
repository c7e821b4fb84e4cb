//! Calendar arithmetic shared by calculators.

use chrono::{DateTime, Datelike, TimeZone};

/// Number of calendar months from `earliest` to `latest`, counting both
/// boundary months.
///
/// Only the (year, month) of each timestamp matters, read in that
/// timestamp's own offset. Two posts on the 1st and the 28th of the same
/// month span exactly one month.
///
/// Requires `earliest <= latest`. Never returns 0: when differing offsets put
/// `earliest` in a later local month than `latest` the span is 1.
pub fn month_span<Tz1: TimeZone, Tz2: TimeZone>(
    earliest: &DateTime<Tz1>,
    latest: &DateTime<Tz2>,
) -> u32 {
    let years = i64::from(latest.year()) - i64::from(earliest.year());
    let months = i64::from(latest.month()) - i64::from(earliest.month());
    let total = years * 12 + months + 1;

    u32::try_from(total.max(1)).unwrap_or(u32::MAX)
}

/// `numerator / denominator` rounded half away from zero to `places`
/// decimal places.
///
/// The quotient is rounded exactly in integer arithmetic, so decimal halves
/// such as 23/40 = 0.575 round up even though `0.575 * 100.0` is just below
/// 57.5 as an `f64`. A zero denominator yields 0.
pub fn round_ratio(numerator: u64, denominator: u64, places: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }

    let scale = 10u128.pow(places);
    let (numerator, denominator) = (u128::from(numerator), u128::from(denominator));
    let scaled = (2 * scale * numerator + denominator) / (2 * denominator);

    scaled as f64 / scale as f64
}
