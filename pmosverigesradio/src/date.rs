//! Decoding of the `/Date(...)/` values found in API responses
//!
//! The API embeds timestamps as ASP.NET-style strings such as
//! `"/Date(1445869200000)/"` or `"/Date(1445869200000+0200)/"`.
//!
//! [`decode`] reads that layout with fixed character offsets counted from
//! both ends of the string rather than by scanning for delimiters, and the
//! offset arithmetic has to stay exactly as it is so that values decode to
//! the same instants as before. Treat it as a wire format, not as a general
//! date parser.

use crate::error::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};

/// Length of the `/Date(` prefix
const PREFIX_LEN: usize = 6;
/// Length of the `)/` suffix
const SUFFIX_LEN: usize = 2;
/// Position of the offset sign, counted from the end
const SIGN_FROM_END: usize = 7;
/// Position of the offset minutes, counted from the end
const MINUTES_FROM_END: usize = 4;
/// Total length of a millisecond-only value with a five character body
/// (e.g. `/Date(-1234)/`), whose sign would otherwise be read as an offset
const SHORT_VALUE_LEN: usize = 13;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Decode a `/Date(<millis>[±HHMM])/` value into an instant
///
/// When an offset is present its contribution is added to the millisecond
/// count, so the returned instant is the epoch plus the decoded milliseconds.
pub fn decode(raw: &str) -> Result<DateTime<Utc>> {
    let invalid = || Error::InvalidDate(raw.to_string());

    let len = raw.len();
    let sign_at = len.checked_sub(SIGN_FROM_END).ok_or_else(invalid)?;
    let sign = raw.as_bytes()[sign_at];

    let millis = if !matches!(sign, b'+' | b'-') || len == SHORT_VALUE_LEN {
        number_at(raw, PREFIX_LEN, len - SUFFIX_LEN)?
    } else {
        let base = number_at(raw, PREFIX_LEN, sign_at)?;
        // The hours slice keeps the sign character
        let hours = number_at(raw, sign_at, len - MINUTES_FROM_END)?;
        let mut minutes = number_at(raw, len - MINUTES_FROM_END, len - SUFFIX_LEN)?;
        if sign == b'-' {
            minutes = -minutes;
        }

        hours
            .checked_mul(60)
            .and_then(|h| h.checked_add(minutes))
            .and_then(|m| m.checked_mul(MILLIS_PER_MINUTE))
            .and_then(|offset| base.checked_add(offset))
            .ok_or_else(invalid)?
    };

    DateTime::from_timestamp_millis(millis).ok_or_else(invalid)
}

/// Decode the publish date of a pod file or broadcast file
///
/// These values never carry an offset: the milliseconds sit between the
/// prefix and the suffix, are truncated to whole seconds, and only the
/// calendar day is kept.
pub fn decode_publish_date(raw: &str) -> Result<NaiveDate> {
    let end = raw
        .len()
        .checked_sub(SUFFIX_LEN)
        .ok_or_else(|| Error::InvalidDate(raw.to_string()))?;
    let millis = number_at(raw, PREFIX_LEN, end)?;

    DateTime::from_timestamp(millis.div_euclid(1000), 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| Error::InvalidDate(raw.to_string()))
}

/// `YYYY-MM-DD HH:MM`
pub fn format_full(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// `DD.MM.YYYY`
pub fn format_date(ts: &DateTime<Utc>) -> String {
    format_day(&ts.date_naive())
}

/// `DD.MM.YYYY`
pub fn format_day(date: &NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

fn number_at(raw: &str, start: usize, end: usize) -> Result<i64> {
    raw.get(start..end)
        .and_then(|digits| digits.parse::<i64>().ok())
        .ok_or_else(|| Error::InvalidDate(raw.to_string()))
}
