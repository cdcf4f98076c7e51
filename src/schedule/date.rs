//! Canonical `YYYY-MM-DD` keys for comparing dates.
//!
//! Stored dates arrive as date-only strings, ISO datetimes or real date
//! values. Every comparison in the scheduler goes through a key so that a
//! timestamp saved at 23:30 UTC never drifts onto the next or previous day.
//! An empty key means "no date".

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};

const KEY_FORMAT: &str = "%Y-%m-%d";

/// Anything that can be reduced to a comparison key.
pub trait DateLike {
    fn comparison_key(&self) -> String;
}

impl DateLike for str {
    fn comparison_key(&self) -> String {
        key_from_text(self)
    }
}

impl DateLike for String {
    fn comparison_key(&self) -> String {
        key_from_text(self)
    }
}

impl DateLike for NaiveDate {
    fn comparison_key(&self) -> String {
        self.format(KEY_FORMAT).to_string()
    }
}

impl<Tz: TimeZone> DateLike for DateTime<Tz> {
    fn comparison_key(&self) -> String {
        self.with_timezone(&Utc).date_naive().comparison_key()
    }
}

impl<T: DateLike + ?Sized> DateLike for &T {
    fn comparison_key(&self) -> String {
        (**self).comparison_key()
    }
}

impl<T: DateLike> DateLike for Option<T> {
    fn comparison_key(&self) -> String {
        self.as_ref().map(T::comparison_key).unwrap_or_default()
    }
}

pub fn to_comparison_key<D: DateLike + ?Sized>(input: &D) -> String {
    input.comparison_key()
}

/// True when both inputs carry a date and fall on the same calendar day.
pub fn same_day<A, B>(a: &A, b: &B) -> bool
where
    A: DateLike + ?Sized,
    B: DateLike + ?Sized,
{
    let a = a.comparison_key();
    if a.is_empty() {
        return false;
    }
    let b = b.comparison_key();
    !b.is_empty() && a == b
}

/// Parses a key back into a date for arithmetic.
pub fn parse_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, KEY_FORMAT).ok()
}

/// Shifts a key by whole days; an unusable key stays empty.
pub fn shift_key(key: &str, days: i64) -> String {
    parse_key(key)
        .and_then(|d| d.checked_add_signed(Duration::days(days)))
        .map(|d| d.comparison_key())
        .unwrap_or_default()
}

/// Reads a day typed on the command line: `today`, `tomorrow`, `yesterday`
/// or anything [`to_comparison_key`] understands.
pub fn parse_day(input: &str, today: NaiveDate) -> Option<NaiveDate> {
    match input.trim().to_lowercase().as_str() {
        "today" => Some(today),
        "tomorrow" => today.succ_opt(),
        "yesterday" => today.pred_opt(),
        other => parse_key(&key_from_text(other)),
    }
}

fn key_from_text(raw: &str) -> String {
    let s = raw.trim();
    if s.is_empty() {
        return String::new();
    }

    // Date-only strings and ISO datetimes: keep what precedes the time
    // separator, re-formatted so single-digit months and days are padded.
    let date_part = s.split_once(['T', ' ']).map_or(s, |(date, _)| date);
    if let Ok(date) = NaiveDate::parse_from_str(date_part, KEY_FORMAT) {
        return date.comparison_key();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.comparison_key();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return dt.comparison_key();
    }

    tracing::trace!(input = s, "unparseable date");
    String::new()
}
