//! Lenient date parsing for loosely-formatted timestamps.
//!
//! Feed publish dates, forum timestamps, and dates scraped out of arbitrary
//! IR-page HTML arrive in wildly different shapes: RFC 2822, RFC 3339,
//! bare ISO dates, `Nov 12, 2025`, `12 November 2025`, or a date buried in
//! the middle of a sentence. [`parse_lenient`] tries the well-known formats
//! first and falls back to regex extraction of an embedded date.
//!
//! Timestamps without a zone are assumed UTC; date-only values resolve to
//! midnight UTC. Unparseable input yields `None`, never an error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Datetime formats tried after the RFC parsers, assumed UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%d %b %Y %H:%M:%S",
];

/// Date-only formats, resolved to midnight UTC.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%b. %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
];

/// `Month DD, YYYY` (month name first) embedded anywhere in the text.
static MONTH_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?,?\s+(\d{4})",
    )
    .unwrap()
});

/// `DD Month YYYY` (day first) embedded anywhere in the text.
static DAY_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?,?\s+(\d{4})")
        .unwrap()
});

/// ISO `YYYY-MM-DD` embedded anywhere in the text.
static ISO_EMBEDDED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").unwrap());

/// Parse a loosely-formatted date/time string into a UTC timestamp.
///
/// # Arguments
///
/// * `raw` - The text to parse; may be a clean timestamp or free-form text
///   containing a date somewhere inside it
///
/// # Returns
///
/// The parsed timestamp normalized to UTC, or `None` if no date could be
/// recovered.
pub fn parse_lenient(raw: &str) -> Option<DateTime<Utc>> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(naive.and_utc());
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            return midnight_utc(date);
        }
    }

    extract_embedded(text)
}

/// Pull the first recognizable date out of free-form text.
fn extract_embedded(text: &str) -> Option<DateTime<Utc>> {
    if let Some(caps) = MONTH_FIRST.captures(text) {
        let month = month_number(&caps[1])?;
        let day: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return midnight_utc(date);
        }
    }
    if let Some(caps) = DAY_FIRST.captures(text) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_number(&caps[2])?;
        let year: i32 = caps[3].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return midnight_utc(date);
        }
    }
    if let Some(caps) = ISO_EMBEDDED.captures(text) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return midnight_utc(date);
        }
    }
    None
}

/// Map a month name or abbreviation to its 1-based number.
pub fn month_number(token: &str) -> Option<u32> {
    let lower = token.to_lowercase();
    let key: String = lower.chars().take(3).collect();
    let n = match key.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(n)
}

fn midnight_utc(date: NaiveDate) -> Option<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc())
}
