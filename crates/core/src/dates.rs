use chrono::{Datelike, NaiveDate, NaiveDateTime};
use tracing::warn;

use crate::error::DateParseError;

const SHORT_FORMAT: &str = "%d-%b-%y";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const DISPLAY_FORMAT: &str = "%B %-d, %Y";

pub fn try_convert_date(raw: &str) -> Result<String, DateParseError> {
    let trimmed = raw.trim();

    let date = parse_short(trimmed)
        .or_else(|| {
            NaiveDateTime::parse_from_str(trimmed, TIMESTAMP_FORMAT)
                .ok()
                .map(|value| value.date())
        })
        .ok_or_else(|| DateParseError {
            raw: raw.to_string(),
        })?;

    Ok(date.format(DISPLAY_FORMAT).to_string())
}

/// Two-digit years 69..=99 belong to the 1900s; chrono puts 69 in 2069.
fn parse_short(value: &str) -> Option<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, SHORT_FORMAT).ok()?;
    if date.year() == 2069 {
        date.with_year(1969)
    } else {
        Some(date)
    }
}

/// Returns the display form of `raw`, or `raw` itself when it matches neither
/// supported format. Callers treat unconverted values as opaque sort keys.
pub fn convert_date(raw: &str) -> String {
    convert_date_with(raw, |_| {})
}

/// Same as [`convert_date`], calling `on_unparsed` with the raw value when it
/// is passed through unconverted.
pub fn convert_date_with(raw: &str, on_unparsed: impl FnOnce(&str)) -> String {
    match try_convert_date(raw) {
        Ok(converted) => converted,
        Err(err) => {
            warn!(raw, error = %err, "date left unconverted");
            on_unparsed(raw);
            raw.to_string()
        }
    }
}
