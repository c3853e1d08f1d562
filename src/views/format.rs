//! Display formatting shared by the dashboard views.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub const CURRENCY: &str = "€";
pub const NOT_AVAILABLE: &str = "N/A";

const DISPLAY_DATETIME: &str = "%d/%m/%Y, %H:%M:%S";
const DISPLAY_DATE: &str = "%d/%m/%Y";

/// `5.0` -> `€5.00`. Always two decimals.
pub fn currency(amount: f64) -> String {
    format!("{CURRENCY}{amount:.2}")
}

pub fn optional_currency(amount: Option<f64>) -> String {
    amount.map(currency).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Keeps the first `cap` characters and appends `...` only when something was cut.
pub fn truncate(text: &str, cap: usize) -> String {
    match text.char_indices().nth(cap) {
        Some((byte_idx, _)) => format!("{}...", &text[..byte_idx]),
        None => text.to_string(),
    }
}

fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_local());
    }
    // the monitor writes naive `isoformat()` timestamps
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Day-first date and time; unparseable input is shown as-is.
pub fn timestamp(raw: &str) -> String {
    match parse_datetime(raw) {
        Some(dt) => dt.format(DISPLAY_DATETIME).to_string(),
        None => raw.to_string(),
    }
}

pub fn date(raw: &str) -> String {
    match parse_datetime(raw) {
        Some(dt) => dt.format(DISPLAY_DATE).to_string(),
        None => raw.to_string(),
    }
}
