//! Presentation helpers: asset URLs, rupiah amounts and Indonesian dates.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime};

const MONTHS_LONG: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

const MONTHS_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Resolve an asset URL returned by the backend against the API base URL.
///
/// Absolute URLs (`http:`, `https:`, protocol-relative, `data:`, `blob:`)
/// are returned untouched. Anything else is treated as a path on the API
/// host and joined with exactly one slash.
#[must_use]
pub fn asset_url(base: &str, url: &str) -> String {
    let url = url.trim();
    if url.is_empty() {
        return String::new();
    }
    if is_absolute_url(url) {
        return url.to_owned();
    }
    let base = base.trim().trim_end_matches('/');
    let path = url.trim_start_matches('/');
    format!("{base}/{path}")
}

fn is_absolute_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    ["http://", "https://", "//", "data:", "blob:"]
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

/// Format a whole-rupiah amount the way `id-ID` currency formatting does
/// with no fraction digits: `150000` becomes `Rp150.000`.
#[must_use]
pub fn format_idr(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0 { "-" } else { "" };
    format!("{sign}Rp{grouped}")
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339 (`2026-10-18T07:30:00.000000Z`), the SQL style
/// `2026-10-18 07:30:00` and a bare `2026-10-18`; the last two are taken
/// as UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts);
    }
    let sql = format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");
    if let Ok(ts) = PrimitiveDateTime::parse(raw, &sql) {
        return Some(ts.assume_utc());
    }
    let date_only = format_description!("[year]-[month]-[day]");
    Date::parse(raw, &date_only)
        .ok()
        .map(|date| date.midnight().assume_utc())
}

/// `18 Oktober 2026`
#[must_use]
pub fn format_date(ts: OffsetDateTime) -> String {
    let month = MONTHS_LONG[usize::from(u8::from(ts.month())) - 1];
    format!("{} {} {}", ts.day(), month, ts.year())
}

/// `18 Okt 2026 07:05`
#[must_use]
pub fn format_datetime(ts: OffsetDateTime) -> String {
    let month = MONTHS_SHORT[usize::from(u8::from(ts.month())) - 1];
    format!(
        "{} {} {} {:02}:{:02}",
        ts.day(),
        month,
        ts.year(),
        ts.hour(),
        ts.minute()
    )
}
