//! Wall-clock access. Domain code takes dates as arguments; only the route
//! layer reads the clock, through these helpers.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

/// The visitor's UTC offset. In the browser this is the page's time zone;
/// platforms that cannot report it count as UTC.
pub fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

/// Calendar date of `at` as seen at `offset`.
pub fn local_date(at: OffsetDateTime, offset: UtcOffset) -> Date {
    at.to_offset(offset).date()
}

/// Today's calendar date in the visitor's time zone. The daily reset turns
/// over at local midnight.
pub fn today() -> Date {
    local_date(now(), local_offset())
}

/// The current instant.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Format a date as the `YYYY-MM-DD` marker stored in `lastPlayDate`.
pub fn day_marker(date: Date) -> String {
    date.format(format_description!("[year]-[month]-[day]"))
        .unwrap_or_default()
}

/// Format an instant as RFC 3339, falling back to the Unix epoch.
pub fn timestamp(at: OffsetDateTime) -> String {
    at.format(&Rfc3339)
        .or_else(|_| OffsetDateTime::UNIX_EPOCH.format(&Rfc3339))
        .unwrap_or_default()
}
