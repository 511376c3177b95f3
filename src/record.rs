//! The uniform record shape fed into the aggregator and the date parsing
//! rules for record timestamps.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

/// Anything with a timestamp and a money value that can be charted.
///
/// Sales contribute their total amount and expenses their amount; the
/// aggregator only ever sees the normalised [TimestampedAmount].
pub trait Entry {
    /// The ISO-8601 timestamp of the entry, as sent by the backend.
    fn date(&self) -> &str;

    /// The money value of the entry.
    fn amount(&self) -> f64;
}

/// A money value at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct TimestampedAmount {
    /// An ISO-8601 date or date-time string.
    pub date: String,
    /// The value to sum. Negative and non-finite values are summed as-is.
    pub amount: f64,
}

impl TimestampedAmount {
    /// Create a new record.
    pub fn new(date: impl Into<String>, amount: f64) -> Self {
        Self {
            date: date.into(),
            amount,
        }
    }

    /// Copy the timestamp and value out of `entry`.
    pub fn from_entry(entry: &impl Entry) -> Self {
        Self::new(entry.date(), entry.amount())
    }
}

impl Entry for TimestampedAmount {
    fn date(&self) -> &str {
        &self.date
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Normalise a list of sales or expenses for aggregation.
pub fn normalize<E: Entry>(entries: &[E]) -> Vec<TimestampedAmount> {
    entries.iter().map(TimestampedAmount::from_entry).collect()
}

const LOCAL_DATE_TIME_FORMATS: [&[BorrowedFormatItem<'static>]; 3] = [
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    format_description!("[year]-[month]-[day]T[hour]:[minute]"),
];

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses a record timestamp.
///
/// - RFC 3339 strings with an offset or `Z` are taken as-is.
/// - Date-times without an offset are in local time, given by `local_offset`.
/// - Plain dates (`YYYY-MM-DD`) are midnight UTC.
///
/// Returns `None` for anything else.
pub fn parse_record_date(text: &str, local_offset: UtcOffset) -> Option<OffsetDateTime> {
    let text = text.trim();

    if let Ok(date_time) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(date_time);
    }

    for format in LOCAL_DATE_TIME_FORMATS {
        if let Ok(date_time) = PrimitiveDateTime::parse(text, format) {
            return Some(date_time.assume_offset(local_offset));
        }
    }

    Date::parse(text, DATE_FORMAT)
        .ok()
        .map(|date| date.midnight().assume_utc())
}
