//! Resolves canonical timezone names into UTC offsets.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Gets the UTC offset of `canonical_timezone` (e.g., "America/Sao_Paulo") at
/// the instant `at`, or `None` if the name is unknown.
///
/// The offset depends on `at` because of daylight saving time.
pub fn get_local_offset(canonical_timezone: &str, at: OffsetDateTime) -> Option<UtcOffset> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&at).to_utc())
}

/// Same as [get_local_offset], but returns [Error::InvalidTimezone] for
/// unknown timezone names.
pub fn resolve_local_offset(
    canonical_timezone: &str,
    at: OffsetDateTime,
) -> Result<UtcOffset, Error> {
    get_local_offset(canonical_timezone, at)
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}
