//! Time handling for logger timestamps
//!
//! Field loggers record wall-clock time with no offset. The offset comes from
//! the location the gauging was taken at.

use crate::app::models::LocationInfo;
use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

/// Attach the location's UTC offset to a local logger timestamp
pub fn localize(local: NaiveDateTime, location: &LocationInfo) -> Result<DateTime<FixedOffset>> {
    let offset = location.utc_offset().ok_or_else(|| {
        Error::data_validation(format!(
            "UTC offset {} h of location {} is out of range",
            location.utc_offset_hours, location.identifier
        ))
    })?;

    offset.from_local_datetime(&local).single().ok_or_else(|| {
        Error::data_validation(format!(
            "Local time {} cannot be expressed at offset {}",
            local, offset
        ))
    })
}

/// Midpoint between two times, in the offset of `start`
pub fn midpoint(start: DateTime<FixedOffset>, end: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    start + (end - start) / 2
}
