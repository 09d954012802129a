//! Date and time helpers for connector payloads

use time::{format_description::BorrowedFormatItem, OffsetDateTime, PrimitiveDateTime};

/// Enum to represent date formats
#[derive(Debug, Clone, Copy)]
pub enum DateFormat {
    /// Format the date in 191105081132 format
    YYMMDDHHmmss,
}

/// Create a new [`PrimitiveDateTime`] with the current date and time in UTC.
pub fn now() -> PrimitiveDateTime {
    let utc_date_time = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(utc_date_time.date(), utc_date_time.time())
}

/// Milliseconds since the UNIX epoch, as sent in signed request headers
pub fn now_unix_timestamp_millis() -> i128 {
    OffsetDateTime::now_utc().unix_timestamp_nanos() / 1_000_000
}

/// Return the given date and time in UTC with the given format Eg: format: YYYYMMDDHHmmss Eg: 20191105081132
pub fn format_date(
    date: PrimitiveDateTime,
    format: DateFormat,
) -> Result<String, time::error::Format> {
    let format = <&[BorrowedFormatItem<'_>]>::from(format);
    date.format(&format)
}

impl From<DateFormat> for &[BorrowedFormatItem<'_>] {
    fn from(format: DateFormat) -> Self {
        match format {
            DateFormat::YYMMDDHHmmss => time::macros::format_description!("[year repr:last_two][month padding:zero repr:numerical][day padding:zero][hour padding:zero repr:24][minute padding:zero][second padding:zero]"),
        }
    }
}
