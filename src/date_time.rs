//! Text formats for the local date-times attached to transactions.
//!
//! Two formats are in play:
//! - the wire format, ISO-8601 without an offset, e.g. `2025-01-29T15:43:30`,
//! - the storage format used by SQLite's `datetime()`, e.g. `2025-01-29 15:43:30`.
//!
//! Both are fixed width with the most significant field first, so comparing the
//! text of two dates gives the same answer as comparing the dates.

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use time::{
    PrimitiveDateTime,
    format_description::BorrowedFormatItem,
    macros::format_description,
};

use crate::Error;

/// The format used to store dates in the database.
pub const STORAGE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// The formats accepted in query parameters.
///
/// Seconds may be omitted and fractional seconds are accepted but dropped.
const QUERY_FORMAT: &[BorrowedFormatItem<'static>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);

/// The format used for dates in JSON bodies.
pub const WIRE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Serde functions for writing dates in the [WIRE_FORMAT].
///
/// Use with `#[serde(with = "crate::date_time::iso_local")]`.
pub mod iso_local {
    use serde::{Deserialize, Deserializer, Serializer};
    use time::PrimitiveDateTime;

    use super::WIRE_FORMAT;

    /// Serialize `date_time` as an ISO-8601 local date-time string.
    pub fn serialize<S>(date_time: &PrimitiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let text = date_time
            .format(WIRE_FORMAT)
            .map_err(serde::ser::Error::custom)?;

        serializer.serialize_str(&text)
    }

    /// Deserialize an ISO-8601 local date-time string.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<PrimitiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;

        PrimitiveDateTime::parse(&text, WIRE_FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Parse a date-time from a query parameter such as `2025-01-29T15:43:30`.
///
/// The result is truncated to whole seconds to match the precision of stored dates.
///
/// # Errors
/// Returns [Error::InvalidDateTime] if `text` is not an ISO-8601 local date-time.
pub fn parse_query_date_time(text: &str) -> Result<PrimitiveDateTime, Error> {
    let date_time = PrimitiveDateTime::parse(text.trim(), QUERY_FORMAT)
        .map_err(|error| Error::InvalidDateTime(format!("\"{text}\": {error}")))?;

    date_time
        .replace_nanosecond(0)
        .map_err(|error| Error::InvalidDateTime(error.to_string()))
}

/// Parse an optional query parameter, treating an empty string as absent.
///
/// # Errors
/// Returns [Error::InvalidDateTime] if `text` is present but not an ISO-8601 local date-time.
pub fn parse_optional_query_date_time(
    text: Option<&str>,
) -> Result<Option<PrimitiveDateTime>, Error> {
    match text.map(str::trim) {
        None | Some("") => Ok(None),
        Some(text) => parse_query_date_time(text).map(Some),
    }
}

/// A date-time as it is written to and read from the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StoredDateTime(pub PrimitiveDateTime);

impl ToSql for StoredDateTime {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        let text = self
            .0
            .format(STORAGE_FORMAT)
            .map_err(|error| rusqlite::Error::ToSqlConversionFailure(Box::new(error)))?;

        Ok(ToSqlOutput::from(text))
    }
}

impl FromSql for StoredDateTime {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        PrimitiveDateTime::parse(text, STORAGE_FORMAT)
            .map(StoredDateTime)
            .map_err(|error| FromSqlError::Other(Box::new(error)))
    }
}
