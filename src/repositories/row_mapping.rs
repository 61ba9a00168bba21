// src/repositories/row_mapping.rs
//
// Column conversions shared by the SQLite repositories.
//
// Columns are always read by name so the SELECT list order never matters.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use rusqlite::Row;

use crate::domain::Genre;

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Build a Genre from the `idgenre` and `name` columns of a row
pub(crate) fn genre_from_row(row: &Row) -> rusqlite::Result<Genre> {
    Ok(Genre {
        id: row.get("idgenre")?,
        name: row.get("name")?,
    })
}

/// Calendar date as stored in a DATETIME column
///
/// Written as `YYYY-MM-DD`. Read back from:
/// - `YYYY-MM-DD`
/// - `YYYY-MM-DD HH:MM:SS[.fff]` (or with a `T` separator), time dropped
/// - an integer of epoch milliseconds, as JDBC SQLite drivers store dates.
///   Those drivers write local midnight, so the instant is converted to the
///   local timezone before the date is taken.
///
/// NULL is rejected with `InvalidType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct SqlDate(pub NaiveDate);

impl SqlDate {
    fn parse(text: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(text, DATE_FORMAT).ok().or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
                .map(|datetime| datetime.date())
        })
    }
}

impl FromSql for SqlDate {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Text(bytes) => {
                let text =
                    std::str::from_utf8(bytes).map_err(|e| FromSqlError::Other(Box::new(e)))?;
                Self::parse(text.trim()).map(SqlDate).ok_or_else(|| {
                    FromSqlError::Other(format!("Invalid release date '{}'", text).into())
                })
            }
            ValueRef::Integer(millis) => DateTime::from_timestamp_millis(millis)
                .map(|datetime| SqlDate(datetime.with_timezone(&Local).date_naive()))
                .ok_or(FromSqlError::OutOfRange(millis)),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

impl ToSql for SqlDate {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.0.format(DATE_FORMAT).to_string()))
    }
}
