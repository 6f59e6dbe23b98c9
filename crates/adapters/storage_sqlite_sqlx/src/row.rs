//! Column codecs shared by the repositories.
//!
//! Timestamps are stored as RFC 3339 text and structured values as JSON
//! text, so the schema stays readable with the `sqlite3` shell.

use serde::de::DeserializeOwned;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use pagekit_domain::time::Timestamp;

fn decode_error<E>(err: E) -> sqlx::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

pub(crate) fn timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    chrono::DateTime::parse_from_rfc3339(&raw)
        .map(|dt| dt.to_utc())
        .map_err(decode_error)
}

pub(crate) fn json<T: DeserializeOwned>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    serde_json::from_str(&raw).map_err(decode_error)
}

pub(crate) fn encode_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339()
}
