//! Lenient decoding of JSON list columns.
//!
//! Older rows store lists either as JSON arrays or as strings holding a JSON
//! array. Both are accepted; anything unreadable decodes as an empty list.

use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::{Row, postgres::PgRow, types::Json};
use tracing::warn;

/// Decode a list stored as a JSON array or as a string holding one.
pub fn json_list<T: DeserializeOwned>(value: Option<Value>) -> Vec<T> {
    let decoded = match value {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::String(raw)) => serde_json::from_str(&raw),
        Some(value) => serde_json::from_value(value),
    };

    decoded.unwrap_or_else(|error| {
        warn!(%error, "discarding unreadable list");
        Vec::new()
    })
}

/// Read `column` from `row` with [`json_list`].
///
/// # Errors
///
/// Returns an error only when the column is missing or is not `jsonb`.
pub fn json_list_column<T>(row: &PgRow, column: &str) -> sqlx::Result<Vec<T>>
where
    T: DeserializeOwned,
{
    let value = row
        .try_get::<Option<Json<Value>>, _>(column)?
        .map(|Json(value)| value);

    Ok(json_list(value))
}
