//! Cart Snapshots
//!
//! The serialised form of a cart, shared by every persistence tier. Current
//! payloads are a versioned envelope:
//!
//! ```json
//! { "version": 1, "items": [ { "product": {}, "quantity": 2, "selectedSize": "m", "selectedColor": "red" } ] }
//! ```
//!
//! Payloads written before the envelope existed are a bare array of line
//! items; they still decode.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{cart::Cart, items::LineItem};

/// Schema version written by this build.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors raised while encoding or decoding a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The payload is not a cart snapshot.
    #[error("malformed cart snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The payload was written by a newer schema.
    #[error("unsupported cart snapshot version {0}")]
    UnsupportedVersion(u32),
}

/// Versioned snapshot envelope.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    items: T,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AnySnapshot {
    Versioned(Envelope<Vec<LineItem>>),
    Legacy(Vec<LineItem>),
}

/// Encode a cart as a JSON string.
///
/// # Errors
///
/// Returns a `SnapshotError` if serialisation fails.
pub fn encode(cart: &Cart) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(&envelope(cart))?)
}

/// Encode a cart as a JSON value.
///
/// # Errors
///
/// Returns a `SnapshotError` if serialisation fails.
pub fn to_value(cart: &Cart) -> Result<Value, SnapshotError> {
    Ok(serde_json::to_value(envelope(cart))?)
}

/// Decode a cart from a JSON string.
///
/// # Errors
///
/// Returns a `SnapshotError` if the payload is malformed or too new.
pub fn decode(raw: &str) -> Result<Cart, SnapshotError> {
    from_snapshot(serde_json::from_str(raw)?)
}

/// Decode a cart from a JSON value.
///
/// # Errors
///
/// Returns a `SnapshotError` if the payload is malformed or too new.
pub fn from_value(value: Value) -> Result<Cart, SnapshotError> {
    from_snapshot(serde_json::from_value(value)?)
}

fn envelope(cart: &Cart) -> Envelope<&[LineItem]> {
    Envelope {
        version: SNAPSHOT_VERSION,
        items: cart.items(),
    }
}

fn from_snapshot(snapshot: AnySnapshot) -> Result<Cart, SnapshotError> {
    match snapshot {
        AnySnapshot::Versioned(Envelope { version, items }) if version <= SNAPSHOT_VERSION => {
            Ok(Cart::from_items(items))
        }
        AnySnapshot::Versioned(Envelope { version, .. }) => {
            Err(SnapshotError::UnsupportedVersion(version))
        }
        AnySnapshot::Legacy(items) => Ok(Cart::from_items(items)),
    }
}
