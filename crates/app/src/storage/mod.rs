//! Remote and local persistence tiers

mod errors;
mod lenient;
mod local;

pub use errors::StorageError;
pub use lenient::*;
pub use local::*;

/// Remote tier stand-in used when no database is configured.
///
/// Every call fails with [`StorageError::Unavailable`], so stores fall back
/// to the device-local copy.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;
