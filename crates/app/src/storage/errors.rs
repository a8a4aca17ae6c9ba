//! Storage errors.

use std::io;

use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;
use vitrina::snapshot::SnapshotError;

/// Failures of the remote and local persistence tiers.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The remote tier is not configured or cannot be reached.
    #[error("remote storage unavailable")]
    Unavailable,

    /// A record for the same key already exists.
    #[error("record already exists")]
    AlreadyExists,

    #[error("record not found")]
    NotFound,

    #[error("storage error")]
    Sql(#[source] Error),

    #[error("local storage error")]
    Io(#[from] io::Error),

    #[error("invalid cart snapshot")]
    Snapshot(#[from] SnapshotError),
}

impl From<Error> for StorageError {
    fn from(error: Error) -> Self {
        if matches!(error, Error::RowNotFound) {
            return Self::NotFound;
        }

        match error.as_database_error().map(DatabaseError::kind) {
            Some(ErrorKind::UniqueViolation) => Self::AlreadyExists,
            Some(_) | None => match error {
                Error::Io(_) | Error::PoolTimedOut | Error::PoolClosed => Self::Unavailable,
                other => Self::Sql(other),
            },
        }
    }
}
