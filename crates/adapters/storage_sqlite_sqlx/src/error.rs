//! Storage-specific error type wrapping sqlx errors.

use sqlx::sqlite::SqliteQueryResult;

use pagekit_domain::error::{NotFoundError, PageKitError, ValidationError};
use pagekit_domain::resource::Resource;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to serialize or deserialize a stored JSON value.
    #[error("JSON serialization error")]
    Json(#[from] serde_json::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for PageKitError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Map a failed write, turning a foreign-key violation on `field` into a
/// validation error instead of a storage fault.
pub(crate) fn reference_error(field: &'static str) -> impl Fn(sqlx::Error) -> PageKitError {
    move |err| match &err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            ValidationError::UnknownReference(field).into()
        }
        _ => StorageError::from(err).into(),
    }
}

/// Return `record` if the `UPDATE` reached its row, `NotFound` if the row
/// was deleted in the meantime.
pub(crate) fn updated<R: Resource>(
    result: &SqliteQueryResult,
    record: R,
) -> Result<R, PageKitError> {
    if result.rows_affected() == 0 {
        return Err(NotFoundError::new(R::NAME, record.id()).into());
    }
    Ok(record)
}
