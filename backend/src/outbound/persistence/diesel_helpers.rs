//! Shared error mapping for the Diesel repositories.
//!
//! Each repository port error implements [`StorageError`] so pool and Diesel
//! failures funnel through one classification. Constraint violations that
//! carry domain meaning (unique subject, unknown user) are matched by the
//! repositories before falling back to [`map_diesel_error`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{
    AlertPreferenceRepositoryError, CommentsRepositoryError, FavoritesRepositoryError,
    UserPersistenceError,
};

use super::pool::PoolError;

/// Port errors that distinguish connectivity from query failures.
pub(crate) trait StorageError: Sized {
    fn from_connection(message: String) -> Self;
    fn from_query(message: String) -> Self;
}

macro_rules! impl_storage_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl StorageError for $error {
                fn from_connection(message: String) -> Self {
                    Self::connection(message)
                }

                fn from_query(message: String) -> Self {
                    Self::query(message)
                }
            }
        )*
    };
}

impl_storage_error!(
    UserPersistenceError,
    FavoritesRepositoryError,
    AlertPreferenceRepositoryError,
    CommentsRepositoryError,
);

pub(crate) fn map_pool_error<E: StorageError>(error: PoolError) -> E {
    E::from_connection(error.into_message())
}

pub(crate) fn map_diesel_error<E: StorageError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => E::from_query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::from_query("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::from_connection("database connection error".to_owned())
        }
        _ => E::from_query("database error".to_owned()),
    }
}

/// Whether `error` is a unique constraint violation.
pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}

/// Whether `error` is a foreign key violation, which for user state tables
/// means the owning user row is gone.
pub(crate) fn is_foreign_key_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _)
    )
}
