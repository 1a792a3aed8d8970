//! Repository error types.

use sea_orm::DbErr;
use thiserror::Error;

use clinic_shared::AppError;

/// Repository errors.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// A referenced row does not exist.
    #[error("{0}")]
    NotFound(&'static str),

    /// Database operation failed.
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::not_found(msg),
            RepositoryError::Database(e) => Self::Database(e.to_string()),
        }
    }
}
