//! Photo upload error types.

use thiserror::Error;

use clinic_shared::AppError;

use super::types::PhotoCategory;
use crate::imaging::NormalizeError;
use crate::storage::StorageError;

/// Photo upload errors.
#[derive(Debug, Error)]
pub enum PhotoError {
    /// Filename extension outside the accepted set.
    #[error("allowed: jpg,jpeg,png,webp")]
    InvalidExtension,

    /// No entity with that id.
    #[error("{}", .0.not_found_message())]
    EntityNotFound(PhotoCategory),

    /// Zero-length upload.
    #[error("empty file")]
    EmptyFile,

    /// Decode or encode failure.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// Object store failure or missing configuration.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Repository operation failed.
    #[error("repository error: {0}")]
    Repository(String),

    /// Blocking task panicked or was cancelled.
    #[error("normalize task failed: {0}")]
    Task(String),
}

impl PhotoError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        match err {
            PhotoError::InvalidExtension | PhotoError::EmptyFile => {
                Self::invalid_input(err.to_string())
            }
            PhotoError::EntityNotFound(category) => {
                Self::not_found(category.not_found_message())
            }
            PhotoError::Normalize(e) => e.into(),
            PhotoError::Storage(e) => e.into(),
            PhotoError::Repository(msg) => Self::Database(msg),
            PhotoError::Task(msg) => Self::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_mapping() {
        let err: AppError = PhotoError::InvalidExtension.into();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.to_string(), "allowed: jpg,jpeg,png,webp");

        let err: AppError = PhotoError::EntityNotFound(PhotoCategory::Patients).into();
        assert_eq!(err.status_code(), 404);
        assert_eq!(err.to_string(), "Patient not found");

        let err: AppError = PhotoError::Storage(StorageError::NotConfigured).into();
        assert_eq!(err.status_code(), 500);
        assert_eq!(err.to_string(), "storage bucket not configured");

        let err: AppError = PhotoError::repository("disk full").into();
        assert_eq!(err.to_string(), "internal error");
    }
}
