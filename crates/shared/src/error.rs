//! Application-wide error types.

use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Application error types.
///
/// The `Display` output is the short message returned to clients in the
/// `{"error": ...}` body, so it never carries internal detail.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad or missing fields, bad extension, empty or undecodable upload.
    #[error("{0}")]
    InvalidInput(String),

    /// Credential does not match the configured admin token.
    #[error("unauthorized")]
    Unauthorized,

    /// Login email/password mismatch.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Unknown entity id.
    #[error("{0}")]
    NotFound(String),

    /// Request body exceeds the transport limit.
    #[error("file too large")]
    PayloadTooLarge,

    /// Required server configuration (admin token, storage bucket) is missing.
    #[error("{0}")]
    ServerMisconfigured(String),

    /// Object store read or write failed.
    #[error("storage unavailable")]
    StorageUnavailable(String),

    /// Database error.
    #[error("internal error")]
    Database(String),

    /// Internal server error.
    #[error("internal error")]
    Internal(String),
}

impl AppError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Creates a server misconfiguration error.
    #[must_use]
    pub fn misconfigured(msg: impl Into<String>) -> Self {
        Self::ServerMisconfigured(msg.into())
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::Unauthorized | Self::InvalidCredentials => 401,
            Self::NotFound(_) => 404,
            Self::PayloadTooLarge => 413,
            Self::ServerMisconfigured(_)
            | Self::StorageUnavailable(_)
            | Self::Database(_)
            | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code used in logs.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::PayloadTooLarge => "PAYLOAD_TOO_LARGE",
            Self::ServerMisconfigured(_) => "SERVER_MISCONFIGURED",
            Self::StorageUnavailable(_) => "STORAGE_UNAVAILABLE",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns internal detail that must stay out of responses, if any.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::StorageUnavailable(d) | Self::Database(d) | Self::Internal(d) => Some(d),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::InvalidInput(String::new()), 400)]
    #[case(AppError::Unauthorized, 401)]
    #[case(AppError::InvalidCredentials, 401)]
    #[case(AppError::NotFound(String::new()), 404)]
    #[case(AppError::PayloadTooLarge, 413)]
    #[case(AppError::ServerMisconfigured(String::new()), 500)]
    #[case(AppError::StorageUnavailable(String::new()), 500)]
    #[case(AppError::Database(String::new()), 500)]
    #[case(AppError::Internal(String::new()), 500)]
    fn test_error_status_codes(#[case] error: AppError, #[case] status: u16) {
        assert_eq!(error.status_code(), status);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(AppError::Unauthorized.error_code(), "UNAUTHORIZED");
        assert_eq!(
            AppError::ServerMisconfigured(String::new()).error_code(),
            "SERVER_MISCONFIGURED"
        );
        assert_eq!(
            AppError::StorageUnavailable(String::new()).error_code(),
            "STORAGE_UNAVAILABLE"
        );
    }

    #[test]
    fn test_error_display_is_client_message() {
        assert_eq!(AppError::Unauthorized.to_string(), "unauthorized");
        assert_eq!(
            AppError::misconfigured("admin token not configured").to_string(),
            "admin token not configured"
        );
        assert_eq!(
            AppError::not_found("Doctor not found").to_string(),
            "Doctor not found"
        );
        assert_eq!(AppError::InvalidCredentials.to_string(), "invalid credentials");
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let err = AppError::Database("relation \"patients\" does not exist".into());
        assert_eq!(err.to_string(), "internal error");
        assert_eq!(err.detail(), Some("relation \"patients\" does not exist"));
        assert_eq!(AppError::Unauthorized.detail(), None);
    }
}
