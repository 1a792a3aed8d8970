//! Auth gate error types.

use thiserror::Error;

use clinic_shared::AppError;

/// Auth gate errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// No admin token configured; every gated operation fails closed.
    #[error("admin token not configured")]
    TokenNotConfigured,

    /// Login is missing the admin email or password.
    #[error("admin login not configured")]
    LoginNotConfigured,

    /// Credential does not match the admin token.
    #[error("unauthorized")]
    Unauthorized,

    /// Email or password mismatch.
    #[error("invalid credentials")]
    InvalidCredentials,
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::TokenNotConfigured | AuthError::LoginNotConfigured => {
                Self::misconfigured(err.to_string())
            }
            AuthError::Unauthorized => Self::Unauthorized,
            AuthError::InvalidCredentials => Self::InvalidCredentials,
        }
    }
}
