//! Admin authorization against the configured shared token.

use serde::Serialize;
use subtle::ConstantTimeEq;

use clinic_shared::config::AdminConfig;

use super::credential::Credential;
use super::error::AuthError;

/// Fallback user name reported when no admin email is configured.
pub const DEFAULT_ADMIN_USER: &str = "admin";

/// Outcome of [`AuthGate::authorize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AuthDecision {
    /// Whether the credential is the admin token.
    pub is_admin: bool,
}

/// Immutable admin gate built once at startup.
#[derive(Clone, Default)]
pub struct AuthGate {
    token: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl AuthGate {
    /// Create a gate from the admin settings. Blank values count as unset.
    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        fn present(value: Option<&String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty()).cloned()
        }

        Self {
            token: present(config.token.as_ref()),
            email: present(config.email.as_ref()),
            password: present(config.password.as_ref()),
        }
    }

    /// Whether an admin token is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.token.is_some()
    }

    /// Decide whether `credential` is the admin token.
    ///
    /// Never admin when no token is configured.
    #[must_use]
    pub fn authorize(&self, credential: &Credential) -> AuthDecision {
        let is_admin = self
            .token
            .as_deref()
            .is_some_and(|token| token_matches(token, credential.as_str()));
        AuthDecision { is_admin }
    }

    /// Fail unless `credential` is the admin token.
    ///
    /// # Errors
    ///
    /// [`AuthError::TokenNotConfigured`] when no token is set, otherwise
    /// [`AuthError::Unauthorized`] on mismatch.
    pub fn require_admin(&self, credential: &Credential) -> Result<(), AuthError> {
        let token = self.token.as_deref().ok_or(AuthError::TokenNotConfigured)?;
        if token_matches(token, credential.as_str()) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized)
        }
    }

    /// Check email and password, returning the token to set as a cookie.
    ///
    /// The email comparison ignores case and surrounding whitespace; the
    /// password must match exactly.
    ///
    /// # Errors
    ///
    /// Fails with a configuration error when the token, email or password
    /// is unset, and with [`AuthError::InvalidCredentials`] on mismatch.
    pub fn login(&self, email: &str, password: &str) -> Result<&str, AuthError> {
        let token = self.token.as_deref().ok_or(AuthError::TokenNotConfigured)?;
        let (Some(admin_email), Some(admin_password)) =
            (self.email.as_deref(), self.password.as_deref())
        else {
            return Err(AuthError::LoginNotConfigured);
        };

        let email_ok = email.trim().to_lowercase() == admin_email.trim().to_lowercase();
        let password_ok = bool::from(password.as_bytes().ct_eq(admin_password.as_bytes()));
        if email_ok && password_ok {
            Ok(token)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    /// User name reported to an authenticated admin.
    #[must_use]
    pub fn admin_user(&self) -> &str {
        self.email.as_deref().unwrap_or(DEFAULT_ADMIN_USER)
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("token_configured", &self.token.is_some())
            .field("email", &self.email)
            .field("password_configured", &self.password.is_some())
            .finish()
    }
}

/// Exact byte equality in constant time for equal lengths.
fn token_matches(expected: &str, candidate: &str) -> bool {
    !expected.is_empty() && bool::from(expected.as_bytes().ct_eq(candidate.as_bytes()))
}
