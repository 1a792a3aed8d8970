//! Admin authorization.
//!
//! A single shared token guards every write. The credential may arrive as a
//! bearer header, an `Authorization` cookie or a `token` query parameter and
//! is resolved in that order.

mod credential;
mod error;
mod gate;

pub use credential::{AUTH_COOKIE, BEARER_PREFIX, Credential, CredentialSource, bearer_value};
pub use error::AuthError;
pub use gate::{AuthDecision, AuthGate, DEFAULT_ADMIN_USER};
