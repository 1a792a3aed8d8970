//! Request middleware.

pub mod auth;

pub use auth::{RequestCredential, require_admin};
