//! Photo upload pipeline for patients and doctors.
//!
//! Upload flow:
//! 1. Validate filename extension
//! 2. Confirm the entity exists
//! 3. Normalize on the blocking pool
//! 4. Write to the object store under a fresh key
//! 5. Record the key on the entity

mod error;
mod service;
mod types;

pub use error::PhotoError;
pub use service::{PhotoRepository, PhotoService};
pub use types::{ALLOWED_EXTENSIONS, PhotoCategory, file_extension, validate_extension};
