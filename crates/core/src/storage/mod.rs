//! Object storage for entity photos using Apache OpenDAL.
//!
//! This module provides vendor-agnostic object storage with support for:
//! - S3-compatible: AWS S3, Cloudflare R2, MinIO
//! - Local filesystem (development only)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         PhotoStore                               │
//! │          (None when no bucket is configured)                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │ put(key, bytes, type)      │ presign(Some(key)) -> Option<URL>  │
//! ├─────────────────────────────────────────────────────────────────┤
//! │              dyn ObjectStore  ->  StorageService (OpenDAL)       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
#[cfg(any(test, feature = "testing"))]
mod memory;
mod service;
mod store;

pub use config::{S3Credentials, StorageConfig, StorageProvider};
pub use error::StorageError;
#[cfg(any(test, feature = "testing"))]
pub use memory::{MemoryObjectStore, StoredObject};
pub use service::StorageService;
pub use store::{ObjectStore, PhotoStore};
