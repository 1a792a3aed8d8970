//! Object store abstraction and the request-facing photo store handle.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use super::error::StorageError;

/// Binary object store.
///
/// Implemented by [`super::StorageService`] for real backends.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Write an object in a single request. No retries.
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StorageError>;

    /// Generate a read URL valid for `ttl`.
    ///
    /// Returns `None` for an empty key or when the backend cannot presign.
    async fn presign(&self, key: &str, ttl: Duration) -> Result<Option<String>, StorageError>;

    /// Provider name for logs.
    fn provider_name(&self) -> &'static str;
}

/// Handle to the configured object store, if any.
///
/// Cheap to clone; shared by every request.
#[derive(Clone)]
pub struct PhotoStore {
    store: Option<Arc<dyn ObjectStore>>,
    url_ttl: Duration,
}

impl PhotoStore {
    /// Wrap a configured store.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, url_ttl_secs: u64) -> Self {
        Self {
            store: Some(store),
            url_ttl: Duration::from_secs(url_ttl_secs),
        }
    }

    /// A store that is not configured: writes fail, URLs resolve to `None`.
    #[must_use]
    pub fn unconfigured() -> Self {
        Self {
            store: None,
            url_ttl: Duration::ZERO,
        }
    }

    /// Whether a backend is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.store.is_some()
    }

    /// Write an object.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotConfigured`] without a backend, otherwise
    /// whatever the backend reports.
    pub async fn put(
        &self,
        key: &str,
        bytes: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let store = self.store.as_ref().ok_or(StorageError::NotConfigured)?;
        store.put(key, bytes, content_type).await
    }

    /// Resolve a photo reference into a time-limited URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend fails to sign.
    pub async fn presign(&self, key: Option<&str>) -> Result<Option<String>, StorageError> {
        let (Some(store), Some(key)) = (&self.store, key.filter(|k| !k.is_empty())) else {
            return Ok(None);
        };
        store.presign(key, self.url_ttl).await
    }
}

impl std::fmt::Debug for PhotoStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoStore")
            .field(
                "provider",
                &self.store.as_ref().map(|s| s.provider_name()),
            )
            .field("url_ttl", &self.url_ttl)
            .finish()
    }
}
