//! In-memory object store for tests.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use super::error::StorageError;
use super::store::ObjectStore;

/// An object held by [`MemoryObjectStore`].
#[derive(Debug, Clone)]
pub struct StoredObject {
    /// Object body.
    pub bytes: Bytes,
    /// Content type given on write.
    pub content_type: String,
}

/// Object store kept in a `HashMap`.
///
/// Presigned URLs have the form `memory://{key}?expires_in={secs}`.
#[derive(Debug, Default)]
pub struct MemoryObjectStore {
    objects: Mutex<HashMap<String, StoredObject>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryObjectStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `put` fail.
    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Number of `put` calls, successful or not.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Fetch a stored object.
    pub fn object(&self, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Keys currently stored.
    pub fn keys(&self) -> Vec<String> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Follow a presigned URL back to the object body.
    pub fn resolve(&self, url: &str) -> Option<Bytes> {
        let rest = url.strip_prefix("memory://")?;
        let key = rest.split_once('?').map_or(rest, |(key, _)| key);
        self.object(key).map(|o| o.bytes)
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::operation("simulated write failure"));
        }

        self.objects.lock().unwrap_or_else(PoisonError::into_inner).insert(
            key.to_string(),
            StoredObject {
                bytes,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }

    async fn presign(&self, key: &str, ttl: Duration) -> Result<Option<String>, StorageError> {
        if key.is_empty() {
            return Ok(None);
        }
        Ok(Some(format!("memory://{key}?expires_in={}", ttl.as_secs())))
    }

    fn provider_name(&self) -> &'static str {
        "memory"
    }
}
