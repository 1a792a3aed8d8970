//! Photo upload pipeline.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::PhotoError;
use super::types::{PhotoCategory, validate_extension};
use crate::imaging::{self, OUTPUT_EXTENSION};
use crate::storage::{PhotoStore, StorageError};

/// Repository trait for photo references on patient and doctor records.
///
/// This trait is implemented by the db crate.
pub trait PhotoRepository: Send + Sync {
    /// Check whether an entity exists.
    fn exists(
        &self,
        category: PhotoCategory,
        id: i32,
    ) -> impl std::future::Future<Output = Result<bool, PhotoError>> + Send;

    /// Overwrite the stored photo key of an entity.
    fn set_photo_key(
        &self,
        category: PhotoCategory,
        id: i32,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), PhotoError>> + Send;
}

/// Validates, normalizes, stores and records entity photos.
pub struct PhotoService<R: PhotoRepository> {
    store: PhotoStore,
    repo: Arc<R>,
}

impl<R: PhotoRepository> PhotoService<R> {
    /// Create a new photo service.
    #[must_use]
    pub fn new(store: PhotoStore, repo: Arc<R>) -> Self {
        Self { store, repo }
    }

    /// Upload a photo for an entity and return the stored key.
    ///
    /// Checks run in a fixed order: extension, entity existence, empty
    /// payload, store configuration. Nothing is written unless all pass.
    /// The object write and the record update are not atomic; an object
    /// whose record update fails is logged and left in place.
    ///
    /// # Errors
    ///
    /// See [`PhotoError`] for the failure cases in check order.
    pub async fn upload_photo(
        &self,
        category: PhotoCategory,
        id: i32,
        bytes: Bytes,
        filename: &str,
    ) -> Result<String, PhotoError> {
        validate_extension(filename)?;

        if !self.repo.exists(category, id).await? {
            return Err(PhotoError::EntityNotFound(category));
        }

        if bytes.is_empty() {
            return Err(PhotoError::EmptyFile);
        }

        if !self.store.is_configured() {
            return Err(StorageError::NotConfigured.into());
        }

        let received = bytes.len();
        let format = imaging::sniff_format(&bytes).unwrap_or("unknown");
        let normalized = tokio::task::spawn_blocking(move || imaging::normalize(&bytes))
            .await
            .map_err(|e| PhotoError::Task(e.to_string()))??;
        debug!(
            %category,
            id,
            format,
            received,
            stored = normalized.bytes.len(),
            width = normalized.width,
            height = normalized.height,
            "photo normalized"
        );

        let key = Self::generate_key(category, id);
        let content_type = normalized.content_type();
        self.store.put(&key, normalized.bytes, content_type).await?;

        if let Err(e) = self.repo.set_photo_key(category, id, &key).await {
            warn!(
                %category,
                id,
                key = %key,
                error = %e,
                "photo stored but record update failed; object orphaned"
            );
            return Err(e);
        }

        Ok(key)
    }

    /// Generate a fresh object key: `{category}/{id}/photo-{uuid}.jpg`.
    #[must_use]
    pub fn generate_key(category: PhotoCategory, id: i32) -> String {
        format!(
            "{}/{}/photo-{}.{}",
            category.prefix(),
            id,
            Uuid::new_v4().simple(),
            OUTPUT_EXTENSION
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryObjectStore;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::collections::HashMap;
    use std::io::Cursor;
    use std::sync::Mutex;

    /// Mock repository for testing.
    #[derive(Default)]
    struct MockPhotoRepository {
        keys: Mutex<HashMap<(PhotoCategory, i32), Option<String>>>,
        fail_updates: bool,
    }

    impl MockPhotoRepository {
        fn with_entity(category: PhotoCategory, id: i32) -> Self {
            let repo = Self::default();
            repo.keys.lock().unwrap().insert((category, id), None);
            repo
        }

        fn key(&self, category: PhotoCategory, id: i32) -> Option<String> {
            self.keys.lock().unwrap().get(&(category, id)).cloned().flatten()
        }
    }

    impl PhotoRepository for MockPhotoRepository {
        async fn exists(&self, category: PhotoCategory, id: i32) -> Result<bool, PhotoError> {
            Ok(self.keys.lock().unwrap().contains_key(&(category, id)))
        }

        async fn set_photo_key(
            &self,
            category: PhotoCategory,
            id: i32,
            key: &str,
        ) -> Result<(), PhotoError> {
            if self.fail_updates {
                return Err(PhotoError::repository("update failed"));
            }
            self.keys
                .lock()
                .unwrap()
                .insert((category, id), Some(key.to_string()));
            Ok(())
        }
    }

    fn png(width: u32, height: u32) -> Bytes {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(width, height))
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        Bytes::from(buf.into_inner())
    }

    fn service(
        repo: MockPhotoRepository,
    ) -> (PhotoService<MockPhotoRepository>, Arc<MemoryObjectStore>) {
        let backend = Arc::new(MemoryObjectStore::new());
        let store = PhotoStore::new(backend.clone(), 604_800);
        (PhotoService::new(store, Arc::new(repo)), backend)
    }

    #[tokio::test]
    async fn test_large_png_upload() {
        let (service, backend) = service(MockPhotoRepository::with_entity(PhotoCategory::Patients, 5));

        let key = service
            .upload_photo(PhotoCategory::Patients, 5, png(2000, 3000), "portrait.png")
            .await
            .expect("upload");

        assert!(key.starts_with("patients/5/photo-"));
        assert!(key.ends_with(".jpg"));
        assert_eq!(service.repo.key(PhotoCategory::Patients, 5), Some(key.clone()));

        let stored = backend.object(&key).expect("object stored");
        assert_eq!(stored.content_type, "image/jpeg");
        let img = image::load_from_memory(&stored.bytes).unwrap();
        assert_eq!(img.width().max(img.height()), 1024);
    }

    #[tokio::test]
    async fn test_bad_extension_writes_nothing() {
        let (service, backend) = service(MockPhotoRepository::with_entity(PhotoCategory::Doctors, 1));

        let err = service
            .upload_photo(PhotoCategory::Doctors, 1, png(10, 10), "photo.gif")
            .await
            .unwrap_err();

        assert!(matches!(err, PhotoError::InvalidExtension));
        assert_eq!(backend.write_count(), 0);
        assert_eq!(service.repo.key(PhotoCategory::Doctors, 1), None);
    }

    #[tokio::test]
    async fn test_missing_entity() {
        let (service, backend) = service(MockPhotoRepository::default());

        let err = service
            .upload_photo(PhotoCategory::Doctors, 999, png(10, 10), "a.png")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Doctor not found");
        assert_eq!(backend.write_count(), 0);
    }

    #[tokio::test]
    async fn test_extension_checked_before_entity() {
        let (service, _) = service(MockPhotoRepository::default());
        let err = service
            .upload_photo(PhotoCategory::Patients, 999, png(10, 10), "a.bmp")
            .await
            .unwrap_err();
        assert!(matches!(err, PhotoError::InvalidExtension));
    }

    #[tokio::test]
    async fn test_empty_file() {
        let (service, backend) = service(MockPhotoRepository::with_entity(PhotoCategory::Patients, 2));
        let err = service
            .upload_photo(PhotoCategory::Patients, 2, Bytes::new(), "a.png")
            .await
            .unwrap_err();
        assert!(matches!(err, PhotoError::EmptyFile));
        assert_eq!(backend.write_count(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_image() {
        let (service, backend) = service(MockPhotoRepository::with_entity(PhotoCategory::Patients, 2));
        let err = service
            .upload_photo(
                PhotoCategory::Patients,
                2,
                Bytes::from_static(b"not really a png"),
                "a.png",
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "unsupported or corrupt image");
        assert_eq!(backend.write_count(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_store() {
        let service = PhotoService::new(
            PhotoStore::unconfigured(),
            Arc::new(MockPhotoRepository::with_entity(PhotoCategory::Doctors, 3)),
        );
        let err = service
            .upload_photo(PhotoCategory::Doctors, 3, png(10, 10), "a.jpg")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "storage bucket not configured");
    }

    #[tokio::test]
    async fn test_store_failure_leaves_record_untouched() {
        let (service, backend) = service(MockPhotoRepository::with_entity(PhotoCategory::Doctors, 4));
        backend.fail_writes();

        let err = service
            .upload_photo(PhotoCategory::Doctors, 4, png(10, 10), "a.webp")
            .await
            .unwrap_err();

        let app: clinic_shared::AppError = err.into();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.to_string(), "storage unavailable");
        assert_eq!(service.repo.key(PhotoCategory::Doctors, 4), None);
    }

    #[tokio::test]
    async fn test_record_failure_orphans_object() {
        let mut repo = MockPhotoRepository::with_entity(PhotoCategory::Patients, 6);
        repo.fail_updates = true;
        let (service, backend) = service(repo);

        let err = service
            .upload_photo(PhotoCategory::Patients, 6, png(10, 10), "a.png")
            .await
            .unwrap_err();

        assert!(matches!(err, PhotoError::Repository(_)));
        assert_eq!(backend.keys().len(), 1);
    }

    #[tokio::test]
    async fn test_reupload_overwrites_key() {
        let (service, backend) = service(MockPhotoRepository::with_entity(PhotoCategory::Patients, 7));

        let first = service
            .upload_photo(PhotoCategory::Patients, 7, png(10, 10), "a.png")
            .await
            .unwrap();
        let second = service
            .upload_photo(PhotoCategory::Patients, 7, png(12, 12), "b.png")
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(service.repo.key(PhotoCategory::Patients, 7), Some(second));
        assert_eq!(backend.keys().len(), 2);
    }

    #[test]
    fn test_generate_key_format() {
        let key = PhotoService::<MockPhotoRepository>::generate_key(PhotoCategory::Doctors, 42);
        let suffix = key
            .strip_prefix("doctors/42/photo-")
            .and_then(|rest| rest.strip_suffix(".jpg"))
            .expect("key layout");
        assert_eq!(suffix.len(), 32);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
