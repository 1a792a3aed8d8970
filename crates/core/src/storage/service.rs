//! Storage service implementation using Apache OpenDAL.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use opendal::{Operator, services};
use tracing::debug;

use super::config::{StorageConfig, StorageProvider};
use super::error::StorageError;
use super::store::ObjectStore;

/// OpenDAL-backed object store.
pub struct StorageService {
    operator: Operator,
    config: StorageConfig,
}

impl StorageService {
    /// Create a new storage service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage provider cannot be initialized.
    pub fn from_config(config: StorageConfig) -> Result<Self, StorageError> {
        let operator = Self::create_operator(&config.provider)?;
        Ok(Self { operator, config })
    }

    /// Create OpenDAL operator from provider config.
    fn create_operator(provider: &StorageProvider) -> Result<Operator, StorageError> {
        match provider {
            StorageProvider::S3 {
                bucket,
                region,
                credentials,
                ..
            } => {
                let endpoint = provider
                    .endpoint()
                    .ok_or_else(|| StorageError::configuration("missing S3 endpoint"))?;
                let mut builder = services::S3::default()
                    .bucket(bucket)
                    .region(region)
                    .endpoint(&endpoint);
                if let Some(credentials) = credentials {
                    builder = builder
                        .access_key_id(&credentials.access_key_id)
                        .secret_access_key(&credentials.secret_access_key);
                }

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
            StorageProvider::LocalFs { root } => {
                let builder = services::Fs::default().root(
                    root.to_str()
                        .ok_or_else(|| StorageError::configuration("invalid path"))?,
                );

                Ok(Operator::new(builder)
                    .map_err(|e| StorageError::configuration(e.to_string()))?
                    .finish())
            }
        }
    }

    /// Get the bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        self.config.provider.bucket()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}

#[async_trait]
impl ObjectStore for StorageService {
    async fn put(&self, key: &str, bytes: Bytes, content_type: &str) -> Result<(), StorageError> {
        self.operator
            .write_with(key, bytes)
            .content_type(content_type)
            .cache_control(&self.config.cache_control)
            .await
            .map(|_| ())
            .map_err(StorageError::from)
    }

    async fn presign(&self, key: &str, ttl: Duration) -> Result<Option<String>, StorageError> {
        if key.is_empty() {
            return Ok(None);
        }

        match self.operator.presign_read(key, ttl).await {
            Ok(presigned) => Ok(Some(presigned.uri().to_string())),
            Err(e) => match StorageError::from(e) {
                StorageError::PresignNotSupported => {
                    debug!(provider = self.provider_name(), "presign not supported");
                    Ok(None)
                }
                other => Err(other),
            },
        }
    }

    fn provider_name(&self) -> &'static str {
        self.config.provider.name()
    }
}
