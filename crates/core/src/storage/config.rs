//! Storage configuration types.

use std::path::PathBuf;

use clinic_shared::config::StorageSettings;
use serde::{Deserialize, Serialize};

/// Static S3 credentials.
#[derive(Clone, Serialize, Deserialize)]
pub struct S3Credentials {
    /// AWS access key ID.
    pub access_key_id: String,
    /// AWS secret access key.
    pub secret_access_key: String,
}

impl std::fmt::Debug for S3Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("S3Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// Storage provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StorageProvider {
    /// S3-compatible storage: AWS S3, Cloudflare R2, MinIO.
    ///
    /// Without static credentials OpenDAL falls back to the default AWS
    /// chain (environment, profile, instance metadata).
    S3 {
        /// S3 bucket name.
        bucket: String,
        /// AWS region.
        region: String,
        /// Endpoint URL; derived from the region when absent.
        endpoint: Option<String>,
        /// Static credentials, if configured.
        credentials: Option<S3Credentials>,
    },
    /// Local filesystem (development only)
    LocalFs {
        /// Root directory path.
        root: PathBuf,
    },
}

impl StorageProvider {
    /// Create S3-compatible provider.
    #[must_use]
    pub fn s3(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self::S3 {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
            credentials: None,
        }
    }

    /// Create local filesystem provider (development only).
    #[must_use]
    pub fn local_fs(root: impl Into<PathBuf>) -> Self {
        Self::LocalFs { root: root.into() }
    }

    /// Get the provider name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::S3 { .. } => "s3",
            Self::LocalFs { .. } => "local",
        }
    }

    /// Get the bucket name, or the root directory for local storage.
    #[must_use]
    pub fn bucket(&self) -> &str {
        match self {
            Self::S3 { bucket, .. } => bucket,
            Self::LocalFs { root } => root.to_str().unwrap_or("local"),
        }
    }

    /// Endpoint used for S3 requests and presigned URLs.
    #[must_use]
    pub fn endpoint(&self) -> Option<String> {
        match self {
            Self::S3 {
                endpoint: Some(endpoint),
                ..
            } => Some(endpoint.clone()),
            Self::S3 { region, .. } => Some(format!("https://s3.{region}.amazonaws.com")),
            Self::LocalFs { .. } => None,
        }
    }
}

/// Storage service configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Storage provider configuration.
    pub provider: StorageProvider,
    /// Presigned read URL TTL in seconds (default: 604800 = 7 days).
    pub presign_ttl_secs: u64,
    /// `Cache-Control` written with every object.
    pub cache_control: String,
}

impl StorageConfig {
    /// Default read URL TTL: 7 days.
    pub const DEFAULT_PRESIGN_TTL: u64 = 604_800;
    /// One year, public. Keys are never reused so objects never go stale.
    pub const PHOTO_CACHE_CONTROL: &'static str = "max-age=31536000, public";

    /// Create a new storage config with default settings.
    #[must_use]
    pub fn new(provider: StorageProvider) -> Self {
        Self {
            provider,
            presign_ttl_secs: Self::DEFAULT_PRESIGN_TTL,
            cache_control: Self::PHOTO_CACHE_CONTROL.to_string(),
        }
    }

    /// Build from application settings.
    ///
    /// Returns `None` when neither a bucket nor a local root is configured.
    #[must_use]
    pub fn from_settings(settings: &StorageSettings) -> Option<Self> {
        let provider = if let Some(root) = &settings.local_root {
            StorageProvider::local_fs(root.clone())
        } else {
            let bucket = settings.bucket.as_ref()?;
            StorageProvider::S3 {
                bucket: bucket.clone(),
                region: settings.region.clone(),
                endpoint: settings.endpoint.clone(),
                credentials: static_credentials(settings),
            }
        };

        Some(Self::new(provider).with_presign_ttl(settings.photo_url_ttl_secs))
    }

    /// Set presigned read URL TTL.
    #[must_use]
    pub fn with_presign_ttl(mut self, secs: u64) -> Self {
        self.presign_ttl_secs = secs;
        self
    }
}

/// Both halves must be set for static credentials to apply.
fn static_credentials(settings: &StorageSettings) -> Option<S3Credentials> {
    match (&settings.access_key_id, &settings.secret_access_key) {
        (Some(access_key_id), Some(secret_access_key)) => Some(S3Credentials {
            access_key_id: access_key_id.clone(),
            secret_access_key: secret_access_key.clone(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> StorageSettings {
        StorageSettings {
            region: "eu-north-1".to_string(),
            bucket: None,
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            local_root: None,
            photo_url_ttl_secs: 3600,
        }
    }

    #[test]
    fn test_storage_provider_s3() {
        let provider = StorageProvider::s3("clinic-photos", "eu-north-1");
        assert_eq!(provider.name(), "s3");
        assert_eq!(provider.bucket(), "clinic-photos");
        assert_eq!(
            provider.endpoint().as_deref(),
            Some("https://s3.eu-north-1.amazonaws.com")
        );
    }

    #[test]
    fn test_storage_provider_custom_endpoint() {
        let provider = StorageProvider::S3 {
            bucket: "photos".into(),
            region: "auto".into(),
            endpoint: Some("http://localhost:9000".into()),
            credentials: None,
        };
        assert_eq!(provider.endpoint().as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_storage_provider_local() {
        let provider = StorageProvider::local_fs("./storage");
        assert_eq!(provider.name(), "local");
        assert!(provider.endpoint().is_none());
    }

    #[test]
    fn test_storage_config_defaults() {
        let config = StorageConfig::new(StorageProvider::local_fs("./storage"));
        assert_eq!(config.presign_ttl_secs, 604_800);
        assert_eq!(config.cache_control, "max-age=31536000, public");
    }

    #[test]
    fn test_from_settings_unconfigured() {
        assert!(StorageConfig::from_settings(&settings()).is_none());
    }

    #[test]
    fn test_from_settings_bucket() {
        let mut s = settings();
        s.bucket = Some("clinic-photos".into());
        let config = StorageConfig::from_settings(&s).expect("configured");
        assert_eq!(config.provider.name(), "s3");
        assert_eq!(config.presign_ttl_secs, 3600);
    }

    #[test]
    fn test_from_settings_static_credentials() {
        let mut s = settings();
        s.bucket = Some("clinic-photos".into());
        s.access_key_id = Some("AKIDEXAMPLE".into());

        // Half a key pair is ignored
        let config = StorageConfig::from_settings(&s).expect("configured");
        assert!(matches!(config.provider, StorageProvider::S3 { credentials: None, .. }));

        s.secret_access_key = Some("wJalrXUtnFEMI".into());
        let config = StorageConfig::from_settings(&s).expect("configured");
        let StorageProvider::S3 {
            credentials: Some(credentials),
            ..
        } = &config.provider
        else {
            panic!("expected static credentials");
        };
        assert_eq!(credentials.access_key_id, "AKIDEXAMPLE");
        assert!(!format!("{credentials:?}").contains("wJalrXUtnFEMI"));
    }

    #[test]
    fn test_from_settings_local_root_wins() {
        let mut s = settings();
        s.bucket = Some("clinic-photos".into());
        s.local_root = Some(PathBuf::from("./photos"));
        let config = StorageConfig::from_settings(&s).expect("configured");
        assert_eq!(config.provider.name(), "local");
    }
}
