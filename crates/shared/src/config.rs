//! Application configuration management.
//!
//! Configuration is read once at process start and never mutated afterwards.
//! Sources, lowest priority first: `config/default.toml`,
//! `config/{RUN_MODE}.toml`, then the process environment. Keys are flat and
//! match the environment variable names (`S3_BUCKET` -> `s3_bucket`).

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// Object storage configuration.
    pub storage: StorageSettings,
    /// Admin credentials.
    pub admin: AdminConfig,
    /// Display names used by the HTML pages.
    pub branding: BrandingConfig,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

/// Database configuration.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    pub max_connections: u32,
}

/// Object storage settings.
///
/// The store is unconfigured when neither `bucket` nor `local_root` is set.
#[derive(Clone)]
pub struct StorageSettings {
    /// S3 region.
    pub region: String,
    /// S3 bucket name.
    pub bucket: Option<String>,
    /// Custom S3-compatible endpoint.
    pub endpoint: Option<String>,
    /// Static S3 access key id; the AWS default chain is used when unset.
    pub access_key_id: Option<String>,
    /// Static S3 secret access key.
    pub secret_access_key: Option<String>,
    /// Local filesystem root; takes precedence over S3 when set.
    pub local_root: Option<PathBuf>,
    /// Lifetime of presigned photo URLs in seconds.
    pub photo_url_ttl_secs: u64,
}

impl std::fmt::Debug for StorageSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageSettings")
            .field("region", &self.region)
            .field("bucket", &self.bucket)
            .field("endpoint", &self.endpoint)
            .field("access_key_id", &self.access_key_id)
            .field(
                "secret_access_key",
                &self.secret_access_key.as_ref().map(|_| "<redacted>"),
            )
            .field("local_root", &self.local_root)
            .field("photo_url_ttl_secs", &self.photo_url_ttl_secs)
            .finish()
    }
}

/// Admin credentials.
#[derive(Clone, Default)]
pub struct AdminConfig {
    /// Shared admin bearer token.
    pub token: Option<String>,
    /// Admin login email.
    pub email: Option<String>,
    /// Admin login password.
    pub password: Option<String>,
}

impl std::fmt::Debug for AdminConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Branding shown on the public site and the console.
#[derive(Debug, Clone)]
pub struct BrandingConfig {
    /// Clinic name on the public site.
    pub clinic_name: String,
    /// Title of the admin console.
    pub console_title: String,
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            clinic_name: default_clinic_name(),
            console_title: default_console_title(),
        }
    }
}

/// Flat view of the configuration sources.
#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_database_url")]
    database_url: String,
    #[serde(default = "default_max_connections")]
    database_max_connections: u32,
    #[serde(default = "default_region")]
    aws_region: String,
    s3_bucket: Option<String>,
    s3_endpoint: Option<String>,
    aws_access_key_id: Option<String>,
    aws_secret_access_key: Option<String>,
    storage_local_root: Option<PathBuf>,
    #[serde(default = "default_photo_url_ttl")]
    photo_url_ttl_seconds: u64,
    admin_token: Option<String>,
    admin_email: Option<String>,
    admin_password: Option<String>,
    #[serde(default = "default_clinic_name")]
    clinic_name: String,
    #[serde(default = "default_console_title")]
    console_title: String,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_database_url() -> String {
    "sqlite://hospital.sqlite3?mode=rwc".to_string()
}

fn default_max_connections() -> u32 {
    10
}

fn default_region() -> String {
    "eu-north-1".to_string()
}

fn default_photo_url_ttl() -> u64 {
    604_800 // 7 days
}

fn default_clinic_name() -> String {
    "City Clinic".to_string()
}

fn default_console_title() -> String {
    "Hospital Console".to_string()
}

/// Treats blank strings as absent.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        Self {
            server: ServerConfig {
                host: raw.host,
                port: raw.port,
            },
            database: DatabaseConfig {
                url: raw.database_url,
                max_connections: raw.database_max_connections,
            },
            storage: StorageSettings {
                region: raw.aws_region,
                bucket: non_blank(raw.s3_bucket),
                endpoint: non_blank(raw.s3_endpoint),
                access_key_id: non_blank(raw.aws_access_key_id),
                secret_access_key: non_blank(raw.aws_secret_access_key),
                local_root: raw
                    .storage_local_root
                    .filter(|p| !p.as_os_str().is_empty()),
                photo_url_ttl_secs: raw.photo_url_ttl_seconds,
            },
            admin: AdminConfig {
                token: non_blank(raw.admin_token),
                email: non_blank(raw.admin_email),
                password: non_blank(raw.admin_password),
            },
            branding: BrandingConfig {
                clinic_name: raw.clinic_name,
                console_title: raw.console_title,
            },
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::default().ignore_empty(true))
            .build()?;

        config.try_deserialize::<RawConfig>().map(Self::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: [&str; 11] = [
        "PORT",
        "S3_BUCKET",
        "AWS_REGION",
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
        "PHOTO_URL_TTL_SECONDS",
        "ADMIN_TOKEN",
        "ADMIN_EMAIL",
        "ADMIN_PASSWORD",
        "DATABASE_URL",
        "STORAGE_LOCAL_ROOT",
    ];

    fn env_with(
        overrides: &[(&'static str, &'static str)],
    ) -> Vec<(&'static str, Option<&'static str>)> {
        VARS.iter()
            .map(|name| {
                let value = overrides
                    .iter()
                    .find(|(key, _)| key == name)
                    .map(|(_, value)| *value);
                (*name, value)
            })
            .collect()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        temp_env::with_vars(env_with(&[]), || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.server.port, 8000);
            assert_eq!(config.storage.region, "eu-north-1");
            assert_eq!(config.storage.photo_url_ttl_secs, 604_800);
            assert!(config.storage.bucket.is_none());
            assert!(config.admin.token.is_none());
            assert!(config.database.url.starts_with("sqlite://"));
        });
    }

    #[test]
    fn test_environment_overrides() {
        let vars = env_with(&[
            ("PORT", "9090"),
            ("S3_BUCKET", "clinic-photos"),
            ("AWS_REGION", "us-east-1"),
            ("PHOTO_URL_TTL_SECONDS", "3600"),
            ("ADMIN_TOKEN", "s3cret"),
        ]);
        temp_env::with_vars(vars, || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.storage.bucket.as_deref(), Some("clinic-photos"));
            assert_eq!(config.storage.region, "us-east-1");
            assert_eq!(config.storage.photo_url_ttl_secs, 3600);
            assert_eq!(config.admin.token.as_deref(), Some("s3cret"));
        });
    }

    #[test]
    fn test_blank_values_count_as_unset() {
        let vars = env_with(&[("ADMIN_TOKEN", "   "), ("S3_BUCKET", "")]);
        temp_env::with_vars(vars, || {
            let config = AppConfig::load().expect("config should load");
            assert!(config.admin.token.is_none());
            assert!(config.storage.bucket.is_none());
        });
    }

    #[test]
    fn test_static_s3_credentials() {
        let vars = env_with(&[
            ("S3_BUCKET", "clinic-photos"),
            ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "wJalrXUtnFEMI"),
        ]);
        temp_env::with_vars(vars, || {
            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.storage.access_key_id.as_deref(), Some("AKIDEXAMPLE"));
            assert_eq!(
                config.storage.secret_access_key.as_deref(),
                Some("wJalrXUtnFEMI")
            );

            let rendered = format!("{:?}", config.storage);
            assert!(rendered.contains("AKIDEXAMPLE"));
            assert!(!rendered.contains("wJalrXUtnFEMI"));
        });
    }

    #[test]
    fn test_admin_debug_redacts_secrets() {
        let admin = AdminConfig {
            token: Some("tok".into()),
            email: Some("admin@clinic.test".into()),
            password: Some("pw".into()),
        };
        let rendered = format!("{admin:?}");
        assert!(!rendered.contains("\"tok\""));
        assert!(!rendered.contains("\"pw\""));
        assert!(rendered.contains("admin@clinic.test"));
    }
}
