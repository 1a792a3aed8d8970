//! Clinic directory server.
//!
//! Main entry point for the clinic directory service.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_api::{AppState, PageRenderer, create_router};
use clinic_core::auth::AuthGate;
use clinic_core::storage::{PhotoStore, StorageConfig, StorageService};
use clinic_db::{connect, migrate};
use clinic_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clinic=debug,clinic_api=debug,clinic_core=debug,clinic_db=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().context("Failed to load configuration")?;

    // Connect to database and bring the schema up to date
    let db = connect(&config.database.url, config.database.max_connections).await?;
    migrate(&db).await.context("Failed to run migrations")?;
    info!(max_connections = config.database.max_connections, "Connected to database");

    // Object store; uploads fail with a configuration error when absent
    let photos = match StorageConfig::from_settings(&config.storage) {
        Some(storage_config) => {
            let service = StorageService::from_config(storage_config)
                .context("Failed to initialize object storage")?;
            info!(
                provider = service.config().provider.name(),
                bucket = service.bucket(),
                "Object storage configured"
            );
            let ttl = service.config().presign_ttl_secs;
            PhotoStore::new(Arc::new(service), ttl)
        }
        None => {
            warn!("S3_BUCKET not set; photo uploads are disabled");
            PhotoStore::unconfigured()
        }
    };

    let auth = AuthGate::from_config(&config.admin);
    if !auth.is_configured() {
        warn!("ADMIN_TOKEN not set; admin routes will answer 500");
    }

    let pages = PageRenderer::new().context("Failed to compile page templates")?;

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        auth: Arc::new(auth),
        photos,
        branding: Arc::new(config.branding.clone()),
        pages: Arc::new(pages),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
