//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - JSON routes for patients, doctors and appointments
//! - Multipart photo upload routes
//! - Admin token middleware and cookie login
//! - Server-rendered console, site and login pages

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod render;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::header::{AUTHORIZATION, COOKIE, SET_COOKIE};
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::sensitive_headers::SetSensitiveHeadersLayer;
use tower_http::trace::TraceLayer;

use clinic_core::auth::AuthGate;
use clinic_core::storage::PhotoStore;
use clinic_shared::config::BrandingConfig;

pub use error::ApiError;
pub use render::PageRenderer;

/// Largest accepted request body.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: Arc<DatabaseConnection>,
    /// Admin token gate.
    pub auth: Arc<AuthGate>,
    /// Photo object store (possibly unconfigured).
    pub photos: PhotoStore,
    /// Names shown on the HTML pages.
    pub branding: Arc<BrandingConfig>,
    /// Compiled page templates.
    pub pages: Arc<PageRenderer>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(routes::app_routes(state.clone()))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(TraceLayer::new_for_http())
        // Keep the admin token out of traces
        .layer(SetSensitiveHeadersLayer::new([AUTHORIZATION, COOKIE, SET_COOKIE]))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
