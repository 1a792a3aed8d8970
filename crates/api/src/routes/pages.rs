//! Server-rendered HTML pages.

use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use tera::Context;

use super::doctors::{DoctorResponse, load_doctors};
use crate::{AppState, error::ApiError, middleware::RequestCredential, render::PageRenderer};
use clinic_core::auth::AuthError;
use clinic_shared::error::AppError;

/// Creates the page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/console", get(console))
        .route("/site", get(site))
        .route("/login", get(login_page))
}

/// GET `/`
async fn index() -> Redirect {
    Redirect::to("/site")
}

/// GET `/console`
///
/// Browsers without the admin cookie are sent to the login page.
async fn console(
    State(state): State<AppState>,
    RequestCredential(credential): RequestCredential,
) -> Response {
    match state.auth.require_admin(&credential) {
        Ok(()) => titled_page(&state, "console.html").into_response(),
        Err(AuthError::Unauthorized) => Redirect::to("/login").into_response(),
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// GET `/login`
async fn login_page(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    titled_page(&state, "login.html")
}

/// GET `/site`
async fn site(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let doctors = load_doctors(&state).await?;
    let html = render_site(&state.pages, &state.branding.clinic_name, &doctors)?;
    Ok(Html(html))
}

fn titled_page(state: &AppState, template: &str) -> Result<Html<String>, ApiError> {
    let mut context = Context::new();
    context.insert("console_title", &state.branding.console_title);
    Ok(Html(state.pages.render(template, &context)?))
}

fn render_site(
    pages: &PageRenderer,
    clinic_name: &str,
    doctors: &[DoctorResponse],
) -> Result<String, AppError> {
    let mut context = Context::new();
    context.insert("clinic_name", clinic_name);
    context.insert("doctors", doctors);
    pages.render("site.html", &context)
}
