//! Route definitions.

use axum::{Router, middleware};

use crate::{AppState, middleware::require_admin};

pub mod appointments;
pub mod doctors;
pub mod health;
pub mod pages;
pub mod patients;
pub mod photos;
pub mod session;

mod presign;

/// Creates the application router with public and admin routes.
#[allow(clippy::needless_pass_by_value)]
pub fn app_routes(state: AppState) -> Router<AppState> {
    // Writes require the admin token. `route_layer` keeps the gate off
    // unmatched methods so they still answer 405.
    let protected_routes = Router::new()
        .merge(patients::protected_routes())
        .merge(doctors::protected_routes())
        .merge(appointments::protected_routes())
        .merge(photos::routes())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .merge(health::routes())
        .merge(session::routes())
        .merge(patients::routes())
        .merge(doctors::routes())
        .merge(appointments::routes())
        .merge(pages::routes())
        .merge(protected_routes)
}
