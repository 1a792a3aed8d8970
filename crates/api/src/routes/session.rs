//! Admin session routes: who-am-i, cookie login and logout.

use axum::{
    Json, Router,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    routing::{get, post},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    AppState,
    error::ApiError,
    extractors::JsonBody,
    middleware::RequestCredential,
};
use clinic_core::auth::{AUTH_COOKIE, Credential, bearer_value};

/// Lifetime of the login cookie.
pub const SESSION_COOKIE_DAYS: i64 = 7;

/// Creates the session routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(me))
        .route("/login", post(login))
        .route("/login/token", get(login_with_token))
        .route("/logout", get(logout))
}

/// Response for `/me`.
#[derive(Debug, Serialize)]
pub struct MeResponse {
    /// Whether the caller holds the admin token.
    pub is_admin: bool,
    /// Admin user name when `is_admin`.
    pub user: Option<String>,
}

/// Request body for `/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Admin email.
    pub email: String,
    /// Admin password.
    pub password: String,
}

/// Query for `/login/token`.
#[derive(Debug, Deserialize)]
pub struct TokenLoginQuery {
    /// Admin token.
    #[serde(default)]
    pub token: Option<String>,
}

/// Build the `Authorization` cookie carrying the admin token.
pub fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, bearer_value(token)))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::days(SESSION_COOKIE_DAYS))
        .build()
}

/// Build an expired, empty `Authorization` cookie that clears the session.
pub fn cleared_session_cookie() -> Cookie<'static> {
    Cookie::build((AUTH_COOKIE, ""))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(time::Duration::ZERO)
        .build()
}

/// GET `/me`
async fn me(
    State(state): State<AppState>,
    RequestCredential(credential): RequestCredential,
) -> Json<MeResponse> {
    let decision = state.auth.authorize(&credential);
    Json(MeResponse {
        is_admin: decision.is_admin,
        user: decision
            .is_admin
            .then(|| state.auth.admin_user().to_string()),
    })
}

/// POST `/login`
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    JsonBody(payload): JsonBody<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    match state.auth.login(&payload.email, &payload.password) {
        Ok(token) => {
            info!("Admin logged in");
            Ok((jar.add(session_cookie(token)), Json(json!({ "ok": true }))))
        }
        Err(e) => {
            warn!(error = %e, "Admin login failed");
            Err(e.into())
        }
    }
}

/// GET `/login/token?token=...`
///
/// Puts the token in URLs and access logs; kept for quick console access.
async fn login_with_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<TokenLoginQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let credential = Credential::extract(None, None, query.token.as_deref());
    state.auth.require_admin(&credential)?;

    info!("Admin logged in with token link");
    Ok((
        jar.add(session_cookie(credential.as_str())),
        Redirect::to("/console"),
    ))
}

/// GET `/logout`
///
/// Always sends the clearing cookie, whether or not the request carried one.
async fn logout(jar: CookieJar) -> impl IntoResponse {
    (jar.add(cleared_session_cookie()), Redirect::to("/login"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookie = session_cookie("tok");
        let rendered = cookie.encoded().to_string();
        assert!(rendered.starts_with("Authorization=Bearer%20tok"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=604800"));
    }

    #[test]
    fn test_cleared_session_cookie_attributes() {
        let cookie = cleared_session_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));

        let rendered = cookie.encoded().to_string();
        assert!(rendered.starts_with("Authorization=;"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("Secure"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=0"));
    }
}
