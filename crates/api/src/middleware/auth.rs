//! Admin token middleware for protected routes.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Query, Request, State},
    http::{HeaderMap, Uri, header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use serde::Deserialize;
use tracing::debug;

use crate::{AppState, error::ApiError};
use clinic_core::auth::{AUTH_COOKIE, Credential};

#[derive(Debug, Deserialize)]
struct TokenQuery {
    token: Option<String>,
}

/// Pull the credential out of headers, cookies and query, in that order.
#[must_use]
pub fn credential_from_request(headers: &HeaderMap, uri: &Uri) -> Credential {
    let header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
    let jar = CookieJar::from_headers(headers);
    let cookie = jar.get(AUTH_COOKIE).map(|c| c.value().to_string());
    let query = Query::<TokenQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(q)| q.token);

    Credential::extract(header, cookie.as_deref(), query.as_deref())
}

/// Middleware that only lets the admin through.
///
/// Responds 500 when no admin token is configured and 401 on a mismatch.
pub async fn require_admin(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let credential = credential_from_request(request.headers(), request.uri());

    match state.auth.require_admin(&credential) {
        Ok(()) => {
            debug!(source = ?credential.source(), "admin request");
            next.run(request).await
        }
        Err(e) => ApiError::from(e).into_response(),
    }
}

/// Extractor for the caller's credential, whatever it is.
///
/// Never rejects; a request without a credential yields an empty one.
#[derive(Debug, Clone)]
pub struct RequestCredential(pub Credential);

impl<S> FromRequestParts<S> for RequestCredential
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(credential_from_request(&parts.headers, &parts.uri)))
    }
}
