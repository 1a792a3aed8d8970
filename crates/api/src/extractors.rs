//! Request extractors.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;
use clinic_shared::AppError;

/// `Json` whose rejections become `{"error": ...}` bodies with status 400
/// (or 413 when the body is over the limit).
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError(json_rejection(&rejection))),
        }
    }
}

fn json_rejection(rejection: &JsonRejection) -> AppError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge;
    }
    match rejection {
        JsonRejection::JsonDataError(e) => AppError::invalid_input(e.body_text()),
        JsonRejection::MissingJsonContentType(_) => {
            AppError::invalid_input("expected application/json body")
        }
        _ => AppError::invalid_input("invalid JSON body"),
    }
}

/// Trim a required text field, rejecting blanks.
///
/// # Errors
///
/// Returns `InvalidInput("{field} required")` for a blank value.
pub fn required_text(value: &str, field: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError(AppError::invalid_input(format!("{field} required"))));
    }
    Ok(trimmed.to_string())
}

/// Trim an optional text field; blanks become `None`.
#[must_use]
pub fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
