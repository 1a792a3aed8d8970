//! JSON error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::{error, warn};

use clinic_shared::AppError;

/// Handler error rendered as `{"error": "<message>"}`.
///
/// Anything convertible into [`AppError`] converts into this, so handlers can
/// use `?` on core, db and storage results alike.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl<E> From<E> for ApiError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            error!(
                code = self.0.error_code(),
                detail = self.0.detail().unwrap_or_default(),
                "{}",
                self.0
            );
        } else if status == StatusCode::UNAUTHORIZED {
            warn!(code = self.0.error_code(), "rejected request");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn render(err: AppError) -> (StatusCode, serde_json::Value) {
        let response = ApiError(err).into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_client_error_body() {
        let (status, body) = render(AppError::not_found("Doctor not found")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Doctor not found" }));
    }

    #[tokio::test]
    async fn test_internal_detail_is_hidden() {
        let (status, body) = render(AppError::Database("no such table: patients".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "internal error" }));
    }
}
