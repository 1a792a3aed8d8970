//! Photo upload routes for patients and doctors.
//!
//! Both accept `multipart/form-data` with an `id` field and a `file` field.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::IntoResponse,
    routing::post,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::info;

use super::presign::photo_url;
use crate::{AppState, error::ApiError};
use clinic_core::photo::{PhotoCategory, PhotoService};
use clinic_db::EntityPhotoRepository;
use clinic_shared::AppError;

const MISSING_FIELDS: &str = "id and file required";

/// Creates the photo upload routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/patients/photo", post(upload_patient_photo))
        .route("/doctors/photo", post(upload_doctor_photo))
}

/// Response for a stored photo.
#[derive(Debug, Serialize)]
pub struct PhotoUploadResponse {
    /// Entity ID.
    pub id: i32,
    /// Time-limited URL of the new photo.
    pub photo_url: Option<String>,
}

/// Parsed multipart form.
#[derive(Debug, Default)]
struct PhotoForm {
    id: Option<String>,
    filename: Option<String>,
    file: Option<Bytes>,
}

fn multipart_error(err: &MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError(AppError::PayloadTooLarge)
    } else {
        ApiError(AppError::invalid_input(err.body_text()))
    }
}

async fn read_form(mut multipart: Multipart) -> Result<PhotoForm, ApiError> {
    let mut form = PhotoForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(&e))?
    {
        match field.name() {
            Some("id") => {
                form.id = Some(field.text().await.map_err(|e| multipart_error(&e))?);
            }
            Some("file") => {
                // A file input left empty arrives without a filename
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(|e| multipart_error(&e))?;
                if !filename.is_empty() {
                    form.filename = Some(filename);
                    form.file = Some(bytes);
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn upload(
    state: AppState,
    category: PhotoCategory,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let multipart = multipart.map_err(|_| ApiError(AppError::invalid_input(MISSING_FIELDS)))?;
    let form = read_form(multipart).await?;

    let (Some(raw_id), Some(filename), Some(file)) = (
        form.id.filter(|id| !id.trim().is_empty()),
        form.filename,
        form.file,
    ) else {
        return Err(ApiError(AppError::invalid_input(MISSING_FIELDS)));
    };
    let id: i32 = raw_id
        .trim()
        .parse()
        .map_err(|_| ApiError(AppError::invalid_input("id must be an integer")))?;

    let repo = EntityPhotoRepository::new((*state.db).clone());
    let service = PhotoService::new(state.photos.clone(), Arc::new(repo));
    let size = file.len();
    let key = service.upload_photo(category, id, file, &filename).await?;

    info!(%category, id, size, key = %key, "Photo uploaded");

    let photo_url = photo_url(&state.photos, Some(&key)).await;
    Ok((StatusCode::CREATED, Json(PhotoUploadResponse { id, photo_url })))
}

/// POST `/patients/photo`
async fn upload_patient_photo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    upload(state, PhotoCategory::Patients, multipart).await
}

/// POST `/doctors/photo`
async fn upload_doctor_photo(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, ApiError> {
    upload(state, PhotoCategory::Doctors, multipart).await
}
