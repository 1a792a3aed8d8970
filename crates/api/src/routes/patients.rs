//! Patient routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::presign::photo_url;
use crate::{
    AppState,
    error::ApiError,
    extractors::{JsonBody, optional_text, required_text},
};
use clinic_db::{CreatePatientInput, PatientRepository, entities::patients};

/// Public patient routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/patients", get(list_patients))
}

/// Admin-only patient routes.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/patients", post(create_patient))
}

/// Request body for creating a patient.
#[derive(Debug, Deserialize)]
pub struct CreatePatientRequest {
    /// Display name; must not be blank.
    pub full_name: String,
    /// Contact phone.
    #[serde(default)]
    pub phone: Option<String>,
}

/// Patient as returned by the API.
#[derive(Debug, Serialize)]
pub struct PatientResponse {
    /// Patient ID.
    pub id: i32,
    /// Display name.
    pub full_name: String,
    /// Contact phone.
    pub phone: Option<String>,
    /// Time-limited photo URL.
    pub photo_url: Option<String>,
}

impl PatientResponse {
    fn new(model: patients::Model, photo_url: Option<String>) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            phone: model.phone,
            photo_url,
        }
    }
}

/// GET `/patients`
async fn list_patients(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let repo = PatientRepository::new((*state.db).clone());
    let models = repo.list().await?;

    let mut items = Vec::with_capacity(models.len());
    for model in models {
        let url = photo_url(&state.photos, model.photo_key.as_deref()).await;
        items.push(PatientResponse::new(model, url));
    }

    Ok(Json(items))
}

/// POST `/patients`
async fn create_patient(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreatePatientRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreatePatientInput {
        full_name: required_text(&payload.full_name, "full_name")?,
        phone: optional_text(payload.phone),
    };

    let repo = PatientRepository::new((*state.db).clone());
    let model = repo.create(input).await?;
    info!(patient_id = model.id, "Patient created");

    Ok((StatusCode::CREATED, Json(PatientResponse::new(model, None))))
}
