//! Doctor routes.

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
use clinic_db::{CreateDoctorInput, DoctorRepository, entities::doctors};

/// Public doctor routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/doctors", get(list_doctors))
}

/// Admin-only doctor routes.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/doctors", post(create_doctor))
}

/// Request body for creating a doctor.
#[derive(Debug, Deserialize)]
pub struct CreateDoctorRequest {
    /// Display name; must not be blank.
    pub full_name: String,
    /// Medical specialty.
    #[serde(default)]
    pub specialty: Option<String>,
}

/// Doctor as returned by the API.
#[derive(Debug, Serialize)]
pub struct DoctorResponse {
    /// Doctor ID.
    pub id: i32,
    /// Display name.
    pub full_name: String,
    /// Medical specialty.
    pub specialty: Option<String>,
    /// Time-limited photo URL.
    pub photo_url: Option<String>,
}

impl DoctorResponse {
    fn new(model: doctors::Model, photo_url: Option<String>) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            specialty: model.specialty,
            photo_url,
        }
    }
}

/// Load every doctor with a resolved photo URL.
pub(crate) async fn load_doctors(state: &AppState) -> Result<Vec<DoctorResponse>, ApiError> {
    let repo = DoctorRepository::new((*state.db).clone());
    let models = repo.list().await?;

    let mut items = Vec::with_capacity(models.len());
    for model in models {
        let url = photo_url(&state.photos, model.photo_key.as_deref()).await;
        items.push(DoctorResponse::new(model, url));
    }
    Ok(items)
}

/// GET `/doctors`
async fn list_doctors(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(load_doctors(&state).await?))
}

/// POST `/doctors`
async fn create_doctor(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateDoctorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateDoctorInput {
        full_name: required_text(&payload.full_name, "full_name")?,
        specialty: optional_text(payload.specialty),
    };

    let repo = DoctorRepository::new((*state.db).clone());
    let model = repo.create(input).await?;
    info!(doctor_id = model.id, "Doctor created");

    Ok((StatusCode::CREATED, Json(DoctorResponse::new(model, None))))
}
