//! Appointment routes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    extractors::{JsonBody, optional_text},
};
use clinic_db::{AppointmentRepository, CreateAppointmentInput, entities::appointments};

/// Public appointment routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/appointments", get(list_appointments))
}

/// Admin-only appointment routes.
pub fn protected_routes() -> Router<AppState> {
    Router::new().route("/appointments", post(create_appointment))
}

/// Request body for creating an appointment.
#[derive(Debug, Deserialize)]
pub struct CreateAppointmentRequest {
    /// Patient ID.
    pub patient_id: i32,
    /// Doctor ID.
    #[serde(default)]
    pub doctor_id: Option<i32>,
    /// RFC 3339 time; defaults to now.
    #[serde(default)]
    pub date_time: Option<DateTime<Utc>>,
    /// Free-text reason.
    #[serde(default)]
    pub reason: Option<String>,
}

/// Appointment as returned by the API.
#[derive(Debug, Serialize)]
pub struct AppointmentResponse {
    /// Appointment ID.
    pub id: i32,
    /// Patient ID.
    pub patient_id: i32,
    /// Doctor ID.
    pub doctor_id: Option<i32>,
    /// RFC 3339 time.
    pub date_time: Option<String>,
    /// Free-text reason.
    pub reason: Option<String>,
}

impl From<appointments::Model> for AppointmentResponse {
    fn from(model: appointments::Model) -> Self {
        Self {
            id: model.id,
            patient_id: model.patient_id,
            doctor_id: model.doctor_id,
            date_time: model
                .date_time
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true)),
            reason: model.reason,
        }
    }
}

/// GET `/appointments`
async fn list_appointments(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let repo = AppointmentRepository::new((*state.db).clone());
    let items: Vec<AppointmentResponse> = repo
        .list()
        .await?
        .into_iter()
        .map(AppointmentResponse::from)
        .collect();

    Ok(Json(items))
}

/// POST `/appointments`
async fn create_appointment(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<CreateAppointmentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let input = CreateAppointmentInput {
        patient_id: payload.patient_id,
        doctor_id: payload.doctor_id,
        date_time: payload.date_time.unwrap_or_else(Utc::now),
        reason: optional_text(payload.reason),
    };

    let repo = AppointmentRepository::new((*state.db).clone());
    let model = repo.create(input).await?;
    info!(
        appointment_id = model.id,
        patient_id = model.patient_id,
        "Appointment created"
    );

    Ok((StatusCode::CREATED, Json(AppointmentResponse::from(model))))
}
