//! Appointment repository for database operations.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::error::RepositoryError;
use crate::entities::{appointments, doctors, patients};

/// Input for creating an appointment.
#[derive(Debug, Clone)]
pub struct CreateAppointmentInput {
    /// Patient the appointment belongs to.
    pub patient_id: i32,
    /// Attending doctor, if assigned.
    pub doctor_id: Option<i32>,
    /// Scheduled time; callers stamp the current time when none is given.
    pub date_time: DateTime<Utc>,
    /// Free-text reason.
    pub reason: Option<String>,
}

/// Appointment repository.
#[derive(Debug, Clone)]
pub struct AppointmentRepository {
    db: DatabaseConnection,
}

impl AppointmentRepository {
    /// Creates a new appointment repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all appointments in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<appointments::Model>, RepositoryError> {
        Ok(appointments::Entity::find()
            .order_by_asc(appointments::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Creates an appointment after checking its references.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] for an unknown patient or doctor.
    pub async fn create(
        &self,
        input: CreateAppointmentInput,
    ) -> Result<appointments::Model, RepositoryError> {
        if patients::Entity::find_by_id(input.patient_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(RepositoryError::NotFound("Patient not found"));
        }

        if let Some(doctor_id) = input.doctor_id {
            if doctors::Entity::find_by_id(doctor_id)
                .one(&self.db)
                .await?
                .is_none()
            {
                return Err(RepositoryError::NotFound("Doctor not found"));
            }
        }

        let model = appointments::ActiveModel {
            patient_id: Set(input.patient_id),
            doctor_id: Set(input.doctor_id),
            date_time: Set(Some(input.date_time)),
            reason: Set(input.reason),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(model)
    }
}
