//! Patient repository for database operations.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::error::RepositoryError;
use crate::entities::patients;

/// Input for creating a patient.
#[derive(Debug, Clone)]
pub struct CreatePatientInput {
    /// Display name.
    pub full_name: String,
    /// Contact phone.
    pub phone: Option<String>,
}

/// Patient repository.
#[derive(Debug, Clone)]
pub struct PatientRepository {
    db: DatabaseConnection,
}

impl PatientRepository {
    /// Creates a new patient repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all patients in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<patients::Model>, RepositoryError> {
        Ok(patients::Entity::find()
            .order_by_asc(patients::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Creates a patient without a photo.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreatePatientInput) -> Result<patients::Model, RepositoryError> {
        patients::ActiveModel {
            full_name: Set(input.full_name),
            phone: Set(input.phone),
            photo_key: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(RepositoryError::from)
    }
}
