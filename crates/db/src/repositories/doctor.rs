//! Doctor repository for database operations.

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use super::error::RepositoryError;
use crate::entities::doctors;

/// Input for creating a doctor.
#[derive(Debug, Clone)]
pub struct CreateDoctorInput {
    /// Display name.
    pub full_name: String,
    /// Medical specialty.
    pub specialty: Option<String>,
}

/// Doctor repository.
#[derive(Debug, Clone)]
pub struct DoctorRepository {
    db: DatabaseConnection,
}

impl DoctorRepository {
    /// Creates a new doctor repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists all doctors in id order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<doctors::Model>, RepositoryError> {
        Ok(doctors::Entity::find()
            .order_by_asc(doctors::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// Creates a doctor without a photo.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateDoctorInput) -> Result<doctors::Model, RepositoryError> {
        doctors::ActiveModel {
            full_name: Set(input.full_name),
            specialty: Set(input.specialty),
            photo_key: Set(None),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(RepositoryError::from)
    }
}
