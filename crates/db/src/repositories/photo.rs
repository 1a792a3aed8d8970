//! Photo key persistence for patients and doctors.

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    sea_query::Expr,
};

use crate::entities::{doctors, patients};
use clinic_core::photo::{PhotoCategory, PhotoError, PhotoRepository};

/// Photo key repository implementation.
#[derive(Debug, Clone)]
pub struct EntityPhotoRepository {
    db: DatabaseConnection,
}

impl EntityPhotoRepository {
    /// Create a new photo key repository.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl PhotoRepository for EntityPhotoRepository {
    async fn exists(&self, category: PhotoCategory, id: i32) -> Result<bool, PhotoError> {
        let count = match category {
            PhotoCategory::Patients => {
                patients::Entity::find_by_id(id).count(&self.db).await
            }
            PhotoCategory::Doctors => doctors::Entity::find_by_id(id).count(&self.db).await,
        }
        .map_err(|e| PhotoError::repository(e.to_string()))?;

        Ok(count > 0)
    }

    async fn set_photo_key(
        &self,
        category: PhotoCategory,
        id: i32,
        key: &str,
    ) -> Result<(), PhotoError> {
        let result = match category {
            PhotoCategory::Patients => {
                patients::Entity::update_many()
                    .col_expr(patients::Column::PhotoKey, Expr::value(key))
                    .filter(patients::Column::Id.eq(id))
                    .exec(&self.db)
                    .await
            }
            PhotoCategory::Doctors => {
                doctors::Entity::update_many()
                    .col_expr(doctors::Column::PhotoKey, Expr::value(key))
                    .filter(doctors::Column::Id.eq(id))
                    .exec(&self.db)
                    .await
            }
        }
        .map_err(|e| PhotoError::repository(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(PhotoError::EntityNotFound(category));
        }
        Ok(())
    }
}
