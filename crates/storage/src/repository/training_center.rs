use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::training_center::CreateTrainingCenterRequest;
use crate::error::{Result, StorageError};
use crate::models::TrainingCenter;

pub struct TrainingCenterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrainingCenterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all training centers
    pub async fn list(&self) -> Result<Vec<TrainingCenter>> {
        let centers = sqlx::query_as::<_, TrainingCenter>(
            "SELECT id, name, address, phone FROM training_centers ORDER BY name",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(centers)
    }

    /// Find training center by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<TrainingCenter> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            "SELECT id, name, address, phone FROM training_centers WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(center)
    }

    /// Case-sensitive exact-match lookup by name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(
            "SELECT id, name, address, phone FROM training_centers WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(center)
    }

    /// Create a new training center
    pub async fn create(&self, req: &CreateTrainingCenterRequest) -> Result<TrainingCenter> {
        let center = TrainingCenter {
            id: Uuid::new_v4(),
            name: req.name.clone(),
            address: req.address.clone(),
            phone: req.phone.clone(),
        };

        sqlx::query("INSERT INTO training_centers (id, name, address, phone) VALUES ($1, $2, $3, $4)")
            .bind(center.id)
            .bind(&center.name)
            .bind(&center.address)
            .bind(&center.phone)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let e = StorageError::from(e);
                if e.is_unique_violation() {
                    StorageError::Conflict(format!(
                        "A training center named '{}' already exists",
                        req.name
                    ))
                } else {
                    e
                }
            })?;

        Ok(center)
    }
}
