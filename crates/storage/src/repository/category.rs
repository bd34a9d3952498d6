use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::category::CreateCategoryRequest;
use crate::error::{Result, StorageError};
use crate::models::Category;

pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories
    pub async fn list(&self) -> Result<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories ORDER BY name")
                .fetch_all(self.pool)
                .await?;

        Ok(categories)
    }

    /// Find category by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?
                .ok_or(StorageError::NotFound)?;

        Ok(category)
    }

    /// Case-sensitive exact-match lookup by name
    pub async fn find_by_name(&self, name: &str) -> Result<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE name = $1")
                .bind(name)
                .fetch_optional(self.pool)
                .await?;

        Ok(category)
    }

    /// Create a new category
    pub async fn create(&self, req: &CreateCategoryRequest) -> Result<Category> {
        let category = Category {
            id: Uuid::new_v4(),
            name: req.name.clone(),
        };

        sqlx::query("INSERT INTO categories (id, name) VALUES ($1, $2)")
            .bind(category.id)
            .bind(&category.name)
            .execute(self.pool)
            .await
            .map_err(|e| {
                let e = StorageError::from(e);
                if e.is_unique_violation() {
                    StorageError::Conflict(format!(
                        "A category named '{}' already exists",
                        req.name
                    ))
                } else {
                    e
                }
            })?;

        Ok(category)
    }
}
