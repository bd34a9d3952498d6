use chrono::Utc;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::dto::athlete::{AthleteListQuery, AthleteResponse, CreateAthleteRequest};
use crate::error::{Result, StorageError};
use crate::models::Athlete;

/// Projection select shared by the read paths: one JOIN per page, never a
/// lookup per row.
const PROJECTION_SELECT: &str = r#"
SELECT a.id, a.created_at, a.name, a.cpf, a.weight, a.height, a.sex,
       c.name AS category, t.name AS training_center
FROM athletes a
JOIN categories c ON a.category_id = c.id
JOIN training_centers t ON a.training_center_id = t.id
"#;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List athlete projections matching the filter, plus the total count
    /// for pagination metadata.
    pub async fn list(&self, filter: &AthleteListQuery) -> Result<(Vec<AthleteResponse>, i64)> {
        let mut count_query = build_count_query(filter);
        let total_items = count_query
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut list_query = build_list_query(filter);
        let athletes = list_query
            .build_query_as::<AthleteResponse>()
            .fetch_all(self.pool)
            .await?;

        Ok((athletes, total_items))
    }

    /// Find the athlete projection by ID
    pub async fn find_by_id(&self, id: Uuid) -> Result<AthleteResponse> {
        let sql = format!("{PROJECTION_SELECT} WHERE a.id = $1");

        let athlete = sqlx::query_as::<_, AthleteResponse>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Find the raw athlete row by ID, foreign keys included
    pub async fn find_row_by_id(&self, id: Uuid) -> Result<Athlete> {
        let athlete = sqlx::query_as::<_, Athlete>(
            r#"
            SELECT id, created_at, name, cpf, weight, height, sex,
                   category_id, training_center_id
            FROM athletes
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)?;

        Ok(athlete)
    }

    /// Fast-path uniqueness probe; the UNIQUE constraint on `cpf` remains
    /// the authoritative guard at insert time.
    pub async fn exists_by_cpf(&self, cpf: &str) -> Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM athletes WHERE cpf = $1)")
                .bind(cpf)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }

    /// Insert a new athlete with server-assigned ID and creation instant.
    pub async fn create(
        &self,
        req: &CreateAthleteRequest,
        category_id: Uuid,
        training_center_id: Uuid,
    ) -> Result<Athlete> {
        let athlete = Athlete {
            id: Uuid::new_v4(),
            created_at: Utc::now().naive_utc(),
            name: req.name.clone(),
            cpf: req.cpf.clone(),
            weight: req.weight,
            height: req.height,
            sex: req.sex.clone(),
            category_id,
            training_center_id,
        };

        sqlx::query(
            r#"
            INSERT INTO athletes (id, created_at, name, cpf, weight, height, sex,
                                  category_id, training_center_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(athlete.id)
        .bind(athlete.created_at)
        .bind(&athlete.name)
        .bind(&athlete.cpf)
        .bind(athlete.weight)
        .bind(athlete.height)
        .bind(&athlete.sex)
        .bind(athlete.category_id)
        .bind(athlete.training_center_id)
        .execute(self.pool)
        .await
        .map_err(|e| {
            // A reference row deleted between the name lookups and this
            // insert shows up as an FK violation, not a server fault.
            let e = Self::map_cpf_conflict(e, &athlete.cpf);
            if e.is_foreign_key_violation() {
                StorageError::ReferenceNotFound("Category or training center".to_string())
            } else {
                e
            }
        })?;

        Ok(athlete)
    }

    /// Persist a fully merged athlete row.
    pub async fn update(&self, athlete: &Athlete) -> Result<()> {
        let result = sqlx::query(
            r#"
            UPDATE athletes
            SET name = $2,
                cpf = $3,
                weight = $4,
                height = $5,
                sex = $6
            WHERE id = $1
            "#,
        )
        .bind(athlete.id)
        .bind(&athlete.name)
        .bind(&athlete.cpf)
        .bind(athlete.weight)
        .bind(athlete.height)
        .bind(&athlete.sex)
        .execute(self.pool)
        .await
        .map_err(|e| Self::map_cpf_conflict(e, &athlete.cpf))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    /// Delete an athlete by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM athletes WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }

    fn map_cpf_conflict(error: sqlx::Error, cpf: &str) -> StorageError {
        let error = StorageError::from(error);
        if error.is_unique_violation() {
            StorageError::Conflict(format!("An athlete is already registered with cpf: {cpf}"))
        } else {
            error
        }
    }
}

fn push_filters<'a>(query: &mut QueryBuilder<'a, Postgres>, filter: &'a AthleteListQuery) {
    if let Some(ref name) = filter.name {
        query.push(" AND a.name ILIKE ");
        query.push_bind(format!("%{name}%"));
    }

    if let Some(ref cpf) = filter.cpf {
        query.push(" AND a.cpf = ");
        query.push_bind(cpf.as_str());
    }
}

fn build_count_query<'a>(filter: &'a AthleteListQuery) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::new("SELECT COUNT(*) FROM athletes a WHERE 1=1");
    push_filters(&mut query, filter);
    query
}

fn build_list_query<'a>(filter: &'a AthleteListQuery) -> QueryBuilder<'a, Postgres> {
    let mut query = QueryBuilder::new(PROJECTION_SELECT);
    query.push(" WHERE 1=1");
    push_filters(&mut query, filter);

    // Postgres gives no stable row order without one; adjacent pages would
    // overlap or skip rows under synchronized sequential scans.
    query.push(" ORDER BY a.id");
    query.push(" LIMIT ");
    query.push_bind(filter.limit as i64);
    query.push(" OFFSET ");
    query.push_bind(filter.offset as i64);

    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_without_filters() {
        let filter = AthleteListQuery::default();
        let query = build_list_query(&filter);

        let sql = query.sql();
        assert!(sql.contains("JOIN categories"));
        assert!(sql.contains("JOIN training_centers"));
        assert!(!sql.contains("ILIKE"));
        assert!(sql.contains("LIMIT"));
        assert!(sql.contains("OFFSET"));
    }

    #[test]
    fn test_list_query_orders_before_paginating() {
        let filter = AthleteListQuery::default();
        let query = build_list_query(&filter);

        let sql = query.sql();
        let order_at = sql.find("ORDER BY a.id").expect("missing ORDER BY");
        let limit_at = sql.find("LIMIT").expect("missing LIMIT");
        assert!(order_at < limit_at);
    }

    #[test]
    fn test_list_query_with_name_filter() {
        let filter = AthleteListQuery {
            name: Some("jo".to_string()),
            ..Default::default()
        };
        let query = build_list_query(&filter);

        assert!(query.sql().contains("a.name ILIKE "));
    }

    #[test]
    fn test_list_query_with_cpf_filter() {
        let filter = AthleteListQuery {
            cpf: Some("12345678900".to_string()),
            ..Default::default()
        };
        let query = build_list_query(&filter);

        assert!(query.sql().contains("a.cpf = "));
        assert!(!query.sql().contains("ILIKE"));
    }

    #[test]
    fn test_count_query_shares_filters_without_pagination() {
        let filter = AthleteListQuery {
            name: Some("jo".to_string()),
            cpf: Some("12345678900".to_string()),
            ..Default::default()
        };
        let query = build_count_query(&filter);

        let sql = query.sql();
        assert!(sql.starts_with("SELECT COUNT(*)"));
        assert!(sql.contains("a.name ILIKE "));
        assert!(sql.contains("a.cpf = "));
        assert!(!sql.contains("LIMIT"));
    }
}
