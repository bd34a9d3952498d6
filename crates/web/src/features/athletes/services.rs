use sqlx::PgPool;
use storage::{
    dto::athlete::{AthleteListQuery, AthleteResponse, CreateAthleteRequest, UpdateAthleteRequest},
    error::{Result, StorageError},
    models::{Category, TrainingCenter},
    repository::{
        athlete::AthleteRepository, category::CategoryRepository,
        training_center::TrainingCenterRepository,
    },
};
use uuid::Uuid;

/// Decide whether a creation request may proceed, given the already-fetched
/// lookup results. Failures are reported in a fixed order: unresolved
/// category, then unresolved training center, then taken cpf. Pure so the
/// precedence is testable without a database.
fn check_creation_preconditions(
    req: &CreateAthleteRequest,
    category: Option<Category>,
    center: Option<TrainingCenter>,
    cpf_taken: bool,
) -> Result<(Category, TrainingCenter)> {
    let category = category
        .ok_or_else(|| StorageError::ReferenceNotFound(format!("Category '{}'", req.category)))?;

    let center = center.ok_or_else(|| {
        StorageError::ReferenceNotFound(format!("Training center '{}'", req.training_center))
    })?;

    if cpf_taken {
        return Err(StorageError::Conflict(format!(
            "An athlete is already registered with cpf: {}",
            req.cpf
        )));
    }

    Ok((category, center))
}

/// Create a new athlete.
///
/// Both reference names are resolved and the cpf is probed before anything
/// is written; a failed check returns without touching storage. The cpf
/// probe only buys a friendlier message, the UNIQUE constraint on `cpf` is
/// what actually guards against a racing insert.
pub async fn create_athlete(pool: &PgPool, req: &CreateAthleteRequest) -> Result<AthleteResponse> {
    let category = CategoryRepository::new(pool)
        .find_by_name(&req.category)
        .await?;

    let center = TrainingCenterRepository::new(pool)
        .find_by_name(&req.training_center)
        .await?;

    let repo = AthleteRepository::new(pool);
    let cpf_taken = repo.exists_by_cpf(&req.cpf).await?;

    let (category, center) = check_creation_preconditions(req, category, center, cpf_taken)?;

    let athlete = repo.create(req, category.id, center.id).await?;

    Ok(AthleteResponse {
        id: athlete.id,
        created_at: athlete.created_at,
        name: athlete.name,
        cpf: athlete.cpf,
        weight: athlete.weight,
        height: athlete.height,
        sex: athlete.sex,
        category: category.name,
        training_center: center.name,
    })
}

/// List athlete projections with filters and pagination
pub async fn list_athletes(
    pool: &PgPool,
    filter: &AthleteListQuery,
) -> Result<(Vec<AthleteResponse>, i64)> {
    let repo = AthleteRepository::new(pool);
    repo.list(filter).await
}

/// Get a single athlete projection by ID
pub async fn get_athlete(pool: &PgPool, id: Uuid) -> Result<AthleteResponse> {
    let repo = AthleteRepository::new(pool);
    repo.find_by_id(id).await
}

/// Apply a partial update and return the refreshed projection
pub async fn update_athlete(
    pool: &PgPool,
    id: Uuid,
    req: &UpdateAthleteRequest,
) -> Result<AthleteResponse> {
    let repo = AthleteRepository::new(pool);

    let existing = repo.find_row_by_id(id).await?;
    let merged = req.apply(&existing);
    repo.update(&merged).await?;

    repo.find_by_id(id).await
}

/// Delete an athlete by ID
pub async fn delete_athlete(pool: &PgPool, id: Uuid) -> Result<()> {
    let repo = AthleteRepository::new(pool);
    repo.delete(id).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn request() -> CreateAthleteRequest {
        CreateAthleteRequest {
            name: "Joao".to_string(),
            cpf: "12345678900".to_string(),
            weight: Decimal::new(755, 1),
            height: Decimal::new(170, 2),
            sex: "M".to_string(),
            category: "Scale".to_string(),
            training_center: "CT King".to_string(),
        }
    }

    fn category() -> Category {
        Category {
            id: Uuid::new_v4(),
            name: "Scale".to_string(),
        }
    }

    fn center() -> TrainingCenter {
        TrainingCenter {
            id: Uuid::new_v4(),
            name: "CT King".to_string(),
            address: "Rua X, 123".to_string(),
            phone: "11999999999".to_string(),
        }
    }

    #[test]
    fn test_missing_category_reported_first() {
        // Even with every other check failing, the category wins.
        let result = check_creation_preconditions(&request(), None, None, true);

        match result {
            Err(StorageError::ReferenceNotFound(what)) => assert_eq!(what, "Category 'Scale'"),
            other => panic!("expected ReferenceNotFound for category, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_training_center_reported_before_cpf_conflict() {
        let result = check_creation_preconditions(&request(), Some(category()), None, true);

        match result {
            Err(StorageError::ReferenceNotFound(what)) => {
                assert_eq!(what, "Training center 'CT King'")
            }
            other => panic!("expected ReferenceNotFound for training center, got {:?}", other),
        }
    }

    #[test]
    fn test_taken_cpf_is_a_conflict() {
        let result = check_creation_preconditions(&request(), Some(category()), Some(center()), true);

        match result {
            Err(StorageError::Conflict(msg)) => assert!(msg.contains("12345678900")),
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_all_checks_passing_yield_resolved_references() {
        let category = category();
        let center = center();
        let (resolved_category, resolved_center) = check_creation_preconditions(
            &request(),
            Some(category.clone()),
            Some(center.clone()),
            false,
        )
        .unwrap();

        assert_eq!(resolved_category.id, category.id);
        assert_eq!(resolved_category.name, "Scale");
        assert_eq!(resolved_center.id, center.id);
        assert_eq!(resolved_center.name, "CT King");
    }
}
