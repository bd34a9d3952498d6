use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::dto::common::{DEFAULT_LIMIT, PaginationParams};
use crate::models::Athlete;

/// Athlete projection returned by the read endpoints: the athlete's own
/// fields plus the resolved category and training center names.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub created_at: NaiveDateTime,
    pub name: String,
    pub cpf: String,
    pub weight: Decimal,
    pub height: Decimal,
    pub sex: String,
    pub category: String,
    pub training_center: String,
}

/// Request payload for creating a new athlete.
///
/// Category and training center are referenced by name and resolved to
/// identifiers before the insert.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[validate(length(min = 1, max = 50, message = "Name must be between 1 and 50 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_cpf"))]
    pub cpf: String,

    #[validate(custom(function = "validate_positive"))]
    pub weight: Decimal,

    #[validate(custom(function = "validate_positive"))]
    pub height: Decimal,

    #[validate(custom(function = "validate_sex"))]
    pub sex: String,

    #[validate(length(min = 1, max = 50, message = "Category name is required"))]
    pub category: String,

    #[validate(length(min = 1, max = 50, message = "Training center name is required"))]
    pub training_center: String,
}

/// Request payload for partially updating an athlete.
///
/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[validate(length(min = 1, max = 50))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_cpf"))]
    pub cpf: Option<String>,

    #[validate(custom(function = "validate_positive"))]
    pub weight: Option<Decimal>,

    #[validate(custom(function = "validate_positive"))]
    pub height: Option<Decimal>,

    #[validate(custom(function = "validate_sex"))]
    pub sex: Option<String>,
}

impl UpdateAthleteRequest {
    /// Merge this partial update onto an existing row. Only fields present
    /// in the request change; `id`, `created_at` and the foreign keys are
    /// carried over as-is.
    pub fn apply(&self, existing: &Athlete) -> Athlete {
        Athlete {
            id: existing.id,
            created_at: existing.created_at,
            name: self.name.clone().unwrap_or_else(|| existing.name.clone()),
            cpf: self.cpf.clone().unwrap_or_else(|| existing.cpf.clone()),
            weight: self.weight.unwrap_or(existing.weight),
            height: self.height.unwrap_or(existing.height),
            sex: self.sex.clone().unwrap_or_else(|| existing.sex.clone()),
            category_id: existing.category_id,
            training_center_id: existing.training_center_id,
        }
    }
}

/// Query parameters for the athlete list endpoint.
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct AthleteListQuery {
    /// Case-insensitive substring filter on the athlete name.
    pub name: Option<String>,
    /// Exact cpf filter.
    pub cpf: Option<String>,
    #[serde(default = "AthleteListQuery::default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

impl Default for AthleteListQuery {
    fn default() -> Self {
        Self {
            name: None,
            cpf: None,
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl AthleteListQuery {
    fn default_limit() -> u32 {
        DEFAULT_LIMIT
    }

    pub fn pagination(&self) -> PaginationParams {
        PaginationParams {
            limit: self.limit,
            offset: self.offset,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        self.pagination().validate()
    }
}

// Validation helpers
fn validate_cpf(cpf: &str) -> Result<(), validator::ValidationError> {
    if cpf.len() == 11 && cpf.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_cpf"))
    }
}

fn validate_sex(sex: &str) -> Result<(), validator::ValidationError> {
    const VALID_SEXES: &[&str] = &["M", "F"];

    if VALID_SEXES.contains(&sex) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_sex"))
    }
}

fn validate_positive(value: &Decimal) -> Result<(), validator::ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        Ok(())
    } else {
        Err(validator::ValidationError::new("not_positive"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn existing_athlete() -> Athlete {
        Athlete {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now().naive_utc(),
            name: "Joao".to_string(),
            cpf: "12345678900".to_string(),
            weight: Decimal::new(755, 1),
            height: Decimal::new(170, 2),
            sex: "M".to_string(),
            category_id: Uuid::new_v4(),
            training_center_id: Uuid::new_v4(),
        }
    }

    #[test]
    fn test_apply_weight_only_leaves_other_fields() {
        let existing = existing_athlete();
        let update = UpdateAthleteRequest {
            weight: Some(Decimal::new(800, 1)),
            ..Default::default()
        };

        let merged = update.apply(&existing);

        assert_eq!(merged.weight, Decimal::new(800, 1));
        assert_eq!(merged.name, existing.name);
        assert_eq!(merged.cpf, existing.cpf);
        assert_eq!(merged.height, existing.height);
        assert_eq!(merged.sex, existing.sex);
        assert_eq!(merged.category_id, existing.category_id);
        assert_eq!(merged.training_center_id, existing.training_center_id);
    }

    #[test]
    fn test_apply_never_touches_id_or_created_at() {
        let existing = existing_athlete();
        let update = UpdateAthleteRequest {
            name: Some("Maria".to_string()),
            ..Default::default()
        };

        let merged = update.apply(&existing);

        assert_eq!(merged.id, existing.id);
        assert_eq!(merged.created_at, existing.created_at);
        assert_eq!(merged.name, "Maria");
    }

    #[test]
    fn test_empty_update_is_identity() {
        let existing = existing_athlete();
        let merged = UpdateAthleteRequest::default().apply(&existing);

        assert_eq!(merged.name, existing.name);
        assert_eq!(merged.cpf, existing.cpf);
        assert_eq!(merged.weight, existing.weight);
        assert_eq!(merged.height, existing.height);
        assert_eq!(merged.sex, existing.sex);
    }

    #[test]
    fn test_validate_cpf_accepts_eleven_digits() {
        assert!(validate_cpf("12345678900").is_ok());
    }

    #[test]
    fn test_validate_cpf_rejects_short_or_non_numeric() {
        assert!(validate_cpf("1234567890").is_err());
        assert!(validate_cpf("1234567890a").is_err());
        assert!(validate_cpf("123.456.789").is_err());
    }

    #[test]
    fn test_validate_sex_rejects_unknown_value() {
        assert!(validate_sex("M").is_ok());
        assert!(validate_sex("F").is_ok());
        assert!(validate_sex("X").is_err());
    }

    #[test]
    fn test_create_request_validation() {
        let req = CreateAthleteRequest {
            name: "Joao".to_string(),
            cpf: "12345678900".to_string(),
            weight: Decimal::new(755, 1),
            height: Decimal::new(170, 2),
            sex: "M".to_string(),
            category: "Scale".to_string(),
            training_center: "CT King".to_string(),
        };
        assert!(req.validate().is_ok());

        let bad = CreateAthleteRequest {
            cpf: "not-a-cpf".to_string(),
            ..req
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_list_query_pagination_bounds() {
        let query = AthleteListQuery {
            limit: 0,
            ..Default::default()
        };
        assert!(query.validate().is_err());

        let query = AthleteListQuery::default();
        assert!(query.validate().is_ok());
    }
}
