use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 100;

#[derive(Debug, Clone, Copy, Deserialize, IntoParams, ToSchema)]
pub struct PaginationParams {
    #[serde(default = "PaginationParams::default_limit")]
    pub limit: u32,
    #[serde(default)]
    pub offset: u32,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

impl PaginationParams {
    fn default_limit() -> u32 {
        DEFAULT_LIMIT
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.limit < 1 || self.limit > MAX_LIMIT {
            return Err(format!("limit must be between 1 and {}", MAX_LIMIT));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub limit: u32,
    pub offset: u32,
    pub total_items: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

impl<T> PaginatedResponse<T> {
    pub fn new(data: Vec<T>, limit: u32, offset: u32, total_items: i64) -> Self {
        Self {
            data,
            pagination: PaginationMeta {
                limit,
                offset,
                total_items,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied_when_absent() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.limit, DEFAULT_LIMIT);
        assert_eq!(params.offset, 0);
    }

    #[test]
    fn test_explicit_values_kept() {
        let params: PaginationParams =
            serde_json::from_str(r#"{"limit": 10, "offset": 30}"#).unwrap();
        assert_eq!(params.limit, 10);
        assert_eq!(params.offset, 30);
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let params = PaginationParams {
            limit: 0,
            offset: 0,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_limit() {
        let params = PaginationParams {
            limit: MAX_LIMIT + 1,
            offset: 0,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_paginated_response_meta() {
        let response = PaginatedResponse::new(vec![1, 2, 3], 3, 6, 42);
        assert_eq!(response.data.len(), 3);
        assert_eq!(response.pagination.limit, 3);
        assert_eq!(response.pagination.offset, 6);
        assert_eq!(response.pagination.total_items, 42);
    }
}
