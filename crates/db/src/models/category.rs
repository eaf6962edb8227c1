//! Category model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskmitra_core::category::{progress_percent, validate_category_name};
use taskmitra_core::types::{DbId, Timestamp};
use taskmitra_core::validation::validate_hex_color;
use validator::Validate;

use super::null_as_default;

/// A row from the `categories` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub name: String,
    pub color: String,
    pub created_at: Timestamp,
}

/// A category together with its task aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithStats {
    pub id: DbId,
    pub name: String,
    pub color: String,
    pub task_count: i64,
    pub completed_count: i64,
    pub progress_percent: i64,
}

impl CategoryWithStats {
    pub fn new(category: Category, task_count: i64, completed_count: i64) -> Self {
        Self {
            id: category.id,
            name: category.name,
            color: category.color,
            task_count,
            completed_count,
            progress_percent: progress_percent(completed_count, task_count),
        }
    }
}

/// DTO for creating a category. A missing color uses the default.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CreateCategory {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "validate_category_name"))]
    pub name: String,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}

/// DTO for updating a category. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateCategory {
    #[validate(custom(function = "validate_category_name"))]
    pub name: Option<String>,
    #[validate(custom(function = "validate_hex_color"))]
    pub color: Option<String>,
}
