use sqlx::PgPool;
use taskmitra_core::error::CoreError;
use taskmitra_core::types::DbId;
use taskmitra_core::validation::FieldErrors;
use taskmitra_db::models::category::{CategoryWithStats, CreateCategory, UpdateCategory};
use taskmitra_db::repositories::CategoryRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Create a category owned by `user_id`. A new category has no tasks.
pub async fn create_category(
    pool: &PgPool,
    user_id: DbId,
    input: CreateCategory,
) -> AppResult<CategoryWithStats> {
    input.validate().map_err(FieldErrors::from)?;

    let category = CategoryRepo::create(pool, user_id, &input).await?;
    Ok(CategoryWithStats::new(category, 0, 0))
}

/// Rename or recolor a category owned by `user_id`.
pub async fn update_category(
    pool: &PgPool,
    user_id: DbId,
    category_id: DbId,
    input: UpdateCategory,
) -> AppResult<CategoryWithStats> {
    input.validate().map_err(FieldErrors::from)?;

    CategoryRepo::update(pool, user_id, category_id, &input)
        .await?
        .ok_or(not_found(category_id))?;

    CategoryRepo::find_with_stats(pool, user_id, category_id)
        .await?
        .ok_or(not_found(category_id))
}

/// Delete a category owned by `user_id`. Its tasks remain, uncategorized.
pub async fn delete_category(pool: &PgPool, user_id: DbId, category_id: DbId) -> AppResult<()> {
    if !CategoryRepo::delete(pool, user_id, category_id).await? {
        return Err(not_found(category_id));
    }
    Ok(())
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}
