//! Handlers for category CRUD. Every category is returned with its task
//! aggregates.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskmitra_core::error::CoreError;
use taskmitra_core::types::DbId;
use taskmitra_db::models::category::{CreateCategory, UpdateCategory};
use taskmitra_db::repositories::CategoryRepo;

use crate::commands;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::{CategoryData, CategoryListData, Success};
use crate::state::AppState;

/// GET /api/v1/categories
pub async fn list_categories(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let categories = CategoryRepo::list_with_stats(&state.pool, user.user_id).await?;

    Ok(Json(Success::new(CategoryListData { categories })))
}

/// GET /api/v1/categories/{id}
pub async fn get_category(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(category_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let category = CategoryRepo::find_with_stats(&state.pool, user.user_id, category_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Category",
            id: category_id,
        }))?;

    Ok(Json(Success::new(CategoryData { category })))
}

/// POST /api/v1/categories
pub async fn create_category(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategory>,
) -> AppResult<impl IntoResponse> {
    let category = commands::category::create_category(&state.pool, user.user_id, input).await?;

    tracing::info!(
        category_id = category.id,
        user_id = user.user_id,
        name = %category.name,
        "Category created",
    );

    Ok((
        StatusCode::CREATED,
        Json(Success::new(CategoryData { category })),
    ))
}

/// PUT|PATCH /api/v1/categories/{id}
pub async fn update_category(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(category_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateCategory>,
) -> AppResult<impl IntoResponse> {
    let category =
        commands::category::update_category(&state.pool, user.user_id, category_id, input)
            .await?;

    tracing::info!(category_id, user_id = user.user_id, "Category updated");

    Ok(Json(Success::new(CategoryData { category })))
}

/// DELETE /api/v1/categories/{id}
///
/// Tasks in the category are kept and become uncategorized.
pub async fn delete_category(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(category_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    commands::category::delete_category(&state.pool, user.user_id, category_id).await?;

    tracing::info!(category_id, user_id = user.user_id, "Category deleted");

    Ok(Json(Success::ack()))
}
