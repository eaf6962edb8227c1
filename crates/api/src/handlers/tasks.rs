//! Handlers for task CRUD and listings.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use taskmitra_core::error::CoreError;
use taskmitra_core::types::DbId;
use taskmitra_db::models::task::{CreateTask, UpdateTask};
use taskmitra_db::repositories::TaskRepo;

use crate::commands;
use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::TaskListParams;
use crate::response::{Success, TaskData, TaskListData};
use crate::state::AppState;

/// GET /api/v1/tasks
///
/// List the caller's tasks, newest first, with optional filters.
pub async fn list_tasks(
    user: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<TaskListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.into_filter()?;
    let tasks = TaskRepo::list(&state.pool, user.user_id, &filter).await?;

    Ok(Json(Success::new(TaskListData { tasks })))
}

/// GET /api/v1/tasks/vital
///
/// High-priority open tasks, soonest due first.
pub async fn list_vital_tasks(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let tasks = TaskRepo::list_high_priority_incomplete(&state.pool, user.user_id).await?;

    Ok(Json(Success::new(TaskListData { tasks })))
}

/// GET /api/v1/tasks/{id}
pub async fn get_task(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(task_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    let task = TaskRepo::find_by_id(&state.pool, user.user_id, task_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Task",
            id: task_id,
        }))?;

    Ok(Json(Success::new(TaskData { task })))
}

/// POST /api/v1/tasks
pub async fn create_task(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTask>,
) -> AppResult<impl IntoResponse> {
    let task = commands::task::create_task(&state.pool, user.user_id, input).await?;

    tracing::info!(
        task_id = task.id,
        user_id = user.user_id,
        status = %task.status,
        "Task created",
    );

    Ok((StatusCode::CREATED, Json(Success::new(TaskData { task }))))
}

/// PUT|PATCH /api/v1/tasks/{id}
///
/// Partially update a task. Absent fields are left unchanged.
pub async fn update_task(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(task_id): AppPath<DbId>,
    AppJson(input): AppJson<UpdateTask>,
) -> AppResult<impl IntoResponse> {
    let task = commands::task::update_task(&state.pool, user.user_id, task_id, input).await?;

    tracing::info!(task_id, user_id = user.user_id, status = %task.status, "Task updated");

    Ok(Json(Success::new(TaskData { task })))
}

/// DELETE /api/v1/tasks/{id}
pub async fn delete_task(
    user: AuthUser,
    State(state): State<AppState>,
    AppPath(task_id): AppPath<DbId>,
) -> AppResult<impl IntoResponse> {
    commands::task::delete_task(&state.pool, user.user_id, task_id).await?;

    tracing::info!(task_id, user_id = user.user_id, "Task deleted");

    Ok(Json(Success::ack()))
}
