//! Handler for the per-user dashboard summary.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use taskmitra_core::task::{TaskStatus, DASHBOARD_COMPLETED_LIMIT, DASHBOARD_RECENT_LIMIT};
use taskmitra_db::models::task::{StatusCounts, Task, TaskOrder};
use taskmitra_db::repositories::TaskRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::Success;
use crate::state::AppState;

/// Status totals plus the two short task lists shown on the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    #[serde(flatten)]
    pub counts: StatusCounts,
    /// Most recently created tasks that are not completed.
    pub recent_tasks: Vec<Task>,
    /// Most recently completed tasks, by completion time.
    pub recently_completed: Vec<Task>,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let counts = TaskRepo::count_by_status(&state.pool, user.user_id).await?;

    let recent_tasks = TaskRepo::list_excluding_status(
        &state.pool,
        user.user_id,
        TaskStatus::Completed,
        TaskOrder::CreatedDesc,
        Some(DASHBOARD_RECENT_LIMIT),
    )
    .await?;

    let recently_completed = TaskRepo::list_by_status(
        &state.pool,
        user.user_id,
        TaskStatus::Completed,
        TaskOrder::CompletedDesc,
        Some(DASHBOARD_COMPLETED_LIMIT),
    )
    .await?;

    Ok(Json(Success::new(DashboardData {
        counts,
        recent_tasks,
        recently_completed,
    })))
}
