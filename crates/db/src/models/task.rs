//! Task model, DTOs and listing filter.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskmitra_core::error::CoreError;
use taskmitra_core::task::{validate_priority, validate_status, validate_title, TaskStatus};
use taskmitra_core::types::{Date, DbId, Timestamp};
use validator::Validate;

use super::{double_option, null_as_default};

// ---------------------------------------------------------------------------
// Entity
// ---------------------------------------------------------------------------

/// A row from the `tasks` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: DbId,
    #[serde(skip_serializing)]
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub due_date: Option<Date>,
    pub created_at: Timestamp,
    pub completed_at: Option<Timestamp>,
}

impl Task {
    /// Parsed status. Rows are constrained by `ck_tasks_status`, so a failure
    /// here means the schema and code disagree.
    pub fn parsed_status(&self) -> Result<TaskStatus, CoreError> {
        self.status.parse().map_err(|_| {
            CoreError::Internal(format!(
                "task {} has unrecognized status '{}'",
                self.id, self.status
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a task. Optional choice fields fall back to the defaults.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    #[serde(default, deserialize_with = "null_as_default")]
    #[validate(custom(function = "validate_title"))]
    pub title: String,
    pub description: Option<String>,
    pub category_id: Option<DbId>,
    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    pub due_date: Option<Date>,
}

/// DTO for partially updating a task.
///
/// Nullable columns use `Option<Option<T>>`: an absent key keeps the stored
/// value, an explicit `null` clears it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[validate(custom(function = "validate_title"))]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub category_id: Option<Option<DbId>>,
    #[validate(custom(function = "validate_priority"))]
    pub priority: Option<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<Date>>,
}

/// Fully resolved column values written by insert and update.
///
/// Built by the command layer after validation, defaulting and the
/// completion-timestamp rule have been applied.
#[derive(Debug, Clone)]
pub struct TaskFields {
    pub category_id: Option<DbId>,
    pub title: String,
    pub description: Option<String>,
    pub priority: String,
    pub status: String,
    pub due_date: Option<Date>,
    pub completed_at: Option<Timestamp>,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// Sort order for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskOrder {
    /// Most recently created first.
    #[default]
    CreatedDesc,
    /// Most recently completed first.
    CompletedDesc,
    /// Earliest due date first, tasks without a due date last.
    DueDateAsc,
}

impl TaskOrder {
    pub(crate) fn order_by(self) -> &'static str {
        match self {
            Self::CreatedDesc => "created_at DESC, id DESC",
            Self::CompletedDesc => "completed_at DESC NULLS LAST, id DESC",
            Self::DueDateAsc => "due_date ASC NULLS LAST, created_at DESC, id DESC",
        }
    }
}

/// Composable filter for [`TaskRepo::list`](crate::repositories::TaskRepo::list).
///
/// Every listing is additionally scoped to the calling user.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub exclude_status: Option<TaskStatus>,
    pub priority: Option<String>,
    pub category_id: Option<DbId>,
    pub order: TaskOrder,
    pub limit: Option<i64>,
}

/// Per-status task totals for one user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub completed_count: i64,
    pub in_progress_count: i64,
    pub not_started_count: i64,
}

impl StatusCounts {
    /// Record `count` tasks in `status`.
    pub fn set(&mut self, status: TaskStatus, count: i64) {
        match status {
            TaskStatus::Completed => self.completed_count = count,
            TaskStatus::InProgress => self.in_progress_count = count,
            TaskStatus::NotStarted => self.not_started_count = count,
        }
    }

    pub fn total(&self) -> i64 {
        self.completed_count + self.in_progress_count + self.not_started_count
    }
}
