//! Shared response envelope types for API handlers.
//!
//! Every successful response is a JSON object carrying `"success": true`
//! alongside a named payload, e.g. `{"success": true, "task": {...}}`. Use
//! [`Success`] with one of the payload structs below instead of ad-hoc
//! `serde_json::json!` bodies.

use serde::Serialize;
use taskmitra_db::models::category::CategoryWithStats;
use taskmitra_db::models::task::Task;
use taskmitra_db::models::user::User;

/// Standard `{ "success": true, ...payload }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(Success::new(TaskData { task })))
/// ```
#[derive(Debug, Serialize)]
pub struct Success<T: Serialize> {
    success: bool,
    #[serde(flatten)]
    pub payload: T,
}

impl<T: Serialize> Success<T> {
    pub fn new(payload: T) -> Self {
        Self {
            success: true,
            payload,
        }
    }
}

impl Success<Empty> {
    /// Bare `{"success": true}` acknowledgement.
    pub fn ack() -> Self {
        Self::new(Empty {})
    }
}

/// Payload with no fields.
#[derive(Debug, Serialize)]
pub struct Empty {}

#[derive(Debug, Serialize)]
pub struct TaskData {
    pub task: Task,
}

#[derive(Debug, Serialize)]
pub struct TaskListData {
    pub tasks: Vec<Task>,
}

#[derive(Debug, Serialize)]
pub struct CategoryData {
    pub category: CategoryWithStats,
}

#[derive(Debug, Serialize)]
pub struct CategoryListData {
    pub categories: Vec<CategoryWithStats>,
}

#[derive(Debug, Serialize)]
pub struct UserData {
    pub user: User,
}
