//! Query parameter types for API handlers.

use serde::Deserialize;
use taskmitra_core::error::CoreError;
use taskmitra_core::task::{TaskPriority, TaskStatus};
use taskmitra_core::types::DbId;
use taskmitra_db::models::task::TaskFilter;

/// Query parameters for `GET /tasks`.
///
/// ```text
/// ?status=in-progress&excludeStatus=completed&priority=high&categoryId=3&limit=10
/// ```
///
/// `limit` must be at least 1; the repository caps it at
/// [`MAX_LIST_LIMIT`](taskmitra_db::repositories::task_repo::MAX_LIST_LIMIT).
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListParams {
    pub status: Option<String>,
    pub exclude_status: Option<String>,
    pub priority: Option<String>,
    pub category_id: Option<DbId>,
    pub limit: Option<i64>,
}

impl TaskListParams {
    /// Parse the raw values into a repository filter. Unknown status or
    /// priority names and non-positive limits are rejected.
    pub fn into_filter(self) -> Result<TaskFilter, CoreError> {
        if let Some(limit) = self.limit.filter(|&limit| limit < 1) {
            return Err(CoreError::Validation(format!(
                "Invalid limit {limit}. Must be at least 1"
            )));
        }
        let status = self.status.as_deref().map(str::parse::<TaskStatus>).transpose()?;
        let exclude_status = self
            .exclude_status
            .as_deref()
            .map(str::parse::<TaskStatus>)
            .transpose()?;
        let priority = self
            .priority
            .as_deref()
            .map(str::parse::<TaskPriority>)
            .transpose()?
            .map(|p| p.as_str().to_string());

        Ok(TaskFilter {
            status,
            exclude_status,
            priority,
            category_id: self.category_id,
            limit: self.limit,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn empty_params_list_everything() {
        let filter = TaskListParams::default().into_filter().unwrap();
        assert!(filter.status.is_none());
        assert!(filter.priority.is_none());
        assert!(filter.limit.is_none());
    }

    #[test]
    fn known_values_are_parsed() {
        let params = TaskListParams {
            status: Some("in-progress".into()),
            exclude_status: Some("completed".into()),
            priority: Some("high".into()),
            category_id: Some(3),
            limit: Some(10),
        };
        let filter = params.into_filter().unwrap();
        assert_eq!(filter.status, Some(TaskStatus::InProgress));
        assert_eq!(filter.exclude_status, Some(TaskStatus::Completed));
        assert_eq!(filter.priority.as_deref(), Some("high"));
        assert_eq!(filter.category_id, Some(3));
    }

    #[test]
    fn unknown_status_is_rejected() {
        let params = TaskListParams {
            status: Some("done".into()),
            ..Default::default()
        };
        assert_matches!(params.into_filter(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn non_positive_limit_is_rejected() {
        for limit in [0, -3] {
            let params = TaskListParams {
                limit: Some(limit),
                ..Default::default()
            };
            assert_matches!(params.into_filter(), Err(CoreError::Validation(_)));
        }
    }
}
