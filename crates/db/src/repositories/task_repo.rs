//! Repository for the `tasks` table.
//!
//! Every query carries a `user_id = $1` predicate. A task owned by someone
//! else is indistinguishable from a missing one.

use sqlx::PgPool;
use taskmitra_core::task::{TaskPriority, TaskStatus};
use taskmitra_core::types::DbId;

use crate::models::task::{StatusCounts, Task, TaskFields, TaskFilter, TaskOrder};

/// Column list for tasks queries.
const COLUMNS: &str = "\
    id, user_id, category_id, title, description, priority, status, \
    due_date, created_at, completed_at";

/// Upper bound applied to any caller-supplied listing limit.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Provides user-scoped CRUD and query operations for tasks.
pub struct TaskRepo;

impl TaskRepo {
    /// Insert a task for `user_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        fields: &TaskFields,
    ) -> Result<Task, sqlx::Error> {
        let query = format!(
            "INSERT INTO tasks \
                 (user_id, category_id, title, description, priority, status, due_date, completed_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(fields.category_id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.priority)
            .bind(&fields.status)
            .bind(fields.due_date)
            .bind(fields.completed_at)
            .fetch_one(pool)
            .await
    }

    /// Find a task owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tasks WHERE user_id = $1 AND id = $2");
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite every mutable column of a task owned by `user_id`.
    ///
    /// `created_at` is never touched. Returns `None` if no owned row matched.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        fields: &TaskFields,
    ) -> Result<Option<Task>, sqlx::Error> {
        let query = format!(
            "UPDATE tasks SET \
                 category_id  = $3, \
                 title        = $4, \
                 description  = $5, \
                 priority     = $6, \
                 status       = $7, \
                 due_date     = $8, \
                 completed_at = $9 \
             WHERE user_id = $1 AND id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Task>(&query)
            .bind(user_id)
            .bind(id)
            .bind(fields.category_id)
            .bind(&fields.title)
            .bind(&fields.description)
            .bind(&fields.priority)
            .bind(&fields.status)
            .bind(fields.due_date)
            .bind(fields.completed_at)
            .fetch_optional(pool)
            .await
    }

    /// Delete a task owned by `user_id`. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List tasks owned by `user_id` matching `filter`.
    pub async fn list(
        pool: &PgPool,
        user_id: DbId,
        filter: &TaskFilter,
    ) -> Result<Vec<Task>, sqlx::Error> {
        // $1 is always the owner.
        let mut conditions = vec!["user_id = $1".to_string()];
        let mut bind_idx = 2u32;

        if filter.status.is_some() {
            conditions.push(format!("status = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.exclude_status.is_some() {
            conditions.push(format!("status <> ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.priority.is_some() {
            conditions.push(format!("priority = ${bind_idx}"));
            bind_idx += 1;
        }
        if filter.category_id.is_some() {
            conditions.push(format!("category_id = ${bind_idx}"));
            bind_idx += 1;
        }

        let limit_clause = if filter.limit.is_some() {
            format!("LIMIT ${bind_idx}")
        } else {
            String::new()
        };

        let query = format!(
            "SELECT {COLUMNS} FROM tasks WHERE {conditions} ORDER BY {order} {limit_clause}",
            conditions = conditions.join(" AND "),
            order = filter.order.order_by(),
        );

        let mut q = sqlx::query_as::<_, Task>(&query).bind(user_id);

        // Bind dynamic parameters in order.
        if let Some(status) = filter.status {
            q = q.bind(status.as_str());
        }
        if let Some(status) = filter.exclude_status {
            q = q.bind(status.as_str());
        }
        if let Some(ref priority) = filter.priority {
            q = q.bind(priority);
        }
        if let Some(category_id) = filter.category_id {
            q = q.bind(category_id);
        }
        if let Some(limit) = filter.limit {
            q = q.bind(limit.clamp(1, MAX_LIST_LIMIT));
        }

        q.fetch_all(pool).await
    }

    /// All tasks owned by `user_id`, most recent first.
    pub async fn list_all(pool: &PgPool, user_id: DbId) -> Result<Vec<Task>, sqlx::Error> {
        Self::list(pool, user_id, &TaskFilter::default()).await
    }

    /// Tasks in `status`, in the given order, optionally limited.
    pub async fn list_by_status(
        pool: &PgPool,
        user_id: DbId,
        status: TaskStatus,
        order: TaskOrder,
        limit: Option<i64>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let filter = TaskFilter {
            status: Some(status),
            order,
            limit,
            ..Default::default()
        };
        Self::list(pool, user_id, &filter).await
    }

    /// Tasks not in `status`, in the given order, optionally limited.
    pub async fn list_excluding_status(
        pool: &PgPool,
        user_id: DbId,
        status: TaskStatus,
        order: TaskOrder,
        limit: Option<i64>,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let filter = TaskFilter {
            exclude_status: Some(status),
            order,
            limit,
            ..Default::default()
        };
        Self::list(pool, user_id, &filter).await
    }

    /// High-priority tasks that are not completed, by due date ascending
    /// with undated tasks last.
    pub async fn list_high_priority_incomplete(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<Task>, sqlx::Error> {
        let filter = TaskFilter {
            exclude_status: Some(TaskStatus::Completed),
            priority: Some(TaskPriority::High.as_str().to_string()),
            order: TaskOrder::DueDateAsc,
            ..Default::default()
        };
        Self::list(pool, user_id, &filter).await
    }

    /// Count tasks per status. Statuses with no tasks report zero.
    pub async fn count_by_status(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<StatusCounts, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT status, COUNT(*) FROM tasks WHERE user_id = $1 GROUP BY status",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        let mut counts = StatusCounts::default();
        for (status, count) in rows {
            match status.parse::<TaskStatus>() {
                Ok(status) => counts.set(status, count),
                Err(_) => tracing::warn!(status = %status, user_id, "Ignoring unknown task status"),
            }
        }
        Ok(counts)
    }
}
