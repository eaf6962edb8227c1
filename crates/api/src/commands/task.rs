use chrono::Utc;
use sqlx::PgPool;
use taskmitra_core::error::CoreError;
use taskmitra_core::task::{sync_completed_at, TaskPriority, TaskStatus};
use taskmitra_core::types::DbId;
use taskmitra_core::validation::FieldErrors;
use taskmitra_db::models::task::{CreateTask, Task, TaskFields, UpdateTask};
use taskmitra_db::repositories::{CategoryRepo, TaskRepo};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// Foreign key from `tasks.category_id` to `categories.id`.
const CATEGORY_FK: &str = "fk_tasks_category_id";

/// Message reported when `categoryId` does not name one of the user's
/// categories.
pub const INVALID_CATEGORY_MESSAGE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// Create a task owned by `user_id`.
pub async fn create_task(pool: &PgPool, user_id: DbId, input: CreateTask) -> AppResult<Task> {
    let mut errors = collect_errors(&input);
    if let Some(category_id) = input.category_id {
        check_category(pool, user_id, category_id, &mut errors).await?;
    }
    errors.into_result()?;

    let priority: TaskPriority = parse_or_default(input.priority.as_deref())?;
    let status: TaskStatus = parse_or_default(input.status.as_deref())?;

    let fields = TaskFields {
        category_id: input.category_id,
        title: input.title.trim().to_string(),
        description: input.description,
        priority: priority.as_str().to_string(),
        status: status.as_str().to_string(),
        due_date: input.due_date,
        completed_at: sync_completed_at(status, None, Utc::now()),
    };

    TaskRepo::create(pool, user_id, &fields)
        .await
        .map_err(category_fk_to_field_error)
}

/// Apply a partial update to a task owned by `user_id`.
///
/// Absent fields keep their stored value. The completion timestamp is
/// recomputed from the resulting status.
pub async fn update_task(
    pool: &PgPool,
    user_id: DbId,
    task_id: DbId,
    input: UpdateTask,
) -> AppResult<Task> {
    let existing = TaskRepo::find_by_id(pool, user_id, task_id)
        .await?
        .ok_or(not_found(task_id))?;

    let mut errors = collect_errors(&input);
    if let Some(Some(category_id)) = input.category_id {
        check_category(pool, user_id, category_id, &mut errors).await?;
    }
    errors.into_result()?;

    let status = match input.status.as_deref() {
        Some(raw) => raw.parse::<TaskStatus>()?,
        None => existing.parsed_status()?,
    };
    let priority = match input.priority.as_deref() {
        Some(raw) => raw.parse::<TaskPriority>()?.as_str().to_string(),
        None => existing.priority,
    };

    let fields = TaskFields {
        category_id: input.category_id.unwrap_or(existing.category_id),
        title: input
            .title
            .map(|t| t.trim().to_string())
            .unwrap_or(existing.title),
        description: input.description.unwrap_or(existing.description),
        priority,
        status: status.as_str().to_string(),
        due_date: input.due_date.unwrap_or(existing.due_date),
        completed_at: sync_completed_at(status, existing.completed_at, Utc::now()),
    };

    TaskRepo::update(pool, user_id, task_id, &fields)
        .await
        .map_err(category_fk_to_field_error)?
        .ok_or(not_found(task_id))
}

/// Delete a task owned by `user_id`.
pub async fn delete_task(pool: &PgPool, user_id: DbId, task_id: DbId) -> AppResult<()> {
    if !TaskRepo::delete(pool, user_id, task_id).await? {
        return Err(not_found(task_id));
    }
    Ok(())
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Task", id })
}

fn collect_errors(input: &impl Validate) -> FieldErrors {
    match input.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => errors.into(),
    }
}

fn parse_or_default<T>(raw: Option<&str>) -> Result<T, CoreError>
where
    T: std::str::FromStr<Err = CoreError> + Default,
{
    raw.map(str::parse).transpose().map(Option::unwrap_or_default)
}

/// Record a `categoryId` error unless `category_id` belongs to `user_id`.
async fn check_category(
    pool: &PgPool,
    user_id: DbId,
    category_id: DbId,
    errors: &mut FieldErrors,
) -> AppResult<()> {
    if CategoryRepo::find_by_id(pool, user_id, category_id)
        .await?
        .is_none()
    {
        errors.add("categoryId", INVALID_CATEGORY_MESSAGE);
    }
    Ok(())
}

/// A category deleted between the ownership check and the write surfaces as
/// a foreign key violation; report it like any other invalid category.
fn category_fk_to_field_error(err: sqlx::Error) -> AppError {
    let is_category_fk = err
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        == Some(CATEGORY_FK);

    if is_category_fk {
        let mut errors = FieldErrors::new();
        errors.add("categoryId", INVALID_CATEGORY_MESSAGE);
        return errors.into();
    }
    err.into()
}
