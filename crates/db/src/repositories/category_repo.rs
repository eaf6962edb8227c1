//! Repository for the `categories` table.

use sqlx::PgPool;
use taskmitra_core::category::DEFAULT_CATEGORY_COLOR;
use taskmitra_core::types::{DbId, Timestamp};

use crate::models::category::{Category, CategoryWithStats, CreateCategory, UpdateCategory};

/// Column list for categories queries.
const COLUMNS: &str = "id, user_id, name, color, created_at";

/// Category row joined with its task aggregates.
#[derive(sqlx::FromRow)]
struct CategoryStatsRow {
    id: DbId,
    user_id: DbId,
    name: String,
    color: String,
    created_at: Timestamp,
    task_count: i64,
    completed_count: i64,
}

impl From<CategoryStatsRow> for CategoryWithStats {
    fn from(row: CategoryStatsRow) -> Self {
        let category = Category {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            color: row.color,
            created_at: row.created_at,
        };
        CategoryWithStats::new(category, row.task_count, row.completed_count)
    }
}

/// Aggregating select shared by the stats queries. `$1` is the owner.
const STATS_SELECT: &str = "\
    SELECT c.id, c.user_id, c.name, c.color, c.created_at, \
           COUNT(t.id) AS task_count, \
           COUNT(t.id) FILTER (WHERE t.status = 'completed') AS completed_count \
    FROM categories c \
    LEFT JOIN tasks t ON t.category_id = c.id AND t.user_id = c.user_id \
    WHERE c.user_id = $1";

/// Provides user-scoped CRUD operations for categories.
pub struct CategoryRepo;

impl CategoryRepo {
    /// Insert a category for `user_id`, returning the created row.
    ///
    /// A missing color falls back to [`DEFAULT_CATEGORY_COLOR`].
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCategory,
    ) -> Result<Category, sqlx::Error> {
        let query = format!(
            "INSERT INTO categories (user_id, name, color) \
             VALUES ($1, $2, COALESCE($3, $4)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(input.name.trim())
            .bind(&input.color)
            .bind(DEFAULT_CATEGORY_COLOR)
            .fetch_one(pool)
            .await
    }

    /// Find a category owned by `user_id`.
    pub async fn find_by_id(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM categories WHERE user_id = $1 AND id = $2");
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Update a category owned by `user_id`. Only non-`None` fields are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let query = format!(
            "UPDATE categories SET \
                 name  = COALESCE($3, name), \
                 color = COALESCE($4, color) \
             WHERE user_id = $1 AND id = $2 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Category>(&query)
            .bind(user_id)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.color)
            .fetch_optional(pool)
            .await
    }

    /// Delete a category owned by `user_id`. Its tasks are kept and detached
    /// by the `ON DELETE SET NULL` foreign key.
    pub async fn delete(pool: &PgPool, user_id: DbId, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM categories WHERE user_id = $1 AND id = $2")
            .bind(user_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every category owned by `user_id` with task aggregates, by id ascending.
    pub async fn list_with_stats(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<CategoryWithStats>, sqlx::Error> {
        let query = format!("{STATS_SELECT} GROUP BY c.id ORDER BY c.id ASC");
        let rows = sqlx::query_as::<_, CategoryStatsRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(CategoryWithStats::from).collect())
    }

    /// One owned category with task aggregates.
    pub async fn find_with_stats(
        pool: &PgPool,
        user_id: DbId,
        id: DbId,
    ) -> Result<Option<CategoryWithStats>, sqlx::Error> {
        let query = format!("{STATS_SELECT} AND c.id = $2 GROUP BY c.id");
        let row = sqlx::query_as::<_, CategoryStatsRow>(&query)
            .bind(user_id)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(CategoryWithStats::from))
    }
}
