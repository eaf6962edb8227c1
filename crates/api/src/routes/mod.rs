pub mod categories;
pub mod dashboard;
pub mod health;
pub mod profile;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /tasks                 list (filters), create
/// /tasks/vital           high-priority open tasks
/// /tasks/{id}            get, update (PUT/PATCH), delete
///
/// /categories            list with stats, create
/// /categories/{id}       get with stats, update (PUT/PATCH), delete
///
/// /dashboard             status counts, recent and recently completed tasks
///
/// /me                    current user, profile update
/// ```
///
/// Every route requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/tasks", tasks::router())
        .nest("/categories", categories::router())
        .merge(dashboard::router())
        .merge(profile::router())
}
