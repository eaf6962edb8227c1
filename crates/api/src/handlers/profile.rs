//! Handlers for the authenticated user's own profile.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use taskmitra_core::error::CoreError;
use taskmitra_core::types::DbId;
use taskmitra_core::validation::FieldErrors;
use taskmitra_db::models::user::UpdateProfile;
use taskmitra_db::repositories::UserRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::{Success, UserData};
use crate::state::AppState;

/// Unique constraint on `users.username`.
const USERNAME_UNIQUE: &str = "uq_users_username";

fn user_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "User", id })
}

fn username_taken_to_conflict(err: sqlx::Error) -> AppError {
    let is_taken = err
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
        == Some(USERNAME_UNIQUE);

    if is_taken {
        return AppError::Core(CoreError::Conflict(
            "A user with that username already exists.".into(),
        ));
    }
    err.into()
}

/// GET /api/v1/me
pub async fn get_me(user: AuthUser, State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let profile = UserRepo::find_by_id(&state.pool, user.user_id)
        .await?
        .ok_or(user_not_found(user.user_id))?;

    Ok(Json(Success::new(UserData { user: profile })))
}

/// PUT /api/v1/me
///
/// Update username, name and email. A username already taken by another
/// user is rejected with 409.
pub async fn update_me(
    user: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateProfile>,
) -> AppResult<impl IntoResponse> {
    input.validate().map_err(FieldErrors::from)?;

    let profile = UserRepo::update_profile(&state.pool, user.user_id, &input)
        .await
        .map_err(username_taken_to_conflict)?
        .ok_or(user_not_found(user.user_id))?;

    tracing::info!(user_id = user.user_id, "Profile updated");

    Ok(Json(Success::new(UserData { user: profile })))
}
