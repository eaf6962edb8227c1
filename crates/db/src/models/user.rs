//! User profile model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use taskmitra_core::types::{DbId, Timestamp};
use taskmitra_core::validation::{validate_email_or_blank, validate_username};
use validator::Validate;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Username given to a user provisioned on first authenticated request.
///
/// `#` never passes [`validate_username`], so a chosen username cannot
/// collide with a provisional one.
pub fn provisional_username(id: DbId) -> String {
    format!("user#{id}")
}

/// DTO for registering a user known to the identity provider.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// DTO for the editable profile fields. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfile {
    #[validate(
        custom(function = "validate_username"),
        length(max = 150, message = "Ensure this value has at most 150 characters.")
    )]
    pub username: Option<String>,
    #[validate(custom(function = "validate_email_or_blank"))]
    pub email: Option<String>,
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub first_name: Option<String>,
    #[validate(length(max = 150, message = "Ensure this value has at most 150 characters."))]
    pub last_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provisional_username_is_not_a_valid_choice() {
        let name = provisional_username(4242);
        assert_eq!(name, "user#4242");
        assert!(validate_username(&name).is_err());
    }

    #[test]
    fn profile_update_rejects_invalid_username() {
        let input = UpdateProfile {
            username: Some("user#1".into()),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }
}
