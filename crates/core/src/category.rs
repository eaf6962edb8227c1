//! Category constants, validation and progress arithmetic.

use validator::ValidationError;

use crate::validation::{field_error, validate_not_blank};

/// Color assigned to a category when none is supplied.
pub const DEFAULT_CATEGORY_COLOR: &str = "#2e86de";

/// Maximum length of a category name in characters.
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;

/// Percentage of completed tasks, truncated toward zero.
///
/// Uses integer arithmetic so `29 / 100` yields exactly 29. Returns 0 for an
/// empty category.
pub fn progress_percent(completed: i64, total: i64) -> i64 {
    if total <= 0 {
        return 0;
    }
    completed.clamp(0, total) * 100 / total
}

/// Name must be non-blank and at most [`MAX_CATEGORY_NAME_LENGTH`] characters.
pub fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    validate_not_blank(name)?;
    let len = name.chars().count();
    if len > MAX_CATEGORY_NAME_LENGTH {
        return Err(field_error(
            "max_length",
            format!(
                "Ensure this value has at most {MAX_CATEGORY_NAME_LENGTH} characters (it has {len})."
            ),
        ));
    }
    Ok(())
}
