//! Task priority/status vocabulary and the completion-timestamp rule.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use validator::ValidationError;

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::validation::{field_error, validate_not_blank};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a task title in characters.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Number of open tasks shown in the dashboard "recent" list.
pub const DASHBOARD_RECENT_LIMIT: i64 = 5;

/// Number of completed tasks shown in the dashboard "recently completed" list.
pub const DASHBOARD_COMPLETED_LIMIT: i64 = 3;

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskPriority {
    High,
    #[default]
    Moderate,
    Low,
}

const VALID_PRIORITIES: &[&str] = &["high", "moderate", "low"];

impl TaskPriority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Moderate => "moderate",
            Self::Low => "low",
        }
    }
}

impl FromStr for TaskPriority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "high" => Ok(Self::High),
            "moderate" => Ok(Self::Moderate),
            "low" => Ok(Self::Low),
            _ => Err(CoreError::Validation(format!(
                "Invalid priority '{s}'. Must be one of: {}",
                VALID_PRIORITIES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

const VALID_STATUSES: &[&str] = &["not-started", "in-progress", "completed"];

impl TaskStatus {
    pub const ALL: [TaskStatus; 3] = [Self::NotStarted, Self::InProgress, Self::Completed];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not-started",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn is_completed(self) -> bool {
        self == Self::Completed
    }
}

impl FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(Self::NotStarted),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Completion timestamp
// ---------------------------------------------------------------------------

/// Compute the `completed_at` value that must accompany `status`.
///
/// A completed task keeps its existing completion time, or gets `now` when it
/// has none. Any other status clears it. Reopening and re-completing a task
/// therefore records a fresh completion time.
pub fn sync_completed_at(
    status: TaskStatus,
    current: Option<Timestamp>,
    now: Timestamp,
) -> Option<Timestamp> {
    match status {
        TaskStatus::Completed => Some(current.unwrap_or(now)),
        TaskStatus::NotStarted | TaskStatus::InProgress => None,
    }
}

// ---------------------------------------------------------------------------
// Field validators
// ---------------------------------------------------------------------------

/// Title must be non-blank and at most [`MAX_TITLE_LENGTH`] characters.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    validate_not_blank(title)?;
    let len = title.chars().count();
    if len > MAX_TITLE_LENGTH {
        return Err(field_error(
            "max_length",
            format!("Ensure this value has at most {MAX_TITLE_LENGTH} characters (it has {len})."),
        ));
    }
    Ok(())
}

pub fn validate_priority(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<TaskPriority>()
        .map(|_| ())
        .map_err(|_| invalid_choice(value))
}

pub fn validate_status(value: &str) -> Result<(), ValidationError> {
    value
        .parse::<TaskStatus>()
        .map(|_| ())
        .map_err(|_| invalid_choice(value))
}

fn invalid_choice(value: &str) -> ValidationError {
    field_error(
        "invalid_choice",
        format!("Select a valid choice. '{value}' is not one of the available choices."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use chrono::{TimeZone, Utc};

    fn at(secs: i64) -> Timestamp {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    // -- parsing -------------------------------------------------------------

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in TaskStatus::ALL {
            assert_eq!(status.as_str().parse::<TaskStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_rejected() {
        assert_matches!("done".parse::<TaskStatus>(), Err(CoreError::Validation(_)));
        assert_matches!("Completed".parse::<TaskStatus>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn unknown_priority_rejected() {
        let err = "urgent".parse::<TaskPriority>().unwrap_err();
        assert!(err.to_string().contains("high, moderate, low"));
    }

    #[test]
    fn defaults_match_new_task_defaults() {
        assert_eq!(TaskPriority::default(), TaskPriority::Moderate);
        assert_eq!(TaskStatus::default(), TaskStatus::NotStarted);
    }

    #[test]
    fn serializes_as_kebab_case() {
        assert_eq!(
            serde_json::to_value(TaskStatus::InProgress).unwrap(),
            serde_json::json!("in-progress")
        );
        assert_eq!(
            serde_json::to_value(TaskPriority::High).unwrap(),
            serde_json::json!("high")
        );
    }

    // -- sync_completed_at ---------------------------------------------------

    #[test]
    fn completing_sets_now_when_unset() {
        assert_eq!(sync_completed_at(TaskStatus::Completed, None, at(0)), Some(at(0)));
    }

    #[test]
    fn completing_keeps_existing_timestamp() {
        assert_eq!(
            sync_completed_at(TaskStatus::Completed, Some(at(0)), at(60)),
            Some(at(0))
        );
    }

    #[test]
    fn leaving_completed_clears_timestamp() {
        assert_eq!(sync_completed_at(TaskStatus::InProgress, Some(at(0)), at(60)), None);
        assert_eq!(sync_completed_at(TaskStatus::NotStarted, Some(at(0)), at(60)), None);
    }

    #[test]
    fn recompleting_after_reopen_records_new_time() {
        let first = sync_completed_at(TaskStatus::Completed, None, at(0));
        let reopened = sync_completed_at(TaskStatus::InProgress, first, at(30));
        let second = sync_completed_at(TaskStatus::Completed, reopened, at(90));

        assert_eq!(reopened, None);
        assert_eq!(second, Some(at(90)));
        assert_ne!(first, second);
    }

    #[test]
    fn completed_at_present_iff_completed() {
        for status in TaskStatus::ALL {
            for current in [None, Some(at(5))] {
                let result = sync_completed_at(status, current, at(10));
                assert_eq!(result.is_some(), status.is_completed(), "{status} / {current:?}");
            }
        }
    }

    // -- validators ----------------------------------------------------------

    #[test]
    fn title_must_not_be_blank() {
        assert!(validate_title("").is_err());
        assert!(validate_title("  ").is_err());
        assert!(validate_title("Ship report").is_ok());
    }

    #[test]
    fn title_length_limit_counts_characters() {
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(validate_title(&"é".repeat(MAX_TITLE_LENGTH)).is_ok());
        assert!(validate_title(&"a".repeat(MAX_TITLE_LENGTH + 1)).is_err());
    }

    #[test]
    fn choice_validators_accept_only_known_values() {
        assert!(validate_priority("low").is_ok());
        assert!(validate_priority("LOW").is_err());
        assert!(validate_status("in-progress").is_ok());
        assert!(validate_status("in_progress").is_err());
    }
}
