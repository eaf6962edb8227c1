//! Field-level validation support.
//!
//! Request DTOs derive [`validator::Validate`] and reference the custom
//! checks defined here. Failures are collected into a [`FieldErrors`] map
//! keyed by the wire (camelCase) field name, which the HTTP layer returns
//! verbatim as `{"errors": {"field": ["message", ...]}}`.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

/// Message used when a required text field is missing or blank.
pub const REQUIRED_MESSAGE: &str = "This field is required.";

/// Ordered map of field name to human-readable messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message for `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Messages recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Merge another set of errors into this one.
    pub fn extend(&mut self, other: FieldErrors) {
        for (field, messages) in other.0 {
            self.0.entry(field).or_default().extend(messages);
        }
    }

    /// `Ok(())` when no errors were recorded, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            let key = to_camel_case(&field);
            for err in field_errors.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                out.add(key.clone(), message);
            }
        }
        out
    }
}

/// Convert a Rust field name (`first_name`) to its wire name (`firstName`).
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Build a [`ValidationError`] carrying a human-readable message.
pub fn field_error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Reject empty or whitespace-only text.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(field_error("required", REQUIRED_MESSAGE));
    }
    Ok(())
}

/// Validate that a color string is in `#RRGGBB` hex format.
pub fn validate_hex_color(color: &str) -> Result<(), ValidationError> {
    let well_formed = color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit());

    if !well_formed {
        return Err(field_error(
            "hex_color",
            format!("Enter a valid color in #RRGGBB format (got '{color}')."),
        ));
    }
    Ok(())
}

/// Accept letters, digits and `@ . + - _`, ignoring surrounding whitespace.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let username = username.trim();
    validate_not_blank(username)?;
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_');
    if !username.chars().all(allowed) {
        return Err(field_error(
            "username",
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
        ));
    }
    Ok(())
}

/// Accept an empty string (no email on file) or a well-formed address.
pub fn validate_email_or_blank(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.validate_email() {
        return Ok(());
    }
    Err(field_error("email", "Enter a valid email address."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Sample {
        #[validate(custom(function = "validate_not_blank"))]
        first_name: String,
        #[validate(custom(function = "validate_hex_color"))]
        color: String,
    }

    // -- validate_hex_color --------------------------------------------------

    #[test]
    fn hex_color_rrggbb_accepted() {
        assert!(validate_hex_color("#2e86de").is_ok());
        assert!(validate_hex_color("#000000").is_ok());
        assert!(validate_hex_color("#AABBCC").is_ok());
    }

    #[test]
    fn hex_color_missing_hash_rejected() {
        assert!(validate_hex_color("2e86de").is_err());
    }

    #[test]
    fn hex_color_wrong_length_rejected() {
        assert!(validate_hex_color("#fff").is_err());
        assert!(validate_hex_color("#2e86de80").is_err());
        assert!(validate_hex_color("").is_err());
    }

    #[test]
    fn hex_color_non_hex_rejected() {
        assert!(validate_hex_color("#GGGGGG").is_err());
    }

    // -- validate_not_blank --------------------------------------------------

    #[test]
    fn blank_text_rejected() {
        assert!(validate_not_blank("").is_err());
        assert!(validate_not_blank("   ").is_err());
        assert!(validate_not_blank("Ship report").is_ok());
    }

    // -- validate_username ---------------------------------------------------

    #[test]
    fn username_allows_word_characters_and_symbols() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username(" alice.b+tasks@home-1_x ").is_ok());
    }

    #[test]
    fn username_rejects_blank_and_other_characters() {
        assert!(validate_username("  ").is_err());
        assert!(validate_username("user#42").is_err());
        assert!(validate_username("two words").is_err());
    }

    // -- validate_email_or_blank --------------------------------------------

    #[test]
    fn blank_or_valid_email_accepted() {
        assert!(validate_email_or_blank("").is_ok());
        assert!(validate_email_or_blank("demo@taskmitra.com").is_ok());
        assert!(validate_email_or_blank("not-an-email").is_err());
    }

    // -- FieldErrors ---------------------------------------------------------

    #[test]
    fn validation_errors_convert_to_camel_case_keys() {
        let sample = Sample {
            first_name: " ".into(),
            color: "blue".into(),
        };
        let errors: FieldErrors = sample.validate().unwrap_err().into();

        assert_eq!(errors.get("firstName"), Some(&[REQUIRED_MESSAGE.to_string()][..]));
        assert!(errors.contains("color"));
        assert!(!errors.contains("first_name"));
    }

    #[test]
    fn field_errors_serialize_as_plain_map() {
        let mut errors = FieldErrors::new();
        errors.add("title", "This field is required.");
        errors.add("title", "Too long.");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"title": ["This field is required.", "Too long."]})
        );
    }

    #[test]
    fn into_result_reflects_emptiness() {
        assert!(FieldErrors::new().into_result().is_ok());

        let mut errors = FieldErrors::new();
        errors.add("name", "bad");
        assert!(errors.into_result().is_err());
    }

    #[test]
    fn extend_merges_messages_per_field() {
        let mut a = FieldErrors::new();
        a.add("name", "one");
        let mut b = FieldErrors::new();
        b.add("name", "two");
        b.add("color", "three");

        a.extend(b);
        assert_eq!(a.get("name").map(<[String]>::len), Some(2));
        assert!(a.contains("color"));
    }

    #[test]
    fn display_joins_field_messages() {
        let mut errors = FieldErrors::new();
        errors.add("color", "bad color");
        errors.add("name", "required");
        assert_eq!(errors.to_string(), "color: bad color; name: required");
    }
}
