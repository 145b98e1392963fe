//! Field constraints for the models.
//!
//! Storage does not enforce these limits; callers run [`Validate::validate`]
//! before saving input that came from outside.

use thiserror::Error as ThisError;

pub const CATEGORY_NAME_MAX: usize = 100;
pub const CATEGORY_SLUG_MAX: usize = 100;
pub const TAG_NAME_MAX: usize = 100;
pub const TAG_SLUG_MAX: usize = 100;
pub const POST_TITLE_MAX: usize = 200;
pub const POST_SLUG_MAX: usize = 200;
pub const POST_IMAGE_MAX: usize = 100;
pub const RECIPE_NAME_MAX: usize = 100;
pub const RECIPE_SERVES_MAX: usize = 50;
pub const COMMENT_NAME_MAX: usize = 50;
pub const COMMENT_EMAIL_MAX: usize = 100;
pub const COMMENT_WEBSITE_MAX: usize = 150;
pub const COMMENT_MESSAGE_MAX: usize = 500;
pub const USERNAME_MAX: usize = 150;
pub const USER_EMAIL_MAX: usize = 254;

/// What was wrong with a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A required field is blank.
    Empty,
    /// The value is longer than the column allows, in characters.
    TooLong { max: usize, actual: usize },
    /// The value contains characters other than ASCII letters, digits, `-` and `_`.
    InvalidSlug,
}

/// A constraint violation on a named field.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[error("{field}: {}", describe(.kind))]
pub struct ValidationError {
    pub field: &'static str,
    pub kind: ValidationErrorKind,
}

fn describe(kind: &ValidationErrorKind) -> String {
    match kind {
        ValidationErrorKind::Empty => "must not be empty".to_string(),
        ValidationErrorKind::TooLong { max, actual } => {
            format!("is {actual} characters long, at most {max} allowed")
        }
        ValidationErrorKind::InvalidSlug => {
            "may only contain letters, numbers, hyphens and underscores".to_string()
        }
    }
}

/// Implemented by every model with bounded fields.
pub trait Validate {
    /// Check all constraints, returning the first violation found.
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Checks that `value` is non-empty and at most `max` characters long.
pub fn required(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError {
            field,
            kind: ValidationErrorKind::Empty,
        });
    }
    max_length(field, value, max)
}

/// Checks that `value` is at most `max` characters long. Empty is allowed.
pub fn max_length(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError {
            field,
            kind: ValidationErrorKind::TooLong { max, actual },
        });
    }
    Ok(())
}

/// Checks a required slug column.
pub fn slug(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    required(field, value, max)?;
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError {
            field,
            kind: ValidationErrorKind::InvalidSlug,
        });
    }
    Ok(())
}

/// Derive a slug from a human readable name.
///
/// ASCII letters are lowercased and digits kept; runs of whitespace, `-` and
/// `_` collapse into a single `-`; anything else is dropped. Leading and
/// trailing dashes are trimmed.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_dash = false;
    for c in text.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }
    out
}
