//! Field validators for student credentials and score submissions.
//!
//! Each validator is a pure function that hands back the accepted value or
//! the field-specific [`InvalidInputError`].

use crate::core::error::{InvalidInputError, Result};
use regex::Regex;
use std::sync::LazyLock;

/// Lowest score a single submission may carry for one course.
pub const MIN_SCORE: i64 = 0;

/// Highest score a single submission may carry for one course.
pub const MAX_SCORE: i64 = 1000;

/// Letters with at most one interior apostrophe or hyphen.
static FIRST_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+['-]?[A-Za-z]+$").expect("valid first name pattern"));

/// Space separated name tokens, each following the first-name shape.
static LAST_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z]+['-]?[A-Za-z]+(['-]?[A-Za-z]+)?\s?)*$")
        .expect("valid last name pattern")
});

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.-]+@([-\w]+\.)+\w+$").expect("valid email pattern"));

/// Validate a first name.
///
/// # Errors
/// Returns [`InvalidInputError::FirstName`] if the value is not letters with
/// an optional interior apostrophe or hyphen.
pub fn first_name(value: &str) -> Result<&str> {
    if FIRST_NAME.is_match(value) {
        Ok(value)
    } else {
        Err(InvalidInputError::FirstName)
    }
}

/// Validate a (possibly multi-word) last name.
///
/// # Errors
/// Returns [`InvalidInputError::LastName`] if any token breaks the name shape.
pub fn last_name(value: &str) -> Result<&str> {
    if LAST_NAME.is_match(value) {
        Ok(value)
    } else {
        Err(InvalidInputError::LastName)
    }
}

/// Validate an email address.
///
/// # Errors
/// Returns [`InvalidInputError::Email`] if the value is not `local@domain.tld`.
pub fn email(value: &str) -> Result<&str> {
    if EMAIL.is_match(value) {
        Ok(value)
    } else {
        Err(InvalidInputError::Email)
    }
}

/// Validate a single course score and narrow it to points.
///
/// # Errors
/// Returns [`InvalidInputError::IncorrectPointsFormat`] outside `[0, 1000]`.
pub fn score(value: i64) -> Result<u32> {
    if (MIN_SCORE..=MAX_SCORE).contains(&value) {
        u32::try_from(value).map_err(|_| InvalidInputError::IncorrectPointsFormat)
    } else {
        Err(InvalidInputError::IncorrectPointsFormat)
    }
}

/// Lower-case an email for index lookups.
#[must_use]
pub fn normalize_email(value: &str) -> String {
    value.to_lowercase()
}
