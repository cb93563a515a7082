//! Error taxonomy for the tracker core.
//!
//! Every failure the core can report is a kind of invalid input. The
//! messages are shown to the user verbatim by the command loop.

use thiserror::Error;

/// Errors raised while validating or applying user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    /// The input line was empty.
    #[error("No Input.")]
    NoInput,

    /// Student credentials had fewer than three words.
    #[error("Incorrect credentials.")]
    NotEnoughWords,

    /// Another student is already registered with this email.
    #[error("This email is already taken.")]
    EmailExists,

    /// No student matches the given identifier text.
    #[error("No student is found for id={0}")]
    NoStudent(String),

    /// A points submission was malformed or out of range.
    #[error("Incorrect points format.")]
    IncorrectPointsFormat,

    /// The requested course is not in the catalog.
    #[error("Unknown course.")]
    NoCourse,

    /// The email address failed format validation.
    #[error("Incorrect email.")]
    Email,

    /// The first name failed format validation.
    #[error("Incorrect first name.")]
    FirstName,

    /// The last name failed format validation.
    #[error("Incorrect last name.")]
    LastName,
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, InvalidInputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(InvalidInputError::NoInput.to_string(), "No Input.");
        assert_eq!(
            InvalidInputError::NotEnoughWords.to_string(),
            "Incorrect credentials."
        );
        assert_eq!(
            InvalidInputError::EmailExists.to_string(),
            "This email is already taken."
        );
        assert_eq!(
            InvalidInputError::IncorrectPointsFormat.to_string(),
            "Incorrect points format."
        );
        assert_eq!(InvalidInputError::NoCourse.to_string(), "Unknown course.");
    }

    #[test]
    fn test_no_student_carries_id_text() {
        let err = InvalidInputError::NoStudent("abc".to_string());
        assert_eq!(err.to_string(), "No student is found for id=abc");
    }
}
