//! Student model

use serde::{Deserialize, Serialize};

use super::{ScoreCard, StudentId};
use crate::core::error::{InvalidInputError, Result};
use crate::core::validation;

/// Validated credentials of a student who has not been stored yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    /// First name
    pub first_name: String,
    /// Last name, possibly several space separated words
    pub last_name: String,
    /// Email address as entered
    pub email: String,
}

impl NewStudent {
    /// Validate credentials field by field
    ///
    /// # Errors
    /// Returns the field-specific error for the first invalid field, checked
    /// in the order first name, last name, email.
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Result<Self> {
        Ok(Self {
            first_name: validation::first_name(first_name)?.to_string(),
            last_name: validation::last_name(last_name)?.to_string(),
            email: validation::email(email)?.to_string(),
        })
    }

    /// Parse `"first [last names...] email"`.
    ///
    /// The first word is the first name, the last word the email and
    /// everything in between the last name.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::NotEnoughWords`] for fewer than three
    /// words, otherwise any field validation error.
    pub fn parse(input: &str) -> Result<Self> {
        let words: Vec<&str> = input.split_whitespace().collect();
        let [first_name, middle @ .., email] = words.as_slice() else {
            return Err(InvalidInputError::NotEnoughWords);
        };
        if middle.is_empty() {
            return Err(InvalidInputError::NotEnoughWords);
        }
        Self::new(first_name, &middle.join(" "), email)
    }
}

/// A registered student
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    id: StudentId,

    /// First name
    pub first_name: String,

    /// Last name
    pub last_name: String,

    /// Email address
    pub email: String,

    /// Cumulative progress across the catalog
    pub score_card: ScoreCard,
}

impl Student {
    /// Build a student from validated credentials
    ///
    /// # Arguments
    /// * `id` - Identifier drawn from the database sequence
    /// * `credentials` - Validated credentials
    /// * `score_card` - Zeroed card for the catalog (its owner is set to `id`)
    #[must_use]
    pub fn new(id: StudentId, credentials: NewStudent, mut score_card: ScoreCard) -> Self {
        score_card.student_id = id;
        Self {
            id,
            first_name: credentials.first_name,
            last_name: credentials.last_name,
            email: credentials.email,
            score_card,
        }
    }

    /// Identifier assigned at registration
    #[must_use]
    pub const fn id(&self) -> StudentId {
        self.id
    }

    /// `"first last"`
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
