//! Per-student score card

use serde::{Deserialize, Serialize};
use std::fmt;

use super::course::{display_name, DEFAULT_CATALOG};
use super::StudentId;
use crate::core::error::{InvalidInputError, Result};
use crate::core::validation;

/// Cumulative progress of one student in one course
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseProgress {
    /// Points accumulated over all submissions
    pub points: u32,
    /// Number of submissions recorded
    pub submissions: u32,
}

/// Cumulative points and submission counts for every catalog course
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Owning student
    pub student_id: StudentId,

    /// Progress per course key, in catalog order
    courses: Vec<(String, CourseProgress)>,
}

impl ScoreCard {
    /// Create a zeroed score card over the given course keys
    ///
    /// # Arguments
    /// * `student_id` - Owning student
    /// * `course_keys` - Course keys in submission order
    #[must_use]
    pub fn new<I, S>(student_id: StudentId, course_keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            student_id,
            courses: course_keys
                .into_iter()
                .map(|key| (key.into(), CourseProgress::default()))
                .collect(),
        }
    }

    /// Create a zeroed score card over the default catalog
    #[must_use]
    pub fn with_default_courses(student_id: StudentId) -> Self {
        Self::new(student_id, DEFAULT_CATALOG.iter().map(|entry| entry.key))
    }

    /// Progress for a course, if the card tracks it
    #[must_use]
    pub fn progress(&self, course_key: &str) -> Option<&CourseProgress> {
        self.courses
            .iter()
            .find(|(key, _)| key == course_key)
            .map(|(_, progress)| progress)
    }

    /// Cumulative points for a course (0 for untracked courses)
    #[must_use]
    pub fn get_points(&self, course_key: &str) -> u32 {
        self.progress(course_key).map_or(0, |progress| progress.points)
    }

    /// Iterate `(course key, progress)` pairs in catalog order
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CourseProgress)> {
        self.courses.iter().map(|(key, progress)| (key.as_str(), progress))
    }

    /// Apply one score per course, pairing scores with courses in order.
    ///
    /// Scores are validated one at a time as they are applied, so a failure
    /// on a later course leaves earlier courses on this card already updated.
    /// Callers that need all-or-nothing semantics apply the batch to a
    /// scratch card first.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::IncorrectPointsFormat`] for a score outside `[0, 1000]`.
    pub fn add_scores(&mut self, scores: &[i64]) -> Result<()> {
        for (index, &score) in scores.iter().enumerate().take(self.courses.len()) {
            self.apply(index, score)?;
        }
        Ok(())
    }

    /// Apply a single score to one course
    ///
    /// # Errors
    /// Returns [`InvalidInputError::NoCourse`] if the card does not track the
    /// course, or [`InvalidInputError::IncorrectPointsFormat`] for an invalid score.
    pub fn add_score(&mut self, course_key: &str, score: i64) -> Result<()> {
        let index = self
            .courses
            .iter()
            .position(|(key, _)| key == course_key)
            .ok_or(InvalidInputError::NoCourse)?;
        self.apply(index, score)
    }

    fn apply(&mut self, index: usize, score: i64) -> Result<()> {
        let points = validation::score(score)?;
        let progress = &mut self.courses[index].1;
        progress.points = progress.points.saturating_add(points);
        progress.submissions += 1;
        Ok(())
    }
}

impl fmt::Display for ScoreCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} points: ", self.student_id)?;
        for (index, (key, progress)) in self.courses.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}={}", display_name(key), progress.points)?;
        }
        Ok(())
    }
}
