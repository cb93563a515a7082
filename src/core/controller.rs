//! Request-level operations over the tracker database.
//!
//! The controller turns raw text input into validated entity operations and
//! keeps the cross-entity bookkeeping consistent: a points submission updates
//! the student's score card, every course's aggregate counters, enrollment,
//! completion and the notification queue.

use crate::core::database::Database;
use crate::core::error::{InvalidInputError, Result};
use crate::core::models::{CourseAttribute, NewStudent, ScoreCard, Student, StudentId};
use crate::{debug, info};

/// Number of whitespace separated tokens in a points submission
pub const POINTS_TOKENS: usize = 5;

/// Placeholder returned by [`Controller::get_courses_maxmin`] when no course qualifies
pub const NOT_AVAILABLE: &str = "n/a";

/// Placeholder for an empty side of a max/min result
const NO_COURSES: &str = "N/A";

/// One row of a course statistics table
#[derive(Debug, Clone, PartialEq)]
pub struct CourseStanding {
    /// Enrolled student
    pub student_id: StudentId,
    /// Cumulative points in the course
    pub points: u32,
    /// Percentage of the pass threshold reached, one decimal
    pub completion: f64,
}

impl CourseStanding {
    /// Completion rendered as e.g. `"75.0%"`
    #[must_use]
    pub fn completion_label(&self) -> String {
        format!("{:.1}%", self.completion)
    }
}

/// Formatted completion messages for one student
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentNotifications {
    /// Student being notified
    pub student_id: StudentId,
    /// One message per completed course
    pub messages: Vec<String>,
}

/// Validating front door to the [`Database`]
#[derive(Debug, Default)]
pub struct Controller {
    db: Database,
}

impl Controller {
    /// Wrap a database
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }

    /// Read-only access to the underlying database
    #[must_use]
    pub const fn database(&self) -> &Database {
        &self.db
    }

    /// Register a student from `"first [last names...] email"`.
    ///
    /// # Errors
    /// - [`InvalidInputError::NotEnoughWords`] for fewer than three words
    /// - a field validation error for a malformed name or email
    /// - [`InvalidInputError::EmailExists`] if the email is already registered
    pub fn add_student(&mut self, student_input: &str) -> Result<StudentId> {
        let credentials = NewStudent::parse(student_input)?;
        if self.db.get_student_by_email(&credentials.email).is_some() {
            debug!("Rejected duplicate email {}", credentials.email);
            return Err(InvalidInputError::EmailExists);
        }
        let id = self.db.add_student(credentials);
        info!("Added student {id}");
        Ok(id)
    }

    /// Record a submission `"student_id p1 p2 p3 p4"`, one score per course
    /// in catalog order.
    ///
    /// The student is resolved before the token count is checked. The batch
    /// is validated on a scratch score card, so a rejected submission leaves
    /// the student and every course untouched.
    ///
    /// # Errors
    /// - [`InvalidInputError::NoStudent`] if the first token names no student
    /// - [`InvalidInputError::IncorrectPointsFormat`] for a wrong token count,
    ///   a non-integer score or a score outside `[0, 1000]`
    pub fn add_points(&mut self, points_input: &str) -> Result<()> {
        let tokens: Vec<&str> = points_input.split_whitespace().collect();
        let id_text = tokens
            .first()
            .ok_or(InvalidInputError::IncorrectPointsFormat)?;
        let student_id = self.get_student(id_text)?.id();

        if tokens.len() != POINTS_TOKENS {
            return Err(InvalidInputError::IncorrectPointsFormat);
        }
        let scores = tokens[1..]
            .iter()
            .map(|token| token.parse::<i64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| InvalidInputError::IncorrectPointsFormat)?;

        let mut new_scores = ScoreCard::new(student_id, self.db.course_keys());
        new_scores.add_scores(&scores)?;
        self.update_course_statistics(&new_scores);

        let student = self
            .db
            .get_student_mut(student_id)
            .ok_or_else(|| InvalidInputError::NoStudent(student_id.to_string()))?;
        student.score_card.add_scores(&scores)?;
        info!("Recorded points for student {student_id}: {scores:?}");
        Ok(())
    }

    /// Fold one submission's deltas into enrollment, completion and course
    /// aggregates. Runs before the deltas reach the student's own card.
    fn update_course_statistics(&mut self, new_scores: &ScoreCard) {
        let student_id = new_scores.student_id;
        for (course_key, progress) in new_scores.entries() {
            let new_points = progress.points;
            self.db
                .update_completed_course(student_id, course_key, new_points);
            self.db
                .update_enrolled_course(student_id, course_key, new_points);
            if let Some(course) = self.db.get_course_mut(course_key) {
                course.record_submission(new_points);
            }
        }
    }

    /// Standings of every enrolled student in a course, best first.
    ///
    /// Rows are sorted by points descending, then by identifier ascending.
    ///
    /// # Errors
    /// Returns [`InvalidInputError::NoCourse`] for an unknown course.
    pub fn get_course_statistics(&self, course_name: &str) -> Result<Vec<CourseStanding>> {
        let course = self
            .db
            .get_course(course_name.trim())
            .ok_or(InvalidInputError::NoCourse)?;

        let mut stats: Vec<CourseStanding> = course
            .enrolled_students
            .iter()
            .map(|&student_id| {
                let points = self.db.student_points(student_id, &course.key);
                CourseStanding {
                    student_id,
                    points,
                    completion: course.completion_percentage(points),
                }
            })
            .collect();
        stats.sort_by(|a, b| {
            b.points
                .cmp(&a.points)
                .then_with(|| a.student_id.cmp(&b.student_id))
        });
        Ok(stats)
    }

    /// Resolve a student from identifier text
    ///
    /// # Errors
    /// Returns [`InvalidInputError::NoStudent`] carrying `student_id` if it is
    /// not an integer or no such student exists.
    pub fn get_student(&self, student_id: &str) -> Result<&Student> {
        let no_student = || InvalidInputError::NoStudent(student_id.to_string());
        let id: StudentId = student_id.trim().parse().map_err(|_| no_student())?;
        self.db.get_student(id).ok_or_else(no_student)
    }

    /// All student identifiers in registration order
    #[must_use]
    pub fn list_student_ids(&self) -> Vec<StudentId> {
        self.db.student_ids()
    }

    /// Courses with the highest and lowest value of `attribute`.
    ///
    /// Only courses whose attribute is at least 1 take part. Ties are
    /// joined with `", "`, and a course in the maximum set never appears in
    /// the minimum set. Returns `("n/a", "n/a")` when no course qualifies and
    /// `"N/A"` for an empty minimum side.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn get_courses_maxmin(&self, attribute: CourseAttribute) -> (String, String) {
        let courses = self.db.get_courses_by_attribute(attribute, 1.0);
        if courses.is_empty() {
            return (NOT_AVAILABLE.to_string(), NOT_AVAILABLE.to_string());
        }

        let values: Vec<f64> = courses
            .iter()
            .map(|course| course.attribute(attribute))
            .collect();
        let most = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let least = values.iter().copied().fold(f64::INFINITY, f64::min);

        let max_courses: Vec<&str> = courses
            .iter()
            .zip(&values)
            .filter(|(_, value)| **value == most)
            .map(|(course, _)| course.name.as_str())
            .collect();
        let min_courses: Vec<&str> = courses
            .iter()
            .zip(&values)
            .filter(|(course, value)| {
                **value == least && !max_courses.contains(&course.name.as_str())
            })
            .map(|(course, _)| course.name.as_str())
            .collect();

        (joined_courses(&max_courses), joined_courses(&min_courses))
    }

    /// Drain pending completions into formatted messages.
    ///
    /// Messages are grouped per student in the order completions happened.
    /// The queue is emptied, so a second call returns nothing new.
    pub fn get_new_notifications(&mut self) -> Vec<StudentNotifications> {
        let pending = self.db.drain_notifications();
        let notifications: Vec<StudentNotifications> = pending
            .into_iter()
            .filter_map(|(student_id, courses)| {
                let student = self.db.get_student(student_id)?;
                Some(StudentNotifications {
                    student_id,
                    messages: format_notifications(student, &courses),
                })
            })
            .collect();
        if !notifications.is_empty() {
            info!("Drained notifications for {} students", notifications.len());
        }
        notifications
    }
}

/// One completion message per course for `student`
#[must_use]
pub fn format_notifications(student: &Student, courses: &[String]) -> Vec<String> {
    courses
        .iter()
        .map(|course| {
            format!(
                "To: {}\nRe: Your Learning Progress\nHello, {} {}! You have accomplished our {} course!",
                student.email,
                student.first_name,
                student.last_name,
                capitalize(course)
            )
        })
        .collect()
}

/// Upper-case the first character and lower-case the rest
fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
    })
}

fn joined_courses(courses: &[&str]) -> String {
    if courses.is_empty() {
        NO_COURSES.to_string()
    } else {
        courses.join(", ")
    }
}
