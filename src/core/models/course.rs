//! Course model and the fixed course catalog

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::StudentId;

/// Key, display name and pass threshold for one catalog course.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Lower-case lookup key (e.g., "dsa")
    pub key: &'static str,
    /// Display name (e.g., "DSA")
    pub name: &'static str,
    /// Points required to complete the course
    pub pass_threshold: u32,
}

/// The courses offered by the tracker, in score-submission order.
pub const DEFAULT_CATALOG: [CatalogEntry; 4] = [
    CatalogEntry {
        key: "python",
        name: "Python",
        pass_threshold: 600,
    },
    CatalogEntry {
        key: "dsa",
        name: "DSA",
        pass_threshold: 400,
    },
    CatalogEntry {
        key: "databases",
        name: "Databases",
        pass_threshold: 480,
    },
    CatalogEntry {
        key: "flask",
        name: "Flask",
        pass_threshold: 550,
    },
];

/// Display name for a catalog key, falling back to the key itself.
#[must_use]
pub fn display_name(key: &str) -> &str {
    DEFAULT_CATALOG
        .iter()
        .find(|entry| entry.key == key)
        .map_or(key, |entry| entry.name)
}

/// Numeric course attributes that catalog-wide extremes can be computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseAttribute {
    /// Number of enrolled students
    Enrolled,
    /// Number of recorded submissions
    Submissions,
    /// Average score per submission
    AvgScore,
}

impl CourseAttribute {
    /// All attributes in the order the statistics overview reports them.
    pub const ALL: [Self; 3] = [Self::Enrolled, Self::Submissions, Self::AvgScore];
}

impl FromStr for CourseAttribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "enrolled" => Ok(Self::Enrolled),
            "submissions" => Ok(Self::Submissions),
            "avg_score" | "avg-score" => Ok(Self::AvgScore),
            _ => Err(format!("Unknown course attribute: {s}")),
        }
    }
}

impl fmt::Display for CourseAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Enrolled => write!(f, "enrolled"),
            Self::Submissions => write!(f, "submissions"),
            Self::AvgScore => write!(f, "avg_score"),
        }
    }
}

/// A course with its aggregate progress counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    /// Lookup key (e.g., "python")
    pub key: String,

    /// Display name (e.g., "Python")
    pub name: String,

    /// Cumulative points a student needs to complete the course
    pub pass_threshold: u32,

    /// Students with at least one positive score, in enrollment order
    pub enrolled_students: Vec<StudentId>,

    /// Number of recorded submissions
    pub submissions: u64,

    /// Number of students who crossed the pass threshold
    pub completed: u64,

    /// Sum of all submitted points
    pub total_score: u64,

    /// `total_score / submissions`, or 0 without submissions
    pub avg_score: f64,
}

impl Course {
    /// Create a course with zeroed counters
    ///
    /// # Arguments
    /// * `key` - Lookup key
    /// * `name` - Display name
    /// * `pass_threshold` - Points required for completion
    #[must_use]
    pub fn new(key: impl Into<String>, name: impl Into<String>, pass_threshold: u32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            pass_threshold,
            enrolled_students: Vec::new(),
            submissions: 0,
            completed: 0,
            total_score: 0,
            avg_score: 0.0,
        }
    }

    /// Number of enrolled students
    #[must_use]
    pub fn enrolled(&self) -> usize {
        self.enrolled_students.len()
    }

    /// Enroll a student; returns `false` if they were already enrolled
    pub fn enroll(&mut self, student_id: StudentId) -> bool {
        if self.enrolled_students.contains(&student_id) {
            return false;
        }
        self.enrolled_students.push(student_id);
        true
    }

    /// Add one submission worth `points` and refresh the average
    pub fn record_submission(&mut self, points: u32) {
        self.total_score += u64::from(points);
        self.submissions += 1;
        self.set_avg_score();
    }

    /// Recompute the average score from the running totals
    #[allow(clippy::cast_precision_loss)]
    pub fn set_avg_score(&mut self) {
        self.avg_score = if self.submissions > 0 {
            self.total_score as f64 / self.submissions as f64
        } else {
            0.0
        };
    }

    /// Value of a numeric attribute, widened to `f64` for comparisons
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn attribute(&self, attribute: CourseAttribute) -> f64 {
        match attribute {
            CourseAttribute::Enrolled => self.enrolled() as f64,
            CourseAttribute::Submissions => self.submissions as f64,
            CourseAttribute::AvgScore => self.avg_score,
        }
    }

    /// Completion percentage for `points`, rounded half-to-even to one decimal
    #[must_use]
    pub fn completion_percentage(&self, points: u32) -> f64 {
        if self.pass_threshold == 0 {
            return 100.0;
        }
        let percentage = f64::from(points) / f64::from(self.pass_threshold) * 100.0;
        (percentage * 10.0).round_ties_even() / 10.0
    }
}

impl From<&CatalogEntry> for Course {
    fn from(entry: &CatalogEntry) -> Self {
        Self::new(entry.key, entry.name, entry.pass_threshold)
    }
}
