//! Data models for the progress tracker

pub mod course;
pub mod score_card;
pub mod student;

pub use course::{CatalogEntry, Course, CourseAttribute, DEFAULT_CATALOG};
pub use score_card::{CourseProgress, ScoreCard};
pub use student::{NewStudent, Student};

/// Identifier of a registered student
pub type StudentId = u32;
