//! Core tracker engine: entities, storage and request-level operations

pub mod config;
pub mod controller;
pub mod database;
pub mod error;
pub mod models;
pub mod validation;

pub use controller::{Controller, CourseStanding, StudentNotifications};
pub use database::{Database, IdSequence, NotificationQueue};
pub use error::InvalidInputError;
