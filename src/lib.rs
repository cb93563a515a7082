//! Shared library for the learning progress tracker
//! Contains the tracker engine, configuration and logging used by the CLI

pub mod core;
pub mod logger;
pub mod shared;

pub use crate::core::config;
pub use shared::*;
