//! CLI command handlers for the progress tracker.
//!
//! Each subcommand is implemented in its own submodule.

pub mod config;
pub mod track;
