//! Shared constants and helpers for the tracker binary and library

/// Banner printed when an interactive session starts
pub const DEFAULT_BANNER: &str = "Learning progress tracker";

/// Returns the current version of the `progress-tracker` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
