//! Integration tests for configuration management

use progress_tracker::config::{Config, ConfigOverrides};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a temporary config directory
fn setup_temp_config() -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_file = temp_dir.path().join("nested").join("config.toml");
    (temp_dir, config_file)
}

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(
        !config.logging.level.is_empty(),
        "Default log level should not be empty"
    );
    assert_eq!(config.session.banner, "Learning progress tracker");
    assert_eq!(config.session.prompt, "");
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/test.log"
verbose = true

[session]
banner = "Welcome"
prompt = "> "
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/test.log");
    assert!(config.logging.verbose);
    assert_eq!(config.session.banner, "Welcome");
    assert_eq!(config.session.prompt, "> ");
}

#[test]
fn test_config_from_toml_partial() {
    let toml_str = r#"
[logging]
level = "error"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse partial TOML");

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "");
    assert!(!config.logging.verbose);
    assert_eq!(config.session.banner, "");
}

#[test]
fn test_config_from_toml_rejects_wrong_types() {
    let toml_str = r#"
[logging]
verbose = "sometimes"
"#;

    assert!(Config::from_toml(toml_str).is_err());
}

#[test]
fn test_config_variable_expansion() {
    let toml_str = r#"
[logging]
file = "$PROGRESS_TRACKER/test.log"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML with variables");

    assert!(config.logging.file.contains("progress-tracker"));
    assert!(!config.logging.file.contains("$PROGRESS_TRACKER"));
    assert!(config.logging.file.ends_with("test.log"));
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    assert!(config.get("level").is_some());

    config.set("level", "DEBUG").expect("Failed to set level");
    assert_eq!(config.get("level").unwrap(), "debug");

    config.set("verbose", "true").expect("Failed to set verbose");
    assert_eq!(config.get("verbose").unwrap(), "true");
    assert!(config.logging.verbose);

    config.set("prompt", "> ").expect("Failed to set prompt");
    assert_eq!(config.get("prompt").unwrap(), "> ");

    assert!(config.get("unknown_key").is_none());
    assert!(config.set("unknown_key", "value").is_err());
}

#[test]
fn test_config_set_rejects_invalid_values() {
    let mut config = Config::from_defaults();
    let before = config.logging.level.clone();

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert_eq!(config.logging.level, before);
}

#[test]
fn test_config_unset() {
    let mut config = Config::from_defaults();
    let defaults = Config::from_defaults();

    config.set("banner", "Hi").expect("Failed to set banner");
    assert_eq!(config.session.banner, "Hi");

    config
        .unset("banner", &defaults)
        .expect("Failed to unset banner");
    assert_eq!(config.session.banner, defaults.session.banner);
    assert!(config.unset("nope", &defaults).is_err());
}

#[test]
fn test_config_save_and_load() {
    let (_temp_dir, config_file) = setup_temp_config();

    let mut config = Config::from_defaults();
    config.set("level", "info").expect("Failed to set level");
    config.set("banner", "Progress").expect("Failed to set banner");
    config.save_to(&config_file).expect("Failed to save config");

    let loaded = Config::load_from(&config_file);

    assert_eq!(loaded.logging.level, "info");
    assert_eq!(loaded.session.banner, "Progress");
}

#[test]
fn test_load_from_creates_missing_file() {
    let (_temp_dir, config_file) = setup_temp_config();
    assert!(!config_file.exists());

    let config = Config::load_from(&config_file);

    assert!(config_file.exists());
    assert_eq!(config.session.banner, Config::from_defaults().session.banner);
}

#[test]
fn test_load_from_merges_missing_fields() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    fs::write(&config_file, "[logging]\nlevel = \"error\"\n").unwrap();

    let config = Config::load_from(&config_file);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.session.banner, "Learning progress tracker");
    let rewritten = fs::read_to_string(&config_file).unwrap();
    assert!(rewritten.contains("[session]"));
}

#[test]
fn test_load_from_invalid_file_falls_back_to_defaults() {
    let (_temp_dir, config_file) = setup_temp_config();
    fs::create_dir_all(config_file.parent().unwrap()).unwrap();
    fs::write(&config_file, "not = [valid").unwrap();

    let config = Config::load_from(&config_file);

    assert_eq!(config.logging.level, Config::from_defaults().logging.level);
    assert_eq!(fs::read_to_string(&config_file).unwrap(), "not = [valid");
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();

    let overrides = ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/custom/path.log".to_string()),
        verbose: Some(true),
        banner: Some("Tracker".to_string()),
        prompt: Some("$ ".to_string()),
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/custom/path.log");
    assert!(config.logging.verbose);
    assert_eq!(config.session.banner, "Tracker");
    assert_eq!(config.session.prompt, "$ ");
}

#[test]
fn test_config_overrides_partial() {
    let mut config = Config::from_defaults();
    let banner = config.session.banner.clone();

    let overrides = ConfigOverrides {
        level: Some("debug".to_string()),
        ..ConfigOverrides::default()
    };

    config.apply_overrides(&overrides);

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.session.banner, banner);
}

#[test]
fn test_config_display_format() {
    let config = Config::from_defaults();
    let display_str = format!("{config}");

    assert!(display_str.contains("[logging]"));
    assert!(display_str.contains("[session]"));
    assert!(display_str.contains("level"));
    assert!(display_str.contains("banner = \"Learning progress tracker\""));
}

#[test]
fn test_merge_defaults_adds_missing_fields() {
    let toml_str = r#"
[logging]
level = "error"
file = ""
verbose = false
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse minimal config");
    let defaults = Config::from_defaults();

    assert!(config.merge_defaults(&defaults));
    assert_eq!(config.session.banner, defaults.session.banner);
    assert!(!config.merge_defaults(&defaults));
}

#[test]
fn test_merge_defaults_preserves_existing() {
    let toml_str = r#"
[logging]
level = "error"
file = "/my/custom/path.log"

[session]
banner = "Mine"
"#;

    let mut config = Config::from_toml(toml_str).expect("Failed to parse config");
    let defaults = Config::from_defaults();

    config.merge_defaults(&defaults);

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/my/custom/path.log");
    assert_eq!(config.session.banner, "Mine");
}

#[test]
fn test_get_tracker_dir() {
    let dir = Config::get_tracker_dir();

    assert!(dir.to_string_lossy().contains("progress-tracker"));
    assert_ne!(dir, PathBuf::from("."));
}

#[test]
fn test_get_config_file_path() {
    let path = Config::get_config_file_path();

    let path_str = path.to_string_lossy();
    assert!(path_str.ends_with("config.toml") || path_str.ends_with("dconfig.toml"));
}
