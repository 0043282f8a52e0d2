//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use serial_test::serial;
use starmap::config::AppConfig;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("STARMAP_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("STARMAP_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_override_nested_number() {
    std::env::set_var("STARMAP_INPUT__PICK_RADIUS", "25.5");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.input.pick_radius, 25.5);
    std::env::remove_var("STARMAP_INPUT__PICK_RADIUS");
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("STARMAP_WINDOW__TITLE");

    let cwd = std::env::current_dir().unwrap();
    assert!(cwd.join("config/default.toml").exists());

    let config = AppConfig::load_from(cwd.join("config")).unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.window.title, defaults.window.title);
    assert_eq!(config.camera.start_distance, defaults.camera.start_distance);
    assert_eq!(config.data.systems_path, defaults.data.systems_path);
    assert_eq!(config.editor.password, defaults.editor.password);
}

#[test]
#[serial]
fn test_user_file_overrides_default_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("default.toml"),
        "[window]\ntitle = \"Base\"\nwidth = 640\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("user.toml"), "[window]\ntitle = \"Mine\"\n").unwrap();

    let config = AppConfig::load_from(dir.path()).unwrap();
    assert_eq!(config.window.title, "Mine");
    assert_eq!(config.window.width, 640);
    // Untouched sections keep their defaults
    assert_eq!(config.input.click_slop, AppConfig::default().input.click_slop);
}

#[test]
#[serial]
fn test_missing_config_dir_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig::load_from(dir.path().join("nowhere")).unwrap();
    assert_eq!(config.window.width, AppConfig::default().window.width);
}

#[test]
#[serial]
fn test_invalid_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("user.toml"), "[window]\nwidth = \"wide\"\n").unwrap();
    assert!(AppConfig::load_from(dir.path()).is_err());
}
