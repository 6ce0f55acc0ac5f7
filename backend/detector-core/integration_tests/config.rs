use detector_core::config::{
    CONFIG_DIR_ENV, DetectorConfig, MODE_ENV, PROCESS_NAME_ENV, default_config_dir,
};
use detector_core::error::config::ConfigError;

use models::DetectionMode;

use std::fs;
use std::path::PathBuf;

use serial_test::serial;
use tempfile::tempdir;

// Environment mutation is process-wide; every test touching it is #[serial].
fn clear_env() {
    // SAFETY: serialized by #[serial], no other thread reads these variables.
    unsafe {
        std::env::remove_var(CONFIG_DIR_ENV);
        std::env::remove_var(PROCESS_NAME_ENV);
        std::env::remove_var(MODE_ENV);
    }
}

fn set_env(key: &str, value: &str) {
    // SAFETY: serialized by #[serial], no other thread reads these variables.
    unsafe { std::env::set_var(key, value) }
}

#[test]
fn given_missing_file_when_loading_then_returns_defaults() {
    // GIVEN: An empty config directory
    let dir = tempdir().expect("temp dir");

    // WHEN: Loading
    let config = DetectorConfig::load(dir.path()).expect("defaults");

    // THEN: Defaults
    assert_eq!(config, DetectorConfig::default());
}

/// **VALUE**: Verifies save + load preserves every field.
///
/// **WHY THIS MATTERS**: A forced mode written by one run must be honored by the next,
/// otherwise the probe runs again on machines where it is known to misfire.
#[test]
fn given_saved_config_when_loading_then_values_are_preserved() {
    // GIVEN: A customized config saved to disk
    let dir = tempdir().expect("temp dir");
    let mut config = DetectorConfig {
        process_name: String::from("custom_server.exe"),
        mode: Some(DetectionMode::Structured),
        command_timeout_secs: 3,
        ..DetectorConfig::default()
    };
    config.poll.max_elapsed_secs = 5;
    config.save(dir.path()).expect("save");

    // WHEN: Loading it back
    let loaded = DetectorConfig::load(dir.path()).expect("load");

    // THEN: Same values, and no temp file left behind
    assert_eq!(loaded, config);
    assert!(!dir.path().join("lsdetect.json.tmp").exists());
}

#[test]
fn given_partial_file_when_loading_then_missing_fields_use_defaults() {
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("lsdetect.json"), r#"{"mode":"legacy"}"#).expect("write");

    let config = DetectorConfig::load(dir.path()).expect("load");

    assert_eq!(config.mode, Some(DetectionMode::Legacy));
    assert_eq!(config.process_name, DetectorConfig::default().process_name);
}

#[test]
fn given_corrupted_file_when_loading_then_returns_parse_error() {
    // GIVEN: Invalid JSON on disk
    let dir = tempdir().expect("temp dir");
    fs::write(dir.path().join("lsdetect.json"), "{ nope").expect("write");

    // WHEN: Loading
    let result = DetectorConfig::load(dir.path());

    // THEN: ParseError naming the file
    match result {
        Err(ConfigError::ParseError { path, .. }) => {
            assert!(path.ends_with("lsdetect.json"));
        }
        other => panic!("expected parse error, got {other:?}"),
    }
}

#[test]
fn given_invalid_values_on_disk_when_loading_then_returns_validation_error() {
    let dir = tempdir().expect("temp dir");
    fs::write(
        dir.path().join("lsdetect.json"),
        r#"{"process_name":"a\"b.exe"}"#,
    )
    .expect("write");

    let result = DetectorConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ValidationError { .. })));
}

// ----------------------------------------------------------------------------
// Environment overrides
// ----------------------------------------------------------------------------

#[test]
#[serial]
fn given_env_overrides_when_applied_then_replace_file_values() {
    // GIVEN: Both override variables set
    clear_env();
    set_env(PROCESS_NAME_ENV, "other_server.exe");
    set_env(MODE_ENV, "Structured");
    let mut config = DetectorConfig::default();

    // WHEN: Applying overrides
    let result = config.apply_env_overrides();
    clear_env();

    // THEN: Values replaced
    assert!(result.is_ok());
    assert_eq!(config.process_name, "other_server.exe");
    assert_eq!(config.mode, Some(DetectionMode::Structured));
}

#[test]
#[serial]
fn given_invalid_mode_env_when_applied_then_returns_validation_error() {
    clear_env();
    set_env(MODE_ENV, "netstat");
    let mut config = DetectorConfig::default();

    let result = config.apply_env_overrides();
    clear_env();

    match result {
        Err(ConfigError::ValidationError { reason, .. }) => {
            assert!(reason.starts_with(MODE_ENV));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
#[serial]
fn given_config_dir_env_when_resolving_dir_then_uses_override() {
    clear_env();
    set_env(CONFIG_DIR_ENV, "/tmp/lsdetect-test-config");

    let dir = default_config_dir();
    clear_env();

    assert_eq!(dir.ok(), Some(PathBuf::from("/tmp/lsdetect-test-config")));
}
