use detector_core::error::CoreError;
use detector_core::error::config::ConfigError;

use common::ErrorLocation;

use std::error::Error;
use std::io::{Error as IoError, ErrorKind};
use std::panic::Location;
use std::path::PathBuf;

/// **VALUE**: Verifies config errors carry the file path and call-site location.
///
/// **WHY THIS MATTERS**: A config error is often the only thing a user reports.
/// Without the path and `[file:line:col]`, it cannot be traced back.
#[test]
fn given_read_error_when_formatted_then_includes_path_location_and_source() {
    // GIVEN: A ReadError wrapping an IO error
    let err = ConfigError::ReadError {
        location: ErrorLocation::from(Location::caller()),
        path: PathBuf::from("lsdetect.json"),
        source: IoError::new(ErrorKind::PermissionDenied, "access denied"),
    };

    // WHEN: Formatting
    let message = err.to_string();

    // THEN: Kind, path, source text and location are present
    assert!(message.starts_with("Config Read Error"));
    assert!(message.contains("lsdetect.json"));
    assert!(message.contains("access denied"));
    assert!(message.contains("error.rs"));
    assert!(err.source().is_some());
}

#[test]
fn given_config_error_when_converted_to_core_error_then_display_is_transparent() {
    let config_err = ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: String::from("process_name cannot be empty"),
    };
    let expected = config_err.to_string();

    let core_err: CoreError = config_err.into();

    assert_eq!(core_err.to_string(), expected);
}
