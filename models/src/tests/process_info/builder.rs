use crate::{ModelError, ProcessInfoBuilder};

/// **VALUE**: Verifies that builder validation rejects zero PIDs.
///
/// **WHY THIS MATTERS**: A `ProcessId` of 0 in CIM output means the field was
/// empty or access was denied. Handing it to netstat filtering would match
/// unrelated sockets.
///
/// **BUG THIS CATCHES**: Would catch the non-zero check being dropped during refactoring.
#[test]
fn given_zero_pid_when_building_process_info_then_returns_validation_error() {
    // GIVEN: Builder with PID set to zero
    let builder = ProcessInfoBuilder::default()
        .with_pid(0)
        .with_extension_port(9090)
        .with_csrf_token("ab12-cd34");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "PID must be non-zero");
        }
        Ok(info) => panic!("expected validation error, got {info:?}"),
    }
}

#[test]
fn given_missing_pid_when_building_then_returns_validation_error() {
    // GIVEN: Builder without PID
    let builder = ProcessInfoBuilder::default().with_csrf_token("ab12");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => assert_eq!(message, "PID is required"),
        Ok(info) => panic!("expected validation error, got {info:?}"),
    }
}

/// **VALUE**: Verifies that a process without a token cannot be represented.
///
/// **WHY THIS MATTERS**: The token is what makes a detected process usable.
/// Callers treat any `ProcessInfo` as connectable.
///
/// **BUG THIS CATCHES**: Would catch the token becoming optional in the builder.
#[test]
fn given_missing_token_when_building_then_returns_validation_error() {
    // GIVEN: Builder with pid and port only
    let builder = ProcessInfoBuilder::default()
        .with_pid(4321)
        .with_extension_port(9090);

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should return validation error
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "CSRF token is required");
        }
        Ok(info) => panic!("expected validation error, got {info:?}"),
    }
}

#[test]
fn given_empty_token_when_building_then_returns_validation_error() {
    let result = ProcessInfoBuilder::default()
        .with_pid(4321)
        .with_csrf_token("")
        .build();

    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert_eq!(message, "CSRF token cannot be empty");
        }
        Ok(info) => panic!("expected validation error, got {info:?}"),
    }
}

/// **VALUE**: Verifies that the error message for a malformed token does not echo it.
///
/// **BUG THIS CATCHES**: Would catch a `format!("{token}")` on the raw value ending up
/// in an error that gets logged.
#[test]
fn given_non_hex_token_when_building_then_error_does_not_leak_token() {
    // GIVEN: A token with characters outside the hex-and-hyphen set
    let builder = ProcessInfoBuilder::default()
        .with_pid(4321)
        .with_csrf_token("secret_value");

    // WHEN: Attempting to build
    let result = builder.build();

    // THEN: Should fail without including the value
    match result {
        Err(ModelError::Validation { message, .. }) => {
            assert!(message.starts_with("CSRF token must contain only hex digits"));
            assert!(!message.contains("secret_value"));
        }
        Ok(info) => panic!("expected validation error, got {info:?}"),
    }
}

#[test]
fn given_no_extension_port_when_building_then_port_defaults_to_zero() {
    // GIVEN: Builder with pid and token only
    let info = ProcessInfoBuilder::default()
        .with_pid(555)
        .with_csrf_token("deadbeef")
        .build()
        .expect("valid process info");

    // THEN: Port is unknown
    assert_eq!(info.extension_port(), 0);
    assert!(!info.has_extension_port());
}

#[test]
fn given_all_valid_fields_when_building_then_returns_process_info() {
    // GIVEN: Builder with all fields, upper-case hex included
    let builder = ProcessInfoBuilder::default()
        .with_pid(4321)
        .with_extension_port(9090)
        .with_csrf_token("AB12-cd34");

    // WHEN: Building
    let info = builder.build().expect("valid process info");

    // THEN: Fields are populated and the token stays hidden from Debug
    assert_eq!(info.pid(), 4321);
    assert_eq!(info.extension_port(), 9090);
    assert!(info.has_extension_port());
    assert_eq!(info.csrf_token().as_str(), "AB12-cd34");
    assert!(!format!("{info:?}").contains("AB12"));
}
