// Unit tests for the crate-private flag extractors.
// Parsing through the public API is covered in integration_tests/platform.

use crate::platform::flags::{extract_csrf_token, extract_extension_port};

/// **VALUE**: Verifies both separators the language server is launched with.
///
/// **WHY THIS MATTERS**: Launchers pass `--flag=value` or `--flag value` depending on
/// how the host quotes its arguments. Supporting only one silently loses the port.
#[test]
fn given_equals_or_space_separator_when_extracting_port_then_both_match() {
    assert_eq!(extract_extension_port("--extension_server_port=9090"), 9090);
    assert_eq!(extract_extension_port("--extension_server_port 9091"), 9091);
    assert_eq!(extract_extension_port("--extension_server_port \t 9092"), 9092);
}

#[test]
fn given_no_port_flag_when_extracting_port_then_returns_zero() {
    assert_eq!(extract_extension_port("server.exe --csrf_token=abc"), 0);
}

#[test]
fn given_port_out_of_range_when_extracting_port_then_returns_zero() {
    assert_eq!(extract_extension_port("--extension_server_port=99999"), 0);
}

/// **VALUE**: Verifies the flag name matches case-insensitively.
///
/// **BUG THIS CATCHES**: Would catch the `(?i)` prefix being dropped from the pattern.
#[test]
fn given_upper_case_flag_when_extracting_token_then_matches() {
    // GIVEN: Command line with an upper-case flag name
    let command_line = "server.exe --CSRF_TOKEN=AB12-cd34 --other";

    // WHEN: Extracting the token
    let token = extract_csrf_token(command_line);

    // THEN: Value is returned unchanged
    assert_eq!(token, Some("AB12-cd34"));
}

#[test]
fn given_token_followed_by_other_flags_when_extracting_then_stops_at_whitespace() {
    let command_line = "--csrf_token 0f1e2d3c-4b5a-6978-8796-a5b4c3d2e1f0 --extension_server_port=1";

    assert_eq!(
        extract_csrf_token(command_line),
        Some("0f1e2d3c-4b5a-6978-8796-a5b4c3d2e1f0")
    );
}

#[test]
fn given_non_hex_value_when_extracting_token_then_returns_none() {
    assert_eq!(extract_csrf_token("--csrf_token=zzzz"), None);
    assert_eq!(extract_csrf_token("--csrf_token="), None);
}
