use crate::platform::windows::process_info::parse_process_info;

use models::DetectionMode;

const WMIC_OUTPUT: &str = "\r\r\n\r\r\nCommandLine=\"C:\\Program Files\\Host\\language_server_windows_x64.exe\" --extension_server_port=9090 --csrf_token=ab12-cd34 --random_port\r\r\nProcessId=4321\r\r\n\r\r\n";

/// **VALUE**: Verifies the key=value layout `wmic /format:list` produces.
///
/// **WHY THIS MATTERS**: wmic pads its output with `\r\r\n` line endings and puts
/// `CommandLine` before `ProcessId`. Both must parse regardless of order.
#[test]
fn given_wmic_list_output_when_parsing_then_returns_process_info() {
    // WHEN: Parsing real-shaped wmic output in legacy mode
    let info = parse_process_info(WMIC_OUTPUT, DetectionMode::Legacy).expect("process info");

    // THEN: All three fields are recovered
    assert_eq!(info.pid(), 4321);
    assert_eq!(info.extension_port(), 9090);
    assert_eq!(info.csrf_token().as_str(), "ab12-cd34");
}

#[test]
fn given_structured_mode_and_tabular_output_when_parsing_then_falls_back_to_tabular() {
    let info = parse_process_info(WMIC_OUTPUT, DetectionMode::Structured).expect("process info");

    assert_eq!(info.pid(), 4321);
}

/// **VALUE**: Verifies JSON is detected from the text even in legacy mode.
///
/// **WHY THIS MATTERS**: The mode is probed once. If the environment changes after
/// the probe, the parser must still read what the tool actually printed.
#[test]
fn given_legacy_mode_and_json_output_when_parsing_then_reads_json() {
    // GIVEN: ConvertTo-Json output for a single process
    let stdout = r#"{
    "ProcessId":  555,
    "CommandLine":  "server.exe --csrf_token=deadbeef --extension_server_port 1234"
}"#;

    // WHEN: Parsing in legacy mode
    let info = parse_process_info(stdout, DetectionMode::Legacy).expect("process info");

    // THEN: JSON fields are used
    assert_eq!(info.pid(), 555);
    assert_eq!(info.extension_port(), 1234);
    assert_eq!(info.csrf_token().as_str(), "deadbeef");
}

#[test]
fn given_json_with_byte_order_mark_when_parsing_then_reads_json() {
    let stdout = "\u{feff}{\"ProcessId\":7,\"CommandLine\":\"--csrf_token=abc\"}";

    let info = parse_process_info(stdout, DetectionMode::Legacy).expect("process info");

    assert_eq!(info.pid(), 7);
}

#[test]
fn given_pid_as_numeric_string_when_parsing_then_accepts_it() {
    let stdout = r#"{"ProcessId":"42","CommandLine":"--csrf_token=abc"}"#;

    let info = parse_process_info(stdout, DetectionMode::Structured).expect("process info");

    assert_eq!(info.pid(), 42);
}

/// **VALUE**: Verifies every falsy pid representation is rejected.
///
/// **BUG THIS CATCHES**: Would catch a pid of 0 reaching `netstat | findstr "0"`,
/// which matches almost every socket row.
#[test]
fn given_falsy_pid_values_when_parsing_then_returns_none() {
    for pid in ["0", "null", "false", "\"\"", "\"0\""] {
        let stdout = format!(r#"{{"ProcessId":{pid},"CommandLine":"--csrf_token=abc"}}"#);

        assert!(
            parse_process_info(&stdout, DetectionMode::Structured).is_none(),
            "pid {pid} should be rejected"
        );
    }
}

#[test]
fn given_null_command_line_when_parsing_then_returns_none() {
    // CommandLine is null when the caller lacks rights to read it.
    let stdout = r#"{"ProcessId":555,"CommandLine":null}"#;

    assert!(parse_process_info(stdout, DetectionMode::Structured).is_none());
}

#[test]
fn given_valid_json_that_is_not_an_object_when_parsing_then_returns_none() {
    assert!(parse_process_info("42", DetectionMode::Structured).is_none());
    assert!(parse_process_info("[1, 2]", DetectionMode::Structured).is_none());
}

#[test]
fn given_tabular_pid_zero_when_parsing_then_returns_none() {
    let stdout = "ProcessId=0\nCommandLine=--csrf_token=abc";

    assert!(parse_process_info(stdout, DetectionMode::Legacy).is_none());
}

#[test]
fn given_empty_output_when_parsing_then_returns_none_in_both_modes() {
    assert!(parse_process_info("", DetectionMode::Legacy).is_none());
    assert!(parse_process_info("   \r\n", DetectionMode::Structured).is_none());
}
