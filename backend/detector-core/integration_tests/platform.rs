use detector_core::platform::{PlatformDetector, WindowsDetector, for_current_os};

use models::DetectionMode;

// ============================================================================
// Public API tests for the Windows detector
// These drive the detector the way the CLI does: through the trait object
// ============================================================================

fn detector(mode: DetectionMode) -> Box<dyn PlatformDetector> {
    Box::new(WindowsDetector::with_mode(mode))
}

// ----------------------------------------------------------------------------
// Mode state
// ----------------------------------------------------------------------------

#[test]
fn given_new_detector_when_mode_read_then_is_legacy() {
    assert_eq!(WindowsDetector::new().mode(), DetectionMode::Legacy);
}

/// **VALUE**: Verifies the probe result changes the command the detector emits.
///
/// **WHY THIS MATTERS**: The CLI probes once and calls `set_mode`. If the mode were
/// not consulted, machines without wmic would never find the server.
#[test]
fn given_mode_switched_when_building_command_then_follows_new_mode() {
    // GIVEN: A legacy detector
    let mut detector = detector(DetectionMode::Legacy);
    assert!(!detector.process_list_command("a.exe").contains("ConvertTo-Json"));

    // WHEN: Switching to structured
    detector.set_mode(DetectionMode::Structured);

    // THEN: Commands and diagnostics follow
    assert_eq!(detector.mode(), DetectionMode::Structured);
    assert!(detector.process_list_command("a.exe").contains("ConvertTo-Json"));
    assert!(detector.error_messages().command_not_available.contains("PowerShell"));
}

#[test]
fn given_current_os_when_requesting_detector_then_only_windows_is_supported() {
    let detector = for_current_os();

    assert_eq!(detector.is_some(), cfg!(windows));
}

// ----------------------------------------------------------------------------
// Process info parsing
// ----------------------------------------------------------------------------

#[test]
fn given_tabular_output_with_port_and_token_when_parsing_then_returns_all_fields() {
    // GIVEN: Key=value output
    let stdout = "ProcessId=4321\nCommandLine=server.exe --extension_server_port=9090 --csrf_token=ab12-cd34 --verbose";

    // WHEN: Parsing
    let info = detector(DetectionMode::Legacy)
        .parse_process_info(stdout)
        .expect("process info");

    // THEN: pid 4321, port 9090, token ab12-cd34
    assert_eq!(info.pid(), 4321);
    assert_eq!(info.extension_port(), 9090);
    assert_eq!(info.csrf_token().as_str(), "ab12-cd34");
}

#[test]
fn given_json_array_without_port_when_parsing_then_port_is_zero() {
    // GIVEN: Array with one entry and no port flag
    let stdout = r#"[{"ProcessId":555,"CommandLine":"--csrf_token=deadbeef"}]"#;

    // WHEN: Parsing in structured mode
    let info = detector(DetectionMode::Structured)
        .parse_process_info(stdout)
        .expect("process info");

    // THEN: Port unknown, rest recovered
    assert_eq!(info.pid(), 555);
    assert_eq!(info.extension_port(), 0);
    assert_eq!(info.csrf_token().as_str(), "deadbeef");
}

#[test]
fn given_json_object_with_zero_pid_when_parsing_then_returns_none() {
    let stdout = r#"{"ProcessId":0,"CommandLine":"--csrf_token=abc"}"#;

    assert!(detector(DetectionMode::Structured).parse_process_info(stdout).is_none());
}

/// **VALUE**: Verifies an array is equivalent to its first element.
///
/// **WHY THIS MATTERS**: `ConvertTo-Json` emits an object for one match and an array
/// for several. Both shapes have to resolve to the same process.
///
/// **BUG THIS CATCHES**: Would catch picking the last element, or merging fields
/// across elements.
#[test]
fn given_json_array_when_parsing_then_matches_first_element_alone() {
    // GIVEN: Two matching processes, and the first one on its own
    let first = r#"{"ProcessId":100,"CommandLine":"--extension_server_port=1000 --csrf_token=aaaa"}"#;
    let second = r#"{"ProcessId":200,"CommandLine":"--extension_server_port=2000 --csrf_token=bbbb"}"#;
    let array = format!("[{first},{second}]");

    // WHEN: Parsing both inputs
    let detector = detector(DetectionMode::Structured);
    let from_array = detector.parse_process_info(&array);
    let from_object = detector.parse_process_info(first);

    // THEN: Identical results
    assert!(from_array.is_some());
    assert_eq!(from_array, from_object);
}

/// **VALUE**: Verifies that an empty array ends the parse.
///
/// **BUG THIS CATCHES**: Would catch a fallback to key=value parsing of the literal
/// `[]`, which would find nothing anyway but hides the intended control flow.
#[test]
fn given_empty_json_array_when_parsing_then_returns_none() {
    assert!(detector(DetectionMode::Structured).parse_process_info("[]").is_none());
    assert!(detector(DetectionMode::Legacy).parse_process_info(" [ ] ").is_none());
}

#[test]
fn given_pid_and_port_without_token_when_parsing_then_returns_none() {
    let tabular = "ProcessId=4321\nCommandLine=server.exe --extension_server_port=9090";
    let json = r#"{"ProcessId":4321,"CommandLine":"server.exe --extension_server_port=9090"}"#;

    for mode in [DetectionMode::Legacy, DetectionMode::Structured] {
        let detector = detector(mode);
        assert!(detector.parse_process_info(tabular).is_none());
        assert!(detector.parse_process_info(json).is_none());
    }
}

#[test]
fn given_malformed_json_without_tabular_pid_when_parsing_then_returns_none() {
    assert!(detector(DetectionMode::Structured).parse_process_info("{not json").is_none());
}

/// **VALUE**: Verifies malformed JSON still falls through to key=value parsing.
///
/// **WHY THIS MATTERS**: Truncated output from an interrupted PowerShell still holds
/// the pid and token text. Dropping it would make detection flaky.
#[test]
fn given_broken_json_with_tabular_fields_when_parsing_then_recovers_via_tabular() {
    // GIVEN: Text that starts like JSON but contains key=value fields
    let stdout = "{ broken\nProcessId=77\nCommandLine=x --csrf_token=beef";

    // WHEN: Parsing
    let info = detector(DetectionMode::Structured).parse_process_info(stdout);

    // THEN: Tabular fallback finds the process
    assert_eq!(info.map(|info| info.pid()), Some(77));
}

// ----------------------------------------------------------------------------
// Listening ports
// ----------------------------------------------------------------------------

#[test]
fn given_duplicate_listening_rows_when_parsing_ports_then_sorted_unique() {
    // GIVEN: 8080 twice (IPv4 and repeated row) and 9090 once, out of order
    let stdout = "\
  TCP    127.0.0.1:9090         0.0.0.0:0              LISTENING       4321
  TCP    127.0.0.1:8080         0.0.0.0:0              LISTENING       4321
  TCP    127.0.0.1:8080         0.0.0.0:0              LISTENING       4321
";

    // WHEN: Parsing
    let ports = detector(DetectionMode::Legacy).parse_listening_ports(stdout);

    // THEN: [8080, 9090]
    assert_eq!(ports.into_vec(), vec![8080, 9090]);
}

#[test]
fn given_no_matching_rows_when_parsing_ports_then_empty() {
    let ports = detector(DetectionMode::Legacy).parse_listening_ports("");

    assert!(ports.is_empty());
}

#[test]
fn given_pid_when_building_port_command_then_mentions_pid_and_state() {
    let command = detector(DetectionMode::Structured).port_list_command(4321);

    assert!(command.starts_with("netstat -ano"));
    assert!(command.contains("\"4321\""));
    assert!(command.contains("LISTENING"));
    assert!(!command.contains("ConvertTo-Json"));
}
