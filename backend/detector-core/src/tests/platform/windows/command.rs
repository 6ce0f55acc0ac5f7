use crate::platform::windows::command::{
    JSON_CONVERTER, build_port_list_command, build_process_list_command,
};

use models::DetectionMode;

#[test]
fn given_structured_mode_when_building_process_command_then_uses_cim_and_json() {
    // WHEN: Building the structured command
    let command =
        build_process_list_command("language_server_windows_x64.exe", DetectionMode::Structured);

    // THEN: PowerShell CIM query with name filter and JSON output
    assert!(command.starts_with("powershell -NoProfile -Command "));
    assert!(command.contains("Get-CimInstance Win32_Process"));
    assert!(command.contains(r#"-Filter \"name='language_server_windows_x64.exe'\""#));
    assert!(command.contains("Select-Object ProcessId,CommandLine"));
    assert!(command.contains(JSON_CONVERTER));
}

/// **VALUE**: Verifies legacy commands never ask for JSON.
///
/// **WHY THIS MATTERS**: `wmic` has no JSON output. A stray `ConvertTo-Json` would make
/// the command fail on machines where only the legacy tool works.
#[test]
fn given_legacy_mode_when_building_process_command_then_uses_wmic_list_format() {
    // WHEN: Building the legacy command
    let command = build_process_list_command("server.exe", DetectionMode::Legacy);

    // THEN: wmic key=value list, no JSON conversion
    assert_eq!(
        command,
        r#"wmic process where "name='server.exe'" get ProcessId,CommandLine /format:list"#
    );
    assert!(!command.contains(JSON_CONVERTER));
}

#[test]
fn given_pid_when_building_port_command_then_filters_pid_and_listening() {
    let command = build_port_list_command(4321);

    assert_eq!(
        command,
        r#"netstat -ano | findstr "4321" | findstr "LISTENING""#
    );
}
