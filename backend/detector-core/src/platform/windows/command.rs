//! Command text for the Windows process and socket queries.
//!
//! The process name is embedded verbatim; callers must not pass quotes.

use super::ports::LISTENING_STATE;

use models::DetectionMode;

/// Marker every structured process query carries.
pub const JSON_CONVERTER: &str = "ConvertTo-Json";

/// Command listing `ProcessId` and `CommandLine` for every process named `process_name`.
///
/// `Structured` emits a JSON object (one match) or array (several matches),
/// `Legacy` emits `Key=Value` lines.
pub fn build_process_list_command(process_name: &str, mode: DetectionMode) -> String {
    match mode {
        DetectionMode::Structured => format!(
            r#"powershell -NoProfile -Command "Get-CimInstance Win32_Process -Filter \"name='{process_name}'\" | Select-Object ProcessId,CommandLine | {JSON_CONVERTER}""#
        ),
        DetectionMode::Legacy => format!(
            r#"wmic process where "name='{process_name}'" get ProcessId,CommandLine /format:list"#
        ),
    }
}

/// Command listing the listening socket table rows that mention `pid`.
///
/// `findstr` matches the pid as a substring, so rows of other processes whose
/// pid contains it can appear too.
pub fn build_port_list_command(pid: u32) -> String {
    format!(r#"netstat -ano | findstr "{pid}" | findstr "{LISTENING_STATE}""#)
}
