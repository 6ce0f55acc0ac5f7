use crate::platform::flags::{extract_csrf_token, extract_extension_port};

use models::{DetectionMode, ProcessInfo, ProcessInfoBuilder};

use std::sync::OnceLock;

use const_format::concatcp;
use log::{debug, trace};
use regex::Regex;
use serde_json::Value;

const PROCESS_ID_FIELD: &str = "ProcessId";
const COMMAND_LINE_FIELD: &str = "CommandLine";
const TABULAR_PID_PATTERN: &str = concatcp!(PROCESS_ID_FIELD, r"=(\d+)");
const BYTE_ORDER_MARK: char = '\u{feff}';

static TABULAR_PID_REGEX: OnceLock<Regex> = OnceLock::new();

fn tabular_pid_regex() -> &'static Regex {
    TABULAR_PID_REGEX.get_or_init(|| Regex::new(TABULAR_PID_PATTERN).expect("valid regex pattern"))
}

/// Recover pid, extension port and csrf token from process-list output.
///
/// JSON is tried when `mode` is [`DetectionMode::Structured`] or when the text
/// itself starts with `{` or `[`. Text that is not valid JSON falls back to the
/// `Key=Value` layout. An empty JSON array is a definitive "no process".
///
/// Returns `None` when no pid or no csrf token can be found. Never fails.
pub fn parse_process_info(stdout: &str, mode: DetectionMode) -> Option<ProcessInfo> {
    let trimmed = stdout.trim().trim_start_matches(BYTE_ORDER_MARK).trim_start();

    if mode.is_structured() || looks_like_json(trimmed) {
        match serde_json::from_str::<Value>(trimmed) {
            Ok(value) => return parse_structured(value),
            Err(e) => debug!("Process list is not JSON ({e}), trying key=value layout"),
        }
    }

    parse_tabular(stdout)
}

fn looks_like_json(text: &str) -> bool {
    text.starts_with('{') || text.starts_with('[')
}

fn parse_structured(value: Value) -> Option<ProcessInfo> {
    let entry = match value {
        Value::Array(mut entries) => {
            if entries.is_empty() {
                trace!("Process query returned an empty array");
                return None;
            }
            if entries.len() > 1 {
                debug!("{} matching processes, using the first", entries.len());
            }
            entries.swap_remove(0)
        }
        other => other,
    };

    let Some(pid) = entry.get(PROCESS_ID_FIELD).and_then(json_pid) else {
        trace!("JSON entry has no usable {PROCESS_ID_FIELD}");
        return None;
    };

    let command_line = entry
        .get(COMMAND_LINE_FIELD)
        .and_then(Value::as_str)
        .unwrap_or_default();

    assemble(pid, command_line)
}

// 0, "", null and false all mean "no pid".
fn json_pid(value: &Value) -> Option<u32> {
    let pid = match value {
        Value::Number(number) => number.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(text) => text.trim().parse::<u32>().ok(),
        _ => None,
    };

    pid.filter(|&pid| pid != 0)
}

fn parse_tabular(text: &str) -> Option<ProcessInfo> {
    let Some(pid) = tabular_pid_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
    else {
        trace!("No {PROCESS_ID_FIELD}= line in process list");
        return None;
    };

    assemble(pid, text)
}

fn assemble(pid: u32, command_line: &str) -> Option<ProcessInfo> {
    let Some(csrf_token) = extract_csrf_token(command_line) else {
        debug!("Process {pid} has no csrf token on its command line");
        return None;
    };

    let extension_port = extract_extension_port(command_line);

    ProcessInfoBuilder::default()
        .with_pid(pid)
        .with_extension_port(extension_port)
        .with_csrf_token(csrf_token)
        .build()
        .inspect(|_| debug!("Found language server PID {pid}, extension port {extension_port}"))
        .inspect_err(|e| debug!("Discarding process {pid}: {e}"))
        .ok()
}
