use crate::DEFAULT_PROCESS_NAME;

use const_format::concatcp;
use models::{DetectionMode, Diagnostics};

pub const PROCESS_NOT_FOUND: &str =
    "Language server process not found. Make sure the host application is running.";

const STRUCTURED_COMMAND_UNAVAILABLE: &str = "PowerShell Get-CimInstance is not available. \
     Check that PowerShell is installed and allowed to run CIM queries.";
const LEGACY_COMMAND_UNAVAILABLE: &str = "The wmic command is not available. \
     It may be disabled or removed on this version of Windows.";

const HOST_RUNNING_REQUIREMENT: &str = "The language tooling host application is running";
const PROCESS_RUNNING_REQUIREMENT: &str =
    concatcp!("The ", DEFAULT_PROCESS_NAME, " process is running");
const STRUCTURED_PERMISSION_REQUIREMENT: &str =
    "The current user is allowed to run PowerShell (Get-CimInstance) commands";
const LEGACY_PERMISSION_REQUIREMENT: &str = "The current user is allowed to run wmic commands";

/// Fixed user-facing failure text for `mode`.
pub fn error_messages(mode: DetectionMode) -> Diagnostics {
    let (command_not_available, permission) = match mode {
        DetectionMode::Structured => (
            STRUCTURED_COMMAND_UNAVAILABLE,
            STRUCTURED_PERMISSION_REQUIREMENT,
        ),
        DetectionMode::Legacy => (LEGACY_COMMAND_UNAVAILABLE, LEGACY_PERMISSION_REQUIREMENT),
    };

    Diagnostics {
        process_not_found: String::from(PROCESS_NOT_FOUND),
        command_not_available: String::from(command_not_available),
        requirements: vec![
            String::from(HOST_RUNNING_REQUIREMENT),
            String::from(PROCESS_RUNNING_REQUIREMENT),
            String::from(permission),
        ],
    }
}
