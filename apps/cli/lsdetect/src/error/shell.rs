use common::ErrorLocation;

use std::error::Error as StdError;

use thiserror::Error as ThisError;

/// Exit code `cmd.exe` uses for "is not recognized as an internal or external command".
pub const CMD_NOT_FOUND_EXIT_CODE: i32 = 9009;
/// Exit code POSIX shells use for "command not found".
pub const SH_NOT_FOUND_EXIT_CODE: i32 = 127;

#[derive(Debug, ThisError)]
pub enum ShellError {
    #[error("Spawn Error: {message} {location}")]
    Spawn {
        message: String,
        location: ErrorLocation,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },

    #[error("Command Failed Error: {message} {location}")]
    Failed {
        message: String,
        code: Option<i32>,
        location: ErrorLocation,
    },

    #[error("Timeout Error: {message} {location}")]
    Timeout {
        message: String,
        location: ErrorLocation,
    },
}

impl ShellError {
    /// The tool behind the command could not be run at all.
    ///
    /// A command that ran and exited non-zero (e.g. `findstr` with no match)
    /// is not considered unavailable.
    pub fn is_command_unavailable(&self) -> bool {
        match self {
            ShellError::Spawn { .. } | ShellError::Timeout { .. } => true,
            ShellError::Failed { code, .. } => matches!(
                code,
                Some(CMD_NOT_FOUND_EXIT_CODE) | Some(SH_NOT_FOUND_EXIT_CODE)
            ),
        }
    }
}
