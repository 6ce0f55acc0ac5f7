//! One-off check deciding which process query tool to use.

use crate::shell::CommandRunner;

use models::DetectionMode;

use std::time::Duration;

use log::{debug, info};

pub const STRUCTURED_PROBE_COMMAND: &str =
    r#"powershell -NoProfile -Command "Get-Command Get-CimInstance -ErrorAction Stop | Out-Null""#;

/// Pick `Structured` when PowerShell CIM queries work, `Legacy` otherwise.
pub async fn probe_mode<R: CommandRunner>(runner: &R, timeout: Duration) -> DetectionMode {
    let mode = match runner.run(STRUCTURED_PROBE_COMMAND, timeout).await {
        Ok(_) => DetectionMode::Structured,
        Err(e) => {
            debug!("PowerShell CIM probe failed: {e}");
            DetectionMode::Legacy
        }
    };

    info!("Using {mode} process query mode");
    mode
}
