//! Runs detector command text through the OS shell.

use crate::error::shell::ShellError;

use common::ErrorLocation;

use std::future::Future;
use std::panic::Location;
use std::process::Stdio;
use std::time::Duration;

use log::{debug, trace};
use tokio::process::Command as TokioCommand;
use tokio::time::timeout as TokioTimeout;

/// Something that can execute a shell command line and return its stdout.
pub trait CommandRunner: Send + Sync {
    fn run(
        &self,
        command: &str,
        timeout: Duration,
    ) -> impl Future<Output = Result<String, ShellError>> + Send;
}

/// [`CommandRunner`] backed by the real OS shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str, timeout: Duration) -> Result<String, ShellError> {
        run(command, timeout).await
    }
}

#[cfg(windows)]
fn shell_command(command: &str) -> TokioCommand {
    let mut cmd = TokioCommand::new("cmd");
    // Detector commands carry their own quoting; pass them through untouched.
    cmd.arg("/C").raw_arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell_command(command: &str) -> TokioCommand {
    let mut cmd = TokioCommand::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

/// Execute `command` through the OS shell and return its stdout.
///
/// Output is decoded lossily. A non-zero exit is an error only when stdout is
/// empty; some tools exit non-zero after printing usable rows.
pub async fn run(command: &str, timeout: Duration) -> Result<String, ShellError> {
    trace!("Running: {command}");

    let child = shell_command(command)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| ShellError::Spawn {
            message: format!("Failed to start shell for `{command}`: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: Box::new(e),
        })?;

    let output = match TokioTimeout(timeout, child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| ShellError::Spawn {
            message: format!("Failed to collect output of `{command}`: {e}"),
            location: ErrorLocation::from(Location::caller()),
            source: Box::new(e),
        })?,
        Err(_) => {
            return Err(ShellError::Timeout {
                message: format!("`{command}` did not finish within {timeout:?}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }
    };

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();

    if !output.status.success() && stdout.trim().is_empty() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ShellError::Failed {
            message: format!("`{command}` exited with {}: {}", output.status, stderr.trim()),
            code: output.status.code(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    debug!("Command produced {} bytes of output", stdout.len());
    Ok(stdout)
}
