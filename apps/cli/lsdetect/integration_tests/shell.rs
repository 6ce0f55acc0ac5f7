use lsdetect::error::shell::ShellError;
use lsdetect::probe::probe_mode;
use lsdetect::shell::{ShellRunner, run};

use models::DetectionMode;

use std::time::Duration;

// ============================================================================
// Real shell execution
// Commands below are POSIX sh; the Windows runner goes through cmd /C instead
// ============================================================================

const TIMEOUT: Duration = Duration::from_secs(5);

#[cfg(not(windows))]
#[tokio::test]
async fn given_successful_command_when_run_then_returns_stdout() {
    let stdout = run("printf 'ProcessId=1'", TIMEOUT).await;

    assert_eq!(stdout.ok().as_deref(), Some("ProcessId=1"));
}

/// **VALUE**: Verifies a missing tool is reported as unavailable.
///
/// **WHY THIS MATTERS**: This is how the CLI tells "wmic is gone" apart from
/// "no language server running".
#[cfg(not(windows))]
#[tokio::test]
async fn given_unknown_command_when_run_then_error_is_command_unavailable() {
    // WHEN: Running a command that does not exist
    let result = run("lsdetect-definitely-not-a-command", TIMEOUT).await;

    // THEN: Failed with the shell's not-found code
    let err = result.expect_err("missing command should fail");
    assert!(err.is_command_unavailable(), "unexpected error: {err}");
}

#[cfg(not(windows))]
#[tokio::test]
async fn given_command_exiting_non_zero_without_output_when_run_then_failed_but_available() {
    let err = run("exit 1", TIMEOUT).await.expect_err("non-zero exit");

    assert!(matches!(err, ShellError::Failed { code: Some(1), .. }));
    assert!(!err.is_command_unavailable());
}

#[cfg(not(windows))]
#[tokio::test]
async fn given_command_exiting_non_zero_with_output_when_run_then_returns_output() {
    let stdout = run("echo partial; exit 1", TIMEOUT).await;

    assert_eq!(stdout.ok().map(|s| s.trim().to_string()).as_deref(), Some("partial"));
}

#[cfg(not(windows))]
#[tokio::test]
async fn given_slow_command_when_run_with_short_timeout_then_times_out() {
    let err = run("sleep 5", Duration::from_millis(100))
        .await
        .expect_err("should time out");

    assert!(matches!(err, ShellError::Timeout { .. }));
}

#[cfg(not(windows))]
#[tokio::test]
async fn given_no_powershell_cim_when_probing_then_falls_back_to_legacy() {
    let mode = probe_mode(&ShellRunner, TIMEOUT).await;

    assert_eq!(mode, DetectionMode::Legacy);
}
