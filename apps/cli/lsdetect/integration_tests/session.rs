use crate::helpers::{Reply, ScriptedRunner};

use lsdetect::app::{Outcome, execute};
use lsdetect::cli::Cli;
use lsdetect::error::LsdetectError;
use lsdetect::error::session::SessionError;
use lsdetect::session::DetectionSession;

use detector_core::config::{DetectorConfig, PollConfig};
use detector_core::platform::WindowsDetector;
use models::DetectionMode;

const WMIC_FOUND: &str = "\r\r\nCommandLine=language_server_windows_x64.exe --csrf_token=ab12-cd34\r\r\nProcessId=4321\r\r\n";
const CIM_FOUND: &str = r#"{"ProcessId":4321,"CommandLine":"language_server_windows_x64.exe --extension_server_port=9090 --csrf_token=ab12-cd34"}"#;
const NETSTAT_ROWS: &str = "  TCP    127.0.0.1:42101        0.0.0.0:0              LISTENING       4321\r\n  TCP    127.0.0.1:42100        0.0.0.0:0              LISTENING       4321\r\n";

fn fast_config(mode: Option<DetectionMode>) -> DetectorConfig {
    DetectorConfig {
        mode,
        poll: PollConfig {
            initial_interval_ms: 10,
            max_interval_ms: 20,
            max_elapsed_secs: 1,
        },
        ..DetectorConfig::default()
    }
}

fn session(runner: ScriptedRunner, mode: Option<DetectionMode>) -> DetectionSession<ScriptedRunner> {
    DetectionSession::new(Box::new(WindowsDetector::new()), runner, fast_config(mode))
}

// ----------------------------------------------------------------------------
// detect_once()
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies the full legacy flow: wmic, parse, netstat, parse.
///
/// **WHY THIS MATTERS**: When the command line carries no extension port, the
/// listening ports are the only way to reach the server.
#[tokio::test]
async fn given_server_without_extension_port_when_detecting_then_ports_come_from_netstat() {
    // GIVEN: wmic finds the server, netstat lists two loopback listeners
    let runner = ScriptedRunner::new(vec![Reply::stdout(WMIC_FOUND)], Reply::stdout(NETSTAT_ROWS));
    let session = session(runner, Some(DetectionMode::Legacy));

    // WHEN: Detecting once
    let detection = session
        .detect_once()
        .await
        .expect("no error")
        .expect("server found");

    // THEN: Port falls back to the lowest listener
    assert_eq!(detection.process.pid(), 4321);
    assert_eq!(detection.process.extension_port(), 0);
    assert_eq!(detection.listening_ports.as_slice(), &[42100, 42101]);
    assert_eq!(detection.effective_port(), Some(42100));
}

#[tokio::test]
async fn given_forced_structured_mode_when_detecting_then_issues_cim_query_without_probe() {
    let runner = ScriptedRunner::new(vec![Reply::stdout(CIM_FOUND)], Reply::stdout(""));
    let mut session = session(runner, Some(DetectionMode::Structured));

    session.prepare().await;
    let detection = session.detect_once().await.expect("no error").expect("found");

    assert_eq!(session.mode(), DetectionMode::Structured);
    assert_eq!(detection.effective_port(), Some(9090));
}

#[tokio::test]
async fn given_failed_port_query_when_detecting_then_still_returns_process() {
    // findstr exits 1 when nothing matches
    let runner = ScriptedRunner::new(vec![Reply::stdout(CIM_FOUND)], Reply::Exit(1));
    let session = session(runner, Some(DetectionMode::Structured));

    let detection = session.detect_once().await.expect("no error").expect("found");

    assert!(detection.listening_ports.is_empty());
    assert_eq!(detection.process.extension_port(), 9090);
}

/// **VALUE**: Verifies a missing query tool surfaces the diagnostic text.
///
/// **BUG THIS CATCHES**: Would catch a missing tool being reported as
/// "process not found", which sends the user looking for the wrong problem.
#[tokio::test]
async fn given_missing_query_tool_when_detecting_then_returns_command_unavailable() {
    // GIVEN: wmic is not installed
    let runner = ScriptedRunner::new(vec![Reply::missing_tool()], Reply::stdout(""));
    let session = session(runner, Some(DetectionMode::Legacy));

    // WHEN: Detecting
    let result = session.detect_once().await;

    // THEN: CommandUnavailable with the legacy diagnostics
    match result {
        Err(SessionError::CommandUnavailable {
            message,
            requirements,
            ..
        }) => {
            assert!(message.contains("wmic"));
            assert_eq!(requirements.len(), 3);
        }
        other => panic!("expected command unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn given_process_without_token_when_detecting_then_not_found_and_no_port_query() {
    let runner = ScriptedRunner::new(
        vec![Reply::stdout("ProcessId=4321\r\nCommandLine=server.exe\r\n")],
        Reply::stdout(NETSTAT_ROWS),
    );
    let session = session(runner, Some(DetectionMode::Legacy));

    let detection = session.detect_once().await.expect("no error");

    assert!(detection.is_none());
}

// ----------------------------------------------------------------------------
// prepare() / probe
// ----------------------------------------------------------------------------

#[tokio::test]
async fn given_no_forced_mode_and_working_powershell_when_preparing_then_structured() {
    let runner = ScriptedRunner::new(vec![], Reply::stdout("")).with_probe(Reply::stdout(""));
    let mut session = session(runner, None);

    session.prepare().await;

    assert_eq!(session.mode(), DetectionMode::Structured);
}

#[tokio::test]
async fn given_no_forced_mode_and_failing_probe_when_preparing_then_legacy() {
    let runner = ScriptedRunner::new(vec![], Reply::stdout("")).with_probe(Reply::missing_tool());
    let mut session = session(runner, None);

    session.prepare().await;

    assert_eq!(session.mode(), DetectionMode::Legacy);
}

// ----------------------------------------------------------------------------
// wait_for_process()
// ----------------------------------------------------------------------------

/// **VALUE**: Verifies polling keeps going until the server shows up.
///
/// **WHY THIS MATTERS**: The host starts the language server a few seconds after
/// the editor. A single attempt would almost always miss it.
#[tokio::test]
async fn given_server_appearing_on_third_attempt_when_waiting_then_returns_detection() {
    // GIVEN: Two empty answers before the server appears
    let runner = ScriptedRunner::new(
        vec![Reply::stdout(""), Reply::stdout(""), Reply::stdout(WMIC_FOUND)],
        Reply::stdout(NETSTAT_ROWS),
    );
    let session = session(runner, Some(DetectionMode::Legacy));

    // WHEN: Waiting
    let detection = session.wait_for_process().await.expect("no error");

    // THEN: Found
    assert_eq!(detection.map(|d| d.process.pid()), Some(4321));
}

#[tokio::test]
async fn given_server_never_appearing_when_waiting_then_gives_up_with_none() {
    let runner = ScriptedRunner::new(vec![], Reply::stdout(""));
    let session = session(runner, Some(DetectionMode::Legacy));

    let detection = session.wait_for_process().await.expect("no error");

    assert!(detection.is_none());
}

// ----------------------------------------------------------------------------
// execute()
// ----------------------------------------------------------------------------

#[tokio::test]
async fn given_diagnostics_flag_when_executing_then_returns_messages_without_querying() {
    // GIVEN: --diagnostics and a forced structured mode
    let runner = ScriptedRunner::new(vec![Reply::stdout(CIM_FOUND)], Reply::stdout(""));
    let cli = Cli {
        diagnostics: true,
        ..Cli::default()
    };

    // WHEN: Executing
    let outcome = execute(&cli, session(runner, Some(DetectionMode::Structured)))
        .await
        .expect("no error");

    // THEN: Structured diagnostics
    match outcome {
        Outcome::Diagnostics(diagnostics) => {
            assert!(diagnostics.command_not_available.contains("PowerShell"));
        }
        other => panic!("expected diagnostics, got {other:?}"),
    }
}

#[tokio::test]
async fn given_no_server_when_executing_then_outcome_is_not_found() {
    let runner = ScriptedRunner::new(vec![Reply::stdout("")], Reply::stdout(""));

    let outcome = execute(&Cli::default(), session(runner, Some(DetectionMode::Legacy)))
        .await
        .expect("no error");

    assert!(matches!(outcome, Outcome::NotFound(_)));
}

#[tokio::test]
async fn given_missing_tool_when_executing_then_session_error_propagates() {
    let runner = ScriptedRunner::new(vec![Reply::missing_tool()], Reply::stdout(""));

    let result = execute(&Cli::default(), session(runner, Some(DetectionMode::Legacy))).await;

    assert!(matches!(
        result,
        Err(LsdetectError::Session(SessionError::CommandUnavailable { .. }))
    ));
}

#[tokio::test]
async fn given_server_found_when_executing_then_report_hides_token_and_commands_match_mode() {
    // GIVEN: A scripted legacy environment
    let runner = ScriptedRunner::new(vec![Reply::stdout(WMIC_FOUND)], Reply::stdout(NETSTAT_ROWS));
    let session = session(runner, Some(DetectionMode::Legacy));

    // WHEN: Executing with default flags
    let outcome = execute(&Cli::default(), session).await.expect("no error");

    // THEN: Report with redacted token
    match outcome {
        Outcome::Found(report) => {
            assert_eq!(report.pid, 4321);
            assert_eq!(report.mode, DetectionMode::Legacy);
            assert_eq!(report.csrf_token, "[REDACTED]");
            assert_eq!(report.effective_port, Some(42100));
        }
        other => panic!("expected found, got {other:?}"),
    }
}

#[tokio::test]
async fn given_legacy_session_when_detecting_then_runs_wmic_then_netstat_for_pid() {
    let runner = ScriptedRunner::new(vec![Reply::stdout(WMIC_FOUND)], Reply::stdout(""));
    let session = session(runner, Some(DetectionMode::Legacy));

    session.detect_once().await.expect("no error");
    let commands = session_commands(&session);

    assert_eq!(commands.len(), 2);
    assert!(commands[0].starts_with("wmic process where"));
    assert!(commands[1].contains("findstr \"4321\""));
}

fn session_commands(session: &DetectionSession<ScriptedRunner>) -> Vec<String> {
    session.runner().commands()
}
