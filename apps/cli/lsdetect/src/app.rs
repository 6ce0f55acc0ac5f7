//! Wiring between CLI flags, configuration and the detection session.

use crate::cli::Cli;
use crate::error::LsdetectError;
use crate::logger::{DEFAULT_LOG_LEVEL, initialize as LoggerInitialize};
use crate::report::DetectionReport;
use crate::session::DetectionSession;
use crate::shell::{CommandRunner, ShellRunner};

use common::ErrorLocation;
use detector_core::config::{DetectorConfig, default_config_dir};
use detector_core::platform::for_current_os;
use models::Diagnostics;

use std::io::{self, Write};
use std::panic::Location;
use std::process::ExitCode;

use log::{LevelFilter, debug, info};

/// Result of one lsdetect invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Found(DetectionReport),
    NotFound(Diagnostics),
    Diagnostics(Diagnostics),
}

impl Outcome {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Outcome::Found(_) | Outcome::Diagnostics(_) => ExitCode::SUCCESS,
            Outcome::NotFound(_) => ExitCode::from(1),
        }
    }

    /// Reports and diagnostics go to `stdout` as JSON; "not found" text goes to `stderr`.
    pub fn write_to(&self, stdout: &mut impl Write, stderr: &mut impl Write) -> io::Result<()> {
        match self {
            Outcome::Found(report) => {
                serde_json::to_writer_pretty(&mut *stdout, report)?;
                writeln!(stdout)
            }
            Outcome::Diagnostics(diagnostics) => {
                serde_json::to_writer_pretty(&mut *stdout, diagnostics)?;
                writeln!(stdout)
            }
            Outcome::NotFound(diagnostics) => {
                writeln!(stderr, "{}", diagnostics.process_not_found)?;
                write_requirements(stderr, &diagnostics.requirements)
            }
        }
    }
}

pub fn write_requirements(out: &mut impl Write, requirements: &[String]) -> io::Result<()> {
    writeln!(out, "Requirements:")?;
    for requirement in requirements {
        writeln!(out, "  - {requirement}")?;
    }
    Ok(())
}

/// Load `.env` from the working directory if one exists.
fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => info!("Loaded .env from: {}", path.display()),
        Err(e) if e.not_found() => debug!("No .env file found"),
        Err(e) => debug!("Ignoring unreadable .env: {e}"),
    }
}

/// Merge config file, environment and CLI flags, in increasing priority.
pub fn resolve_config(cli: &Cli) -> Result<DetectorConfig, LsdetectError> {
    let config_dir = match &cli.config_dir {
        Some(dir) => dir.clone(),
        None => default_config_dir()?,
    };

    let mut config = DetectorConfig::load(&config_dir)?;
    config.apply_env_overrides()?;

    if let Some(process_name) = &cli.process_name {
        config.process_name = process_name.clone();
    }
    if let Some(mode) = cli.mode {
        config.mode = Some(mode);
    }

    config.validate()?;
    Ok(config)
}

/// Run the session according to `cli` and describe what happened.
pub async fn execute<R: CommandRunner>(
    cli: &Cli,
    mut session: DetectionSession<R>,
) -> Result<Outcome, LsdetectError> {
    session.prepare().await;

    if cli.diagnostics {
        return Ok(Outcome::Diagnostics(session.detector().error_messages()));
    }

    let detection = if cli.wait {
        session.wait_for_process().await?
    } else {
        session.detect_once().await?
    };

    Ok(match detection {
        Some(detection) => Outcome::Found(DetectionReport::new(
            &detection,
            session.mode(),
            cli.show_token,
        )),
        None => Outcome::NotFound(session.detector().error_messages()),
    })
}

pub async fn run(cli: Cli) -> Result<Outcome, LsdetectError> {
    let level = if cli.verbose {
        LevelFilter::Trace
    } else {
        DEFAULT_LOG_LEVEL
    };
    LoggerInitialize(cli.log_dir.as_deref(), level)?;
    load_dotenv();

    let config = resolve_config(&cli)?;
    debug!("Effective config: {config:?}");

    let detector = for_current_os().ok_or_else(|| LsdetectError::UnsupportedPlatform {
        message: format!("No language server detector for {}", std::env::consts::OS),
        location: ErrorLocation::from(Location::caller()),
    })?;

    execute(&cli, DetectionSession::new(detector, ShellRunner, config)).await
}
