use lsdetect::app::{run, write_requirements};
use lsdetect::cli::Cli;
use lsdetect::error::LsdetectError;
use lsdetect::error::session::SessionError;

use std::io::{stderr, stdout};
use std::process::ExitCode;

use clap::Parser;
use log::error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(outcome) => {
            if let Err(e) = outcome.write_to(&mut stdout(), &mut stderr()) {
                error!("Failed to write output: {e}");
                return ExitCode::from(2);
            }
            outcome.exit_code()
        }
        Err(e) => {
            error!("{e}");
            if let LsdetectError::Session(SessionError::CommandUnavailable {
                message,
                requirements,
                ..
            }) = &e
            {
                eprintln!("{message}");
                let _ = write_requirements(&mut stderr(), requirements);
            } else {
                eprintln!("{e}");
            }
            ExitCode::from(2)
        }
    }
}
