use models::DetectionMode;

use std::path::PathBuf;

use clap::Parser;

/// Locate a running language server and print its connection parameters as JSON.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "lsdetect")]
#[command(version)]
#[command(about = "Locate a running language server and print its connection parameters", long_about = None)]
pub struct Cli {
    /// Executable name to look for (overrides config and LSDETECT_PROCESS_NAME)
    #[arg(long)]
    pub process_name: Option<String>,

    /// Force the process query tool: legacy (wmic) or structured (PowerShell)
    #[arg(long)]
    pub mode: Option<DetectionMode>,

    /// Keep polling until the process appears or the poll budget runs out
    #[arg(long, default_value_t = false)]
    pub wait: bool,

    /// Include the csrf token in the report instead of a placeholder
    #[arg(long, default_value_t = false)]
    pub show_token: bool,

    /// Print the diagnostic messages for the selected mode and exit
    #[arg(long, default_value_t = false)]
    pub diagnostics: bool,

    /// Directory holding lsdetect.json
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Also write logs to lsdetect.log in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Log at trace level
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
