//! Windows detection strategy.
//!
//! Processes are listed with `wmic` (legacy) or PowerShell CIM queries
//! (structured), listening sockets with `netstat -ano`.

pub mod command;
pub mod diagnostics;
pub mod ports;
pub mod process_info;

use crate::platform::PlatformDetector;

use models::{DetectionMode, Diagnostics, ListeningPorts, ProcessInfo};

use log::debug;

#[derive(Debug, Default)]
pub struct WindowsDetector {
    mode: DetectionMode,
}

impl WindowsDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mode: DetectionMode) -> Self {
        Self { mode }
    }
}

impl PlatformDetector for WindowsDetector {
    fn mode(&self) -> DetectionMode {
        self.mode
    }

    fn set_mode(&mut self, mode: DetectionMode) {
        debug!("Windows detection mode: {} -> {mode}", self.mode);
        self.mode = mode;
    }

    fn process_list_command(&self, process_name: &str) -> String {
        command::build_process_list_command(process_name, self.mode)
    }

    fn port_list_command(&self, pid: u32) -> String {
        command::build_port_list_command(pid)
    }

    fn parse_process_info(&self, stdout: &str) -> Option<ProcessInfo> {
        process_info::parse_process_info(stdout, self.mode)
    }

    fn parse_listening_ports(&self, stdout: &str) -> ListeningPorts {
        ports::parse_listening_ports(stdout)
    }

    fn error_messages(&self) -> Diagnostics {
        diagnostics::error_messages(self.mode)
    }
}
