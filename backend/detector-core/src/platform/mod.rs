//! Platform-specific language server detection.
//!
//! Each supported OS provides one [`PlatformDetector`]. Callers obtain it from
//! [`for_current_os`] and drive it without branching on the OS themselves:
//!
//! 1. ask for a command with [`PlatformDetector::process_list_command`]
//! 2. run it and hand stdout to [`PlatformDetector::parse_process_info`]
//! 3. if the extension port is unknown, repeat with the port commands
//!
//! Detectors build command text and parse output. They never run commands.

pub mod flags;
pub mod windows;

pub use windows::WindowsDetector;

use models::{DetectionMode, Diagnostics, ListeningPorts, ProcessInfo};

use std::fmt::Debug;

/// Detection capability of one operating system.
pub trait PlatformDetector: Send + Sync + Debug {
    /// Query tool currently in use.
    fn mode(&self) -> DetectionMode;

    /// Switch query tool, normally once after a capability probe.
    fn set_mode(&mut self, mode: DetectionMode);

    /// Shell command listing processes named `process_name` with their command lines.
    fn process_list_command(&self, process_name: &str) -> String;

    /// Shell command listing listening sockets owned by `pid`.
    fn port_list_command(&self, pid: u32) -> String;

    /// Parse the output of [`Self::process_list_command`].
    ///
    /// `None` means no usable process: missing pid or missing csrf token.
    fn parse_process_info(&self, stdout: &str) -> Option<ProcessInfo>;

    /// Parse the output of [`Self::port_list_command`].
    fn parse_listening_ports(&self, stdout: &str) -> ListeningPorts;

    /// User-facing failure text for the current mode.
    fn error_messages(&self) -> Diagnostics;
}

/// Detector for the OS this binary was built for, or `None` if unsupported.
pub fn for_current_os() -> Option<Box<dyn PlatformDetector>> {
    if cfg!(windows) {
        Some(Box::new(WindowsDetector::new()))
    } else {
        None
    }
}
