use crate::session::Detection;

use models::DetectionMode;

use serde::Serialize;

pub const REDACTED_TOKEN_PLACEHOLDER: &str = "[REDACTED]";

/// JSON document printed on stdout when a language server is found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectionReport {
    pub pid: u32,
    pub extension_port: u16,
    pub listening_ports: Vec<u16>,
    pub effective_port: Option<u16>,
    pub csrf_token: String,
    pub mode: DetectionMode,
}

impl DetectionReport {
    /// Build a report. The token is copied out only when `show_token` is set.
    pub fn new(detection: &Detection, mode: DetectionMode, show_token: bool) -> Self {
        let csrf_token = if show_token {
            detection.process.csrf_token().as_str().to_string()
        } else {
            REDACTED_TOKEN_PLACEHOLDER.to_string()
        };

        Self {
            pid: detection.process.pid(),
            extension_port: detection.process.extension_port(),
            listening_ports: detection.listening_ports.as_slice().to_vec(),
            effective_port: detection.effective_port(),
            csrf_token,
            mode,
        }
    }
}
