use crate::error::model_error::ModelError;
use crate::{ErrorLocation, ProcessInfo};

use common::RedactedToken;

use std::panic::Location;

/// Builder for creating validated ProcessInfo instances.
///
/// The extension port is optional and defaults to 0 ("unknown").
#[derive(Debug, Default)]
pub struct ProcessInfoBuilder {
    pid: Option<u32>,
    extension_port: Option<u16>,
    csrf_token: Option<RedactedToken>,
}

impl ProcessInfoBuilder {
    pub fn with_pid(mut self, pid: u32) -> Self {
        self.pid = Some(pid);
        self
    }

    pub fn with_extension_port(mut self, port: u16) -> Self {
        self.extension_port = Some(port);
        self
    }

    pub fn with_csrf_token(mut self, token: impl Into<String>) -> Self {
        self.csrf_token = Some(RedactedToken::new(token));
        self
    }

    /// Build the ProcessInfo with validation.
    #[track_caller]
    pub fn build(self) -> Result<ProcessInfo, ModelError> {
        let pid = self.pid.ok_or_else(|| ModelError::Validation {
            message: String::from("PID is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if pid == 0 {
            return Err(ModelError::Validation {
                message: String::from("PID must be non-zero"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let csrf_token = self.csrf_token.ok_or_else(|| ModelError::Validation {
            message: String::from("CSRF token is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if csrf_token.is_empty() {
            return Err(ModelError::Validation {
                message: String::from("CSRF token cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !csrf_token
            .as_str()
            .chars()
            .all(|c| c.is_ascii_hexdigit() || c == '-')
        {
            return Err(ModelError::Validation {
                message: format!(
                    "CSRF token must contain only hex digits and hyphens (length {})",
                    csrf_token.len()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(ProcessInfo {
            pid,
            extension_port: self.extension_port.unwrap_or_default(),
            csrf_token,
        })
    }
}
