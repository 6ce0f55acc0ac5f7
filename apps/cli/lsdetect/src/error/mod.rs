pub mod session;
pub mod shell;

use common::ErrorLocation;

use thiserror::Error;

/// Top-level errors of the lsdetect binary.
#[derive(Debug, Error)]
pub enum LsdetectError {
    /// Error from this binary
    #[error("Lsdetect Error: {message} {location}")]
    Lsdetect {
        message: String,
        location: ErrorLocation,
    },

    /// No detector exists for the current operating system
    #[error("Unsupported Platform Error: {message} {location}")]
    UnsupportedPlatform {
        message: String,
        location: ErrorLocation,
    },

    #[error(transparent)]
    Core(#[from] detector_core::error::CoreError),

    #[error(transparent)]
    Session(#[from] session::SessionError),
}

impl From<detector_core::error::config::ConfigError> for LsdetectError {
    fn from(error: detector_core::error::config::ConfigError) -> Self {
        LsdetectError::Core(error.into())
    }
}
