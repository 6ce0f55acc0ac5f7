use crate::error::shell::ShellError;

use common::ErrorLocation;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum SessionError {
    /// The process query tool could not be run; `message` is the user-facing diagnostic.
    #[error("Command Unavailable Error: {message} {location}")]
    CommandUnavailable {
        message: String,
        requirements: Vec<String>,
        location: ErrorLocation,
        #[source]
        source: ShellError,
    },
}
