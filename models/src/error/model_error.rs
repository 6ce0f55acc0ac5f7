use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Errors raised while constructing or parsing model values.
#[derive(Debug, ThisError)]
pub enum ModelError {
    #[error("Validation Error: {message} {location}")]
    Validation {
        message: String,
        location: ErrorLocation,
    },
}
