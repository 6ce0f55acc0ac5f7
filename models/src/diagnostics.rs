use serde::Serialize;

/// Human-readable failure text handed to whoever shows errors to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostics {
    pub process_not_found: String,
    pub command_not_available: String,
    pub requirements: Vec<String>,
}
