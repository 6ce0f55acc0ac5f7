//! Domain models for language server detection.
//!
//! Pure data produced and consumed by the detector. Models carry
//! validation but no detection logic.

pub mod detection_mode;
pub mod diagnostics;
pub mod error;
pub mod listening_ports;
pub mod process_info;

#[cfg(test)]
mod tests;

pub use common::ErrorLocation;
pub use detection_mode::DetectionMode;
pub use diagnostics::Diagnostics;
pub use error::model_error::ModelError;
pub use listening_ports::ListeningPorts;
pub use process_info::ProcessInfo;
pub use process_info::builder::ProcessInfoBuilder;
