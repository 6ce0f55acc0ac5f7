//! Shared building blocks for the lsdetect workspace.
//!
//! Everything here is domain-agnostic: error call-site tracking and a
//! secret string wrapper that keeps connection tokens out of logs.
//!
//! ## Architecture
//!
//! - **common** (this crate): Cross-cutting types
//! - **models**: Pure data produced by detection
//! - **detector-core**: Command building and output parsing
//! - **lsdetect**: CLI wiring command execution around the core

pub mod error;
pub mod redacted_token;


pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use redacted_token::RedactedToken;
