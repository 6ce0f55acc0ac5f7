pub mod config;
pub mod error;
pub mod platform;

#[cfg(test)]
mod tests;

/// Executable name of the language server the detector looks for by default.
pub const DEFAULT_PROCESS_NAME: &str = "language_server_windows_x64.exe";
