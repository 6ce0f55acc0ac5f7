// Library exports for testing
// The binary (main.rs) imports these as well

pub mod app;
pub mod cli;
pub mod error;
pub mod logger;
pub mod probe;
pub mod report;
pub mod session;
pub mod shell;

#[cfg(test)]
mod tests;
