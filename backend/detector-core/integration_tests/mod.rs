mod config;
mod error;
mod platform;
