//! Connection flags embedded in the language server command line.

use std::sync::OnceLock;

use const_format::concatcp;
use regex::Regex;

pub const EXTENSION_PORT_FLAG: &str = "--extension_server_port";
pub const CSRF_TOKEN_FLAG: &str = "--csrf_token";

const FLAG_SEPARATOR: &str = r"[=\s]+";
const EXTENSION_PORT_PATTERN: &str = concatcp!(EXTENSION_PORT_FLAG, FLAG_SEPARATOR, r"(\d+)");
const CSRF_TOKEN_PATTERN: &str = concatcp!("(?i)", CSRF_TOKEN_FLAG, FLAG_SEPARATOR, "([a-f0-9-]+)");

static EXTENSION_PORT_REGEX: OnceLock<Regex> = OnceLock::new();
static CSRF_TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

pub(crate) fn extension_port_regex() -> &'static Regex {
    EXTENSION_PORT_REGEX
        .get_or_init(|| Regex::new(EXTENSION_PORT_PATTERN).expect("valid regex pattern"))
}

pub(crate) fn csrf_token_regex() -> &'static Regex {
    CSRF_TOKEN_REGEX.get_or_init(|| Regex::new(CSRF_TOKEN_PATTERN).expect("valid regex pattern"))
}

/// First `--extension_server_port` value in `text`, or 0 when absent or out of range.
pub(crate) fn extract_extension_port(text: &str) -> u16 {
    extension_port_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u16>().ok())
        .unwrap_or_default()
}

/// First `--csrf_token` value in `text`. The flag name matches case-insensitively.
pub(crate) fn extract_csrf_token(text: &str) -> Option<&str> {
    csrf_token_regex()
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
