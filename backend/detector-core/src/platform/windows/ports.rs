use std::sync::OnceLock;

use const_format::concatcp;
use log::trace;
use models::ListeningPorts;
use regex::Regex;

pub const LISTENING_STATE: &str = "LISTENING";

const LOOPBACK_LISTEN_PATTERN: &str =
    concatcp!(r"127\.0\.0\.1:(\d+)\s+0\.0\.0\.0:0\s+", LISTENING_STATE);

static LOOPBACK_LISTEN_REGEX: OnceLock<Regex> = OnceLock::new();

fn loopback_listen_regex() -> &'static Regex {
    LOOPBACK_LISTEN_REGEX
        .get_or_init(|| Regex::new(LOOPBACK_LISTEN_PATTERN).expect("valid regex pattern"))
}

/// Extract loopback listening ports from `netstat -ano` output.
///
/// Only rows of the form `127.0.0.1:<port>  0.0.0.0:0  LISTENING` count.
/// The result is sorted and de-duplicated; unmatched input yields an empty list.
pub fn parse_listening_ports(stdout: &str) -> ListeningPorts {
    let ports: ListeningPorts = loopback_listen_regex()
        .captures_iter(stdout)
        .filter_map(|caps| caps.get(1))
        .filter_map(|m| m.as_str().parse::<u16>().ok())
        .collect();

    trace!("Parsed {} loopback listening ports", ports.len());
    ports
}
