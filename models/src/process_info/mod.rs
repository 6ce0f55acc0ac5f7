pub mod builder;

use common::RedactedToken;

/// Connection parameters recovered from the language server command line.
///
/// Built only through [`builder::ProcessInfoBuilder`], so a value always has a
/// non-zero pid and a non-empty token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessInfo {
    pub(crate) pid: u32,
    pub(crate) extension_port: u16,
    pub(crate) csrf_token: RedactedToken,
}

impl ProcessInfo {
    pub fn pid(&self) -> u32 {
        self.pid
    }

    /// Port from `--extension_server_port`, or 0 when the flag was absent.
    pub fn extension_port(&self) -> u16 {
        self.extension_port
    }

    pub fn has_extension_port(&self) -> bool {
        self.extension_port != 0
    }

    pub fn csrf_token(&self) -> &RedactedToken {
        &self.csrf_token
    }
}
