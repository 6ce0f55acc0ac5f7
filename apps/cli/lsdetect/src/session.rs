//! Drives a [`PlatformDetector`] against real command output.

use crate::error::session::SessionError;
use crate::probe::probe_mode;
use crate::shell::CommandRunner;

use common::ErrorLocation;
use detector_core::config::DetectorConfig;
use detector_core::platform::PlatformDetector;
use models::{DetectionMode, ListeningPorts, ProcessInfo};

use std::panic::Location;

use backoff::{ExponentialBackoff, backoff::Backoff};
use log::{debug, info, trace, warn};
use tokio::time::sleep as TokioSleep;

/// A language server that was found, with the loopback ports it listens on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    pub process: ProcessInfo,
    pub listening_ports: ListeningPorts,
}

impl Detection {
    /// Port to connect to: the extension port when known, else the lowest listening port.
    pub fn effective_port(&self) -> Option<u16> {
        if self.process.has_extension_port() {
            Some(self.process.extension_port())
        } else {
            self.listening_ports.first()
        }
    }
}

pub struct DetectionSession<R> {
    detector: Box<dyn PlatformDetector>,
    runner: R,
    config: DetectorConfig,
}

impl<R: CommandRunner> DetectionSession<R> {
    /// Create a session. A mode forced by `config` is applied immediately.
    pub fn new(mut detector: Box<dyn PlatformDetector>, runner: R, config: DetectorConfig) -> Self {
        if let Some(mode) = config.mode {
            detector.set_mode(mode);
        }

        Self {
            detector,
            runner,
            config,
        }
    }

    pub fn detector(&self) -> &dyn PlatformDetector {
        self.detector.as_ref()
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    pub fn mode(&self) -> DetectionMode {
        self.detector.mode()
    }

    /// Probe for the query tool unless the config already forces one.
    pub async fn prepare(&mut self) {
        if self.config.mode.is_some() {
            debug!("Mode forced by configuration: {}", self.detector.mode());
            return;
        }

        let mode = probe_mode(&self.runner, self.config.command_timeout()).await;
        self.detector.set_mode(mode);
    }

    /// Run one process query and, if a server is found, one port query.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(Detection))` - Server found
    /// * `Ok(None)` - No usable process (missing, or no csrf token)
    /// * `Err(SessionError)` - The process query tool could not be run
    pub async fn detect_once(&self) -> Result<Option<Detection>, SessionError> {
        let timeout = self.config.command_timeout();
        let command = self.detector.process_list_command(&self.config.process_name);

        let stdout = match self.runner.run(&command, timeout).await {
            Ok(stdout) => stdout,
            Err(e) if e.is_command_unavailable() => {
                let diagnostics = self.detector.error_messages();
                return Err(SessionError::CommandUnavailable {
                    message: diagnostics.command_not_available,
                    requirements: diagnostics.requirements,
                    location: ErrorLocation::from(Location::caller()),
                    source: e,
                });
            }
            Err(e) => {
                debug!("Process query returned nothing usable: {e}");
                return Ok(None);
            }
        };

        let Some(process) = self.detector.parse_process_info(&stdout) else {
            debug!("No {} process with a csrf token", self.config.process_name);
            return Ok(None);
        };

        let port_command = self.detector.port_list_command(process.pid());
        let listening_ports = match self.runner.run(&port_command, timeout).await {
            Ok(stdout) => self.detector.parse_listening_ports(&stdout),
            Err(e) => {
                warn!("Port query for PID {} failed: {e}", process.pid());
                ListeningPorts::default()
            }
        };

        info!(
            "Detected language server: PID={}, extension_port={}, listening={:?}",
            process.pid(),
            process.extension_port(),
            listening_ports.as_slice()
        );

        Ok(Some(Detection {
            process,
            listening_ports,
        }))
    }

    /// Repeat [`Self::detect_once`] with exponential backoff until a server appears.
    ///
    /// Gives up with `Ok(None)` once `poll.max_elapsed_secs` has passed. An
    /// unavailable query tool stops polling immediately.
    pub async fn wait_for_process(&self) -> Result<Option<Detection>, SessionError> {
        let poll = &self.config.poll;
        let mut backoff = ExponentialBackoff {
            current_interval: poll.initial_interval(),
            initial_interval: poll.initial_interval(),
            max_interval: poll.max_interval(),
            max_elapsed_time: Some(poll.max_elapsed()),
            ..Default::default()
        };

        loop {
            if let Some(detection) = self.detect_once().await? {
                return Ok(Some(detection));
            }

            match backoff.next_backoff() {
                Some(duration) => {
                    trace!("Language server not found yet, retrying after {duration:?}");
                    TokioSleep(duration).await;
                }
                None => {
                    info!(
                        "Gave up waiting for {} after {:?}",
                        self.config.process_name,
                        poll.max_elapsed()
                    );
                    return Ok(None);
                }
            }
        }
    }
}
