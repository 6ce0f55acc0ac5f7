use lsdetect::error::shell::{CMD_NOT_FOUND_EXIT_CODE, ShellError};
use lsdetect::probe::STRUCTURED_PROBE_COMMAND;
use lsdetect::shell::CommandRunner;

use common::ErrorLocation;

use std::collections::VecDeque;
use std::panic::Location;
use std::sync::Mutex;
use std::time::Duration;

/// Canned answer for one command invocation.
#[derive(Debug, Clone)]
pub enum Reply {
    Stdout(String),
    Exit(i32),
}

impl Reply {
    pub fn stdout(text: &str) -> Self {
        Reply::Stdout(text.to_string())
    }

    pub fn missing_tool() -> Self {
        Reply::Exit(CMD_NOT_FOUND_EXIT_CODE)
    }

    fn into_result(self) -> Result<String, ShellError> {
        match self {
            Reply::Stdout(text) => Ok(text),
            Reply::Exit(code) => Err(ShellError::Failed {
                message: format!("exited with {code}"),
                code: Some(code),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

/// Runner answering process queries from a script and port queries with a fixed reply.
pub struct ScriptedRunner {
    probe: Reply,
    process_replies: Mutex<VecDeque<Reply>>,
    port_reply: Reply,
    commands: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new(process_replies: Vec<Reply>, port_reply: Reply) -> Self {
        Self {
            probe: Reply::Exit(1),
            process_replies: Mutex::new(process_replies.into()),
            port_reply,
            commands: Mutex::new(Vec::new()),
        }
    }

    pub fn with_probe(mut self, probe: Reply) -> Self {
        self.probe = probe;
        self
    }

    pub fn commands(&self) -> Vec<String> {
        self.commands.lock().expect("commands lock").clone()
    }
}

impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &str, _timeout: Duration) -> Result<String, ShellError> {
        self.commands
            .lock()
            .expect("commands lock")
            .push(command.to_string());

        let reply = if command == STRUCTURED_PROBE_COMMAND {
            self.probe.clone()
        } else if command.starts_with("netstat") {
            self.port_reply.clone()
        } else {
            self.process_replies
                .lock()
                .expect("replies lock")
                .pop_front()
                .unwrap_or_else(|| Reply::stdout(""))
        };

        reply.into_result()
    }
}
