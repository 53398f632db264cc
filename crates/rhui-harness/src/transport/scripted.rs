//! Deterministic in-memory transport for tests.
//!
//! A script is an ordered list of exchanges: when the session sends a line
//! equal to the next exchange's input, the exchange's reply becomes readable.
//! Lines that do not match are recorded as mismatches and get no reply, so
//! the session under test times out the way it would against a console that
//! ignored the keystroke.
//!
//! ```
//! use rhui_harness::transport::{ScriptedTransport, Transport};
//! use std::time::Duration;
//!
//! let mut transport = ScriptedTransport::new("rhui (home) => ")
//!     .reply("r", "rhui (repo) => ");
//! let handle = transport.handle();
//! transport.send(b"r\n").unwrap();
//! assert_eq!(handle.sent(), vec!["r".to_string()]);
//! # let _ = transport.read_available(Duration::ZERO);
//! ```

use crate::error::HarnessResult;
use crate::model::CommandOutput;
use crate::transport::Transport;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

/// Longest a scripted read sleeps when nothing is pending.
const IDLE_WAIT: Duration = Duration::from_millis(2);

#[derive(Debug)]
struct Exchange {
    input: String,
    reply: String,
}

#[derive(Debug)]
struct ExecReply {
    command: String,
    output: CommandOutput,
}

#[derive(Debug, Default)]
struct ScriptState {
    output: String,
    exchanges: VecDeque<Exchange>,
    exec_replies: Vec<ExecReply>,
    partial_line: String,
    after_cr: bool,
    sent: Vec<String>,
    executed: Vec<String>,
    mismatches: Vec<String>,
    close_when_done: bool,
    closed: bool,
}

impl ScriptState {
    fn finish_line(&mut self, line: String) {
        let matches_next = self
            .exchanges
            .front()
            .is_some_and(|exchange| exchange.input == line);
        if matches_next {
            if let Some(exchange) = self.exchanges.pop_front() {
                self.output.push_str(&exchange.reply);
            }
        } else {
            self.mismatches.push(line.clone());
        }
        self.sent.push(line);
    }
}

fn lock(state: &Mutex<ScriptState>) -> MutexGuard<'_, ScriptState> {
    state
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}

/// [`Transport`] that replays a canned conversation.
#[derive(Debug)]
pub struct ScriptedTransport {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedTransport {
    /// Start a script whose first read yields `initial_output`.
    pub fn new(initial_output: impl Into<String>) -> Self {
        let state = ScriptState {
            output: initial_output.into(),
            ..ScriptState::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    /// When the next sent line equals `input`, make `reply` readable.
    #[must_use]
    pub fn reply(self, input: impl Into<String>, reply: impl Into<String>) -> Self {
        lock(&self.state).exchanges.push_back(Exchange {
            input: input.into(),
            reply: reply.into(),
        });
        self
    }

    /// Answer a one-shot `command` with `exit_code` and `output`.
    ///
    /// Each scripted reply is used once; a command scripted twice answers
    /// twice, in order.
    #[must_use]
    pub fn exec_reply(
        self,
        command: impl Into<String>,
        exit_code: i32,
        output: impl Into<String>,
    ) -> Self {
        lock(&self.state).exec_replies.push(ExecReply {
            command: command.into(),
            output: CommandOutput {
                exit_code,
                output: output.into(),
            },
        });
        self
    }

    /// Report end of file once every exchange has been played and read.
    #[must_use]
    pub fn close_when_done(self) -> Self {
        lock(&self.state).close_when_done = true;
        self
    }

    /// Shared view of what the session sent, for assertions.
    #[must_use]
    pub fn handle(&self) -> ScriptHandle {
        ScriptHandle {
            state: Arc::clone(&self.state),
        }
    }
}

impl Transport for ScriptedTransport {
    fn send(&mut self, bytes: &[u8]) -> HarnessResult<()> {
        let mut state = lock(&self.state);
        for ch in String::from_utf8_lossy(bytes).chars() {
            let after_cr = std::mem::replace(&mut state.after_cr, ch == '\r');
            match ch {
                '\n' if after_cr => {}
                '\n' | '\r' => {
                    let line = std::mem::take(&mut state.partial_line);
                    state.finish_line(line);
                }
                other => state.partial_line.push(other),
            }
        }
        Ok(())
    }

    fn read_available(&mut self, wait: Duration) -> HarnessResult<Vec<u8>> {
        let pending = {
            let mut state = lock(&self.state);
            let pending = std::mem::take(&mut state.output);
            if pending.is_empty() && state.close_when_done && state.exchanges.is_empty() {
                state.closed = true;
            }
            pending
        };
        if pending.is_empty() {
            std::thread::sleep(wait.min(IDLE_WAIT));
        }
        Ok(pending.into_bytes())
    }

    fn exec(&mut self, command: &str, _timeout: Duration) -> HarnessResult<CommandOutput> {
        let mut state = lock(&self.state);
        state.executed.push(command.to_string());
        let position = state
            .exec_replies
            .iter()
            .position(|reply| reply.command == command);
        match position {
            Some(index) => Ok(state.exec_replies.remove(index).output),
            None => {
                state.mismatches.push(format!("exec: {command}"));
                Ok(CommandOutput {
                    exit_code: 127,
                    output: format!("{command}: command not scripted\n"),
                })
            }
        }
    }

    fn is_closed(&self) -> bool {
        lock(&self.state).closed
    }

    fn close(&mut self) -> HarnessResult<()> {
        lock(&self.state).closed = true;
        Ok(())
    }
}

/// Read side of a [`ScriptedTransport`], kept by the test after the
/// transport has moved into a session.
#[derive(Clone, Debug)]
pub struct ScriptHandle {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptHandle {
    /// Every complete line sent so far, without line terminators.
    #[must_use]
    pub fn sent(&self) -> Vec<String> {
        lock(&self.state).sent.clone()
    }

    /// Every command passed to `exec`.
    #[must_use]
    pub fn executed(&self) -> Vec<String> {
        lock(&self.state).executed.clone()
    }

    /// Sent lines and commands the script did not expect.
    #[must_use]
    pub fn mismatches(&self) -> Vec<String> {
        lock(&self.state).mismatches.clone()
    }

    /// Number of exchanges not yet played.
    #[must_use]
    pub fn remaining(&self) -> usize {
        lock(&self.state).exchanges.len()
    }

    /// Whether the whole script was played without surprises.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let state = lock(&self.state);
        state.exchanges.is_empty() && state.mismatches.is_empty()
    }

    /// Make extra output readable, as if the console printed it unprompted.
    pub fn push_output(&self, text: &str) {
        lock(&self.state).output.push_str(text);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn replies_follow_matching_lines() {
        let mut transport = ScriptedTransport::new("login: ").reply("admin", "welcome\n");
        let handle = transport.handle();
        assert_eq!(transport.read_available(Duration::ZERO).unwrap(), b"login: ");
        transport.send(b"admin\n").unwrap();
        assert_eq!(transport.read_available(Duration::ZERO).unwrap(), b"welcome\n");
        assert!(handle.is_complete());
    }

    #[test]
    fn unexpected_lines_are_recorded_and_ignored() {
        let mut transport = ScriptedTransport::new("").reply("y", "done\n");
        let handle = transport.handle();
        transport.send(b"n\n").unwrap();
        assert!(transport.read_available(Duration::ZERO).unwrap().is_empty());
        assert_eq!(handle.mismatches(), vec!["n".to_string()]);
        assert_eq!(handle.remaining(), 1);
    }

    #[test]
    fn partial_lines_wait_for_their_terminator() {
        let mut transport = ScriptedTransport::new("").reply("sr", "ok\n");
        let handle = transport.handle();
        transport.send(b"s").unwrap();
        assert!(handle.sent().is_empty());
        transport.send(b"r\r").unwrap();
        assert_eq!(handle.sent(), vec!["sr".to_string()]);
    }

    #[test]
    fn exec_replies_are_consumed_once() {
        let mut transport = ScriptedTransport::new("").exec_reply("true", 0, "");
        let timeout = Duration::from_secs(1);
        assert_eq!(transport.exec("true", timeout).unwrap().exit_code, 0);
        assert_eq!(transport.exec("true", timeout).unwrap().exit_code, 127);
    }

    #[test]
    fn closes_after_the_script_when_asked() {
        let mut transport = ScriptedTransport::new("bye\n").close_when_done();
        assert!(!transport.is_closed());
        transport.read_available(Duration::ZERO).unwrap();
        transport.read_available(Duration::ZERO).unwrap();
        assert!(transport.is_closed());
    }
}
