//! Console sessions.
//!
//! A [`Session`] owns one [`Transport`], the decoded output buffer that the
//! pattern matcher works on, and the console state the navigator maintains.
//! Sessions are independent: a test may open a second one as a side channel
//! to the same RHUA.
//!
//! # Buffer policy
//!
//! Output is accumulated with escape sequences stripped. A successful match
//! consumes everything up to its end, so the next expectation only sees
//! output that arrived after the previous match.
//!
//! # Example
//!
//! ```no_run
//! use rhui_harness::config::HarnessConfig;
//! use rhui_harness::session::Session;
//! use std::time::Duration;
//!
//! # fn example() -> rhui_harness::error::HarnessResult<()> {
//! let mut session = Session::connect(&HarnessConfig::default())?;
//! session.enter("hostname")?;
//! let found = session.expect(r"rhua\S*", Duration::from_secs(5))?;
//! println!("{}", found.text());
//! # Ok(())
//! # }
//! ```

mod expect;
pub mod text;

pub use expect::MatchResult;
pub(crate) use expect::unexpected_exit;

use crate::config::HarnessConfig;
use crate::error::HarnessResult;
use crate::model::{ConsoleState, SessionId, WaitPolicy};
use crate::transport::{PtyTransport, Transport};
use std::time::Duration;
use text::Utf8Accumulator;
use tracing::debug;

/// Settings a session applies to every operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionOptions {
    /// Timeout for expectations that do not take an explicit one.
    pub default_timeout: Duration,
    /// Console start-up and login.
    pub login_timeout: Duration,
    /// Node registration, which installs software on the node.
    pub node_setup_timeout: Duration,
    /// One-shot commands.
    pub command_timeout: Duration,
    /// Line terminator appended by [`Session::enter`].
    pub newline: String,
    /// Command that launches the console.
    pub console_command: String,
    pub username: String,
    pub password: Option<String>,
    pub answers_file: String,
    /// Regex matching the remote shell prompt.
    pub shell_prompt: String,
    /// Longest single read while waiting for a match.
    pub read_step: Duration,
    pub wait_policy: WaitPolicy,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self::from(&HarnessConfig::default())
    }
}

impl From<&HarnessConfig> for SessionOptions {
    fn from(config: &HarnessConfig) -> Self {
        Self {
            default_timeout: Duration::from_millis(config.timeouts.default_ms),
            login_timeout: Duration::from_millis(config.timeouts.login_ms),
            node_setup_timeout: Duration::from_millis(config.timeouts.node_setup_ms),
            command_timeout: Duration::from_millis(config.timeouts.command_ms),
            newline: "\n".to_string(),
            console_command: config.console.command.clone(),
            username: config.console.username.clone(),
            password: config.console.password.clone(),
            answers_file: config.console.answers_file.clone(),
            shell_prompt: config.console.shell_prompt.clone(),
            read_step: Duration::from_millis(50),
            wait_policy: config.wait_policy(),
        }
    }
}

/// One console conversation over one transport.
pub struct Session {
    id: SessionId,
    transport: Box<dyn Transport>,
    buffer: String,
    decoder: Utf8Accumulator,
    escape_tail: String,
    options: SessionOptions,
    state: ConsoleState,
    closed: bool,
}

impl Session {
    /// Wrap an already open transport. The console is assumed not running.
    pub fn new(transport: impl Transport + 'static, options: SessionOptions) -> Self {
        let id = SessionId::new();
        debug!(session = %id, "session created");
        Self {
            id,
            transport: Box::new(transport),
            buffer: String::new(),
            decoder: Utf8Accumulator::default(),
            escape_tail: String::new(),
            options,
            state: ConsoleState::LoggedOut,
            closed: false,
        }
    }

    /// Open a PTY transport to the configured endpoint.
    pub fn connect(config: &HarnessConfig) -> HarnessResult<Self> {
        config.validate()?;
        let transport = PtyTransport::open(config.endpoint.clone())?;
        Ok(Self::new(transport, SessionOptions::from(config)))
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Where the navigator believes the console stands.
    #[must_use]
    pub fn state(&self) -> ConsoleState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: ConsoleState) {
        if self.state != state {
            debug!(session = %self.id, from = %self.state, to = %state, "console state");
        }
        self.state = state;
    }

    /// Output received but not yet consumed by a match.
    #[must_use]
    pub fn pending_output(&self) -> &str {
        &self.buffer
    }

    /// Read whatever arrives within `wait` and throw the whole buffer away.
    pub fn discard_pending(&mut self, wait: Duration) -> HarnessResult<()> {
        self.fill(wait)?;
        self.buffer.clear();
        Ok(())
    }

    /// Close the transport. Further operations fail with `E_IO`.
    pub fn close(&mut self) -> HarnessResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        self.state = ConsoleState::LoggedOut;
        debug!(session = %self.id, "session closed");
        self.transport.close()
    }

    /// Pull one read's worth of output into the buffer; returns the number
    /// of bytes read.
    ///
    /// Only the new text is stripped of escape sequences. A sequence cut off
    /// at the end of the read waits for the rest of it.
    fn fill(&mut self, wait: Duration) -> HarnessResult<usize> {
        let bytes = self.transport.read_available(wait)?;
        if bytes.is_empty() {
            return Ok(0);
        }
        let mut incoming = std::mem::take(&mut self.escape_tail);
        incoming.push_str(&self.decoder.push(&bytes));
        let (ready, unfinished) = text::split_unfinished_escape(&incoming);
        self.buffer.push_str(&text::strip_ansi(ready));
        self.escape_tail = unfinished.to_string();
        Ok(bytes.len())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
