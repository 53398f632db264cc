//! Byte-stream transports under a [`Session`](crate::session::Session).
//!
//! A transport is the channel to the remote shell: an interactive stream used
//! to drive the console, plus a one-shot command primitive with an exit
//! status. [`PtyTransport`] runs over a local pseudo-terminal (either `ssh -tt`
//! to the RHUA or a local shell); [`ScriptedTransport`] replays a canned
//! conversation for tests.

pub mod endpoint;
pub mod pty;
pub mod scripted;

pub use endpoint::{Endpoint, LocalShell, SshTarget};
pub use pty::PtyTransport;
pub use scripted::{ScriptHandle, ScriptedTransport};

use crate::error::HarnessResult;
use crate::model::CommandOutput;
use std::time::Duration;

/// Bidirectional channel to a remote shell.
pub trait Transport: Send {
    /// Write raw bytes to the interactive stream.
    fn send(&mut self, bytes: &[u8]) -> HarnessResult<()>;

    /// Return whatever output arrives within `wait`; possibly nothing.
    fn read_available(&mut self, wait: Duration) -> HarnessResult<Vec<u8>>;

    /// Run `command` outside the interactive stream and wait for its exit.
    fn exec(&mut self, command: &str, timeout: Duration) -> HarnessResult<CommandOutput>;

    /// Whether the interactive stream has reached end of file.
    fn is_closed(&self) -> bool;

    /// Shut the channel down.
    fn close(&mut self) -> HarnessResult<()> {
        Ok(())
    }
}
