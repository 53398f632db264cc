//! Pseudo-terminal transport.
//!
//! The interactive stream is a PTY running the endpoint's shell (`ssh -tt`
//! for a real RHUA). One-shot commands get their own PTY so their output and
//! exit status never mix with the console conversation.

use crate::error::{HarnessError, HarnessResult};
use crate::model::CommandOutput;
use crate::session::text::Utf8Accumulator;
use crate::transport::{Endpoint, Transport};
#[cfg(unix)]
use nix::fcntl::{fcntl, FcntlArg, OFlag};
#[cfg(unix)]
use nix::sys::signal::{killpg, Signal};
#[cfg(unix)]
use nix::unistd::Pid;
use portable_pty::{native_pty_system, Child, CommandBuilder, MasterPty, PtySize};
use std::io::{ErrorKind, Read, Write};
use std::time::{Duration, Instant};
use tracing::debug;

/// Terminal size given to every PTY; wide enough that the console never wraps.
const PTY_SIZE: PtySize = PtySize {
    rows: 50,
    cols: 200,
    pixel_width: 0,
    pixel_height: 0,
};

/// Sleep between two empty non-blocking reads.
const READ_POLL: Duration = Duration::from_millis(5);

/// One spawned process attached to a PTY master.
struct PtyProcess {
    _master: Box<dyn MasterPty + Send>,
    writer: Box<dyn Write + Send>,
    reader: Box<dyn Read + Send>,
    child: Box<dyn Child + Send + Sync>,
    eof: bool,
}

impl PtyProcess {
    fn spawn(cmd: CommandBuilder) -> HarnessResult<Self> {
        let pair = native_pty_system()
            .openpty(PTY_SIZE)
            .map_err(|err| HarnessError::io("failed to open pty", err))?;
        let child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|err| HarnessError::io("failed to spawn command", err))?;
        drop(pair.slave);

        let reader = pair
            .master
            .try_clone_reader()
            .map_err(|err| HarnessError::io("failed to clone pty reader", err))?;
        let writer = pair
            .master
            .take_writer()
            .map_err(|err| HarnessError::io("failed to take pty writer", err))?;

        #[cfg(unix)]
        {
            if let Some(fd) = pair.master.as_raw_fd() {
                let flags = OFlag::from_bits_truncate(
                    fcntl(fd, FcntlArg::F_GETFL)
                        .map_err(|err| HarnessError::io("failed to get fd flags", err))?,
                );
                fcntl(fd, FcntlArg::F_SETFL(flags | OFlag::O_NONBLOCK))
                    .map_err(|err| HarnessError::io("failed to set nonblocking", err))?;
            }
        }

        Ok(Self {
            _master: pair.master,
            writer,
            reader,
            child,
            eof: false,
        })
    }

    /// Read until `wait` elapses or the stream ends.
    fn read_for(&mut self, wait: Duration) -> HarnessResult<Vec<u8>> {
        let mut total = Vec::new();
        let deadline = Instant::now() + wait;
        let mut chunk = [0u8; 4096];
        while !self.eof {
            match self.reader.read(&mut chunk) {
                Ok(0) => self.eof = true,
                Ok(count) => total.extend_from_slice(chunk.get(..count).unwrap_or_default()),
                Err(err) if err.kind() == ErrorKind::WouldBlock => {
                    if !total.is_empty() || Instant::now() >= deadline {
                        break;
                    }
                    std::thread::sleep(READ_POLL);
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => {}
                // Linux reports EIO on the master once the slave side is gone.
                Err(err) if is_eio(&err) => self.eof = true,
                Err(err) => return Err(HarnessError::io("failed to read pty", err)),
            }
        }
        Ok(total)
    }

    fn exited(&mut self) -> HarnessResult<Option<portable_pty::ExitStatus>> {
        self.child
            .try_wait()
            .map_err(|err| HarnessError::io("failed to poll child", err))
    }

    /// SIGTERM the process group, then SIGKILL after `grace`.
    fn terminate(&mut self, grace: Duration) {
        let _ = self.writer.flush();
        if matches!(self.child.try_wait(), Ok(Some(_))) {
            return;
        }

        #[cfg(unix)]
        if let Some(pid) = self.child.process_id() {
            // Process IDs are always positive and fit in i32
            #[allow(clippy::cast_possible_wrap)]
            let pgid = Pid::from_raw(pid as i32);
            signal_process_group(pgid, Signal::SIGTERM);
            let deadline = Instant::now() + grace;
            while Instant::now() < deadline {
                if self.child.try_wait().ok().flatten().is_some() {
                    return;
                }
                std::thread::sleep(READ_POLL);
            }
            signal_process_group(pgid, Signal::SIGKILL);
            return;
        }

        let _ = self.child.kill();
    }
}

impl Drop for PtyProcess {
    fn drop(&mut self) {
        self.terminate(Duration::from_millis(100));
    }
}

#[cfg(unix)]
fn signal_process_group(pgid: Pid, signal: Signal) {
    // ESRCH means the group is already gone.
    if let Err(err) = killpg(pgid, signal) {
        if err != nix::errno::Errno::ESRCH {
            debug!(%err, ?signal, "failed to signal process group");
        }
    }
}

fn is_eio(err: &std::io::Error) -> bool {
    #[cfg(unix)]
    {
        err.raw_os_error() == Some(nix::errno::Errno::EIO as i32)
    }
    #[cfg(not(unix))]
    {
        let _ = err;
        false
    }
}

/// [`Transport`] over local pseudo-terminals.
pub struct PtyTransport {
    endpoint: Endpoint,
    shell: PtyProcess,
}

impl PtyTransport {
    /// Open the endpoint's interactive shell.
    pub fn open(endpoint: Endpoint) -> HarnessResult<Self> {
        debug!(endpoint = %endpoint.describe(), "opening pty transport");
        let shell = PtyProcess::spawn(endpoint.interactive_command())?;
        Ok(Self { endpoint, shell })
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

impl Transport for PtyTransport {
    fn send(&mut self, bytes: &[u8]) -> HarnessResult<()> {
        self.shell
            .writer
            .write_all(bytes)
            .map_err(|err| HarnessError::io("failed to write to pty", err))?;
        self.shell
            .writer
            .flush()
            .map_err(|err| HarnessError::io("failed to flush pty", err))
    }

    fn read_available(&mut self, wait: Duration) -> HarnessResult<Vec<u8>> {
        self.shell.read_for(wait)
    }

    fn exec(&mut self, command: &str, timeout: Duration) -> HarnessResult<CommandOutput> {
        debug!(command, "exec");
        let mut process = PtyProcess::spawn(self.endpoint.exec_command(command))?;
        let mut decoder = Utf8Accumulator::default();
        let mut output = String::new();
        let deadline = Instant::now() + timeout;

        let status = loop {
            let chunk = process.read_for(Duration::from_millis(20))?;
            output.push_str(&decoder.push(&chunk));
            if let Some(status) = process.exited()? {
                // Drain whatever the child wrote right before exiting.
                while !process.eof {
                    let rest = process.read_for(Duration::from_millis(20))?;
                    if rest.is_empty() {
                        break;
                    }
                    output.push_str(&decoder.push(&rest));
                }
                break status;
            }
            if Instant::now() >= deadline {
                process.terminate(Duration::from_millis(200));
                return Err(HarnessError::wait_timeout(
                    "command did not finish in time",
                    serde_json::json!({
                        "command": command,
                        "timeout_ms": u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                        "output": output,
                    }),
                ));
            }
        };

        #[allow(clippy::cast_possible_wrap)]
        let exit_code = status.exit_code() as i32;
        Ok(CommandOutput {
            exit_code,
            output: output.replace("\r\n", "\n"),
        })
    }

    fn is_closed(&self) -> bool {
        self.shell.eof
    }

    fn close(&mut self) -> HarnessResult<()> {
        self.shell.terminate(Duration::from_millis(500));
        Ok(())
    }
}
