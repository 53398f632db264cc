//! Expect primitives: send keystrokes, block until a pattern shows up.

use super::text::compile_safe_regex;
use super::Session;
use crate::error::{ErrorCode, HarnessError, HarnessResult};
use crate::model::CommandOutput;
use regex::Regex;
use std::time::{Duration, Instant};
use tracing::debug;

/// A successful match against the session buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchResult {
    /// Output consumed before the match started.
    pub before: String,
    /// Capture groups; index 0 is the whole match. Groups that did not
    /// participate are `None`.
    pub groups: Vec<Option<String>>,
}

impl MatchResult {
    fn from_captures(buffer: &str, captures: &regex::Captures<'_>) -> Self {
        let start = captures.get(0).map_or(0, |m| m.start());
        Self {
            before: buffer.get(..start).unwrap_or_default().to_string(),
            groups: captures
                .iter()
                .map(|group| group.map(|m| m.as_str().to_string()))
                .collect(),
        }
    }

    /// The whole matched text.
    #[must_use]
    pub fn text(&self) -> &str {
        self.group(0).unwrap_or_default()
    }

    #[must_use]
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|group| group.as_deref())
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl Session {
    /// Type `text` followed by the newline.
    pub fn enter(&mut self, text: &str) -> HarnessResult<()> {
        debug!(session = %self.id, text, "enter");
        self.write_line(text)
    }

    /// Like [`Session::enter`] but never logs what was typed.
    pub fn enter_secret(&mut self, text: &str) -> HarnessResult<()> {
        debug!(session = %self.id, text = "<redacted>", "enter");
        self.write_line(text)
    }

    /// Write bytes without a newline (control characters, partial input).
    pub fn send_raw(&mut self, bytes: &[u8]) -> HarnessResult<()> {
        self.ensure_open()?;
        debug!(session = %self.id, len = bytes.len(), "send raw");
        self.transport.send(bytes)
    }

    fn write_line(&mut self, text: &str) -> HarnessResult<()> {
        self.ensure_open()?;
        let mut line = String::with_capacity(text.len() + self.options.newline.len());
        line.push_str(text);
        line.push_str(&self.options.newline);
        self.transport.send(line.as_bytes())
    }

    fn ensure_open(&self) -> HarnessResult<()> {
        if self.closed {
            return Err(HarnessError::new(
                ErrorCode::Io,
                "session is closed",
                serde_json::json!({ "session": self.id.to_string() }),
            ));
        }
        Ok(())
    }

    /// Block until `pattern` matches the buffered output.
    pub fn expect(&mut self, pattern: &str, timeout: Duration) -> HarnessResult<MatchResult> {
        self.expect_list(&[(pattern, ())], timeout)
            .map(|((), found)| found)
    }

    /// Block until one of several patterns matches.
    ///
    /// Candidates are tried in list order on every pass, so when two of them
    /// match the same output the earlier one wins. Returns the winner's tag.
    pub fn expect_list<T: Clone>(
        &mut self,
        candidates: &[(&str, T)],
        timeout: Duration,
    ) -> HarnessResult<(T, MatchResult)> {
        self.ensure_open()?;
        let compiled = candidates
            .iter()
            .map(|(pattern, tag)| Ok((compile_safe_regex(pattern)?, tag.clone())))
            .collect::<HarnessResult<Vec<(Regex, T)>>>()?;
        let deadline = Instant::now() + timeout;

        loop {
            if let Some((index, found)) = self.try_match(&compiled) {
                debug!(
                    session = %self.id,
                    pattern = candidates.get(index).map_or("", |(p, _)| *p),
                    "matched"
                );
                if let Some((_, tag)) = compiled.get(index) {
                    return Ok((tag.clone(), found));
                }
                break;
            }
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            let received = self.fill(self.options.read_step.min(deadline - now))?;
            if received == 0 && self.transport.is_closed() {
                // Nothing more will arrive; one last look at the buffer.
                if let Some((index, found)) = self.try_match(&compiled) {
                    if let Some((_, tag)) = compiled.get(index) {
                        return Ok((tag.clone(), found));
                    }
                }
                break;
            }
        }

        let patterns: Vec<&str> = candidates.iter().map(|(pattern, _)| *pattern).collect();
        let joined = patterns.join(" | ");
        debug!(session = %self.id, pattern = %joined, "expectation failed");
        Err(HarnessError::expectation_failed(
            format!("none of the expected patterns appeared within {}ms", millis(timeout)),
            &joined,
            &self.buffer,
            millis(timeout),
        ))
    }

    /// Test the buffer against every candidate and consume the first match.
    fn try_match<T>(&mut self, compiled: &[(Regex, T)]) -> Option<(usize, MatchResult)> {
        let (index, found, end) = compiled.iter().enumerate().find_map(|(index, (re, _))| {
            re.captures(&self.buffer).map(|captures| {
                let end = captures.get(0).map_or(0, |m| m.end());
                (index, MatchResult::from_captures(&self.buffer, &captures), end)
            })
        })?;
        self.buffer.drain(..end);
        Some((index, found))
    }

    /// Block until `pattern` matches and return the requested capture groups.
    ///
    /// Groups that did not participate in the match come back empty.
    pub fn capture(
        &mut self,
        pattern: &str,
        groups: &[usize],
        timeout: Duration,
    ) -> HarnessResult<Vec<String>> {
        let found = self.expect(pattern, timeout)?;
        Ok(groups
            .iter()
            .map(|index| found.group(*index).unwrap_or_default().to_string())
            .collect())
    }

    /// Type `command`, then expect `expected`.
    pub fn ping_pong(
        &mut self,
        command: &str,
        expected: &str,
        timeout: Duration,
    ) -> HarnessResult<MatchResult> {
        self.enter(command)?;
        self.expect(expected, timeout)
    }

    /// Run a one-shot command outside the console conversation.
    pub fn run_command(
        &mut self,
        command: &str,
        timeout: Duration,
    ) -> HarnessResult<CommandOutput> {
        self.ensure_open()?;
        let output = self.transport.exec(command, timeout)?;
        debug!(session = %self.id, command, exit_code = output.exit_code, "command finished");
        Ok(output)
    }

    /// Run a one-shot command and require exit status `expected_code`.
    pub fn expect_retval(
        &mut self,
        command: &str,
        expected_code: i32,
        timeout: Duration,
    ) -> HarnessResult<CommandOutput> {
        let output = self.run_command(command, timeout)?;
        if output.exit_code != expected_code {
            return Err(unexpected_exit(command, expected_code, &output));
        }
        Ok(output)
    }
}

pub(crate) fn unexpected_exit(
    command: &str,
    expected_code: i32,
    output: &CommandOutput,
) -> HarnessError {
    HarnessError::new(
        ErrorCode::UnexpectedExitStatus,
        format!(
            "command exited with {} instead of {expected_code}",
            output.exit_code
        ),
        serde_json::json!({
            "command": command,
            "expected": expected_code,
            "actual": output.exit_code,
            "output": output.output,
        }),
    )
}
