//! Text handling for console output: decoding, escape stripping, pattern
//! compilation and line normalisation.

use crate::error::{HarnessError, HarnessResult};
use crate::model::MAX_REGEX_PATTERN_LEN;
use regex::{Regex, RegexBuilder};
use std::borrow::Cow;
use std::sync::OnceLock;

/// Compiled-program size cap for patterns.
const REGEX_SIZE_LIMIT: usize = 1 << 20;

/// Compile `pattern` for matching against the accumulated buffer.
///
/// Dot-all and multi-line are on, so `.` crosses line breaks and `^`/`$`
/// anchor at line boundaries.
pub fn compile_safe_regex(pattern: &str) -> HarnessResult<Regex> {
    if pattern.len() > MAX_REGEX_PATTERN_LEN {
        return Err(HarnessError::protocol(
            format!("pattern exceeds maximum length of {MAX_REGEX_PATTERN_LEN} characters"),
            serde_json::json!({ "pattern_len": pattern.len() }),
        ));
    }
    RegexBuilder::new(pattern)
        .dot_matches_new_line(true)
        .multi_line(true)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|err| {
            HarnessError::protocol(
                "invalid pattern",
                serde_json::json!({ "pattern": pattern, "source": err.to_string() }),
            )
        })
}

fn ansi_regex() -> Option<&'static Regex> {
    static ANSI: OnceLock<Option<Regex>> = OnceLock::new();
    ANSI.get_or_init(|| {
        Regex::new(concat!(
            r"\x1b\[[0-9;?]*[ -/]*[@-~]",
            r"|\x1b\][^\x07\x1b]*(?:\x07|\x1b\\)",
            r"|\x1b[()][0-9A-Za-z]",
            r"|\x1b[=>78]",
        ))
        .ok()
    })
    .as_ref()
}

/// Remove terminal escape sequences (colours, cursor movement, titles).
///
/// An unterminated sequence at the end is left alone so it can be removed
/// once the rest of it arrives.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    if !text.contains('\x1b') {
        return Cow::Borrowed(text);
    }
    match ansi_regex() {
        Some(re) => re.replace_all(text, ""),
        None => Cow::Borrowed(text),
    }
}

/// Longest unfinished escape sequence held back between reads.
const MAX_ESCAPE_TAIL: usize = 256;

fn escape_tail_regex() -> Option<&'static Regex> {
    static TAIL: OnceLock<Option<Regex>> = OnceLock::new();
    TAIL.get_or_init(|| Regex::new(r"\x1b(?:\[[0-9;?]*[ -/]*|\][^\x07\x1b]*\x1b?|[()])?$").ok())
        .as_ref()
}

/// Split `text` before a trailing escape sequence that is still missing its
/// final bytes. The second half is empty when the text ends cleanly.
#[must_use]
pub fn split_unfinished_escape(text: &str) -> (&str, &str) {
    let Some(start) = escape_tail_regex()
        .and_then(|re| re.find(text))
        .map(|found| found.start())
    else {
        return (text, "");
    };
    if text.len() - start > MAX_ESCAPE_TAIL {
        return (text, "");
    }
    text.split_at(start)
}

/// Collapse a rendered line the way the console's summaries are compared:
/// tabs become spaces, runs of whitespace become one space, ends are trimmed.
#[must_use]
pub fn normalize_line(line: &str) -> String {
    line.replace('\t', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split console text into lines, dropping carriage returns.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.trim_end_matches('\r'))
}

/// Incremental UTF-8 decoder that holds back an incomplete trailing sequence.
#[derive(Debug, Default)]
pub struct Utf8Accumulator {
    pending: Vec<u8>,
}

impl Utf8Accumulator {
    /// Decode `bytes` appended to whatever was held back last time.
    ///
    /// Each invalid sequence becomes one U+FFFD rather than failing the
    /// session; console output is human-oriented text. Only an incomplete
    /// sequence at the very end is held back.
    pub fn push(&mut self, bytes: &[u8]) -> String {
        self.pending.extend_from_slice(bytes);
        let data = std::mem::take(&mut self.pending);
        let mut decoded = String::with_capacity(data.len());
        let mut rest: &[u8] = &data;
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    decoded.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    decoded.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            decoded.push(char::REPLACEMENT_CHARACTER);
                            rest = after.get(len..).unwrap_or_default();
                        }
                        None => {
                            self.pending = after.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        decoded
    }
}
