//! Error type shared by every layer of the harness.
//!
//! All failures surface as a [`HarnessError`] whose [`ErrorCode`] tells the
//! calling test what went wrong: the matcher only ever raises
//! [`ErrorCode::ExpectationFailed`], while the screen drivers translate
//! recognised console branches into the domain codes.

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Maximum number of bytes of unmatched output kept in an error context.
pub const MAX_UNMATCHED_CONTEXT: usize = 4096;

/// Result alias used throughout the crate.
pub type HarnessResult<T> = Result<T, HarnessError>;

/// Stable error classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    /// A pattern did not appear within its timeout, or a verified selection
    /// did not match what the console rendered.
    #[serde(rename = "E_EXPECTATION_FAILED")]
    ExpectationFailed,
    /// A polling loop ran out of attempts before reaching a terminal state.
    #[serde(rename = "E_WAIT_TIMEOUT")]
    WaitTimeout,
    /// Transport or filesystem failure.
    #[serde(rename = "E_IO")]
    Io,
    /// Invalid pattern or undecodable data.
    #[serde(rename = "E_PROTOCOL")]
    Protocol,
    /// A navigator operation was called from the wrong console state.
    #[serde(rename = "E_INVALID_STATE")]
    InvalidState,
    /// Invalid or unreadable configuration.
    #[serde(rename = "E_CONFIG")]
    Config,
    /// The console already tracks the object being added.
    #[serde(rename = "E_ALREADY_EXISTS")]
    AlreadyExists,
    /// The console does not know the named node.
    #[serde(rename = "E_NO_SUCH_INSTANCE")]
    NoSuchInstance,
    /// The console rejected the SSH private key path.
    #[serde(rename = "E_INVALID_SSH_KEY_PATH")]
    InvalidSshKeyPath,
    /// The certificate file does not exist on the RHUA.
    #[serde(rename = "E_MISSING_CERTIFICATE")]
    MissingCertificate,
    /// The certificate cannot be used with this RHUI.
    #[serde(rename = "E_INCOMPATIBLE_CERTIFICATE")]
    IncompatibleCertificate,
    /// The console refused to remove the last node of a kind.
    #[serde(rename = "E_DELETION_REFUSED")]
    DeletionRefused,
    /// A repository synchronization finished with an error.
    #[serde(rename = "E_SYNC_FAILED")]
    SyncFailed,
    /// The console rejected the supplied credentials.
    #[serde(rename = "E_AUTHENTICATION_FAILED")]
    AuthenticationFailed,
    /// A command exited with a status other than the expected one.
    #[serde(rename = "E_UNEXPECTED_EXIT_STATUS")]
    UnexpectedExitStatus,
}

impl ErrorCode {
    /// Stable string form, e.g. `E_EXPECTATION_FAILED`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ExpectationFailed => "E_EXPECTATION_FAILED",
            Self::WaitTimeout => "E_WAIT_TIMEOUT",
            Self::Io => "E_IO",
            Self::Protocol => "E_PROTOCOL",
            Self::InvalidState => "E_INVALID_STATE",
            Self::Config => "E_CONFIG",
            Self::AlreadyExists => "E_ALREADY_EXISTS",
            Self::NoSuchInstance => "E_NO_SUCH_INSTANCE",
            Self::InvalidSshKeyPath => "E_INVALID_SSH_KEY_PATH",
            Self::MissingCertificate => "E_MISSING_CERTIFICATE",
            Self::IncompatibleCertificate => "E_INCOMPATIBLE_CERTIFICATE",
            Self::DeletionRefused => "E_DELETION_REFUSED",
            Self::SyncFailed => "E_SYNC_FAILED",
            Self::AuthenticationFailed => "E_AUTHENTICATION_FAILED",
            Self::UnexpectedExitStatus => "E_UNEXPECTED_EXIT_STATUS",
        }
    }

    /// Process exit status the CLI reports for this code.
    #[must_use]
    pub fn exit_code(self) -> i32 {
        match self {
            Self::Config => 2,
            Self::InvalidState => 3,
            Self::WaitTimeout => 4,
            Self::ExpectationFailed => 5,
            Self::UnexpectedExitStatus => 6,
            Self::Io => 7,
            Self::Protocol => 8,
            Self::AuthenticationFailed => 9,
            Self::AlreadyExists
            | Self::NoSuchInstance
            | Self::InvalidSshKeyPath
            | Self::MissingCertificate
            | Self::IncompatibleCertificate
            | Self::DeletionRefused
            | Self::SyncFailed => 10,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Harness failure with a machine-readable code and optional JSON context.
#[derive(Clone, Debug, thiserror::Error)]
#[error("{code}: {message}")]
pub struct HarnessError {
    /// Error classification.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Structured diagnostics (pattern, unmatched output, exit codes, ...).
    pub context: Option<Value>,
}

impl HarnessError {
    /// Create an error with an arbitrary code.
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        context: impl Into<Option<Value>>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            context: context.into(),
        }
    }

    /// The expected pattern never showed up.
    pub fn expectation_failed(
        message: impl Into<String>,
        pattern: &str,
        unmatched: &str,
        timeout_ms: u64,
    ) -> Self {
        Self::new(
            ErrorCode::ExpectationFailed,
            message,
            serde_json::json!({
                "pattern": pattern,
                "timeout_ms": timeout_ms,
                "unmatched": tail(unmatched, MAX_UNMATCHED_CONTEXT),
            }),
        )
    }

    pub fn wait_timeout(message: impl Into<String>, context: impl Into<Option<Value>>) -> Self {
        Self::new(ErrorCode::WaitTimeout, message, context)
    }

    pub fn io(message: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::Io,
            message,
            serde_json::json!({ "source": err.to_string() }),
        )
    }

    pub fn protocol(message: impl Into<String>, context: impl Into<Option<Value>>) -> Self {
        Self::new(ErrorCode::Protocol, message, context)
    }

    pub fn invalid_state(message: impl Into<String>, context: impl Into<Option<Value>>) -> Self {
        Self::new(ErrorCode::InvalidState, message, context)
    }

    pub fn config(message: impl Into<String>, err: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::Config,
            message,
            serde_json::json!({ "source": err.to_string() }),
        )
    }

    /// The unmatched console output captured when an expectation failed.
    #[must_use]
    pub fn unmatched_output(&self) -> Option<&str> {
        self.context
            .as_ref()
            .and_then(|ctx| ctx.get("unmatched"))
            .and_then(Value::as_str)
    }

    /// Whether this error carries `code`.
    #[must_use]
    pub fn is(&self, code: ErrorCode) -> bool {
        self.code == code
    }
}

impl Diagnostic for HarnessError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(self.code.as_str()))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let hint = match self.code {
            ErrorCode::ExpectationFailed => "inspect the unmatched output in the error context",
            ErrorCode::WaitTimeout => "raise `sync.max_attempts` or check the RHUA sync workers",
            ErrorCode::InvalidState => "return to the home screen before navigating elsewhere",
            ErrorCode::Config => "check the harness configuration file",
            ErrorCode::AuthenticationFailed => {
                "check `console.username`/`console.password` and the answers file"
            }
            _ => return None,
        };
        Some(Box::new(hint))
    }
}

/// Last `max` bytes of `text`, cut on a char boundary.
fn tail(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut start = text.len() - max;
    while !text.is_char_boundary(start) {
        start += 1;
    }
    text.get(start..).unwrap_or_default()
}
