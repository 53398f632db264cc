use serde::{Deserialize, Serialize};

/// Outcome of a one-shot remote command.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandOutput {
    /// Process exit status.
    pub exit_code: i32,
    /// Combined stdout/stderr as decoded text.
    pub output: String,
}

impl CommandOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}
