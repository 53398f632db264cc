use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Last-result column of the sync status screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SyncStatus {
    Never,
    Running,
    Success,
    Error,
    Unknown,
}

impl SyncStatus {
    /// `Success` and `Error` end a wait; everything else keeps polling.
    #[must_use]
    pub fn is_settled(self) -> bool {
        matches!(self, Self::Success | Self::Error)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Never => "Never",
            Self::Running => "Running",
            Self::Success => "Success",
            Self::Error => "Error",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyncStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Never" => Ok(Self::Never),
            "Running" => Ok(Self::Running),
            "Success" => Ok(Self::Success),
            "Error" => Ok(Self::Error),
            "Unknown" => Ok(Self::Unknown),
            other => Err(format!("unknown sync status '{other}'")),
        }
    }
}

/// Bounds for a "wait until settled" loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Pause between two status reads.
    pub poll_interval: Duration,
    /// Maximum number of status reads, including the first.
    pub max_attempts: u32,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            max_attempts: 90,
        }
    }
}
