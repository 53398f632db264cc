//! Harness configuration.
//!
//! Loaded from YAML (`.yaml`/`.yml`) or JSON; every section has defaults, so
//! an empty document is a valid configuration pointing at `root@localhost`.
//!
//! ```yaml
//! endpoint:
//!   kind: ssh
//!   host: rhua.example.com
//!   key_path: /home/qe/.ssh/rhui
//! console:
//!   password: redhat
//! sync:
//!   max_attempts: 30
//! ```

use crate::error::{HarnessError, HarnessResult};
use crate::model::WaitPolicy;
use crate::session::text::compile_safe_regex;
use crate::transport::Endpoint;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration document.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    pub endpoint: Endpoint,
    pub console: ConsoleConfig,
    pub timeouts: TimeoutConfig,
    pub sync: SyncConfig,
    pub nodes: NodeDefaults,
}

/// How the console is started and logged into.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConsoleConfig {
    /// Command that launches the console on the RHUA.
    pub command: String,
    pub username: String,
    /// Login password; when absent or rejected the initial password is read
    /// from `answers_file`.
    pub password: Option<String>,
    /// Installer answers file holding `rhui_manager_password`.
    pub answers_file: String,
    /// Regex matching the remote shell prompt.
    pub shell_prompt: String,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            command: "rhui-manager".to_string(),
            username: "admin".to_string(),
            password: None,
            answers_file: "/root/.rhui/answers.yaml".to_string(),
            shell_prompt: r"[#$] ?$".to_string(),
        }
    }
}

/// Timeouts in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutConfig {
    /// Any single expectation.
    pub default_ms: u64,
    /// Console start-up and login.
    pub login_ms: u64,
    /// Registering or reinstalling a CDS/HAProxy node.
    pub node_setup_ms: u64,
    /// One-shot remote commands.
    pub command_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            default_ms: 10_000,
            login_ms: 20_000,
            node_setup_ms: 180_000,
            command_ms: 60_000,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub poll_interval_ms: u64,
    pub max_attempts: u32,
}

impl Default for SyncConfig {
    fn default() -> Self {
        let policy = WaitPolicy::default();
        Self {
            poll_interval_ms: u64::try_from(policy.poll_interval.as_millis()).unwrap_or(10_000),
            max_attempts: policy.max_attempts,
        }
    }
}

/// Defaults used when registering nodes from the CLI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NodeDefaults {
    pub ssh_user: String,
    pub ssh_key_path: String,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            ssh_user: "ec2-user".to_string(),
            ssh_key_path: "/root/.ssh/id_rsa_rhua".to_string(),
        }
    }
}

impl HarnessConfig {
    /// Reject settings no session could work with.
    pub fn validate(&self) -> HarnessResult<()> {
        let zero_timeout = [
            ("timeouts.default_ms", self.timeouts.default_ms),
            ("timeouts.login_ms", self.timeouts.login_ms),
            ("timeouts.node_setup_ms", self.timeouts.node_setup_ms),
            ("timeouts.command_ms", self.timeouts.command_ms),
        ]
        .into_iter()
        .find(|(_, value)| *value == 0);
        if let Some((field, _)) = zero_timeout {
            return Err(invalid(field, "must be greater than zero"));
        }
        if self.sync.max_attempts == 0 {
            return Err(invalid("sync.max_attempts", "must be greater than zero"));
        }
        if self.console.command.trim().is_empty() {
            return Err(invalid("console.command", "must not be empty"));
        }
        if self.console.username.trim().is_empty() {
            return Err(invalid("console.username", "must not be empty"));
        }
        compile_safe_regex(&self.console.shell_prompt)
            .map_err(|err| invalid("console.shell_prompt", &err.message))?;
        Ok(())
    }

    /// Polling bounds for sync waits.
    #[must_use]
    pub fn wait_policy(&self) -> WaitPolicy {
        WaitPolicy {
            poll_interval: Duration::from_millis(self.sync.poll_interval_ms),
            max_attempts: self.sync.max_attempts,
        }
    }
}

fn invalid(field: &str, reason: &str) -> HarnessError {
    HarnessError::new(
        crate::error::ErrorCode::Config,
        format!("invalid configuration: {field} {reason}"),
        serde_json::json!({ "field": field }),
    )
}

/// Load and validate a configuration file.
pub fn load_config_file(path: &Path) -> HarnessResult<HarnessConfig> {
    let data = fs::read_to_string(path)
        .map_err(|err| HarnessError::config("failed to read configuration file", err))?;
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
    let config: HarnessConfig = if extension == "yaml" || extension == "yml" {
        serde_yml::from_str(&data)
            .map_err(|err| HarnessError::config("failed to parse yaml configuration", err))?
    } else {
        serde_json::from_str(&data)
            .map_err(|err| HarnessError::config("failed to parse json configuration", err))?
    };
    config.validate()?;
    Ok(config)
}
