//! Helpers for tests that drive the fake console through a real PTY.

use crate::state::FakeState;
use rhui_harness::config::HarnessConfig;
use rhui_harness::transport::{Endpoint, LocalShell};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Environment variable naming the state file when `--state` is absent.
pub const STATE_ENV: &str = "RHUI_FAKE_STATE";

/// Prompt of the shell the fake RHUA runs the console from.
pub const SHELL_PROMPT: &str = "rhua# ";

/// Create a fresh directory under the system temp dir.
pub fn temp_dir(prefix: &str) -> PathBuf {
    let mut dir = std::env::temp_dir();
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    dir.push(format!("rhui-harness-{prefix}-{}-{stamp}", std::process::id()));
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir
}

pub fn write_state(path: &Path, state: &FakeState) {
    state.save(path).expect("failed to write fake state");
}

/// A throwaway RHUA: state file, installer answers file and an SSH key.
#[derive(Debug, Clone)]
pub struct FakeRhua {
    pub dir: PathBuf,
    pub state_path: PathBuf,
    pub answers_path: PathBuf,
    /// Existing file usable as `ssh_key_path` when registering nodes.
    pub key_path: PathBuf,
}

impl FakeRhua {
    /// Lay out a RHUA holding `state`. The answers file carries the state's
    /// password as the installer password.
    pub fn new(prefix: &str, state: &FakeState) -> Self {
        let dir = temp_dir(prefix);
        let state_path = dir.join("state.json");
        let answers_path = dir.join("answers.yaml");
        let key_path = dir.join("id_rsa_rhua");
        write_state(&state_path, state);
        fs::write(
            &answers_path,
            format!("rhua:\n  rhui_manager_password: {}\n", state.password),
        )
        .expect("failed to write answers file");
        fs::write(&key_path, "fake ssh key\n").expect("failed to write ssh key");
        Self {
            dir,
            state_path,
            answers_path,
            key_path,
        }
    }

    /// Harness configuration running `console_binary` from `/bin/sh`.
    pub fn config(&self, console_binary: &str) -> HarnessConfig {
        let mut config = HarnessConfig::default();
        let mut shell = LocalShell::default();
        shell.env.insert("PS1".to_string(), SHELL_PROMPT.to_string());
        shell
            .env
            .insert(STATE_ENV.to_string(), self.state_path.display().to_string());
        shell.cwd = Some(self.dir.display().to_string());
        config.endpoint = Endpoint::Local(shell);
        config.console.command = console_binary.to_string();
        config.console.answers_file = self.answers_path.display().to_string();
        config.nodes.ssh_key_path = self.key_path.display().to_string();
        config.sync.poll_interval_ms = 10;
        config.timeouts.default_ms = 5_000;
        config.timeouts.login_ms = 5_000;
        config.timeouts.node_setup_ms = 5_000;
        config.timeouts.command_ms = 5_000;
        config
    }

    /// Current state as the console last saved it.
    pub fn state(&self) -> FakeState {
        FakeState::load(&self.state_path).expect("failed to read fake state")
    }

    pub fn key(&self) -> String {
        self.key_path.display().to_string()
    }
}
