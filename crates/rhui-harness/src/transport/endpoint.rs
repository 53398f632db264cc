use portable_pty::CommandBuilder;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Where the interactive shell runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Endpoint {
    /// The RHUA, reached with the system `ssh` client.
    Ssh(SshTarget),
    /// A shell on this machine (fake consoles, local RHUA checkouts).
    Local(LocalShell),
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::Ssh(SshTarget::default())
    }
}

impl Endpoint {
    /// Command that opens the interactive shell.
    #[must_use]
    pub fn interactive_command(&self) -> CommandBuilder {
        match self {
            Self::Ssh(target) => builder("ssh", &target.interactive_args(), &BTreeMap::new(), None),
            Self::Local(shell) => builder(&shell.shell, &[], &shell.env, shell.cwd.as_deref()),
        }
    }

    /// Command that runs `command` once and exits with its status.
    #[must_use]
    pub fn exec_command(&self, command: &str) -> CommandBuilder {
        match self {
            Self::Ssh(target) => builder("ssh", &target.exec_args(command), &BTreeMap::new(), None),
            Self::Local(shell) => builder(
                &shell.shell,
                &["-c".to_string(), command.to_string()],
                &shell.env,
                shell.cwd.as_deref(),
            ),
        }
    }

    /// Short human-readable description for logs.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Ssh(target) => format!("{}@{}:{}", target.user, target.host, target.port),
            Self::Local(shell) => format!("local:{}", shell.shell),
        }
    }
}

fn builder(
    program: &str,
    args: &[String],
    env: &BTreeMap<String, String>,
    cwd: Option<&str>,
) -> CommandBuilder {
    let mut cmd = CommandBuilder::new(program);
    cmd.args(args);
    for (key, value) in env {
        cmd.env(key, value);
    }
    if let Some(cwd) = cwd {
        cmd.cwd(cwd);
    }
    cmd
}

/// SSH connection parameters for the RHUA.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SshTarget {
    pub host: String,
    #[serde(default = "default_ssh_user")]
    pub user: String,
    #[serde(default = "default_ssh_port")]
    pub port: u16,
    /// Private key passed with `-i`.
    #[serde(default)]
    pub key_path: Option<String>,
    /// Extra `-o` options, e.g. `ServerAliveInterval=30`.
    #[serde(default)]
    pub options: Vec<String>,
}

fn default_ssh_user() -> String {
    "root".to_string()
}

fn default_ssh_port() -> u16 {
    22
}

impl Default for SshTarget {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            user: default_ssh_user(),
            port: default_ssh_port(),
            key_path: None,
            options: Vec::new(),
        }
    }
}

impl SshTarget {
    fn common_args(&self) -> Vec<String> {
        let mut args = vec![
            "-o".to_string(),
            "BatchMode=yes".to_string(),
            "-o".to_string(),
            "StrictHostKeyChecking=no".to_string(),
            "-p".to_string(),
            self.port.to_string(),
        ];
        if let Some(key) = &self.key_path {
            args.push("-i".to_string());
            args.push(key.clone());
        }
        for option in &self.options {
            args.push("-o".to_string());
            args.push(option.clone());
        }
        args
    }

    fn destination(&self) -> String {
        format!("{}@{}", self.user, self.host)
    }

    /// Arguments for an interactive session with a forced remote TTY.
    #[must_use]
    pub fn interactive_args(&self) -> Vec<String> {
        let mut args = vec!["-tt".to_string()];
        args.extend(self.common_args());
        args.push(self.destination());
        args
    }

    /// Arguments for running one remote command.
    #[must_use]
    pub fn exec_args(&self, command: &str) -> Vec<String> {
        let mut args = self.common_args();
        args.push(self.destination());
        args.push("--".to_string());
        args.push(command.to_string());
        args
    }
}

/// A local shell, mostly used against fake consoles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalShell {
    #[serde(default = "default_shell")]
    pub shell: String,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub cwd: Option<String>,
}

fn default_shell() -> String {
    "/bin/sh".to_string()
}

impl Default for LocalShell {
    fn default() -> Self {
        Self {
            shell: default_shell(),
            env: BTreeMap::new(),
            cwd: None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn target() -> SshTarget {
        SshTarget {
            host: "rhua.example.com".to_string(),
            key_path: Some("/home/qe/.ssh/rhui".to_string()),
            options: vec!["ServerAliveInterval=30".to_string()],
            ..SshTarget::default()
        }
    }

    #[test]
    fn interactive_args_force_a_tty() {
        let args = target().interactive_args();
        assert_eq!(args.first().map(String::as_str), Some("-tt"));
        assert_eq!(args.last().map(String::as_str), Some("root@rhua.example.com"));
        assert!(args.windows(2).any(|w| w == ["-i", "/home/qe/.ssh/rhui"]));
        assert!(args.windows(2).any(|w| w == ["-o", "ServerAliveInterval=30"]));
    }

    #[test]
    fn exec_args_end_with_the_command() {
        let args = target().exec_args("rhui-manager status");
        let tail: Vec<&str> = args.iter().rev().take(3).map(String::as_str).collect();
        assert_eq!(tail, ["rhui-manager status", "--", "root@rhua.example.com"]);
        assert!(!args.contains(&"-tt".to_string()));
    }

    #[test]
    fn endpoint_deserializes_by_kind() {
        let json = r#"{"kind":"local","shell":"/bin/bash"}"#;
        let endpoint: Endpoint = serde_json::from_str(json).unwrap();
        assert_eq!(
            endpoint,
            Endpoint::Local(LocalShell {
                shell: "/bin/bash".to_string(),
                ..LocalShell::default()
            })
        );
        assert_eq!(endpoint.describe(), "local:/bin/bash");
    }
}
