use crate::model::Screen;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of node the console can register.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Content delivery server.
    Cds,
    /// HAProxy load-balancer in front of the CDS nodes.
    HaProxy,
}

impl NodeKind {
    /// Console screen that manages this kind.
    #[must_use]
    pub fn screen(self) -> Screen {
        match self {
            Self::Cds => Screen::Cds,
            Self::HaProxy => Screen::LoadBalancers,
        }
    }

    /// Noun used by the console in messages.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Cds => "CDS",
            Self::HaProxy => "HAProxy Load-balancer",
        }
    }

    /// Subcommand name in non-interactive mode.
    #[must_use]
    pub fn command_noun(self) -> &'static str {
        match self {
            Self::Cds => "cds",
            Self::HaProxy => "haproxy",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_noun())
    }
}

/// A CDS or HAProxy node as the console reports it.
///
/// The console listing is authoritative; nothing is cached locally.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeRecord {
    /// Hostname the node is registered under.
    pub host_name: String,
    /// User with SSH access and sudo privileges on the node.
    pub ssh_user: String,
    /// Private key path on the RHUA used to reach the node.
    pub ssh_key_path: String,
}

impl NodeRecord {
    pub fn new(
        host_name: impl Into<String>,
        ssh_user: impl Into<String>,
        ssh_key_path: impl Into<String>,
    ) -> Self {
        Self {
            host_name: host_name.into(),
            ssh_user: ssh_user.into(),
            ssh_key_path: ssh_key_path.into(),
        }
    }

    /// Hostnames are compared without regard to letter case.
    #[must_use]
    pub fn is_host(&self, host_name: &str) -> bool {
        self.host_name.eq_ignore_ascii_case(host_name)
    }
}
