//! Persistent state of the fake console.
//!
//! Interactive and non-interactive invocations share one JSON file, so a
//! node added through the menus shows up in `--noninteractive cds list`.

use rhui_harness::model::{NodeKind, NodeRecord};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;

/// Which listing section a repository belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoKind {
    #[default]
    Custom,
    RedHat,
    Container,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakeRepo {
    pub id: String,
    pub name: String,
    pub path: String,
    pub kind: RepoKind,
    pub entitlement: bool,
    pub gpg_check: bool,
}

impl FakeRepo {
    pub fn custom(id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: id.to_string(),
            path: id.to_string(),
            kind: RepoKind::Custom,
            entitlement: true,
            gpg_check: false,
        }
    }

    pub fn red_hat(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            path: format!("content/dist/{id}"),
            kind: RepoKind::RedHat,
            entitlement: true,
            gpg_check: true,
        }
    }
}

/// Everything the fake console remembers between runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakeState {
    pub username: String,
    pub password: String,
    /// Cached login: the next start skips the username prompt.
    pub logged_in: bool,
    pub cds: Vec<NodeRecord>,
    pub haproxy: Vec<NodeRecord>,
    pub repos: Vec<FakeRepo>,
    /// Statuses `dr` will report per repository name, front first. The last
    /// entry sticks.
    pub sync_status: BTreeMap<String, Vec<String>>,
    /// Sequence installed into `sync_status` when a repository is scheduled.
    pub sync_script: BTreeMap<String, Vec<String>>,
    pub entitlements: Vec<String>,
    pub subscriptions_registered: Vec<String>,
    pub subscriptions_available: Vec<String>,
    /// Hostnames `status` reports as unreachable.
    pub down_nodes: Vec<String>,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin".to_string(),
            logged_in: false,
            cds: Vec::new(),
            haproxy: Vec::new(),
            repos: Vec::new(),
            sync_status: BTreeMap::new(),
            sync_script: BTreeMap::new(),
            entitlements: Vec::new(),
            subscriptions_registered: Vec::new(),
            subscriptions_available: Vec::new(),
            down_nodes: Vec::new(),
        }
    }
}

const DEFAULT_SYNC_SCRIPT: [&str; 2] = ["Running", "Success"];

impl FakeState {
    /// Read the state file; a missing file is a fresh default state.
    pub fn load(path: &Path) -> io::Result<Self> {
        match fs::read_to_string(path) {
            Ok(data) => serde_json::from_str(&data)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(err),
        }
    }

    pub fn save(&self, path: &Path) -> io::Result<()> {
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        fs::write(path, data)
    }

    pub fn nodes(&self, kind: NodeKind) -> &[NodeRecord] {
        match kind {
            NodeKind::Cds => &self.cds,
            NodeKind::HaProxy => &self.haproxy,
        }
    }

    pub fn nodes_mut(&mut self, kind: NodeKind) -> &mut Vec<NodeRecord> {
        match kind {
            NodeKind::Cds => &mut self.cds,
            NodeKind::HaProxy => &mut self.haproxy,
        }
    }

    /// Index of the node registered as `host_name`, ignoring case.
    pub fn find_node(&self, kind: NodeKind, host_name: &str) -> Option<usize> {
        self.nodes(kind).iter().position(|node| node.is_host(host_name))
    }

    pub fn repos_of(&self, kind: RepoKind) -> impl Iterator<Item = &FakeRepo> {
        self.repos.iter().filter(move |repo| repo.kind == kind)
    }

    /// Display names of every repository that can be synced or deleted.
    pub fn repo_names(&self) -> Vec<String> {
        self.repos.iter().map(|repo| repo.name.clone()).collect()
    }

    pub fn find_repo_by_id(&self, id: &str) -> Option<&FakeRepo> {
        self.repos.iter().find(|repo| repo.id == id)
    }

    /// Queue the scripted statuses for `name`.
    pub fn schedule_sync(&mut self, name: &str) {
        let script = self.sync_script.get(name).cloned().unwrap_or_else(|| {
            DEFAULT_SYNC_SCRIPT.iter().map(ToString::to_string).collect()
        });
        self.sync_status.insert(name.to_string(), script);
    }

    /// Status shown by one `dr`; advances the queue while more than one entry
    /// remains.
    pub fn next_sync_status(&mut self, name: &str) -> String {
        let Some(queue) = self.sync_status.get_mut(name) else {
            return "Never".to_string();
        };
        if queue.len() > 1 {
            queue.remove(0)
        } else {
            queue.first().cloned().unwrap_or_else(|| "Never".to_string())
        }
    }
}
