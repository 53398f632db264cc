use serde::{Deserialize, Serialize};

/// Repositories listed on the repo screen, grouped by section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoListing {
    pub custom: Vec<String>,
    pub red_hat: Vec<String>,
    pub container: Vec<String>,
}

impl RepoListing {
    /// Every repository name, sorted.
    #[must_use]
    pub fn all(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .custom
            .iter()
            .chain(&self.red_hat)
            .chain(&self.container)
            .cloned()
            .collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.custom.is_empty() && self.red_hat.is_empty() && self.container.is_empty()
    }
}

/// A custom repository to create.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomRepo {
    /// Unique repository ID.
    pub id: String,
    /// Display name; the console defaults it to the ID.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Relative path the repository is served at; defaults to the ID.
    #[serde(default)]
    pub path: Option<String>,
    /// Whether clients need an entitlement certificate.
    #[serde(default = "default_true")]
    pub entitlement: bool,
    /// Whether clients verify GPG signatures.
    #[serde(default)]
    pub gpg_check: bool,
}

fn default_true() -> bool {
    true
}

impl CustomRepo {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            path: None,
            entitlement: true,
            gpg_check: false,
        }
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    #[must_use]
    pub fn path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.id)
    }
}

/// A container image to mirror from a registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    /// Name of the container in the upstream registry, e.g. `rhel8/support-tools`.
    pub upstream_name: String,
    /// Repository ID; the console derives one from the name when empty.
    #[serde(default)]
    pub id: Option<String>,
    /// Display name; defaults to the ID.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl ContainerSpec {
    /// ID the console will use: explicit, or the upstream name with `/` replaced by `_`.
    #[must_use]
    pub fn effective_id(&self) -> String {
        self.id
            .clone()
            .unwrap_or_else(|| self.upstream_name.replace('/', "_"))
    }

    #[must_use]
    pub fn effective_display_name(&self) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| self.effective_id())
    }
}
