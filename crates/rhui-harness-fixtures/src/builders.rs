//! Fluent builder for fake console states.
//!
//! # Example
//!
//! ```ignore
//! use rhui_harness_fixtures::StateBuilder;
//!
//! let state = StateBuilder::new()
//!     .logged_in()
//!     .with_cds("cds01.example.com", "/root/.ssh/id_rsa_rhua")
//!     .with_custom_repo("custom-1")
//!     .with_sync_script("custom-1", &["Running", "Success"])
//!     .build();
//! ```

use crate::state::{FakeRepo, FakeState};
use rhui_harness::model::NodeRecord;

/// Builder for [`FakeState`], starting from a fresh console with the
/// `admin`/`admin` login.
#[derive(Debug, Clone, Default)]
pub struct StateBuilder {
    state: FakeState,
}

impl StateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_password(mut self, password: &str) -> Self {
        self.state.password = password.to_string();
        self
    }

    /// Start with a cached login, so no credentials are asked.
    #[must_use]
    pub fn logged_in(mut self) -> Self {
        self.state.logged_in = true;
        self
    }

    #[must_use]
    pub fn with_cds(mut self, host_name: &str, key_path: &str) -> Self {
        self.state.cds.push(NodeRecord::new(host_name, "ec2-user", key_path));
        self
    }

    #[must_use]
    pub fn with_haproxy(mut self, host_name: &str, key_path: &str) -> Self {
        self.state
            .haproxy
            .push(NodeRecord::new(host_name, "ec2-user", key_path));
        self
    }

    #[must_use]
    pub fn with_custom_repo(mut self, id: &str) -> Self {
        self.state.repos.push(FakeRepo::custom(id));
        self
    }

    #[must_use]
    pub fn with_red_hat_repo(mut self, id: &str, name: &str) -> Self {
        self.state.repos.push(FakeRepo::red_hat(id, name));
        self
    }

    /// Statuses `dr` reports for `name` once it is scheduled.
    #[must_use]
    pub fn with_sync_script(mut self, name: &str, statuses: &[&str]) -> Self {
        self.state.sync_script.insert(
            name.to_string(),
            statuses.iter().map(ToString::to_string).collect(),
        );
        self
    }

    #[must_use]
    pub fn with_entitlements(mut self, names: &[&str]) -> Self {
        self.state
            .entitlements
            .extend(names.iter().map(ToString::to_string));
        self
    }

    #[must_use]
    pub fn with_available_subscriptions(mut self, names: &[&str]) -> Self {
        self.state
            .subscriptions_available
            .extend(names.iter().map(ToString::to_string));
        self
    }

    #[must_use]
    pub fn with_down_node(mut self, host_name: &str) -> Self {
        self.state.down_nodes.push(host_name.to_string());
        self
    }

    #[must_use]
    pub fn build(self) -> FakeState {
        self.state
    }
}
