pub mod client;
pub mod command;
pub mod ids;
pub mod node;
pub mod repo;
pub mod screen;
pub mod selection;
pub mod sync;

pub use client::{ClientRpmRequest, EntitlementCertRequest, IssuedCertificate};
pub use command::CommandOutput;
pub use ids::SessionId;
pub use node::{NodeKind, NodeRecord};
pub use repo::{ContainerSpec, CustomRepo, RepoListing};
pub use screen::{ConsoleState, Screen};
pub use selection::SelectableItem;
pub use sync::{SyncStatus, WaitPolicy};

/// Maximum length for user-supplied regex patterns to prevent `ReDoS` attacks.
pub const MAX_REGEX_PATTERN_LEN: usize = 1000;
