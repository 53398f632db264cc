//! Every literal the harness types into, or looks for in, the console.
//!
//! Values ending in `_RE` are regular expressions; the rest are sent
//! verbatim. Keeping them here means a console wording change touches one
//! file.

use crate::model::{NodeKind, Screen};

/// Prompt shown while a screen is active.
#[must_use]
pub fn screen_prompt_re(screen: Screen) -> String {
    format!(r"rhui \({}\) => ", screen.name())
}

pub const USERNAME_RE: &str = r"RHUI Username:";
pub const PASSWORD_RE: &str = r"RHUI Password:";
pub const INVALID_LOGIN_RE: &str = r"Invalid login";

pub const HOME_KEY: &str = "b";
pub const QUIT_KEY: &str = "q";
pub const LOGOUT_COMMAND: &str = "logout";
pub const CTRL_C: &[u8] = b"\x03";

// Checklists.
pub const CHECKLIST_END_RE: &str = r"or '\?' for more commands:";
pub const CHECKLIST_LINE_RE: &str = r"^\s*([x-])\s+(\d+)\s*:\s*([^\n]*?)\s*$";
pub const SELECT_ALL_KEY: &str = "a";
pub const CONFIRM_KEY: &str = "c";
pub const RELIST_KEY: &str = "l";

// Single-choice lists.
pub const CHOICE_END_RE: &str = r"or 'b' to abort:";
pub const CHOICE_LINE_RE: &str = r"^\s*(\d+)\s+-\s+([^\n]*?)\s*$";

// Confirmations.
pub const PROCEED_RE: &str = r"Proceed\? \(y/n\)";
pub const CONTINUE_RE: &str = r"\(y/n\)";
pub const YES: &str = "y";
pub const NO: &str = "n";

pub const CANNOT_FIND_FILE_RE: &str = r"Cannot find file";

// Instances (cds / loadbalancers).
pub const LIST_KEY: &str = "l";
pub const ADD_KEY: &str = "a";
pub const DELETE_KEY: &str = "d";
pub const INSTANCE_HOSTNAME_RE: &str = r"Hostname of the [^\n]* instance to register:";
pub const INSTANCE_EXISTS_RE: &str = r"instance with that hostname exists";
pub const INSTANCE_USER_RE: &str = r"Username with SSH access to [^\n]* and sudo privileges:";
pub const INSTANCE_KEY_RE: &str = r"Absolute path to an SSH private key to log into [^\n]*:";
pub const INSTANCE_ADDED_RE: &str = r"instance was successfully (?:registered|updated)";
pub const INSTANCE_DELETED_RE: &str = r"successfully unregistered";
pub const LAST_INSTANCE_RE: &str = r"this is the last [^\n]* instance";
pub const NOT_TRACKED_RE: &str = r"is not tracked";
pub const HOSTNAME_FIELD: &str = "Hostname:";
pub const SSH_USER_FIELD: &str = "SSH Username:";
pub const SSH_KEY_FIELD: &str = "SSH Private Key:";

/// Caption above the registration summary.
#[must_use]
pub fn instance_add_caption(kind: NodeKind) -> String {
    format!("The following {} instance will be registered:", kind.label())
}

#[must_use]
pub fn instance_delete_caption(kind: NodeKind) -> String {
    format!("The following {} instances will be unregistered:", kind.label())
}

// Repositories.
pub const REPO_ADD_CUSTOM_KEY: &str = "c";
pub const REPO_ADD_CONTAINER_KEY: &str = "ad";
pub const REPO_INFO_KEY: &str = "i";
pub const REPO_ID_RE: &str = r"Unique ID for the custom repository[^\n]*:";
pub const REPO_EXISTS_RE: &str = r"A repository with ID [^\n]* already exists";
pub const REPO_NAME_RE: &str = r"Display name for the custom repository[^\n]*:";
pub const REPO_PATH_RE: &str = r"Unique path at which the repository will be served[^\n]*:";
pub const REPO_ENTITLEMENT_RE: &str = r"require an entitlement certificate[^\n]*\(y/n\)";
pub const REPO_GPG_RE: &str = r"GPG check[^\n]*\(y/n\)";
pub const REPO_CREATED_RE: &str = r"Successfully created repository";
pub const REPO_CREATE_CAPTION: &str = "The following repository will be created:";
pub const REPO_DELETE_CAPTION: &str = "The following repositories will be deleted:";
pub const CONTAINER_NAME_RE: &str = r"Name of the container in the registry:";
pub const CONTAINER_ID_RE: &str = r"Unique ID for the container[^\n]*:";
pub const CONTAINER_DISPLAY_RE: &str = r"Display name for the container[^\n]*:";
pub const CONTAINER_CAPTION: &str = "The following container will be added:";
pub const CONTAINER_ADDED_RE: &str = r"Successfully added container";
pub const CUSTOM_SECTION: &str = "Custom Repositories";
pub const RED_HAT_SECTION: &str = "Red Hat Repositories";
pub const CONTAINER_SECTION: &str = "Container Repositories";

// Sync.
pub const SYNC_REPOS_KEY: &str = "sr";
pub const SYNC_STATUS_KEY: &str = "dr";
pub const SYNC_CAPTION: &str =
    "The following repositories will be scheduled for synchronization:";

// Entitlements.
pub const UPLOAD_KEY: &str = "u";
pub const CERT_PATH_RE: &str = r"Full path to the new content certificate:";
pub const CERT_SUMMARY_CAPTION: &str =
    "The RHUI will be updated with the following certificate:";
pub const CERT_INCOMPATIBLE_RE: &str = r"not compatible";

// Client.
pub const ENTITLEMENT_CERT_KEY: &str = "e";
pub const CLIENT_RPM_KEY: &str = "c";
pub const CLIENT_DIR_RE: &str = r"Full path to local directory[^\n]*:";
pub const CERT_NAME_RE: &str = r"Name of the certificate[^\n]*:";
pub const CERT_DAYS_RE: &str = r"Number of days the certificate should be valid[^\n]*:";
pub const CERT_REPOS_CAPTION: &str = "Repositories to be included in the entitlement certificate:";
pub const CERT_CREATED_RE: &str = r"Entitlement certificate created at (\S+\.crt)";
pub const RPM_NAME_RE: &str = r"Name of the RPM:";
pub const RPM_VERSION_RE: &str = r"Version of the configuration RPM[^\n]*:";
pub const RPM_CERT_RE: &str = r"Full path to the entitlement certificate:";
pub const RPM_KEY_RE: &str = r"Full path to the private key for the above entitlement certificate:";
pub const RPM_LOCATION_RE: &str = r"Location: (\S+\.rpm)";
/// Group headings inside the certificate summary, never repository names.
pub const CERT_SUMMARY_HEADINGS: [&str; 2] = ["Red Hat Repositories", "Custom Entitlements"];

// Users.
pub const CHANGE_PASSWORD_KEY: &str = "p";
pub const USERS_USERNAME_RE: &str = r"Username[^\n]*:";
pub const NEW_PASSWORD_RE: &str = r"New Password:";
pub const REENTER_PASSWORD_RE: &str = r"Re-enter Password:";
pub const PASSWORD_CHANGED_RE: &str = r"Password successfully updated";

// Subscriptions.
pub const SUBSCRIPTIONS_AVAILABLE_KEY: &str = "a";
pub const SUBSCRIPTIONS_REGISTER_KEY: &str = "r";
pub const SUBSCRIPTIONS_UNREGISTER_KEY: &str = "d";
pub const SUBSCRIPTIONS_REGISTER_CAPTION: &str = "The following subscriptions will be registered:";
pub const SUBSCRIPTIONS_UNREGISTER_CAPTION: &str =
    "The following subscriptions will be unregistered:";
