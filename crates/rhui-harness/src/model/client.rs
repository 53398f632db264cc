use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Parameters for issuing a client entitlement certificate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitlementCertRequest {
    /// Repositories (display names) the certificate grants.
    pub repos: Vec<String>,
    /// Certificate base name.
    pub name: String,
    /// Validity in days.
    pub days: u32,
    /// Directory on the RHUA the files are written to.
    pub dir: String,
}

/// Files written by the console for a new entitlement certificate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCertificate {
    pub cert_path: PathBuf,
    pub key_path: PathBuf,
}

/// Parameters for building a client configuration RPM.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRpmRequest {
    pub dir: String,
    pub rpm_name: String,
    /// RPM version; the console defaults it to `2.0`.
    #[serde(default)]
    pub version: Option<String>,
    pub cert_path: String,
    pub key_path: String,
}
