//! Client entitlement certificates and configuration RPMs (`client` screen).

use crate::console::{self, prompts, selection};
use crate::error::HarnessResult;
use crate::model::{ClientRpmRequest, EntitlementCertRequest, IssuedCertificate, Screen};
use crate::session::Session;
use std::path::PathBuf;
use tracing::info;

/// Issue an entitlement certificate for `request.repos`.
///
/// The summary must list exactly the requested repositories; its group
/// headings are ignored.
pub fn generate_entitlement_cert(
    session: &mut Session,
    request: &EntitlementCertRequest,
) -> HarnessResult<IssuedCertificate> {
    info!(session = %session.id(), name = %request.name, repos = ?request.repos, "issuing entitlement certificate");
    console::on_screen(session, Screen::Client, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::ENTITLEMENT_CERT_KEY)?;
        session.expect(prompts::CLIENT_DIR_RE, timeout)?;
        session.enter(&request.dir)?;
        session.expect(prompts::CERT_NAME_RE, timeout)?;
        session.enter(&request.name)?;
        selection::select(session, &request.repos)?;
        session.expect(prompts::CERT_DAYS_RE, timeout)?;
        session.enter(&request.days.to_string())?;
        selection::proceed_with_check(
            session,
            prompts::CERT_REPOS_CAPTION,
            &request.repos,
            &prompts::CERT_SUMMARY_HEADINGS,
        )?;
        let created = session.capture(prompts::CERT_CREATED_RE, &[1], timeout)?;
        console::expect_prompt(session, timeout)?;
        let cert_path = PathBuf::from(created.into_iter().next().unwrap_or_default());
        Ok(IssuedCertificate {
            key_path: cert_path.with_extension("key"),
            cert_path,
        })
    })
}

/// Build a client configuration RPM; returns where the console wrote it.
pub fn create_client_rpm(
    session: &mut Session,
    request: &ClientRpmRequest,
) -> HarnessResult<PathBuf> {
    info!(session = %session.id(), rpm = %request.rpm_name, "building client rpm");
    console::on_screen(session, Screen::Client, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::CLIENT_RPM_KEY)?;
        session.expect(prompts::CLIENT_DIR_RE, timeout)?;
        session.enter(&request.dir)?;
        session.expect(prompts::RPM_NAME_RE, timeout)?;
        session.enter(&request.rpm_name)?;
        session.expect(prompts::RPM_VERSION_RE, timeout)?;
        session.enter(request.version.as_deref().unwrap_or(""))?;
        session.expect(prompts::RPM_CERT_RE, timeout)?;
        session.enter(&request.cert_path)?;
        session.expect(prompts::RPM_KEY_RE, timeout)?;
        session.enter(&request.key_path)?;
        let location = session.capture(prompts::RPM_LOCATION_RE, &[1], timeout)?;
        console::expect_prompt(session, timeout)?;
        Ok(PathBuf::from(location.into_iter().next().unwrap_or_default()))
    })
}
