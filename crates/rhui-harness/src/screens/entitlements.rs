//! Content certificates (`entitlements` screen).

use crate::console::{self, prompts, selection};
use crate::error::{ErrorCode, HarnessError, HarnessResult};
use crate::model::Screen;
use crate::screens::indented_names;
use crate::session::Session;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum UploadReply {
    Missing,
    Incompatible,
    Summary,
}

/// Products the installed content certificate entitles.
pub fn list(session: &mut Session) -> HarnessResult<Vec<String>> {
    console::on_screen(session, Screen::Entitlements, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::LIST_KEY)?;
        let listing = console::expect_prompt(session, timeout)?;
        Ok(indented_names(&listing))
    })
}

/// Upload a content certificate from `path` on the RHUA.
///
/// Returns the entitlement names the console listed before confirming.
pub fn upload_certificate(session: &mut Session, path: &str) -> HarnessResult<Vec<String>> {
    info!(session = %session.id(), path, "uploading content certificate");
    console::on_screen(session, Screen::Entitlements, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::UPLOAD_KEY)?;
        session.expect(prompts::CERT_PATH_RE, timeout)?;
        session.enter(path)?;

        let summary = selection::summary_pattern(prompts::CERT_SUMMARY_CAPTION);
        let (reply, found) = session.expect_list(
            &[
                (prompts::CANNOT_FIND_FILE_RE, UploadReply::Missing),
                (prompts::CERT_INCOMPATIBLE_RE, UploadReply::Incompatible),
                (summary.as_str(), UploadReply::Summary),
            ],
            timeout,
        )?;
        let refusal = match reply {
            UploadReply::Missing => Some((
                ErrorCode::MissingCertificate,
                format!("the RHUA has no certificate at {path}"),
            )),
            UploadReply::Incompatible => Some((
                ErrorCode::IncompatibleCertificate,
                format!("the certificate at {path} is not compatible with this RHUI"),
            )),
            UploadReply::Summary => None,
        };
        if let Some((code, message)) = refusal {
            console::expect_prompt(session, timeout)?;
            warn!(session = %session.id(), path, %code, "certificate refused");
            return Err(HarnessError::new(
                code,
                message,
                serde_json::json!({ "path": path }),
            ));
        }

        let names = selection::summary_lines(found.group(1).unwrap_or_default());
        selection::answer(session, true)?;
        console::expect_prompt(session, timeout)?;
        Ok(names)
    })
}
