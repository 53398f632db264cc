//! Synchronization scheduling and status (`sync` screen).

use crate::console::{self, prompts, selection};
use crate::error::{ErrorCode, HarnessError, HarnessResult};
use crate::model::{Screen, SyncStatus, WaitPolicy};
use crate::session::text;
use crate::session::Session;
use tracing::{debug, info, warn};

/// Schedule the named repositories for immediate synchronization.
pub fn sync_repos<S: AsRef<str>>(session: &mut Session, names: &[S]) -> HarnessResult<()> {
    info!(
        session = %session.id(),
        repos = ?names.iter().map(AsRef::as_ref).collect::<Vec<&str>>(),
        "scheduling sync"
    );
    console::on_screen(session, Screen::Sync, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::SYNC_REPOS_KEY)?;
        selection::select(session, names)?;
        selection::proceed_with_check(session, prompts::SYNC_CAPTION, names, &[] as &[&str])?;
        console::expect_prompt(session, timeout)?;
        Ok(())
    })
}

/// Last sync result of one repository.
pub fn repo_status(session: &mut Session, name: &str) -> HarnessResult<SyncStatus> {
    let report = console::on_screen(session, Screen::Sync, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::SYNC_STATUS_KEY)?;
        console::expect_prompt(session, timeout)
    })?;
    parse_status(&report, name).ok_or_else(|| {
        HarnessError::new(
            ErrorCode::ExpectationFailed,
            format!("repository {name} is not on the sync status screen"),
            serde_json::json!({ "repo": name, "unmatched": report }),
        )
    })
}

/// Status of `name` in a status report: the last word of the line after the
/// repository's own line. Words outside the vocabulary read as `Unknown`.
#[must_use]
pub fn parse_status(report: &str, name: &str) -> Option<SyncStatus> {
    let mut lines = text::lines(report).map(str::trim);
    lines.find(|line| *line == name)?;
    let detail = lines.find(|line| !line.is_empty())?;
    let last = detail.split_whitespace().next_back()?;
    Some(last.parse().unwrap_or(SyncStatus::Unknown))
}

/// Poll the status screen until `name` settles.
///
/// Returns on `Success`; `Error` is `E_SYNC_FAILED`. Gives up with
/// `E_WAIT_TIMEOUT` after `policy.max_attempts` reads.
pub fn wait_till_repo_synced(
    session: &mut Session,
    name: &str,
    policy: WaitPolicy,
) -> HarnessResult<()> {
    info!(session = %session.id(), repo = name, attempts = policy.max_attempts, "waiting for sync");
    let mut last = None;
    for attempt in 1..=policy.max_attempts {
        let status = repo_status(session, name)?;
        debug!(session = %session.id(), repo = name, attempt, %status, "sync status");
        match status {
            SyncStatus::Success => return Ok(()),
            SyncStatus::Error => {
                warn!(session = %session.id(), repo = name, "sync failed");
                return Err(HarnessError::new(
                    ErrorCode::SyncFailed,
                    format!("repository {name} synced with an error"),
                    serde_json::json!({ "repo": name, "attempt": attempt }),
                ));
            }
            _ => last = Some(status),
        }
        if attempt < policy.max_attempts {
            std::thread::sleep(policy.poll_interval);
        }
    }
    Err(HarnessError::wait_timeout(
        format!(
            "repository {name} did not settle after {} status reads",
            policy.max_attempts
        ),
        serde_json::json!({
            "repo": name,
            "attempts": policy.max_attempts,
            "last_status": last.map(SyncStatus::as_str),
        }),
    ))
}
