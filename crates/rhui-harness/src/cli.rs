//! Structured client for the console's non-interactive mode.
//!
//! Each call runs `<console> --noninteractive <args>` through
//! [`Session::run_command`]. A non-zero exit is classified by the literal the
//! console printed; output nobody recognises becomes
//! `E_UNEXPECTED_EXIT_STATUS` with the full output in the context.

use crate::error::{ErrorCode, HarnessError, HarnessResult};
use crate::model::{CommandOutput, NodeKind, NodeRecord};
use crate::remote::shell_quote;
use crate::screens::instance::parse_node_listing;
use crate::session::{unexpected_exit, Session};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

pub const NONINTERACTIVE_FLAG: &str = "--noninteractive";

const ALREADY_TRACKED: &str = "already tracked";
const NOT_TRACKED: &str = "is not tracked";
const LAST_INSTANCE: &str = "is the last";
const CANNOT_FIND_FILE: &str = "Cannot find file";
const NOT_COMPATIBLE: &str = "not compatible";

/// One line of `repo list`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoEntry {
    pub id: String,
    pub name: String,
}

/// Result of `status`; a failing status is a report, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub healthy: bool,
    pub output: String,
}

/// Nodes of `kind` registered with the RHUI.
pub fn nodes_list(session: &mut Session, kind: NodeKind) -> HarnessResult<Vec<NodeRecord>> {
    let output = run_checked(session, &[kind.command_noun(), "list"], &[], None)?;
    Ok(parse_node_listing(&output.output))
}

/// Register `node`; `force` reinstalls a node that is already tracked.
pub fn node_add(
    session: &mut Session,
    kind: NodeKind,
    node: &NodeRecord,
    force: bool,
) -> HarnessResult<()> {
    info!(session = %session.id(), %kind, host = %node.host_name, force, "adding node (non-interactive)");
    let mut args = vec![
        kind.command_noun(),
        "add",
        "--hostname",
        node.host_name.as_str(),
        "--ssh_user",
        node.ssh_user.as_str(),
        "--keyfile_path",
        node.ssh_key_path.as_str(),
    ];
    if force {
        args.push("--force");
    }
    let timeout = session.options().node_setup_timeout;
    run_checked(
        session,
        &args,
        &[
            (ALREADY_TRACKED, ErrorCode::AlreadyExists),
            (CANNOT_FIND_FILE, ErrorCode::InvalidSshKeyPath),
        ],
        Some(timeout),
    )?;
    Ok(())
}

/// Unregister `host_names`; `force` allows removing the last node.
pub fn node_delete<S: AsRef<str>>(
    session: &mut Session,
    kind: NodeKind,
    host_names: &[S],
    force: bool,
) -> HarnessResult<()> {
    let joined = host_names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<&str>>()
        .join(",");
    info!(session = %session.id(), %kind, hosts = %joined, force, "deleting nodes (non-interactive)");
    let mut args = vec![kind.command_noun(), "delete", "--hostnames", joined.as_str()];
    if force {
        args.push("--force");
    }
    let timeout = session.options().node_setup_timeout;
    run_checked(
        session,
        &args,
        &[
            (NOT_TRACKED, ErrorCode::NoSuchInstance),
            (LAST_INSTANCE, ErrorCode::DeletionRefused),
        ],
        Some(timeout),
    )?;
    Ok(())
}

/// Every repository as `id :: name` pairs.
pub fn repo_list(session: &mut Session) -> HarnessResult<Vec<RepoEntry>> {
    let output = run_checked(session, &["repo", "list"], &[], None)?;
    Ok(parse_repo_entries(&output.output))
}

/// Parse `id :: name` lines; other lines are ignored.
#[must_use]
pub fn parse_repo_entries(output: &str) -> Vec<RepoEntry> {
    output
        .lines()
        .filter_map(|line| {
            let (id, name) = line.split_once("::")?;
            let id = id.trim();
            if id.is_empty() || id.contains(char::is_whitespace) {
                return None;
            }
            Some(RepoEntry {
                id: id.to_string(),
                name: name.trim().to_string(),
            })
        })
        .collect()
}

/// Schedule a sync of repository `repo_id`.
pub fn repo_sync(session: &mut Session, repo_id: &str) -> HarnessResult<()> {
    info!(session = %session.id(), repo_id, "scheduling sync (non-interactive)");
    run_checked(session, &["repo", "sync", "--repo_id", repo_id], &[], None)?;
    Ok(())
}

/// Upload a content certificate from `path` on the RHUA.
pub fn cert_upload(session: &mut Session, path: &str) -> HarnessResult<()> {
    info!(session = %session.id(), path, "uploading certificate (non-interactive)");
    run_checked(
        session,
        &["cert", "upload", "--cert", path],
        &[
            (CANNOT_FIND_FILE, ErrorCode::MissingCertificate),
            (NOT_COMPATIBLE, ErrorCode::IncompatibleCertificate),
        ],
        None,
    )?;
    Ok(())
}

/// Health of every node, as `status` reports it.
pub fn status(session: &mut Session) -> HarnessResult<StatusReport> {
    let command = command_line(session, &["status"]);
    let timeout = session.options().command_timeout;
    let output = session.run_command(&command, timeout)?;
    Ok(StatusReport {
        healthy: output.success(),
        output: output.output,
    })
}

fn command_line(session: &Session, args: &[&str]) -> String {
    let mut line = format!("{} {NONINTERACTIVE_FLAG}", session.options().console_command);
    for arg in args {
        line.push(' ');
        line.push_str(&shell_word(arg));
    }
    line
}

/// `arg` as is when the shell would not split or expand it, else quoted.
fn shell_word(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || "_-./,:=@".contains(ch));
    if plain {
        arg.to_string()
    } else {
        shell_quote(arg)
    }
}

fn run_checked(
    session: &mut Session,
    args: &[&str],
    known: &[(&str, ErrorCode)],
    timeout: Option<Duration>,
) -> HarnessResult<CommandOutput> {
    let command = command_line(session, args);
    let timeout = timeout.unwrap_or(session.options().command_timeout);
    let output = session.run_command(&command, timeout)?;
    if output.success() {
        return Ok(output);
    }
    Err(classify(&command, &output, known))
}

/// Map a failed command onto the first domain code whose literal it printed.
#[must_use]
pub fn classify(command: &str, output: &CommandOutput, known: &[(&str, ErrorCode)]) -> HarnessError {
    let Some((literal, code)) = known
        .iter()
        .find(|(literal, _)| output.output.contains(literal))
    else {
        return unexpected_exit(command, 0, output);
    };
    warn!(command, %code, "non-interactive command refused");
    HarnessError::new(
        *code,
        output.output.trim().to_string(),
        serde_json::json!({
            "command": command,
            "exit_code": output.exit_code,
            "matched": literal,
            "output": output.output,
        }),
    )
}
