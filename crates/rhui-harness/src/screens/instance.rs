//! CDS and HAProxy node registration (`cds` and `loadbalancers` screens).
//!
//! The console listing is the only source of truth: `delete` resolves the
//! requested hostnames against a fresh `list` before touching anything.

use crate::console::{self, prompts, selection};
use crate::error::{ErrorCode, HarnessError, HarnessResult};
use crate::model::{NodeKind, NodeRecord};
use crate::session::text::{self, normalize_line};
use crate::session::Session;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum HostnameReply {
    Exists,
    AskUser,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyReply {
    Missing,
    Summary,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DeleteReply {
    LastInstance,
    Deleted,
}

/// Register `node`, or reinstall it when it exists and `update` is set.
///
/// Fails with `E_ALREADY_EXISTS` when the console already tracks the
/// hostname (in any letter case) and `update` is false, and with
/// `E_INVALID_SSH_KEY_PATH` when the key is not on the RHUA.
pub fn add(
    session: &mut Session,
    kind: NodeKind,
    node: &NodeRecord,
    update: bool,
) -> HarnessResult<()> {
    info!(session = %session.id(), %kind, host = %node.host_name, update, "adding instance");
    console::on_screen(session, kind.screen(), |session| {
        add_on_screen(session, kind, node, update)
    })
}

fn add_on_screen(
    session: &mut Session,
    kind: NodeKind,
    node: &NodeRecord,
    update: bool,
) -> HarnessResult<()> {
    let timeout = session.options().default_timeout;
    session.enter(prompts::ADD_KEY)?;
    session.expect(prompts::INSTANCE_HOSTNAME_RE, timeout)?;
    session.enter(&node.host_name)?;

    let (reply, _) = session.expect_list(
        &[
            (prompts::INSTANCE_EXISTS_RE, HostnameReply::Exists),
            (prompts::INSTANCE_USER_RE, HostnameReply::AskUser),
        ],
        timeout,
    )?;
    if reply == HostnameReply::Exists {
        session.expect(prompts::CONTINUE_RE, timeout)?;
        if !update {
            selection::answer(session, false)?;
            console::expect_prompt(session, timeout)?;
            warn!(session = %session.id(), host = %node.host_name, "instance already tracked");
            return Err(HarnessError::new(
                ErrorCode::AlreadyExists,
                format!("{} {} is already tracked", kind.label(), node.host_name),
                serde_json::json!({ "kind": kind, "host_name": node.host_name }),
            ));
        }
        selection::answer(session, true)?;
        session.expect(prompts::INSTANCE_USER_RE, timeout)?;
    }

    session.enter(&node.ssh_user)?;
    session.expect(prompts::INSTANCE_KEY_RE, timeout)?;
    session.enter(&node.ssh_key_path)?;

    let caption = prompts::instance_add_caption(kind);
    let summary = selection::summary_pattern(&caption);
    let (reply, found) = session.expect_list(
        &[
            (prompts::CANNOT_FIND_FILE_RE, KeyReply::Missing),
            (summary.as_str(), KeyReply::Summary),
        ],
        timeout,
    )?;
    if reply == KeyReply::Missing {
        console::expect_prompt(session, timeout)?;
        warn!(session = %session.id(), key = %node.ssh_key_path, "ssh key not found on the RHUA");
        return Err(HarnessError::new(
            ErrorCode::InvalidSshKeyPath,
            format!("the RHUA has no SSH key at {}", node.ssh_key_path),
            serde_json::json!({ "ssh_key_path": node.ssh_key_path }),
        ));
    }

    let shown = selection::summary_lines(found.group(1).unwrap_or_default());
    selection::check_summary(&caption, shown, &summary_fields(node), &[] as &[&str])?;
    selection::answer(session, true)?;

    let setup_timeout = session.options().node_setup_timeout;
    session.expect(prompts::INSTANCE_ADDED_RE, setup_timeout)?;
    console::expect_prompt(session, timeout)?;
    Ok(())
}

fn summary_fields(node: &NodeRecord) -> [String; 3] {
    [
        format!("{} {}", prompts::HOSTNAME_FIELD, node.host_name),
        format!("{} {}", prompts::SSH_USER_FIELD, node.ssh_user),
        format!("{} {}", prompts::SSH_KEY_FIELD, node.ssh_key_path),
    ]
}

/// Nodes of `kind` the console currently tracks.
pub fn list(session: &mut Session, kind: NodeKind) -> HarnessResult<Vec<NodeRecord>> {
    console::on_screen(session, kind.screen(), |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::LIST_KEY)?;
        let listing = console::expect_prompt(session, timeout)?;
        Ok(parse_node_listing(&listing))
    })
}

/// Parse `Hostname:` / `SSH Username:` / `SSH Private Key:` blocks.
#[must_use]
pub fn parse_node_listing(listing: &str) -> Vec<NodeRecord> {
    let mut nodes: Vec<NodeRecord> = Vec::new();
    for line in text::lines(listing).map(normalize_line) {
        if let Some(host) = line.strip_prefix(prompts::HOSTNAME_FIELD) {
            nodes.push(NodeRecord::new(host.trim(), "", ""));
        } else if let Some(user) = line.strip_prefix(prompts::SSH_USER_FIELD) {
            if let Some(node) = nodes.last_mut() {
                node.ssh_user = user.trim().to_string();
            }
        } else if let Some(key) = line.strip_prefix(prompts::SSH_KEY_FIELD) {
            if let Some(node) = nodes.last_mut() {
                node.ssh_key_path = key.trim().to_string();
            }
        }
    }
    nodes
}

/// Unregister `host_names`.
///
/// Hostnames the console does not track fail with `E_NO_SUCH_INSTANCE`
/// before anything is selected. Removing the last node of a kind is refused
/// with `E_DELETION_REFUSED` unless `force` is set.
pub fn delete<S: AsRef<str>>(
    session: &mut Session,
    kind: NodeKind,
    host_names: &[S],
    force: bool,
) -> HarnessResult<()> {
    let tracked = list(session, kind)?;
    let resolved = host_names
        .iter()
        .map(|wanted| {
            let wanted = wanted.as_ref();
            tracked
                .iter()
                .find(|node| node.is_host(wanted))
                .map(|node| node.host_name.clone())
                .ok_or_else(|| {
                    HarnessError::new(
                        ErrorCode::NoSuchInstance,
                        format!("{} {wanted} is not tracked", kind.label()),
                        serde_json::json!({ "kind": kind, "host_name": wanted }),
                    )
                })
        })
        .collect::<HarnessResult<Vec<String>>>()?;
    let mut resolved_unique: Vec<String> = Vec::with_capacity(resolved.len());
    for host in resolved {
        if !resolved_unique.contains(&host) {
            resolved_unique.push(host);
        }
    }
    let resolved = resolved_unique;

    info!(session = %session.id(), %kind, hosts = ?resolved, force, "deleting instances");
    console::on_screen(session, kind.screen(), |session| {
        delete_on_screen(session, kind, &resolved, force)
    })
}

fn delete_on_screen(
    session: &mut Session,
    kind: NodeKind,
    host_names: &[String],
    force: bool,
) -> HarnessResult<()> {
    let timeout = session.options().default_timeout;
    session.enter(prompts::DELETE_KEY)?;
    selection::select_items(session, host_names)?;
    let caption = prompts::instance_delete_caption(kind);
    selection::proceed_with_check(session, &caption, host_names, &[] as &[&str])?;

    let setup_timeout = session.options().node_setup_timeout;
    let (reply, _) = session.expect_list(
        &[
            (prompts::LAST_INSTANCE_RE, DeleteReply::LastInstance),
            (prompts::INSTANCE_DELETED_RE, DeleteReply::Deleted),
        ],
        setup_timeout,
    )?;
    if reply == DeleteReply::LastInstance {
        session.expect(prompts::CONTINUE_RE, timeout)?;
        if !force {
            selection::answer(session, false)?;
            console::expect_prompt(session, timeout)?;
            warn!(session = %session.id(), %kind, "refusing to delete the last instance");
            return Err(HarnessError::new(
                ErrorCode::DeletionRefused,
                format!("deleting would leave no {} instance", kind.label()),
                serde_json::json!({ "kind": kind, "host_names": host_names }),
            ));
        }
        selection::answer(session, true)?;
        session.expect(prompts::INSTANCE_DELETED_RE, setup_timeout)?;
    }
    console::expect_prompt(session, timeout)?;
    Ok(())
}
