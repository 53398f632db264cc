//! `--noninteractive` mode: one command, a message, an exit status.
//!
//! Exit status 0 is success, 1 a refusal (the message says why) and 2 a
//! usage error.

use crate::listing::{node_listing, read_certificate, Certificate};
use crate::state::FakeState;
use rhui_harness::model::{NodeKind, NodeRecord};
use std::io::{self, Write};
use std::path::Path;

const USAGE: &str = "usage: rhui-manager --noninteractive <cds|haproxy|repo|cert|status> ...";

/// Run one non-interactive command against `state`, saving it to
/// `state_path` when the command changed something.
pub fn run<W: Write>(
    args: &[String],
    state: &mut FakeState,
    state_path: &Path,
    out: &mut W,
) -> io::Result<i32> {
    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    let (code, message, changed) = match words.as_slice() {
        ["cds", rest @ ..] => nodes(NodeKind::Cds, rest, state),
        ["haproxy", rest @ ..] => nodes(NodeKind::HaProxy, rest, state),
        ["repo", "list"] => {
            let mut text = String::from("Repositories:\n");
            for repo in &state.repos {
                text.push_str(&format!("{} :: {}\n", repo.id, repo.name));
            }
            (0, text, false)
        }
        ["repo", "sync", rest @ ..] => repo_sync(rest, state),
        ["cert", "upload", rest @ ..] => cert_upload(rest, state),
        ["status"] => status(state),
        _ => (2, format!("{USAGE}\n"), false),
    };
    if changed {
        state.save(state_path)?;
    }
    out.write_all(message.as_bytes())?;
    out.flush()?;
    Ok(code)
}

type Outcome = (i32, String, bool);

fn option<'a>(args: &[&'a str], name: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| *arg == name)
        .and_then(|index| args.get(index + 1))
        .copied()
}

fn flag(args: &[&str], name: &str) -> bool {
    args.contains(&name)
}

fn nodes(kind: NodeKind, args: &[&str], state: &mut FakeState) -> Outcome {
    match args {
        ["list"] => (0, node_listing(kind, state.nodes(kind)), false),
        ["add", rest @ ..] => node_add(kind, rest, state),
        ["delete", rest @ ..] => node_delete(kind, rest, state),
        _ => (2, format!("{USAGE}\n"), false),
    }
}

fn node_add(kind: NodeKind, args: &[&str], state: &mut FakeState) -> Outcome {
    let (Some(host), Some(user), Some(key)) = (
        option(args, "--hostname"),
        option(args, "--ssh_user"),
        option(args, "--keyfile_path"),
    ) else {
        return (2, "--hostname, --ssh_user and --keyfile_path are required\n".into(), false);
    };
    let label = kind.label();
    let existing = state.find_node(kind, host);
    if existing.is_some() && !flag(args, "--force") {
        return (
            1,
            format!("{host} is already tracked by the RHUI, use --force to reinstall it\n"),
            false,
        );
    }
    if !Path::new(key).is_file() {
        return (1, format!("Cannot find file {key}\n"), false);
    }
    let node = NodeRecord::new(host, user, key);
    let nodes = state.nodes_mut(kind);
    match existing {
        Some(index) => {
            if let Some(slot) = nodes.get_mut(index) {
                *slot = node;
            }
        }
        None => nodes.push(node),
    }
    (
        0,
        format!("Installing software...\n{label} instance {host} successfully registered\n"),
        true,
    )
}

fn node_delete(kind: NodeKind, args: &[&str], state: &mut FakeState) -> Outcome {
    let Some(joined) = option(args, "--hostnames") else {
        return (2, "--hostnames is required\n".into(), false);
    };
    let label = kind.label();
    let wanted: Vec<&str> = joined.split(',').filter(|host| !host.is_empty()).collect();
    if let Some(unknown) = wanted
        .iter()
        .find(|host| state.find_node(kind, host).is_none())
    {
        return (1, format!("{unknown} is not tracked by the RHUI\n"), false);
    }
    let remaining = state
        .nodes(kind)
        .iter()
        .filter(|node| !wanted.iter().any(|host| node.is_host(host)))
        .count();
    if remaining == 0 && !flag(args, "--force") {
        return (
            1,
            format!("{joined} is the last {label} instance, use --force to delete it\n"),
            false,
        );
    }
    state
        .nodes_mut(kind)
        .retain(|node| !wanted.iter().any(|host| node.is_host(host)));
    (0, format!("{label} instances {joined} successfully unregistered\n"), true)
}

fn repo_sync(args: &[&str], state: &mut FakeState) -> Outcome {
    let Some(id) = option(args, "--repo_id") else {
        return (2, "--repo_id is required\n".into(), false);
    };
    let Some(name) = state.find_repo_by_id(id).map(|repo| repo.name.clone()) else {
        return (1, format!("Repository {id} does not exist\n"), false);
    };
    state.schedule_sync(&name);
    (0, format!("Scheduled {name} for synchronization\n"), true)
}

fn cert_upload(args: &[&str], state: &mut FakeState) -> Outcome {
    let Some(path) = option(args, "--cert") else {
        return (2, "--cert is required\n".into(), false);
    };
    match read_certificate(Path::new(path)) {
        Certificate::Missing => (1, format!("Cannot find file {path}\n"), false),
        Certificate::Incompatible => (
            1,
            format!("The certificate {path} is not compatible with this RHUI\n"),
            false,
        ),
        Certificate::Entitlements(names) => {
            let mut text = String::from("Entitlements added:\n");
            for name in names {
                text.push_str(&format!("  {name}\n"));
                if !state.entitlements.contains(&name) {
                    state.entitlements.push(name);
                }
            }
            (0, text, true)
        }
    }
}

fn status(state: &FakeState) -> Outcome {
    let mut text = String::new();
    let mut healthy = true;
    for kind in [NodeKind::Cds, NodeKind::HaProxy] {
        for node in state.nodes(kind) {
            let down = state.down_nodes.iter().any(|host| node.is_host(host));
            healthy &= !down;
            let verdict = if down { "UNREACHABLE" } else { "OK" };
            text.push_str(&format!("{} {}: {verdict}\n", kind.label(), node.host_name));
        }
    }
    text.push_str(if healthy { "RHUI is healthy\n" } else { "RHUI is degraded\n" });
    (if healthy { 0 } else { 1 }, text, false)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call(state: &mut FakeState, dir: &Path, args: &[&str]) -> (i32, String) {
        let args: Vec<String> = args.iter().map(ToString::to_string).collect();
        let mut out = Vec::new();
        let code = run(&args, state, &dir.join("state.json"), &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn adding_twice_needs_force() {
        let dir = crate::temp_dir("ni-add");
        let key = dir.join("id_rsa");
        std::fs::write(&key, "key").unwrap();
        let key = key.display().to_string();
        let mut state = FakeState::default();
        let add = ["cds", "add", "--hostname", "cds01", "--ssh_user", "ec2-user", "--keyfile_path", key.as_str()];

        assert_eq!(call(&mut state, &dir, &add).0, 0);
        let (code, output) = call(&mut state, &dir, &add);
        assert_eq!(code, 1);
        assert!(output.contains("already tracked"));

        let mut forced = add.to_vec();
        forced.push("--force");
        assert_eq!(call(&mut state, &dir, &forced).0, 0);
        assert_eq!(state.cds.len(), 1);
    }

    #[test]
    fn last_node_is_kept_without_force() {
        let dir = crate::temp_dir("ni-delete");
        let mut state = FakeState::default();
        state.haproxy.push(NodeRecord::new("lb01", "ec2-user", "/k"));

        let (code, output) = call(&mut state, &dir, &["haproxy", "delete", "--hostnames", "lb01"]);
        assert_eq!(code, 1);
        assert!(output.contains("is the last"));

        let (code, output) = call(&mut state, &dir, &["haproxy", "delete", "--hostnames", "lb09"]);
        assert_eq!(code, 1);
        assert!(output.contains("is not tracked"));

        let forced = ["haproxy", "delete", "--hostnames", "LB01", "--force"];
        assert_eq!(call(&mut state, &dir, &forced).0, 0);
        assert!(state.haproxy.is_empty());
    }

    #[test]
    fn status_reports_unreachable_nodes() {
        let dir = crate::temp_dir("ni-status");
        let mut state = FakeState::default();
        state.cds.push(NodeRecord::new("cds01", "ec2-user", "/k"));
        assert_eq!(call(&mut state, &dir, &["status"]).0, 0);

        state.down_nodes.push("cds01".into());
        let (code, output) = call(&mut state, &dir, &["status"]);
        assert_eq!(code, 1);
        assert!(output.contains("UNREACHABLE"));
    }

    #[test]
    fn unknown_commands_are_usage_errors() {
        let dir = crate::temp_dir("ni-usage");
        let mut state = FakeState::default();
        assert_eq!(call(&mut state, &dir, &["bogus"]).0, 2);
    }
}
