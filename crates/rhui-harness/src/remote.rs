//! Files on the RHUA read through the session's command channel.

use crate::error::{ErrorCode, HarnessError, HarnessResult};
use crate::session::text::compile_safe_regex;
use crate::session::Session;
use serde_yml::Value;
use std::collections::BTreeSet;
use tracing::debug;

/// Key of the generated console password in the installer answers file.
pub const ANSWERS_PASSWORD_KEY: &str = "rhui_manager_password";

pub const HOSTS_FILE: &str = "/etc/hosts";

/// Quote `value` for a POSIX shell.
#[must_use]
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// Contents of a remote file.
pub fn read_file(session: &mut Session, path: &str) -> HarnessResult<String> {
    let command = format!("cat -- {}", shell_quote(path));
    let timeout = session.options().command_timeout;
    let output = session.run_command(&command, timeout)?;
    if !output.success() {
        return Err(HarnessError::new(
            ErrorCode::Io,
            format!("failed to read remote file {path}"),
            serde_json::json!({ "path": path, "exit_code": output.exit_code, "output": output.output }),
        ));
    }
    Ok(output.output)
}

/// The console's initial password from the installer answers file.
pub fn initial_password(session: &mut Session, answers_file: &str) -> HarnessResult<String> {
    let data = read_file(session, answers_file)?;
    debug!(session = %session.id(), answers_file, "read answers file");
    password_from_answers(&data).ok_or_else(|| {
        HarnessError::protocol(
            format!("{answers_file} has no {ANSWERS_PASSWORD_KEY}"),
            serde_json::json!({ "path": answers_file }),
        )
    })
}

/// Find `rhui_manager_password` at any depth of an answers document.
#[must_use]
pub fn password_from_answers(data: &str) -> Option<String> {
    let document: Value = serde_yml::from_str(data).ok()?;
    find_key(&document, ANSWERS_PASSWORD_KEY)
}

fn find_key(value: &Value, key: &str) -> Option<String> {
    match value {
        Value::Mapping(map) => map.iter().find_map(|(k, v)| {
            if k.as_str() == Some(key) {
                scalar_string(v)
            } else {
                find_key(v, key)
            }
        }),
        Value::Sequence(items) => items.iter().find_map(|item| find_key(item, key)),
        _ => None,
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Hostnames and aliases in the RHUA's `/etc/hosts` matching `pattern`.
///
/// Sorted, without duplicates.
pub fn hosts_matching(session: &mut Session, pattern: &str) -> HarnessResult<Vec<String>> {
    let filter = compile_safe_regex(pattern)?;
    let data = read_file(session, HOSTS_FILE)?;
    Ok(parse_hosts(&data, |name| filter.is_match(name)))
}

/// Names from hosts-file text accepted by `keep`.
pub fn parse_hosts(data: &str, keep: impl Fn(&str) -> bool) -> Vec<String> {
    let names: BTreeSet<String> = data
        .lines()
        .map(|line| line.split('#').next().unwrap_or_default())
        .flat_map(|line| line.split_whitespace().skip(1))
        .filter(|name| keep(name))
        .map(str::to_string)
        .collect();
    names.into_iter().collect()
}

/// Whether `needle` appears in the last `tail_lines` lines of a remote log.
pub fn log_contains(
    session: &mut Session,
    path: &str,
    needle: &str,
    tail_lines: usize,
) -> HarnessResult<bool> {
    let command = format!("tail -n {tail_lines} -- {}", shell_quote(path));
    let timeout = session.options().command_timeout;
    let output = session.run_command(&command, timeout)?;
    if !output.success() {
        return Err(HarnessError::new(
            ErrorCode::Io,
            format!("failed to read remote log {path}"),
            serde_json::json!({ "path": path, "exit_code": output.exit_code, "output": output.output }),
        ));
    }
    Ok(output.output.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoting_survives_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn password_is_found_at_any_depth() {
        let answers = "rhua:\n  rhui_manager_password: s3cret\n  proxy: none\n";
        assert_eq!(password_from_answers(answers).as_deref(), Some("s3cret"));
        assert_eq!(password_from_answers("other: 1\n"), None);
    }

    #[test]
    fn hosts_are_sorted_deduplicated_and_include_aliases() {
        let hosts = "\
127.0.0.1 localhost
10.0.0.5 cds02.example.com cds02  # second
10.0.0.4 cds01.example.com cds01
10.0.0.4 cds01.example.com
# 10.0.0.9 cds09.example.com
";
        let names = parse_hosts(hosts, |name| name.starts_with("cds"));
        assert_eq!(
            names,
            ["cds01", "cds01.example.com", "cds02", "cds02.example.com"]
        );
    }
}
