// Test module - relaxed lint rules
#![allow(clippy::default_trait_access)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::inefficient_to_string)]
#![allow(clippy::panic)]
#![allow(clippy::manual_assert)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::cast_possible_truncation)]
#![allow(missing_docs)]

#![cfg(unix)]

use std::collections::BTreeMap;
use std::time::Duration;

use rhui_harness::config::HarnessConfig;
use rhui_harness::remote;
use rhui_harness::transport::{Endpoint, LocalShell};
use rhui_harness::{ErrorCode, Session};

const TIMEOUT: Duration = Duration::from_secs(5);

fn local_session() -> Session {
    let mut env = BTreeMap::new();
    env.insert("PS1".to_string(), "rhua# ".to_string());
    let config = HarnessConfig {
        endpoint: Endpoint::Local(LocalShell {
            env,
            ..LocalShell::default()
        }),
        ..HarnessConfig::default()
    };
    let mut session = Session::connect(&config).unwrap();
    session.expect("rhua# ", TIMEOUT).unwrap();
    session
}

#[test]
fn ping_pong_over_a_local_shell() {
    let mut session = local_session();
    let found = session
        .ping_pong("echo \"value=$((40 + 2))\"", r"value=(\d+)", TIMEOUT)
        .unwrap();
    assert_eq!(found.group(1), Some("42"));
    session.close().unwrap();
}

#[test]
fn captures_follow_the_previous_match() {
    let mut session = local_session();
    session.enter("printf 'first\\nsecond\\n'").unwrap();
    let groups = session.capture(r"(first)\r?\n(second)", &[1, 2], TIMEOUT).unwrap();
    assert_eq!(groups, ["first", "second"]);
    let err = session.expect("first", Duration::from_millis(300)).unwrap_err();
    assert!(err.is(ErrorCode::ExpectationFailed));
    session.close().unwrap();
}

#[test]
fn one_shot_commands_report_their_status() {
    let mut session = local_session();
    let output = session.expect_retval("echo out; exit 0", 0, TIMEOUT).unwrap();
    assert!(output.output.contains("out"));

    let err = session.expect_retval("exit 3", 0, TIMEOUT).unwrap_err();
    assert!(err.is(ErrorCode::UnexpectedExitStatus));
    assert_eq!(err.context.as_ref().unwrap()["actual"], 3);
    session.close().unwrap();
}

#[test]
fn slow_commands_time_out() {
    let mut session = local_session();
    let err = session
        .run_command("sleep 5", Duration::from_millis(200))
        .unwrap_err();
    assert!(err.is(ErrorCode::WaitTimeout));
    session.close().unwrap();
}

#[test]
fn remote_files_are_read_through_the_command_channel() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("rhui-manager.log");
    std::fs::write(&log, "old line\nsync started\nsync finished\n").unwrap();
    let log = log.display().to_string();
    let mut session = local_session();

    assert_eq!(
        remote::read_file(&mut session, &log).unwrap(),
        "old line\nsync started\nsync finished\n"
    );
    assert!(remote::log_contains(&mut session, &log, "sync finished", 1).unwrap());
    assert!(!remote::log_contains(&mut session, &log, "old line", 2).unwrap());

    let missing = dir.path().join("nope").display().to_string();
    assert!(remote::read_file(&mut session, &missing).unwrap_err().is(ErrorCode::Io));
}

#[test]
fn hosts_matching_filters_the_hosts_file() {
    let mut session = local_session();
    let names = remote::hosts_matching(&mut session, "^local").unwrap();
    assert!(names.iter().all(|name| name.starts_with("local")));
    assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
}
