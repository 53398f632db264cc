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

use std::time::Duration;

use rhui_harness::console::{proceed_with_check, select, select_items, select_one};
use rhui_harness::transport::ScriptedTransport;
use rhui_harness::{ErrorCode, Session, SessionOptions};

const CHECKLIST_END: &str =
    "rhui: Enter value (1-3) to toggle selection, 'c' to confirm selections, or '?' for more commands: ";

fn options(timeout_ms: u64) -> SessionOptions {
    SessionOptions {
        default_timeout: Duration::from_millis(timeout_ms),
        read_step: Duration::from_millis(5),
        ..SessionOptions::default()
    }
}

fn checklist(marks: [char; 3]) -> String {
    format!(
        "\r\n  {}  1 : repo-A\r\n  {}  2 : repo-AB\r\n  {}  3 : repo-C (Yum)\r\n{CHECKLIST_END}",
        marks[0], marks[1], marks[2]
    )
}

#[test]
fn select_toggles_and_confirms() {
    let transport = ScriptedTransport::new(checklist(['-', '-', '-']))
        .reply("1", checklist(['x', '-', '-']))
        .reply("c", "");
    let handle = transport.handle();
    let mut session = Session::new(transport, options(2000));

    select(&mut session, &["repo-A"]).unwrap();

    assert_eq!(handle.sent(), vec!["1", "c"]);
    assert!(handle.is_complete());
}

#[test]
fn select_relists_between_values() {
    let transport = ScriptedTransport::new(checklist(['-', '-', '-']))
        .reply("3", checklist(['-', '-', 'x']))
        .reply("l", checklist(['-', '-', 'x']))
        .reply("2", checklist(['-', 'x', 'x']))
        .reply("c", "");
    let handle = transport.handle();
    let mut session = Session::new(transport, options(2000));

    select(&mut session, &["repo-C", "repo-AB"]).unwrap();

    assert_eq!(handle.sent(), vec!["3", "l", "2", "c"]);
}

#[test]
fn select_of_an_unknown_value_sends_nothing() {
    let transport = ScriptedTransport::new(checklist(['-', '-', '-']));
    let handle = transport.handle();
    let mut session = Session::new(transport, options(2000));

    let err = select(&mut session, &["repo-Z"]).unwrap_err();

    assert!(err.is(ErrorCode::ExpectationFailed));
    assert!(err.unmatched_output().unwrap().contains("repo-AB"));
    assert!(handle.sent().is_empty());
}

#[test]
fn select_fails_when_the_toggle_does_not_stick() {
    let transport = ScriptedTransport::new(checklist(['-', '-', '-']))
        .reply("1", checklist(['-', '-', '-']));
    let handle = transport.handle();
    let mut session = Session::new(transport, options(2000));

    let err = select(&mut session, &["repo-A"]).unwrap_err();

    assert!(err.is(ErrorCode::ExpectationFailed));
    assert_eq!(handle.sent(), vec!["1"]);
}

#[test]
fn select_items_skips_already_selected_entries() {
    let transport = ScriptedTransport::new(checklist(['x', '-', '-']))
        .reply("3", checklist(['x', '-', 'x']))
        .reply("c", "");
    let handle = transport.handle();
    let mut session = Session::new(transport, options(2000));

    select_items(&mut session, &["repo-A", "repo-C", "repo-C"]).unwrap();

    assert_eq!(handle.sent(), vec!["3", "c"]);
}

#[test]
fn select_one_prefers_the_exact_label() {
    let choices = "  1 - custom-1\r\n  2 - custom-1-extra\r\nEnter value (1-2) or 'b' to abort: ";
    let transport = ScriptedTransport::new(choices).reply("1", "");
    let handle = transport.handle();
    let mut session = Session::new(transport, options(2000));

    select_one(&mut session, "custom-1").unwrap();

    assert_eq!(handle.sent(), vec!["1"]);
}

#[test]
fn matching_summary_is_confirmed() {
    let summary =
        "The following repositories will be deleted:\r\n\r\n  repo-A\r\n  repo-C\r\n\r\nProceed? (y/n) ";
    let transport = ScriptedTransport::new(summary).reply("y", "");
    let handle = transport.handle();
    let mut session = Session::new(transport, options(2000));

    proceed_with_check(
        &mut session,
        "The following repositories will be deleted:",
        &["repo-C", "repo-A"],
        &[] as &[&str],
    )
    .unwrap();

    assert_eq!(handle.sent(), vec!["y"]);
}

#[test]
fn mismatched_summary_is_not_answered() {
    let summary = "The following repositories will be deleted:\r\n  repo-A\r\n  repo-C\r\nProceed? (y/n) ";
    let transport = ScriptedTransport::new(summary);
    let handle = transport.handle();
    let mut session = Session::new(transport, options(2000));

    let err = proceed_with_check(
        &mut session,
        "The following repositories will be deleted:",
        &["repo-A"],
        &[] as &[&str],
    )
    .unwrap_err();

    assert!(err.is(ErrorCode::ExpectationFailed));
    assert!(handle.sent().is_empty());
}

#[test]
fn summary_headings_can_be_skipped() {
    let summary = "Repositories to be included in the entitlement certificate:\r\n\r\n  Red Hat Repositories\r\n    RHEL 8 (RPMs)\r\n  Custom Entitlements\r\n    custom-1\r\nProceed? (y/n) ";
    let transport = ScriptedTransport::new(summary).reply("y", "");
    let handle = transport.handle();
    let mut session = Session::new(transport, options(2000));

    proceed_with_check(
        &mut session,
        "Repositories to be included in the entitlement certificate:",
        &["custom-1", "RHEL 8 (RPMs)"],
        &["Red Hat Repositories", "Custom Entitlements"],
    )
    .unwrap();

    assert_eq!(handle.sent(), vec!["y"]);
}

#[test]
fn missing_checklist_times_out_with_the_unmatched_output() {
    let transport = ScriptedTransport::new("rhui (repo) => ");
    let mut session = Session::new(transport, options(100));

    let err = select(&mut session, &["repo-A"]).unwrap_err();

    assert!(err.is(ErrorCode::ExpectationFailed));
    assert_eq!(err.unmatched_output(), Some("rhui (repo) => "));
}
