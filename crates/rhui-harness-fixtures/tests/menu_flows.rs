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

use std::io::Cursor;

use rhui_harness_fixtures::{Exit, FakeConsole, FakeState, StateBuilder};

fn drive(state: FakeState, lines: &[&str]) -> (Exit, String, FakeState) {
    let dir = tempfile::tempdir().unwrap();
    let input = Cursor::new(lines.iter().map(|line| format!("{line}\n")).collect::<String>());
    let mut output = Vec::new();
    let (exit, state) = {
        let mut console = FakeConsole::new(state, dir.path().join("state.json"), input, &mut output);
        let exit = console.run().unwrap();
        (exit, console.state().clone())
    };
    (exit, String::from_utf8(output).unwrap(), state)
}

#[test]
fn login_then_quit_caches_the_login() {
    let (exit, output, state) = drive(StateBuilder::new().build(), &["admin", "admin", "q"]);
    assert_eq!(exit, Exit::Quit);
    assert!(output.contains("RHUI Username: "));
    assert!(output.contains("rhui (home) => "));
    assert!(state.logged_in);
}

#[test]
fn wrong_password_exits_with_failure() {
    let (exit, output, state) = drive(StateBuilder::new().build(), &["admin", "nope"]);
    assert_eq!(exit, Exit::LoginFailed);
    assert_eq!(exit.code(), 1);
    assert!(output.contains("Invalid login"));
    assert!(!state.logged_in);
}

#[test]
fn hotkeys_move_between_screens() {
    let state = StateBuilder::new().logged_in().build();
    let (exit, output, state) = drive(state, &["l", "b", "sm", "logout"]);
    assert_eq!(exit, Exit::LoggedOut);
    assert!(output.contains("rhui (loadbalancers) => "));
    assert!(output.contains("rhui (subscriptions) => "));
    assert!(!state.logged_in);
}

#[test]
fn end_of_input_leaves_quietly() {
    let state = StateBuilder::new().logged_in().build();
    let (exit, _, _) = drive(state, &["r"]);
    assert_eq!(exit, Exit::InputClosed);
}

#[test]
fn checklist_toggles_and_confirms() {
    let state = StateBuilder::new()
        .logged_in()
        .with_custom_repo("custom-1")
        .with_custom_repo("custom-2")
        .build();
    let (_, output, state) = drive(state, &["s", "sr", "2", "c", "y", "q"]);
    assert!(output.contains("  -  2 : custom-2"));
    assert!(output.contains("  x  2 : custom-2"));
    assert!(output.contains("The following repositories will be scheduled for synchronization:"));
    assert!(state.sync_status.contains_key("custom-2"));
    assert!(!state.sync_status.contains_key("custom-1"));
}

#[test]
fn declined_summary_changes_nothing() {
    let state = StateBuilder::new().logged_in().with_custom_repo("custom-1").build();
    let (_, output, state) = drive(state, &["r", "d", "1", "c", "n", "q"]);
    assert!(output.contains("The following repositories will be deleted:"));
    assert_eq!(state.repos.len(), 1);
}

#[test]
fn duplicate_repository_ids_are_refused() {
    let state = StateBuilder::new().logged_in().with_custom_repo("custom-1").build();
    let (_, output, _) = drive(state, &["r", "c", "custom-1", "q"]);
    assert!(output.contains("A repository with ID \"custom-1\" already exists"));
}

#[test]
fn missing_ssh_keys_are_refused() {
    let state = StateBuilder::new().logged_in().build();
    let (_, output, state) = drive(
        state,
        &["c", "a", "cds01.example.com", "ec2-user", "/nonexistent/key", "q"],
    );
    assert!(output.contains("Cannot find file"));
    assert!(state.cds.is_empty());
}

#[test]
fn status_report_advances_the_sync_script() {
    let state = StateBuilder::new()
        .logged_in()
        .with_custom_repo("custom-1")
        .with_sync_script("custom-1", &["Running", "Running", "Error"])
        .build();
    let (_, output, _) = drive(state, &["s", "sr", "1", "c", "y", "dr", "dr", "dr", "q"]);
    let report = output.rsplit("Repository Synchronization Status").next().unwrap();
    assert!(report.contains("Error"));
}

#[test]
fn password_change_logs_out() {
    let state = StateBuilder::new().logged_in().build();
    let (exit, output, state) = drive(state, &["u", "p", "", "n3w", "n3w"]);
    assert_eq!(exit, Exit::LoggedOut);
    assert!(output.contains("Password successfully updated"));
    assert_eq!(state.password, "n3w");
    assert!(!state.logged_in);
}
