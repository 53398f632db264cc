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

//! End-to-end runs of the harness against the fake console in a real PTY.

use std::time::Duration;

use rhui_harness::cli;
use rhui_harness::console;
use rhui_harness::model::{
    ClientRpmRequest, ConsoleState, CustomRepo, EntitlementCertRequest, NodeKind, NodeRecord,
    Screen, WaitPolicy,
};
use rhui_harness::screens::{client, entitlements, instance, repo, sync, users};
use rhui_harness::{ErrorCode, Session};
use rhui_harness_fixtures::{FakeRhua, FakeState, StateBuilder};

const FAKE_CONSOLE: &str = env!("CARGO_BIN_EXE_rhui-fake-console");

fn connect(rhua: &FakeRhua, password: Option<&str>) -> Session {
    let mut config = rhua.config(FAKE_CONSOLE);
    config.console.password = password.map(ToString::to_string);
    Session::connect(&config).expect("connect to the fake RHUA")
}

fn logged_in(prefix: &str, state: &FakeState) -> (FakeRhua, Session) {
    let rhua = FakeRhua::new(prefix, state);
    let mut session = connect(&rhua, Some("admin"));
    console::initial_run(&mut session, "admin", Some("admin")).unwrap();
    (rhua, session)
}

fn quick_policy() -> WaitPolicy {
    WaitPolicy {
        poll_interval: Duration::from_millis(10),
        max_attempts: 10,
    }
}

#[test]
fn login_and_logout() {
    let (rhua, mut session) = logged_in("pty-login", &StateBuilder::new().build());
    assert_eq!(session.state(), ConsoleState::At(Screen::Home));
    assert!(rhua.state().logged_in);

    console::screen(&mut session, Screen::Repo).unwrap();
    console::home(&mut session).unwrap();
    console::logout(&mut session, None).unwrap();
    assert_eq!(session.state(), ConsoleState::LoggedOut);
    assert!(!rhua.state().logged_in);
    session.close().unwrap();
}

#[test]
fn rejected_password_falls_back_to_the_answers_file() {
    let rhua = FakeRhua::new("pty-fallback", &StateBuilder::new().with_password("s3cret").build());
    let mut session = connect(&rhua, Some("wrong"));
    console::initial_run(&mut session, "admin", Some("wrong")).unwrap();
    assert_eq!(session.state(), ConsoleState::At(Screen::Home));
    session.close().unwrap();
}

#[test]
fn cds_nodes_are_added_listed_and_deleted() {
    let (rhua, mut session) = logged_in("pty-cds", &StateBuilder::new().build());
    let node = NodeRecord::new("cds01.example.com", "ec2-user", rhua.key());

    instance::add(&mut session, NodeKind::Cds, &node, false).unwrap();
    assert_eq!(instance::list(&mut session, NodeKind::Cds).unwrap(), [node.clone()]);

    let err = instance::add(&mut session, NodeKind::Cds, &node, false).unwrap_err();
    assert!(err.is(ErrorCode::AlreadyExists));
    assert_eq!(session.state(), ConsoleState::At(Screen::Home));

    let upper = NodeRecord::new("CDS01.example.com", "ec2-user", rhua.key());
    let err = instance::add(&mut session, NodeKind::Cds, &upper, false).unwrap_err();
    assert!(err.is(ErrorCode::AlreadyExists));
    assert_eq!(rhua.state().cds.len(), 1);

    let err = instance::delete(&mut session, NodeKind::Cds, &["cds01.example.com"], false)
        .unwrap_err();
    assert!(err.is(ErrorCode::DeletionRefused));
    let both_spellings = ["cds01.example.com", "CDS01.example.com"];
    instance::delete(&mut session, NodeKind::Cds, &both_spellings, true).unwrap();
    assert!(rhua.state().cds.is_empty());
    session.close().unwrap();
}

#[test]
fn re_adding_with_update_reinstalls_in_place() {
    let (rhua, mut session) = logged_in("pty-update", &StateBuilder::new().build());
    let node = NodeRecord::new("cds01.example.com", "ec2-user", rhua.key());
    instance::add(&mut session, NodeKind::Cds, &node, false).unwrap();

    let reinstalled = NodeRecord::new("cds01.example.com", "cloud-user", rhua.key());
    instance::add(&mut session, NodeKind::Cds, &reinstalled, true).unwrap();
    assert_eq!(session.state(), ConsoleState::At(Screen::Home));
    assert_eq!(instance::list(&mut session, NodeKind::Cds).unwrap(), [reinstalled]);
    session.close().unwrap();
}

#[test]
fn missing_keys_are_reported() {
    let (_rhua, mut session) = logged_in("pty-key", &StateBuilder::new().build());
    let node = NodeRecord::new("lb01.example.com", "ec2-user", "/nonexistent/id_rsa");
    let err = instance::add(&mut session, NodeKind::HaProxy, &node, false).unwrap_err();
    assert!(err.is(ErrorCode::InvalidSshKeyPath));
    assert_eq!(session.state(), ConsoleState::At(Screen::Home));
    session.close().unwrap();
}

#[test]
fn custom_repository_syncs_to_success() {
    let (_rhua, mut session) = logged_in("pty-sync", &StateBuilder::new().build());
    repo::add_custom(&mut session, &CustomRepo::new("custom-1")).unwrap();
    assert_eq!(repo::list(&mut session).unwrap().custom, ["custom-1"]);

    let details = repo::info(&mut session, "custom-1").unwrap();
    assert_eq!(details.get("ID").map(String::as_str), Some("custom-1"));

    sync::sync_repos(&mut session, &["custom-1"]).unwrap();
    sync::wait_till_repo_synced(&mut session, "custom-1", quick_policy()).unwrap();
    session.close().unwrap();
}

#[test]
fn failing_sync_is_reported() {
    let state = StateBuilder::new()
        .with_custom_repo("custom-1")
        .with_sync_script("custom-1", &["Running", "Error"])
        .build();
    let (_rhua, mut session) = logged_in("pty-sync-error", &state);
    sync::sync_repos(&mut session, &["custom-1"]).unwrap();
    let err = sync::wait_till_repo_synced(&mut session, "custom-1", quick_policy()).unwrap_err();
    assert!(err.is(ErrorCode::SyncFailed));
    session.close().unwrap();
}

#[test]
fn certificates_upload_and_issue() {
    let (rhua, mut session) = logged_in(
        "pty-certs",
        &StateBuilder::new().with_custom_repo("custom-1").build(),
    );
    let content = rhua.dir.join("rhui.crt");
    std::fs::write(&content, "RHEL 8 (RPMs)\nRHEL 9 (RPMs)\n").unwrap();
    let names = entitlements::upload_certificate(&mut session, &content.display().to_string())
        .unwrap();
    assert_eq!(names, ["RHEL 8 (RPMs)", "RHEL 9 (RPMs)"]);
    assert_eq!(entitlements::list(&mut session).unwrap(), names);

    let err = entitlements::upload_certificate(&mut session, "/nonexistent.crt").unwrap_err();
    assert!(err.is(ErrorCode::MissingCertificate));

    let dir = rhua.dir.join("client").display().to_string();
    let issued = client::generate_entitlement_cert(
        &mut session,
        &EntitlementCertRequest {
            repos: vec!["custom-1".to_string()],
            name: "test".to_string(),
            days: 30,
            dir: dir.clone(),
        },
    )
    .unwrap();
    assert!(issued.cert_path.is_file());
    assert!(issued.key_path.is_file());

    let rpm = client::create_client_rpm(
        &mut session,
        &ClientRpmRequest {
            dir,
            rpm_name: "test-rpm".to_string(),
            version: None,
            cert_path: issued.cert_path.display().to_string(),
            key_path: issued.key_path.display().to_string(),
        },
    )
    .unwrap();
    assert!(rpm.is_file());
    assert!(rpm.display().to_string().ends_with("test-rpm-2.0-1.noarch.rpm"));
    session.close().unwrap();
}

#[test]
fn password_change_needs_a_new_login() {
    let (rhua, mut session) = logged_in("pty-password", &StateBuilder::new().build());
    users::change_password(&mut session, "admin", "n3w").unwrap();
    assert_eq!(session.state(), ConsoleState::LoggedOut);
    assert_eq!(rhua.state().password, "n3w");

    console::initial_run(&mut session, "admin", Some("n3w")).unwrap();
    assert_eq!(session.state(), ConsoleState::At(Screen::Home));
    session.close().unwrap();
}

#[test]
fn noninteractive_commands_share_the_state() {
    let rhua = FakeRhua::new(
        "pty-cli",
        &StateBuilder::new().with_custom_repo("custom-1").build(),
    );
    let mut session = connect(&rhua, None);
    let node = NodeRecord::new("lb01.example.com", "ec2-user", rhua.key());

    cli::node_add(&mut session, NodeKind::HaProxy, &node, false).unwrap();
    let err = cli::node_add(&mut session, NodeKind::HaProxy, &node, false).unwrap_err();
    assert!(err.is(ErrorCode::AlreadyExists));
    assert_eq!(cli::nodes_list(&mut session, NodeKind::HaProxy).unwrap(), [node]);

    let err = cli::node_delete(&mut session, NodeKind::HaProxy, &["lb01.example.com"], false)
        .unwrap_err();
    assert!(err.is(ErrorCode::DeletionRefused));

    let repos = cli::repo_list(&mut session).unwrap();
    assert_eq!(repos.len(), 1);
    cli::repo_sync(&mut session, "custom-1").unwrap();
    assert!(rhua.state().sync_status.contains_key("custom-1"));

    assert!(cli::status(&mut session).unwrap().healthy);
    session.close().unwrap();
}
