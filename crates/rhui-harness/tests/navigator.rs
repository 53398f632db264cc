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

use rhui_harness::console;
use rhui_harness::model::{ConsoleState, Screen};
use rhui_harness::transport::ScriptedTransport;
use rhui_harness::{ErrorCode, Session, SessionOptions};

const ANSWERS_CAT: &str = "cat -- '/root/.rhui/answers.yaml'";

fn options() -> SessionOptions {
    SessionOptions {
        default_timeout: Duration::from_millis(2000),
        login_timeout: Duration::from_millis(2000),
        read_step: Duration::from_millis(5),
        ..SessionOptions::default()
    }
}

#[test]
fn screens_need_a_running_console() {
    let transport = ScriptedTransport::new("rhua# ");
    let handle = transport.handle();
    let mut session = Session::new(transport, options());

    let err = console::screen(&mut session, Screen::Repo).unwrap_err();
    assert!(err.is(ErrorCode::InvalidState));
    assert!(console::home(&mut session).unwrap_err().is(ErrorCode::InvalidState));
    assert!(handle.sent().is_empty());
}

#[test]
fn cached_login_lands_on_home() {
    let transport = ScriptedTransport::new("rhua# ").reply("rhui-manager", "\r\nrhui (home) => ");
    let mut session = Session::new(transport, options());

    console::initial_run(&mut session, "admin", Some("secret")).unwrap();
    assert_eq!(session.state(), ConsoleState::At(Screen::Home));

    let err = console::initial_run(&mut session, "admin", None).unwrap_err();
    assert!(err.is(ErrorCode::InvalidState));
}

#[test]
fn screen_changes_are_tracked() {
    let transport = ScriptedTransport::new("rhua# ")
        .reply("rhui-manager", "\r\nrhui (home) => ")
        .reply("r", "\r\n-= Repository Management =-\r\nrhui (repo) => ")
        .reply("b", "\r\nrhui (home) => ")
        .reply("q", "\r\nrhua# ");
    let handle = transport.handle();
    let mut session = Session::new(transport, options());

    console::initial_run(&mut session, "admin", None).unwrap();
    console::screen(&mut session, Screen::Repo).unwrap();
    assert_eq!(session.state(), ConsoleState::At(Screen::Repo));
    // Already there: nothing is typed.
    console::screen(&mut session, Screen::Repo).unwrap();
    let err = console::screen(&mut session, Screen::Sync).unwrap_err();
    assert!(err.is(ErrorCode::InvalidState));

    console::home(&mut session).unwrap();
    console::quit(&mut session, None, Duration::from_millis(2000)).unwrap();
    assert_eq!(session.state(), ConsoleState::LoggedOut);
    assert_eq!(handle.sent(), vec!["rhui-manager", "r", "b", "q"]);
    assert!(handle.is_complete());
}

#[test]
fn rejected_password_falls_back_to_the_answers_file() {
    let transport = ScriptedTransport::new("rhua# ")
        .reply("rhui-manager", "\r\nRHUI Username: ")
        .reply("admin", "RHUI Password: ")
        .reply("wrong", "\r\nInvalid login, please check your username and password\r\nrhua# ")
        .reply("rhui-manager", "\r\nRHUI Username: ")
        .reply("admin", "RHUI Password: ")
        .reply("s3cret", "\r\nrhui (home) => ")
        .exec_reply(ANSWERS_CAT, 0, "rhua:\n  rhui_manager_password: s3cret\n");
    let handle = transport.handle();
    let mut session = Session::new(transport, options());

    console::initial_run(&mut session, "admin", Some("wrong")).unwrap();

    assert_eq!(session.state(), ConsoleState::At(Screen::Home));
    assert_eq!(handle.executed(), vec![ANSWERS_CAT]);
    assert_eq!(
        handle.sent(),
        vec!["rhui-manager", "admin", "wrong", "rhui-manager", "admin", "s3cret"]
    );
}

#[test]
fn both_passwords_rejected_is_an_authentication_failure() {
    let transport = ScriptedTransport::new("rhua# ")
        .reply("rhui-manager", "\r\nRHUI Username: ")
        .reply("admin", "RHUI Password: ")
        .reply("s3cret", "\r\nInvalid login\r\nrhua# ")
        .exec_reply(ANSWERS_CAT, 0, "rhui_manager_password: s3cret\n");
    let mut session = Session::new(transport, options());

    let err = console::initial_run(&mut session, "admin", None).unwrap_err();

    assert!(err.is(ErrorCode::AuthenticationFailed));
    assert_eq!(session.state(), ConsoleState::LoggedOut);
}

#[test]
fn logout_waits_for_the_departure_marker() {
    let transport = ScriptedTransport::new("rhua# ")
        .reply("rhui-manager", "\r\nrhui (home) => ")
        .reply("logout", "\r\nrhua# ");
    let handle = transport.handle();
    let mut session = Session::new(transport, options());
    console::initial_run(&mut session, "admin", None).unwrap();
    handle.push_output("Password successfully updated\r\nrhui (home) => ");

    console::logout(&mut session, Some("successfully updated")).unwrap();

    assert_eq!(session.state(), ConsoleState::LoggedOut);
    assert!(handle.is_complete());
}
