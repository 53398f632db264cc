//! Screen navigation for the RHUI management console.
//!
//! The navigator keeps [`Session::state`] in step with the console: every
//! transition checks its precondition first and fails with
//! `E_INVALID_STATE` instead of typing a hotkey into the wrong menu.
//!
//! ```text
//! logged-out --initial_run--> home --screen(x)--> x --home--> home
//!      ^                                           |
//!      +-------------- quit / logout --------------+
//! ```

pub mod prompts;
pub mod selection;

pub use selection::{
    answer, check_summary, contains_token, parse_checklist, parse_choices, proceed_with_check,
    proceed_without_check, read_summary, select, select_all, select_items, select_one,
    summary_lines, summary_pattern,
};

use crate::error::{ErrorCode, HarnessError, HarnessResult};
use crate::model::{ConsoleState, Screen};
use crate::remote;
use crate::session::Session;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Launch {
    Login,
    Home,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum LoginOutcome {
    Home,
    Rejected,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AfterRejection {
    Prompted,
    Shell,
}

/// Start the console and log in, ending on the home screen.
///
/// When `password` is `None` or rejected, the installer's initial password
/// is read from the answers file and tried once more.
pub fn initial_run(
    session: &mut Session,
    username: &str,
    password: Option<&str>,
) -> HarnessResult<()> {
    require_logged_out(session, "initial_run")?;
    let timeout = session.options().login_timeout;
    let command = session.options().console_command.clone();
    info!(session = %session.id(), username, "starting console");

    session.enter(&command)?;
    let home = prompts::screen_prompt_re(Screen::Home);
    let (launch, _) = session.expect_list(
        &[(prompts::USERNAME_RE, Launch::Login), (home.as_str(), Launch::Home)],
        timeout,
    )?;
    if launch == Launch::Home {
        session.set_state(ConsoleState::At(Screen::Home));
        return Ok(());
    }

    if let Some(password) = password {
        if login(session, username, password)? == LoginOutcome::Home {
            session.set_state(ConsoleState::At(Screen::Home));
            return Ok(());
        }
        warn!(session = %session.id(), username, "login rejected, trying the initial password");
        reach_username_prompt(session, &command)?;
    }

    let answers_file = session.options().answers_file.clone();
    let initial = remote::initial_password(session, &answers_file)?;
    if login(session, username, &initial)? == LoginOutcome::Home {
        session.set_state(ConsoleState::At(Screen::Home));
        return Ok(());
    }

    abandon_login(session)?;
    Err(HarnessError::new(
        ErrorCode::AuthenticationFailed,
        "the console rejected both the configured and the initial password",
        serde_json::json!({ "username": username }),
    ))
}

/// Answer the username/password prompts; the username prompt was just seen.
fn login(session: &mut Session, username: &str, password: &str) -> HarnessResult<LoginOutcome> {
    let timeout = session.options().login_timeout;
    session.enter(username)?;
    session.expect(prompts::PASSWORD_RE, timeout)?;
    session.enter_secret(password)?;
    let home = prompts::screen_prompt_re(Screen::Home);
    let (outcome, _) = session.expect_list(
        &[
            (home.as_str(), LoginOutcome::Home),
            (prompts::INVALID_LOGIN_RE, LoginOutcome::Rejected),
        ],
        timeout,
    )?;
    Ok(outcome)
}

/// After a rejected login, get back to a username prompt whether the console
/// asked again or exited to the shell.
fn reach_username_prompt(session: &mut Session, command: &str) -> HarnessResult<()> {
    let timeout = session.options().login_timeout;
    let shell = session.options().shell_prompt.clone();
    let (next, _) = session.expect_list(
        &[
            (prompts::USERNAME_RE, AfterRejection::Prompted),
            (shell.as_str(), AfterRejection::Shell),
        ],
        timeout,
    )?;
    if next == AfterRejection::Shell {
        session.enter(command)?;
        session.expect(prompts::USERNAME_RE, timeout)?;
    }
    Ok(())
}

/// Leave a login prompt the harness has no more passwords for.
fn abandon_login(session: &mut Session) -> HarnessResult<()> {
    let timeout = session.options().default_timeout;
    let shell = session.options().shell_prompt.clone();
    let (next, _) = session.expect_list(
        &[
            (prompts::USERNAME_RE, AfterRejection::Prompted),
            (shell.as_str(), AfterRejection::Shell),
        ],
        timeout,
    )?;
    if next == AfterRejection::Prompted {
        session.send_raw(prompts::CTRL_C)?;
        session.expect(&shell, timeout)?;
    }
    session.set_state(ConsoleState::LoggedOut);
    Ok(())
}

/// Enter `target` from the home screen.
///
/// Already being on `target` is a no-op; being anywhere else but home is
/// `E_INVALID_STATE`.
pub fn screen(session: &mut Session, target: Screen) -> HarnessResult<()> {
    let state = session.state();
    if state == ConsoleState::At(target) {
        return Ok(());
    }
    if state != ConsoleState::At(Screen::Home) {
        return Err(HarnessError::invalid_state(
            format!("cannot enter the {target} screen from {state}"),
            serde_json::json!({ "current": state.to_string(), "requested": target.name() }),
        ));
    }
    let Some(hotkey) = target.hotkey() else {
        return Ok(());
    };
    info!(session = %session.id(), screen = %target, "entering screen");
    session.enter(hotkey)?;
    let timeout = session.options().default_timeout;
    session.expect(&prompts::screen_prompt_re(target), timeout)?;
    session.set_state(ConsoleState::At(target));
    Ok(())
}

/// Return to the home screen from any screen.
pub fn home(session: &mut Session) -> HarnessResult<()> {
    match session.state() {
        ConsoleState::At(Screen::Home) => Ok(()),
        ConsoleState::At(_) => {
            session.enter(prompts::HOME_KEY)?;
            let timeout = session.options().default_timeout;
            session.expect(&prompts::screen_prompt_re(Screen::Home), timeout)?;
            session.set_state(ConsoleState::At(Screen::Home));
            Ok(())
        }
        ConsoleState::LoggedOut => Err(HarnessError::invalid_state(
            "the console is not running",
            serde_json::json!({ "requested": "home" }),
        )),
    }
}

/// Quit the console, keeping the cached login.
///
/// `prefix` is a departure marker to wait for first, e.g. a message the
/// previous operation prints right before its prompt.
pub fn quit(session: &mut Session, prefix: Option<&str>, timeout: Duration) -> HarnessResult<()> {
    leave(session, prompts::QUIT_KEY, prefix, timeout)
}

/// Quit the console and discard the cached login.
pub fn logout(session: &mut Session, prefix: Option<&str>) -> HarnessResult<()> {
    let timeout = session.options().default_timeout;
    leave(session, prompts::LOGOUT_COMMAND, prefix, timeout)
}

fn leave(
    session: &mut Session,
    command: &str,
    prefix: Option<&str>,
    timeout: Duration,
) -> HarnessResult<()> {
    if session.state() == ConsoleState::LoggedOut {
        return Ok(());
    }
    if let Some(prefix) = prefix {
        session.expect(prefix, timeout)?;
    }
    info!(session = %session.id(), command, "leaving console");
    session.enter(command)?;
    let shell = session.options().shell_prompt.clone();
    session.expect(&shell, timeout)?;
    session.set_state(ConsoleState::LoggedOut);
    Ok(())
}

fn require_logged_out(session: &Session, operation: &str) -> HarnessResult<()> {
    let state = session.state();
    if state != ConsoleState::LoggedOut {
        return Err(HarnessError::invalid_state(
            format!("{operation} needs a logged-out session, the console is at {state}"),
            serde_json::json!({ "current": state.to_string(), "operation": operation }),
        ));
    }
    Ok(())
}

/// Run `step` on `target`, then go home whatever the outcome.
///
/// `step` must return with the console back at the screen prompt, including
/// when it fails with a domain error. After an expectation failure the
/// console position is unknown, so no attempt is made to go home; an error
/// from `step` wins over one from going home.
pub(crate) fn on_screen<T>(
    session: &mut Session,
    target: Screen,
    step: impl FnOnce(&mut Session) -> HarnessResult<T>,
) -> HarnessResult<T> {
    screen(session, target)?;
    match step(session) {
        Ok(value) => {
            home(session)?;
            Ok(value)
        }
        Err(err) if err.is(ErrorCode::ExpectationFailed) => Err(err),
        Err(err) => {
            if let Err(home_err) = home(session) {
                warn!(session = %session.id(), %home_err, "could not return home after a failure");
            }
            Err(err)
        }
    }
}

/// Expect the prompt of the screen the session is on.
pub(crate) fn expect_prompt(session: &mut Session, timeout: Duration) -> HarnessResult<String> {
    let current = session.state().screen().unwrap_or(Screen::Home);
    let found = session.expect(&prompts::screen_prompt_re(current), timeout)?;
    Ok(found.before)
}
