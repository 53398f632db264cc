//! Console account management (`users` screen).

use crate::console::{self, prompts};
use crate::error::HarnessResult;
use crate::model::{ConsoleState, Screen};
use crate::session::Session;
use tracing::info;

/// Change the password of `username`.
///
/// The console logs the session out after a successful change, so this
/// ends at the shell prompt with the session `LoggedOut`.
pub fn change_password(
    session: &mut Session,
    username: &str,
    new_password: &str,
) -> HarnessResult<()> {
    console::screen(session, Screen::Users)?;
    info!(session = %session.id(), username, "changing console password");
    let timeout = session.options().default_timeout;
    session.enter(prompts::CHANGE_PASSWORD_KEY)?;
    session.expect(prompts::USERS_USERNAME_RE, timeout)?;
    session.enter(username)?;
    session.expect(prompts::NEW_PASSWORD_RE, timeout)?;
    session.enter_secret(new_password)?;
    session.expect(prompts::REENTER_PASSWORD_RE, timeout)?;
    session.enter_secret(new_password)?;
    session.expect(prompts::PASSWORD_CHANGED_RE, timeout)?;
    let shell = session.options().shell_prompt.clone();
    session.expect(&shell, timeout)?;
    session.set_state(ConsoleState::LoggedOut);
    Ok(())
}
