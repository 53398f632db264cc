//! Red Hat subscriptions attached to the RHUI (`subscriptions` screen).

use crate::console::{self, prompts, selection};
use crate::error::HarnessResult;
use crate::model::Screen;
use crate::screens::indented_names;
use crate::session::Session;
use tracing::info;

/// Subscriptions the RHUI currently uses.
pub fn list_registered(session: &mut Session) -> HarnessResult<Vec<String>> {
    list_with(session, prompts::LIST_KEY)
}

/// Subscriptions the account offers but the RHUI does not use yet.
pub fn list_available(session: &mut Session) -> HarnessResult<Vec<String>> {
    list_with(session, prompts::SUBSCRIPTIONS_AVAILABLE_KEY)
}

fn list_with(session: &mut Session, key: &str) -> HarnessResult<Vec<String>> {
    console::on_screen(session, Screen::Subscriptions, |session| {
        let timeout = session.options().default_timeout;
        session.enter(key)?;
        let listing = console::expect_prompt(session, timeout)?;
        Ok(indented_names(&listing))
    })
}

/// Attach subscriptions to the RHUI.
pub fn register<S: AsRef<str>>(session: &mut Session, names: &[S]) -> HarnessResult<()> {
    change(
        session,
        prompts::SUBSCRIPTIONS_REGISTER_KEY,
        prompts::SUBSCRIPTIONS_REGISTER_CAPTION,
        names,
    )
}

/// Detach subscriptions from the RHUI.
pub fn unregister<S: AsRef<str>>(session: &mut Session, names: &[S]) -> HarnessResult<()> {
    change(
        session,
        prompts::SUBSCRIPTIONS_UNREGISTER_KEY,
        prompts::SUBSCRIPTIONS_UNREGISTER_CAPTION,
        names,
    )
}

fn change<S: AsRef<str>>(
    session: &mut Session,
    key: &str,
    caption: &str,
    names: &[S],
) -> HarnessResult<()> {
    info!(
        session = %session.id(),
        key,
        subscriptions = ?names.iter().map(AsRef::as_ref).collect::<Vec<&str>>(),
        "changing subscriptions"
    );
    console::on_screen(session, Screen::Subscriptions, |session| {
        let timeout = session.options().default_timeout;
        session.enter(key)?;
        selection::select_items(session, names)?;
        selection::proceed_with_check(session, caption, names, &[] as &[&str])?;
        console::expect_prompt(session, timeout)?;
        Ok(())
    })
}
