//! Repository management (`repo` screen).

use crate::console::{self, prompts, selection};
use crate::error::{ErrorCode, HarnessError, HarnessResult};
use crate::model::{ContainerSpec, CustomRepo, RepoListing, Screen};
use crate::session::text;
use crate::session::Session;
use std::collections::BTreeMap;
use tracing::{info, warn};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum IdReply {
    Exists,
    AskName,
}

#[derive(Clone, Copy)]
enum Section {
    Custom,
    RedHat,
    Container,
}

/// Every repository on the repo screen, by section.
pub fn list(session: &mut Session) -> HarnessResult<RepoListing> {
    console::on_screen(session, Screen::Repo, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::LIST_KEY)?;
        let listing = console::expect_prompt(session, timeout)?;
        Ok(parse_repo_listing(&listing))
    })
}

/// Parse the section headings and two-space indented names of a listing.
#[must_use]
pub fn parse_repo_listing(listing: &str) -> RepoListing {
    let mut repos = RepoListing::default();
    let mut section = None;
    for line in text::lines(listing) {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("-=") || trimmed.starts_with("---") {
            continue;
        }
        if !line.starts_with(' ') {
            section = match trimmed {
                prompts::CUSTOM_SECTION => Some(Section::Custom),
                prompts::RED_HAT_SECTION => Some(Section::RedHat),
                prompts::CONTAINER_SECTION => Some(Section::Container),
                _ => None,
            };
            continue;
        }
        let name = trimmed.to_string();
        match section {
            Some(Section::Custom) => repos.custom.push(name),
            Some(Section::RedHat) => repos.red_hat.push(name),
            Some(Section::Container) => repos.container.push(name),
            None => {}
        }
    }
    repos
}

/// Create a custom repository, verifying the summary before confirming.
pub fn add_custom(session: &mut Session, repo: &CustomRepo) -> HarnessResult<()> {
    info!(session = %session.id(), id = %repo.id, "adding custom repository");
    console::on_screen(session, Screen::Repo, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::REPO_ADD_CUSTOM_KEY)?;
        session.expect(prompts::REPO_ID_RE, timeout)?;
        session.enter(&repo.id)?;
        let (reply, _) = session.expect_list(
            &[
                (prompts::REPO_EXISTS_RE, IdReply::Exists),
                (prompts::REPO_NAME_RE, IdReply::AskName),
            ],
            timeout,
        )?;
        if reply == IdReply::Exists {
            console::expect_prompt(session, timeout)?;
            warn!(session = %session.id(), id = %repo.id, "repository already exists");
            return Err(HarnessError::new(
                ErrorCode::AlreadyExists,
                format!("repository {} already exists", repo.id),
                serde_json::json!({ "id": repo.id }),
            ));
        }

        session.enter(repo.display_name.as_deref().unwrap_or(""))?;
        session.expect(prompts::REPO_PATH_RE, timeout)?;
        session.enter(repo.path.as_deref().unwrap_or(""))?;
        session.expect(prompts::REPO_ENTITLEMENT_RE, timeout)?;
        selection::answer(session, repo.entitlement)?;
        session.expect(prompts::REPO_GPG_RE, timeout)?;
        selection::answer(session, repo.gpg_check)?;

        let expected = [
            format!("ID: {}", repo.id),
            format!("Name: {}", repo.display_name()),
            format!("Path: {}", repo.path()),
            format!("Entitlement Required: {}", yes_no(repo.entitlement)),
            format!("GPG Check: {}", yes_no(repo.gpg_check)),
        ];
        selection::proceed_with_check(
            session,
            prompts::REPO_CREATE_CAPTION,
            &expected,
            &[] as &[&str],
        )?;
        session.expect(prompts::REPO_CREATED_RE, timeout)?;
        console::expect_prompt(session, timeout)?;
        Ok(())
    })
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

/// Delete repositories by display name.
pub fn delete<S: AsRef<str>>(session: &mut Session, names: &[S]) -> HarnessResult<()> {
    info!(
        session = %session.id(),
        repos = ?names.iter().map(AsRef::as_ref).collect::<Vec<&str>>(),
        "deleting repositories"
    );
    console::on_screen(session, Screen::Repo, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::DELETE_KEY)?;
        selection::select_items(session, names)?;
        selection::proceed_with_check(
            session,
            prompts::REPO_DELETE_CAPTION,
            names,
            &[] as &[&str],
        )?;
        console::expect_prompt(session, timeout)?;
        Ok(())
    })
}

/// Details of one repository as `Key: value` pairs.
pub fn info(session: &mut Session, name: &str) -> HarnessResult<BTreeMap<String, String>> {
    console::on_screen(session, Screen::Repo, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::REPO_INFO_KEY)?;
        selection::select_one(session, name)?;
        let details = console::expect_prompt(session, timeout)?;
        Ok(parse_details(&details))
    })
}

/// `Key: value` lines; anything else is ignored.
#[must_use]
pub fn parse_details(details: &str) -> BTreeMap<String, String> {
    text::lines(details)
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let key = key.trim();
            if key.is_empty() || key.contains("  ") || key.starts_with('-') {
                return None;
            }
            Some((key.to_string(), value.trim().to_string()))
        })
        .collect()
}

/// Mirror a container image from the configured registry.
pub fn add_container(session: &mut Session, container: &ContainerSpec) -> HarnessResult<()> {
    info!(session = %session.id(), name = %container.upstream_name, "adding container");
    console::on_screen(session, Screen::Repo, |session| {
        let timeout = session.options().default_timeout;
        session.enter(prompts::REPO_ADD_CONTAINER_KEY)?;
        session.expect(prompts::CONTAINER_NAME_RE, timeout)?;
        session.enter(&container.upstream_name)?;
        session.expect(prompts::CONTAINER_ID_RE, timeout)?;
        session.enter(container.id.as_deref().unwrap_or(""))?;
        session.expect(prompts::CONTAINER_DISPLAY_RE, timeout)?;
        session.enter(container.display_name.as_deref().unwrap_or(""))?;

        let expected = [
            format!("Container Id: {}", container.effective_id()),
            format!("Display Name: {}", container.effective_display_name()),
            format!("Upstream Container Name: {}", container.upstream_name),
        ];
        selection::proceed_with_check(
            session,
            prompts::CONTAINER_CAPTION,
            &expected,
            &[] as &[&str],
        )?;
        session.expect(prompts::CONTAINER_ADDED_RE, timeout)?;
        console::expect_prompt(session, timeout)?;
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_is_split_by_section() {
        let listing = "\
-= Repositories =-\r
\r
Custom Repositories\r
  custom-1\r
  custom-2\r
\r
Red Hat Repositories\r
  Red Hat Enterprise Linux 8 for x86_64 - AppStream from RHUI (RPMs) (8)\r
\r
Container Repositories\r
  rhel8_support-tools\r
\r
------------------------------------------------------------------------------\r
";
        let repos = parse_repo_listing(listing);
        assert_eq!(repos.custom, ["custom-1", "custom-2"]);
        assert_eq!(repos.red_hat.len(), 1);
        assert_eq!(repos.container, ["rhel8_support-tools"]);
        assert_eq!(repos.all().len(), 4);
    }

    #[test]
    fn details_become_a_map() {
        let details = "Name:           custom-1\r\nRelative Path:  protected/custom-1\r\nnoise\r\n";
        let map = parse_details(details);
        assert_eq!(map.get("Name").map(String::as_str), Some("custom-1"));
        assert_eq!(map.get("Relative Path").map(String::as_str), Some("protected/custom-1"));
        assert_eq!(map.len(), 2);
    }
}
