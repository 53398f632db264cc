//! The interactive menus of the fake console.
//!
//! Prompts, checklists and summaries use the same wording as the real
//! `rhui-manager`, closely enough for every screen driver of the harness to
//! run against it. Every state change is written back to the state file
//! before the next prompt.

use crate::state::{FakeRepo, FakeState, RepoKind};
use rhui_harness::model::{NodeKind, NodeRecord, Screen};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const RULE: &str =
    "------------------------------------------------------------------------------";

/// How a console run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Exit {
    /// `q`: the login stays cached.
    Quit,
    /// `logout` or a password change.
    LoggedOut,
    /// Wrong credentials at the login prompt.
    LoginFailed,
    /// Standard input reached end of file.
    InputClosed,
}

impl Exit {
    /// Process exit status for this ending.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::LoginFailed => 1,
            Self::Quit | Self::LoggedOut | Self::InputClosed => 0,
        }
    }
}

enum Flow {
    Stay,
    Leave(Exit),
}

/// One run of the fake console over arbitrary line-based IO.
pub struct FakeConsole<R, W> {
    state: FakeState,
    state_path: PathBuf,
    input: R,
    out: W,
    screen: Screen,
}

impl<R: BufRead, W: Write> FakeConsole<R, W> {
    pub fn new(state: FakeState, state_path: impl Into<PathBuf>, input: R, out: W) -> Self {
        Self {
            state,
            state_path: state_path.into(),
            input,
            out,
            screen: Screen::Home,
        }
    }

    /// State as the run left it.
    pub fn state(&self) -> &FakeState {
        &self.state
    }

    /// Log in unless a login is cached, then serve menus until the user
    /// leaves or input ends.
    pub fn run(&mut self) -> io::Result<Exit> {
        match self.serve() {
            Err(err) if err.kind() == io::ErrorKind::UnexpectedEof => Ok(Exit::InputClosed),
            other => other,
        }
    }

    fn serve(&mut self) -> io::Result<Exit> {
        if !self.state.logged_in && !self.login()? {
            return Ok(Exit::LoginFailed);
        }
        self.screen = Screen::Home;
        self.show_menu()?;
        loop {
            self.prompt()?;
            let command = self.read_line()?;
            if let Flow::Leave(exit) = self.dispatch(command.trim())? {
                return Ok(exit);
            }
        }
    }

    fn login(&mut self) -> io::Result<bool> {
        self.say("\n-= Red Hat Update Infrastructure Management Tool =-\n\n")?;
        let username = self.ask("RHUI Username: ")?;
        let password = self.ask("RHUI Password: ")?;
        if username.trim() == self.state.username && password == self.state.password {
            self.state.logged_in = true;
            self.save()?;
            return Ok(true);
        }
        self.say("\nInvalid login, please check the authentication credentials and try again.\n")?;
        Ok(false)
    }

    fn dispatch(&mut self, command: &str) -> io::Result<Flow> {
        match command {
            "" => {}
            "q" => return Ok(Flow::Leave(Exit::Quit)),
            "logout" => {
                self.state.logged_in = false;
                self.save()?;
                return Ok(Flow::Leave(Exit::LoggedOut));
            }
            "b" => {
                self.screen = Screen::Home;
                self.show_menu()?;
            }
            _ if self.screen == Screen::Home => {
                let target = Screen::SUB_SCREENS
                    .into_iter()
                    .find(|screen| screen.hotkey() == Some(command));
                match target {
                    Some(screen) => {
                        self.screen = screen;
                        self.show_menu()?;
                    }
                    None => self.invalid(command)?,
                }
            }
            _ => return self.screen_command(command),
        }
        Ok(Flow::Stay)
    }

    fn screen_command(&mut self, command: &str) -> io::Result<Flow> {
        match (self.screen, command) {
            (Screen::Cds, _) => self.instance_command(NodeKind::Cds, command)?,
            (Screen::LoadBalancers, _) => self.instance_command(NodeKind::HaProxy, command)?,
            (Screen::Repo, "l") => self.list_repos()?,
            (Screen::Repo, "c") => self.create_custom_repo()?,
            (Screen::Repo, "d") => self.delete_repos()?,
            (Screen::Repo, "i") => self.repo_info()?,
            (Screen::Repo, "ad") => self.add_container()?,
            (Screen::Sync, "sr") => self.schedule_sync()?,
            (Screen::Sync, "dr") => self.sync_report()?,
            (Screen::Entitlements, "l") => self.list_entitlements()?,
            (Screen::Entitlements, "u") => self.upload_certificate()?,
            (Screen::Client, "e") => self.issue_certificate()?,
            (Screen::Client, "c") => self.build_client_rpm()?,
            (Screen::Users, "p") => return self.change_password(),
            (Screen::Subscriptions, "l") => {
                let names = self.state.subscriptions_registered.clone();
                self.list_names("Registered Red Hat Subscriptions", &names)?;
            }
            (Screen::Subscriptions, "a") => {
                let names = self.state.subscriptions_available.clone();
                self.list_names("Available Red Hat Subscriptions", &names)?;
            }
            (Screen::Subscriptions, "r") => self.change_subscriptions(true)?,
            (Screen::Subscriptions, "d") => self.change_subscriptions(false)?,
            _ => self.invalid(command)?,
        }
        Ok(Flow::Stay)
    }

    // --- instances ---

    fn instance_command(&mut self, kind: NodeKind, command: &str) -> io::Result<()> {
        match command {
            "l" => self.list_instances(kind),
            "a" => self.add_instance(kind),
            "d" => self.delete_instances(kind),
            other => self.invalid(other),
        }
    }

    fn list_instances(&mut self, kind: NodeKind) -> io::Result<()> {
        let listing = crate::node_listing(kind, self.state.nodes(kind));
        self.say(&listing)
    }

    fn add_instance(&mut self, kind: NodeKind) -> io::Result<()> {
        let label = kind.label();
        let host = self.ask(&format!("Hostname of the {label} instance to register: "))?;
        let host = host.trim().to_string();
        let existing = self.state.find_node(kind, &host);
        if existing.is_some() {
            self.say(&format!(
                "A {label} instance with that hostname exists. If you continue, it will be reinstalled.\n"
            ))?;
            if !self.confirm("Do you want to continue? (y/n) ")? {
                return Ok(());
            }
        }
        let user = self.ask(&format!(
            "Username with SSH access to {host} and sudo privileges: "
        ))?;
        let user = user.trim().to_string();
        let key = self.ask(&format!(
            "Absolute path to an SSH private key to log into {host} as {user}: "
        ))?;
        let key = key.trim().to_string();
        if !Path::new(&key).is_file() {
            return self.say("Cannot find file, please enter a valid path.\n");
        }

        let lines = [
            format!("Hostname:        {host}"),
            format!("SSH Username:    {user}"),
            format!("SSH Private Key: {key}"),
        ];
        let caption = format!("The following {label} instance will be registered:");
        if !self.summary(&caption, &lines)? {
            return Ok(());
        }
        let node = NodeRecord::new(host, user, key);
        let nodes = self.state.nodes_mut(kind);
        let verb = match existing {
            Some(index) => {
                if let Some(slot) = nodes.get_mut(index) {
                    *slot = node;
                }
                "updated"
            }
            None => {
                nodes.push(node);
                "registered"
            }
        };
        self.save()?;
        self.say(&format!(
            "Installing software...\nThe {label} instance was successfully {verb}.\n"
        ))
    }

    fn delete_instances(&mut self, kind: NodeKind) -> io::Result<()> {
        let label = kind.label();
        let hosts: Vec<String> = self
            .state
            .nodes(kind)
            .iter()
            .map(|node| node.host_name.clone())
            .collect();
        if hosts.is_empty() {
            return self.say(&format!("No {label} instances are registered.\n"));
        }
        let Some(chosen) = self.checklist(&hosts)? else {
            return Ok(());
        };
        let caption = format!("The following {label} instances will be unregistered:");
        if chosen.is_empty() || !self.summary(&caption, &chosen)? {
            return Ok(());
        }
        if chosen.len() == hosts.len() {
            self.say(&format!(
                "Warning: this is the last {label} instance registered to the RHUI.\n"
            ))?;
            if !self.confirm("Do you want to continue? (y/n) ")? {
                return Ok(());
            }
        }
        self.state
            .nodes_mut(kind)
            .retain(|node| !chosen.contains(&node.host_name));
        self.save()?;
        for host in &chosen {
            self.say(&format!("{label} instance {host} successfully unregistered.\n"))?;
        }
        Ok(())
    }

    // --- repositories ---

    fn list_repos(&mut self) -> io::Result<()> {
        let mut text = String::from("\n-= Repositories =-\n\n");
        for (heading, kind) in [
            ("Custom Repositories", RepoKind::Custom),
            ("Red Hat Repositories", RepoKind::RedHat),
            ("Container Repositories", RepoKind::Container),
        ] {
            text.push_str(heading);
            text.push('\n');
            for repo in self.state.repos_of(kind) {
                text.push_str(&format!("  {}\n", repo.name));
            }
            text.push('\n');
        }
        text.push_str(RULE);
        text.push('\n');
        self.say(&text)
    }

    fn create_custom_repo(&mut self) -> io::Result<()> {
        let id = self.ask("Unique ID for the custom repository (alphanumerics, _, and - only): ")?;
        let id = id.trim().to_string();
        if self.state.find_repo_by_id(&id).is_some() {
            return self.say(&format!("A repository with ID \"{id}\" already exists\n"));
        }
        let name = self.ask_default("Display name for the custom repository", &id)?;
        let path = self.ask_default("Unique path at which the repository will be served", &id)?;
        let entitlement = self.confirm(
            "Should the repository require an entitlement certificate to access? (y/n) ",
        )?;
        let gpg_check = self.confirm(
            "Should the repository require clients to perform a GPG check and verify packages are signed? (y/n) ",
        )?;
        let lines = [
            format!("ID:                   {id}"),
            format!("Name:                 {name}"),
            format!("Path:                 {path}"),
            format!("Entitlement Required: {}", yes_no(entitlement)),
            format!("GPG Check:            {}", yes_no(gpg_check)),
        ];
        if !self.summary("The following repository will be created:", &lines)? {
            return Ok(());
        }
        self.state.repos.push(FakeRepo {
            id,
            name: name.clone(),
            path,
            kind: RepoKind::Custom,
            entitlement,
            gpg_check,
        });
        self.save()?;
        self.say(&format!("Successfully created repository \"{name}\"\n"))
    }

    fn delete_repos(&mut self) -> io::Result<()> {
        let names = self.state.repo_names();
        if names.is_empty() {
            return self.say("No repositories are currently managed by the RHUI.\n");
        }
        let Some(chosen) = self.checklist(&names)? else {
            return Ok(());
        };
        if chosen.is_empty()
            || !self.summary("The following repositories will be deleted:", &chosen)?
        {
            return Ok(());
        }
        self.state.repos.retain(|repo| !chosen.contains(&repo.name));
        for name in &chosen {
            self.state.sync_status.remove(name);
        }
        self.save()?;
        self.say(&format!("Deleted {} repositories.\n", chosen.len()))
    }

    fn repo_info(&mut self) -> io::Result<()> {
        let names = self.state.repo_names();
        let Some(index) = self.choose(&names)? else {
            return Ok(());
        };
        let Some(repo) = self.state.repos.get(index).cloned() else {
            return Ok(());
        };
        let kind = match repo.kind {
            RepoKind::Custom => "Custom",
            RepoKind::RedHat => "Red Hat",
            RepoKind::Container => "Container",
        };
        self.say(&format!(
            "\nName:                {}\nID:                  {}\nType:                {kind}\nRelative Path:       {}\nGPG Check:           {}\n",
            repo.name,
            repo.id,
            repo.path,
            yes_no(repo.gpg_check),
        ))
    }

    fn add_container(&mut self) -> io::Result<()> {
        let upstream = self.ask("Name of the container in the registry: ")?;
        let upstream = upstream.trim().to_string();
        let id = self.ask_default("Unique ID for the container", &upstream.replace('/', "_"))?;
        let name = self.ask_default("Display name for the container", &id)?;
        let lines = [
            format!("Container Id: {id}"),
            format!("Display Name: {name}"),
            format!("Upstream Container Name: {upstream}"),
        ];
        if !self.summary("The following container will be added:", &lines)? {
            return Ok(());
        }
        self.state.repos.push(FakeRepo {
            id,
            name: name.clone(),
            path: upstream,
            kind: RepoKind::Container,
            entitlement: true,
            gpg_check: false,
        });
        self.save()?;
        self.say(&format!("Successfully added container {name}\n"))
    }

    // --- sync ---

    fn schedule_sync(&mut self) -> io::Result<()> {
        let names = self.state.repo_names();
        if names.is_empty() {
            return self.say("No repositories are currently managed by the RHUI.\n");
        }
        let Some(chosen) = self.checklist(&names)? else {
            return Ok(());
        };
        let caption = "The following repositories will be scheduled for synchronization:";
        if chosen.is_empty() || !self.summary(caption, &chosen)? {
            return Ok(());
        }
        for name in &chosen {
            self.state.schedule_sync(name);
        }
        self.save()?;
        self.say(&format!("{} repositories scheduled for synchronization.\n", chosen.len()))
    }

    fn sync_report(&mut self) -> io::Result<()> {
        let mut text = format!(
            "\n-= Repository Synchronization Status =-\n\n{:<29}{:<29}{}\n{RULE}\n",
            "Next Sync", "Last Sync", "Last Result"
        );
        for name in self.state.repo_names() {
            let status = self.state.next_sync_status(&name);
            let last = if status == "Never" { "Never" } else { "10-14-2026 12:00" };
            text.push_str(&format!("{name}\n{:<29}{:<29}{status}\n\n", "Unscheduled", last));
        }
        self.save()?;
        self.say(&text)
    }

    // --- entitlements ---

    fn list_entitlements(&mut self) -> io::Result<()> {
        let names = self.state.entitlements.clone();
        self.list_names("Red Hat Entitlements", &names)
    }

    fn upload_certificate(&mut self) -> io::Result<()> {
        let path = self.ask("Full path to the new content certificate: ")?;
        let names = match crate::read_certificate(Path::new(path.trim())) {
            crate::Certificate::Missing => {
                return self.say("Cannot find file, please enter a valid path.\n");
            }
            crate::Certificate::Incompatible => {
                return self.say("The provided certificate is not compatible with this RHUI.\n");
            }
            crate::Certificate::Entitlements(names) => names,
        };
        let caption = "The RHUI will be updated with the following certificate:";
        if !self.summary(caption, &names)? {
            return Ok(());
        }
        for name in names {
            if !self.state.entitlements.contains(&name) {
                self.state.entitlements.push(name);
            }
        }
        self.save()
    }

    // --- client ---

    fn issue_certificate(&mut self) -> io::Result<()> {
        let dir = self.ask(
            "Full path to local directory in which the client configuration files generated by this tool should be stored: ",
        )?;
        let name = self.ask("Name of the certificate. This will be used as the name of the certificate file: ")?;
        let entitled: Vec<FakeRepo> = self
            .state
            .repos
            .iter()
            .filter(|repo| repo.entitlement && repo.kind != RepoKind::Container)
            .cloned()
            .collect();
        let names: Vec<String> = entitled.iter().map(|repo| repo.name.clone()).collect();
        let Some(chosen) = self.checklist(&names)? else {
            return Ok(());
        };
        if chosen.is_empty() {
            return self.say("At least one repository must be selected.\n");
        }
        let days = self.ask_default("Number of days the certificate should be valid", "365")?;

        let mut text = String::from("Repositories to be included in the entitlement certificate:\n\n");
        for (heading, kind) in [
            ("Red Hat Repositories", RepoKind::RedHat),
            ("Custom Entitlements", RepoKind::Custom),
        ] {
            let group: Vec<&FakeRepo> = entitled
                .iter()
                .filter(|repo| repo.kind == kind && chosen.contains(&repo.name))
                .collect();
            if group.is_empty() {
                continue;
            }
            text.push_str(&format!("  {heading}\n"));
            for repo in group {
                text.push_str(&format!("    {}\n", repo.name));
            }
        }
        text.push('\n');
        self.say(&text)?;
        if !self.confirm("Proceed? (y/n) ")? {
            return Ok(());
        }

        let dir = PathBuf::from(dir.trim());
        fs::create_dir_all(&dir)?;
        let cert = dir.join(format!("{}.crt", name.trim()));
        fs::write(&cert, format!("entitlement certificate valid for {days} days\n{}\n", chosen.join("\n")))?;
        fs::write(cert.with_extension("key"), "fake private key\n")?;
        self.say(&format!("Entitlement certificate created at {}\n", cert.display()))
    }

    fn build_client_rpm(&mut self) -> io::Result<()> {
        let dir = self.ask(
            "Full path to local directory in which the client configuration files generated by this tool should be stored: ",
        )?;
        let rpm = self.ask("Name of the RPM: ")?;
        let version = self.ask_default("Version of the configuration RPM", "2.0")?;
        let cert = self.ask("Full path to the entitlement certificate: ")?;
        let key = self.ask("Full path to the private key for the above entitlement certificate: ")?;
        if !Path::new(cert.trim()).is_file() || !Path::new(key.trim()).is_file() {
            return self.say("Cannot find file, please enter a valid path.\n");
        }
        let rpm = rpm.trim();
        let out_dir = PathBuf::from(dir.trim())
            .join(format!("{rpm}-{version}"))
            .join("build/RPMS/noarch");
        fs::create_dir_all(&out_dir)?;
        let location = out_dir.join(format!("{rpm}-{version}-1.noarch.rpm"));
        fs::write(&location, "fake rpm\n")?;
        self.say(&format!(
            "Successfully created client configuration RPM.\nLocation: {}\n",
            location.display()
        ))
    }

    // --- users ---

    fn change_password(&mut self) -> io::Result<Flow> {
        let username = self.ask_default("Username", &self.state.username.clone())?;
        if username != self.state.username {
            self.say(&format!("Unknown user {username}\n"))?;
            return Ok(Flow::Stay);
        }
        let first = self.ask("New Password: ")?;
        let second = self.ask("\nRe-enter Password: ")?;
        if first != second {
            self.say("\nPasswords do not match.\n")?;
            return Ok(Flow::Stay);
        }
        self.state.password = first;
        self.state.logged_in = false;
        self.save()?;
        self.say("\nPassword successfully updated. For security reasons you have been logged out.\n")?;
        Ok(Flow::Leave(Exit::LoggedOut))
    }

    // --- subscriptions ---

    fn change_subscriptions(&mut self, register: bool) -> io::Result<()> {
        let candidates: Vec<String> = if register {
            self.state
                .subscriptions_available
                .iter()
                .filter(|name| !self.state.subscriptions_registered.contains(name))
                .cloned()
                .collect()
        } else {
            self.state.subscriptions_registered.clone()
        };
        if candidates.is_empty() {
            return self.say("No subscriptions to choose from.\n");
        }
        let Some(chosen) = self.checklist(&candidates)? else {
            return Ok(());
        };
        let caption = if register {
            "The following subscriptions will be registered:"
        } else {
            "The following subscriptions will be unregistered:"
        };
        if chosen.is_empty() || !self.summary(caption, &chosen)? {
            return Ok(());
        }
        if register {
            self.state.subscriptions_registered.extend(chosen);
        } else {
            self.state
                .subscriptions_registered
                .retain(|name| !chosen.contains(name));
        }
        self.save()
    }

    // --- building blocks ---

    /// Toggle-and-confirm checklist. `None` when aborted with `b`.
    fn checklist(&mut self, labels: &[String]) -> io::Result<Option<Vec<String>>> {
        let mut selected = vec![false; labels.len()];
        loop {
            self.render_checklist(labels, &selected)?;
            let answer = self.read_line()?;
            match answer.trim() {
                "c" => {
                    let chosen = labels
                        .iter()
                        .zip(&selected)
                        .filter(|(_, on)| **on)
                        .map(|(label, _)| label.clone())
                        .collect();
                    return Ok(Some(chosen));
                }
                "b" => return Ok(None),
                "a" => selected.iter_mut().for_each(|on| *on = true),
                "l" | "?" => {}
                other => {
                    let slot = other
                        .parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .and_then(|index| selected.get_mut(index));
                    match slot {
                        Some(on) => *on = !*on,
                        None => self.say(&format!("Invalid value: {other}\n"))?,
                    }
                }
            }
        }
    }

    fn render_checklist(&mut self, labels: &[String], selected: &[bool]) -> io::Result<()> {
        let mut text = String::from("\nSelect one or more items:\n");
        for (index, (label, on)) in labels.iter().zip(selected).enumerate() {
            let marker = if *on { 'x' } else { '-' };
            text.push_str(&format!("  {marker}  {} : {label}\n", index + 1));
        }
        text.push_str(&format!(
            "rhui: Enter value (1-{}) to toggle selection, 'c' to confirm selections, or '?' for more commands: ",
            labels.len()
        ));
        self.say(&text)
    }

    /// Single choice; returns the zero-based index, `None` when aborted.
    fn choose(&mut self, labels: &[String]) -> io::Result<Option<usize>> {
        let mut text = String::from("\nSelect one:\n");
        for (index, label) in labels.iter().enumerate() {
            text.push_str(&format!("  {} - {label}\n", index + 1));
        }
        text.push_str(&format!("Enter value (1-{}) or 'b' to abort: ", labels.len()));
        let answer = self.ask(&text)?;
        Ok(answer
            .trim()
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .filter(|index| *index < labels.len()))
    }

    /// Caption, indented lines, then `Proceed? (y/n)`.
    fn summary(&mut self, caption: &str, lines: &[String]) -> io::Result<bool> {
        let mut text = format!("{caption}\n\n");
        for line in lines {
            text.push_str(&format!("  {line}\n"));
        }
        text.push('\n');
        self.say(&text)?;
        self.confirm("Proceed? (y/n) ")
    }

    fn list_names(&mut self, title: &str, names: &[String]) -> io::Result<()> {
        let mut text = format!("\n-= {title} =-\n\n");
        for name in names {
            text.push_str(&format!("  {name}\n"));
        }
        self.say(&text)
    }

    fn show_menu(&mut self) -> io::Result<()> {
        let (title, entries) = menu(self.screen);
        let mut text = format!("\n-= {title} =-\n\n");
        for (key, description) in entries {
            text.push_str(&format!("   {key:<4}{description}\n"));
        }
        text.push('\n');
        text.push_str("   b   return to the home screen    q   exit\n");
        self.say(&text)
    }

    fn prompt(&mut self) -> io::Result<()> {
        let prompt = format!("\nrhui ({}) => ", self.screen.name());
        self.say(&prompt)
    }

    fn invalid(&mut self, command: &str) -> io::Result<()> {
        self.say(&format!("Invalid command: {command}\n"))
    }

    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self.ask(question)?.trim() == "y")
    }

    fn ask_default(&mut self, question: &str, default: &str) -> io::Result<String> {
        let answer = self.ask(&format!("{question} [{default}]: "))?;
        let answer = answer.trim();
        Ok(if answer.is_empty() { default } else { answer }.to_string())
    }

    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.say(question)?;
        self.read_line()
    }

    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    fn say(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }

    fn save(&self) -> io::Result<()> {
        self.state.save(&self.state_path)
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn menu(screen: Screen) -> (&'static str, &'static [(&'static str, &'static str)]) {
    match screen {
        Screen::Home => (
            "Red Hat Update Infrastructure Management Tool",
            &[
                ("r", "manage repositories"),
                ("c", "manage content delivery servers (CDS)"),
                ("l", "manage HAProxy load-balancer instances"),
                ("s", "synchronization status and scheduling"),
                ("e", "create entitlement certificates and client configuration RPMs"),
                ("n", "manage Red Hat entitlement certificates"),
                ("sm", "manage Red Hat subscriptions"),
                ("u", "manage RHUI users"),
            ],
        ),
        Screen::Repo => (
            "Repository Management",
            &[
                ("l", "list repositories currently managed by the RHUI"),
                ("i", "display detailed information on a repository"),
                ("c", "create a new custom repository"),
                ("ad", "add a new container"),
                ("d", "delete a repository from the RHUI"),
            ],
        ),
        Screen::Cds => (
            "Content Delivery Server (CDS) Management",
            &[
                ("l", "list all CDS instances registered to the RHUI"),
                ("a", "register (add) a new CDS instance"),
                ("d", "unregister (delete) CDS instances from the RHUI"),
            ],
        ),
        Screen::LoadBalancers => (
            "Load-balancer (HAProxy) Management",
            &[
                ("l", "list all HAProxy instances registered to the RHUI"),
                ("a", "register (add) a new HAProxy instance"),
                ("d", "unregister (delete) HAProxy instances from the RHUI"),
            ],
        ),
        Screen::Sync => (
            "Synchronization Status",
            &[
                ("dr", "display repository synchronization summary"),
                ("sr", "sync an individual repository immediately"),
            ],
        ),
        Screen::Client => (
            "Client Entitlement Management",
            &[
                ("e", "generate an entitlement certificate"),
                ("c", "create a client configuration RPM from an entitlement certificate"),
            ],
        ),
        Screen::Entitlements => (
            "Entitlements Manager",
            &[
                ("l", "list Red Hat entitled products"),
                ("u", "upload a new or updated Red Hat content certificate"),
            ],
        ),
        Screen::Users => ("User Manager", &[("p", "change a user's password")]),
        Screen::Subscriptions => (
            "Subscriptions Manager",
            &[
                ("l", "list registered Red Hat subscriptions"),
                ("a", "list available Red Hat subscriptions"),
                ("r", "register a Red Hat subscription"),
                ("d", "unregister a Red Hat subscription"),
            ],
        ),
    }
}
