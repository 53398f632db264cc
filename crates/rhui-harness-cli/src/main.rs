//! rhui-harness CLI: drive a RHUA console by hand.
//!
//! Thin wrapper over the `rhui_harness` screen drivers, for checking a live
//! RHUA (or the fake console) without writing a test.

// CLI-specific lint allowances (CLI binary, not library)
#![allow(missing_docs)]
#![allow(clippy::print_stdout)] // CLI must print to stdout
#![allow(clippy::print_stderr)] // CLI must print to stderr
#![allow(clippy::exit)] // CLI uses exit codes

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use miette::{IntoDiagnostic, Result};
use rhui_harness::config::{load_config_file, HarnessConfig};
use rhui_harness::console;
use rhui_harness::model::{NodeKind, NodeRecord};
use rhui_harness::remote;
use rhui_harness::screens::{entitlements, instance, repo, sync};
use rhui_harness::{HarnessError, HarnessResult, Session};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod progress;

/// Color output mode
#[derive(Copy, Clone, Debug, Default, ValueEnum)]
enum ColorMode {
    /// Auto-detect based on terminal and `NO_COLOR` env
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

#[derive(Debug, Parser)]
#[command(name = "rhui-harness", version, about = "Drive the RHUI management console")]
struct Cli {
    /// Harness configuration (YAML or JSON)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,

    /// Raise log verbosity (-v info, -vv debug); `RUST_LOG` overrides
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Print results and errors as JSON on stdout
    #[arg(long, global = true)]
    json: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    color: ColorMode,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load and validate the configuration, then print it
    CheckConfig,
    /// Content delivery servers
    Cds {
        #[command(subcommand)]
        action: NodeAction,
    },
    /// HAProxy load-balancers
    Haproxy {
        #[command(subcommand)]
        action: NodeAction,
    },
    /// Repositories
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },
    /// Content certificates
    Entitlements {
        #[command(subcommand)]
        action: EntitlementAction,
    },
    /// Names in the RHUA's /etc/hosts matching a regex
    Hosts {
        #[arg(help = "Regular expression the names must match")]
        pattern: String,
    },
    /// Generate shell completions for bash, zsh, or fish
    Completions {
        #[arg(value_enum, help = "Shell to generate completions for")]
        shell: Shell,
    },
}

#[derive(Debug, Subcommand)]
enum NodeAction {
    /// List registered nodes
    List,
    /// Register a node
    Add {
        #[arg(long)]
        hostname: String,
        #[arg(long, help = "SSH user on the node (default: nodes.ssh_user)")]
        ssh_user: Option<String>,
        #[arg(long, help = "Key path on the RHUA (default: nodes.ssh_key_path)")]
        ssh_key_path: Option<String>,
        #[arg(long, help = "Reinstall the node if it is already registered")]
        update: bool,
    },
    /// Unregister nodes
    Delete {
        #[arg(required = true)]
        hostnames: Vec<String>,
        #[arg(long, help = "Allow removing the last node")]
        force: bool,
    },
}

#[derive(Debug, Subcommand)]
enum RepoAction {
    /// List repositories by section
    List,
    /// Schedule repositories for synchronization
    Sync {
        #[arg(required = true)]
        names: Vec<String>,
        #[arg(long, help = "Wait until every repository has synced")]
        wait: bool,
    },
    /// Last sync result of a repository
    Status { name: String },
}

#[derive(Debug, Subcommand)]
enum EntitlementAction {
    /// List entitled products
    List,
    /// Upload a content certificate already on the RHUA
    Upload { path: String },
}

/// Configure color output based on CLI flag and environment
fn use_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => {
            std::env::var("NO_COLOR").is_err()
                && supports_color::on(supports_color::Stream::Stderr).is_some()
        }
    }
}

fn configure_diagnostics(color: bool) {
    miette::set_hook(Box::new(move |_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .color(color)
                .unicode(color)
                .build(),
        )
    }))
    .ok(); // Ignore error if hook already set
}

fn init_logging(verbose: u8, color: bool) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(color)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let color = use_color(cli.color);
    configure_diagnostics(color);
    init_logging(cli.verbose, color);

    if let Commands::Completions { shell } = cli.command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let output = Output { json: cli.json };
    match run(&cli) {
        Ok(()) => Ok(()),
        Err(err) => output.fail(err),
    }
}

fn run(cli: &Cli) -> HarnessResult<()> {
    let config = match &cli.config {
        Some(path) => load_config_file(path)?,
        None => HarnessConfig::default(),
    };
    let output = Output { json: cli.json };
    match &cli.command {
        Commands::CheckConfig => {
            config.validate()?;
            let mut shown = config.clone();
            if shown.console.password.is_some() {
                shown.console.password = Some("<redacted>".to_string());
            }
            output.value(&shown, |config| {
                format!(
                    "configuration ok: {} as {}",
                    config.endpoint.describe(),
                    config.console.username
                )
            })
        }
        Commands::Cds { action } => nodes(&config, &output, NodeKind::Cds, action),
        Commands::Haproxy { action } => nodes(&config, &output, NodeKind::HaProxy, action),
        Commands::Repo { action } => repos(&config, &output, action),
        Commands::Entitlements { action } => certificates(&config, &output, action),
        Commands::Hosts { pattern } => {
            let mut session = Session::connect(&config)?;
            let names = remote::hosts_matching(&mut session, pattern)?;
            output.value(&names, |names| names.join("\n"))
        }
        Commands::Completions { .. } => Ok(()),
    }
}

/// Open a session, log in, run `op`, and log out again.
fn with_console<T>(
    config: &HarnessConfig,
    op: impl FnOnce(&mut Session) -> HarnessResult<T>,
) -> HarnessResult<T> {
    let mut session = Session::connect(config)?;
    console::initial_run(
        &mut session,
        &config.console.username,
        config.console.password.as_deref(),
    )?;
    let value = op(&mut session)?;
    console::logout(&mut session, None)?;
    Ok(value)
}

fn nodes(
    config: &HarnessConfig,
    output: &Output,
    kind: NodeKind,
    action: &NodeAction,
) -> HarnessResult<()> {
    match action {
        NodeAction::List => {
            let nodes = with_console(config, |session| instance::list(session, kind))?;
            output.value(&nodes, |nodes| {
                nodes
                    .iter()
                    .map(|node| format!("{}\t{}\t{}", node.host_name, node.ssh_user, node.ssh_key_path))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        NodeAction::Add {
            hostname,
            ssh_user,
            ssh_key_path,
            update,
        } => {
            let node = NodeRecord::new(
                hostname.as_str(),
                ssh_user.clone().unwrap_or_else(|| config.nodes.ssh_user.clone()),
                ssh_key_path
                    .clone()
                    .unwrap_or_else(|| config.nodes.ssh_key_path.clone()),
            );
            let spinner = progress::Spinner::start(
                &format!("registering {kind} {hostname}"),
                !output.json,
            );
            let result = with_console(config, |session| instance::add(session, kind, &node, *update));
            spinner.finish();
            result?;
            output.done(&format!("{kind} {hostname} registered"))
        }
        NodeAction::Delete { hostnames, force } => {
            with_console(config, |session| instance::delete(session, kind, hostnames, *force))?;
            output.done(&format!("{kind} {} unregistered", hostnames.join(", ")))
        }
    }
}

fn repos(config: &HarnessConfig, output: &Output, action: &RepoAction) -> HarnessResult<()> {
    match action {
        RepoAction::List => {
            let listing = with_console(config, repo::list)?;
            output.value(&listing, |listing| {
                let mut lines = Vec::new();
                for (title, names) in [
                    ("Custom Repositories", &listing.custom),
                    ("Red Hat Repositories", &listing.red_hat),
                    ("Container Repositories", &listing.container),
                ] {
                    lines.push(title.to_string());
                    lines.extend(names.iter().map(|name| format!("  {name}")));
                }
                lines.join("\n")
            })
        }
        RepoAction::Sync { names, wait } => {
            let policy = config.wait_policy();
            let spinner = progress::Spinner::start("synchronizing", *wait && !output.json);
            let result = with_console(config, |session| {
                sync::sync_repos(session, names)?;
                if *wait {
                    for name in names {
                        spinner.message(&format!("waiting for {name}"));
                        sync::wait_till_repo_synced(session, name, policy)?;
                    }
                }
                Ok(())
            });
            spinner.finish();
            result?;
            output.done(&format!("scheduled {}", names.join(", ")))
        }
        RepoAction::Status { name } => {
            let status = with_console(config, |session| sync::repo_status(session, name))?;
            output.value(&status, |status| format!("{name}: {status}"))
        }
    }
}

fn certificates(
    config: &HarnessConfig,
    output: &Output,
    action: &EntitlementAction,
) -> HarnessResult<()> {
    match action {
        EntitlementAction::List => {
            let names = with_console(config, entitlements::list)?;
            output.value(&names, |names| names.join("\n"))
        }
        EntitlementAction::Upload { path } => {
            let names =
                with_console(config, |session| entitlements::upload_certificate(session, path))?;
            output.value(&names, |names| names.join("\n"))
        }
    }
}

/// Renders results as text or JSON.
struct Output {
    json: bool,
}

impl Output {
    fn value<T: Serialize>(&self, value: &T, text: impl FnOnce(&T) -> String) -> HarnessResult<()> {
        if self.json {
            let payload = serde_json::to_string(value)
                .map_err(|err| HarnessError::io("failed to encode result", err))?;
            println!("{payload}");
        } else {
            let rendered = text(value);
            if !rendered.is_empty() {
                println!("{rendered}");
            }
        }
        Ok(())
    }

    fn done(&self, message: &str) -> HarnessResult<()> {
        self.value(&serde_json::json!({ "ok": true, "message": message }), |_| {
            message.to_string()
        })
    }

    fn fail(&self, err: HarnessError) -> Result<()> {
        let exit_code = err.code.exit_code();
        if self.json {
            let payload = serde_json::to_string(&serde_json::json!({
                "code": err.code.as_str(),
                "message": err.message,
                "context": err.context,
            }))
            .into_diagnostic()?;
            println!("{payload}");
        } else {
            eprintln!("{:?}", miette::Report::new(err));
        }
        std::process::exit(exit_code);
    }
}
