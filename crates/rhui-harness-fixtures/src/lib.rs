//! Test fixtures for rhui-harness: a fake RHUI console and its helpers.
//!
//! The `rhui-fake-console` binary imitates `rhui-manager` closely enough for
//! the harness to drive it through a real PTY. It keeps everything it knows
//! in a JSON [`FakeState`] file, so tests can seed it up front and inspect it
//! afterwards.
//!
//! - [`FakeConsole`] - the interactive menus over any line-based IO
//! - [`noninteractive::run`] - the `--noninteractive` subcommands
//! - [`StateBuilder`] - fluent construction of seeded states
//! - [`FakeRhua`] - temp dir, answers file, SSH key and harness config
//!
//! # Example
//!
//! ```ignore
//! use rhui_harness::{console, Session};
//! use rhui_harness_fixtures::{FakeRhua, StateBuilder};
//!
//! let rhua = FakeRhua::new("login", &StateBuilder::new().build());
//! let config = rhua.config(env!("CARGO_BIN_EXE_rhui-fake-console"));
//! let mut session = Session::connect(&config)?;
//! console::initial_run(&mut session, "admin", Some("admin"))?;
//! ```

// Test fixtures crate - relaxed lints for test utilities
#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::missing_panics_doc)]

pub mod builders;
pub mod helpers;
pub mod listing;
pub mod menu;
pub mod noninteractive;
pub mod state;

pub use builders::StateBuilder;
pub use helpers::{temp_dir, write_state, FakeRhua, SHELL_PROMPT, STATE_ENV};
pub use listing::{node_listing, read_certificate, Certificate};
pub use menu::{Exit, FakeConsole};
pub use state::{FakeRepo, FakeState, RepoKind};

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

/// Split a leading `--state <path>` off the arguments.
pub fn split_state_arg(args: &[String]) -> (Option<PathBuf>, &[String]) {
    match args {
        [flag, path, rest @ ..] if flag == "--state" => (Some(PathBuf::from(path)), rest),
        rest => (None, rest),
    }
}

/// Entry point shared by the binary and in-process tests; returns the exit
/// status.
pub fn run_console<R: BufRead, W: Write>(
    args: &[String],
    state_path: &Path,
    input: R,
    mut out: W,
) -> io::Result<i32> {
    let mut state = FakeState::load(state_path)?;
    match args {
        [flag, rest @ ..] if flag == rhui_harness::cli::NONINTERACTIVE_FLAG => {
            noninteractive::run(rest, &mut state, state_path, &mut out)
        }
        [] => {
            let exit = FakeConsole::new(state, state_path, input, out).run()?;
            Ok(exit.code())
        }
        _ => {
            writeln!(out, "unexpected arguments: {}", args.join(" "))?;
            Ok(2)
        }
    }
}
