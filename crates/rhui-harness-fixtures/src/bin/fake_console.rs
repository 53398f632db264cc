//! Fake `rhui-manager`: the interactive menus, or `--noninteractive <cmd>`.
//!
//! State lives in the JSON file named by `--state <path>` or
//! `RHUI_FAKE_STATE`, defaulting to `rhui-fake-state.json` in the temp dir.

// Test fixtures require special allowances - they are not production code
#![allow(clippy::print_stderr)]
#![allow(clippy::exit)]

use rhui_harness_fixtures::{run_console, split_state_arg, STATE_ENV};
use std::io;
use std::path::PathBuf;

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (state_arg, rest) = split_state_arg(&args);
    let state_path = state_arg
        .or_else(|| std::env::var_os(STATE_ENV).map(PathBuf::from))
        .unwrap_or_else(|| std::env::temp_dir().join("rhui-fake-state.json"));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let code = match run_console(rest, &state_path, stdin.lock(), stdout.lock()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("rhui-fake-console: {err}");
            1
        }
    };
    std::process::exit(code);
}
