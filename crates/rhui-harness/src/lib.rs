//! rhui-harness: an expect-style harness for driving the RHUI management
//! console from integration tests.
//!
//! A [`Session`] owns a byte stream to a shell on the RHUA, accumulates its
//! output and blocks on regular expressions. On top of it the [`console`]
//! navigator tracks which screen is active, the selection protocol drives
//! checklists and confirmation summaries, and [`screens`] offers one driver
//! per console screen. [`cli`] wraps the console's non-interactive mode.
//!
//! ```no_run
//! use rhui_harness::config::HarnessConfig;
//! use rhui_harness::model::NodeKind;
//! use rhui_harness::{console, screens, Session};
//!
//! # fn main() -> rhui_harness::HarnessResult<()> {
//! let config = HarnessConfig::default();
//! let mut session = Session::connect(&config)?;
//! console::initial_run(&mut session, "admin", None)?;
//! for node in screens::instance::list(&mut session, NodeKind::Cds)? {
//!     println!("{}", node.host_name);
//! }
//! console::logout(&mut session, None)?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod model;
pub mod remote;
pub mod screens;
pub mod session;
pub mod transport;

pub use crate::error::{ErrorCode, HarnessError, HarnessResult};
pub use crate::session::{MatchResult, Session, SessionOptions};
