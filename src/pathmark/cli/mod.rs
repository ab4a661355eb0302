//! # CLI Layer
//!
//! The only place that knows about stdout, stderr and exit codes.
//!
//! - `setup`: clap argument definitions
//! - `logging`: tracing subscriber on stderr, level chosen by `-v`
//! - `commands`: context wiring and per-command handlers
//! - `print`: colored terminal output for `CmdResult` data

mod commands;
mod logging;
mod print;
pub mod setup;

pub use commands::run;
