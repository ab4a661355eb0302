//! # Pathmark CLI
//!
//! The binary is thin: argument parsing, logging setup, dispatch and printing
//! live in `cli/`, and this file only invokes `cli::run()` and turns an error
//! into a message and exit code 1.
//!
//! ```text
//! pathmark                          # tree (default)
//! pathmark node add Work            # new top-level node
//! pathmark node add Q3 --parent Work
//! pathmark item drop Work ~/q3.xlsx ~/q3-notes.md
//! pathmark item set Work#1 comment="final numbers"
//! pathmark item ls Work
//! pathmark search q3
//! pathmark doctor --check
//! ```
//!
//! The data directory is `--home`, else `$PATHMARK_HOME`, else the platform
//! data directory. Mutating commands save the document before exiting.

use colored::Colorize;

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", format!("Error: {}", e).red());
        std::process::exit(1);
    }
}
