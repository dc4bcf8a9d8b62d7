//! cli
//!
//! Command-line interface layer for reviewgate.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! command handlers; all decision logic lives in [`crate::core`] and all
//! network I/O behind [`crate::forge`].

pub mod args;
pub mod commands;

pub use args::{Cli, Command, GateArgs};

use anyhow::Result;

use crate::ui::output::Verbosity;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`.
pub async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let verbosity = Verbosity::from_flags(cli.quiet, cli.debug);

    match &cli.command {
        Command::Check(args) => commands::check(args, verbosity).await,
        Command::Assign(args) => commands::assign(args, verbosity).await,
    }
}
