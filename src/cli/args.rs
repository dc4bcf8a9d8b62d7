//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--debug`: Enable debug output
//! - `--quiet` / `-q`: Minimal output

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Reviewgate - gate pull requests on configurable reviewer rules
#[derive(Parser, Debug)]
#[command(name = "reviewgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check whether the matched rule's review requirement is fulfilled
    Check(GateArgs),

    /// Request the matched rule's reviewers on the pull request
    ///
    /// Overwrites any reviewers currently requested on the PR.
    Assign(GateArgs),
}

/// Arguments shared by the check and assign commands.
#[derive(Args, Debug)]
pub struct GateArgs {
    /// Repository owner (user or organization)
    #[arg(long)]
    pub owner: String,

    /// Repository name
    #[arg(long)]
    pub repo: String,

    /// Pull request number
    #[arg(long = "pr")]
    pub number: u64,

    /// Path to the reviewer rules file
    #[arg(long, default_value = "reviewers.yml")]
    pub config: PathBuf,

    /// GitHub API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// GitHub API base URL (for GitHub Enterprise)
    #[arg(long)]
    pub api_base: Option<String>,
}
