//! cli::commands
//!
//! Command handlers. Each command module exposes an async entry point taking
//! the parsed arguments plus the output verbosity, and a `run_*` function
//! over `&dyn Forge` that integration tests drive with the mock forge.

pub mod assign;
pub mod check;

pub use assign::{assign, run_assign};
pub use check::{check, run_check};
