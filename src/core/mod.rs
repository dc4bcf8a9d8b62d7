//! core
//!
//! Domain logic for the review gate: principals, rules, configuration,
//! group resolution, and fulfillment evaluation.
//!
//! # Modules
//!
//! - [`principal`]: Reviewer specifications (`user:<login>` / `team:<slug>`)
//! - [`rules`]: Rules and the ordered rule set with pattern matching
//! - [`config`]: YAML gate configuration loading and validation
//! - [`resolve`]: Team membership resolution via the forge
//! - [`fulfillment`]: Pure evaluation of a rule against approvals

pub mod config;
pub mod fulfillment;
pub mod principal;
pub mod resolve;
pub mod rules;
