//! Reviewgate - a pull-request gatekeeper
//!
//! Reviewgate selects a rule from a YAML configuration based on a pull
//! request's branch name or title and checks whether the rule's reviewer
//! requirement is satisfied by the PR's current approvals. It can also set
//! the matched rule's reviewers on the PR instead of evaluating.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to core)
//! - [`core`] - Domain types: principals, rules, config, resolution,
//!   fulfillment
//! - [`forge`] - Abstraction for the remote host (GitHub v1)
//! - [`ui`] - Output utilities
//!
//! # Evaluation pipeline
//!
//! 1. Load and validate the rules file (all config errors surface before
//!    any network call)
//! 2. Fetch the pull request and its reviews
//! 3. Match a rule on the condition value, falling back to the default rule
//! 4. Resolve the matched rule's team principals into member logins
//! 5. Evaluate the rule's quantifier against the approving reviewers

pub mod cli;
pub mod core;
pub mod forge;
pub mod ui;
