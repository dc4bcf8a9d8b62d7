//! core::config::schema
//!
//! Raw YAML schema for the gate configuration file.
//!
//! # Example
//!
//! ```yaml
//! check_on: branch_name
//! rules:
//!   - regex: "^feat/"
//!     type: ALL
//!     reviewers: ["user:alice", "user:bob"]
//!   - type: ONE_OF_EACH
//!     reviewers: ["team:core"]
//!     default: true
//! ```
//!
//! # Validation
//!
//! These structs mirror the file as written; validation and conversion into
//! domain types happen in [`super::Config::parse`] after deserialization so
//! that every error carries this crate's taxonomy instead of a serde path.

use serde::{Deserialize, Serialize};

/// The PR attribute matched against rule patterns.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConditionType {
    /// Match rules against the head branch name (the default).
    #[default]
    BranchName,
    /// Match rules against the PR title.
    Title,
}

impl ConditionType {
    /// Select the condition value from a pull request.
    pub fn select<'a>(&self, pr: &'a crate::forge::PullRequest) -> &'a str {
        match self {
            ConditionType::BranchName => &pr.branch_name,
            ConditionType::Title => &pr.title,
        }
    }
}

impl std::fmt::Display for ConditionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConditionType::BranchName => write!(f, "branch_name"),
            ConditionType::Title => write!(f, "title"),
        }
    }
}

/// The gate configuration file as deserialized from YAML.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GateConfig {
    /// Which PR attribute to match against; `branch_name` when omitted.
    /// Kept as a raw string so invalid values produce this crate's
    /// validation error rather than a serde parse error.
    #[serde(default)]
    pub check_on: Option<String>,

    /// The rules, in matching precedence order.
    #[serde(default)]
    pub rules: Option<Vec<RuleConfig>>,
}

/// A single rule as written in the configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RuleConfig {
    /// Pattern matched against the condition value; omit on the default rule
    #[serde(default)]
    pub regex: Option<String>,

    /// Rule type: `ALL`, `AMOUNT`, or `ONE_OF_EACH`
    #[serde(rename = "type")]
    pub rule_type: String,

    /// Approvals required; meaningful only for `AMOUNT`
    #[serde(default)]
    pub amount: Option<u32>,

    /// Reviewer specs (`user:<login>` or `team:<slug>`)
    #[serde(default)]
    pub reviewers: Vec<String>,

    /// Whether this rule is the fallback when no pattern matches
    #[serde(default)]
    pub default: bool,
}
