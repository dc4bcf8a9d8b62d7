//! core::config
//!
//! Gate configuration loading and validation.
//!
//! # Overview
//!
//! The configuration is a YAML file with two keys: `check_on` selects which
//! PR attribute is matched against rule patterns, and `rules` lists the gate
//! rules in precedence order (see [`schema`] for the raw shape).
//!
//! Loading is strict: the file is deserialized, validated, and converted to
//! domain types ([`crate::core::rules::RuleSet`]) in one pass. Every
//! configuration problem surfaces before any network call is made.
//!
//! # Example
//!
//! ```
//! use reviewgate::core::config::Config;
//!
//! let config = Config::parse(r#"
//! check_on: branch_name
//! rules:
//!   - regex: "^feat/"
//!     type: ALL
//!     reviewers: ["user:alice"]
//!   - type: ONE_OF_EACH
//!     reviewers: ["team:core"]
//!     default: true
//! "#).unwrap();
//!
//! assert_eq!(config.rules.len(), 2);
//! ```

pub mod schema;

pub use schema::{ConditionType, GateConfig, RuleConfig};

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::principal::{Principal, PrincipalError};
use crate::core::rules::{Quantifier, Rule, RuleError, RuleSet};

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config file {path}")]
    Io {
        /// Path that failed to read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML.
    #[error("cannot parse config file")]
    Parse(#[from] serde_yaml::Error),

    /// `check_on` is present but not an allowed value.
    #[error("invalid check_on value '{0}': use one of 'branch_name', 'title'")]
    InvalidCheckOn(String),

    /// `rules` is missing.
    #[error("'rules' property is either not defined or not a list")]
    MissingRules,

    /// A rule failed validation.
    #[error("invalid rule #{index}")]
    Rule {
        /// Position of the rule in the file (1-based)
        index: usize,
        /// The underlying rule error
        #[source]
        source: RuleError,
    },

    /// A reviewer spec in a rule failed to parse.
    #[error("invalid reviewer in rule #{index}")]
    Reviewer {
        /// Position of the rule in the file (1-based)
        index: usize,
        /// The underlying principal error
        #[source]
        source: PrincipalError,
    },
}

/// Validated gate configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// The PR attribute matched against rule patterns
    pub condition: ConditionType,
    /// The rules, in matching precedence order
    pub rules: RuleSet,
}

impl Config {
    /// Load and validate the configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, and any of the
    /// parse/validation errors from [`Config::parse`].
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&raw)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// - `Parse` if the YAML does not deserialize
    /// - `InvalidCheckOn` for an unknown `check_on` value
    /// - `MissingRules` if `rules` is absent
    /// - `Rule` / `Reviewer` for per-rule validation failures
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let raw: GateConfig = serde_yaml::from_str(yaml)?;

        let condition = match raw.check_on.as_deref() {
            None => ConditionType::BranchName,
            Some("branch_name") => ConditionType::BranchName,
            Some("title") => ConditionType::Title,
            Some(other) => return Err(ConfigError::InvalidCheckOn(other.to_string())),
        };

        let Some(raw_rules) = raw.rules else {
            return Err(ConfigError::MissingRules);
        };

        let mut rules = Vec::with_capacity(raw_rules.len());
        for (i, raw_rule) in raw_rules.into_iter().enumerate() {
            let index = i + 1;
            rules.push(build_rule(raw_rule, index)?);
        }

        Ok(Config {
            condition,
            rules: RuleSet::new(rules),
        })
    }
}

/// Convert one raw rule into a validated domain rule.
fn build_rule(raw: RuleConfig, index: usize) -> Result<Rule, ConfigError> {
    let quantifier: Quantifier = raw
        .rule_type
        .parse()
        .map_err(|e| ConfigError::Rule { index, source: e })?;

    let mut reviewers = Vec::with_capacity(raw.reviewers.len());
    for spec in &raw.reviewers {
        reviewers.push(
            Principal::parse(spec).map_err(|e| ConfigError::Reviewer { index, source: e })?,
        );
    }

    Rule::new(raw.regex, quantifier, raw.amount, reviewers, raw.default)
        .map_err(|e| ConfigError::Rule { index, source: e })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_on_defaults_to_branch_name() {
        let config = Config::parse("rules: []").unwrap();
        assert_eq!(config.condition, ConditionType::BranchName);
    }

    #[test]
    fn check_on_title_is_accepted() {
        let config = Config::parse("check_on: title\nrules: []").unwrap();
        assert_eq!(config.condition, ConditionType::Title);
    }

    #[test]
    fn invalid_check_on_is_rejected() {
        let err = Config::parse("check_on: body\nrules: []").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidCheckOn(v) if v == "body"));
    }

    #[test]
    fn missing_rules_is_rejected() {
        let err = Config::parse("check_on: title").unwrap_err();
        assert!(matches!(err, ConfigError::MissingRules));
    }

    #[test]
    fn rules_as_scalar_is_a_parse_error() {
        let err = Config::parse("rules: nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn unknown_rule_type_is_reported_with_index() {
        let yaml = r#"
rules:
  - type: ALL
    reviewers: ["user:alice"]
  - type: SOME
    reviewers: ["user:bob"]
"#;
        let err = Config::parse(yaml).unwrap_err();
        match err {
            ConfigError::Rule { index, source } => {
                assert_eq!(index, 2);
                assert!(matches!(source, RuleError::UnknownRuleType(t) if t == "SOME"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn amount_without_count_is_rejected() {
        let yaml = r#"
rules:
  - type: AMOUNT
    reviewers: ["user:alice"]
"#;
        let err = Config::parse(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Rule {
                index: 1,
                source: RuleError::MissingAmount
            }
        ));
    }

    #[test]
    fn malformed_reviewer_is_reported_with_index() {
        let yaml = r#"
rules:
  - type: ALL
    reviewers: ["alice"]
"#;
        let err = Config::parse(yaml).unwrap_err();
        match err {
            ConfigError::Reviewer { index, source } => {
                assert_eq!(index, 1);
                assert_eq!(source, PrincipalError::Malformed("alice".to_string()));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn builds_domain_rules_in_order() {
        let yaml = r#"
check_on: branch_name
rules:
  - regex: "^feat/"
    type: AMOUNT
    amount: 2
    reviewers: ["user:alice", "user:bob", "user:carol"]
  - type: ONE_OF_EACH
    reviewers: ["user:dave", "team:core"]
    default: true
"#;
        let config = Config::parse(yaml).unwrap();
        let rules: Vec<_> = config.rules.iter().collect();
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0].quantifier, Quantifier::Amount);
        assert_eq!(rules[0].required_count, Some(2));
        assert_eq!(rules[1].quantifier, Quantifier::OneOfEach);
        assert!(rules[1].is_default);
        assert_eq!(rules[1].team_slugs(), vec!["core"]);
    }

    #[test]
    fn load_reports_missing_file_path() {
        let err = Config::load(Path::new("/nonexistent/reviewers.yml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { path, .. } if path.ends_with("reviewers.yml")));
    }
}
