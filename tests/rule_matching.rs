//! Integration tests for rule matching over configurations.
//!
//! These tests exercise matching through `Config::parse`, the same path the
//! CLI uses, rather than hand-built rule sets.

use reviewgate::core::config::{Config, ConfigError};
use reviewgate::core::rules::RuleError;

#[test]
fn earlier_rule_wins_when_both_patterns_match() {
    let config = Config::parse(
        r#"
rules:
  - regex: "^feat/"
    type: ALL
    reviewers: ["user:first"]
  - regex: "feat"
    type: ALL
    reviewers: ["user:second"]
"#,
    )
    .unwrap();

    let matched = config.rules.find_matching("feat/login").unwrap();
    assert_eq!(matched.user_logins(), vec!["first"]);
}

#[test]
fn default_rule_applies_when_nothing_matches() {
    let config = Config::parse(
        r#"
rules:
  - type: ONE_OF_EACH
    reviewers: ["team:core"]
    default: true
  - regex: "^fix/"
    type: ALL
    reviewers: ["user:alice"]
"#,
    )
    .unwrap();

    // The default is first in the file but only used as a fallback.
    assert!(!config.rules.find_matching("fix/crash").unwrap().is_default);
    assert!(config.rules.find_matching("docs/readme").unwrap().is_default);
}

#[test]
fn no_match_without_default_is_an_error() {
    let config = Config::parse(
        r#"
rules:
  - regex: "^fix/"
    type: ALL
    reviewers: ["user:alice"]
"#,
    )
    .unwrap();

    let err = config.rules.find_matching("docs/readme").unwrap_err();
    assert!(matches!(err, RuleError::NoMatchingRule));
}

#[test]
fn invalid_pattern_is_fatal_not_skipped() {
    let config = Config::parse(
        r#"
rules:
  - regex: "(unclosed"
    type: ALL
    reviewers: ["user:alice"]
  - regex: ".*"
    type: ALL
    reviewers: ["user:bob"]
"#,
    )
    .unwrap();

    let err = config.rules.find_matching("anything").unwrap_err();
    assert!(matches!(err, RuleError::InvalidPattern { .. }));
}

#[test]
fn config_errors_carry_their_causes() {
    let err = Config::parse(
        r#"
rules:
  - type: AMOUNT
    reviewers: ["user:alice"]
"#,
    )
    .unwrap_err();

    // The cause chain reaches the rule error.
    let source = std::error::Error::source(&err).expect("missing cause");
    assert!(source.to_string().contains("AMOUNT"));
    assert!(matches!(err, ConfigError::Rule { index: 1, .. }));
}
