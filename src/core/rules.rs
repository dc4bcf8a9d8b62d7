//! core::rules
//!
//! Rule and rule-set types with pattern-based matching.
//!
//! # Matching
//!
//! Rules are kept in insertion order, which is significant: the first rule
//! whose pattern matches the condition value wins. Rules without a pattern
//! are skipped during matching; they exist only to serve as the default.
//! When no pattern matches, the first rule marked `default` is used. A
//! pattern that fails to compile aborts matching immediately rather than
//! being skipped: it is a configuration error.
//!
//! # Example
//!
//! ```
//! use reviewgate::core::principal::Principal;
//! use reviewgate::core::rules::{Quantifier, Rule, RuleSet};
//!
//! let rules = RuleSet::new(vec![
//!     Rule::new(
//!         Some("^feat/".to_string()),
//!         Quantifier::All,
//!         None,
//!         vec![Principal::parse("user:alice").unwrap()],
//!         false,
//!     )
//!     .unwrap(),
//! ]);
//!
//! let matched = rules.find_matching("feat/login").unwrap();
//! assert_eq!(matched.quantifier, Quantifier::All);
//! ```

use regex::Regex;
use thiserror::Error;

use super::principal::Principal;

/// Errors from rule construction and matching.
#[derive(Debug, Error)]
pub enum RuleError {
    /// A rule's pattern is not a valid regular expression.
    #[error("invalid pattern '{pattern}'")]
    InvalidPattern {
        /// The pattern source that failed to compile
        pattern: String,
        /// The underlying regex compile error
        #[source]
        source: regex::Error,
    },

    /// No pattern matched the condition and no default rule exists.
    #[error("no rule matched and no default rule exists")]
    NoMatchingRule,

    /// An AMOUNT rule is missing its positive `amount`.
    #[error("rule type AMOUNT requires a positive 'amount'")]
    MissingAmount,

    /// The rule type string is not recognized.
    #[error("unknown rule type '{0}': expected one of ALL, AMOUNT, ONE_OF_EACH")]
    UnknownRuleType(String),
}

/// The approval policy of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantifier {
    /// Every directly named user must have approved.
    All,
    /// At least `required_count` of the named reviewers must have approved.
    Amount,
    /// Each principal needs one representative approval (teams expanded).
    OneOfEach,
}

impl std::str::FromStr for Quantifier {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(Quantifier::All),
            "AMOUNT" => Ok(Quantifier::Amount),
            "ONE_OF_EACH" => Ok(Quantifier::OneOfEach),
            other => Err(RuleError::UnknownRuleType(other.to_string())),
        }
    }
}

impl std::fmt::Display for Quantifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Quantifier::All => write!(f, "ALL"),
            Quantifier::Amount => write!(f, "AMOUNT"),
            Quantifier::OneOfEach => write!(f, "ONE_OF_EACH"),
        }
    }
}

/// A single gate rule binding a pattern to an approval requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// Pattern matched against the condition value; `None` on default-only rules
    pub pattern: Option<String>,
    /// Approval policy
    pub quantifier: Quantifier,
    /// Approvals required for AMOUNT rules
    pub required_count: Option<u32>,
    /// Reviewer principals, in configuration order
    pub reviewers: Vec<Principal>,
    /// Whether this rule is the fallback when no pattern matches
    pub is_default: bool,
}

impl Rule {
    /// Create a rule, validating the quantifier's requirements.
    ///
    /// # Errors
    ///
    /// Returns `MissingAmount` for AMOUNT rules without a positive count.
    pub fn new(
        pattern: Option<String>,
        quantifier: Quantifier,
        required_count: Option<u32>,
        reviewers: Vec<Principal>,
        is_default: bool,
    ) -> Result<Self, RuleError> {
        if quantifier == Quantifier::Amount && !matches!(required_count, Some(n) if n > 0) {
            return Err(RuleError::MissingAmount);
        }
        Ok(Rule {
            pattern,
            quantifier,
            required_count,
            reviewers,
            is_default,
        })
    }

    /// Logins of the directly named user principals, in order.
    pub fn user_logins(&self) -> Vec<String> {
        self.reviewers
            .iter()
            .filter(|p| p.is_user())
            .map(|p| p.name().to_string())
            .collect()
    }

    /// Slugs of the team principals, in order.
    pub fn team_slugs(&self) -> Vec<String> {
        self.reviewers
            .iter()
            .filter(|p| p.is_team())
            .map(|p| p.name().to_string())
            .collect()
    }
}

/// Ordered collection of rules with first-match lookup.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Create a rule set preserving the given insertion order.
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleSet { rules }
    }

    /// Number of rules in the set.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set contains no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    /// The first rule marked as default, if any.
    pub fn default_rule(&self) -> Option<&Rule> {
        self.rules.iter().find(|r| r.is_default)
    }

    /// Find the rule applicable to `condition`.
    ///
    /// Tests each rule's pattern in insertion order and returns the first
    /// match. Rules without a pattern are skipped. Falls back to the default
    /// rule when nothing matches.
    ///
    /// # Errors
    ///
    /// - `InvalidPattern` if any tested pattern fails to compile
    /// - `NoMatchingRule` if nothing matches and no default rule exists
    pub fn find_matching(&self, condition: &str) -> Result<&Rule, RuleError> {
        for rule in &self.rules {
            let Some(pattern) = rule.pattern.as_deref().filter(|p| !p.is_empty()) else {
                continue;
            };
            let regex = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
                pattern: pattern.to_string(),
                source: e,
            })?;
            if regex.is_match(condition) {
                return Ok(rule);
            }
        }
        self.default_rule().ok_or(RuleError::NoMatchingRule)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str) -> Principal {
        Principal::parse(&format!("user:{}", name)).unwrap()
    }

    fn rule(pattern: Option<&str>, is_default: bool) -> Rule {
        Rule::new(
            pattern.map(str::to_string),
            Quantifier::All,
            None,
            vec![user("alice")],
            is_default,
        )
        .unwrap()
    }

    #[test]
    fn quantifier_parses_known_types() {
        assert_eq!("ALL".parse::<Quantifier>().unwrap(), Quantifier::All);
        assert_eq!("AMOUNT".parse::<Quantifier>().unwrap(), Quantifier::Amount);
        assert_eq!(
            "ONE_OF_EACH".parse::<Quantifier>().unwrap(),
            Quantifier::OneOfEach
        );
    }

    #[test]
    fn quantifier_rejects_unknown_type() {
        let err = "SOME".parse::<Quantifier>().unwrap_err();
        assert!(matches!(err, RuleError::UnknownRuleType(s) if s == "SOME"));
    }

    #[test]
    fn quantifier_display_round_trips() {
        for q in [Quantifier::All, Quantifier::Amount, Quantifier::OneOfEach] {
            assert_eq!(q.to_string().parse::<Quantifier>().unwrap(), q);
        }
    }

    #[test]
    fn amount_rule_requires_positive_count() {
        let err = Rule::new(None, Quantifier::Amount, None, vec![], true).unwrap_err();
        assert!(matches!(err, RuleError::MissingAmount));

        let err = Rule::new(None, Quantifier::Amount, Some(0), vec![], true).unwrap_err();
        assert!(matches!(err, RuleError::MissingAmount));

        assert!(Rule::new(None, Quantifier::Amount, Some(1), vec![], true).is_ok());
    }

    #[test]
    fn first_matching_rule_wins() {
        let rules = RuleSet::new(vec![
            rule(Some("^feat/"), false),
            rule(Some("feat"), false),
        ]);
        let matched = rules.find_matching("feat/login").unwrap();
        assert_eq!(matched.pattern.as_deref(), Some("^feat/"));
    }

    #[test]
    fn falls_back_to_default_regardless_of_position() {
        let rules = RuleSet::new(vec![rule(None, true), rule(Some("^fix/"), false)]);
        let matched = rules.find_matching("docs/readme").unwrap();
        assert!(matched.is_default);
    }

    #[test]
    fn patternless_rules_are_skipped_during_matching() {
        let rules = RuleSet::new(vec![rule(None, true), rule(Some(".*"), false)]);
        // The catch-all pattern matches even though the default comes first.
        let matched = rules.find_matching("anything").unwrap();
        assert!(!matched.is_default);
    }

    #[test]
    fn no_match_and_no_default_fails() {
        let rules = RuleSet::new(vec![rule(Some("^fix/"), false)]);
        let err = rules.find_matching("docs/readme").unwrap_err();
        assert!(matches!(err, RuleError::NoMatchingRule));
    }

    #[test]
    fn invalid_pattern_aborts_matching() {
        let rules = RuleSet::new(vec![
            rule(Some("(unclosed"), false),
            rule(Some(".*"), false),
        ]);
        let err = rules.find_matching("anything").unwrap_err();
        assert!(matches!(err, RuleError::InvalidPattern { pattern, .. } if pattern == "(unclosed"));
    }

    #[test]
    fn first_default_wins_when_several_are_marked() {
        let mut first = rule(None, true);
        first.quantifier = Quantifier::OneOfEach;
        let second = rule(None, true);
        let rules = RuleSet::new(vec![first, second]);
        assert_eq!(
            rules.default_rule().unwrap().quantifier,
            Quantifier::OneOfEach
        );
    }

    #[test]
    fn user_and_team_split() {
        let r = Rule::new(
            None,
            Quantifier::OneOfEach,
            None,
            vec![
                Principal::parse("user:alice").unwrap(),
                Principal::parse("team:platform").unwrap(),
                Principal::parse("user:bob").unwrap(),
            ],
            true,
        )
        .unwrap();
        assert_eq!(r.user_logins(), vec!["alice", "bob"]);
        assert_eq!(r.team_slugs(), vec!["platform"]);
    }
}
