//! core::fulfillment
//!
//! Fulfillment evaluation: decides whether a rule's review requirement is
//! met by the approvals on a pull request.
//!
//! # Design
//!
//! `evaluate` is a pure function of the rule and the ordered list of
//! approving logins. Satisfaction state is a per-call map indexed by
//! principal position; nothing is mutated on shared objects, so the same
//! rule can be evaluated any number of times with identical results.
//!
//! A negative outcome is a value, not an error: the caller receives
//! [`Fulfillment`] with `satisfied == false` and the list of unmet
//! principals. Only the CLI layer turns that into a process failure.
//!
//! # Quantifier semantics
//!
//! - `ALL` and `AMOUNT` check directly named principals by login equality
//!   and never expand teams. Whether `ALL` ought to require full team
//!   approval is deliberately left as-is; `all_ignores_team_principals`
//!   pins the current behavior.
//! - `ONE_OF_EACH` walks approvals in submission order. A login is first
//!   matched against unsatisfied user principals (and consumed by the first
//!   hit); otherwise it marks every unsatisfied team it belongs to.

use super::principal::Principal;
use super::rules::{Quantifier, Rule};

/// Outcome of evaluating a rule against a set of approvals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fulfillment {
    /// Whether the rule's requirement is met
    pub satisfied: bool,
    /// Specs of principals still lacking an approval (empty when satisfied)
    pub unmet: Vec<String>,
}

impl Fulfillment {
    fn met() -> Self {
        Fulfillment {
            satisfied: true,
            unmet: Vec::new(),
        }
    }
}

/// Evaluate a rule against approving logins in submission order.
///
/// Teams referenced by ONE_OF_EACH rules must already be resolved (see
/// [`crate::core::resolve::resolve_teams`]); an unresolved team simply has
/// no members and can never be satisfied.
pub fn evaluate(rule: &Rule, approved_logins: &[String]) -> Fulfillment {
    match rule.quantifier {
        Quantifier::All => evaluate_all(rule, approved_logins),
        Quantifier::Amount => evaluate_amount(rule, approved_logins),
        Quantifier::OneOfEach => evaluate_one_of_each(rule, approved_logins),
    }
}

/// ALL: every directly named user must appear among the approvals.
fn evaluate_all(rule: &Rule, approved_logins: &[String]) -> Fulfillment {
    let unmet: Vec<String> = rule
        .reviewers
        .iter()
        .filter(|p| p.is_user())
        .filter(|p| !approved_logins.iter().any(|login| login == p.name()))
        .map(|p| p.spec())
        .collect();
    Fulfillment {
        satisfied: unmet.is_empty(),
        unmet,
    }
}

/// AMOUNT: at least `required_count` named reviewers approved.
///
/// An absent count makes the rule vacuously satisfied. Rule validation
/// rejects such configs up front, but the behavior is kept for rules built
/// programmatically.
fn evaluate_amount(rule: &Rule, approved_logins: &[String]) -> Fulfillment {
    let Some(required) = rule.required_count else {
        return Fulfillment::met();
    };
    let approvals = rule
        .reviewers
        .iter()
        .filter(|p| approved_logins.iter().any(|login| login == p.name()))
        .count();
    if approvals as u64 >= u64::from(required) {
        Fulfillment::met()
    } else {
        Fulfillment {
            satisfied: false,
            unmet: rule
                .reviewers
                .iter()
                .filter(|p| !approved_logins.iter().any(|login| login == p.name()))
                .map(|p| p.spec())
                .collect(),
        }
    }
}

/// ONE_OF_EACH: each principal needs one representative approval.
fn evaluate_one_of_each(rule: &Rule, approved_logins: &[String]) -> Fulfillment {
    // Per-call satisfaction map, parallel to rule.reviewers.
    let mut satisfied = vec![false; rule.reviewers.len()];

    for login in approved_logins {
        // User principals take precedence; the first unsatisfied match
        // consumes the login.
        let user_hit = rule
            .reviewers
            .iter()
            .enumerate()
            .find(|(i, p)| !satisfied[*i] && p.is_user() && p.name() == login);
        if let Some((i, _)) = user_hit {
            satisfied[i] = true;
        } else {
            // Mark every unsatisfied team the login belongs to. Overlapping
            // teams are all credited; ambiguity is resolved by marking all.
            for (i, principal) in rule.reviewers.iter().enumerate() {
                if satisfied[i] {
                    continue;
                }
                if let Principal::Team { members, .. } = principal {
                    if members.iter().any(|m| m == login) {
                        satisfied[i] = true;
                    }
                }
            }
        }

        if satisfied.iter().all(|&s| s) {
            return Fulfillment::met();
        }
    }

    Fulfillment {
        satisfied: false,
        unmet: rule
            .reviewers
            .iter()
            .zip(&satisfied)
            .filter(|(_, &s)| !s)
            .map(|(p, _)| p.spec())
            .collect(),
    }
}
