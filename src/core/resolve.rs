//! core::resolve
//!
//! Team membership resolution for a matched rule.
//!
//! # Design
//!
//! Resolution is an explicit step between rule matching and fulfillment
//! evaluation: every team principal of the matched rule has its member list
//! fetched from the forge exactly once per evaluation run. Nothing is cached
//! across runs, so membership is never stale within a run. A failed lookup
//! aborts the evaluation with the forge error preserved as the cause.

use thiserror::Error;

use super::principal::Principal;
use super::rules::Rule;
use crate::forge::{Forge, ForgeError};

/// Errors from group resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// A team's member list could not be retrieved.
    #[error("the members of team '{team}' could not be retrieved")]
    Team {
        /// The team slug that failed to resolve
        team: String,
        /// The underlying forge error
        #[source]
        source: ForgeError,
    },
}

/// Resolve the team principals of a rule into member logins.
///
/// Returns a copy of the rule with every team's `members` populated. User
/// principals pass through untouched. Each team is queried once; the input
/// rule is not modified, so a shared rule set stays reusable across runs.
///
/// # Errors
///
/// Returns `ResolveError::Team` for the first team whose lookup fails.
pub async fn resolve_teams(forge: &dyn Forge, rule: &Rule) -> Result<Rule, ResolveError> {
    let mut resolved = rule.clone();
    for principal in &mut resolved.reviewers {
        if let Principal::Team { name, members } = principal {
            *members = forge
                .list_team_members(name)
                .await
                .map_err(|e| ResolveError::Team {
                    team: name.clone(),
                    source: e,
                })?;
        }
    }
    Ok(resolved)
}
