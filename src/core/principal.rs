//! core::principal
//!
//! Reviewer principal parsing and types.
//!
//! # Design
//!
//! A principal is a reviewer specification written as `<type>:<name>`, where
//! the type is `user` for an individual or `team` for a group. Principals are
//! parsed once when the rules file is loaded and are immutable afterwards;
//! team membership is filled in by [`crate::core::resolve`] in an explicit
//! resolution step before evaluation, never during parsing.
//!
//! Per-evaluation satisfaction state lives inside the evaluator
//! ([`crate::core::fulfillment`]), not on the principal, so principals can be
//! shared freely across evaluations.
//!
//! # Example
//!
//! ```
//! use reviewgate::core::principal::Principal;
//!
//! let user = Principal::parse("user:alice").unwrap();
//! assert_eq!(user.name(), "alice");
//! assert!(user.is_user());
//!
//! let team = Principal::parse("team:platform").unwrap();
//! assert!(team.is_team());
//! ```

use thiserror::Error;

/// Errors from parsing a reviewer specification.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrincipalError {
    /// The spec string is not of the form `<type>:<name>`.
    #[error("invalid reviewer spec '{0}': expected '<type>:<name>'")]
    Malformed(String),

    /// The type segment is not one of the supported principal kinds.
    #[error("invalid reviewer type '{kind}': expected one of 'user', 'team'")]
    UnknownKind {
        /// The offending spec string
        spec: String,
        /// The unrecognized type segment
        kind: String,
    },
}

/// A reviewer principal: an individual user or a team.
///
/// Teams carry their resolved member logins. Parsing always produces an
/// empty member list; membership comes from the forge via
/// [`crate::core::resolve::resolve_teams`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// An individual user, matched against review author logins.
    User {
        /// The user's login
        name: String,
    },
    /// A team, satisfied when a member's approval is seen (ONE_OF_EACH only).
    Team {
        /// The team slug
        name: String,
        /// Resolved member logins (empty until resolved)
        members: Vec<String>,
    },
}

impl Principal {
    /// Parse a `<type>:<name>` reviewer spec.
    ///
    /// Splits on the first `:` only; the remainder becomes the name
    /// verbatim, so names containing `:` are preserved.
    ///
    /// # Errors
    ///
    /// - `Malformed` if there is no `:` or the name segment is empty
    /// - `UnknownKind` if the type segment is not `user` or `team`
    pub fn parse(spec: &str) -> Result<Self, PrincipalError> {
        let Some((kind, name)) = spec.split_once(':') else {
            return Err(PrincipalError::Malformed(spec.to_string()));
        };
        if name.is_empty() {
            return Err(PrincipalError::Malformed(spec.to_string()));
        }
        match kind {
            "user" => Ok(Principal::User {
                name: name.to_string(),
            }),
            "team" => Ok(Principal::Team {
                name: name.to_string(),
                members: Vec::new(),
            }),
            other => Err(PrincipalError::UnknownKind {
                spec: spec.to_string(),
                kind: other.to_string(),
            }),
        }
    }

    /// The principal's name (login for users, slug for teams).
    pub fn name(&self) -> &str {
        match self {
            Principal::User { name } => name,
            Principal::Team { name, .. } => name,
        }
    }

    /// Whether this principal is an individual user.
    pub fn is_user(&self) -> bool {
        matches!(self, Principal::User { .. })
    }

    /// Whether this principal is a team.
    pub fn is_team(&self) -> bool {
        matches!(self, Principal::Team { .. })
    }

    /// The canonical `<type>:<name>` spec string.
    pub fn spec(&self) -> String {
        match self {
            Principal::User { name } => format!("user:{}", name),
            Principal::Team { name, .. } => format!("team:{}", name),
        }
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.spec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_user() {
        let p = Principal::parse("user:alice").unwrap();
        assert_eq!(
            p,
            Principal::User {
                name: "alice".to_string()
            }
        );
        assert_eq!(p.name(), "alice");
        assert!(p.is_user());
        assert!(!p.is_team());
    }

    #[test]
    fn parses_team_with_empty_members() {
        let p = Principal::parse("team:platform").unwrap();
        assert_eq!(
            p,
            Principal::Team {
                name: "platform".to_string(),
                members: Vec::new()
            }
        );
        assert!(p.is_team());
    }

    #[test]
    fn missing_separator_is_malformed() {
        let err = Principal::parse("alice").unwrap_err();
        assert_eq!(err, PrincipalError::Malformed("alice".to_string()));
    }

    #[test]
    fn empty_name_is_malformed() {
        let err = Principal::parse("user:").unwrap_err();
        assert_eq!(err, PrincipalError::Malformed("user:".to_string()));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = Principal::parse("group:core").unwrap_err();
        assert_eq!(
            err,
            PrincipalError::UnknownKind {
                spec: "group:core".to_string(),
                kind: "group".to_string(),
            }
        );
    }

    #[test]
    fn splits_on_first_colon_only() {
        // Names may contain ':'; the remainder is kept verbatim.
        let p = Principal::parse("user:a:b").unwrap();
        assert_eq!(p.name(), "a:b");
    }

    #[test]
    fn spec_round_trips() {
        for spec in ["user:alice", "team:platform"] {
            let p = Principal::parse(spec).unwrap();
            assert_eq!(p.spec(), spec);
            assert_eq!(format!("{}", p), spec);
        }
    }
}
