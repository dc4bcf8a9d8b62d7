//! forge::mock
//!
//! Mock forge implementation for deterministic testing.
//!
//! # Design
//!
//! The mock forge provides a deterministic implementation of the `Forge`
//! trait for use in tests. It stores pull requests, reviews, and team
//! rosters in memory and allows configuring failure scenarios per method.
//!
//! # Example
//!
//! ```
//! use reviewgate::forge::mock::MockForge;
//! use reviewgate::forge::{Forge, PullRequest};
//!
//! # tokio_test::block_on(async {
//! let forge = MockForge::new()
//!     .with_pull_request(PullRequest {
//!         number: 1,
//!         branch_name: "feat/login".to_string(),
//!         title: "Add login".to_string(),
//!         requested_reviewers: vec![],
//!         requested_teams: vec![],
//!     })
//!     .with_team("platform", &["alice", "bob"]);
//!
//! let pr = forge.get_pull_request(1).await.unwrap();
//! assert_eq!(pr.branch_name, "feat/login");
//!
//! let members = forge.list_team_members("platform").await.unwrap();
//! assert_eq!(members, vec!["alice", "bob"]);
//! # });
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::traits::{Forge, ForgeError, PullRequest, Review};

/// Mock forge for testing.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping.
#[derive(Debug, Clone, Default)]
pub struct MockForge {
    /// Internal state shared across clones.
    inner: Arc<Mutex<MockForgeInner>>,
}

/// Internal mutable state.
#[derive(Debug, Default)]
struct MockForgeInner {
    /// Stored PRs by number.
    prs: HashMap<u64, PullRequest>,
    /// Reviews by PR number, in submission order.
    reviews: HashMap<u64, Vec<Review>>,
    /// Team member logins by slug.
    teams: HashMap<String, Vec<String>>,
    /// Method to fail on (for testing error paths).
    fail_on: Option<FailOn>,
    /// Recorded operations for verification.
    operations: Vec<MockOperation>,
}

/// Configuration for which operation should fail.
#[derive(Debug, Clone)]
pub enum FailOn {
    /// Fail get_pull_request with the given error.
    GetPullRequest(ForgeError),
    /// Fail list_reviews with the given error.
    ListReviews(ForgeError),
    /// Fail list_team_members with the given error.
    ListTeamMembers(ForgeError),
    /// Fail request_reviewers with the given error.
    RequestReviewers(ForgeError),
}

/// Recorded operation for test verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockOperation {
    GetPullRequest {
        number: u64,
    },
    ListReviews {
        number: u64,
    },
    ListTeamMembers {
        team_slug: String,
    },
    RequestReviewers {
        number: u64,
        users: Vec<String>,
        teams: Vec<String>,
    },
}

impl MockForge {
    /// Create a new empty mock forge.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a pull request fixture.
    pub fn with_pull_request(self, pr: PullRequest) -> Self {
        self.inner.lock().unwrap().prs.insert(pr.number, pr);
        self
    }

    /// Add review fixtures for a PR, in submission order.
    pub fn with_reviews(self, number: u64, reviews: Vec<Review>) -> Self {
        self.inner.lock().unwrap().reviews.insert(number, reviews);
        self
    }

    /// Add a team roster fixture.
    pub fn with_team(self, slug: &str, members: &[&str]) -> Self {
        self.inner.lock().unwrap().teams.insert(
            slug.to_string(),
            members.iter().map(|m| m.to_string()).collect(),
        );
        self
    }

    /// Configure a method to fail with the given error.
    pub fn fail_on(self, fail: FailOn) -> Self {
        self.inner.lock().unwrap().fail_on = Some(fail);
        self
    }

    /// Recorded operations, in call order.
    pub fn operations(&self) -> Vec<MockOperation> {
        self.inner.lock().unwrap().operations.clone()
    }
}

#[async_trait]
impl Forge for MockForge {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequest, ForgeError> {
        let mut inner = self.inner.lock().unwrap();
        inner
            .operations
            .push(MockOperation::GetPullRequest { number });
        if let Some(FailOn::GetPullRequest(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        inner
            .prs
            .get(&number)
            .cloned()
            .ok_or_else(|| ForgeError::NotFound(format!("PR #{}", number)))
    }

    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>, ForgeError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::ListReviews { number });
        if let Some(FailOn::ListReviews(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        Ok(inner.reviews.get(&number).cloned().unwrap_or_default())
    }

    async fn list_team_members(&self, team_slug: &str) -> Result<Vec<String>, ForgeError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::ListTeamMembers {
            team_slug: team_slug.to_string(),
        });
        if let Some(FailOn::ListTeamMembers(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        inner
            .teams
            .get(team_slug)
            .cloned()
            .ok_or_else(|| ForgeError::NotFound(format!("team {}", team_slug)))
    }

    async fn request_reviewers(
        &self,
        number: u64,
        users: Vec<String>,
        teams: Vec<String>,
    ) -> Result<(), ForgeError> {
        let mut inner = self.inner.lock().unwrap();
        inner.operations.push(MockOperation::RequestReviewers {
            number,
            users: users.clone(),
            teams: teams.clone(),
        });
        if let Some(FailOn::RequestReviewers(err)) = &inner.fail_on {
            return Err(err.clone());
        }
        if let Some(pr) = inner.prs.get_mut(&number) {
            pr.requested_reviewers = users;
            pr.requested_teams = teams;
            Ok(())
        } else {
            Err(ForgeError::NotFound(format!("PR #{}", number)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forge::traits::ReviewState;

    fn fixture_pr(number: u64) -> PullRequest {
        PullRequest {
            number,
            branch_name: "feat/x".to_string(),
            title: "feat: x".to_string(),
            requested_reviewers: vec![],
            requested_teams: vec![],
        }
    }

    #[tokio::test]
    async fn missing_pr_is_not_found() {
        let forge = MockForge::new();
        let err = forge.get_pull_request(9).await.unwrap_err();
        assert!(matches!(err, ForgeError::NotFound(_)));
    }

    #[tokio::test]
    async fn missing_team_is_not_found() {
        let forge = MockForge::new();
        let err = forge.list_team_members("ghost").await.unwrap_err();
        assert!(matches!(err, ForgeError::NotFound(msg) if msg.contains("ghost")));
    }

    #[tokio::test]
    async fn reviews_default_to_empty() {
        let forge = MockForge::new().with_pull_request(fixture_pr(1));
        assert!(forge.list_reviews(1).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn reviews_preserve_order() {
        let reviews = vec![
            Review {
                reviewer_login: "alice".to_string(),
                state: ReviewState::Approved,
                submitted_at: None,
            },
            Review {
                reviewer_login: "bob".to_string(),
                state: ReviewState::Approved,
                submitted_at: None,
            },
        ];
        let forge = MockForge::new().with_reviews(1, reviews.clone());
        assert_eq!(forge.list_reviews(1).await.unwrap(), reviews);
    }

    #[tokio::test]
    async fn request_reviewers_overwrites_existing() {
        let forge = MockForge::new().with_pull_request(PullRequest {
            requested_reviewers: vec!["old".to_string()],
            ..fixture_pr(1)
        });
        forge
            .request_reviewers(1, vec!["alice".to_string()], vec!["platform".to_string()])
            .await
            .unwrap();
        let pr = forge.get_pull_request(1).await.unwrap();
        assert_eq!(pr.requested_reviewers, vec!["alice"]);
        assert_eq!(pr.requested_teams, vec!["platform"]);
    }

    #[tokio::test]
    async fn fail_on_injects_errors() {
        let forge = MockForge::new()
            .with_team("platform", &["alice"])
            .fail_on(FailOn::ListTeamMembers(ForgeError::RateLimited));
        let err = forge.list_team_members("platform").await.unwrap_err();
        assert!(matches!(err, ForgeError::RateLimited));
    }

    #[tokio::test]
    async fn operations_are_recorded() {
        let forge = MockForge::new().with_pull_request(fixture_pr(3));
        forge.get_pull_request(3).await.unwrap();
        forge.list_reviews(3).await.unwrap();
        assert_eq!(
            forge.operations(),
            vec![
                MockOperation::GetPullRequest { number: 3 },
                MockOperation::ListReviews { number: 3 },
            ]
        );
    }
}
