//! forge::traits
//!
//! Forge trait definition for interacting with remote hosting services.
//!
//! # Design
//!
//! The `Forge` trait is async because forge operations involve network I/O.
//! All methods return `Result` to handle API errors gracefully. The gate
//! only reads from the forge, with one exception: `request_reviewers`, used
//! by assign mode to set the matched rule's reviewers on the pull request.
//!
//! # Example
//!
//! ```ignore
//! use reviewgate::forge::{Forge, ForgeError};
//!
//! async fn approvers(forge: &dyn Forge, number: u64) -> Result<Vec<String>, ForgeError> {
//!     let reviews = forge.list_reviews(number).await?;
//!     Ok(reviewgate::forge::approved_logins(&reviews))
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors from forge operations.
///
/// These error types map to common failure modes when interacting
/// with remote hosting services like GitHub.
#[derive(Debug, Clone, Error)]
pub enum ForgeError {
    /// Authentication is required but not available.
    #[error("authentication required")]
    AuthRequired,

    /// Authentication failed (invalid token, expired, insufficient permissions).
    #[error("authentication failed: {0}")]
    AuthFailed(String),

    /// The requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded.
    #[error("rate limited")]
    RateLimited,

    /// API returned an error.
    #[error("API error: {status} - {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Network or connection error.
    #[error("network error: {0}")]
    NetworkError(String),
}

/// Pull request information returned from the forge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// PR number
    pub number: u64,
    /// Head branch name
    pub branch_name: String,
    /// PR title
    pub title: String,
    /// Logins of users already requested for review
    pub requested_reviewers: Vec<String>,
    /// Slugs of teams already requested for review
    pub requested_teams: Vec<String>,
}

/// State of a submitted review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    /// The reviewer approved the changes
    Approved,
    /// The reviewer requested changes
    ChangesRequested,
    /// The reviewer left comments without a verdict
    Commented,
    /// The review was dismissed
    Dismissed,
    /// The review is pending submission
    Pending,
    /// Any state this client does not recognize
    Other(String),
}

impl ReviewState {
    /// Parse the API's state string (e.g. `APPROVED`).
    pub fn parse(state: &str) -> Self {
        match state {
            "APPROVED" => ReviewState::Approved,
            "CHANGES_REQUESTED" => ReviewState::ChangesRequested,
            "COMMENTED" => ReviewState::Commented,
            "DISMISSED" => ReviewState::Dismissed,
            "PENDING" => ReviewState::Pending,
            other => ReviewState::Other(other.to_string()),
        }
    }
}

/// A single review on a pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    /// Login of the reviewing user
    pub reviewer_login: String,
    /// Review verdict
    pub state: ReviewState,
    /// Submission time (absent for pending reviews)
    pub submitted_at: Option<DateTime<Utc>>,
}

/// Logins of approving reviews, preserving submission order.
pub fn approved_logins(reviews: &[Review]) -> Vec<String> {
    reviews
        .iter()
        .filter(|r| r.state == ReviewState::Approved)
        .map(|r| r.reviewer_login.clone())
        .collect()
}

/// The Forge trait for interacting with remote hosting services.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, ForgeError>`. Callers should handle:
/// - `AuthRequired` / `AuthFailed`: Check token configuration
/// - `NotFound`: Resource doesn't exist (PR, team, repo)
/// - `RateLimited`: Back off and retry
/// - `ApiError`: Display error message to user
/// - `NetworkError`: Check connectivity
#[async_trait]
pub trait Forge: Send + Sync {
    /// Get the forge name (e.g., "github").
    fn name(&self) -> &'static str;

    /// Get a pull request by number.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the PR doesn't exist
    async fn get_pull_request(&self, number: u64) -> Result<PullRequest, ForgeError>;

    /// List the reviews on a pull request, ordered by submission time.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the PR doesn't exist
    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>, ForgeError>;

    /// List the member logins of a team.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the team doesn't exist
    /// - `AuthFailed` if the token cannot read team membership
    async fn list_team_members(&self, team_slug: &str) -> Result<Vec<String>, ForgeError>;

    /// Request reviewers on a pull request.
    ///
    /// Replaces the currently requested reviewers with the given users and
    /// teams.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the PR or reviewers don't exist
    /// - `ApiError` if the request fails
    async fn request_reviewers(
        &self,
        number: u64,
        users: Vec<String>,
        teams: Vec<String>,
    ) -> Result<(), ForgeError>;
}
