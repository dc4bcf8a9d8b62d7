//! forge::github
//!
//! GitHub forge implementation using the REST API.
//!
//! # Design
//!
//! Implements the `Forge` trait for GitHub. All inputs are explicit: owner
//! (doubling as the organization for team lookups), repository, and token
//! are passed to the constructor rather than read from the environment or a
//! module-level client.
//!
//! Endpoints used:
//! - `GET /repos/{owner}/{repo}/pulls/{number}`
//! - `GET /repos/{owner}/{repo}/pulls/{number}/reviews`
//! - `GET /orgs/{owner}/teams/{slug}/members`
//! - `POST /repos/{owner}/{repo}/pulls/{number}/requested_reviewers`
//!
//! # Rate Limiting
//!
//! GitHub has rate limits. This implementation returns
//! `ForgeError::RateLimited` when limits are hit and does not retry
//! (caller's responsibility).

use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use serde::{Deserialize, Serialize};

use super::traits::{Forge, ForgeError, PullRequest, Review, ReviewState};
use async_trait::async_trait;

/// Default GitHub API base URL.
const DEFAULT_API_BASE: &str = "https://api.github.com";

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = "reviewgate-cli";

/// GitHub API version header value.
const API_VERSION: &str = "2022-11-28";

/// GitHub forge implementation.
pub struct GitHubForge {
    /// HTTP client for making requests
    client: Client,
    /// Personal access token or installation token
    token: String,
    /// Repository owner; also the org queried for team membership
    owner: String,
    /// Repository name
    repo: String,
    /// API base URL (configurable for GitHub Enterprise)
    api_base: String,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for GitHubForge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubForge")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl GitHubForge {
    /// Create a new GitHub forge.
    ///
    /// # Arguments
    ///
    /// * `token` - Personal access token or GitHub App token
    /// * `owner` - Repository owner (user or organization)
    /// * `repo` - Repository name
    pub fn new(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a GitHub forge with a custom API base URL.
    ///
    /// Use this for GitHub Enterprise installations
    /// (e.g. `https://github.example.com/api/v3`).
    pub fn with_api_base(
        token: impl Into<String>,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            owner: owner.into(),
            repo: repo.into(),
            api_base: api_base.into(),
        }
    }

    /// Get the repository owner.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Get the repository name.
    pub fn repo(&self) -> &str {
        &self.repo
    }

    /// Build common headers for API requests.
    fn headers(&self) -> Result<HeaderMap, ForgeError> {
        if self.token.is_empty() {
            return Err(ForgeError::AuthRequired);
        }
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|_| ForgeError::AuthFailed("token is not a valid header value".into()))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));
        headers.insert("X-GitHub-Api-Version", HeaderValue::from_static(API_VERSION));
        Ok(headers)
    }

    /// Build URL for a repository endpoint.
    fn repo_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.owner, self.repo, path
        )
    }

    /// Build URL for an organization endpoint.
    fn org_url(&self, path: &str) -> String {
        format!("{}/orgs/{}/{}", self.api_base, self.owner, path)
    }

    /// Perform a GET request and deserialize the response.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T, ForgeError> {
        let response = self
            .client
            .get(url)
            .headers(self.headers()?)
            .send()
            .await
            .map_err(map_transport_error)?;
        handle_response(response).await
    }

    /// Handle API response, mapping errors appropriately.
    async fn handle_empty_response(&self, response: Response) -> Result<(), ForgeError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(error_from_response(response, status).await)
        }
    }
}

/// Map a reqwest transport error to a ForgeError.
fn map_transport_error(err: reqwest::Error) -> ForgeError {
    ForgeError::NetworkError(err.to_string())
}

/// Deserialize a successful response or map the error status.
async fn handle_response<T: for<'de> Deserialize<'de>>(
    response: Response,
) -> Result<T, ForgeError> {
    let status = response.status();
    if status.is_success() {
        response.json().await.map_err(|e| ForgeError::ApiError {
            status: status.as_u16(),
            message: format!("failed to parse response: {}", e),
        })
    } else {
        Err(error_from_response(response, status).await)
    }
}

/// Map an error response to a ForgeError.
async fn error_from_response(response: Response, status: StatusCode) -> ForgeError {
    // A 403 with an exhausted rate-limit budget is a rate limit, not an
    // authorization failure.
    let rate_limit_exhausted = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "0")
        .unwrap_or(false);

    let message = extract_error_message(response).await;

    match status.as_u16() {
        401 => ForgeError::AuthFailed(message),
        403 if rate_limit_exhausted => ForgeError::RateLimited,
        403 => ForgeError::AuthFailed(message),
        404 => ForgeError::NotFound(message),
        429 => ForgeError::RateLimited,
        code => ForgeError::ApiError {
            status: code,
            message,
        },
    }
}

/// Extract the `message` field from a GitHub error body, falling back to
/// the raw body text.
async fn extract_error_message(response: Response) -> String {
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<GitHubErrorBody>(&body)
        .ok()
        .map(|b| b.message)
        .unwrap_or(body)
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GitHubErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct UserData {
    login: String,
}

#[derive(Debug, Deserialize)]
struct TeamData {
    slug: String,
}

#[derive(Debug, Deserialize)]
struct HeadData {
    #[serde(rename = "ref")]
    branch: String,
}

#[derive(Debug, Deserialize)]
struct PullRequestData {
    number: u64,
    title: String,
    head: HeadData,
    #[serde(default)]
    requested_reviewers: Vec<UserData>,
    #[serde(default)]
    requested_teams: Vec<TeamData>,
}

impl From<PullRequestData> for PullRequest {
    fn from(data: PullRequestData) -> Self {
        PullRequest {
            number: data.number,
            branch_name: data.head.branch,
            title: data.title,
            requested_reviewers: data.requested_reviewers.into_iter().map(|u| u.login).collect(),
            requested_teams: data.requested_teams.into_iter().map(|t| t.slug).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReviewData {
    user: UserData,
    state: String,
    #[serde(default)]
    submitted_at: Option<DateTime<Utc>>,
}

impl From<ReviewData> for Review {
    fn from(data: ReviewData) -> Self {
        Review {
            reviewer_login: data.user.login,
            state: ReviewState::parse(&data.state),
            submitted_at: data.submitted_at,
        }
    }
}

#[derive(Debug, Serialize)]
struct RequestReviewersBody {
    reviewers: Vec<String>,
    team_reviewers: Vec<String>,
}

// ---------------------------------------------------------------------------
// Forge implementation
// ---------------------------------------------------------------------------

#[async_trait]
impl Forge for GitHubForge {
    fn name(&self) -> &'static str {
        "github"
    }

    async fn get_pull_request(&self, number: u64) -> Result<PullRequest, ForgeError> {
        let url = self.repo_url(&format!("pulls/{}", number));
        let data: PullRequestData = self.get_json(&url).await?;
        Ok(data.into())
    }

    async fn list_reviews(&self, number: u64) -> Result<Vec<Review>, ForgeError> {
        let url = self.repo_url(&format!("pulls/{}/reviews", number));
        let data: Vec<ReviewData> = self.get_json(&url).await?;
        // The API returns reviews in submission order; preserve it.
        Ok(data.into_iter().map(Review::from).collect())
    }

    async fn list_team_members(&self, team_slug: &str) -> Result<Vec<String>, ForgeError> {
        let url = self.org_url(&format!("teams/{}/members", team_slug));
        let data: Vec<UserData> = self.get_json(&url).await?;
        Ok(data.into_iter().map(|u| u.login).collect())
    }

    async fn request_reviewers(
        &self,
        number: u64,
        users: Vec<String>,
        teams: Vec<String>,
    ) -> Result<(), ForgeError> {
        let url = self.repo_url(&format!("pulls/{}/requested_reviewers", number));
        let body = RequestReviewersBody {
            reviewers: users,
            team_reviewers: teams,
        };
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;
        self.handle_empty_response(response).await
    }
}
