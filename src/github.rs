//! GitHub REST API client
//!
//! Implements exactly the endpoints the workflow needs: issue and PR reads,
//! issue/PR creation, comments, the commit-range comparison and the
//! authenticated user. Not a general-purpose client.

use crate::http::{self, Headers, HttpClient, UreqHttpClient};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// GitHub Issue representation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Issue {
    /// Issue number
    pub number: u64,

    /// Issue title
    pub title: String,

    /// Issue body (description)
    pub body: Option<String>,

    /// Accounts assigned to the issue
    #[serde(default)]
    pub assignees: Vec<Account>,

    /// Labels attached to the issue
    #[serde(default)]
    pub labels: Vec<Label>,

    /// URL to the issue on GitHub
    pub html_url: String,
}

/// GitHub Label representation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Label {
    /// Label name
    pub name: String,
}

/// A GitHub account, wherever one appears (assignee, reviewer, current user)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Account {
    /// Account login
    pub login: String,
}

/// GitHub Pull Request representation
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PullRequest {
    /// PR number
    pub number: u64,

    /// PR title
    pub title: String,

    /// PR body (description)
    pub body: Option<String>,

    /// Whether the PR has been merged. Only the single-PR endpoint reports
    /// this; list responses leave it false.
    #[serde(default)]
    pub merged: bool,

    /// Head branch reference
    pub head: PullRequestRef,

    /// Base branch reference
    pub base: PullRequestRef,

    /// Reviewers with an outstanding review request
    #[serde(default)]
    pub requested_reviewers: Vec<Account>,

    /// URL to the PR on GitHub
    pub html_url: String,
}

/// Pull Request branch reference
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PullRequestRef {
    /// Branch name
    #[serde(rename = "ref")]
    pub branch: String,
}

/// A commit returned by the compare endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct Commit {
    pub sha: String,
    pub commit: CommitDetail,
}

/// Commit metadata (only the message is needed)
#[derive(Debug, Clone, Deserialize)]
pub struct CommitDetail {
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct Comparison {
    commits: Vec<Commit>,
}

/// One CI status entry posted to a commit
#[derive(Debug, Clone, Deserialize)]
pub struct CommitStatus {
    /// CI context the entry belongs to, e.g. "ci/build"
    pub context: String,

    /// State reported by the context: pending, success, failure, error
    pub state: String,

    /// Human-readable summary, if the CI system posted one
    #[serde(default)]
    pub description: Option<String>,

    /// When the entry was posted (ISO 8601)
    pub updated_at: String,
}

/// Payload for creating an issue
#[derive(Debug, Clone, Serialize)]
pub struct NewIssue {
    /// Issue title
    pub title: String,

    /// Issue body
    pub body: Option<String>,

    /// Logins to assign
    pub assignees: Vec<String>,

    /// Label names to apply
    pub labels: Vec<String>,
}

/// Page size for list endpoints
const PER_PAGE: usize = 100;

/// GitHub API client
pub struct GitHubClient<H: HttpClient = UreqHttpClient> {
    /// Repository in "owner/repo" format
    repository: String,

    /// OAuth token from the workflow config
    token: String,

    /// HTTP client
    http: H,
}

impl GitHubClient<UreqHttpClient> {
    /// Create a new GitHub client for a repository
    pub fn new(repository: &str, token: &str) -> Self {
        Self {
            repository: repository.to_string(),
            token: token.to_string(),
            http: UreqHttpClient,
        }
    }
}

impl<H: HttpClient> GitHubClient<H> {
    /// Create client with custom HTTP client (for testing)
    pub fn with_http_client(repository: &str, token: &str, http: H) -> Self {
        Self {
            repository: repository.to_string(),
            token: token.to_string(),
            http,
        }
    }

    /// Build common headers for requests
    fn build_headers(&self) -> Headers {
        vec![
            (
                "Accept".to_string(),
                "application/vnd.github.v3+json".to_string(),
            ),
            ("User-Agent".to_string(), "ghflow".to_string()),
            ("Authorization".to_string(), format!("Bearer {}", self.token)),
            ("Content-Type".to_string(), "application/json".to_string()),
        ]
    }

    fn repo_url(&self, path: &str) -> String {
        format!("https://api.github.com/repos/{}/{}", self.repository, path)
    }

    fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str, what: &str) -> Result<T> {
        let response = self
            .http
            .get(url, self.build_headers())
            .with_context(|| format!("Failed to fetch {what}"))?;

        if !http::is_success(response.status) {
            return Err(http::api_error(&response).into());
        }

        serde_json::from_str(&response.body)
            .with_context(|| format!("Failed to parse {what} response"))
    }

    fn post_json<T: for<'de> Deserialize<'de>>(
        &self,
        url: &str,
        body: String,
        what: &str,
    ) -> Result<T> {
        let response = self
            .http
            .post(url, self.build_headers(), body)
            .with_context(|| format!("Failed to {what}"))?;

        if !http::is_success(response.status) {
            return Err(http::api_error(&response).into());
        }

        serde_json::from_str(&response.body)
            .with_context(|| format!("Failed to parse {what} response"))
    }

    /// Get a single issue by number
    pub fn get_issue(&self, number: u64) -> Result<Issue> {
        self.get_json(
            &self.repo_url(&format!("issues/{number}")),
            &format!("issue #{number}"),
        )
    }

    /// Get a pull request by number
    pub fn get_pull_request(&self, number: u64) -> Result<PullRequest> {
        self.get_json(
            &self.repo_url(&format!("pulls/{number}")),
            &format!("pull request #{number}"),
        )
    }

    /// List all open pull requests, following pagination
    pub fn list_open_pull_requests(&self) -> Result<Vec<PullRequest>> {
        let mut all = Vec::new();
        let mut page = 1;

        loop {
            let url = self.repo_url(&format!("pulls?state=open&per_page={PER_PAGE}&page={page}"));
            let batch: Vec<PullRequest> = self.get_json(&url, "open pull requests")?;
            let last_page = batch.len() < PER_PAGE;
            all.extend(batch);
            if last_page {
                break;
            }
            page += 1;
        }

        Ok(all)
    }

    /// Create an issue
    pub fn create_issue(&self, issue: &NewIssue) -> Result<Issue> {
        let body = serde_json::to_string(issue).context("Failed to serialize issue payload")?;
        self.post_json(&self.repo_url("issues"), body, "create issue")
    }

    /// Convert an existing issue into a pull request
    ///
    /// Uses the `issue` field of the pulls endpoint, which attaches the PR to
    /// the issue instead of opening a new one.
    pub fn create_pull_request(&self, head: &str, base: &str, issue: u64) -> Result<PullRequest> {
        let body = serde_json::json!({
            "head": head,
            "base": base,
            "issue": issue,
        })
        .to_string();

        self.post_json(&self.repo_url("pulls"), body, "create pull request")
    }

    /// Add a comment to an issue
    pub fn add_comment(&self, number: u64, text: &str) -> Result<()> {
        let body = serde_json::json!({ "body": text }).to_string();
        let url = self.repo_url(&format!("issues/{number}/comments"));

        let response = self
            .http
            .post(&url, self.build_headers(), body)
            .with_context(|| format!("Failed to comment on issue #{number}"))?;

        if response.status != 201 {
            return Err(http::api_error(&response).into());
        }

        Ok(())
    }

    /// Compare two refs and return the commits between them, oldest first
    pub fn compare(&self, from: &str, to: &str) -> Result<Vec<Commit>> {
        let url = self.repo_url(&format!(
            "compare/{}...{}",
            urlencoding::encode(from),
            urlencoding::encode(to)
        ));
        let comparison: Comparison = self.get_json(&url, &format!("comparison {from}...{to}"))?;
        Ok(comparison.commits)
    }

    /// List every CI status entry posted to a ref
    pub fn statuses(&self, git_ref: &str) -> Result<Vec<CommitStatus>> {
        self.get_json(
            &self.repo_url(&format!("statuses/{}", urlencoding::encode(git_ref))),
            &format!("statuses of {git_ref}"),
        )
    }

    /// Get the authenticated user
    pub fn current_user(&self) -> Result<Account> {
        self.get_json("https://api.github.com/user", "authenticated user")
    }

    /// Get the repository name
    pub fn repository(&self) -> &str {
        &self.repository
    }
}
