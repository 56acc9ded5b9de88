//! Minimal GitHub REST client for listing open issues.

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Issue, RepoName};

pub const PAGE_SIZE: u32 = 100;
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const CLIENT_USER_AGENT: &str = "GitHub-Issue-Analyzer";

/// An item from the issues endpoint. Pull requests come back mixed in.
#[derive(Debug, Clone, Deserialize)]
pub struct GitHubIssue {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    pub created_at: String,
}

impl GitHubIssue {
    pub fn is_pull_request(&self) -> bool {
        self.html_url.contains("/pull/")
    }

    pub fn into_issue(self, repo: &RepoName) -> Issue {
        Issue {
            id: self.id,
            repo: repo.to_string(),
            title: self.title,
            body: self.body.unwrap_or_default(),
            html_url: self.html_url,
            created_at: self.created_at,
        }
    }
}

#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// First page of open issues (pull requests included).
    pub async fn list_open_issues(&self, repo: &RepoName) -> Result<Vec<GitHubIssue>, AppError> {
        let url = format!("{}/repos/{}/issues", self.base_url, repo);
        tracing::debug!("Fetching open issues from {}", url);

        let response = self
            .http
            .get(&url)
            .query(&[("state", "open".to_string()), ("per_page", PAGE_SIZE.to_string())])
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .header(ACCEPT, GITHUB_ACCEPT)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let details = response.text().await.unwrap_or_default();
            let message = format!(
                "GitHub API error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            )
            .trim_end()
            .to_string();
            tracing::warn!("{} for {}", message, repo);
            return Err(AppError::Upstream {
                message,
                status: status.as_u16(),
                details,
            });
        }

        Ok(response.json::<Vec<GitHubIssue>>().await?)
    }
}

/// Drops pull requests and converts the rest into cache rows for `repo`.
pub fn issues_only(items: Vec<GitHubIssue>, repo: &RepoName) -> Vec<Issue> {
    items
        .into_iter()
        .filter(|item| !item.is_pull_request())
        .map(|item| item.into_issue(repo))
        .collect()
}
