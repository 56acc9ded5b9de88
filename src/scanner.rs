use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;
use crate::github::{self, GitHubClient};
use crate::models::{RepoName, ScanResult};

pub const INVALID_REPO_MESSAGE: &str = "Invalid repo format. Expected \"owner/repository-name\"";

/// Fetches a repository's open issues and replaces its cached snapshot.
#[derive(Clone)]
pub struct Scanner {
    db: Database,
    github: Option<GitHubClient>,
}

impl Scanner {
    pub fn new(config: &Config, db: Database, http: reqwest::Client) -> Self {
        let github = config
            .github_token
            .as_ref()
            .map(|token| GitHubClient::new(http, config.github_api_url.clone(), token.clone()));
        Self { db, github }
    }

    pub async fn scan(&self, repo: &str) -> Result<ScanResult, AppError> {
        let repo = RepoName::parse(repo)
            .ok_or_else(|| AppError::InvalidInput(INVALID_REPO_MESSAGE.to_string()))?;

        let github = self
            .github
            .as_ref()
            .ok_or_else(|| AppError::Configuration("GitHub token not configured".to_string()))?;

        tracing::info!("Scanning open issues for {}", repo);
        let items = github.list_open_issues(&repo).await?;
        let fetched = items.len();
        let issues = github::issues_only(items, &repo);
        tracing::debug!(
            "Fetched {} items for {}, {} after removing pull requests",
            fetched,
            repo,
            issues.len()
        );

        let cached = self
            .db
            .replace_issues(repo.as_str(), &issues)
            .map_err(|e| AppError::persistence("Failed to cache issues", e))?;
        tracing::info!("Cached {} issues for {}", cached, repo);

        Ok(ScanResult {
            repo: repo.to_string(),
            issues_fetched: issues.len(),
            cached_successfully: true,
        })
    }
}
