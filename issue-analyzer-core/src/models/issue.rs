use serde::{Deserialize, Serialize};

/// One cached issue. Rows are keyed by `(repo, id)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub id: i64,
    pub repo: String,
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub html_url: String,
    /// ISO 8601 timestamp as reported by the tracker.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedRepository {
    pub repo: String,
    pub issue_count: usize,
}
