use anyhow::{Context, Result};
use rusqlite::{params, Row};

use super::Database;
use crate::models::{CachedRepository, Issue};

impl Database {
    /// Replaces the cached snapshot for `repo` with `issues`.
    ///
    /// The delete and the inserts share one transaction: either the new
    /// snapshot is committed whole or the previous one is left untouched.
    pub fn replace_issues(&self, repo: &str, issues: &[Issue]) -> Result<usize> {
        self.with_connection(|conn| {
            let tx = conn.transaction()?;

            let removed = tx
                .execute("DELETE FROM issues WHERE repo = ?1", params![repo])
                .with_context(|| format!("failed to clear cached issues for {repo}"))?;

            if !issues.is_empty() {
                let mut stmt = tx.prepare(
                    "INSERT INTO issues (id, repo, title, body, html_url, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                )?;
                for issue in issues {
                    stmt.execute(params![
                        issue.id,
                        repo,
                        issue.title,
                        issue.body,
                        issue.html_url,
                        issue.created_at,
                    ])
                    .with_context(|| format!("failed to cache issue {} for {repo}", issue.id))?;
                }
            }

            tx.commit()?;
            tracing::debug!(
                "Replaced cached issues for {}: removed {}, inserted {}",
                repo,
                removed,
                issues.len()
            );
            Ok(issues.len())
        })
    }

    /// Cached issues for `repo`, newest first.
    pub fn get_issues_for_repo(&self, repo: &str) -> Result<Vec<Issue>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, repo, title, body, html_url, created_at
                 FROM issues
                 WHERE repo = ?1
                 ORDER BY created_at DESC, id DESC",
            )?;
            let issues = stmt
                .query_map(params![repo], row_to_issue)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(issues)
        })
    }

    pub fn count_issues_for_repo(&self, repo: &str) -> Result<usize> {
        self.with_connection(|conn| {
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM issues WHERE repo = ?1",
                params![repo],
                |row| row.get(0),
            )?;
            Ok(count as usize)
        })
    }

    pub fn list_repositories(&self) -> Result<Vec<CachedRepository>> {
        self.with_connection(|conn| {
            let mut stmt = conn.prepare(
                "SELECT repo, COUNT(*) FROM issues GROUP BY repo ORDER BY repo",
            )?;
            let repos = stmt
                .query_map([], |row| {
                    let count: i64 = row.get(1)?;
                    Ok(CachedRepository {
                        repo: row.get(0)?,
                        issue_count: count as usize,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(repos)
        })
    }
}

fn row_to_issue(row: &Row<'_>) -> rusqlite::Result<Issue> {
    Ok(Issue {
        id: row.get(0)?,
        repo: row.get(1)?,
        title: row.get(2)?,
        body: row.get(3)?,
        html_url: row.get(4)?,
        created_at: row.get(5)?,
    })
}
