pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS issues (
    id INTEGER NOT NULL,
    repo TEXT NOT NULL,
    title TEXT NOT NULL,
    body TEXT NOT NULL DEFAULT '',
    html_url TEXT NOT NULL,
    created_at TEXT NOT NULL,
    PRIMARY KEY (repo, id)
);

CREATE INDEX IF NOT EXISTS idx_issues_repo_created ON issues(repo, created_at);
"#;
