use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;
use crate::llm::ChatClient;
use crate::models::{AnalysisResult, Issue};

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that analyzes GitHub issues and provides insights to repository maintainers. Provide clear, actionable recommendations based on the issues provided.";
pub const EMPTY_BODY_PLACEHOLDER: &str = "No description";
pub const FALLBACK_ANALYSIS: &str = "No analysis generated";
const BLOCK_SEPARATOR: &str = "\n---\n\n";

/// Answers free-text questions about a repository's cached issues.
#[derive(Clone)]
pub struct Analyzer {
    db: Database,
    chat: Option<ChatClient>,
}

impl Analyzer {
    pub fn new(config: &Config, db: Database, http: reqwest::Client) -> Self {
        let chat = config
            .openai_api_key
            .as_ref()
            .map(|key| ChatClient::new(http, config.openai_api_url.clone(), key.clone()));
        Self { db, chat }
    }

    pub async fn analyze(&self, repo: &str, prompt: &str) -> Result<AnalysisResult, AppError> {
        let repo = repo.trim();
        if repo.is_empty() {
            return Err(AppError::InvalidInput("Repository name is required".to_string()));
        }
        if prompt.is_empty() {
            return Err(AppError::InvalidInput("Analysis prompt is required".to_string()));
        }

        let issues = self
            .db
            .get_issues_for_repo(repo)
            .map_err(|e| AppError::persistence("Failed to fetch cached issues", e))?;
        if issues.is_empty() {
            return Err(AppError::NotFound(
                "No cached issues found for this repository. Please scan the repository first."
                    .to_string(),
            ));
        }

        let chat = self
            .chat
            .as_ref()
            .ok_or_else(|| AppError::Configuration("OpenAI API key not configured".to_string()))?;

        tracing::info!("Analyzing {} cached issues for {}", issues.len(), repo);
        let context = render_issue_context(&issues);
        let analysis = chat
            .complete(SYSTEM_PROMPT, user_message(repo, &context, prompt))
            .await?
            .unwrap_or_else(|| FALLBACK_ANALYSIS.to_string());

        Ok(AnalysisResult { analysis })
    }
}

/// Renders issues as numbered blocks, in the order given.
pub fn render_issue_context(issues: &[Issue]) -> String {
    issues
        .iter()
        .enumerate()
        .map(|(index, issue)| render_issue(index + 1, issue))
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

fn render_issue(number: usize, issue: &Issue) -> String {
    let body = if issue.body.is_empty() {
        EMPTY_BODY_PLACEHOLDER
    } else {
        issue.body.as_str()
    };
    format!(
        "Issue #{}:\nTitle: {}\nBody: {}\nURL: {}\nCreated: {}\n",
        number, issue.title, body, issue.html_url, issue.created_at
    )
}

pub fn user_message(repo: &str, context: &str, prompt: &str) -> String {
    format!(
        "Here are the open issues from the repository \"{}\":\n\n{}\n\nUser's request: {}",
        repo, context, prompt
    )
}
