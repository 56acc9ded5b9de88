use std::fmt;
use std::path::PathBuf;

pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";

/// Runtime configuration, built once at startup and injected into each service.
///
/// Credentials are optional here: their absence only fails the operations
/// that need them.
#[derive(Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub openai_api_key: Option<String>,
    /// `None` selects the platform data directory.
    pub database_path: Option<PathBuf>,
    pub github_api_url: String,
    pub openai_api_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_token: None,
            openai_api_key: None,
            database_path: None,
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("github_token", &redacted(&self.github_token))
            .field("openai_api_key", &redacted(&self.openai_api_key))
            .field("database_path", &self.database_path)
            .field("github_api_url", &self.github_api_url)
            .field("openai_api_url", &self.openai_api_url)
            .finish()
    }
}

fn redacted(secret: &Option<String>) -> Option<&'static str> {
    secret.as_ref().map(|_| "<redacted>")
}

impl Config {
    /// Blank credentials count as missing; trailing slashes are stripped from base URLs.
    pub fn normalized(self) -> Self {
        Self {
            github_token: non_blank(self.github_token),
            openai_api_key: non_blank(self.openai_api_key),
            database_path: self.database_path,
            github_api_url: self.github_api_url.trim_end_matches('/').to_string(),
            openai_api_url: self.openai_api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn warn_missing_credentials(&self) {
        if self.github_token.is_none() {
            tracing::warn!("GITHUB_TOKEN is not set; scans will fail until it is configured");
        }
        if self.openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set; analysis will fail until it is configured");
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
