//! Issue Analyzer: cache a GitHub repository's open issues and ask an LLM
//! questions about them.
//!
//! The [`Scanner`] refreshes the cached snapshot for one repository, the
//! [`Analyzer`] answers a prompt using that snapshot. Both are exposed over
//! HTTP ([`api`]), MCP stdio ([`mcp`]) and the command line.

pub mod analyzer;
pub mod api;
pub mod config;
pub mod error;
pub mod github;
pub mod llm;
pub mod mcp;
pub mod scanner;
pub mod services;

pub use analyzer::Analyzer;
pub use config::Config;
pub use error::AppError;
pub use scanner::Scanner;
pub use services::Services;

pub use issue_analyzer_core::{db, models};
