//! Core library for Issue Analyzer.
//!
//! This crate provides the domain models and the cached issue store,
//! independent of any transport layer (HTTP, MCP, CLI).
//!
//! # Usage
//!
//! ```no_run
//! use issue_analyzer_core::db::Database;
//!
//! let db = Database::open_default()?;
//! db.migrate()?;
//!
//! let issues = db.get_issues_for_repo("rust-lang/rust")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod db;
pub mod models;

// Re-export commonly used types at crate root
pub use db::Database;
pub use models::*;
