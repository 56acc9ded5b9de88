use anyhow::{Context, Result};

use crate::analyzer::Analyzer;
use crate::config::Config;
use crate::db::Database;
use crate::scanner::Scanner;

/// The operations every transport exposes, sharing one issue store.
#[derive(Clone)]
pub struct Services {
    pub scanner: Scanner,
    pub analyzer: Analyzer,
    pub db: Database,
}

impl Services {
    pub fn new(config: &Config, db: Database) -> Self {
        let http = reqwest::Client::new();
        Self {
            scanner: Scanner::new(config, db.clone(), http.clone()),
            analyzer: Analyzer::new(config, db.clone(), http),
            db,
        }
    }

    /// Opens and migrates the configured store, then builds the services.
    pub fn open(config: &Config) -> Result<Self> {
        let db = match &config.database_path {
            Some(path) => Database::open(path)?,
            None => Database::open_default()?,
        };
        db.migrate().context("failed to migrate issue store")?;
        Ok(Self::new(config, db))
    }
}
