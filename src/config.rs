use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

use crate::listings::AvailabilityRule;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub database_max_connections: u32,
    pub run_migrations: bool,
    pub availability_rule: AvailabilityRule,
    pub max_page_size: i64,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let max_page_size: i64 = var("MAX_PAGE_SIZE", "100")
            .parse()
            .context("MAX_PAGE_SIZE must be a valid number")?;
        anyhow::ensure!(max_page_size > 0, "MAX_PAGE_SIZE must be positive");

        Ok(Self {
            database_url: lookup("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: var("PORT", "8000")
                .parse()
                .context("PORT must be a valid number")?,
            database_max_connections: var("DATABASE_MAX_CONNECTIONS", "10")
                .parse()
                .context("DATABASE_MAX_CONNECTIONS must be a valid number")?,
            run_migrations: var("RUN_MIGRATIONS", "false")
                .parse()
                .context("RUN_MIGRATIONS must be true or false")?,
            availability_rule: var("AVAILABILITY_RULE", "overlap")
                .parse()
                .context("AVAILABILITY_RULE is invalid")?,
            max_page_size,
        })
    }
}
