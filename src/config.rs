//! Configuration management

use anyhow::{Context, Result};

/// Application configuration, loaded once at process startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the routing oracle.
    pub routing_oracle_url: String,

    /// Per-request timeout for routing oracle fetches.
    pub routing_timeout_seconds: u64,

    /// Rule-set tag looked up in the HOS Rule Table for every request.
    pub default_rule_set: String,
}

impl Config {
    /// Load configuration from environment variables (an optional `.env`
    /// file is loaded first, if present).
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let routing_oracle_url =
            std::env::var("ROUTING_ORACLE_URL").context("ROUTING_ORACLE_URL must be set")?;

        let routing_timeout_seconds = std::env::var("ROUTING_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(10);

        let default_rule_set = std::env::var("DEFAULT_RULE_SET")
            .unwrap_or_else(|_| "INTERSTATE".to_string());

        Ok(Self {
            routing_oracle_url,
            routing_timeout_seconds,
            default_rule_set,
        })
    }
}
