use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the Gemini key is required; the service degrades gracefully
/// without a database (local persistence only) or a JSearch key
/// (primary job tier disabled).
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub jsearch_api_key: Option<String>,
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            jsearch_api_key: std::env::var("JSEARCH_API_KEY").ok(),
            database_url: std::env::var("DATABASE_URL").ok(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            cache_ttl_secs: std::env::var("CACHE_TTL_SECS")
                .unwrap_or_else(|_| "1800".to_string())
                .parse::<u64>()
                .context("CACHE_TTL_SECS must be a number of seconds")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
