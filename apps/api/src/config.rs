use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a sensible default except the upstream settings, which are
/// only required when remote synthesis is switched on.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base seed for per-session question selectors. Fixing it makes question
    /// sequences reproducible across runs.
    pub question_seed: u64,
    /// Swap the local synthesizer for the upstream model backend.
    pub enable_remote_synthesis: bool,
    pub upstream_url: Option<String>,
    pub upstream_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            question_seed: std::env::var("QUESTION_SEED")
                .unwrap_or_else(|_| "0".to_string())
                .parse::<u64>()
                .context("QUESTION_SEED must be a u64")?,
            enable_remote_synthesis: std::env::var("ENABLE_REMOTE_SYNTHESIS")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            upstream_url: std::env::var("UPSTREAM_URL").ok(),
            upstream_api_key: std::env::var("UPSTREAM_API_KEY").ok(),
        })
    }
}
