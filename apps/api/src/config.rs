use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on resumes processed concurrently within one shortlist request.
    pub shortlist_concurrency: usize,
    pub fetch_timeout: Duration,
    pub fetch_max_retries: u32,
    pub max_resume_bytes: usize,
    pub llm_timeout: Duration,
    /// Sidecar hosting the fine-tuned causal LM. `/api/evaluate` is disabled when unset.
    pub perplexity_service_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let shortlist_concurrency: usize = parse_env_or("SHORTLIST_CONCURRENCY", 4)?;
        if shortlist_concurrency == 0 {
            anyhow::bail!("SHORTLIST_CONCURRENCY must be at least 1");
        }

        Ok(Config {
            gemini_api_key: require_env("GEMINI_API_KEY")?,
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_MODEL.to_string()),
            port: parse_env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            shortlist_concurrency,
            fetch_timeout: Duration::from_secs(parse_env_or("FETCH_TIMEOUT_SECS", 30)?),
            fetch_max_retries: parse_env_or("FETCH_MAX_RETRIES", 2)?,
            max_resume_bytes: parse_env_or("MAX_RESUME_BYTES", 10 * 1024 * 1024)?,
            llm_timeout: Duration::from_secs(parse_env_or("LLM_TIMEOUT_SECS", 60)?),
            perplexity_service_url: std::env::var("PERPLEXITY_SERVICE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}
