use anyhow::{Context, Result};
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
/// Startup fails if the API credential is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub anthropic_api_key: String,
    pub anthropic_model: String,
    /// Directory holding the flat-file content catalog
    /// (`top10_metadata.json` plus per-video article/insights files).
    pub catalog_dir: PathBuf,
    /// Directory stage artifacts are written into.
    pub artifact_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            anthropic_model: std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| crate::llm_client::DEFAULT_MODEL.to_string()),
            catalog_dir: env_path("CATALOG_DIR"),
            artifact_dir: env_path("ARTIFACT_DIR"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Optional path variable, defaulting to the working directory.
fn env_path(key: &str) -> PathBuf {
    std::env::var(key)
        .unwrap_or_else(|_| ".".to_string())
        .into()
}
