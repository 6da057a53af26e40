use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a sensible default for local use; the Anthropic key is
/// optional at startup and only required once prompt drafting is invoked.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_dir: PathBuf,
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            data_dir: std::env::var("DATA_DIR")
                .unwrap_or_else(|_| "data".to_string())
                .into(),
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}
