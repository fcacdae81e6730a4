use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub openai_model: Option<String>,
    pub gemini_model: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Provider keys are optional: without a usable OpenAI key the
    /// server runs in demo mode rather than refusing to start.
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            openai_model: env::var("OPENAI_MODEL").ok(),
            gemini_model: env::var("GEMINI_MODEL").ok(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            openai_api_key: None,
            gemini_api_key: None,
            openai_model: None,
            gemini_model: None,
        }
    }
}
