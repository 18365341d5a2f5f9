//! Runtime configuration read from the environment (and `.env`).

use std::env;
use std::path::PathBuf;

use anyhow::Result;
use tracing::info;

use crate::error::GenerationError;
use crate::generation::GeminiClient;

const DEFAULT_LOG_LEVEL: &str = "info,quizgen=debug";
const DEFAULT_LOG_DIRECTORY: &str = "logs";

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini: GeminiConfig,
    pub logging: LoggingConfig,
}

/// Settings for the hosted generation model.
#[derive(Debug, Clone, Default)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub model: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub directory: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Config {
            gemini: GeminiConfig {
                api_key: get("GEMINI_API_KEY").or_else(|| get("API_KEY")),
                base_url: get("GEMINI_BASE_URL"),
                model: get("GEMINI_MODEL"),
            },
            logging: LoggingConfig {
                level: get("RUST_LOG").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
                directory: get("LOG_DIRECTORY")
                    .unwrap_or_else(|| DEFAULT_LOG_DIRECTORY.to_string())
                    .into(),
            },
        })
    }

    /// Log a summary of loaded configuration (without the key itself)
    pub fn log_summary(&self) {
        info!(
            api_key = %self.gemini.api_key.as_deref().map(mask_sensitive_data).unwrap_or_default(),
            model = ?self.gemini.model,
            base_url = ?self.gemini.base_url,
            log_level = %self.logging.level,
            log_directory = %self.logging.directory.display(),
            "Configuration summary"
        );
    }
}

impl GeminiConfig {
    /// Creates the client; a missing key is reported before any request is made.
    pub fn client(&self) -> Result<GeminiClient, GenerationError> {
        GeminiClient::new(
            self.api_key.clone(),
            self.base_url.clone(),
            self.model.clone(),
        )
    }
}

fn mask_sensitive_data(data: &str) -> String {
    let chars: Vec<char> = data.chars().collect();
    if chars.len() <= 8 {
        "*".repeat(chars.len())
    } else {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{}***{}", head, tail)
    }
}
