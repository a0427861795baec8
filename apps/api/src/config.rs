use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::llm_client::{DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Application configuration loaded from environment variables.
/// Every variable is optional; unset ones take the defaults below.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub profile_path: PathBuf,
    pub settings_path: PathBuf,
    pub cover_letters_dir: PathBuf,
    pub webdriver_url: String,
    /// Seconds to wait after navigation for client-side rendering.
    pub page_settle_secs: u64,
    pub llm_base_url: String,
    pub llm_model: String,
    pub cors_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8000,
            rust_log: "info".to_string(),
            profile_path: PathBuf::from("userInfo.json"),
            settings_path: PathBuf::from("settings.json"),
            cover_letters_dir: PathBuf::from("cover_letters"),
            webdriver_url: "http://localhost:9515".to_string(),
            page_settle_secs: 5,
            llm_base_url: DEFAULT_BASE_URL.to_string(),
            llm_model: DEFAULT_MODEL.to_string(),
            cors_origins: vec!["null".to_string(), "http://localhost:3000".to_string()],
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        Ok(Config {
            port: match lookup("PORT") {
                Some(v) => v.parse::<u16>().context("PORT must be a valid port number")?,
                None => defaults.port,
            },
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            profile_path: lookup("PROFILE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.profile_path),
            settings_path: lookup("SETTINGS_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.settings_path),
            cover_letters_dir: lookup("COVER_LETTERS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cover_letters_dir),
            webdriver_url: lookup("WEBDRIVER_URL").unwrap_or(defaults.webdriver_url),
            page_settle_secs: match lookup("PAGE_SETTLE_SECS") {
                Some(v) => v
                    .parse::<u64>()
                    .context("PAGE_SETTLE_SECS must be a whole number of seconds")?,
                None => defaults.page_settle_secs,
            },
            llm_base_url: lookup("LLM_BASE_URL").unwrap_or(defaults.llm_base_url),
            llm_model: lookup("LLM_MODEL").unwrap_or(defaults.llm_model),
            cors_origins: match lookup("CORS_ORIGINS") {
                Some(v) => v
                    .split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect(),
                None => defaults.cors_origins,
            },
        })
    }
}
