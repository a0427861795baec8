//! Model-service credential, persisted as a small JSON document.

pub mod handlers;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::fs;
use tracing::info;

/// Stored when no key has been configured yet.
pub const PLACEHOLDER_API_KEY: &str = "your_default_api_key";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to access settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("settings file {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "placeholder_key")]
    pub api_key: String,
}

fn placeholder_key() -> String {
    PLACEHOLDER_API_KEY.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: placeholder_key(),
        }
    }
}

impl Settings {
    pub fn is_configured(&self) -> bool {
        let key = self.api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    /// The key with everything but its last four characters hidden.
    /// Empty when no key is configured.
    pub fn masked_api_key(&self) -> String {
        if !self.is_configured() {
            return String::new();
        }
        let chars: Vec<char> = self.api_key.trim().chars().collect();
        let visible = chars.len().saturating_sub(4);
        if visible == 0 {
            return "****".to_string();
        }
        let tail: String = chars[visible..].iter().collect();
        format!("{}{}", "*".repeat(visible.min(20)), tail)
    }
}

/// JSON-file backed settings. A missing file means "not configured".
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Settings, SettingsError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
            Err(source) => {
                return Err(SettingsError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content).map_err(|source| SettingsError::Malformed {
            path: self.path.clone(),
            source,
        })
    }

    pub async fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let io_err = |source| SettingsError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(settings).map_err(|source| {
            SettingsError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).await.map_err(io_err)?;

        info!("Settings written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(key: &str) -> Settings {
        Settings {
            api_key: key.to_string(),
        }
    }

    #[test]
    fn test_placeholder_is_not_configured() {
        assert!(!Settings::default().is_configured());
        assert!(!settings("  ").is_configured());
        assert!(settings("sk-live-1234").is_configured());
    }

    #[test]
    fn test_masked_key_shows_last_four() {
        assert_eq!(settings("sk-abcdef1234").masked_api_key(), "*********1234");
        assert_eq!(settings("abc").masked_api_key(), "****");
        assert_eq!(Settings::default().masked_api_key(), "");
    }

    #[tokio::test]
    async fn test_missing_file_loads_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().await.unwrap(), Settings::default());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));

        store.save(&settings("sk-new")).await.unwrap();

        assert_eq!(store.load().await.unwrap().api_key, "sk-new");
        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "{\n  \"api_key\": \"sk-new\"\n}");
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        std::fs::write(store.path(), "api_key=oops").unwrap();
        assert!(matches!(
            store.load().await.unwrap_err(),
            SettingsError::Malformed { .. }
        ));
    }
}
