use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::info;

use super::{Profile, ProfileUpdate};

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("failed to access profile file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("profile file {path} is not valid JSON: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// JSON-file backed profile storage. Absence of the file is a valid state.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path).await.is_ok()
    }

    /// Loads the profile, or `None` when no profile has been stored yet.
    pub async fn load(&self) -> Result<Option<Profile>, ProfileError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ProfileError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|source| ProfileError::Malformed {
                path: self.path.clone(),
                source,
            })
    }

    /// Overwrites the stored profile with indented UTF-8 JSON.
    pub async fn save(&self, profile: &Profile) -> Result<(), ProfileError> {
        let io_err = |source| ProfileError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await.map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(profile).map_err(|source| {
            ProfileError::Malformed {
                path: self.path.clone(),
                source,
            }
        })?;
        fs::write(&self.path, json).await.map_err(io_err)?;

        info!("Profile written to {}", self.path.display());
        Ok(())
    }

    /// Applies a partial update onto the stored profile (or an empty one) and saves it.
    pub async fn merge(&self, update: ProfileUpdate) -> Result<Profile, ProfileError> {
        let mut profile = self.load().await?.unwrap_or_default();
        update.apply_to(&mut profile);
        self.save(&profile).await?;
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> ProfileStore {
        ProfileStore::new(dir.path().join("userInfo.json"))
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(!store.exists().await);
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_then_load_preserves_profile() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let profile = Profile {
            first_name: Some("Ada".to_string()),
            skills: vec!["Rust".to_string(), "SQL".to_string()],
            ..Profile::default()
        };

        store.save(&profile).await.unwrap();

        assert!(store.exists().await);
        assert_eq!(store.load().await.unwrap(), Some(profile));
    }

    #[tokio::test]
    async fn test_saved_file_is_indented_json() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save(&Profile::default()).await.unwrap();

        let raw = std::fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("{\n  \""));
        assert!(raw.contains("\"personal_note\": null"));
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{ not json").unwrap();

        let err = store.load().await.unwrap_err();
        assert!(matches!(err, ProfileError::Malformed { .. }));
    }

    #[tokio::test]
    async fn test_merge_creates_profile_when_absent() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        let update = ProfileUpdate {
            city: Some("Lisbon".to_string()),
            ..ProfileUpdate::default()
        };

        let merged = store.merge(update).await.unwrap();

        assert_eq!(merged.city.as_deref(), Some("Lisbon"));
        assert_eq!(store.load().await.unwrap(), Some(merged));
    }

    #[tokio::test]
    async fn test_save_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileStore::new(dir.path().join("nested/data/userInfo.json"));
        store.save(&Profile::default()).await.unwrap();
        assert!(store.exists().await);
    }
}
