//! Test doubles for the pipeline's external collaborators.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::acquisition::{AcquisitionError, PageFetcher};
use crate::config::Config;
use crate::llm_client::{Gateway, LanguageModel, LlmError};
use crate::profile::ProfileStore;
use crate::render::{DocumentRenderer, RenderError};
use crate::session::SessionState;
use crate::settings::SettingsStore;
use crate::state::AppState;

/// Serves canned HTML per URL; unknown URLs fail with a navigation error.
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.requested.lock().unwrap().len()
    }

    pub fn requested_urls(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for StubFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, AcquisitionError> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| AcquisitionError::Navigation(format!("no such page: {url}")))
    }
}

/// Replays queued responses in order and records every prompt it receives.
/// Once the queue is empty every call fails.
pub struct StubModel {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl StubModel {
    pub fn with_responses(responses: Vec<Result<String, LlmError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for StubModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(LlmError::EmptyContent))
    }
}

/// Writes the text as-is to the destination and records each render.
#[derive(Default)]
pub struct RecordingRenderer {
    renders: Mutex<Vec<(PathBuf, String)>>,
}

impl RecordingRenderer {
    pub fn renders(&self) -> Vec<(PathBuf, String)> {
        self.renders.lock().unwrap().clone()
    }
}

impl DocumentRenderer for RecordingRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn render_to_file(&self, text: &str, path: &Path) -> Result<(), RenderError> {
        std::fs::write(path, text).map_err(|source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.renders
            .lock()
            .unwrap()
            .push((path.to_path_buf(), text.to_string()));
        Ok(())
    }
}

/// App state whose files all live under `dir`, wired to the given doubles.
pub fn test_state(
    dir: &Path,
    fetcher: Arc<StubFetcher>,
    model: Arc<StubModel>,
    renderer: Arc<RecordingRenderer>,
) -> AppState {
    let config = Config {
        profile_path: dir.join("userInfo.json"),
        settings_path: dir.join("settings.json"),
        cover_letters_dir: dir.join("cover_letters"),
        ..Config::default()
    };
    AppState {
        profiles: ProfileStore::new(config.profile_path.clone()),
        settings: SettingsStore::new(config.settings_path.clone()),
        config,
        gateway: Gateway::new(model),
        fetcher,
        renderer,
        session: Arc::new(tokio::sync::Mutex::new(SessionState::new())),
    }
}
