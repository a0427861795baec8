use std::sync::Arc;

use tokio::sync::Mutex;

use crate::acquisition::PageFetcher;
use crate::config::Config;
use crate::llm_client::{Gateway, LlmClient, LlmError};
use crate::profile::ProfileStore;
use crate::render::DocumentRenderer;
use crate::session::SessionState;
use crate::settings::SettingsStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Hot-swappable model client; replaced whenever the API key changes.
    pub gateway: Gateway,
    pub fetcher: Arc<dyn PageFetcher>,
    pub renderer: Arc<dyn DocumentRenderer>,
    pub profiles: ProfileStore,
    pub settings: SettingsStore,
    /// Held for the whole of each pipeline operation, so analysis and generation
    /// requests run one at a time.
    pub session: Arc<Mutex<SessionState>>,
}

impl AppState {
    /// Builds a model client for `api_key` against the configured service.
    pub fn llm_client_for(&self, api_key: &str) -> Result<LlmClient, LlmError> {
        LlmClient::with_base_url(api_key, &self.config.llm_base_url, &self.config.llm_model)
    }
}
