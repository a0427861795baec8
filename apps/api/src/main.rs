mod acquisition;
mod analysis;
mod config;
mod cover_letter;
mod errors;
mod llm_client;
mod profile;
mod render;
mod routes;
mod session;
mod settings;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::acquisition::BrowserFetcher;
use crate::config::Config;
use crate::llm_client::{Gateway, LlmClient};
use crate::profile::ProfileStore;
use crate::render::{PageConfig, PdfRenderer};
use crate::routes::{build_router, cors_layer};
use crate::session::SessionState;
use crate::settings::SettingsStore;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Coverly API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM gateway from the stored credential
    let settings = SettingsStore::new(config.settings_path.clone());
    let stored = settings.load().await?;
    if !stored.is_configured() {
        warn!(
            "No API key configured in {}; set one via POST /api/settings",
            settings.path().display()
        );
    }
    let llm = LlmClient::with_base_url(&stored.api_key, &config.llm_base_url, &config.llm_model)?;
    let gateway = Gateway::new(Arc::new(llm));
    info!("LLM gateway initialized (model: {})", config.llm_model);

    // Initialize page fetcher (one WebDriver session per fetch)
    let fetcher = BrowserFetcher::new(
        config.webdriver_url.clone(),
        Duration::from_secs(config.page_settle_secs),
    );
    info!(
        "Page fetcher using WebDriver at {} (settle {}s)",
        config.webdriver_url, config.page_settle_secs
    );

    let profiles = ProfileStore::new(config.profile_path.clone());
    if !profiles.exists().await {
        info!(
            "No profile at {} yet; upload a resume to create one",
            profiles.path().display()
        );
    }

    // Build app state
    let state = AppState {
        gateway,
        fetcher: Arc::new(fetcher),
        renderer: Arc::new(PdfRenderer::new(PageConfig::default())),
        profiles,
        settings,
        session: Arc::new(Mutex::new(SessionState::new())),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
