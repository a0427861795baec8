//! Content acquisition: turns a URL into plain visible text.
//!
//! Fetching is behind the `PageFetcher` trait: production uses a headless
//! browser (`BrowserFetcher`), tests use a stub. Text extraction is pure.

pub mod browser;
pub mod text;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};
use url::Url;

pub use browser::BrowserFetcher;
pub use text::extract_visible_text;

/// Marker that prefixes every in-band fetch failure string.
pub const FETCH_ERROR_MARKER: &str = "Error fetching";

/// Path appended to a job posting's origin to find the company page.
pub const ABOUT_PATH: &str = "/about";

#[derive(Debug, Error)]
pub enum AcquisitionError {
    #[error("could not start headless browser session: {0}")]
    SessionInit(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("could not capture page source: {0}")]
    PageSource(String),
}

/// Fetches the fully rendered HTML of a page.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, AcquisitionError>;
}

/// Result of one acquisition. Transient, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredPage {
    pub url: String,
    pub raw_text: String,
    /// In-band failure description, always starting with `FETCH_ERROR_MARKER`.
    pub fetch_error: Option<String>,
}

impl AcquiredPage {
    /// Converts into the extracted text or the failure description.
    pub fn into_result(self) -> Result<String, String> {
        match self.fetch_error {
            None => Ok(self.raw_text),
            Some(err) => Err(err),
        }
    }
}

/// Fetches `url` and extracts its visible text. Never fails: errors are carried in
/// `AcquiredPage::fetch_error`.
pub async fn acquire(fetcher: &dyn PageFetcher, url: &str) -> AcquiredPage {
    info!("Acquiring page: {}", url);

    match fetcher.fetch_html(url).await {
        Ok(html) => {
            let raw_text = extract_visible_text(&html);
            info!("Acquired {} characters of text from {}", raw_text.len(), url);
            AcquiredPage {
                url: url.to_string(),
                raw_text,
                fetch_error: None,
            }
        }
        Err(e) => {
            warn!("Acquisition of {} failed: {}", url, e);
            AcquiredPage {
                url: url.to_string(),
                raw_text: String::new(),
                fetch_error: Some(format!("{FETCH_ERROR_MARKER} {url}: {e}")),
            }
        }
    }
}

/// Derives the company "about" page from a job URL: scheme + host (+ port), path
/// discarded, `/about` appended. Returns `None` when the URL has no usable origin.
pub fn about_page_url(job_url: &str) -> Option<String> {
    let parsed = Url::parse(job_url).ok()?;
    parsed.host_str()?;
    let origin = parsed.origin();
    if !origin.is_tuple() {
        return None;
    }
    Some(format!("{}{}", origin.ascii_serialization(), ABOUT_PATH))
}
