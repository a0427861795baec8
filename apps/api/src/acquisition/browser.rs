//! Headless-browser page fetcher driven over WebDriver.
//!
//! Each fetch owns its own browser session: connect, navigate, wait for
//! client-side rendering to settle, read the page source, then close the
//! session whether or not navigation succeeded.

use std::time::Duration;

use async_trait::async_trait;
use fantoccini::{wd::Capabilities, Client, ClientBuilder};
use serde_json::json;
use tracing::{debug, warn};

use super::{AcquisitionError, PageFetcher};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Chrome flags for an isolated, non-interactive session with no GPU or sandbox needs.
const CHROME_ARGS: [&str; 4] = [
    "--headless",
    "--disable-gpu",
    "--no-sandbox",
    "--disable-dev-shm-usage",
];

pub struct BrowserFetcher {
    webdriver_url: String,
    settle: Duration,
}

impl BrowserFetcher {
    pub fn new(webdriver_url: impl Into<String>, settle: Duration) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            settle,
        }
    }

    fn capabilities() -> Capabilities {
        let mut args: Vec<String> = CHROME_ARGS.iter().map(|a| a.to_string()).collect();
        args.push(format!("--user-agent={USER_AGENT}"));

        let mut caps = Capabilities::new();
        caps.insert("browserName".to_string(), json!("chrome"));
        caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
        caps
    }

    async fn open_session(&self) -> Result<Client, AcquisitionError> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(Self::capabilities());
        builder
            .connect(&self.webdriver_url)
            .await
            .map_err(|e| AcquisitionError::SessionInit(e.to_string()))
    }

    async fn render(&self, client: &Client, url: &str) -> Result<String, AcquisitionError> {
        client
            .goto(url)
            .await
            .map_err(|e| AcquisitionError::Navigation(e.to_string()))?;

        tokio::time::sleep(self.settle).await;

        client
            .source()
            .await
            .map_err(|e| AcquisitionError::PageSource(e.to_string()))
    }
}

#[async_trait]
impl PageFetcher for BrowserFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String, AcquisitionError> {
        let client = self.open_session().await?;
        debug!("Browser session opened for {}", url);

        let result = self.render(&client, url).await;

        if let Err(e) = client.close().await {
            warn!("Failed to close browser session for {}: {}", url, e);
        }

        result
    }
}
