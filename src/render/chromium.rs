//! Chromium driver using chromiumoxide.

use std::path::PathBuf;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use log::{debug, info};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::BrowserDriver;

/// Launch options for [`ChromiumDriver`].
#[derive(Debug, Clone)]
pub struct ChromiumOptions {
    pub headless: bool,
    pub window_width: u32,
    pub window_height: u32,
    pub user_agent: String,
    /// Browser executable; auto-detected when `None`.
    pub executable: Option<PathBuf>,
}

/// One Chromium process with a single reusable page.
pub struct ChromiumDriver {
    browser: Mutex<Browser>,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumDriver {
    /// Launches Chromium and opens the page used for every navigation.
    pub async fn launch(options: &ChromiumOptions) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(options.window_width, options.window_height)
            .arg("--disable-gpu")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions");
        if !options.headless {
            builder = builder.with_head();
        }
        if let Some(path) = &options.executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build browser config: {e}"))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .context("failed to launch Chromium")?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .context("failed to create new page")?;
        page.set_user_agent(options.user_agent.as_str())
            .await
            .context("failed to set user agent")?;

        info!(
            "Chromium launched ({}x{}, headless={})",
            options.window_width, options.window_height, options.headless
        );

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handler,
        })
    }
}

#[async_trait]
impl BrowserDriver for ChromiumDriver {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.page
            .goto(url)
            .await
            .with_context(|| format!("navigation to {url} failed"))?;
        Ok(())
    }

    async fn is_document_ready(&self) -> Result<bool> {
        let state: String = self
            .page
            .evaluate("document.readyState")
            .await
            .context("readyState evaluation failed")?
            .into_value()
            .context("readyState was not a string")?;
        Ok(state == "complete")
    }

    async fn page_source(&self) -> Result<String> {
        self.page.content().await.context("failed to read page content")
    }

    async fn shutdown(&self) -> Result<()> {
        let mut browser = self.browser.lock().await;
        browser.close().await.context("failed to close Chromium")?;
        browser.wait().await.context("failed waiting for Chromium to exit")?;
        info!("Chromium shut down");
        Ok(())
    }
}

impl Drop for ChromiumDriver {
    fn drop(&mut self) {
        self.handler.abort();
    }
}
