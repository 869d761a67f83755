//! Rendered page fetch.
//!
//! Pages are loaded in a real browser so client-side rendering has run
//! before anything is extracted. The pipeline only depends on the narrow
//! [`BrowserDriver`] contract; [`ChromiumDriver`] is the production driver.

mod chromium;

use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use futures::FutureExt;
use log::{debug, warn};

pub use chromium::{ChromiumDriver, ChromiumOptions};

use crate::config::{DEFAULT_PAGE_LOAD_TIMEOUT_SECS, READY_STATE_POLL_INTERVAL};

/// Browser automation interface used by [`render`].
///
/// A driver owns a single page that is reused for every URL of the run, so
/// calls are strictly sequential.
#[async_trait]
pub trait BrowserDriver: Send + Sync {
    /// Starts loading `url` in the driver's page.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Whether the current document finished loading.
    async fn is_document_ready(&self) -> Result<bool>;

    /// Serialized DOM of the current document.
    async fn page_source(&self) -> Result<String>;

    /// Closes the browser. Called exactly once, at the end of the run.
    async fn shutdown(&self) -> Result<()>;
}

/// Timing of the rendered fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Budget for navigation plus waiting for the document to be ready.
    pub load_timeout: Duration,
    /// Extra fixed wait after readiness, for pages that render late.
    pub post_load_wait: Option<Duration>,
    pub poll_interval: Duration,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            load_timeout: Duration::from_secs(DEFAULT_PAGE_LOAD_TIMEOUT_SECS),
            post_load_wait: None,
            poll_interval: READY_STATE_POLL_INTERVAL,
        }
    }
}

/// Loads `url` and returns the rendered DOM, or `None` on any failure.
///
/// Navigation and readiness polling share `load_timeout`. Driver errors and
/// timeouts are logged and reported as `None`; nothing propagates. An empty
/// page source is still a success.
pub async fn render(driver: &dyn BrowserDriver, url: &str, settings: &RenderSettings) -> Option<String> {
    let loaded = tokio::time::timeout(settings.load_timeout, async {
        driver.navigate(url).await?;
        while !driver.is_document_ready().await? {
            tokio::time::sleep(settings.poll_interval).await;
        }
        Ok::<(), anyhow::Error>(())
    })
    .await;

    match loaded {
        Ok(Ok(())) => debug!("Document ready for {}", url),
        Ok(Err(e)) => {
            warn!("Browser failed to load {}: {:#}", url, e);
            return None;
        }
        Err(_) => {
            warn!(
                "Timed out after {:?} waiting for {} to load",
                settings.load_timeout, url
            );
            return None;
        }
    }

    if let Some(wait) = settings.post_load_wait {
        debug!("Waiting {:?} after load for {}", wait, url);
        tokio::time::sleep(wait).await;
    }

    match driver.page_source().await {
        Ok(html) => Some(html),
        Err(e) => {
            warn!("Could not read page source for {}: {:#}", url, e);
            None
        }
    }
}

/// Runs `body` and then shuts the driver down, whatever the outcome.
///
/// A panic inside `body` is re-raised after the shutdown.
pub async fn with_driver<T>(driver: &dyn BrowserDriver, body: impl Future<Output = T>) -> T {
    let result = AssertUnwindSafe(body).catch_unwind().await;
    if let Err(e) = driver.shutdown().await {
        warn!("Browser shutdown failed: {:#}", e);
    }
    match result {
        Ok(value) => value,
        Err(panic) => std::panic::resume_unwind(panic),
    }
}
