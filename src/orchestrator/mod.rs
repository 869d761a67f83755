//! Per-URL extraction pipeline.
//!
//! Sequences preflight, rendering, scope resolution and field extraction
//! for one URL and always hands back a complete [`PageRecord`]. Processing
//! runs as a small state machine:
//!
//! ```text
//! Start -> Probed -> Skipped                      -> Done
//!                 -> Rendering -> RenderFailed    -> Done
//!                              -> Extracting      -> Done
//! ```
//!
//! Failures never leave this module. Expected ones become tags in the
//! record's `error` field; unexpected faults (including panics) are caught at
//! the boundary and reported as a critical error while keeping the fields
//! captured so far.

mod record;

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use log::{debug, error, info, warn};
use scraper::Html;

pub use record::PageRecord;

use crate::config::{ExtractionSettings, TAG_RENDER_FAILED};
use crate::error_handling::{PageOutcome, PipelineError};
use crate::fetch::{probe, HeadClient, ProbeOutcome, TlsDecision, TlsSkipPrompt};
use crate::parse::{PageMeta, ScopeMetrics};
use crate::render::{render, BrowserDriver};
use crate::scope::ScopePriority;
use crate::utils::parse_selector;

/// Record for one URL plus where its processing ended.
#[derive(Debug, Clone)]
pub struct PageResult {
    pub record: PageRecord,
    pub outcome: PageOutcome,
}

enum Stage {
    Start,
    Probed(ProbeOutcome),
    Rendering,
    Extracting(String),
    Done(PageOutcome),
}

/// Everything needed to process URLs, borrowed for the duration of a run.
pub struct Pipeline<'a> {
    client: &'a dyn HeadClient,
    prompt: &'a dyn TlsSkipPrompt,
    driver: &'a dyn BrowserDriver,
    settings: &'a ExtractionSettings,
    scopes: &'a ScopePriority,
}

impl<'a> Pipeline<'a> {
    pub fn new(
        client: &'a dyn HeadClient,
        prompt: &'a dyn TlsSkipPrompt,
        driver: &'a dyn BrowserDriver,
        settings: &'a ExtractionSettings,
        scopes: &'a ScopePriority,
    ) -> Self {
        Self {
            client,
            prompt,
            driver,
            settings,
            scopes,
        }
    }

    /// Processes one URL. Never fails: every outcome is described by the
    /// returned record.
    pub async fn extract(&self, url: &str, decision: &mut TlsDecision) -> PageResult {
        let mut record = PageRecord::new(url);

        let result = AssertUnwindSafe(self.run_stages(url, decision, &mut record))
            .catch_unwind()
            .await;

        let outcome = match result {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(e)) => {
                error!("Critical error while processing {}: {}", url, e);
                record.mark_critical(e.kind());
                PageOutcome::CriticalFault
            }
            Err(panic) => {
                error!(
                    "Critical error while processing {}: panicked: {}",
                    url,
                    panic_message(panic.as_ref())
                );
                record.mark_critical("Panic");
                PageOutcome::CriticalFault
            }
        };

        info!("Finished {} ({})", url, outcome.as_str());
        PageResult { record, outcome }
    }

    async fn run_stages(
        &self,
        url: &str,
        decision: &mut TlsDecision,
        record: &mut PageRecord,
    ) -> Result<PageOutcome, PipelineError> {
        let mut stage = Stage::Start;
        loop {
            stage = match stage {
                Stage::Start => {
                    let outcome =
                        probe(self.client, self.prompt, url, decision, &self.settings.probe).await;
                    record.http_code = outcome.status;
                    record.http_type = outcome.http_type();
                    debug!(
                        "Probed {}: code={:?} type={}",
                        url, record.http_code, record.http_type
                    );
                    Stage::Probed(outcome)
                }
                Stage::Probed(outcome) => match outcome.result {
                    Err(e) => {
                        warn!("Skipping {}: {}", url, e);
                        record.push_error(&e.to_string());
                        Stage::Done(PageOutcome::Skipped)
                    }
                    Ok(content_type) if !is_html(&content_type) => {
                        warn!("Skipping {}: content type {} is not HTML", url, content_type);
                        record.push_error(&format!("Non-HTML content ({content_type})"));
                        Stage::Done(PageOutcome::Skipped)
                    }
                    Ok(_) => Stage::Rendering,
                },
                Stage::Rendering => {
                    debug!("Rendering {}", url);
                    match render(self.driver, url, &self.settings.render).await {
                        Some(html) => Stage::Extracting(html),
                        None => {
                            warn!("{}: {}", TAG_RENDER_FAILED, url);
                            record.push_error(TAG_RENDER_FAILED);
                            Stage::Done(PageOutcome::RenderFailed)
                        }
                    }
                }
                Stage::Extracting(html) => Stage::Done(self.extract_fields(url, &html, record)?),
                Stage::Done(outcome) => return Ok(outcome),
            };
        }
    }

    /// Runs every extractor over the rendered page. Page-level fields do not
    /// depend on the scope; scoped fields fall back to the fallback scope when
    /// no priority selector matches.
    fn extract_fields(
        &self,
        url: &str,
        html: &str,
        record: &mut PageRecord,
    ) -> Result<PageOutcome, PipelineError> {
        let document = Html::parse_document(html);
        record.apply_meta(PageMeta::extract(&document));

        let (scope, outcome) = match self.scopes.resolve(&document) {
            Some(selector) => (selector, PageOutcome::Extracted),
            None => {
                let fallback = self.settings.fallback_scope.as_str();
                warn!(
                    "No content scope matched for {}; analysing {} instead",
                    url, fallback
                );
                record.push_error(&format!(
                    "No primary semantic content tag found; analysis performed on {fallback}"
                ));
                (fallback, PageOutcome::ExtractedWithFallback)
            }
        };

        let parsed = parse_selector(scope).map_err(|reason| PipelineError::InvalidFallbackScope {
            selector: scope.to_string(),
            reason,
        })?;
        record.apply_scope(scope, ScopeMetrics::collect(&document, &parsed, url));
        Ok(outcome)
    }
}

fn is_html(content_type: &str) -> bool {
    content_type.to_lowercase().contains("html")
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

#[cfg(test)]
mod tests;
