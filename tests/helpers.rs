// Shared test helpers.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use page_details::fetch::{ProbeSettings, TlsSkipPrompt};
use page_details::PageRecord;

/// TLS prompt with a fixed answer that counts how often it was asked.
#[allow(dead_code)] // Used by other test files
pub struct FixedPrompt {
    answer: bool,
    asked: AtomicUsize,
}

#[allow(dead_code)]
impl FixedPrompt {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

impl TlsSkipPrompt for FixedPrompt {
    fn confirm_skip(&self, _url: &str) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

/// Probe settings without backoff delays so retry tests run fast.
#[allow(dead_code)]
pub fn fast_probe_settings(max_retries: u32) -> ProbeSettings {
    ProbeSettings {
        max_retries,
        timeout: Duration::from_secs(5),
        backoff_factor: Duration::ZERO,
    }
}

/// A record as the pipeline would produce for a successfully extracted page.
#[allow(dead_code)]
pub fn extracted_record(url: &str, title: &str) -> PageRecord {
    let mut record = PageRecord::new(url);
    record.http_code = Some(200);
    record.http_type = "text/html".to_string();
    record.scope_selector = Some("main".to_string());
    record.title = title.to_string();
    record.scope_h1 = title.to_string();
    record.scope_heading_count = 3;
    record.scope_links_internal = 5;
    record.scope_links_external = 2;
    record.scope_image_count = 4;
    record.scope_images_missing_alt = 1;
    record
}
