//! The per-URL result record.

use serde::Serialize;

use crate::config::{ERROR_TAG_SEPARATOR, UNKNOWN_CONTENT_TYPE};
use crate::parse::{extract_page_slug, PageMeta, ScopeMetrics};

/// Result of processing one URL.
///
/// Every record has the same fields whatever happened to the URL: a record
/// starts out fully defaulted and stages only overwrite what they measured.
/// Field order here is the column order of the output files.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRecord {
    /// Preflight status code; `None` when no HTTP response was ever received.
    pub http_code: Option<u16>,
    /// Normalized content type, or the preflight error tag.
    pub http_type: String,
    pub url: String,
    pub page_slug: String,
    /// Resolved content scope, or the fallback scope when none matched.
    pub scope_selector: Option<String>,
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub og_type: String,
    pub og_image: String,
    pub og_title: String,
    pub og_description: String,
    #[serde(rename = "scopeH1")]
    pub scope_h1: String,
    pub scope_heading_count: u32,
    pub scope_links_internal: u32,
    pub scope_links_external: u32,
    pub scope_image_count: u32,
    pub scope_images_missing_alt: u32,
    /// Reserved; always `None`.
    pub content_count: Option<u32>,
    /// Reserved; always `None`.
    pub content_ratio: Option<f64>,
    pub parent_url: String,
    /// `"; "`-joined tags of everything that went wrong; empty when nothing did.
    pub error: String,
}

impl PageRecord {
    /// Serialized field names, in output order.
    pub const FIELD_NAMES: [&'static str; 22] = [
        "httpCode",
        "httpType",
        "url",
        "pageSlug",
        "scopeSelector",
        "title",
        "description",
        "keywords",
        "ogType",
        "ogImage",
        "ogTitle",
        "ogDescription",
        "scopeH1",
        "scopeHeadingCount",
        "scopeLinksInternal",
        "scopeLinksExternal",
        "scopeImageCount",
        "scopeImagesMissingAlt",
        "contentCount",
        "contentRatio",
        "parentUrl",
        "error",
    ];

    /// A defaulted record for `url`. The slug is derived right away since it
    /// does not depend on fetching anything.
    pub fn new(url: &str) -> Self {
        Self {
            http_code: None,
            http_type: UNKNOWN_CONTENT_TYPE.to_string(),
            url: url.to_string(),
            page_slug: extract_page_slug(url),
            scope_selector: None,
            title: String::new(),
            description: String::new(),
            keywords: String::new(),
            og_type: String::new(),
            og_image: String::new(),
            og_title: String::new(),
            og_description: String::new(),
            scope_h1: String::new(),
            scope_heading_count: 0,
            scope_links_internal: 0,
            scope_links_external: 0,
            scope_image_count: 0,
            scope_images_missing_alt: 0,
            content_count: None,
            content_ratio: None,
            parent_url: String::new(),
            error: String::new(),
        }
    }

    /// Appends a tag to `error`.
    pub fn push_error(&mut self, tag: &str) {
        if !self.error.is_empty() {
            self.error.push_str(ERROR_TAG_SEPARATOR);
        }
        self.error.push_str(tag);
    }

    /// Replaces all tags with the critical fault tag.
    pub fn mark_critical(&mut self, kind: &str) {
        self.error = format!("Critical Orchestrator Error ({kind})");
    }

    pub fn apply_meta(&mut self, meta: PageMeta) {
        self.title = meta.title;
        self.description = meta.description;
        self.keywords = meta.keywords;
        self.og_type = meta.og_type;
        self.og_image = meta.og_image;
        self.og_title = meta.og_title;
        self.og_description = meta.og_description;
    }

    pub fn apply_scope(&mut self, selector: &str, metrics: ScopeMetrics) {
        self.scope_selector = Some(selector.to_string());
        self.scope_h1 = metrics.h1;
        self.scope_heading_count = metrics.heading_count;
        self.scope_links_internal = metrics.links.internal;
        self.scope_links_external = metrics.links.external;
        self.scope_image_count = metrics.image_count;
        self.scope_images_missing_alt = metrics.images_missing_alt;
    }
}
