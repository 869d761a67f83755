//! Scope-level extraction: headings and images.

use scraper::{ElementRef, Html, Selector};
use std::sync::LazyLock;

use super::links::{count_links, LinkCounts};

static H1_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe("h1", "H1_SELECTOR"));

static HEADING_SELECTOR: LazyLock<Selector> = LazyLock::new(|| {
    crate::utils::parse_selector_unsafe("h1, h2, h3, h4, h5, h6", "HEADING_SELECTOR")
});

static IMG_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe("img", "IMG_SELECTOR"));

/// Returns the first element matching the scope selector.
pub fn select_scope<'a>(document: &'a Html, scope: &Selector) -> Option<ElementRef<'a>> {
    document.select(scope).next()
}

/// Text of the first `<h1>` inside `scope`.
///
/// Text nodes are trimmed and joined with single spaces, so markup inside
/// the heading does not leave stray whitespace.
pub fn extract_h1(scope: ElementRef<'_>) -> String {
    scope
        .select(&H1_SELECTOR)
        .next()
        .map(|h1| {
            h1.text()
                .map(str::trim)
                .filter(|piece| !piece.is_empty())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .unwrap_or_default()
}

/// Number of `<h1>` to `<h6>` elements inside `scope`.
pub fn count_headings(scope: ElementRef<'_>) -> u32 {
    count(scope, &HEADING_SELECTOR)
}

pub fn count_images(scope: ElementRef<'_>) -> u32 {
    count(scope, &IMG_SELECTOR)
}

/// Number of images whose `alt` is missing or blank.
pub fn count_images_missing_alt(scope: ElementRef<'_>) -> u32 {
    let missing = scope
        .select(&IMG_SELECTOR)
        .filter(|img| img.value().attr("alt").map_or(true, |alt| alt.trim().is_empty()))
        .count();
    u32::try_from(missing).unwrap_or(u32::MAX)
}

fn count(scope: ElementRef<'_>, selector: &Selector) -> u32 {
    u32::try_from(scope.select(selector).count()).unwrap_or(u32::MAX)
}

/// Everything measured inside the content scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeMetrics {
    pub h1: String,
    pub heading_count: u32,
    pub links: LinkCounts,
    pub image_count: u32,
    pub images_missing_alt: u32,
}

impl ScopeMetrics {
    /// Measures the first element matching `scope`; zeros when nothing matches.
    pub fn collect(document: &Html, scope: &Selector, base_url: &str) -> Self {
        match select_scope(document, scope) {
            Some(element) => Self {
                h1: extract_h1(element),
                heading_count: count_headings(element),
                links: count_links(element, base_url),
                image_count: count_images(element),
                images_missing_alt: count_images_missing_alt(element),
            },
            None => {
                log::warn!("Scope element not found in {}; scoped fields left empty", base_url);
                Self::default()
            }
        }
    }
}
