//! Page-level extraction: title and meta tags.

use scraper::{Html, Selector};
use std::sync::LazyLock;

const TITLE_SELECTOR_STR: &str = "title";
const META_SELECTOR_STR: &str = "meta";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(TITLE_SELECTOR_STR, "TITLE_SELECTOR"));

static META_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe(META_SELECTOR_STR, "META_SELECTOR"));

/// Extracts the page title from an HTML document.
///
/// Returns the text of the first `<title>` element, trimmed, or an empty
/// string when there is none.
pub fn extract_title(document: &Html) -> String {
    match document.select(&TITLE_SELECTOR).next() {
        Some(element) => {
            let title = element.text().collect::<String>().trim().to_string();
            log::debug!("Extracted title: '{}'", title);
            title
        }
        None => {
            log::debug!("No title element found");
            String::new()
        }
    }
}

/// Extracts the `content` of a meta tag identified by `meta_name`.
///
/// A `<meta property="...">` match (Open Graph style) takes precedence over
/// a `<meta name="...">` match. The content is trimmed; a missing tag or a
/// tag without `content` yields an empty string.
pub fn extract_meta_content(document: &Html, meta_name: &str) -> String {
    let by_attr = |attr: &str| {
        document
            .select(&META_SELECTOR)
            .find(|element| element.value().attr(attr) == Some(meta_name))
    };

    match by_attr("property").or_else(|| by_attr("name")) {
        Some(element) => element
            .value()
            .attr("content")
            .map(|content| content.trim().to_string())
            .unwrap_or_default(),
        None => {
            log::debug!("Meta tag '{}' not found", meta_name);
            String::new()
        }
    }
}

/// Page-level metadata: fields that do not depend on the content scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
    pub keywords: String,
    pub og_type: String,
    pub og_image: String,
    pub og_title: String,
    pub og_description: String,
}

impl PageMeta {
    pub fn extract(document: &Html) -> Self {
        Self {
            title: extract_title(document),
            description: extract_meta_content(document, "description"),
            keywords: extract_meta_content(document, "keywords"),
            og_type: extract_meta_content(document, "og:type"),
            og_image: extract_meta_content(document, "og:image"),
            og_title: extract_meta_content(document, "og:title"),
            og_description: extract_meta_content(document, "og:description"),
        }
    }
}
