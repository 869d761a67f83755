//! Internal/external link classification.

use scraper::{ElementRef, Selector};
use std::sync::LazyLock;

static LINK_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| crate::utils::parse_selector_unsafe("a[href]", "LINK_SELECTOR"));

const IGNORED_PREFIXES: &[&str] = &["#", "mailto:", "tel:", "javascript:"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LinkCounts {
    pub internal: u32,
    pub external: u32,
}

/// Counts the links inside `scope` as internal or external to `base_url`.
///
/// Empty hrefs, fragments and `mailto:`/`tel:`/`javascript:` links are not
/// counted. A link is internal when its network location (host plus port,
/// compared case-insensitively) equals the page's, or when it has none and
/// either starts with `/` or does not start with `http` or `//`. Everything
/// else is external, the page's own host on a different port included.
pub fn count_links(scope: ElementRef<'_>, base_url: &str) -> LinkCounts {
    let base_netloc = netloc(base_url).to_lowercase();
    let mut counts = LinkCounts::default();

    for link in scope.select(&LINK_SELECTOR) {
        let href = link.value().attr("href").unwrap_or_default().trim();
        if href.is_empty() || IGNORED_PREFIXES.iter().any(|p| href.starts_with(p)) {
            continue;
        }

        if is_internal(href, &base_netloc) {
            counts.internal += 1;
        } else {
            counts.external += 1;
        }
    }

    log::debug!(
        "Counted {} internal and {} external links for {}",
        counts.internal,
        counts.external,
        base_url
    );
    counts
}

fn is_internal(href: &str, base_netloc: &str) -> bool {
    let link_netloc = netloc(href).to_lowercase();
    if !link_netloc.is_empty() {
        return link_netloc == base_netloc;
    }
    href.starts_with('/') || !(href.starts_with("http") || href.starts_with("//"))
}

/// Network location (`user@host:port`) of a URL reference, or `""` when the
/// reference has no authority part.
fn netloc(reference: &str) -> &str {
    let after_slashes = if let Some(rest) = reference.strip_prefix("//") {
        rest
    } else {
        match reference.split_once("://") {
            Some((scheme, rest)) if is_scheme(scheme) => rest,
            _ => return "",
        }
    };
    let end = after_slashes
        .find(['/', '?', '#'])
        .unwrap_or(after_slashes.len());
    &after_slashes[..end]
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_netloc() {
        assert_eq!(netloc("https://Example.com/path?q=1"), "Example.com");
        assert_eq!(netloc("http://example.com:8080"), "example.com:8080");
        assert_eq!(netloc("//cdn.example.net/lib.js"), "cdn.example.net");
        assert_eq!(netloc("/about"), "");
        assert_eq!(netloc("page.html"), "");
        assert_eq!(netloc("weird path://x"), "");
    }

    #[test]
    fn test_is_internal_heuristic() {
        let base = "example.com";
        assert!(is_internal("/about", base));
        assert!(is_internal("contact.html", base));
        assert!(is_internal("https://EXAMPLE.com/x", base));
        assert!(is_internal("www.other.com/page", base));
        assert!(!is_internal("https://other.com/", base));
        assert!(!is_internal("//example.org/x", base));
        assert!(!is_internal("https://example.com:8443/", base));
        assert!(!is_internal("http:relative", base));
    }
}
