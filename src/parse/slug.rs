//! Page slug derivation.

use url::Url;

/// Derives a short page identifier from the URL path.
///
/// - `homepage` for an empty path or `/`
/// - otherwise the last path segment, ignoring trailing slashes
/// - `index` if nothing is left after trimming (a path of only slashes)
/// - `unknown` when the URL cannot be parsed
///
/// The segment is taken from the path as written: it is not percent-encoded
/// and `.`/`..` segments are not resolved.
pub fn extract_page_slug(url: &str) -> String {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::warn!("Cannot derive page slug from '{}': {}", url, e);
            return "unknown".to_string();
        }
    };

    let path = raw_path(url.trim()).unwrap_or_else(|| parsed.path());
    if path.is_empty() || path == "/" {
        return "homepage".to_string();
    }

    match path.trim_end_matches('/').rsplit('/').next() {
        Some(slug) if !slug.is_empty() => slug.to_string(),
        _ => "index".to_string(),
    }
}

/// Path component of a `scheme://authority/path?query#fragment` URL,
/// exactly as it appears in the text.
fn raw_path(url: &str) -> Option<&str> {
    let (_, rest) = url.split_once("://")?;
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    Some(rest.find('/').map_or("", |start| &rest[start..]))
}
