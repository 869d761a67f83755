//! URL validation.

use log::warn;

/// Maximum URL length (2048 characters), matching common browser and server limits.
const MAX_URL_LENGTH: usize = 2048;

/// Validates an input URL.
///
/// Only syntactically valid `http`/`https` URLs no longer than
/// `MAX_URL_LENGTH` are accepted. Unlike a browser address bar, a missing
/// scheme is not filled in: such lines are rejected. Logs a warning and
/// returns `None` for anything rejected.
pub fn validate_url(url: &str) -> Option<String> {
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping URL exceeding maximum length ({} > {}): {}...",
            url.len(),
            MAX_URL_LENGTH,
            url.chars().take(50).collect::<String>()
        );
        return None;
    }

    match url::Url::parse(url) {
        Ok(parsed) => match parsed.scheme() {
            "http" | "https" => Some(url.to_string()),
            other => {
                warn!("Skipping URL with unsupported scheme '{}': {}", other, url);
                None
            }
        },
        Err(e) => {
            warn!("Skipping invalid URL '{}': {}", url, e);
            None
        }
    }
}
