//! HTML field extraction.
//!
//! Stateless extractors over a rendered DOM snapshot. Page-level fields
//! (title, meta tags) read the whole document; scope-level fields (headings,
//! links, images) read only the resolved content scope. Every extractor
//! returns an empty string or zero when there is nothing to find.
//!
//! All parsing is done using CSS selectors via the `scraper` crate.

mod content;
mod links;
mod meta;
mod slug;

// Re-export public API
pub use content::{
    count_headings, count_images, count_images_missing_alt, extract_h1, select_scope,
    ScopeMetrics,
};
pub use links::{count_links, LinkCounts};
pub use meta::{extract_meta_content, extract_title, PageMeta};
pub use slug::extract_page_slug;

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
