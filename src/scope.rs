//! Content scope resolution.
//!
//! Picks the region of a page treated as its main content. Candidates are
//! tried in priority order; the first one that matches wins. `article` is
//! special: pages often carry several (teasers, related posts), so it is only
//! accepted when exactly one exists.

use log::{debug, warn};
use scraper::{Html, Selector};

use crate::config::UNIQUE_SCOPE_SELECTOR;
use crate::utils::parse_selector;

/// One entry of the priority list.
#[derive(Debug, Clone)]
pub enum ScopeRule {
    /// Accepted only when exactly one element matches.
    Unique { selector: String, parsed: Selector },
    /// Accepted when at least one element matches.
    FirstMatch { selector: String, parsed: Selector },
}

impl ScopeRule {
    fn new(selector: &str) -> Result<Self, String> {
        let parsed = parse_selector(selector)?;
        let selector = selector.to_string();
        if selector.trim().eq_ignore_ascii_case(UNIQUE_SCOPE_SELECTOR) {
            Ok(ScopeRule::Unique { selector, parsed })
        } else {
            Ok(ScopeRule::FirstMatch { selector, parsed })
        }
    }

    pub fn selector(&self) -> &str {
        match self {
            ScopeRule::Unique { selector, .. } | ScopeRule::FirstMatch { selector, .. } => selector,
        }
    }

    fn accepts(&self, document: &Html) -> bool {
        match self {
            ScopeRule::Unique { parsed, .. } => document.select(parsed).take(2).count() == 1,
            ScopeRule::FirstMatch { parsed, .. } => document.select(parsed).next().is_some(),
        }
    }
}

/// Ordered scope candidates, built once per run from configuration.
#[derive(Debug, Clone, Default)]
pub struct ScopePriority {
    rules: Vec<ScopeRule>,
}

impl ScopePriority {
    /// Builds the priority list. Selectors that fail to parse are logged and
    /// left out.
    pub fn from_selectors<S: AsRef<str>>(selectors: &[S]) -> Self {
        let rules = selectors
            .iter()
            .filter_map(|s| {
                let s = s.as_ref();
                ScopeRule::new(s)
                    .map_err(|e| warn!("Skipping invalid scope selector '{}': {}", s, e))
                    .ok()
            })
            .collect();
        Self { rules }
    }

    pub fn rules(&self) -> &[ScopeRule] {
        &self.rules
    }

    /// Returns the first candidate accepted by `document`, if any.
    pub fn resolve(&self, document: &Html) -> Option<&str> {
        let resolved = self
            .rules
            .iter()
            .find(|rule| rule.accepts(document))
            .map(ScopeRule::selector);
        match resolved {
            Some(selector) => debug!("Content scope resolved to '{}'", selector),
            None => debug!("No content scope candidate matched"),
        }
        resolved
    }
}
