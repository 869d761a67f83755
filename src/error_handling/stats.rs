//! Run statistics tracking.
//!
//! Counts how processing of each URL ended, one counter per [`PageOutcome`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::PageOutcome;

/// Per-outcome counters for one extraction run.
///
/// Uses atomic counters so it can be read from a progress reporter while the
/// run loop records outcomes. All outcomes are initialized to zero on
/// creation.
pub struct RunStats {
    outcomes: HashMap<PageOutcome, AtomicUsize>,
}

impl RunStats {
    pub fn new() -> Self {
        let mut outcomes = HashMap::new();
        for outcome in PageOutcome::iter() {
            outcomes.insert(outcome, AtomicUsize::new(0));
        }
        RunStats { outcomes }
    }

    /// Increment the counter for an outcome.
    pub fn record(&self, outcome: PageOutcome) {
        if let Some(counter) = self.outcomes.get(&outcome) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to record outcome {:?} which is not in the map. \
                 This indicates a bug in RunStats initialization.",
                outcome
            );
        }
    }

    /// Get the count for an outcome.
    ///
    /// Returns 0 if the outcome is not in the map (should never happen if properly initialized).
    pub fn get_count(&self, outcome: PageOutcome) -> usize {
        self.outcomes
            .get(&outcome)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Total number of processed URLs.
    pub fn total(&self) -> usize {
        PageOutcome::iter().map(|o| self.get_count(o)).sum()
    }

    /// Number of processed URLs whose record carries an error tag.
    pub fn total_with_issues(&self) -> usize {
        PageOutcome::iter()
            .filter(PageOutcome::has_issue)
            .map(|o| self.get_count(o))
            .sum()
    }
}

impl Default for RunStats {
    fn default() -> Self {
        Self::new()
    }
}
