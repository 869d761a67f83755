//! Run-wide TLS verification decision.

/// Whether certificate verification is skipped for the rest of the run.
///
/// Created once per run and threaded by mutable reference through every
/// preflight. It can only move from "verify" to "skip": once the user agreed
/// to skip verification it stays that way until the run ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TlsDecision {
    skip_verification: bool,
}

impl TlsDecision {
    /// Starts the run with `skip_verification` preset (from configuration).
    pub fn new(skip_verification: bool) -> Self {
        Self { skip_verification }
    }

    pub fn skip_verification(&self) -> bool {
        self.skip_verification
    }

    /// Switches verification off for all later requests.
    pub fn allow_skip(&mut self) {
        self.skip_verification = true;
    }
}

/// Asks whether certificate verification may be skipped after a TLS failure.
///
/// Only consulted while the run's [`TlsDecision`] still verifies; after the
/// first acceptance the prompt is never shown again.
pub trait TlsSkipPrompt: Send + Sync {
    fn confirm_skip(&self, url: &str) -> bool;
}
