//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the run's shared resources:
//! - Logger
//! - TLS crypto provider
//! - Preflight HTTP client
//! - Browser driver
//! - User agent selection

mod browser;
mod client;
mod logger;

use rand::seq::IndexedRandom;
use rustls::crypto::{ring::default_provider, CryptoProvider};

use crate::config::DEFAULT_USER_AGENT;

// Re-export public API
pub use browser::init_browser;
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes the crypto provider for TLS operations.
///
/// Configures the global crypto provider for `rustls`. This must be called before
/// any TLS connections are established.
pub fn init_crypto_provider() {
    // The return value is ignored because reinstalling the provider is harmless
    let _ = CryptoProvider::install_default(default_provider());
}

/// Picks the user agent for this run at random from the configured list.
pub fn choose_user_agent(user_agents: &[String]) -> String {
    user_agents
        .choose(&mut rand::rng())
        .cloned()
        .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string())
}
