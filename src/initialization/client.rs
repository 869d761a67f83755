//! HTTP client initialization.

use crate::error_handling::InitializationError;
use crate::fetch::ReqwestHeadClient;

/// Initializes the preflight HTTP client.
///
/// Builds both the verifying and the non-verifying client up front, so a
/// TLS skip granted mid-run never needs to construct anything.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if client creation fails.
pub fn init_client(user_agent: &str) -> Result<ReqwestHeadClient, InitializationError> {
    log::debug!("Initializing HTTP client with user agent '{}'", user_agent);
    Ok(ReqwestHeadClient::new(user_agent)?)
}
