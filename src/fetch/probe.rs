//! Preflight probe with retry and backoff.

use std::time::Duration;

use log::{debug, error, info, warn};

use super::client::{normalize_content_type, HeadClient};
use super::tls::{TlsDecision, TlsSkipPrompt};
use crate::config::{DEFAULT_REQUEST_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS, RETRY_BACKOFF_FACTOR};
use crate::error_handling::{backoff_delays, ProbeError, RequestFailure};

/// Retry budget and timing of the preflight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    /// Total number of attempts; 0 is treated as 1.
    pub max_retries: u32,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Unit of the exponential backoff; the n-th wait is `factor * 2^(n+1)`.
    pub backoff_factor: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_REQUEST_MAX_RETRIES,
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            backoff_factor: RETRY_BACKOFF_FACTOR,
        }
    }
}

/// Result of a preflight.
///
/// `status` is kept even when the probe failed, so a URL that answered 404
/// on every attempt still reports 404.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    pub status: Option<u16>,
    /// Normalized content type on success, the failure tag otherwise.
    pub result: Result<String, ProbeError>,
}

impl ProbeOutcome {
    /// Value for the record's `httpType`: the content type or the error tag.
    pub fn http_type(&self) -> String {
        match &self.result {
            Ok(content_type) => content_type.clone(),
            Err(e) => e.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    fn failed(status: Option<u16>, error: ProbeError) -> Self {
        Self {
            status,
            result: Err(error),
        }
    }
}

/// Probes `url` with HEAD requests until one succeeds or the budget is spent.
///
/// - 2xx/3xx: returns the status and normalized content type.
/// - 4xx/5xx: the status is captured, then the request is retried after a
///   backoff delay.
/// - TLS failure while verifying: if the run already skips verification the
///   request is retried at once without verification. Otherwise the prompt
///   decides: on acceptance the decision flips for the rest of the run and
///   the request is retried at once; on refusal the URL is abandoned with no
///   further attempts.
/// - Any other failure: retried after a backoff delay.
///
/// Every retry, including the immediate TLS ones, uses up one attempt.
pub async fn probe(
    client: &dyn HeadClient,
    prompt: &dyn TlsSkipPrompt,
    url: &str,
    decision: &mut TlsDecision,
    settings: &ProbeSettings,
) -> ProbeOutcome {
    let attempts = settings.max_retries.max(1);
    let mut delays = backoff_delays(settings.backoff_factor);
    let mut verify_tls = !decision.skip_verification();
    let mut captured_status: Option<u16> = None;
    let mut last_failure: Option<RequestFailure> = None;

    for attempt in 1..=attempts {
        debug!(
            "Preflight attempt {}/{} for {} (verify_tls={})",
            attempt, attempts, url, verify_tls
        );

        let failure = match client.head(url, settings.timeout, verify_tls).await {
            Ok(response) if response.status < 400 => {
                let content_type = normalize_content_type(response.content_type.as_deref());
                debug!("Preflight for {} succeeded: {} {}", url, response.status, content_type);
                return ProbeOutcome {
                    status: Some(response.status),
                    result: Ok(content_type),
                };
            }
            Ok(response) => RequestFailure::Status(response.status),
            Err(failure) => failure,
        };

        if let Some(code) = failure.status_code() {
            captured_status = Some(code);
        }

        if failure.is_tls() {
            error!("TLS error for {} on attempt {}: {}", url, attempt, failure);
            if !decision.skip_verification() {
                if prompt.confirm_skip(url) {
                    info!("TLS verification will be skipped for the rest of the run");
                    decision.allow_skip();
                } else {
                    warn!("TLS verification skip declined for {}", url);
                    return ProbeOutcome::failed(None, ProbeError::TlsSkipDeclined);
                }
            } else {
                warn!("Retrying {} with TLS verification skipped", url);
            }
            verify_tls = false;
            last_failure = Some(failure);
            continue;
        }

        warn!("Preflight for {} failed on attempt {}: {}", url, attempt, failure);
        last_failure = Some(failure);
        if attempt < attempts {
            if let Some(delay) = delays.next() {
                debug!("Waiting {:?} before retrying {}", delay, url);
                tokio::time::sleep(delay).await;
            }
        }
    }

    let error = match last_failure {
        Some(ref failure) if failure.is_tls() && decision.skip_verification() => {
            ProbeError::TlsRetriesExhausted
        }
        Some(ref failure) => ProbeError::RetriesExhausted {
            kind: failure.kind_name(),
        },
        None => ProbeError::RetriesExhausted {
            kind: "RequestError",
        },
    };
    error!("All {} preflight attempts failed for {}: {}", attempts, url, error);
    ProbeOutcome::failed(captured_status, error)
}
