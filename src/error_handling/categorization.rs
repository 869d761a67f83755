//! Error categorization and retry backoff.
//!
//! This module turns `reqwest` failures into preflight failure kinds and
//! builds the backoff schedule used between preflight attempts.

use std::error::Error as StdError;
use std::time::Duration;
use tokio_retry::strategy::ExponentialBackoff;

use super::types::RequestFailure;

/// Creates the exponential backoff schedule between preflight attempts.
///
/// The n-th delay (0-based) is `factor * RETRY_BACKOFF_BASE^(n + 1)`, so the
/// default factor of 500ms yields 1s, 2s, 4s, ... The iterator is unbounded;
/// the caller stops pulling once its attempt budget is spent.
pub fn backoff_delays(factor: Duration) -> impl Iterator<Item = Duration> {
    let factor_ms = u64::try_from(factor.as_millis()).unwrap_or(u64::MAX);
    ExponentialBackoff::from_millis(crate::config::RETRY_BACKOFF_BASE).factor(factor_ms)
}

/// Categorizes a `reqwest::Error` into a [`RequestFailure`].
///
/// Certificate failures surface as connect errors in `reqwest`, but the
/// preflight has to treat them separately so it can offer to skip
/// verification. A failure counts as TLS when a `rustls::Error` is found in
/// the source chain, or when it is a connect error whose causes mention a
/// certificate. The top-level message is never matched: it embeds the URL.
pub fn classify_reqwest_error(error: &reqwest::Error) -> RequestFailure {
    let message = describe_chain(error);

    if let Some(status) = error.status() {
        if status.is_client_error() || status.is_server_error() {
            return RequestFailure::Status(status.as_u16());
        }
    }

    if error.is_timeout() {
        RequestFailure::Timeout(message)
    } else if has_rustls_cause(error)
        || (error.is_connect() && error.source().is_some_and(mentions_tls))
    {
        RequestFailure::Tls(message)
    } else if error.is_connect() {
        RequestFailure::Connect(message)
    } else {
        RequestFailure::Other(message)
    }
}

/// Joins the error and all of its sources into one message.
fn describe_chain(error: &(dyn StdError + 'static)) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn has_rustls_cause(error: &(dyn StdError + 'static)) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(error);
    while let Some(cause) = current {
        if cause.downcast_ref::<rustls::Error>().is_some() {
            return true;
        }
        // rustls errors reach hyper wrapped in io::Error, whose source() skips
        // the wrapped value.
        if let Some(io_err) = cause.downcast_ref::<std::io::Error>() {
            if io_err
                .get_ref()
                .is_some_and(|inner| inner.downcast_ref::<rustls::Error>().is_some())
            {
                return true;
            }
        }
        current = cause.source();
    }
    false
}

/// Whether `cause` or anything below it talks about certificates or TLS.
fn mentions_tls(cause: &(dyn StdError + 'static)) -> bool {
    let lowered = describe_chain(cause).to_lowercase();
    lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl")
}
