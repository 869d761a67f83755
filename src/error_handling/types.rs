//! Error type definitions.
//!
//! This module defines the errors and outcome categories used throughout the
//! application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// Error launching or configuring the browser.
    #[error("Browser initialization error: {0}")]
    BrowserError(String),
}

/// Problem with the optional settings file.
///
/// None of these stop a run: the caller logs them and continues with the
/// default settings.
#[derive(Error, Debug)]
pub enum ConfigFileError {
    /// The settings file does not exist.
    #[error("{} not found", path.display())]
    NotFound { path: std::path::PathBuf },

    /// The settings file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    /// The settings file is not valid YAML or has wrongly typed values.
    #[error("Error parsing {}: {source}", path.display())]
    Parse {
        path: std::path::PathBuf,
        source: serde_yaml::Error,
    },
}

/// Classified failure of a single preflight (HEAD) attempt.
///
/// The HTTP client reports transport failures; the prober turns 4xx/5xx
/// responses into [`RequestFailure::Status`] itself so the status code is
/// never lost.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestFailure {
    /// The server answered with a 4xx/5xx status.
    #[error("HTTP error status {0}")]
    Status(u16),

    /// Certificate verification (or another TLS handshake step) failed.
    #[error("TLS error: {0}")]
    Tls(String),

    /// No response within the request timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The connection could not be established (DNS, refused, reset).
    #[error("Connection error: {0}")]
    Connect(String),

    /// Anything else the client reported.
    #[error("Request error: {0}")]
    Other(String),
}

impl RequestFailure {
    /// Name of the failure class as written in `Request Error (<kind>)` tags.
    pub fn kind_name(&self) -> &'static str {
        match self {
            RequestFailure::Status(_) => "HTTPError",
            RequestFailure::Tls(_) => "SSLError",
            RequestFailure::Timeout(_) => "Timeout",
            RequestFailure::Connect(_) => "ConnectionError",
            RequestFailure::Other(_) => "RequestError",
        }
    }

    /// HTTP status code carried by this failure, if the server answered.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestFailure::Status(code) => Some(*code),
            _ => None,
        }
    }

    pub fn is_tls(&self) -> bool {
        matches!(self, RequestFailure::Tls(_))
    }
}

/// Terminal preflight failure. The `Display` form is the error tag stored in
/// the result record and reported as its `httpType`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProbeError {
    /// Certificate verification failed and the user refused to skip it.
    #[error("SSL Error (User Declined Skip)")]
    TlsSkipDeclined,

    /// Verification was skipped but the retry budget ran out on TLS failures.
    #[error("SSL Error (Retries Failed After Skip)")]
    TlsRetriesExhausted,

    /// Every attempt failed; `kind` is the class of the last failure.
    #[error("Request Error ({kind})")]
    RetriesExhausted { kind: &'static str },
}

/// Unexpected internal fault inside the extraction pipeline.
///
/// Reported as `Critical Orchestrator Error (<kind>)`.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The configured fallback scope could not be parsed as a CSS selector.
    #[error("Fallback scope selector '{selector}' is invalid: {reason}")]
    InvalidFallbackScope { selector: String, reason: String },
}

impl PipelineError {
    /// Short kind name used in the critical error tag.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::InvalidFallbackScope { .. } => "InvalidFallbackScope",
        }
    }
}

/// Where processing of one URL ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum PageOutcome {
    /// Rendered and extracted against a resolved content scope.
    Extracted,
    /// Rendered and extracted against the fallback scope.
    ExtractedWithFallback,
    /// Preflight failed or the content was not HTML; no rendering.
    Skipped,
    /// Preflight succeeded but the browser produced no page.
    RenderFailed,
    /// An unexpected fault was caught at the pipeline boundary.
    CriticalFault,
}

impl PageOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageOutcome::Extracted => "Extracted",
            PageOutcome::ExtractedWithFallback => "Extracted (fallback scope)",
            PageOutcome::Skipped => "Skipped after preflight",
            PageOutcome::RenderFailed => "Render failed",
            PageOutcome::CriticalFault => "Critical fault",
        }
    }

    /// Whether the record produced for this outcome carries an error tag.
    pub fn has_issue(&self) -> bool {
        !matches!(self, PageOutcome::Extracted)
    }
}
