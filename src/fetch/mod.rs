//! HTTP preflight.
//!
//! Before a page is handed to the browser, a lightweight HEAD request checks
//! that the URL answers with a successful status and tells us its content
//! type. This module owns that probe: the HTTP client seam, retry with
//! exponential backoff, and the run-wide TLS verification decision.

mod client;
mod probe;
mod request;
mod tls;

pub use client::{normalize_content_type, HeadClient, HeadResponse, ReqwestHeadClient};
pub use probe::{probe, ProbeOutcome, ProbeSettings};
pub use tls::{TlsDecision, TlsSkipPrompt};
