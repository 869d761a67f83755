//! HEAD request client.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::redirect::Policy;
use reqwest::ClientBuilder;

use super::request::RequestHeaders;
use crate::config::{MAX_REDIRECT_HOPS, UNKNOWN_CONTENT_TYPE};
use crate::error_handling::{classify_reqwest_error, RequestFailure};

/// Status line and content type of a HEAD response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadResponse {
    pub status: u16,
    /// Raw `Content-Type` header value, if the server sent one.
    pub content_type: Option<String>,
}

/// Issues HEAD requests for the preflight.
///
/// Implementations return `Ok` for every response the server sends,
/// including 4xx/5xx; only transport-level failures are `Err`.
#[async_trait]
pub trait HeadClient: Send + Sync {
    async fn head(
        &self,
        url: &str,
        timeout: Duration,
        verify_tls: bool,
    ) -> Result<HeadResponse, RequestFailure>;
}

/// [`HeadClient`] backed by `reqwest`.
///
/// Holds two clients built up front: one verifying certificates, one
/// accepting invalid certificates for runs where the user agreed to skip
/// verification.
pub struct ReqwestHeadClient {
    verifying: reqwest::Client,
    permissive: reqwest::Client,
}

impl ReqwestHeadClient {
    /// Builds both clients with the given user agent.
    ///
    /// Redirects are followed up to `MAX_REDIRECT_HOPS`; the reported status
    /// is that of the final response.
    pub fn new(user_agent: &str) -> Result<Self, reqwest::Error> {
        let verifying = Self::builder(user_agent).build()?;
        let permissive = Self::builder(user_agent)
            .danger_accept_invalid_certs(true)
            .build()?;
        Ok(Self {
            verifying,
            permissive,
        })
    }

    fn builder(user_agent: &str) -> ClientBuilder {
        ClientBuilder::new()
            .user_agent(user_agent)
            .redirect(Policy::limited(MAX_REDIRECT_HOPS))
    }
}

#[async_trait]
impl HeadClient for ReqwestHeadClient {
    async fn head(
        &self,
        url: &str,
        timeout: Duration,
        verify_tls: bool,
    ) -> Result<HeadResponse, RequestFailure> {
        let client = if verify_tls {
            &self.verifying
        } else {
            &self.permissive
        };

        let request = RequestHeaders::apply_to_request_builder(client.head(url)).timeout(timeout);
        let response = request
            .send()
            .await
            .map_err(|e| classify_reqwest_error(&e))?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        debug!(
            "HEAD {} -> {} ({:?}, verify_tls={})",
            url, status, content_type, verify_tls
        );

        Ok(HeadResponse {
            status,
            content_type,
        })
    }
}

/// Reduces a `Content-Type` header to its media type.
///
/// Parameters after the first `;` are dropped (`text/html; charset=utf-8`
/// becomes `text/html`). A missing or empty header yields `Unknown`.
pub fn normalize_content_type(header: Option<&str>) -> String {
    header
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .filter(|media_type| !media_type.is_empty())
        .unwrap_or(UNKNOWN_CONTENT_TYPE)
        .to_string()
}
