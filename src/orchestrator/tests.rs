use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use super::*;
use crate::config::DEFAULT_SCOPE_PRIORITY;
use crate::error_handling::RequestFailure;
use crate::fetch::{HeadResponse, ProbeSettings};
use crate::render::RenderSettings;

const URL: &str = "https://example.com/blog/hello-world";

struct StubClient {
    script: Mutex<VecDeque<Result<HeadResponse, RequestFailure>>>,
    calls: AtomicUsize,
}

impl StubClient {
    fn new(script: Vec<Result<HeadResponse, RequestFailure>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            calls: AtomicUsize::new(0),
        }
    }

    fn html() -> Self {
        Self::new(vec![ok(200, "text/html; charset=utf-8")])
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HeadClient for StubClient {
    async fn head(
        &self,
        _url: &str,
        _timeout: Duration,
        _verify_tls: bool,
    ) -> Result<HeadResponse, RequestFailure> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| ok(200, "text/html"))
    }
}

fn ok(status: u16, content_type: &str) -> Result<HeadResponse, RequestFailure> {
    Ok(HeadResponse {
        status,
        content_type: Some(content_type.to_string()),
    })
}

struct StubPrompt {
    answer: bool,
}

impl TlsSkipPrompt for StubPrompt {
    fn confirm_skip(&self, _url: &str) -> bool {
        self.answer
    }
}

enum PageBehaviour {
    Serve(&'static str),
    NeverReady,
    PanicOnSource,
}

struct StubDriver {
    behaviour: PageBehaviour,
    navigations: AtomicUsize,
}

impl StubDriver {
    fn new(behaviour: PageBehaviour) -> Self {
        Self {
            behaviour,
            navigations: AtomicUsize::new(0),
        }
    }

    fn navigations(&self) -> usize {
        self.navigations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BrowserDriver for StubDriver {
    async fn navigate(&self, _url: &str) -> Result<()> {
        self.navigations.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn is_document_ready(&self) -> Result<bool> {
        Ok(!matches!(self.behaviour, PageBehaviour::NeverReady))
    }

    async fn page_source(&self) -> Result<String> {
        match self.behaviour {
            PageBehaviour::Serve(html) => Ok(html.to_string()),
            PageBehaviour::NeverReady => Ok(String::new()),
            PageBehaviour::PanicOnSource => panic!("driver exploded"),
        }
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }
}

fn settings() -> ExtractionSettings {
    ExtractionSettings {
        probe: ProbeSettings {
            max_retries: 3,
            timeout: Duration::from_secs(1),
            backoff_factor: Duration::ZERO,
        },
        render: RenderSettings {
            load_timeout: Duration::from_millis(100),
            post_load_wait: None,
            poll_interval: Duration::from_millis(5),
        },
        fallback_scope: "body".to_string(),
    }
}

async fn run(
    client: &StubClient,
    driver: &StubDriver,
    settings: &ExtractionSettings,
    prompt_answer: bool,
    decision: &mut TlsDecision,
) -> PageResult {
    let prompt = StubPrompt {
        answer: prompt_answer,
    };
    let scopes = ScopePriority::from_selectors(DEFAULT_SCOPE_PRIORITY);
    let pipeline = Pipeline::new(client, &prompt, driver, settings, &scopes);
    pipeline.extract(URL, decision).await
}

fn assert_schema_complete(record: &PageRecord) {
    let value = serde_json::to_value(record).unwrap();
    let object = value.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    let mut expected = PageRecord::FIELD_NAMES.to_vec();
    keys.sort_unstable();
    expected.sort_unstable();
    assert_eq!(keys, expected);
}

const MAIN_PAGE: &str = r#"<html><head>
    <title>Hello World</title>
    <meta name="description" content="A greeting">
    <meta property="og:type" content="article">
</head><body>
    <h1>Site header</h1>
    <main>
        <article><h1>Hello <b>World</b></h1><h2>Intro</h2>
            <a href="/about">About</a>
            <a href="https://other.org">Elsewhere</a>
            <img src="x.png">
        </article>
    </main>
</body></html>"#;

const TWO_ARTICLES: &str = r#"<html><head><title>List</title></head><body>
    <article><h1>First</h1><a href="/one">one</a></article>
    <article><h2>Second</h2><img src="y.png" alt="y"></article>
</body></html>"#;

#[tokio::test]
async fn test_html_page_with_main_scope() {
    let client = StubClient::html();
    let driver = StubDriver::new(PageBehaviour::Serve(MAIN_PAGE));
    let mut decision = TlsDecision::default();

    let result = run(&client, &driver, &settings(), false, &mut decision).await;
    let record = &result.record;

    assert_eq!(result.outcome, PageOutcome::Extracted);
    assert_eq!(record.http_code, Some(200));
    assert_eq!(record.http_type, "text/html");
    assert_eq!(record.page_slug, "hello-world");
    assert_eq!(record.scope_selector.as_deref(), Some("main"));
    assert_eq!(record.title, "Hello World");
    assert_eq!(record.description, "A greeting");
    assert_eq!(record.og_type, "article");
    assert_eq!(record.scope_h1, "Hello World");
    assert_eq!(record.scope_heading_count, 2);
    assert_eq!(record.scope_links_internal, 1);
    assert_eq!(record.scope_links_external, 1);
    assert_eq!(record.scope_image_count, 1);
    assert_eq!(record.scope_images_missing_alt, 1);
    assert_eq!(record.error, "");
    assert_schema_complete(record);
}

#[tokio::test]
async fn test_ambiguous_articles_use_fallback_scope() {
    let client = StubClient::html();
    let driver = StubDriver::new(PageBehaviour::Serve(TWO_ARTICLES));
    let mut decision = TlsDecision::default();

    let result = run(&client, &driver, &settings(), false, &mut decision).await;
    let record = &result.record;

    assert_eq!(result.outcome, PageOutcome::ExtractedWithFallback);
    assert_eq!(record.scope_selector.as_deref(), Some("body"));
    assert_eq!(
        record.error,
        "No primary semantic content tag found; analysis performed on body"
    );
    assert_eq!(record.scope_h1, "First");
    assert_eq!(record.scope_heading_count, 2);
    assert_eq!(record.scope_links_internal, 1);
    assert_eq!(record.scope_image_count, 1);
    assert_eq!(record.scope_images_missing_alt, 0);
    assert_eq!(record.title, "List");
    assert_schema_complete(record);
}

#[tokio::test]
async fn test_server_error_skips_rendering_and_keeps_code() {
    let client = StubClient::new(vec![
        ok(500, "text/html"),
        ok(500, "text/html"),
        ok(500, "text/html"),
    ]);
    let driver = StubDriver::new(PageBehaviour::Serve(MAIN_PAGE));
    let mut decision = TlsDecision::default();

    let result = run(&client, &driver, &settings(), false, &mut decision).await;

    assert_eq!(result.outcome, PageOutcome::Skipped);
    assert_eq!(result.record.http_code, Some(500));
    assert!(result.record.error.contains("Request Error"));
    assert_eq!(result.record.http_type, "Request Error (HTTPError)");
    assert_eq!(client.calls(), 3);
    assert_eq!(driver.navigations(), 0);
    assert_schema_complete(&result.record);
}

#[tokio::test]
async fn test_declined_tls_skip_stops_after_one_attempt() {
    let client = StubClient::new(vec![Err(RequestFailure::Tls(
        "invalid peer certificate".into(),
    ))]);
    let driver = StubDriver::new(PageBehaviour::Serve(MAIN_PAGE));
    let mut decision = TlsDecision::default();

    let result = run(&client, &driver, &settings(), false, &mut decision).await;

    assert_eq!(result.record.http_code, None);
    assert_eq!(result.record.error, "SSL Error (User Declined Skip)");
    assert_eq!(client.calls(), 1);
    assert_eq!(driver.navigations(), 0);
    assert!(!decision.skip_verification());
}

#[tokio::test]
async fn test_accepted_tls_skip_persists_for_later_urls() {
    let client = StubClient::new(vec![
        Err(RequestFailure::Tls("invalid peer certificate".into())),
        ok(200, "text/html"),
        ok(200, "text/html"),
    ]);
    let driver = StubDriver::new(PageBehaviour::Serve(MAIN_PAGE));
    let settings = settings();
    let mut decision = TlsDecision::default();

    let first = run(&client, &driver, &settings, true, &mut decision).await;
    assert!(decision.skip_verification());
    let second = run(&client, &driver, &settings, false, &mut decision).await;

    assert_eq!(first.record.http_code, Some(200));
    assert_eq!(second.outcome, PageOutcome::Extracted);
    assert!(decision.skip_verification());
}

#[tokio::test]
async fn test_non_html_content_is_skipped() {
    let client = StubClient::new(vec![ok(200, "application/pdf")]);
    let driver = StubDriver::new(PageBehaviour::Serve(MAIN_PAGE));
    let mut decision = TlsDecision::default();

    let result = run(&client, &driver, &settings(), false, &mut decision).await;

    assert_eq!(result.outcome, PageOutcome::Skipped);
    assert_eq!(result.record.http_code, Some(200));
    assert_eq!(result.record.http_type, "application/pdf");
    assert_eq!(result.record.error, "Non-HTML content (application/pdf)");
    assert_eq!(driver.navigations(), 0);
    assert_eq!(result.record.title, "");
    assert_schema_complete(&result.record);
}

#[tokio::test]
async fn test_render_timeout_keeps_preflight_fields() {
    let client = StubClient::html();
    let driver = StubDriver::new(PageBehaviour::NeverReady);
    let mut decision = TlsDecision::default();

    let result = run(&client, &driver, &settings(), false, &mut decision).await;
    let record = &result.record;

    assert_eq!(result.outcome, PageOutcome::RenderFailed);
    assert_eq!(record.http_code, Some(200));
    assert_eq!(record.http_type, "text/html");
    assert_eq!(record.error, "Failed to fetch/parse rendered page");
    assert_eq!(record.title, "");
    assert_eq!(record.scope_selector, None);
    assert_eq!(record.scope_heading_count, 0);
    assert_schema_complete(record);
}

#[tokio::test]
async fn test_invalid_fallback_scope_is_critical() {
    let client = StubClient::html();
    let driver = StubDriver::new(PageBehaviour::Serve(TWO_ARTICLES));
    let mut settings = settings();
    settings.fallback_scope = "body[[".to_string();
    let mut decision = TlsDecision::default();

    let result = run(&client, &driver, &settings, false, &mut decision).await;

    assert_eq!(result.outcome, PageOutcome::CriticalFault);
    assert_eq!(
        result.record.error,
        "Critical Orchestrator Error (InvalidFallbackScope)"
    );
    assert_eq!(result.record.http_code, Some(200));
    assert_eq!(result.record.http_type, "text/html");
    assert_eq!(result.record.page_slug, "hello-world");
    assert_schema_complete(&result.record);
}

#[tokio::test]
async fn test_panic_is_caught_and_preserves_fields() {
    let client = StubClient::html();
    let driver = StubDriver::new(PageBehaviour::PanicOnSource);
    let mut decision = TlsDecision::default();

    let result = run(&client, &driver, &settings(), false, &mut decision).await;

    assert_eq!(result.outcome, PageOutcome::CriticalFault);
    assert_eq!(result.record.error, "Critical Orchestrator Error (Panic)");
    assert_eq!(result.record.http_code, Some(200));
    assert_eq!(result.record.http_type, "text/html");
    assert_schema_complete(&result.record);
}

#[test]
fn test_is_html() {
    assert!(is_html("text/html"));
    assert!(is_html("application/xhtml+xml"));
    assert!(is_html("TEXT/HTML"));
    assert!(!is_html("application/json"));
    assert!(!is_html("Unknown"));
}
