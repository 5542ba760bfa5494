// Fakes and fixtures shared by the unit tests
use crate::composer::Composition;
use crate::model::{
    Artifact, DataPoint, FetchError, FetchRequest, PublishError, RenderError, Report, ReportKind,
    Value,
};
use crate::publisher::Publisher;
use crate::render::ImageRenderer;
use crate::scraper::Fetcher;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::collections::HashMap;
use std::sync::Mutex;
use std::thread::ThreadId;
use std::time::Duration;

pub fn report_time() -> DateTime<FixedOffset> {
    FixedOffset::east_opt(330 * 60)
        .unwrap()
        .with_ymd_and_hms(2026, 10, 16, 8, 0, 0)
        .unwrap()
}

pub fn full_report(kind: ReportKind) -> Report {
    let quote = |price, change_pct| Value::Quote { price, change_pct };
    let (as_of, points) = match kind {
        ReportKind::GlobalMarket => (
            None,
            vec![
                DataPoint::ok("GIFTNIFTY", quote(25012.5, -0.8)),
                DataPoint::ok("Nikkei 225", quote(39819.11, 0.42)),
                DataPoint::ok("Dow Jones Futures", quote(44012.0, 0.1)),
                DataPoint::ok("S&P 500", quote(6305.6, -0.01)),
                DataPoint::ok("Nasdaq", quote(20895.66, 0.0)),
                DataPoint::ok("Hang Seng", quote(24825.66, 1.33)),
            ],
        ),
        ReportKind::MtfInsights => (
            Some("Jul 18, 2025".to_string()),
            vec![
                DataPoint::ok("Positions Added", Value::Crore(6614.35)),
                DataPoint::ok("Positions Liquidated", Value::Crore(6085.26)),
                DataPoint::ok("Net Book Added", Value::Crore(529.10)),
                DataPoint::ok("Net Industry MTF Book", Value::Crore(88878.24)),
            ],
        ),
    };
    Report::assemble(kind, report_time(), as_of, points)
}

pub fn gift_nifty_page(value: f64, change: f64) -> String {
    format!(
        r#"<html><body><script id="__NEXT_DATA__" type="application/json">{{"props":{{"pageProps":{{"globalIndicesData":{{"priceData":{{"value":{},"dayChangePerc":{}}}}}}}}}}}</script></body></html>"#,
        value, change
    )
}

pub fn yahoo_chart(prev: f64, last: f64) -> String {
    format!(
        r#"{{"chart":{{"result":[{{"indicators":{{"quote":[{{"close":[{},{}]}}]}}}}],"error":null}}}}"#,
        prev, last
    )
}

pub fn mtf_page() -> String {
    r#"<html><body><p>MTF data as on Jul 18, 2025</p>
    <div>Positions Added: +₹6,614.35 Cr</div>
    <div>Positions Liquidated: -₹6,085.26 Cr</div>
    <div>Net Book Added: +₹529.10 Cr</div>
    <div>Net Industry MTF Book: ₹88,878.24 Cr</div></body></html>"#
        .to_string()
}

/// Serves fixed bodies by URL; unknown URLs answer 404.
#[derive(Default)]
pub struct StaticFetcher {
    bodies: HashMap<String, String>,
}

impl StaticFetcher {
    pub fn with(mut self, url: &str, body: String) -> Self {
        self.bodies.insert(url.to_string(), body);
        self
    }

    pub fn without(mut self, url: &str) -> Self {
        self.bodies.remove(url);
        self
    }
}

#[async_trait::async_trait]
impl Fetcher for StaticFetcher {
    async fn fetch(&self, req: &FetchRequest) -> Result<String, FetchError> {
        self.bodies
            .get(&req.url)
            .cloned()
            .ok_or(FetchError::InvalidResponse(404))
    }
}

/// Answers like the wrapped fetcher, after a delay.
pub struct DelayedFetcher {
    inner: StaticFetcher,
    delay: Duration,
}

impl DelayedFetcher {
    pub fn new(inner: StaticFetcher, delay: Duration) -> Self {
        Self { inner, delay }
    }
}

#[async_trait::async_trait]
impl Fetcher for DelayedFetcher {
    async fn fetch(&self, req: &FetchRequest) -> Result<String, FetchError> {
        tokio::time::sleep(self.delay).await;
        self.inner.fetch(req).await
    }
}

/// Never answers.
pub struct HangingFetcher;

#[async_trait::async_trait]
impl Fetcher for HangingFetcher {
    async fn fetch(&self, _req: &FetchRequest) -> Result<String, FetchError> {
        std::future::pending().await
    }
}

/// Records the value column and the thread of every render, returns a fixed byte string.
#[derive(Default)]
pub struct StubRenderer {
    pub rendered: Mutex<Vec<Vec<String>>>,
    pub threads: Mutex<Vec<ThreadId>>,
}

pub const STUB_PNG: &[u8] = b"\x89PNG stub";

impl ImageRenderer for StubRenderer {
    fn render(&self, _report: &Report, composition: &Composition) -> Result<Vec<u8>, RenderError> {
        let values = composition.lines.iter().map(|l| l.value.clone()).collect();
        self.rendered.lock().unwrap().push(values);
        self.threads.lock().unwrap().push(std::thread::current().id());
        Ok(STUB_PNG.to_vec())
    }
}

/// Renderer that panics, standing in for an unclassified fault.
pub struct PanickingRenderer;

impl ImageRenderer for PanickingRenderer {
    fn render(&self, _report: &Report, _composition: &Composition) -> Result<Vec<u8>, RenderError> {
        panic!("glyph cache corrupted")
    }
}

pub enum Outcome {
    Posted(&'static str),
    AuthRejected,
    RateLimited,
}

pub struct RecordingPublisher {
    outcome: Outcome,
    pub attempts: Mutex<Vec<Artifact>>,
}

impl RecordingPublisher {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempt_count(&self) -> usize {
        self.attempts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, _kind: ReportKind, artifact: &Artifact) -> Result<String, PublishError> {
        self.attempts.lock().unwrap().push(artifact.clone());
        match self.outcome {
            Outcome::Posted(id) => Ok(id.to_string()),
            Outcome::AuthRejected => Err(PublishError::Auth {
                status: 401,
                body: r#"{"title":"Unauthorized"}"#.into(),
            }),
            Outcome::RateLimited => Err(PublishError::RateLimited),
        }
    }
}
