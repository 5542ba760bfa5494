// Core structs: DataPoint, Report, Artifact, TriggerStatus and the error types
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Placeholder shown wherever a figure could not be fetched.
pub const PLACEHOLDER: &str = "N/A";

const GLOBAL_LABELS: [&str; 6] = [
    "GIFTNIFTY",
    "Nikkei 225",
    "Dow Jones Futures",
    "S&P 500",
    "Nasdaq",
    "Hang Seng",
];

const MTF_LABELS: [&str; 4] = [
    "Positions Added",
    "Positions Liquidated",
    "Net Book Added",
    "Net Industry MTF Book",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    GlobalMarket,
    MtfInsights,
}

impl ReportKind {
    /// Fixed display order of the rows for this kind.
    pub fn labels(self) -> &'static [&'static str] {
        match self {
            ReportKind::GlobalMarket => &GLOBAL_LABELS,
            ReportKind::MtfInsights => &MTF_LABELS,
        }
    }

    /// Used for artifact file names.
    pub fn slug(self) -> &'static str {
        match self {
            ReportKind::GlobalMarket => "global_market_update",
            ReportKind::MtfInsights => "mtf_insights",
        }
    }

    pub fn route(self) -> &'static str {
        match self {
            ReportKind::GlobalMarket => "/global-market-update",
            ReportKind::MtfInsights => "/mtf-insights-update",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::GlobalMarket => "Global Market Update",
            ReportKind::MtfInsights => "MTF Insights",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Index level with its day-over-day change in percent.
    Quote { price: f64, change_pct: f64 },
    /// Signed amount in rupee crore.
    Crore(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataPoint {
    pub label: String,
    pub value: Option<Value>,
}

impl DataPoint {
    pub fn ok(label: impl Into<String>, value: Value) -> Self {
        Self {
            label: label.into(),
            value: Some(value),
        }
    }

    pub fn unavailable(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }

    pub fn status(&self) -> Status {
        match self.value {
            Some(_) => Status::Ok,
            None => Status::Unavailable,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub kind: ReportKind,
    pub generated_at: DateTime<FixedOffset>,
    /// Date printed by the upstream page, when it carries one.
    pub as_of: Option<String>,
    pub points: Vec<DataPoint>,
}

impl Report {
    /// Builds a report with exactly the labels of `kind`, in their fixed order.
    /// Labels without a fetched point become unavailable; unknown labels are dropped.
    pub fn assemble(
        kind: ReportKind,
        generated_at: DateTime<FixedOffset>,
        as_of: Option<String>,
        fetched: Vec<DataPoint>,
    ) -> Self {
        let mut fetched = fetched;
        let points = kind
            .labels()
            .iter()
            .map(|label| {
                match fetched.iter().position(|p| p.label == *label) {
                    Some(idx) => fetched.swap_remove(idx),
                    None => DataPoint::unavailable(*label),
                }
            })
            .collect();

        Self {
            kind,
            generated_at,
            as_of,
            points,
        }
    }

    pub fn unavailable_count(&self) -> usize {
        self.points
            .iter()
            .filter(|p| p.status() == Status::Unavailable)
            .count()
    }
}

#[derive(Debug, Clone)]
pub struct Artifact {
    /// PNG-encoded image.
    pub image: Vec<u8>,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TriggerStatus {
    pub ok: bool,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
}

impl TriggerStatus {
    pub fn published(detail: impl Into<String>, post_id: impl Into<String>) -> Self {
        Self {
            ok: true,
            detail: detail.into(),
            post_id: Some(post_id.into()),
        }
    }

    pub fn failed(detail: impl Into<String>) -> Self {
        Self {
            ok: false,
            detail: detail.into(),
            post_id: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub source: &'static str,
    pub url: String,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(String),
    #[error("timed out after {0:?}")]
    Timeout(Duration),
    #[error("unexpected status {0}")]
    InvalidResponse(u16),
}

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("HTML parse error: {0}")]
    HtmlParseError(String),
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

impl From<serde_json::Error> for ParseError {
    fn from(e: serde_json::Error) -> Self {
        ParseError::Malformed(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("font asset not found at {}: {source}", path.display())]
    FontMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("font asset at {} is not a usable font", path.display())]
    InvalidFont { path: PathBuf },
    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("authentication rejected [{status}]: {body}")]
    Auth { status: u16, body: String },
    #[error("rate limited by the posting API")]
    RateLimited,
    #[error("posting API responded [{status}]: {body}")]
    Api { status: u16, body: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("request signing failed: {0}")]
    Signing(String),
    #[error("unexpected response: {0}")]
    InvalidResponse(String),
    #[error("could not write artifact: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value {value:?} for {var}")]
    Invalid { var: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("render failed: {0}")]
    Render(#[from] RenderError),
    #[error("publish failed: {0}")]
    Publish(#[from] PublishError),
    #[error("render task did not complete: {0}")]
    RenderTask(String),
}
