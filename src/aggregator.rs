use crate::model::{DataPoint, FetchError, FetchRequest, ParseError, Report, ReportKind, Value};
use crate::parser::{chart_url, parse_chart, parse_gift_nifty, parse_mtf, GIFT_NIFTY_URL, MTF_URL};
use crate::scraper::Fetcher;
use chrono::{DateTime, FixedOffset};
use futures::future::join_all;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{info, warn};

/// Yahoo symbols for the global-market rows after GIFTNIFTY.
const INDEX_TICKERS: [(&str, &str); 5] = [
    ("Nikkei 225", "^N225"),
    ("Dow Jones Futures", "YM=F"),
    ("S&P 500", "^GSPC"),
    ("Nasdaq", "^IXIC"),
    ("Hang Seng", "^HSI"),
];

struct QuoteSource {
    label: &'static str,
    request: FetchRequest,
    parse: fn(&str) -> Result<Value, ParseError>,
}

fn global_sources() -> Vec<QuoteSource> {
    let mut sources = vec![QuoteSource {
        label: "GIFTNIFTY",
        request: FetchRequest {
            source: "groww",
            url: GIFT_NIFTY_URL.to_string(),
        },
        parse: parse_gift_nifty,
    }];

    sources.extend(INDEX_TICKERS.iter().map(|&(label, symbol)| QuoteSource {
        label,
        request: FetchRequest {
            source: "yahoo",
            url: chart_url(symbol),
        },
        parse: parse_chart,
    }));

    sources
}

/// Runs the fixed fetcher list of a report kind and assembles the report.
pub struct Aggregator<'a> {
    fetcher: &'a dyn Fetcher,
    timeout: Duration,
}

impl<'a> Aggregator<'a> {
    pub fn new(fetcher: &'a dyn Fetcher, timeout: Duration) -> Self {
        Self { fetcher, timeout }
    }

    pub async fn collect(&self, kind: ReportKind, generated_at: DateTime<FixedOffset>) -> Report {
        let (as_of, points) = match kind {
            ReportKind::GlobalMarket => (None, self.global_points().await),
            ReportKind::MtfInsights => self.mtf_points().await,
        };

        let report = Report::assemble(kind, generated_at, as_of, points);
        info!(
            "Collected {:?}: {}/{} data points available",
            kind,
            report.points.len() - report.unavailable_count(),
            report.points.len()
        );
        report
    }

    async fn global_points(&self) -> Vec<DataPoint> {
        let sources = global_sources();
        join_all(sources.iter().map(|s| self.quote_point(s))).await
    }

    async fn quote_point(&self, source: &QuoteSource) -> DataPoint {
        let body = match self.fetch_body(&source.request).await {
            Ok(body) => body,
            Err(e) => {
                warn!("{} fetch failed ({}): {}", source.label, source.request.source, e);
                return DataPoint::unavailable(source.label);
            }
        };

        match (source.parse)(&body) {
            Ok(value) => DataPoint::ok(source.label, value),
            Err(e) => {
                warn!("{} parse failed ({}): {}", source.label, source.request.source, e);
                DataPoint::unavailable(source.label)
            }
        }
    }

    async fn mtf_points(&self) -> (Option<String>, Vec<DataPoint>) {
        let request = FetchRequest {
            source: "scanx",
            url: MTF_URL.to_string(),
        };

        match self.fetch_body(&request).await {
            Ok(html) => {
                let snapshot = parse_mtf(&html);
                (snapshot.as_of, snapshot.points)
            }
            Err(e) => {
                warn!("MTF page fetch failed: {}", e);
                (None, Vec::new())
            }
        }
    }

    async fn fetch_body(&self, request: &FetchRequest) -> Result<String, FetchError> {
        match timeout(self.timeout, self.fetcher.fetch(request)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.timeout)),
        }
    }
}
