// Daily closes from the Yahoo Finance chart endpoint
use crate::model::{ParseError, Value};
use serde::Deserialize;
use urlencoding::encode;

const CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Five sessions is enough to find two closes across a weekend or holiday.
pub fn chart_url(symbol: &str) -> String {
    format!("{}/{}?range=5d&interval=1d", CHART_BASE_URL, encode(symbol))
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Last close and its change against the previous close.
pub fn parse_chart(body: &str) -> Result<Value, ParseError> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(err) = response.chart.error {
        return Err(ParseError::Malformed(format!(
            "{}: {}",
            err.code.unwrap_or_else(|| "error".into()),
            err.description.unwrap_or_default()
        )));
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| ParseError::MissingField("chart.result".into()))?;
    let series = result
        .indicators
        .quote
        .into_iter()
        .next()
        .ok_or_else(|| ParseError::MissingField("indicators.quote".into()))?;

    let closes: Vec<f64> = series
        .close
        .into_iter()
        .flatten()
        .filter(|c| c.is_finite())
        .collect();

    match closes.as_slice() {
        [.., prev, last] if *prev != 0.0 => Ok(Value::Quote {
            price: *last,
            change_pct: (last - prev) / prev * 100.0,
        }),
        [.., _, _] => Err(ParseError::Malformed("previous close is zero".into())),
        _ => Err(ParseError::MissingField(format!(
            "two daily closes (got {})",
            closes.len()
        ))),
    }
}
