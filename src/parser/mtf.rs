// MTF (margin trading facility) figures scraped from the ScanX insight page
use crate::model::{DataPoint, Value};
use crate::utils::parse_grouped_number;
use regex::Regex;
use scraper::Html;
use std::sync::LazyLock;
use tracing::warn;

pub const MTF_URL: &str = "https://scanx.trade/insight/mtf-insight";

static AS_OF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"as on (\w{3} \d{1,2}, \d{4})").expect("valid date pattern"));

/// Label and pattern per figure; `amount` is the crore value, `sign` is optional.
static FIGURES: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        (
            "Positions Added",
            r"Positions Added:\s*\+?₹\s*(?P<amount>[\d,]+\.?\d*)\s*Cr",
        ),
        (
            "Positions Liquidated",
            r"Positions Liquidated:\s*-?₹\s*(?P<amount>[\d,]+\.?\d*)\s*Cr",
        ),
        (
            "Net Book Added",
            r"Net Book Added:\s*(?P<sign>[+\-]?)₹\s*(?P<amount>[\d,]+\.?\d*)\s*Cr",
        ),
        (
            "Net Industry MTF Book",
            r"Industry MTF Book:\s*₹\s*(?P<amount>[\d,]+\.?\d*)\s*Cr",
        ),
    ]
    .into_iter()
    .map(|(label, pattern)| (label, Regex::new(pattern).expect("valid figure pattern")))
    .collect()
});

#[derive(Debug, Clone)]
pub struct MtfSnapshot {
    pub as_of: Option<String>,
    /// One point per figure, in display order.
    pub points: Vec<DataPoint>,
}

/// Extracts every figure it can find; a figure that does not match degrades alone.
pub fn parse_mtf(html: &str) -> MtfSnapshot {
    let text = visible_text(html);

    let as_of = AS_OF
        .captures(&text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string());

    let points = FIGURES
        .iter()
        .map(|(label, pattern)| match extract_amount(pattern, &text) {
            Some(amount) => DataPoint::ok(*label, Value::Crore(amount)),
            None => {
                warn!("MTF figure '{}' not found on page", label);
                DataPoint::unavailable(*label)
            }
        })
        .collect();

    MtfSnapshot { as_of, points }
}

fn extract_amount(pattern: &Regex, text: &str) -> Option<f64> {
    let caps = pattern.captures(text)?;
    let amount = parse_grouped_number(caps.name("amount")?.as_str())?;
    let negative = caps.name("sign").is_some_and(|s| s.as_str() == "-");
    Some(if negative { -amount } else { amount })
}

/// Page text without script and style bodies. Text nodes are joined as-is, so a
/// label or number split across inline elements reads back whole.
fn visible_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut out = String::new();

    for node in document.root_element().descendants() {
        let Some(text) = node.value().as_text() else {
            continue;
        };
        let hidden = node
            .parent()
            .and_then(|p| p.value().as_element().map(|e| matches!(e.name(), "script" | "style")))
            .unwrap_or(false);
        if !hidden {
            out.push_str(text);
        }
    }

    out
}
