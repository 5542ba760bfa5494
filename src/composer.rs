use crate::model::{DataPoint, Report, ReportKind, Value, PLACEHOLDER};
use crate::utils::{format_change, format_crore, format_thousands};

const GLOBAL_HASHTAGS: &str = "#GIFTNIFTY #Nifty #DowJones #Nasdaq #Nikkei #HangSeng";
const MTF_HASHTAGS: &str = "#MTF #nifty #GIFTNIFTY #banknifty";
const DISCLAIMER: &str = "For informational use only";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Flat,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayLine {
    pub label: String,
    /// Formatted value, or the placeholder.
    pub value: String,
    pub change: Option<String>,
    pub trend: Trend,
}

impl DisplayLine {
    fn from_point(point: &DataPoint) -> Self {
        let (value, change, trend) = match &point.value {
            Some(Value::Quote { price, change_pct }) => (
                format_thousands(*price),
                Some(format_change(*change_pct)),
                trend_of(*change_pct),
            ),
            Some(Value::Crore(amount)) => (format_crore(*amount), None, Trend::Flat),
            None => (PLACEHOLDER.to_string(), None, Trend::Flat),
        };

        Self {
            label: point.label.clone(),
            value,
            change,
            trend,
        }
    }

    fn caption_text(&self, kind: ReportKind) -> String {
        let body = match &self.change {
            Some(change) => format!("{}: {} ({})", self.label, self.value, change),
            None => format!("{}: {}", self.label, self.value),
        };
        match kind {
            ReportKind::GlobalMarket => body,
            ReportKind::MtfInsights => format!("- {}", body),
        }
    }
}

fn trend_of(change_pct: f64) -> Trend {
    let rounded = (change_pct * 100.0).round() / 100.0;
    if rounded > 0.0 {
        Trend::Up
    } else if rounded < 0.0 {
        Trend::Down
    } else {
        Trend::Flat
    }
}

/// Everything textual derived from one report: image texts and the post caption.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub headline: String,
    pub subtitle: String,
    pub lines: Vec<DisplayLine>,
    pub footer: String,
    pub caption: String,
}

#[derive(Debug, Clone, Default)]
pub struct Composer {
    watermark_handle: Option<String>,
}

impl Composer {
    pub fn new(watermark_handle: Option<String>) -> Self {
        Self { watermark_handle }
    }

    /// Pure in the report: the date comes from `report.generated_at`, never the clock.
    pub fn compose(&self, report: &Report) -> Composition {
        let kind = report.kind;
        let lines: Vec<DisplayLine> = report.points.iter().map(DisplayLine::from_point).collect();

        let (subtitle, header, hashtags) = match kind {
            ReportKind::GlobalMarket => {
                let date = report.generated_at.format("%d %b, %Y").to_string();
                let header = format!("{} – {}", kind.title(), date);
                (date, header, GLOBAL_HASHTAGS)
            }
            ReportKind::MtfInsights => {
                let as_of = report
                    .as_of
                    .clone()
                    .unwrap_or_else(|| report.generated_at.format("%b %d, %Y").to_string());
                let subtitle = format!("(as on {})", as_of);
                let header = format!("{} {}", kind.title(), subtitle);
                (subtitle, header, MTF_HASHTAGS)
            }
        };

        let body: Vec<String> = lines.iter().map(|l| l.caption_text(kind)).collect();
        let caption = format!("{}\n\n{}\n\n{}", header, body.join("\n"), hashtags);

        let stamp = format!(
            "Data as of {} | {}",
            report.generated_at.format("%d-%b-%Y"),
            DISCLAIMER
        );
        let footer = match &self.watermark_handle {
            Some(handle) => format!("{} | {}", handle, stamp),
            None => stamp,
        };

        Composition {
            headline: kind.title().to_string(),
            subtitle,
            lines,
            footer,
            caption,
        }
    }
}
