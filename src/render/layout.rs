// Fixed 1080x1080 layout: title band, one row per data point, footer watermark
use crate::composer::{Composition, Trend};
use crate::model::{Report, ReportKind};
use image::Rgb;

pub const WIDTH: u32 = 1080;
pub const HEIGHT: u32 = 1080;

const TITLE_Y: i32 = 150;
const TITLE_SIZE: f32 = 78.0;
const SUBTITLE_Y: i32 = 230;
const SUBTITLE_SIZE: f32 = 48.0;
const FOOTER_Y: i32 = HEIGHT as i32 - 50;
const FOOTER_SIZE: f32 = 28.0;

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const FOOTER: Rgb<u8> = Rgb([180, 180, 200]);
const GAIN: Rgb<u8> = Rgb([80, 255, 80]);
const LOSS: Rgb<u8> = Rgb([255, 80, 80]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

/// One string to draw; `y` is the vertical centre of the text.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub size: f32,
    pub color: Rgb<u8>,
    pub anchor: Anchor,
}

#[derive(Debug, Clone, Copy)]
struct Theme {
    background: Rgb<u8>,
    subtitle: Rgb<u8>,
    value: Rgb<u8>,
    row_start: i32,
    row_step: i32,
    row_size: f32,
    label_x: i32,
    value_right: i32,
    /// Right edge of the change column; `None` when the kind has no change column.
    change_right: Option<i32>,
    bullet: bool,
}

fn theme(kind: ReportKind) -> Theme {
    match kind {
        ReportKind::GlobalMarket => Theme {
            background: Rgb([20, 20, 40]),
            subtitle: Rgb([180, 180, 200]),
            value: WHITE,
            row_start: 360,
            row_step: 100,
            row_size: 42.0,
            label_x: 100,
            value_right: 750,
            change_right: Some(WIDTH as i32 - 100),
            bullet: false,
        },
        ReportKind::MtfInsights => Theme {
            background: Rgb([40, 20, 20]),
            subtitle: Rgb([200, 180, 180]),
            value: Rgb([255, 223, 186]),
            row_start: 380,
            row_step: 120,
            row_size: 46.0,
            label_x: 80,
            value_right: WIDTH as i32 - 80,
            change_right: None,
            bullet: true,
        },
    }
}

#[derive(Debug, Clone)]
pub struct Layout {
    pub width: u32,
    pub height: u32,
    pub background: Rgb<u8>,
    pub items: Vec<TextItem>,
    /// Number of data rows laid out.
    pub rows: usize,
}

impl Layout {
    pub fn for_report(report: &Report, composition: &Composition) -> Self {
        let theme = theme(report.kind);
        let centre = WIDTH as i32 / 2;

        let mut items = vec![
            TextItem {
                text: composition.headline.clone(),
                x: centre,
                y: TITLE_Y,
                size: TITLE_SIZE,
                color: WHITE,
                anchor: Anchor::Center,
            },
            TextItem {
                text: composition.subtitle.clone(),
                x: centre,
                y: SUBTITLE_Y,
                size: SUBTITLE_SIZE,
                color: theme.subtitle,
                anchor: Anchor::Center,
            },
        ];

        for (i, line) in composition.lines.iter().enumerate() {
            let y = theme.row_start + theme.row_step * i as i32;
            let label = if theme.bullet {
                format!("- {}:", line.label)
            } else {
                format!("{}:", line.label)
            };

            items.push(TextItem {
                text: label,
                x: theme.label_x,
                y,
                size: theme.row_size,
                color: WHITE,
                anchor: Anchor::Left,
            });
            items.push(TextItem {
                text: line.value.clone(),
                x: theme.value_right,
                y,
                size: theme.row_size,
                color: theme.value,
                anchor: Anchor::Right,
            });

            if let (Some(right), Some(change)) = (theme.change_right, &line.change) {
                let color = match line.trend {
                    Trend::Down => LOSS,
                    Trend::Up | Trend::Flat => GAIN,
                };
                items.push(TextItem {
                    text: change.clone(),
                    x: right,
                    y,
                    size: theme.row_size,
                    color,
                    anchor: Anchor::Right,
                });
            }
        }

        items.push(TextItem {
            text: composition.footer.clone(),
            x: centre,
            y: FOOTER_Y,
            size: FOOTER_SIZE,
            color: FOOTER,
            anchor: Anchor::Center,
        });

        Self {
            width: WIDTH,
            height: HEIGHT,
            background: theme.background,
            items,
            rows: composition.lines.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::Composer;
    use crate::model::{DataPoint, PLACEHOLDER};
    use crate::testing::{full_report, report_time};

    fn layout_of(report: &Report) -> Layout {
        Layout::for_report(report, &Composer::default().compose(report))
    }

    #[test]
    fn global_with_one_missing_source_has_six_rows() {
        let mut report = full_report(ReportKind::GlobalMarket);
        report.points[3] = DataPoint::unavailable("S&P 500");
        let layout = layout_of(&report);

        assert_eq!(layout.rows, 6);
        let labels: Vec<_> = layout
            .items
            .iter()
            .filter(|i| i.anchor == Anchor::Left)
            .map(|i| i.text.as_str())
            .collect();
        assert_eq!(labels.len(), 6);
        assert_eq!(labels[3], "S&P 500:");

        let placeholders: Vec<_> = layout.items.iter().filter(|i| i.text == PLACEHOLDER).collect();
        assert_eq!(placeholders.len(), 1);
    }

    #[test]
    fn placeholder_is_drawn_like_a_value() {
        let mut report = full_report(ReportKind::GlobalMarket);
        report.points[3] = DataPoint::unavailable("S&P 500");
        let layout = layout_of(&report);

        let placeholder = layout.items.iter().find(|i| i.text == PLACEHOLDER).unwrap();
        let value = layout.items.iter().find(|i| i.text == "25,012.50").unwrap();
        assert_eq!(placeholder.x, value.x);
        assert_eq!(placeholder.size, value.size);
        assert_eq!(placeholder.color, value.color);
        assert_eq!(placeholder.anchor, value.anchor);
    }

    #[test]
    fn mtf_layout_uses_mtf_labels() {
        let report = full_report(ReportKind::MtfInsights);
        let layout = layout_of(&report);

        let labels: Vec<_> = layout
            .items
            .iter()
            .filter(|i| i.anchor == Anchor::Left)
            .map(|i| i.text.clone())
            .collect();
        assert_eq!(
            labels,
            vec![
                "- Positions Added:",
                "- Positions Liquidated:",
                "- Net Book Added:",
                "- Net Industry MTF Book:",
            ]
        );
        assert!(!labels.iter().any(|l| l.contains("Nasdaq")));
        assert_eq!(layout.background, Rgb([40, 20, 20]));
        let right_aligned = layout.items.iter().filter(|i| i.anchor == Anchor::Right).count();
        assert_eq!(right_aligned, 4);
    }

    #[test]
    fn rows_step_down_the_canvas_and_stay_inside_it() {
        for kind in [ReportKind::GlobalMarket, ReportKind::MtfInsights] {
            let report = Report::assemble(kind, report_time(), None, Vec::new());
            let layout = layout_of(&report);

            let ys: Vec<i32> = layout
                .items
                .iter()
                .filter(|i| i.anchor == Anchor::Left)
                .map(|i| i.y)
                .collect();
            assert_eq!(ys.len(), kind.labels().len());
            assert!(ys.windows(2).all(|w| w[1] > w[0]));
            assert!(ys.iter().all(|y| *y > SUBTITLE_Y && *y < FOOTER_Y));
        }
    }

    #[test]
    fn change_column_is_coloured_by_trend() {
        let report = full_report(ReportKind::GlobalMarket);
        let layout = layout_of(&report);

        let gift_change = layout.items.iter().find(|i| i.text == "-0.80%").unwrap();
        let nikkei_change = layout.items.iter().find(|i| i.text == "+0.42%").unwrap();
        assert_eq!(gift_change.color, LOSS);
        assert_eq!(nikkei_change.color, GAIN);
    }
}
