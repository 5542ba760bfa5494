use crate::composer::Composition;
use crate::model::{RenderError, Report};
use crate::render::layout::{Anchor, Layout, TextItem};
use crate::render::ImageRenderer;

use ab_glyph::{FontVec, PxScale};
use image::{DynamicImage, ImageFormat, RgbImage};
use imageproc::drawing::{draw_text_mut, text_size};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Rasterises a layout with the bundled TrueType font and encodes it as PNG.
pub struct FontRenderer {
    font_path: PathBuf,
}

impl FontRenderer {
    pub fn new(font_path: impl Into<PathBuf>) -> Self {
        Self {
            font_path: font_path.into(),
        }
    }

    fn load_font(&self) -> Result<FontVec, RenderError> {
        let bytes = std::fs::read(&self.font_path).map_err(|source| RenderError::FontMissing {
            path: self.font_path.clone(),
            source,
        })?;
        FontVec::try_from_vec(bytes).map_err(|_| RenderError::InvalidFont {
            path: self.font_path.clone(),
        })
    }

    pub fn font_path(&self) -> &Path {
        &self.font_path
    }
}

impl ImageRenderer for FontRenderer {
    fn render(&self, report: &Report, composition: &Composition) -> Result<Vec<u8>, RenderError> {
        let font = self.load_font()?;
        let layout = Layout::for_report(report, composition);

        let mut canvas = RgbImage::from_pixel(layout.width, layout.height, layout.background);
        for item in &layout.items {
            draw_item(&mut canvas, &font, item);
        }

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(canvas).write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        debug!("Rendered {} rows into {} bytes", layout.rows, bytes.len());
        Ok(bytes)
    }
}

fn draw_item(canvas: &mut RgbImage, font: &FontVec, item: &TextItem) {
    let scale = PxScale::from(item.size);
    let (width, height) = text_size(scale, font, &item.text);

    let x = match item.anchor {
        Anchor::Left => item.x,
        Anchor::Center => item.x - width as i32 / 2,
        Anchor::Right => item.x - width as i32,
    };
    let y = item.y - height as i32 / 2;

    draw_text_mut(canvas, item.color, x, y, scale, font, &item.text);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::composer::Composer;
    use crate::model::ReportKind;
    use crate::render::layout::{HEIGHT, WIDTH};
    use crate::testing::{full_report, report_time};
    use std::io::Write;

    fn bundled_font() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/DejaVuSans-Bold.ttf")
    }

    fn empty_report(kind: ReportKind) -> Report {
        Report::assemble(kind, report_time(), None, Vec::new())
    }

    #[test]
    fn missing_font_is_reported_with_its_path() {
        let renderer = FontRenderer::new("/nonexistent/fonts/DejaVuSans-Bold.ttf");
        let report = empty_report(ReportKind::GlobalMarket);
        let composition = Composer::default().compose(&report);

        let err = renderer.render(&report, &composition).unwrap_err();
        assert!(matches!(err, RenderError::FontMissing { .. }));
        assert!(err.to_string().contains("/nonexistent/fonts/DejaVuSans-Bold.ttf"));
    }

    #[test]
    fn corrupt_font_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a font").unwrap();

        let renderer = FontRenderer::new(file.path());
        let report = empty_report(ReportKind::MtfInsights);
        let composition = Composer::default().compose(&report);

        let err = renderer.render(&report, &composition).unwrap_err();
        assert!(matches!(err, RenderError::InvalidFont { .. }));
    }

    #[test]
    fn all_unavailable_report_still_renders() {
        let font = bundled_font();
        assert!(font.exists(), "bundled font missing at {}", font.display());
        let renderer = FontRenderer::new(font);

        for kind in [ReportKind::GlobalMarket, ReportKind::MtfInsights] {
            let report = empty_report(kind);
            let composition = Composer::default().compose(&report);
            let png = renderer.render(&report, &composition).unwrap();

            let decoded = image::load_from_memory(&png).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (WIDTH, HEIGHT));
        }
    }

    #[test]
    fn full_report_renders_with_bundled_font() {
        let renderer = FontRenderer::new(bundled_font());

        for kind in [ReportKind::GlobalMarket, ReportKind::MtfInsights] {
            let report = full_report(kind);
            let composition = Composer::new(Some("@market_desk".into())).compose(&report);
            let png = renderer.render(&report, &composition).unwrap();

            assert!(png.starts_with(b"\x89PNG"));
            let decoded = image::load_from_memory(&png).unwrap().to_rgb8();
            assert_eq!(decoded.dimensions(), (WIDTH, HEIGHT));
        }
    }
}
