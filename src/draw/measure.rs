//! Text measurement used by label hit-testing.

use super::font::FontDescriptor;

/// Measures the advance width of a single-line label.
pub trait TextMeasure {
    /// Width in pixels of `text` set at `size_px`.
    fn text_width(&self, text: &str, size_px: f64) -> f64;
}

/// Measures with Pango, using the same font as label rendering.
#[derive(Debug, Clone, Default)]
pub struct PangoTextMeasure {
    font: FontDescriptor,
}

impl PangoTextMeasure {
    pub fn new(font: FontDescriptor) -> Self {
        Self { font }
    }
}

impl TextMeasure for PangoTextMeasure {
    fn text_width(&self, text: &str, size_px: f64) -> f64 {
        if text.is_empty() {
            return 0.0;
        }

        // A tiny image surface is enough; only the layout is needed.
        let Ok(surface) = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1) else {
            log::debug!("Text measurement surface unavailable");
            return 0.0;
        };
        let Ok(ctx) = cairo::Context::new(&surface) else {
            return 0.0;
        };

        let layout = pangocairo::functions::create_layout(&ctx);
        layout.set_font_description(Some(&self.font.to_pango(size_px)));
        layout.set_text(text);

        let (_ink, logical) = layout.extents();
        logical.width() as f64 / pango::SCALE as f64
    }
}

/// Approximates every character as a fixed fraction of the font size.
///
/// Useful for headless hosts without fonts and for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedAdvanceMeasure {
    /// Advance per character as a multiple of the font size
    pub advance_ratio: f64,
}

impl TextMeasure for FixedAdvanceMeasure {
    fn text_width(&self, text: &str, size_px: f64) -> f64 {
        text.chars().count() as f64 * size_px * self.advance_ratio
    }
}
