//! Fixed drawing dimensions and per-kind colors.

use super::annotation::AnnotationKind;
use super::color::{Color, WHITE};
use super::font::FontDescriptor;

/// Hex color assigned to each annotation kind.
///
/// Markers always use it; arrows, lines and frames fall back to it when the
/// annotation carries no color of its own.
pub fn kind_color_hex(kind: AnnotationKind) -> &'static str {
    match kind {
        AnnotationKind::Socket => "#ef4444",
        AnnotationKind::Switch => "#f97316",
        AnnotationKind::Tv => "#3b82f6",
        AnnotationKind::Lan => "#22c55e",
        AnnotationKind::Text => "#8b5cf6",
        AnnotationKind::Arrow => "#eab308",
        AnnotationKind::Frame => "#ec4899",
        AnnotationKind::Line => "#06b6d4",
    }
}

/// Resolves an optional stored color, falling back to the kind color.
pub fn resolve_color(stored: Option<&str>, kind: AnnotationKind) -> Color {
    stored
        .and_then(Color::from_hex)
        .or_else(|| Color::from_hex(kind_color_hex(kind)))
        .unwrap_or(WHITE)
}

/// Dimensions shared by rendering and hit-testing.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderStyle {
    /// Stroke width for arrows, lines and frames
    pub stroke_width: f64,
    /// Diameter of icon marker discs; the hit radius is half of this
    pub marker_diameter: f64,
    /// Arrowhead length in pixels
    pub arrow_head_length: f64,
    /// Arrowhead half-angle in degrees
    pub arrow_head_angle: f64,
    /// Width of the contrasting outline around labels
    pub text_outline_width: f64,
    /// Label font
    pub font: FontDescriptor,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            stroke_width: 4.0,
            marker_diameter: 32.0,
            arrow_head_length: 15.0,
            arrow_head_angle: 30.0,
            text_outline_width: 2.0,
            font: FontDescriptor::default(),
        }
    }
}

impl RenderStyle {
    pub fn marker_radius(&self) -> f64 {
        self.marker_diameter / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_color_wins_over_kind_color() {
        let color = resolve_color(Some("#22c55e"), AnnotationKind::Arrow);
        assert_eq!(color.to_hex(), "#22c55e");
    }

    #[test]
    fn missing_or_invalid_color_uses_kind_color() {
        assert_eq!(resolve_color(None, AnnotationKind::Frame).to_hex(), "#ec4899");
        assert_eq!(
            resolve_color(Some("not-a-color"), AnnotationKind::Line).to_hex(),
            "#06b6d4"
        );
    }
}
