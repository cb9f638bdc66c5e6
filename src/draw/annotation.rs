//! Annotation definitions for plan images.

use super::style::kind_color_hex;
use crate::util::Point;
use serde::{Deserialize, Serialize};

/// Default text size in pixels when a record omits `fontSize`.
pub const DEFAULT_FONT_SIZE: f64 = 32.0;

/// Frames whose width and height are both at or below this size are discarded.
pub const DEGENERATE_FRAME_SIZE: f64 = 5.0;

/// One placed marker, shape or label on the plan image.
///
/// Every variant carries its anchor `(x, y)` in source-image pixels, never screen
/// coordinates. On the wire the variant is stored in a `type` field, matching the
/// file records exchanged with the surrounding form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Annotation {
    /// Power socket marker
    Socket { x: f64, y: f64 },
    /// Light switch marker
    Switch { x: f64, y: f64 },
    /// Network outlet marker
    Lan { x: f64, y: f64 },
    /// TV outlet marker
    Tv { x: f64, y: f64 },
    /// Text label; `(x, y)` is the start of the baseline
    Text {
        x: f64,
        y: f64,
        text: String,
        /// Fill color as `#rrggbb`; the text tool color when absent on the wire
        #[serde(default = "default_text_color")]
        color: String,
        /// Font size in pixels
        #[serde(rename = "fontSize", default = "default_font_size")]
        font_size: f64,
    },
    /// Straight line with a filled head at `(x2, y2)`
    Arrow {
        x: f64,
        y: f64,
        x2: f64,
        y2: f64,
        /// Stroke color; the tool color is used when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    /// Plain straight segment
    Line {
        x: f64,
        y: f64,
        x2: f64,
        y2: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
    /// Unfilled axis-aligned rectangle from `(x, y)`
    Frame {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
    },
}

/// Discriminant of [`Annotation`] without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Socket,
    Switch,
    Lan,
    Tv,
    Text,
    Arrow,
    Line,
    Frame,
}

impl AnnotationKind {
    /// Icon markers are drawn as a fixed-size disc with a glyph.
    pub fn is_marker(self) -> bool {
        matches!(self, Self::Socket | Self::Switch | Self::Lan | Self::Tv)
    }

    /// Arrows and lines have a terminal point that moves with the anchor.
    pub fn is_line_like(self) -> bool {
        matches!(self, Self::Arrow | Self::Line)
    }
}

fn default_text_color() -> String {
    kind_color_hex(AnnotationKind::Text).to_string()
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

impl Annotation {
    /// Creates an icon marker of the given kind.
    ///
    /// Returns `None` for kinds that are not markers.
    pub fn marker(kind: AnnotationKind, at: Point) -> Option<Self> {
        let (x, y) = (at.x, at.y);
        match kind {
            AnnotationKind::Socket => Some(Self::Socket { x, y }),
            AnnotationKind::Switch => Some(Self::Switch { x, y }),
            AnnotationKind::Lan => Some(Self::Lan { x, y }),
            AnnotationKind::Tv => Some(Self::Tv { x, y }),
            _ => None,
        }
    }

    pub fn kind(&self) -> AnnotationKind {
        match self {
            Self::Socket { .. } => AnnotationKind::Socket,
            Self::Switch { .. } => AnnotationKind::Switch,
            Self::Lan { .. } => AnnotationKind::Lan,
            Self::Tv { .. } => AnnotationKind::Tv,
            Self::Text { .. } => AnnotationKind::Text,
            Self::Arrow { .. } => AnnotationKind::Arrow,
            Self::Line { .. } => AnnotationKind::Line,
            Self::Frame { .. } => AnnotationKind::Frame,
        }
    }

    /// Returns the anchor point shared by every variant.
    pub fn anchor(&self) -> Point {
        match self {
            Self::Socket { x, y }
            | Self::Switch { x, y }
            | Self::Lan { x, y }
            | Self::Tv { x, y }
            | Self::Text { x, y, .. }
            | Self::Arrow { x, y, .. }
            | Self::Line { x, y, .. }
            | Self::Frame { x, y, .. } => Point::new(*x, *y),
        }
    }

    /// Moves the annotation by `(dx, dy)`.
    ///
    /// Arrows and lines shift both endpoints by the same delta; every other
    /// variant only moves its anchor.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Self::Arrow { x, y, x2, y2, .. } | Self::Line { x, y, x2, y2, .. } => {
                *x += dx;
                *y += dy;
                *x2 += dx;
                *y2 += dy;
            }
            Self::Socket { x, y }
            | Self::Switch { x, y }
            | Self::Lan { x, y }
            | Self::Tv { x, y }
            | Self::Text { x, y, .. }
            | Self::Frame { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
        }
    }

    /// Moves the anchor to `to`, carrying any terminal point along.
    pub fn move_anchor_to(&mut self, to: Point) {
        let from = self.anchor();
        self.translate(to.x - from.x, to.y - from.y);
    }

    /// True for frames too small to keep (both sides at or below 5 px).
    pub fn is_degenerate_frame(&self) -> bool {
        self.is_frame_within(DEGENERATE_FRAME_SIZE)
    }

    /// True for frames whose width and height are both at or below `limit`.
    pub fn is_frame_within(&self, limit: f64) -> bool {
        match self {
            Self::Frame { width, height, .. } => width.abs() <= limit && height.abs() <= limit,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dragging_arrow_moves_both_endpoints() {
        let mut arrow = Annotation::Arrow {
            x: 10.0,
            y: 10.0,
            x2: 50.0,
            y2: 50.0,
            color: None,
        };
        arrow.translate(5.0, 5.0);
        assert_eq!(
            arrow,
            Annotation::Arrow {
                x: 15.0,
                y: 15.0,
                x2: 55.0,
                y2: 55.0,
                color: None,
            }
        );
    }

    #[test]
    fn moving_frame_keeps_its_size() {
        let mut frame = Annotation::Frame {
            x: 0.0,
            y: 0.0,
            width: 40.0,
            height: 20.0,
            color: None,
        };
        frame.move_anchor_to(Point::new(7.0, 9.0));
        assert_eq!(
            frame,
            Annotation::Frame {
                x: 7.0,
                y: 9.0,
                width: 40.0,
                height: 20.0,
                color: None,
            }
        );
    }

    #[test]
    fn degenerate_frame_requires_both_sides_small() {
        let frame = |width, height| Annotation::Frame {
            x: 0.0,
            y: 0.0,
            width,
            height,
            color: None,
        };
        assert!(frame(5.0, 5.0).is_degenerate_frame());
        assert!(frame(-3.0, 0.0).is_degenerate_frame());
        assert!(!frame(6.0, 100.0).is_degenerate_frame());
        assert!(!frame(0.0, 6.0).is_degenerate_frame());
        assert!(!Annotation::Socket { x: 0.0, y: 0.0 }.is_degenerate_frame());
    }

    #[test]
    fn wire_format_uses_type_tag_and_camel_case_font_size() {
        let text = Annotation::Text {
            x: 1.0,
            y: 2.0,
            text: "Кухня".to_string(),
            color: "#ef4444".to_string(),
            font_size: 24.0,
        };
        let json = serde_json::to_value(&text).unwrap();
        assert_eq!(json["type"], "text");
        assert_eq!(json["fontSize"], 24.0);

        let socket: Annotation = serde_json::from_str(r#"{"type":"socket","x":100,"y":150}"#).unwrap();
        assert_eq!(socket, Annotation::Socket { x: 100.0, y: 150.0 });
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let text: Annotation =
            serde_json::from_str(r#"{"type":"text","x":0,"y":0,"text":"A"}"#).unwrap();
        match text {
            Annotation::Text {
                color, font_size, ..
            } => {
                assert_eq!(color, "#8b5cf6");
                assert_eq!(font_size, DEFAULT_FONT_SIZE);
            }
            other => panic!("unexpected {other:?}"),
        }

        let line: Annotation =
            serde_json::from_str(r#"{"type":"line","x":0,"y":0,"x2":3,"y2":4}"#).unwrap();
        let json = serde_json::to_string(&line).unwrap();
        assert!(!json.contains("color"));
    }

    #[test]
    fn text_without_color_uses_text_tool_color() {
        let text: Annotation =
            serde_json::from_str(r#"{"type":"text","x":5,"y":9,"text":"Щиток","fontSize":24}"#)
                .unwrap();
        let Annotation::Text { color, .. } = &text else {
            panic!("unexpected {text:?}");
        };
        assert_eq!(color, kind_color_hex(AnnotationKind::Text));
        assert_ne!(color, "#FFFFFF");
    }

    #[test]
    fn marker_constructor_rejects_non_markers() {
        assert!(Annotation::marker(AnnotationKind::Frame, Point::new(0.0, 0.0)).is_none());
        assert_eq!(
            Annotation::marker(AnnotationKind::Tv, Point::new(3.0, 4.0)),
            Some(Annotation::Tv { x: 3.0, y: 4.0 })
        );
    }
}
