//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls stroke and label appearance when the editor opens. The color and
/// size pickers can still change the label color and size per session.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Stroke width of arrows, lines and frames in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,

    /// Initial label font size in pixels (valid range: 8.0 - 96.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Font family name for labels (e.g., "Arial", "Sans", "DejaVu Sans")
    /// Install fonts system-wide and reference them by family name
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Font weight (e.g., "normal", "bold", "light", 400, 700)
    /// Can be a named weight or a numeric value (100-900)
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Initial color for labels and shapes - a palette name (white, red, amber,
    /// green, blue), a hex string, or an RGB array like `[255, 0, 0]`
    #[serde(default)]
    pub default_text_color: ColorSpec,

    /// Width of the contrasting outline drawn around labels (valid range: 0.0 - 8.0)
    #[serde(default = "default_text_outline_width")]
    pub text_outline_width: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            stroke_width: default_stroke_width(),
            default_font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            default_text_color: ColorSpec::default(),
            text_outline_width: default_text_outline_width(),
        }
    }
}

/// Arrow drawing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ArrowConfig {
    /// Arrowhead length in pixels (valid range: 5.0 - 50.0)
    #[serde(default = "default_arrow_length")]
    pub length: f64,

    /// Arrowhead angle in degrees (valid range: 15.0 - 60.0)
    /// Smaller angles create narrower arrowheads, larger angles create wider ones
    #[serde(default = "default_arrow_angle")]
    pub angle_degrees: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        Self {
            length: default_arrow_length(),
            angle_degrees: default_arrow_angle(),
        }
    }
}

/// Icon marker settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MarkerConfig {
    /// Marker disc diameter in pixels (valid range: 12.0 - 96.0)
    /// The move tool picks a marker within half this distance of its center
    #[serde(default = "default_marker_diameter")]
    pub diameter: f64,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            diameter: default_marker_diameter(),
        }
    }
}

/// Pointer interaction tuning.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct InteractionConfig {
    /// Pick distance for lines, arrows and frame borders in pixels (valid range: 2.0 - 40.0)
    #[serde(default = "default_hit_tolerance")]
    pub hit_tolerance: f64,

    /// Frames whose width and height are both at or below this size are discarded
    /// (valid range: 0.0 - 50.0)
    #[serde(default = "default_min_frame_size")]
    pub min_frame_size: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hit_tolerance: default_hit_tolerance(),
            min_frame_size: default_min_frame_size(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_stroke_width() -> f64 {
    4.0
}

fn default_font_size() -> f64 {
    32.0
}

fn default_font_family() -> String {
    "Arial".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_text_outline_width() -> f64 {
    2.0
}

fn default_arrow_length() -> f64 {
    15.0
}

fn default_arrow_angle() -> f64 {
    30.0
}

fn default_marker_diameter() -> f64 {
    32.0
}

fn default_hit_tolerance() -> f64 {
    10.0
}

fn default_min_frame_size() -> f64 {
    crate::draw::annotation::DEGENERATE_FRAME_SIZE
}
