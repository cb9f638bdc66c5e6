//! Configuration enum types.

use crate::draw::{Color, DEFAULT_TEXT_COLOR};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a palette name, a hex string or RGB values.
///
/// # Examples
/// ```toml
/// # Palette name
/// default_text_color = "red"
///
/// # Hex string
/// default_text_color = "#f59e0b"
///
/// # RGB color (0-255 per component)
/// default_text_color = [255, 128, 0]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Palette name (white, red, amber, green, blue) or `#rrggbb`
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Name(DEFAULT_TEXT_COLOR.to_string())
    }
}

/// Maps a text palette name to its hex value.
fn palette_hex(name: &str) -> Option<&'static str> {
    match name.to_lowercase().as_str() {
        "white" => Some("#FFFFFF"),
        "red" => Some("#ef4444"),
        "amber" | "orange" => Some("#f59e0b"),
        "green" => Some("#22c55e"),
        "blue" => Some("#3b82f6"),
        _ => None,
    }
}

impl ColorSpec {
    /// Resolves the specification to the `#rrggbb` string stored on annotations.
    ///
    /// Unknown names and malformed hex strings fall back to white with a warning.
    pub fn to_hex(&self) -> String {
        match self {
            ColorSpec::Name(name) => {
                if let Some(hex) = palette_hex(name) {
                    return hex.to_string();
                }
                match Color::from_hex(name) {
                    Some(_) => name.clone(),
                    None => {
                        warn!("Unknown color '{}', using white", name);
                        DEFAULT_TEXT_COLOR.to_string()
                    }
                }
            }
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b).to_hex(),
        }
    }
}
