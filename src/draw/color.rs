//! RGBA color type, hex parsing and the editor's color palettes.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use planmarker::draw::Color;
/// let red = Color::from_hex("#ef4444").unwrap();
/// assert_eq!(red.to_hex(), "#ef4444");
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 8-bit channels.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: 1.0,
        }
    }

    /// Parses `#rrggbb` or `#rgb` (leading `#` optional, case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        match digits.len() {
            6 => Some(Self::from_rgb8(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                let expand = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                Some(Self::from_rgb8(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => None,
        }
    }

    /// Formats the color as lowercase `#rrggbb`, dropping alpha.
    pub fn to_hex(&self) -> String {
        let to_u8 = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", to_u8(self.r), to_u8(self.g), to_u8(self.b))
    }

    /// Perceived brightness (ITU-R BT.601 weights).
    pub fn brightness(&self) -> f64 {
        self.r * 0.299 + self.g * 0.587 + self.b * 0.114
    }

    /// Black for light colors, white for dark ones; used for text outlines.
    pub fn contrasting(&self) -> Color {
        if self.brightness() > 0.5 { BLACK } else { WHITE }
    }
}

/// Opaque white.
pub const WHITE: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 1.0,
    a: 1.0,
};

/// Opaque black.
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};

/// Colors offered by the text/shape color picker, in display order.
pub const TEXT_PALETTE: [&str; 5] = ["#FFFFFF", "#ef4444", "#f59e0b", "#22c55e", "#3b82f6"];

/// Initial picker color for new labels and shapes.
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Color::from_hex("#FFFFFF"), Some(WHITE));
        assert_eq!(Color::from_hex("000"), Some(BLACK));
        assert_eq!(Color::from_hex("#ef4444").unwrap().to_hex(), "#ef4444");
    }

    #[test]
    fn rejects_malformed_hex() {
        assert!(Color::from_hex("#12345").is_none());
        assert!(Color::from_hex("#gggggg").is_none());
        assert!(Color::from_hex("").is_none());
        assert!(Color::from_hex("#ééé").is_none());
    }

    #[test]
    fn contrasting_outline_flips_with_brightness() {
        assert_eq!(WHITE.contrasting(), BLACK);
        assert_eq!(BLACK.contrasting(), WHITE);
        assert_eq!(Color::from_hex("#3b82f6").unwrap().contrasting(), WHITE);
    }

    #[test]
    fn palette_entries_are_valid_colors() {
        for hex in TEXT_PALETTE {
            assert!(Color::from_hex(hex).is_some(), "{hex} should parse");
        }
    }
}
