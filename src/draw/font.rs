//! Font descriptor for text labels.

/// Font configuration for text labels.
///
/// Describes which font to use, including family name, weight, and style.
/// The same descriptor drives rendering and hit-test measurement so a label's
/// clickable box always matches what was painted.
#[derive(Debug, Clone, PartialEq)]
pub struct FontDescriptor {
    /// Font family name (e.g., "Arial", "Sans", "DejaVu Sans")
    pub family: String,

    /// Font weight (e.g., "normal", "bold", "light" or numeric 100-900)
    pub weight: String,

    /// Font style (e.g., "normal", "italic", "oblique")
    pub style: String,
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Arial".to_string(),
            weight: "bold".to_string(),
            style: "normal".to_string(),
        }
    }
}

impl FontDescriptor {
    /// Creates a new font descriptor with the specified parameters.
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }

    /// Converts this descriptor to a Pango font description string with an
    /// absolute pixel size.
    ///
    /// Format: "Family Style Weight Sizepx"
    /// Example: "Arial Bold 32px" or "Monospace Italic 24px"
    pub fn to_pango_string(&self, size_px: f64) -> String {
        let mut parts = vec![self.family.clone()];

        if !self.style.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.style));
        }

        if !self.weight.eq_ignore_ascii_case("normal") {
            parts.push(capitalize_first(&self.weight));
        }

        parts.push(format!("{}px", size_px.round() as i32));

        parts.join(" ")
    }

    /// Builds the Pango description used for layout.
    pub fn to_pango(&self, size_px: f64) -> pango::FontDescription {
        pango::FontDescription::from_string(&self.to_pango_string(size_px))
    }
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}
