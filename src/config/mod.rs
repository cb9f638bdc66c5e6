//! Configuration file support for planmarker.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/planmarker/config.toml`. Settings include stroke and label
//! defaults, arrow and marker dimensions, pointer tolerances, and keyboard shortcuts.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod keybindings;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{ArrowConfig, DrawingConfig, InteractionConfig, MarkerConfig};

use crate::draw::{FontDescriptor, RenderStyle};
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// stroke_width = 4.0
/// default_font_size = 32.0
/// default_text_color = "white"
///
/// [arrow]
/// length = 15.0
/// angle_degrees = 30.0
///
/// [markers]
/// diameter = 32.0
///
/// [interaction]
/// hit_tolerance = 10.0
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// redo = ["Ctrl+Y", "Ctrl+Shift+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Stroke and label defaults
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Arrow appearance settings
    #[serde(default)]
    pub arrow: ArrowConfig,

    /// Icon marker settings
    #[serde(default)]
    pub markers: MarkerConfig,

    /// Pointer interaction tuning
    #[serde(default)]
    pub interaction: InteractionConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// This method ensures that user-provided config values won't cause rendering
    /// or interaction issues. Invalid values are clamped to the nearest valid value
    /// and a warning is logged.
    ///
    /// Validated ranges:
    /// - `stroke_width`: 1.0 - 20.0
    /// - `default_font_size`: 8.0 - 96.0
    /// - `text_outline_width`: 0.0 - 8.0
    /// - `arrow.length`: 5.0 - 50.0
    /// - `arrow.angle_degrees`: 15.0 - 60.0
    /// - `markers.diameter`: 12.0 - 96.0
    /// - `interaction.hit_tolerance`: 2.0 - 40.0
    /// - `interaction.min_frame_size`: 0.0 - 50.0
    pub fn validate_and_clamp(&mut self) {
        clamp_setting("stroke_width", &mut self.drawing.stroke_width, 1.0, 20.0);
        clamp_setting(
            "default_font_size",
            &mut self.drawing.default_font_size,
            8.0,
            96.0,
        );
        clamp_setting(
            "text_outline_width",
            &mut self.drawing.text_outline_width,
            0.0,
            8.0,
        );
        clamp_setting("arrow length", &mut self.arrow.length, 5.0, 50.0);
        clamp_setting("arrow angle", &mut self.arrow.angle_degrees, 15.0, 60.0);
        clamp_setting("marker diameter", &mut self.markers.diameter, 12.0, 96.0);
        clamp_setting(
            "hit_tolerance",
            &mut self.interaction.hit_tolerance,
            2.0,
            40.0,
        );
        clamp_setting(
            "min_frame_size",
            &mut self.interaction.min_frame_size,
            0.0,
            50.0,
        );

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'bold'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "bold".to_string();
        }

        // Validate font style
        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        if self.drawing.font_family.trim().is_empty() {
            log::warn!("Empty font_family, falling back to 'Arial'");
            self.drawing.font_family = "Arial".to_string();
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/planmarker/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("planmarker");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// Unlike [`load`](Self::load), a missing file is an error.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        // Surface bad keybindings at load time rather than on first key press
        config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)
            .with_context(|| format!("Invalid keybindings in {}", config_path.display()))?;

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Font used for labels and label measurement.
    pub fn font_descriptor(&self) -> FontDescriptor {
        FontDescriptor::new(
            self.drawing.font_family.clone(),
            self.drawing.font_weight.clone(),
            self.drawing.font_style.clone(),
        )
    }

    /// Dimensions shared by rendering and hit-testing.
    pub fn render_style(&self) -> RenderStyle {
        RenderStyle {
            stroke_width: self.drawing.stroke_width,
            marker_diameter: self.markers.diameter,
            arrow_head_length: self.arrow.length,
            arrow_head_angle: self.arrow.angle_degrees,
            text_outline_width: self.drawing.text_outline_width,
            font: self.font_descriptor(),
        }
    }

    /// Keyboard shortcuts, falling back to the defaults if the configured set is invalid.
    pub fn action_map(&self) -> HashMap<KeyBinding, Action> {
        self.keybindings.build_action_map().unwrap_or_else(|err| {
            log::warn!("{}; using default keybindings", err);
            KeybindingsConfig::default()
                .build_action_map()
                .unwrap_or_default()
        })
    }
}

fn clamp_setting(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(value) {
        log::warn!(
            "Invalid {} {:.1}, clamping to {:.1}-{:.1} range",
            name,
            value,
            min,
            max
        );
        *value = if value.is_nan() { min } else { value.clamp(min, max) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_editor_constants() {
        let style = Config::default().render_style();
        assert_eq!(style, RenderStyle::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [drawing]
            stroke_width = 0.0
            default_font_size = 200.0
            font_weight = "extra-chunky"

            [arrow]
            angle_degrees = 90.0

            [interaction]
            hit_tolerance = 1.0
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.stroke_width, 1.0);
        assert_eq!(config.drawing.default_font_size, 96.0);
        assert_eq!(config.drawing.font_weight, "bold");
        assert_eq!(config.arrow.angle_degrees, 60.0);
        assert_eq!(config.interaction.hit_tolerance, 2.0);
        assert_eq!(config.markers.diameter, 32.0);
    }

    #[test]
    fn load_from_reads_partial_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[markers]\ndiameter = 40.0\n[keybindings]\nredo = [\"Ctrl+Shift+Z\"]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.markers.diameter, 40.0);
        assert_eq!(config.drawing.stroke_width, 4.0);

        let map = config.action_map();
        let binding = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        assert_eq!(map.get(&binding), Some(&Action::Redo));
    }

    #[test]
    fn load_from_rejects_duplicate_keybindings() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[keybindings]\nundo = [\"Ctrl+Y\"]\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Duplicate keybinding"));
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = schema["properties"].as_object().unwrap();
        for section in ["drawing", "arrow", "markers", "interaction", "keybindings"] {
            assert!(properties.contains_key(section), "missing {section}");
        }
    }
}
