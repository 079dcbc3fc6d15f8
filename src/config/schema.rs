//! Configuration schema types for `eid.toml`
//!
//! Defines the structure and validation rules for engine configuration.

use serde::{Deserialize, Serialize};

use crate::color::{ColorError, KColor, Theme};
use crate::engine::DisplaySettings;
use crate::models::FALLBACK_LANGUAGE;
use crate::render::Vector;

/// Text box display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Text box width in pixels
    #[serde(default = "default_width")]
    pub width: u32,
    /// Description language (falls back to English per entry)
    #[serde(default = "default_language")]
    pub language: String,
    /// Distance between lines in pixels
    #[serde(default = "default_line_height")]
    pub line_height: u32,
    /// Base text position [x, y]
    #[serde(default = "default_position")]
    pub position: [f32; 2],
    #[serde(default = "default_scale")]
    pub scale: f32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            language: default_language(),
            line_height: default_line_height(),
            position: default_position(),
            scale: default_scale(),
        }
    }
}

fn default_width() -> u32 {
    130
}

fn default_language() -> String {
    FALLBACK_LANGUAGE.to_string()
}

fn default_line_height() -> u32 {
    11
}

fn default_position() -> [f32; 2] {
    [60.0, 45.0]
}

fn default_scale() -> f32 {
    1.0
}

impl DisplayConfig {
    pub fn to_settings(&self) -> DisplaySettings {
        DisplaySettings {
            width: self.width,
            language: self.language.clone(),
            line_height: self.line_height,
            position: Vector::new(self.position[0], self.position[1]),
            scale: self.scale,
        }
    }
}

/// Theme colors as CSS color strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorsConfig {
    #[serde(default = "default_name_color")]
    pub name: String,
    #[serde(default = "default_text_color")]
    pub text: String,
    #[serde(default = "default_transformation_color")]
    pub transformation: String,
    #[serde(default = "default_error_color")]
    pub error: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        Self {
            name: default_name_color(),
            text: default_text_color(),
            transformation: default_transformation_color(),
            error: default_error_color(),
        }
    }
}

fn default_name_color() -> String {
    "#ffffff".to_string()
}

fn default_text_color() -> String {
    "#cccccc".to_string()
}

fn default_transformation_color() -> String {
    "#08cfed".to_string()
}

fn default_error_color() -> String {
    "#ff3333".to_string()
}

impl ColorsConfig {
    /// Parse every color into a theme.
    pub fn theme(&self) -> Result<Theme, ColorError> {
        Ok(Theme {
            name: KColor::parse(&self.name)?,
            text: KColor::parse(&self.text)?,
            transformation: KColor::parse(&self.transformation)?,
            error: KColor::parse(&self.error)?,
        })
    }

    fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("name", self.name.as_str()),
            ("text", self.text.as_str()),
            ("transformation", self.transformation.as_str()),
            ("error", self.error.as_str()),
        ]
    }
}

/// Data packs loaded at start-up
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PacksConfig {
    /// Glob patterns, relative to the config file
    #[serde(default)]
    pub include: Vec<String>,
    /// Abort on the first bad pack object
    #[serde(default)]
    pub strict: bool,
}

/// Complete `eid.toml` configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EidConfig {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub colors: ColorsConfig,
    #[serde(default)]
    pub packs: PacksConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "display.width")
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "eid.toml: '{}' {}", self.field, self.message)
    }
}

impl EidConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();
        let mut fail = |field: &str, message: String| {
            errors.push(ConfigValidationError { field: field.to_string(), message });
        };

        if self.display.width == 0 {
            fail("display.width", "must be a positive integer".to_string());
        }
        if self.display.line_height == 0 {
            fail("display.line_height", "must be a positive integer".to_string());
        }
        if !(self.display.scale.is_finite() && self.display.scale > 0.0) {
            fail("display.scale", "must be a positive number".to_string());
        }
        if self.display.language.trim().is_empty() {
            fail("display.language", "must be a non-empty string".to_string());
        }
        for (name, value) in self.colors.entries() {
            if let Err(e) = KColor::parse(value) {
                fail(&format!("colors.{}", name), format!("is not a valid color: {}", e));
            }
        }

        errors
    }
}
