//! Color values and CSS color string parsing
//!
//! `KColor` is the color type handed to rendering sinks: four normalized
//! `f32` channels. Colors in config files and data packs are written as CSS
//! strings and parsed here:
//! - Hex: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`
//! - Functional: `rgb()`, `rgba()`, `hsl()`, `hsla()`, `hwb()`, `oklch()`
//! - Named: `red`, `blue`, `transparent`, etc.

use image::Rgba;
use lightningcss::traits::Parse;
use lightningcss::values::color::CssColor;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tolerance used when comparing two colors channel by channel.
const COLOR_EPSILON: f32 = 0.001;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
    /// CSS parsing error from lightningcss
    #[error("CSS parse error: {0}")]
    CssParse(String),
}

/// An RGBA color with channels in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KColor {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl KColor {
    pub const WHITE: KColor = KColor::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: KColor = KColor::new(0.0, 0.0, 0.0, 1.0);
    pub const TRANSPARENT: KColor = KColor::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation between `self` and `other`.
    ///
    /// `fraction` is clamped to `0.0..=1.0`; `0.0` returns `self`.
    ///
    /// ```
    /// use eidtext::color::KColor;
    ///
    /// let mid = KColor::BLACK.interpolate(KColor::WHITE, 0.5);
    /// assert!(mid.approx_eq(KColor::new(0.5, 0.5, 0.5, 1.0)));
    /// ```
    pub fn interpolate(self, other: KColor, fraction: f32) -> KColor {
        let t = fraction.clamp(0.0, 1.0);
        KColor {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Channel-wise comparison with a small tolerance.
    pub fn approx_eq(self, other: KColor) -> bool {
        (self.r - other.r).abs() < COLOR_EPSILON
            && (self.g - other.g).abs() < COLOR_EPSILON
            && (self.b - other.b).abs() < COLOR_EPSILON
            && (self.a - other.a).abs() < COLOR_EPSILON
    }

    /// Same color with a different alpha.
    pub fn with_alpha(self, a: f32) -> KColor {
        KColor { a, ..self }
    }

    /// Convert to 8-bit channels, rounding and clamping.
    pub fn to_rgba8(self) -> Rgba<u8> {
        let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Rgba([channel(self.r), channel(self.g), channel(self.b), channel(self.a)])
    }

    /// Parse a CSS color string into a `KColor`.
    pub fn parse(s: &str) -> Result<KColor, ColorError> {
        parse_color(s).map(KColor::from)
    }
}

impl Default for KColor {
    fn default() -> Self {
        KColor::WHITE
    }
}

impl From<Rgba<u8>> for KColor {
    fn from(rgba: Rgba<u8>) -> Self {
        KColor {
            r: f32::from(rgba[0]) / 255.0,
            g: f32::from(rgba[1]) / 255.0,
            b: f32::from(rgba[2]) / 255.0,
            a: f32::from(rgba[3]) / 255.0,
        }
    }
}

/// Colors used for the fixed parts of a rendered description.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Entity name line
    pub name: KColor,
    /// Description body
    pub text: KColor,
    /// "Transformation:" line
    pub transformation: KColor,
    /// Error and fallback messages
    pub error: KColor,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            name: KColor::new(1.0, 1.0, 1.0, 1.0),
            text: KColor::new(0.8, 0.8, 0.8, 1.0),
            transformation: KColor::new(0.03, 0.81, 0.93, 1.0),
            error: KColor::new(1.0, 0.2, 0.2, 1.0),
        }
    }
}

/// Parse a CSS color string into an RGBA color.
///
/// # Examples
///
/// ```
/// use eidtext::color::parse_color;
///
/// let red = parse_color("#F00").unwrap();
/// assert_eq!(red, image::Rgba([255, 0, 0, 255]));
///
/// let green = parse_color("rgb(0, 255, 0)").unwrap();
/// assert_eq!(green, image::Rgba([0, 255, 0, 255]));
///
/// let blue = parse_color("blue").unwrap();
/// assert_eq!(blue, image::Rgba([0, 0, 255, 255]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(ColorError::Empty);
    }

    // Fast path for hex colors
    if let Some(hex) = s.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    parse_css_color(s)
}

/// Parse the digits of a hex color (without the leading '#')
fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, ColorError> {
    let digits = hex
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8).ok_or(ColorError::InvalidHex(c)))
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.as_slice() {
        // Short forms double each digit
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        [r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        [r1, r2, g1, g2, b1, b2] => Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, 255])),
        [r1, r2, g1, g2, b1, b2, a1, a2] => {
            Ok(Rgba([r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2, a1 * 16 + a2]))
        }
        other => Err(ColorError::InvalidLength(other.len())),
    }
}

/// Parse a CSS color using lightningcss (rgb, hsl, hwb, oklch, named colors)
fn parse_css_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    let css_color = CssColor::parse_string(s).map_err(|e| ColorError::CssParse(e.to_string()))?;
    css_color_to_rgba(css_color)
}

/// Convert a lightningcss CssColor to RGBA
fn css_color_to_rgba(color: CssColor) -> Result<Rgba<u8>, ColorError> {
    use lightningcss::values::color::FloatColor;

    let rgb_color = color
        .to_rgb()
        .map_err(|_| ColorError::CssParse("cannot convert color to RGB".to_string()))?;

    match rgb_color {
        CssColor::RGBA(rgba) => Ok(Rgba([rgba.red, rgba.green, rgba.blue, rgba.alpha])),
        CssColor::Float(float_color) => match float_color.as_ref() {
            FloatColor::RGB(rgb) => {
                let r = (rgb.r * 255.0).round() as u8;
                let g = (rgb.g * 255.0).round() as u8;
                let b = (rgb.b * 255.0).round() as u8;
                let a = (rgb.alpha * 255.0).round() as u8;
                Ok(Rgba([r, g, b, a]))
            }
            _ => Err(ColorError::CssParse("unexpected float color format".to_string())),
        },
        _ => Err(ColorError::CssParse("color conversion did not produce RGB".to_string())),
    }
}
