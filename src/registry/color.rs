//! Color registry for color markup shortcuts.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::color::KColor;

use super::traits::Registry;

/// A color computed from the base color at resolution time.
pub type ColorCallback = Arc<dyn Fn(KColor) -> KColor + Send + Sync>;

/// Shortcut that resets the color to the base color of the string.
pub const RESET_SHORTCUT: &str = "CR";

/// Stock static colors: (shortcut, r, g, b).
const DEFAULT_COLORS: &[(&str, f32, f32, f32)] = &[
    ("ColorText", 0.8, 0.8, 0.8),
    ("ColorTransform", 0.03, 0.81, 0.93),
    ("ColorError", 1.0, 0.2, 0.2),
    ("ColorRed", 1.0, 0.25, 0.25),
    ("ColorGreen", 0.3, 1.0, 0.3),
    ("ColorBlue", 0.4, 0.6, 1.0),
    ("ColorYellow", 1.0, 1.0, 0.2),
    ("ColorGray", 0.6, 0.6, 0.6),
    ("ColorWhite", 1.0, 1.0, 1.0),
    ("ColorBlack", 0.0, 0.0, 0.0),
    ("ColorOrange", 1.0, 0.6, 0.2),
    ("ColorPink", 1.0, 0.55, 0.75),
    ("ColorPurple", 0.7, 0.4, 1.0),
    ("ColorLime", 0.7, 1.0, 0.2),
    ("ColorCyan", 0.3, 1.0, 1.0),
];

/// A registered color: a fixed value or a function of the base color.
#[derive(Clone)]
pub enum ColorEntry {
    Static(KColor),
    Dynamic(ColorCallback),
}

impl ColorEntry {
    /// Build a dynamic entry from a function.
    pub fn dynamic<F>(f: F) -> Self
    where
        F: Fn(KColor) -> KColor + Send + Sync + 'static,
    {
        ColorEntry::Dynamic(Arc::new(f))
    }

    /// The color this entry produces for a given base color.
    pub fn apply(&self, base: KColor) -> KColor {
        match self {
            ColorEntry::Static(color) => *color,
            ColorEntry::Dynamic(callback) => callback(base),
        }
    }
}

impl fmt::Debug for ColorEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorEntry::Static(color) => f.debug_tuple("Static").field(color).finish(),
            ColorEntry::Dynamic(_) => f.write_str("Dynamic(<callback>)"),
        }
    }
}

impl From<KColor> for ColorEntry {
    fn from(color: KColor) -> Self {
        ColorEntry::Static(color)
    }
}

/// Registry mapping shortcut names to colors.
#[derive(Debug, Clone, Default)]
pub struct ColorRegistry {
    colors: HashMap<String, ColorEntry>,
}

impl ColorRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { colors: HashMap::new() }
    }

    /// Create a registry holding the stock colors and the `CR` reset.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for &(shortcut, r, g, b) in DEFAULT_COLORS {
            registry.register(shortcut, KColor::new(r, g, b, 1.0));
        }
        registry.register(RESET_SHORTCUT, ColorEntry::dynamic(|base| base));
        registry
    }

    /// Register a color under a shortcut, replacing any existing entry.
    pub fn register(&mut self, shortcut: impl Into<String>, entry: impl Into<ColorEntry>) {
        let shortcut = shortcut.into();
        if self.colors.contains_key(&shortcut) {
            tracing::debug!(shortcut = %shortcut, "Replacing color");
        }
        self.colors.insert(shortcut, entry.into());
    }

    /// Get a color entry by shortcut.
    pub fn get(&self, shortcut: &str) -> Option<&ColorEntry> {
        self.colors.get(shortcut)
    }

    /// Check if a color with the given shortcut exists.
    pub fn contains(&self, shortcut: &str) -> bool {
        self.colors.contains_key(shortcut)
    }

    /// Resolve a color shortcut against a base color.
    ///
    /// Returns the resolved color and `true` when the shortcut is a
    /// registered color, or `base` unchanged and `false` otherwise.
    ///
    /// ```
    /// use eidtext::color::KColor;
    /// use eidtext::registry::ColorRegistry;
    ///
    /// let colors = ColorRegistry::with_defaults();
    /// let base = KColor::new(0.2, 0.2, 0.2, 1.0);
    ///
    /// let (color, found) = colors.resolve_color_markup("CR", base);
    /// assert!(found);
    /// assert_eq!(color, base);
    ///
    /// let (color, found) = colors.resolve_color_markup("Nope", base);
    /// assert!(!found);
    /// assert_eq!(color, base);
    /// ```
    pub fn resolve_color_markup(&self, shortcut: &str, base: KColor) -> (KColor, bool) {
        match self.colors.get(shortcut) {
            Some(entry) => (entry.apply(base), true),
            None => (base, false),
        }
    }

    /// Get the number of colors in the registry.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Clear all colors from the registry.
    pub fn clear(&mut self) {
        self.colors.clear();
    }
}

impl Registry<ColorEntry> for ColorRegistry {
    fn contains(&self, name: &str) -> bool {
        self.colors.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&ColorEntry> {
        self.colors.get(name)
    }

    fn len(&self) -> usize {
        self.colors.len()
    }

    fn clear(&mut self) {
        self.colors.clear();
    }

    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        Box::new(self.colors.keys())
    }
}
