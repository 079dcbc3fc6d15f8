//! Icon registry for inline icon shortcuts.

use std::collections::HashMap;

use crate::models::InlineIcon;

use super::traits::Registry;

/// Stock icons available before any pack is loaded: (shortcut, animation, frame, width, height).
const DEFAULT_ICONS: &[(&str, &str, i32, u32, u32)] = &[
    ("Bullet", "Bullet", 0, 5, 6),
    ("ArrowUp", "Arrows", 0, 8, 9),
    ("ArrowDown", "Arrows", 1, 8, 9),
    ("Warning", "Warning", 0, 8, 9),
    ("Heart", "Hearts", 0, 9, 9),
    ("Coin", "Pickups", 0, 9, 9),
    ("Key", "Pickups", 1, 9, 9),
    ("Bomb", "Pickups", 2, 9, 9),
    ("Blank", "Blank", 0, 0, 0),
];

/// Registry mapping shortcut names to inline icons.
#[derive(Debug, Clone, Default)]
pub struct IconRegistry {
    icons: HashMap<String, InlineIcon>,
}

impl IconRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { icons: HashMap::new() }
    }

    /// Create a registry holding the stock icons.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for &(shortcut, animation, frame, width, height) in DEFAULT_ICONS {
            registry.register(shortcut, InlineIcon::new(animation, frame, width, height));
        }
        registry
    }

    /// Register an icon under a shortcut.
    ///
    /// Shortcuts are case sensitive. An existing icon with the same shortcut
    /// is replaced.
    pub fn register(&mut self, shortcut: impl Into<String>, icon: InlineIcon) {
        let shortcut = shortcut.into();
        if self.icons.contains_key(&shortcut) {
            tracing::debug!(shortcut = %shortcut, "Replacing inline icon");
        }
        self.icons.insert(shortcut, icon);
    }

    /// Get an icon by shortcut.
    pub fn get(&self, shortcut: &str) -> Option<&InlineIcon> {
        self.icons.get(shortcut)
    }

    /// Check if an icon with the given shortcut exists.
    pub fn contains(&self, shortcut: &str) -> bool {
        self.icons.contains_key(shortcut)
    }

    /// Get the number of icons in the registry.
    pub fn len(&self) -> usize {
        self.icons.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.icons.is_empty()
    }

    /// Clear all icons from the registry.
    pub fn clear(&mut self) {
        self.icons.clear();
    }

    /// Iterate over all icons in the registry.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &InlineIcon)> {
        self.icons.iter()
    }
}

impl Registry<InlineIcon> for IconRegistry {
    fn contains(&self, name: &str) -> bool {
        self.icons.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&InlineIcon> {
        self.icons.get(name)
    }

    fn len(&self) -> usize {
        self.icons.len()
    }

    fn clear(&mut self) {
        self.icons.clear();
    }

    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_> {
        Box::new(self.icons.keys())
    }
}
