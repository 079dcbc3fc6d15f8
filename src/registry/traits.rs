//! Common trait for registries that store values under shortcut names.

/// Common trait for registries keyed by a case-sensitive shortcut name.
///
/// # Example
///
/// ```
/// use eidtext::models::InlineIcon;
/// use eidtext::registry::{IconRegistry, Registry};
///
/// let mut registry = IconRegistry::new();
/// registry.register("Heart", InlineIcon::new("Hearts", 0, 9, 9));
///
/// assert!(registry.contains("Heart"));
/// assert!(!registry.contains("heart"));
/// assert_eq!(registry.len(), 1);
/// ```
pub trait Registry<V> {
    /// Check if an item with the given shortcut exists in the registry.
    fn contains(&self, name: &str) -> bool;

    /// Get an item by shortcut.
    fn get(&self, name: &str) -> Option<&V>;

    /// Get the number of items in the registry.
    fn len(&self) -> usize;

    /// Check if the registry is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all items from the registry.
    fn clear(&mut self);

    /// Get an iterator over all shortcuts in the registry.
    fn names(&self) -> Box<dyn Iterator<Item = &String> + '_>;
}
