//! Description registry with per-language tables and read-time modifiers.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

use crate::models::{DescriptionObject, EntityClass, EntityKey, FALLBACK_LANGUAGE};

/// Predicate deciding whether a modifier applies to a description.
pub type ModifierCondition = Arc<dyn Fn(&str) -> bool + Send + Sync>;
/// Function producing the modified description.
pub type ModifierTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Error when mutating a description entry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum DescriptionError {
    /// The object does not correspond to a stored entry
    #[error("no {class} description '{key}' registered for language '{language}'")]
    NotFound { class: EntityClass, key: EntityKey, language: String },
}

/// A named description modifier.
#[derive(Clone)]
pub struct DescriptionModifier {
    pub name: String,
    pub condition: ModifierCondition,
    pub transform: ModifierTransform,
}

impl DescriptionModifier {
    /// Apply to `text`, returning `None` when the condition rejects it.
    pub fn apply(&self, text: &str) -> Option<String> {
        (self.condition)(text).then(|| (self.transform)(text))
    }
}

impl fmt::Debug for DescriptionModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptionModifier").field("name", &self.name).finish_non_exhaustive()
    }
}

type TableKey = (EntityClass, EntityKey);

/// Source of entry stamps, shared by every registry so a stamp is never
/// reused after `clear` or a reload.
static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Registry of descriptions keyed by language, entity class and entity key.
///
/// Lookups fall back from the requested language to English, and from an
/// exact subtype to the wildcard subtype, before returning the
/// "no description" sentinel.
#[derive(Debug, Clone, Default)]
pub struct DescriptionRegistry {
    tables: HashMap<String, HashMap<TableKey, DescriptionObject>>,
    modifiers: IndexMap<String, DescriptionModifier>,
}

impl DescriptionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self { tables: HashMap::new(), modifiers: IndexMap::new() }
    }

    /// Store a description, replacing any entry under the same
    /// (language, class, key).
    pub fn add_description(
        &mut self,
        class: EntityClass,
        key: EntityKey,
        name: &str,
        description: &str,
        language: &str,
    ) {
        let table = self.tables.entry(language.to_string()).or_default();
        let mut obj = DescriptionObject::new(class, key, name, description, language);
        obj.generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
        if table.insert((class, key), obj).is_some() {
            tracing::debug!(%class, %key, language, "Replacing description");
        }
    }

    fn lookup(&self, class: EntityClass, key: EntityKey, language: &str) -> Option<&DescriptionObject> {
        let find = |lang: &str, k: EntityKey| self.tables.get(lang).and_then(|t| t.get(&(class, k)));

        find(language, key)
            .or_else(|| find(language, key.wildcard()))
            .or_else(|| find(FALLBACK_LANGUAGE, key))
            .or_else(|| find(FALLBACK_LANGUAGE, key.wildcard()))
    }

    /// Get the stored entry without applying modifiers.
    pub fn get_raw(&self, class: EntityClass, key: EntityKey, language: &str) -> Option<&DescriptionObject> {
        self.lookup(class, key, language)
    }

    /// Get a description with fallback and modifiers applied.
    ///
    /// Order: exact key in `language`, wildcard subtype in `language`, exact
    /// key in English, wildcard subtype in English. When all miss, returns
    /// the "no description available" sentinel.
    pub fn get_description(&self, class: EntityClass, key: EntityKey, language: &str) -> DescriptionObject {
        match self.lookup(class, key, language) {
            Some(found) => {
                let mut obj = found.clone();
                obj.description = self.apply_modifiers(&obj.description);
                obj
            }
            None => DescriptionObject::missing(class, key, language),
        }
    }

    /// Whether any entry (after fallback) exists for the key.
    pub fn has_description(&self, class: EntityClass, key: EntityKey, language: &str) -> bool {
        self.lookup(class, key, language).is_some()
    }

    /// Append `suffix` to a stored description.
    ///
    /// `obj` must be an object obtained from this registry whose entry still
    /// exists and has not been replaced since; both the stored entry and
    /// `obj` are extended. Sentinel or stale objects yield
    /// `DescriptionError::NotFound` and nothing changes.
    pub fn append_to_description(
        &mut self,
        obj: &mut DescriptionObject,
        suffix: &str,
    ) -> Result<(), DescriptionError> {
        let not_found = || DescriptionError::NotFound {
            class: obj.class,
            key: obj.entity_key,
            language: obj.language.clone(),
        };

        if obj.is_missing() {
            return Err(not_found());
        }

        let entry = self
            .tables
            .get_mut(&obj.language)
            .and_then(|t| t.get_mut(&(obj.class, obj.entity_key)))
            .filter(|entry| entry.generation == obj.generation)
            .ok_or_else(not_found)?;

        entry.description.push_str(suffix);
        obj.description.push_str(suffix);
        Ok(())
    }

    /// Register a modifier applied to every description read.
    ///
    /// Re-registering a name replaces the modifier in its original position.
    pub fn add_description_modifier<C, T>(&mut self, name: &str, condition: C, transform: T)
    where
        C: Fn(&str) -> bool + Send + Sync + 'static,
        T: Fn(&str) -> String + Send + Sync + 'static,
    {
        let modifier = DescriptionModifier {
            name: name.to_string(),
            condition: Arc::new(condition),
            transform: Arc::new(transform),
        };
        if self.modifiers.insert(name.to_string(), modifier).is_some() {
            tracing::debug!(name, "Replacing description modifier");
        }
    }

    /// Remove a modifier by name. Returns true if it existed.
    pub fn remove_description_modifier(&mut self, name: &str) -> bool {
        self.modifiers.shift_remove(name).is_some()
    }

    /// Names of registered modifiers in application order.
    pub fn modifier_names(&self) -> impl Iterator<Item = &String> {
        self.modifiers.keys()
    }

    /// Run every modifier over `text` in registration order.
    pub fn apply_modifiers(&self, text: &str) -> String {
        self.modifiers.values().fold(text.to_string(), |current, modifier| {
            modifier.apply(&current).unwrap_or(current)
        })
    }

    /// Total number of stored entries across languages.
    pub fn len(&self) -> usize {
        self.tables.values().map(HashMap::len).sum()
    }

    /// Check if the registry holds no descriptions.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Languages that have at least one entry.
    pub fn languages(&self) -> impl Iterator<Item = &String> {
        self.tables.keys()
    }

    /// Clear all descriptions and modifiers.
    pub fn clear(&mut self) {
        self.tables.clear();
        self.modifiers.clear();
    }
}
