//! Transformation registry and target assignments.

use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{EntityClass, EntityKey, FALLBACK_LANGUAGE};

/// Error when creating a transformation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TransformationError {
    /// A transformation with this unique name already exists for the language
    #[error("transformation '{name}' already exists for language '{language}'")]
    DuplicateKey { name: String, language: String },
}

/// Error when parsing an assignment target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TargetError {
    #[error("unknown target type '{0}', expected collectible, trinket, card, pill or entity")]
    UnknownType(String),
    #[error("invalid identifier '{id}' for target type '{target_type}'")]
    InvalidIdentifier { target_type: TargetType, id: String },
}

/// Kind of object a transformation can be assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetType {
    Collectible,
    Trinket,
    Card,
    Pill,
    Entity,
}

impl TargetType {
    pub fn as_str(self) -> &'static str {
        match self {
            TargetType::Collectible => "collectible",
            TargetType::Trinket => "trinket",
            TargetType::Card => "card",
            TargetType::Pill => "pill",
            TargetType::Entity => "entity",
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetType {
    type Err = TargetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collectible" => Ok(TargetType::Collectible),
            "trinket" => Ok(TargetType::Trinket),
            "card" => Ok(TargetType::Card),
            "pill" => Ok(TargetType::Pill),
            "entity" => Ok(TargetType::Entity),
            _ => Err(TargetError::UnknownType(s.to_string())),
        }
    }
}

/// A normalized `(target type, identifier)` pair.
///
/// Pickup identifiers are integers; entity identifiers are
/// `"type.variant.subtype"` strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetKey {
    target_type: TargetType,
    identifier: String,
}

impl TargetKey {
    /// Validate and normalize an identifier for a target type.
    ///
    /// ```
    /// use eidtext::registry::{TargetKey, TargetType};
    ///
    /// let a = TargetKey::new(TargetType::Collectible, " 12").unwrap();
    /// let b = TargetKey::new(TargetType::Collectible, "12").unwrap();
    /// assert_eq!(a, b);
    ///
    /// assert!(TargetKey::new(TargetType::Entity, "3.1").is_err());
    /// ```
    pub fn new(target_type: TargetType, identifier: &str) -> Result<Self, TargetError> {
        let invalid = || TargetError::InvalidIdentifier {
            target_type,
            id: identifier.to_string(),
        };
        let identifier = match target_type {
            TargetType::Entity => identifier.parse::<EntityKey>().map_err(|_| invalid())?.to_string(),
            _ => identifier.trim().parse::<i64>().map_err(|_| invalid())?.to_string(),
        };
        Ok(Self { target_type, identifier })
    }

    /// The target an entity key is assigned through.
    ///
    /// Pickup keys map to their pickup type and id; everything else is an
    /// entity target.
    pub fn from_entity_key(key: EntityKey) -> Self {
        let (target_type, identifier) = match key.class() {
            EntityClass::Collectible => (TargetType::Collectible, key.subtype.to_string()),
            EntityClass::Trinket => (TargetType::Trinket, key.subtype.to_string()),
            EntityClass::Card => (TargetType::Card, key.subtype.to_string()),
            EntityClass::Pill => (TargetType::Pill, key.subtype.to_string()),
            _ => (TargetType::Entity, key.to_string()),
        };
        Self { target_type, identifier }
    }

    pub fn target_type(&self) -> TargetType {
        self.target_type
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl fmt::Display for TargetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.target_type, self.identifier)
    }
}

/// A named transformation in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transformation {
    pub unique_name: String,
    pub display_name: String,
    pub language: String,
}

/// Registry of transformations and their assignment edges.
#[derive(Debug, Clone, Default)]
pub struct TransformationRegistry {
    /// (language, unique name) -> transformation, in creation order
    transformations: IndexMap<(String, String), Transformation>,
    assignments: HashMap<TargetKey, IndexSet<String>>,
}

impl TransformationRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transformation.
    ///
    /// Fails with `DuplicateKey` when `unique_name` already exists for
    /// `language`; the existing entry is left untouched.
    pub fn create_transformation(
        &mut self,
        unique_name: &str,
        display_name: &str,
        language: &str,
    ) -> Result<(), TransformationError> {
        let key = (language.to_string(), unique_name.to_string());
        if self.transformations.contains_key(&key) {
            return Err(TransformationError::DuplicateKey {
                name: unique_name.to_string(),
                language: language.to_string(),
            });
        }
        self.transformations.insert(
            key,
            Transformation {
                unique_name: unique_name.to_string(),
                display_name: display_name.to_string(),
                language: language.to_string(),
            },
        );
        Ok(())
    }

    /// Get a transformation by unique name in a specific language.
    pub fn get(&self, unique_name: &str, language: &str) -> Option<&Transformation> {
        self.transformations.get(&(language.to_string(), unique_name.to_string()))
    }

    /// Check if a unique name exists in any language.
    pub fn contains(&self, unique_name: &str) -> bool {
        self.transformations.keys().any(|(_, name)| name == unique_name)
    }

    /// Position of a unique name among all distinct unique names, in
    /// creation order.
    pub fn index_of(&self, unique_name: &str) -> Option<usize> {
        let mut seen: IndexSet<&str> = IndexSet::new();
        for (_, name) in self.transformations.keys() {
            seen.insert(name.as_str());
        }
        seen.get_index_of(unique_name)
    }

    /// Display name with English fallback, then the unique name itself.
    pub fn transformation_name<'a>(&'a self, unique_name: &'a str, language: &str) -> &'a str {
        self.get(unique_name, language)
            .or_else(|| self.get(unique_name, FALLBACK_LANGUAGE))
            .map(|t| t.display_name.as_str())
            .unwrap_or(unique_name)
    }

    /// Add an edge between a target and a transformation.
    ///
    /// Returns false when the edge already existed.
    pub fn assign(&mut self, target: TargetKey, unique_name: &str) -> bool {
        if !self.contains(unique_name) {
            tracing::debug!(%target, transformation = unique_name, "Assigning undeclared transformation");
        }
        self.assignments.entry(target).or_default().insert(unique_name.to_string())
    }

    /// Remove an edge. Returns false (and changes nothing) if it did not exist.
    pub fn remove(&mut self, target: &TargetKey, unique_name: &str) -> bool {
        let Some(edges) = self.assignments.get_mut(target) else {
            return false;
        };
        let removed = edges.shift_remove(unique_name);
        if edges.is_empty() {
            self.assignments.remove(target);
        }
        removed
    }

    /// Transformations assigned to a target, in insertion order.
    pub fn get_assignments(&self, target: &TargetKey) -> Vec<&str> {
        self.assignments
            .get(target)
            .map(|edges| edges.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// The "Transformation:" label for a target: display names joined by ", ".
    pub fn transformation_label(&self, target: &TargetKey, language: &str) -> String {
        self.get_assignments(target)
            .into_iter()
            .map(|name| self.transformation_name(name, language))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Number of transformations across languages.
    pub fn len(&self) -> usize {
        self.transformations.len()
    }

    /// Check if no transformations have been created.
    pub fn is_empty(&self) -> bool {
        self.transformations.is_empty()
    }

    /// Iterate over transformations in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Transformation> {
        self.transformations.values()
    }

    /// Clear all transformations and assignments.
    pub fn clear(&mut self) {
        self.transformations.clear();
        self.assignments.clear();
    }
}
