//! Description objects returned by the description registry.

use serde::{Deserialize, Serialize};

use super::entity::{EntityClass, EntityKey};

/// Language every lookup falls back to.
pub const FALLBACK_LANGUAGE: &str = "en";

/// Description text of the sentinel returned when nothing is registered.
pub const NO_DESCRIPTION: &str = "(No Description available)";

/// A registered description.
///
/// Objects handed out by the registry are copies; the stored entry is only
/// changed through `DescriptionRegistry::append_to_description`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DescriptionObject {
    pub entity_key: EntityKey,
    pub class: EntityClass,
    pub name: String,
    pub description: String,
    /// Joined display names of assigned transformations (may be empty)
    #[serde(default)]
    pub transformation_label: String,
    /// `type.variant.subtype` string of the key the entry was registered under
    pub raw_id: String,
    pub language: String,
    /// False for the synthesized "no description" object
    #[serde(default = "default_registered")]
    pub registered: bool,
    /// Stamp of the stored entry this object was copied from; changes
    /// whenever the entry is replaced
    #[serde(default)]
    pub generation: u64,
}

fn default_registered() -> bool {
    true
}

impl DescriptionObject {
    pub fn new(
        class: EntityClass,
        entity_key: EntityKey,
        name: impl Into<String>,
        description: impl Into<String>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            entity_key,
            class,
            name: name.into(),
            description: description.into(),
            transformation_label: String::new(),
            raw_id: entity_key.to_string(),
            language: language.into(),
            registered: true,
            generation: 0,
        }
    }

    /// The object returned when no entry exists in any language.
    pub fn missing(class: EntityClass, entity_key: EntityKey, language: &str) -> Self {
        Self {
            entity_key,
            class,
            name: String::new(),
            description: NO_DESCRIPTION.to_string(),
            transformation_label: String::new(),
            raw_id: entity_key.to_string(),
            language: language.to_string(),
            registered: false,
            generation: 0,
        }
    }

    pub fn is_missing(&self) -> bool {
        !self.registered
    }
}
