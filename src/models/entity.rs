//! Entity keys and entity classes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Subtype value meaning "every subtype of this (type, variant)".
pub const WILDCARD_SUBTYPE: i32 = -1;

/// Entity type of pickups (collectibles, trinkets, cards, pills).
pub const ENTITY_PICKUP: i32 = 5;
/// Entity type of players (birthright descriptions are keyed by player type).
pub const ENTITY_PLAYER: i32 = 1;

pub const PICKUP_PILL: i32 = 70;
pub const PICKUP_COLLECTIBLE: i32 = 100;
pub const PICKUP_CARD: i32 = 300;
pub const PICKUP_TRINKET: i32 = 350;

/// Composite `(type, variant, subtype)` key of a describable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityKey {
    pub entity_type: i32,
    pub variant: i32,
    pub subtype: i32,
}

impl EntityKey {
    pub const fn new(entity_type: i32, variant: i32, subtype: i32) -> Self {
        Self { entity_type, variant, subtype }
    }

    pub const fn collectible(id: i32) -> Self {
        Self::new(ENTITY_PICKUP, PICKUP_COLLECTIBLE, id)
    }

    pub const fn trinket(id: i32) -> Self {
        Self::new(ENTITY_PICKUP, PICKUP_TRINKET, id)
    }

    pub const fn card(id: i32) -> Self {
        Self::new(ENTITY_PICKUP, PICKUP_CARD, id)
    }

    pub const fn pill(id: i32) -> Self {
        Self::new(ENTITY_PICKUP, PICKUP_PILL, id)
    }

    /// Birthright entries are keyed by player type.
    pub const fn birthright(player_type: i32) -> Self {
        Self::new(ENTITY_PLAYER, player_type, 0)
    }

    /// Key of a numbered entry in a description table.
    ///
    /// Returns `None` for `Entity`, whose keys carry all three parts.
    ///
    /// ```
    /// use eidtext::models::{EntityClass, EntityKey};
    ///
    /// assert_eq!(EntityKey::for_class(EntityClass::Trinket, 4), Some(EntityKey::trinket(4)));
    /// assert_eq!(EntityKey::for_class(EntityClass::Entity, 4), None);
    /// ```
    pub const fn for_class(class: EntityClass, id: i32) -> Option<Self> {
        match class {
            EntityClass::Collectible => Some(Self::collectible(id)),
            EntityClass::Trinket => Some(Self::trinket(id)),
            EntityClass::Card => Some(Self::card(id)),
            EntityClass::Pill => Some(Self::pill(id)),
            EntityClass::Birthright => Some(Self::birthright(id)),
            EntityClass::Entity => None,
        }
    }

    /// Same type and variant with the wildcard subtype.
    pub const fn wildcard(self) -> Self {
        Self::new(self.entity_type, self.variant, WILDCARD_SUBTYPE)
    }

    pub const fn is_wildcard(self) -> bool {
        self.subtype == WILDCARD_SUBTYPE
    }

    /// The class this key belongs to when it is a pickup, `Entity` otherwise.
    pub fn class(self) -> EntityClass {
        match (self.entity_type, self.variant) {
            (ENTITY_PICKUP, PICKUP_COLLECTIBLE) => EntityClass::Collectible,
            (ENTITY_PICKUP, PICKUP_TRINKET) => EntityClass::Trinket,
            (ENTITY_PICKUP, PICKUP_CARD) => EntityClass::Card,
            (ENTITY_PICKUP, PICKUP_PILL) => EntityClass::Pill,
            _ => EntityClass::Entity,
        }
    }
}

impl fmt::Display for EntityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.entity_type, self.variant, self.subtype)
    }
}

/// Error for malformed `type.variant.subtype` strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid entity key '{0}', expected 'type.variant.subtype'")]
pub struct EntityKeyError(pub String);

impl FromStr for EntityKey {
    type Err = EntityKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split('.').collect();
        let [t, v, st] = parts.as_slice() else {
            return Err(EntityKeyError(s.to_string()));
        };
        let parse = |p: &str| p.parse::<i32>().map_err(|_| EntityKeyError(s.to_string()));
        Ok(EntityKey::new(parse(*t)?, parse(*v)?, parse(*st)?))
    }
}

/// The description table an entry lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityClass {
    Collectible,
    Trinket,
    Card,
    Pill,
    Birthright,
    Entity,
}

impl EntityClass {
    pub fn as_str(self) -> &'static str {
        match self {
            EntityClass::Collectible => "collectibles",
            EntityClass::Trinket => "trinkets",
            EntityClass::Card => "cards",
            EntityClass::Pill => "pills",
            EntityClass::Birthright => "birthright",
            EntityClass::Entity => "custom",
        }
    }
}

impl fmt::Display for EntityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
