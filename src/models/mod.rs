//! Data models for descriptions, icons and data pack objects

mod description;
mod entity;
mod icon;
mod object;

// Re-export all public types
pub use description::{DescriptionObject, FALLBACK_LANGUAGE, NO_DESCRIPTION};
pub use entity::{
    EntityClass, EntityKey, EntityKeyError, ENTITY_PICKUP, ENTITY_PLAYER, PICKUP_CARD,
    PICKUP_COLLECTIBLE, PICKUP_PILL, PICKUP_TRINKET, WILDCARD_SUBTYPE,
};
pub use icon::{InlineIcon, SpriteHandle, DEFAULT_ICON_SPRITE};
pub use object::{
    AssignDef, BlendDef, ColorDef, DescriptionDef, IconDef, ItemDef, PackObject, TargetIdValue,
    TransformationDef, Warning,
};
