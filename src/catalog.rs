//! Read-only game data catalog.
//!
//! Item names and default sprites come from the host game. The engine only
//! reads them, through the [`ItemCatalog`] trait; [`StaticCatalog`] is a
//! map-backed implementation filled from data packs or by the host.

use std::collections::HashMap;

use crate::models::{EntityClass, ItemDef, SpriteHandle};

/// Lookup of item metadata by class and numeric id.
pub trait ItemCatalog {
    /// In-game name of an item.
    fn name(&self, class: EntityClass, id: i32) -> Option<&str>;

    /// Sprite used to draw the item's icon.
    fn sprite(&self, class: EntityClass, id: i32) -> Option<&SpriteHandle>;
}

#[derive(Debug, Clone, PartialEq)]
struct CatalogEntry {
    name: String,
    sprite: SpriteHandle,
}

/// Catalog backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    entries: HashMap<(EntityClass, i32), CatalogEntry>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an item. Items without a sprite use the class sheet.
    pub fn insert(&mut self, class: EntityClass, id: i32, name: &str, sprite: Option<SpriteHandle>) {
        let sprite = sprite.unwrap_or_else(|| default_sprite(class, id));
        self.entries.insert((class, id), CatalogEntry { name: name.to_string(), sprite });
    }

    /// Add an item from a data pack definition.
    pub fn insert_def(&mut self, def: &ItemDef) {
        self.insert(def.class, def.id, &def.name, def.sprite.as_deref().map(SpriteHandle::new));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl ItemCatalog for StaticCatalog {
    fn name(&self, class: EntityClass, id: i32) -> Option<&str> {
        self.entries.get(&(class, id)).map(|e| e.name.as_str())
    }

    fn sprite(&self, class: EntityClass, id: i32) -> Option<&SpriteHandle> {
        self.entries.get(&(class, id)).map(|e| &e.sprite)
    }
}

/// Conventional sprite path of an item in the base game.
fn default_sprite(class: EntityClass, id: i32) -> SpriteHandle {
    match class {
        EntityClass::Collectible => SpriteHandle::new(format!("gfx/items/collectibles/collectible_{:03}.png", id)),
        EntityClass::Trinket => SpriteHandle::new(format!("gfx/items/trinkets/trinket_{:03}.png", id)),
        EntityClass::Card => SpriteHandle::new("gfx/ui/eid_cards.anm2"),
        EntityClass::Pill => SpriteHandle::new("gfx/ui/eid_pills.anm2"),
        _ => SpriteHandle::default(),
    }
}
