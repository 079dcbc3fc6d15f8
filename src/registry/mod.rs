//! Registry traits and implementations for shortcuts and descriptions.
//!
//! This module provides:
//! - A unified `Registry` trait for shortcut-keyed registries
//! - `IconRegistry` for inline icon shortcuts
//! - `ColorRegistry` for static and dynamic color shortcuts
//! - `DescriptionRegistry` for per-language entity descriptions and modifiers
//! - `TransformationRegistry` for transformations and their assignments
//!
//! Lookups never fail hard: unknown shortcuts and missing descriptions fall
//! back to "not found" values. The only surfaced error is a duplicate
//! transformation name.

mod color;
mod description;
mod icon;
mod traits;
mod transformation;

pub use color::{ColorCallback, ColorEntry, ColorRegistry, RESET_SHORTCUT};
pub use description::{
    DescriptionError, DescriptionModifier, DescriptionRegistry, ModifierCondition,
    ModifierTransform,
};
pub use icon::IconRegistry;
pub use traits::Registry;
pub use transformation::{
    TargetError, TargetKey, TargetType, Transformation, TransformationError,
    TransformationRegistry,
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::KColor;
    use crate::models::{EntityClass, EntityKey, InlineIcon, NO_DESCRIPTION};

    fn heart_icon() -> InlineIcon {
        InlineIcon::new("Hearts", 0, 9, 9)
    }

    // ========== IconRegistry ==========

    #[test]
    fn test_icon_registry_new_is_empty() {
        let registry = IconRegistry::new();
        assert!(registry.is_empty());
        assert!(!registry.contains("Heart"));
    }

    #[test]
    fn test_icon_register_twice_is_idempotent() {
        let mut once = IconRegistry::new();
        once.register("Heart", heart_icon());

        let mut twice = IconRegistry::new();
        twice.register("Heart", heart_icon());
        twice.register("Heart", heart_icon());

        assert_eq!(once.len(), twice.len());
        assert_eq!(once.get("Heart"), twice.get("Heart"));
    }

    #[test]
    fn test_icon_register_overwrites() {
        let mut registry = IconRegistry::new();
        registry.register("Heart", heart_icon());
        registry.register("Heart", InlineIcon::new("SoulHearts", 2, 10, 8));

        let icon = registry.get("Heart").unwrap();
        assert_eq!(icon.animation_name, "SoulHearts");
        assert_eq!(icon.frame, 2);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_icon_shortcuts_case_sensitive() {
        let mut registry = IconRegistry::new();
        registry.register("Heart", heart_icon());
        assert!(registry.get("heart").is_none());
        assert!(registry.get("HEART").is_none());
    }

    #[test]
    fn test_icon_defaults() {
        let registry = IconRegistry::with_defaults();
        for shortcut in ["Bullet", "ArrowUp", "ArrowDown", "Warning"] {
            assert!(registry.contains(shortcut), "missing default icon {}", shortcut);
        }
    }

    #[test]
    fn test_registry_trait_names() {
        let mut registry = IconRegistry::new();
        registry.register("A", heart_icon());
        registry.register("B", heart_icon());
        let mut names: Vec<_> = Registry::names(&registry).cloned().collect();
        names.sort();
        assert_eq!(names, vec!["A", "B"]);
        Registry::clear(&mut registry);
        assert!(Registry::is_empty(&registry));
    }

    // ========== ColorRegistry ==========

    #[test]
    fn test_color_static_resolution() {
        let mut registry = ColorRegistry::new();
        let red = KColor::new(1.0, 0.0, 0.0, 1.0);
        registry.register("Red", red);

        let (color, found) = registry.resolve_color_markup("Red", KColor::WHITE);
        assert!(found);
        assert_eq!(color, red);
    }

    #[test]
    fn test_color_dynamic_receives_base() {
        let mut registry = ColorRegistry::new();
        registry.register("Dim", ColorEntry::dynamic(|base: KColor| base.with_alpha(base.a * 0.5)));

        let base = KColor::new(0.2, 0.4, 0.6, 1.0);
        let (color, found) = registry.resolve_color_markup("Dim", base);
        assert!(found);
        assert_eq!(color, KColor::new(0.2, 0.4, 0.6, 0.5));

        // No state carried between calls
        let (again, _) = registry.resolve_color_markup("Dim", base);
        assert_eq!(again, color);
    }

    #[test]
    fn test_color_unknown_returns_base() {
        let registry = ColorRegistry::with_defaults();
        let base = KColor::new(0.1, 0.2, 0.3, 1.0);
        assert_eq!(registry.resolve_color_markup("NotAColor", base), (base, false));
    }

    #[test]
    fn test_color_register_twice_is_idempotent() {
        let mut registry = ColorRegistry::new();
        let c = KColor::new(0.3, 0.3, 0.3, 1.0);
        registry.register("Gray", c);
        let before = registry.resolve_color_markup("Gray", KColor::BLACK);
        registry.register("Gray", c);
        assert_eq!(registry.resolve_color_markup("Gray", KColor::BLACK), before);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_color_reset_default() {
        let registry = ColorRegistry::with_defaults();
        let base = KColor::new(0.9, 0.1, 0.1, 1.0);
        assert_eq!(registry.resolve_color_markup(RESET_SHORTCUT, base), (base, true));
    }

    // ========== DescriptionRegistry ==========

    #[test]
    fn test_description_exact_lookup() {
        let mut registry = DescriptionRegistry::new();
        let key = EntityKey::collectible(1);
        registry.add_description(EntityClass::Collectible, key, "Sad Onion", "↑ +0.7 Tears", "en");

        let obj = registry.get_description(EntityClass::Collectible, key, "en");
        assert_eq!(obj.name, "Sad Onion");
        assert_eq!(obj.description, "↑ +0.7 Tears");
        assert_eq!(obj.raw_id, "5.100.1");
        assert!(!obj.is_missing());
    }

    #[test]
    fn test_description_falls_back_to_english() {
        let mut registry = DescriptionRegistry::new();
        let key = EntityKey::collectible(2);
        registry.add_description(EntityClass::Collectible, key, "The Inner Eye", "Triple shot", "en");

        for lang in ["de", "fr", "ru", "en"] {
            let obj = registry.get_description(EntityClass::Collectible, key, lang);
            assert_eq!(obj.description, "Triple shot", "language {}", lang);
        }
    }

    #[test]
    fn test_description_prefers_requested_language() {
        let mut registry = DescriptionRegistry::new();
        let key = EntityKey::trinket(1);
        registry.add_description(EntityClass::Trinket, key, "Swallowed Penny", "Coins", "en");
        registry.add_description(EntityClass::Trinket, key, "Verschluckter Penny", "Münzen", "de");

        assert_eq!(registry.get_description(EntityClass::Trinket, key, "de").description, "Münzen");
        assert_eq!(registry.get_description(EntityClass::Trinket, key, "en").description, "Coins");
    }

    #[test]
    fn test_description_wildcard_subtype() {
        let mut registry = DescriptionRegistry::new();
        let wildcard = EntityKey::new(20, 0, -1);
        registry.add_description(EntityClass::Entity, wildcard, "Monstro", "Any Monstro", "en");
        registry.add_description(EntityClass::Entity, EntityKey::new(20, 0, 1), "Monstro", "Champion", "en");

        let exact = registry.get_description(EntityClass::Entity, EntityKey::new(20, 0, 1), "en");
        assert_eq!(exact.description, "Champion");

        let other = registry.get_description(EntityClass::Entity, EntityKey::new(20, 0, 7), "en");
        assert_eq!(other.description, "Any Monstro");
        assert_eq!(other.entity_key, wildcard);
    }

    #[test]
    fn test_description_wildcard_in_language_beats_exact_english() {
        let mut registry = DescriptionRegistry::new();
        registry.add_description(EntityClass::Entity, EntityKey::new(20, 0, 3), "Monstro", "exact en", "en");
        registry.add_description(EntityClass::Entity, EntityKey::new(20, 0, -1), "Monstro", "wild de", "de");

        let obj = registry.get_description(EntityClass::Entity, EntityKey::new(20, 0, 3), "de");
        assert_eq!(obj.description, "wild de");
    }

    #[test]
    fn test_description_missing_sentinel() {
        let registry = DescriptionRegistry::new();
        let obj = registry.get_description(EntityClass::Card, EntityKey::card(99), "en");
        assert!(obj.is_missing());
        assert_eq!(obj.description, NO_DESCRIPTION);
        assert!(!registry.has_description(EntityClass::Card, EntityKey::card(99), "en"));
    }

    #[test]
    fn test_description_classes_are_separate_tables() {
        let mut registry = DescriptionRegistry::new();
        let key = EntityKey::collectible(5);
        registry.add_description(EntityClass::Collectible, key, "Item", "item text", "en");
        registry.add_description(EntityClass::Birthright, key, "Item", "birthright text", "en");

        assert_eq!(registry.get_description(EntityClass::Collectible, key, "en").description, "item text");
        assert_eq!(registry.get_description(EntityClass::Birthright, key, "en").description, "birthright text");
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_append_to_description() {
        let mut registry = DescriptionRegistry::new();
        let key = EntityKey::pill(1);
        registry.add_description(EntityClass::Pill, key, "Bad Trip", "-1 heart", "en");

        let mut obj = registry.get_description(EntityClass::Pill, key, "en");
        registry.append_to_description(&mut obj, "#Heals if at 1 heart").unwrap();
        assert_eq!(obj.description, "-1 heart#Heals if at 1 heart");
        assert_eq!(
            registry.get_description(EntityClass::Pill, key, "en").description,
            "-1 heart#Heals if at 1 heart"
        );
    }

    #[test]
    fn test_append_to_missing_is_not_found() {
        let mut registry = DescriptionRegistry::new();
        let mut obj = registry.get_description(EntityClass::Pill, EntityKey::pill(4), "en");
        let err = registry.append_to_description(&mut obj, "x").unwrap_err();
        assert!(matches!(err, DescriptionError::NotFound { .. }));
        assert_eq!(obj.description, NO_DESCRIPTION);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_append_to_stale_object_is_not_found() {
        let mut registry = DescriptionRegistry::new();
        let key = EntityKey::card(1);
        registry.add_description(EntityClass::Card, key, "Fool", "Teleports", "en");
        let mut obj = registry.get_description(EntityClass::Card, key, "en");

        registry.clear();
        assert!(registry.append_to_description(&mut obj, "!").is_err());
        assert_eq!(obj.description, "Teleports");
    }

    #[test]
    fn test_append_after_overwrite_is_not_found() {
        let mut registry = DescriptionRegistry::new();
        let key = EntityKey::card(2);
        registry.add_description(EntityClass::Card, key, "High Priestess", "Old text", "en");
        let mut old = registry.get_description(EntityClass::Card, key, "en");

        registry.add_description(EntityClass::Card, key, "High Priestess", "New text", "en");
        let err = registry.append_to_description(&mut old, "!").unwrap_err();
        assert!(matches!(err, DescriptionError::NotFound { .. }));
        assert_eq!(old.description, "Old text");
        assert_eq!(registry.get_description(EntityClass::Card, key, "en").description, "New text");

        let mut current = registry.get_description(EntityClass::Card, key, "en");
        registry.append_to_description(&mut current, "!").unwrap();
        assert_eq!(registry.get_description(EntityClass::Card, key, "en").description, "New text!");
    }

    #[test]
    fn test_append_after_clear_and_readd_is_not_found() {
        let mut registry = DescriptionRegistry::new();
        let key = EntityKey::card(3);
        registry.add_description(EntityClass::Card, key, "Empress", "Same text", "en");
        let mut obj = registry.get_description(EntityClass::Card, key, "en");

        registry.clear();
        registry.add_description(EntityClass::Card, key, "Empress", "Same text", "en");
        assert!(registry.append_to_description(&mut obj, "!").is_err());
    }

    #[test]
    fn test_modifiers_apply_in_order() {
        let mut registry = DescriptionRegistry::new();
        let key = EntityKey::collectible(3);
        registry.add_description(EntityClass::Collectible, key, "Cupid's Arrow", "Piercing", "en");
        registry.add_description_modifier("a", |_| true, |d| format!("{}A", d));
        registry.add_description_modifier("b", |_| true, |d| format!("{}B", d));

        let obj = registry.get_description(EntityClass::Collectible, key, "en");
        assert_eq!(obj.description, "PiercingAB");

        // Stored text is not modified
        let raw = registry.get_raw(EntityClass::Collectible, key, "en").unwrap();
        assert_eq!(raw.description, "Piercing");
    }

    #[test]
    fn test_modifier_condition_false_is_skipped() {
        let mut registry = DescriptionRegistry::new();
        registry.add_description_modifier("tears", |d| d.contains("Tears"), |d| d.replace("Tears", "Shots"));
        assert_eq!(registry.apply_modifiers("+1 Tears"), "+1 Shots");
        assert_eq!(registry.apply_modifiers("+1 Damage"), "+1 Damage");
    }

    #[test]
    fn test_modifier_reregister_preserves_position() {
        let mut registry = DescriptionRegistry::new();
        registry.add_description_modifier("first", |_| true, |d| format!("{}1", d));
        registry.add_description_modifier("second", |_| true, |d| format!("{}2", d));
        registry.add_description_modifier("first", |_| true, |d| format!("{}X", d));

        let names: Vec<_> = registry.modifier_names().cloned().collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(registry.apply_modifiers(""), "X2");
    }

    #[test]
    fn test_remove_modifier() {
        let mut registry = DescriptionRegistry::new();
        registry.add_description_modifier("m", |_| true, |_| "gone".to_string());
        assert!(registry.remove_description_modifier("m"));
        assert!(!registry.remove_description_modifier("m"));
        assert_eq!(registry.apply_modifiers("kept"), "kept");
    }

    // ========== TransformationRegistry ==========

    fn collectible(id: &str) -> TargetKey {
        TargetKey::new(TargetType::Collectible, id).unwrap()
    }

    #[test]
    fn test_create_duplicate_transformation_fails() {
        let mut registry = TransformationRegistry::new();
        registry.create_transformation("A", "Display", "en").unwrap();

        let err = registry.create_transformation("A", "Other", "en").unwrap_err();
        assert_eq!(
            err,
            TransformationError::DuplicateKey { name: "A".to_string(), language: "en".to_string() }
        );
        assert_eq!(registry.get("A", "en").unwrap().display_name, "Display");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_same_name_other_language_is_allowed() {
        let mut registry = TransformationRegistry::new();
        registry.create_transformation("guppy", "Guppy", "en").unwrap();
        registry.create_transformation("guppy", "Guppy (de)", "de").unwrap();
        assert_eq!(registry.transformation_name("guppy", "de"), "Guppy (de)");
        assert_eq!(registry.transformation_name("guppy", "fr"), "Guppy");
        assert_eq!(registry.index_of("guppy"), Some(0));
    }

    #[test]
    fn test_assign_twice_remove_once_is_empty() {
        let mut registry = TransformationRegistry::new();
        let target = collectible("12");
        assert!(registry.assign(target.clone(), "X"));
        assert!(!registry.assign(target.clone(), "X"));
        assert!(registry.remove(&target, "X"));
        assert!(registry.get_assignments(&target).is_empty());
    }

    #[test]
    fn test_remove_missing_edge_is_noop() {
        let mut registry = TransformationRegistry::new();
        let target = collectible("1");
        registry.assign(target.clone(), "A");
        assert!(!registry.remove(&target, "B"));
        assert!(!registry.remove(&collectible("2"), "A"));
        assert_eq!(registry.get_assignments(&target), vec!["A"]);
    }

    #[test]
    fn test_assignment_label_in_insertion_order() {
        let mut registry = TransformationRegistry::new();
        registry.create_transformation("guppy", "Guppy", "en").unwrap();
        registry.create_transformation("fly", "Beelzebub", "en").unwrap();
        let target = collectible("10");
        registry.assign(target.clone(), "fly");
        registry.assign(target.clone(), "guppy");
        registry.assign(target.clone(), "custom");

        assert_eq!(registry.transformation_label(&target, "en"), "Beelzebub, Guppy, custom");
    }

    #[test]
    fn test_target_parsing() {
        assert_eq!("Collectible".parse::<TargetType>().unwrap(), TargetType::Collectible);
        assert!("weapon".parse::<TargetType>().is_err());
        assert!(TargetKey::new(TargetType::Card, "abc").is_err());

        let entity = TargetKey::new(TargetType::Entity, "3.1.0").unwrap();
        assert_eq!(entity.identifier(), "3.1.0");
    }

    #[test]
    fn test_target_from_entity_key() {
        let key = TargetKey::from_entity_key(EntityKey::collectible(12));
        assert_eq!(key, collectible("12"));

        let key = TargetKey::from_entity_key(EntityKey::new(3, 1, 0));
        assert_eq!(key.target_type(), TargetType::Entity);
        assert_eq!(key.identifier(), "3.1.0");
    }
}
