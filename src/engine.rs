//! The engine context: every registry plus display state in one value.
//!
//! An [`Eid`] is created once by the host and passed by reference to every
//! call. [`Eid::reload`] discards all registered data at once.

use std::io::Read;
use thiserror::Error;

use crate::catalog::{ItemCatalog, StaticCatalog};
use crate::color::{ColorError, KColor, Theme};
use crate::font::LINE_HEIGHT;
use crate::layout::{Line, LineFitter};
use crate::markup::{
    replace_short_markup_strings, CraftingIcons, ItemIcons, MarkupResolver, StyledRun,
    TransformationIcons,
};
use crate::models::{
    ColorDef, DescriptionDef, DescriptionObject, EntityClass, EntityKey, EntityKeyError, PackObject,
    Warning, FALLBACK_LANGUAGE,
};
use crate::parser::{parse_stream, ParseError};
use crate::registry::{
    ColorEntry, ColorRegistry, DescriptionRegistry, IconRegistry, TargetError, TargetKey,
    TargetType, TransformationError, TransformationRegistry,
};
use crate::render::{render_lines, DisplayState, RenderSink, Vector};

/// Horizontal space reserved for a bulletpoint icon.
pub const BULLET_INDENT: u32 = 10;

/// Error raised while applying data pack objects.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum PackError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{class} description requires an 'id'")]
    MissingId { class: EntityClass },
    #[error("entity description requires an 'entity' key")]
    MissingEntityKey,
    #[error(transparent)]
    EntityKey(#[from] EntityKeyError),
    #[error("color '{shortcut}' needs either 'color' or 'blend'")]
    EmptyColor { shortcut: String },
    #[error("color '{shortcut}': {source}")]
    Color { shortcut: String, source: ColorError },
    #[error(transparent)]
    Transformation(#[from] TransformationError),
    #[error(transparent)]
    Target(#[from] TargetError),
}

/// Display parameters of the host.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplaySettings {
    /// Text box width in pixels
    pub width: u32,
    pub language: String,
    /// Distance between lines in pixels
    pub line_height: u32,
    /// Base text position
    pub position: Vector,
    pub scale: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            width: 130,
            language: FALLBACK_LANGUAGE.to_string(),
            line_height: LINE_HEIGHT + 1,
            position: Vector::new(60.0, 45.0),
            scale: 1.0,
        }
    }
}

/// Registry context for the description engine.
#[derive(Debug, Clone)]
pub struct Eid {
    pub icons: IconRegistry,
    pub colors: ColorRegistry,
    pub descriptions: DescriptionRegistry,
    pub transformations: TransformationRegistry,
    pub catalog: StaticCatalog,
    pub display: DisplayState,
    pub settings: DisplaySettings,
    pub theme: Theme,
}

impl Default for Eid {
    fn default() -> Self {
        Self::new()
    }
}

impl Eid {
    /// Engine with stock icons and colors and default settings.
    pub fn new() -> Self {
        Self::with_settings(DisplaySettings::default(), Theme::default())
    }

    pub fn with_settings(settings: DisplaySettings, theme: Theme) -> Self {
        Self {
            icons: IconRegistry::with_defaults(),
            colors: ColorRegistry::with_defaults(),
            descriptions: DescriptionRegistry::new(),
            transformations: TransformationRegistry::new(),
            catalog: StaticCatalog::new(),
            display: DisplayState::new(settings.position),
            settings,
            theme,
        }
    }

    /// Recreate every registry empty (stock icons and colors included).
    /// Settings and theme are kept.
    pub fn reload(&mut self) {
        tracing::debug!("Reloading registries");
        *self = Self::with_settings(self.settings.clone(), self.theme);
    }

    // ========== Descriptions ==========

    pub fn add_collectible(&mut self, id: i32, name: &str, description: &str, language: &str) {
        self.descriptions
            .add_description(EntityClass::Collectible, EntityKey::collectible(id), name, description, language);
    }

    pub fn add_trinket(&mut self, id: i32, name: &str, description: &str, language: &str) {
        self.descriptions
            .add_description(EntityClass::Trinket, EntityKey::trinket(id), name, description, language);
    }

    pub fn add_card(&mut self, id: i32, name: &str, description: &str, language: &str) {
        self.descriptions
            .add_description(EntityClass::Card, EntityKey::card(id), name, description, language);
    }

    pub fn add_pill(&mut self, id: i32, name: &str, description: &str, language: &str) {
        self.descriptions
            .add_description(EntityClass::Pill, EntityKey::pill(id), name, description, language);
    }

    /// Birthright descriptions are keyed by player type.
    pub fn add_birthright(&mut self, player_type: i32, name: &str, description: &str, language: &str) {
        self.descriptions.add_description(
            EntityClass::Birthright,
            EntityKey::birthright(player_type),
            name,
            description,
            language,
        );
    }

    pub fn add_entity(&mut self, key: EntityKey, name: &str, description: &str, language: &str) {
        self.descriptions.add_description(EntityClass::Entity, key, name, description, language);
    }

    /// Description in the configured language with modifiers applied and
    /// the transformation label filled in.
    pub fn describe(&self, class: EntityClass, key: EntityKey) -> DescriptionObject {
        self.get_description(class, key, &self.settings.language)
    }

    /// Entries missing in every language still carry the catalog name of
    /// the object, when the catalog knows it.
    pub fn get_description(&self, class: EntityClass, key: EntityKey, language: &str) -> DescriptionObject {
        let mut obj = self.descriptions.get_description(class, key, language);
        if obj.is_missing() {
            if let Some(name) = self.get_object_name(key) {
                obj.name = name.to_string();
            }
        }
        obj.transformation_label = self.transformation_label(key, language);
        obj
    }

    /// In-game name of an object from the catalog.
    pub fn get_object_name(&self, key: EntityKey) -> Option<&str> {
        self.catalog.name(key.class(), key.subtype)
    }

    /// Label of the transformations assigned to `key`, or to its wildcard
    /// subtype when the exact key has none.
    fn transformation_label(&self, key: EntityKey, language: &str) -> String {
        let label = self
            .transformations
            .transformation_label(&TargetKey::from_entity_key(key), language);
        if !label.is_empty() || key.is_wildcard() {
            return label;
        }
        self.transformations
            .transformation_label(&TargetKey::from_entity_key(key.wildcard()), language)
    }

    // ========== Transformations ==========

    pub fn create_transformation(
        &mut self,
        unique_name: &str,
        display_name: &str,
        language: &str,
    ) -> Result<(), TransformationError> {
        self.transformations.create_transformation(unique_name, display_name, language)
    }

    /// Assign a transformation to a target given as strings, e.g.
    /// `("collectible", "12")` or `("entity", "5.100.-1")`.
    pub fn assign_transformation(
        &mut self,
        target_type: &str,
        id: &str,
        unique_name: &str,
    ) -> Result<bool, TargetError> {
        let target = TargetKey::new(target_type.parse::<TargetType>()?, id)?;
        Ok(self.transformations.assign(target, unique_name))
    }

    pub fn remove_transformation(
        &mut self,
        target_type: &str,
        id: &str,
        unique_name: &str,
    ) -> Result<bool, TargetError> {
        let target = TargetKey::new(target_type.parse::<TargetType>()?, id)?;
        Ok(self.transformations.remove(&target, unique_name))
    }

    /// Transformations assigned to an entity.
    pub fn get_transformation(&self, key: EntityKey) -> Vec<&str> {
        self.transformations.get_assignments(&TargetKey::from_entity_key(key))
    }

    // ========== Markup and layout ==========

    /// Resolver over the full icon provider chain.
    pub fn resolver(&self) -> MarkupResolver<'_> {
        MarkupResolver::new(&self.colors)
            .with_provider(CraftingIcons)
            .with_provider(ItemIcons::new(&self.catalog))
            .with_provider(TransformationIcons::new(&self.transformations))
            .with_provider(&self.icons)
    }

    pub fn resolve_markup(&self, text: &str, base: KColor) -> Vec<StyledRun> {
        self.resolver().resolve_str(text, base)
    }

    /// Fit text to `width` pixels.
    pub fn fit_lines(&self, text: &str, width: u32, base: KColor) -> Vec<Line> {
        let runs = self.resolve_markup(text, base);
        LineFitter::new(base).fit(&runs, width)
    }

    /// Fit text to `width` pixels, returning each line as markup.
    pub fn fit_text_to_width(&self, text: &str, width: u32) -> Vec<String> {
        self.fit_lines(text, width, self.theme.text)
            .into_iter()
            .map(|line| line.markup)
            .collect()
    }

    /// Rendered width of a string with icon markup resolved.
    pub fn get_str_width(&self, text: &str) -> u32 {
        self.resolve_markup(text, self.theme.text).iter().map(StyledRun::width).sum()
    }

    /// Draw a string without wrapping. Returns the last color used.
    pub fn render_string(&self, sink: &mut dyn RenderSink, text: &str, position: Vector, base: KColor) -> KColor {
        let lines = self.fit_lines(text, u32::MAX, base);
        render_lines(sink, &lines, position, self.settings.scale, self.settings.line_height, base)
    }

    /// Draw a full description at the current text position: name,
    /// transformation line, then one bulletpoint per `#`-separated line.
    ///
    /// Returns the position below the last drawn line.
    pub fn render_description(&mut self, sink: &mut dyn RenderSink, obj: &DescriptionObject) -> Vector {
        let origin = self.display.position.get_text_position();
        let end = self.draw_description(sink, obj, origin);
        self.display.set_last_described(obj.clone());
        end
    }

    /// Draw the permanent text, if one is displayed.
    pub fn render_permanent_text(&self, sink: &mut dyn RenderSink) -> Option<Vector> {
        let obj = self.display.permanent_text()?;
        Some(self.draw_description(sink, obj, self.display.position.get_text_position()))
    }

    fn draw_description(&self, sink: &mut dyn RenderSink, obj: &DescriptionObject, origin: Vector) -> Vector {
        let scale = self.settings.scale;
        let step = self.settings.line_height as f32 * scale;
        let mut pos = origin;

        if !obj.name.is_empty() {
            self.render_string(sink, &obj.name, pos, self.theme.name);
            pos.y += step;
        }
        if !obj.transformation_label.is_empty() {
            let label = format!("Transformation: {}", obj.transformation_label);
            self.render_string(sink, &label, pos, self.theme.transformation);
            pos.y += step;
        }

        let base = if obj.is_missing() { self.theme.error } else { self.theme.text };
        let resolver = self.resolver();
        let text_width = self.settings.width.saturating_sub(BULLET_INDENT);

        for bullet in obj.description.split('#') {
            let bullet = replace_short_markup_strings(bullet.trim());
            if bullet.is_empty() {
                continue;
            }
            let (bullet_icon, text) = resolver.split_bulletpoint(&bullet);
            if let Some((shortcut, icon)) = &bullet_icon {
                let x = pos.x + icon.left_offset * scale;
                sink.draw_icon(shortcut, icon, x, pos.y + icon.top_offset * scale, base);
            }

            let runs = resolver.resolve_str(text, base);
            let lines = LineFitter::new(base).fit(&runs, text_width);
            let text_pos = Vector::new(pos.x + BULLET_INDENT as f32 * scale, pos.y);
            render_lines(sink, &lines, text_pos, scale, self.settings.line_height, base);
            pos.y += step * lines.len().max(1) as f32;
        }
        pos
    }

    // ========== Data packs ==========

    /// Apply parsed pack objects in order.
    ///
    /// In lenient mode a bad object is skipped with a warning; in strict
    /// mode the first bad object aborts loading (earlier objects stay
    /// applied).
    pub fn load_pack(&mut self, objects: Vec<PackObject>, strict: bool) -> Result<Vec<Warning>, PackError> {
        let mut warnings = Vec::new();
        for (index, obj) in objects.into_iter().enumerate() {
            if let Err(e) = self.apply_object(obj) {
                if strict {
                    return Err(e);
                }
                tracing::warn!(object = index + 1, "Skipping pack object: {}", e);
                warnings.push(Warning::new(e.to_string(), index + 1));
            }
        }
        Ok(warnings)
    }

    /// Parse a JSON5 stream and apply it.
    pub fn load_pack_reader<R: Read>(&mut self, reader: R, strict: bool) -> Result<Vec<Warning>, PackError> {
        let parsed = parse_stream(reader);
        if strict {
            if let Some(w) = parsed.warnings.first() {
                return Err(ParseError { message: w.message.clone(), line: w.line }.into());
            }
        }
        for w in &parsed.warnings {
            tracing::warn!(line = w.line, "Pack parse error: {}", w.message);
        }
        let mut warnings = parsed.warnings;
        warnings.extend(self.load_pack(parsed.objects, strict)?);
        Ok(warnings)
    }

    fn apply_object(&mut self, obj: PackObject) -> Result<(), PackError> {
        match obj {
            PackObject::Description(def) => self.apply_description(def)?,
            PackObject::Icon(def) => self.icons.register(def.shortcut.clone(), def.to_icon()),
            PackObject::Color(def) => self.apply_color(def)?,
            PackObject::Transformation(def) => {
                let language = def.language.as_deref().unwrap_or(FALLBACK_LANGUAGE);
                self.create_transformation(&def.name, &def.display_name, language)?;
            }
            PackObject::Assign(def) => {
                self.assign_transformation(&def.target, &def.id.to_string(), &def.transformation)?;
            }
            PackObject::Item(def) => self.catalog.insert_def(&def),
        }
        Ok(())
    }

    fn apply_description(&mut self, def: DescriptionDef) -> Result<(), PackError> {
        let key = match def.class {
            EntityClass::Entity => def.entity.as_deref().ok_or(PackError::MissingEntityKey)?.parse()?,
            class => {
                let id = def.id.ok_or(PackError::MissingId { class })?;
                EntityKey::for_class(class, id).ok_or(PackError::MissingEntityKey)?
            }
        };
        let language = def.language.as_deref().unwrap_or(FALLBACK_LANGUAGE);
        self.descriptions.add_description(def.class, key, &def.name, &def.description, language);
        Ok(())
    }

    fn apply_color(&mut self, def: ColorDef) -> Result<(), PackError> {
        let parse = |s: &str| {
            KColor::parse(s).map_err(|source| PackError::Color { shortcut: def.shortcut.clone(), source })
        };
        let entry = match (&def.blend, &def.color) {
            (Some(blend), _) => {
                let target = parse(&blend.with)?;
                let fraction = blend.fraction;
                ColorEntry::dynamic(move |base: KColor| base.interpolate(target, fraction))
            }
            (None, Some(color)) => ColorEntry::from(parse(color)?),
            (None, None) => return Err(PackError::EmptyColor { shortcut: def.shortcut }),
        };
        self.colors.register(def.shortcut, entry);
        Ok(())
    }
}
