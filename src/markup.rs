//! Markup resolution: turns `{{shortcut}}` tags into icons and color changes
//!
//! Tags are resolved against an ordered chain of [`IconProvider`]s (first
//! match wins), then against the [`ColorRegistry`]. Tags nothing recognizes
//! are kept as literal text, braces included.

use regex::Regex;
use std::sync::OnceLock;

use crate::catalog::ItemCatalog;
use crate::color::KColor;
use crate::font::{generate_placeholder_string, str_width};
use crate::models::{EntityClass, InlineIcon, SpriteHandle};
use crate::registry::{ColorRegistry, IconRegistry, TransformationRegistry};
use crate::tokenizer::{tokenize, RawToken};

/// Icon used when a line's first word selects nothing else.
pub const DEFAULT_BULLET: &str = "Bullet";

/// Largest crafting value with an icon.
pub const MAX_CRAFTING_VALUE: u32 = 8;

/// First word -> bulletpoint icon shortcut.
const BULLETPOINT_ICONS: &[(&str, &str)] = &[
    ("↑", "ArrowUp"),
    ("↓", "ArrowDown"),
    ("!!!", "Warning"),
    ("{{ArrowUp}}", "ArrowUp"),
    ("{{ArrowDown}}", "ArrowDown"),
    ("{{Warning}}", "Warning"),
    ("{{Heart}}", "Heart"),
    ("{{Coin}}", "Coin"),
    ("{{Key}}", "Key"),
    ("{{Bomb}}", "Bomb"),
];

/// Shorthand text -> markup replacements.
const SHORT_MARKUP: &[(&str, &str)] = &[
    ("↑", "{{ArrowUp}}"),
    ("↓", "{{ArrowDown}}"),
    ("!!!", "{{Warning}}"),
];

/// One styled unit of a resolved description, in display order.
#[derive(Debug, Clone, PartialEq)]
pub enum StyledRun {
    /// Plain text
    Text(String),
    /// An inline icon and the shortcut it came from
    Icon { shortcut: String, icon: InlineIcon },
    /// A color change applying to every following run
    ColorChange { shortcut: String, color: KColor },
}

impl StyledRun {
    /// Layout width in pixels (color changes are zero width).
    pub fn width(&self) -> u32 {
        match self {
            StyledRun::Text(text) => str_width(text),
            StyledRun::Icon { icon, .. } => icon.width,
            StyledRun::ColorChange { .. } => 0,
        }
    }

    /// The markup this run was resolved from.
    pub fn to_markup(&self) -> String {
        match self {
            StyledRun::Text(text) => text.clone(),
            StyledRun::Icon { shortcut, .. } | StyledRun::ColorChange { shortcut, .. } => {
                format!("{{{{{}}}}}", shortcut)
            }
        }
    }
}

/// Reconstruct the markup string of a run sequence.
pub fn runs_to_markup(runs: &[StyledRun]) -> String {
    runs.iter().map(StyledRun::to_markup).collect()
}

/// A source of inline icons for shortcuts.
pub trait IconProvider {
    /// The icon for `shortcut`, or `None` if this provider does not know it.
    fn try_resolve(&self, shortcut: &str) -> Option<InlineIcon>;
}

impl<P: IconProvider + ?Sized> IconProvider for &P {
    fn try_resolve(&self, shortcut: &str) -> Option<InlineIcon> {
        (**self).try_resolve(shortcut)
    }
}

impl IconProvider for IconRegistry {
    fn try_resolve(&self, shortcut: &str) -> Option<InlineIcon> {
        self.get(shortcut).cloned()
    }
}

/// Icons for crafting ingredients: `Crafting1` .. `Crafting8`.
#[derive(Debug, Clone, Copy, Default)]
pub struct CraftingIcons;

impl IconProvider for CraftingIcons {
    fn try_resolve(&self, shortcut: &str) -> Option<InlineIcon> {
        let value: u32 = shortcut.strip_prefix("Crafting")?.parse().ok()?;
        if value == 0 || value > MAX_CRAFTING_VALUE {
            return None;
        }
        Some(InlineIcon::new("Crafting", value as i32 - 1, 10, 9).with_offsets(-1.0, -1.0))
    }
}

fn item_icon_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(Collectible|Trinket|Card|Pill)(\d+)$").expect("item icon pattern is valid")
    })
}

/// Icons generated per item from the game catalog:
/// `Collectible<id>`, `Trinket<id>`, `Card<id>`, `Pill<id>`.
pub struct ItemIcons<'a> {
    catalog: &'a dyn ItemCatalog,
}

impl<'a> ItemIcons<'a> {
    pub fn new(catalog: &'a dyn ItemCatalog) -> Self {
        Self { catalog }
    }
}

impl IconProvider for ItemIcons<'_> {
    fn try_resolve(&self, shortcut: &str) -> Option<InlineIcon> {
        let captures = item_icon_pattern().captures(shortcut)?;
        let id: i32 = captures[2].parse().ok()?;
        let class = match &captures[1] {
            "Collectible" => EntityClass::Collectible,
            "Trinket" => EntityClass::Trinket,
            "Card" => EntityClass::Card,
            _ => EntityClass::Pill,
        };
        let sprite: SpriteHandle = self.catalog.sprite(class, id)?.clone();

        let icon = match class {
            EntityClass::Collectible | EntityClass::Trinket => {
                InlineIcon::new("Idle", 0, 16, 16).with_offsets(-1.0, -4.0)
            }
            EntityClass::Card => InlineIcon::new("Cards", id, 9, 9),
            _ => InlineIcon::new("Pills", id - 1, 9, 9),
        };
        Some(icon.with_sprite(sprite))
    }
}

/// Icons for declared transformations: `Transformation<uniqueName>`.
pub struct TransformationIcons<'a> {
    transformations: &'a TransformationRegistry,
}

impl<'a> TransformationIcons<'a> {
    pub fn new(transformations: &'a TransformationRegistry) -> Self {
        Self { transformations }
    }
}

impl IconProvider for TransformationIcons<'_> {
    fn try_resolve(&self, shortcut: &str) -> Option<InlineIcon> {
        let name = shortcut.strip_prefix("Transformation")?;
        let index = self.transformations.index_of(name)?;
        Some(InlineIcon::new("Transformation", index as i32, 16, 16).with_offsets(-1.0, -4.0))
    }
}

/// A text section with a single color, from [`MarkupResolver::filter_color_markup`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSection {
    pub text: String,
    pub color: KColor,
    pub width: u32,
}

/// Resolves markup tokens into styled runs.
pub struct MarkupResolver<'a> {
    providers: Vec<Box<dyn IconProvider + 'a>>,
    colors: &'a ColorRegistry,
}

impl<'a> MarkupResolver<'a> {
    /// Resolver with no icon providers.
    pub fn new(colors: &'a ColorRegistry) -> Self {
        Self { providers: Vec::new(), colors }
    }

    /// Append a provider; earlier providers take priority.
    pub fn with_provider<P: IconProvider + 'a>(mut self, provider: P) -> Self {
        self.providers.push(Box::new(provider));
        self
    }

    /// The icon for a shortcut from the first provider that knows it.
    pub fn get_icon(&self, shortcut: &str) -> Option<InlineIcon> {
        self.providers.iter().find_map(|p| p.try_resolve(shortcut))
    }

    /// Resolve tokens into runs.
    ///
    /// Dynamic colors receive `base`. Adjacent text is merged into one run.
    pub fn resolve<'t, I>(&self, tokens: I, base: KColor) -> Vec<StyledRun>
    where
        I: IntoIterator<Item = RawToken<'t>>,
    {
        let mut runs = Vec::new();
        for token in tokens {
            match token {
                RawToken::Literal(text) => push_text(&mut runs, text),
                RawToken::Tag(name) => {
                    if let Some(icon) = self.get_icon(name) {
                        runs.push(StyledRun::Icon { shortcut: name.to_string(), icon });
                        continue;
                    }
                    let (color, found) = self.colors.resolve_color_markup(name, base);
                    if found {
                        runs.push(StyledRun::ColorChange { shortcut: name.to_string(), color });
                    } else {
                        tracing::trace!(shortcut = name, "Unresolved markup left as text");
                        push_text(&mut runs, &format!("{{{{{}}}}}", name));
                    }
                }
            }
        }
        runs
    }

    /// Tokenize and resolve a string.
    pub fn resolve_str(&self, text: &str, base: KColor) -> Vec<StyledRun> {
        self.resolve(tokenize(text), base)
    }

    /// Read a single color markup such as `"{{ColorRed}}"`.
    ///
    /// Returns `base` and `false` when `markup` is not exactly one color tag.
    pub fn get_color(&self, markup: &str, base: KColor) -> (KColor, bool) {
        let mut tokens = tokenize(markup.trim());
        match (tokens.next(), tokens.next()) {
            (Some(RawToken::Tag(name)), None) => self.colors.resolve_color_markup(name, base),
            _ => (base, false),
        }
    }

    /// Bulletpoint icon for a description line, chosen by its first word.
    pub fn handle_bulletpoint_icon(&self, text: &str) -> Option<InlineIcon> {
        self.split_bulletpoint(text).0.map(|(_, icon)| icon)
    }

    /// Bulletpoint shortcut and icon, plus the line text with the selecting
    /// word removed.
    ///
    /// When no entry of the first-word table matches, the default bullet is
    /// used and the text is returned unchanged.
    pub fn split_bulletpoint<'t>(&self, text: &'t str) -> (Option<(&'static str, InlineIcon)>, &'t str) {
        let trimmed = text.trim_start();
        let first_word = trimmed.split_whitespace().next().unwrap_or("");

        let matched = BULLETPOINT_ICONS
            .iter()
            .find(|(word, _)| *word == first_word)
            .and_then(|(_, shortcut)| Some((*shortcut, self.get_icon(shortcut)?)));

        match matched {
            Some(bullet) => (Some(bullet), trimmed[first_word.len()..].trim_start()),
            None => (self.get_icon(DEFAULT_BULLET).map(|icon| (DEFAULT_BULLET, icon)), text),
        }
    }

    /// Split text into sections at each color change.
    ///
    /// Icons are replaced by placeholder strings of their width so section
    /// widths stay accurate.
    pub fn filter_color_markup(&self, text: &str, base: KColor) -> Vec<ColorSection> {
        let mut sections = Vec::new();
        let mut current = String::new();
        let mut color = base;

        for run in self.resolve_str(text, base) {
            match run {
                StyledRun::Text(t) => current.push_str(&t),
                StyledRun::Icon { icon, .. } => current.push_str(&generate_placeholder_string(icon.width)),
                StyledRun::ColorChange { color: next, .. } => {
                    if !current.is_empty() {
                        let text = std::mem::take(&mut current);
                        sections.push(ColorSection { width: str_width(&text), text, color });
                    }
                    color = next;
                }
            }
        }
        if !current.is_empty() {
            sections.push(ColorSection { width: str_width(&current), text: current, color });
        }
        sections
    }

    /// Replace icon markup with placeholder gaps.
    ///
    /// Returns the text (color markup kept) and each icon with the visible
    /// width of the text before it.
    pub fn filter_icon_markup(&self, text: &str) -> (String, Vec<(InlineIcon, u32)>) {
        let mut out = String::new();
        let mut icons = Vec::new();
        let mut visible_width = 0;

        for run in self.resolve_str(text, KColor::WHITE) {
            match run {
                StyledRun::Text(t) => {
                    visible_width += str_width(&t);
                    out.push_str(&t);
                }
                StyledRun::Icon { icon, .. } => {
                    out.push_str(&generate_placeholder_string(icon.width));
                    let width = icon.width;
                    icons.push((icon, visible_width));
                    visible_width += width;
                }
                color @ StyledRun::ColorChange { .. } => out.push_str(&color.to_markup()),
            }
        }
        (out, icons)
    }
}

fn push_text(runs: &mut Vec<StyledRun>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(StyledRun::Text(last)) = runs.last_mut() {
        last.push_str(text);
    } else {
        runs.push(StyledRun::Text(text.to_string()));
    }
}

/// Rewrite shorthand characters (`↑`, `↓`, `!!!`) into icon markup.
///
/// ```
/// use eidtext::markup::replace_short_markup_strings;
///
/// assert_eq!(replace_short_markup_strings("↑ +1 Damage"), "{{ArrowUp}} +1 Damage");
/// ```
pub fn replace_short_markup_strings(text: &str) -> String {
    SHORT_MARKUP
        .iter()
        .fold(text.to_string(), |acc, (short, markup)| acc.replace(short, markup))
}
