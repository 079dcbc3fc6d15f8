//! Top-level data pack object types.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::entity::EntityClass;
use super::icon::{InlineIcon, SpriteHandle};

/// An object in a data pack - Description, Icon, Color, Transformation, Assign, or Item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum PackObject {
    Description(DescriptionDef),
    Icon(IconDef),
    Color(ColorDef),
    Transformation(TransformationDef),
    Assign(AssignDef),
    Item(ItemDef),
}

/// A description entry.
///
/// Pickup classes use `id`; the `entity` class uses `entity` as
/// `"type.variant.subtype"` (subtype `-1` for all subtypes).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DescriptionDef {
    pub class: EntityClass,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default)]
    pub name: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// An inline icon registered under a shortcut.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IconDef {
    pub shortcut: String,
    pub animation: String,
    #[serde(default)]
    pub frame: i32,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub left_offset: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub top_offset: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
}

impl IconDef {
    pub fn to_icon(&self) -> InlineIcon {
        let mut icon = InlineIcon::new(&self.animation, self.frame, self.width, self.height);
        if let Some(left) = self.left_offset {
            icon.left_offset = left;
        }
        if let Some(top) = self.top_offset {
            icon.top_offset = top;
        }
        if let Some(sprite) = &self.sprite {
            icon.sprite = SpriteHandle::new(sprite);
        }
        icon
    }
}

/// A color shortcut.
///
/// With `blend`, the shortcut is dynamic: the base color at resolution time
/// is interpolated toward `blend.with` by `blend.fraction`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorDef {
    pub shortcut: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blend: Option<BlendDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlendDef {
    pub with: String,
    pub fraction: f32,
}

/// A transformation declaration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TransformationDef {
    pub name: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// A target identifier as written in a pack: a number, or a string such as
/// `"5.100.12"` for entity targets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TargetIdValue {
    Number(i64),
    Text(String),
}

impl fmt::Display for TargetIdValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TargetIdValue::Number(n) => write!(f, "{}", n),
            TargetIdValue::Text(s) => f.write_str(s),
        }
    }
}

/// Assigns a transformation to a target.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssignDef {
    pub target: String,
    pub id: TargetIdValue,
    pub transformation: String,
}

/// A game-data catalog entry (name and sprite for an item id).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemDef {
    pub class: EntityClass,
    pub id: i32,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprite: Option<String>,
}

/// A warning message from parsing/loading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Warning {
    pub message: String,
    pub line: usize,
}

impl Warning {
    pub fn new(message: impl Into<String>, line: usize) -> Self {
        Self { message: message.into(), line }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.line > 0 {
            write!(f, "line {}: {}", self.line, self.message)
        } else {
            f.write_str(&self.message)
        }
    }
}
