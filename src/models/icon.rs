//! Inline icon definitions.

use serde::{Deserialize, Serialize};

/// Sprite sheet used when an icon does not name one.
pub const DEFAULT_ICON_SPRITE: &str = "gfx/eid_inline_icons.anm2";

/// Opaque handle to a sprite sheet owned by the host.
///
/// The engine never loads the sheet itself; the handle is passed through to
/// the rendering sink.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpriteHandle(pub String);

impl SpriteHandle {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SpriteHandle {
    fn default() -> Self {
        Self(DEFAULT_ICON_SPRITE.to_string())
    }
}

/// An icon drawn inline with description text.
///
/// `width` and `height` are the layout size in pixels. `frame = -1` asks the
/// host to play the animation instead of showing a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineIcon {
    pub animation_name: String,
    pub frame: i32,
    pub width: u32,
    pub height: u32,
    #[serde(default = "default_left_offset")]
    pub left_offset: f32,
    #[serde(default)]
    pub top_offset: f32,
    #[serde(default)]
    pub sprite: SpriteHandle,
}

fn default_left_offset() -> f32 {
    -1.0
}

impl InlineIcon {
    /// Icon on the default sprite sheet with default offsets.
    pub fn new(animation_name: impl Into<String>, frame: i32, width: u32, height: u32) -> Self {
        Self {
            animation_name: animation_name.into(),
            frame,
            width,
            height,
            left_offset: default_left_offset(),
            top_offset: 0.0,
            sprite: SpriteHandle::default(),
        }
    }

    pub fn with_offsets(mut self, left: f32, top: f32) -> Self {
        self.left_offset = left;
        self.top_offset = top;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteHandle) -> Self {
        self.sprite = sprite;
        self
    }

    /// True when the host should animate the icon.
    pub fn is_animated(&self) -> bool {
        self.frame < 0
    }
}
