//! Drawing fitted lines to a sink, and the on-screen text state.
//!
//! The engine never touches a screen. It issues draw calls to a
//! [`RenderSink`]; [`AnsiSink`] prints to a terminal with 24-bit colors and
//! [`RecordingSink`] captures the calls.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::color::KColor;
use crate::layout::{ElementContent, Line};
use crate::models::{DescriptionObject, InlineIcon};

/// ANSI escape sequence to reset all formatting
pub const ANSI_RESET: &str = "\x1b[0m";

/// Convert a color to an ANSI 24-bit foreground escape sequence.
///
/// ```
/// use eidtext::color::KColor;
/// use eidtext::render::color_to_ansi_fg;
///
/// assert_eq!(color_to_ansi_fg(KColor::new(1.0, 0.0, 0.0, 1.0)), "\x1b[38;2;255;0;0m");
/// ```
pub fn color_to_ansi_fg(color: KColor) -> String {
    let rgba = color.to_rgba8();
    format!("\x1b[38;2;{};{};{}m", rgba[0], rgba[1], rgba[2])
}

/// A screen position or offset in pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, rhs: Vector) -> Vector {
        Vector::new(self.x + rhs.x, self.y + rhs.y)
    }
}

/// Receiver of draw calls.
pub trait RenderSink {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: KColor);

    fn draw_icon(&mut self, shortcut: &str, icon: &InlineIcon, x: f32, y: f32, color: KColor);
}

/// A captured draw call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Text { text: String, x: f32, y: f32, color: KColor },
    Icon { shortcut: String, icon: InlineIcon, x: f32, y: f32, color: KColor },
}

/// Sink that records every call in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub calls: Vec<DrawCall>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSink for RecordingSink {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, color: KColor) {
        self.calls.push(DrawCall::Text { text: text.to_string(), x, y, color });
    }

    fn draw_icon(&mut self, shortcut: &str, icon: &InlineIcon, x: f32, y: f32, color: KColor) {
        self.calls.push(DrawCall::Icon {
            shortcut: shortcut.to_string(),
            icon: icon.clone(),
            x,
            y,
            color,
        });
    }
}

/// Sink that writes terminal text.
///
/// Calls on a new `y` start a new output line. Icons print as `[shortcut]`
/// on the line of their text, found by removing their scaled top offset.
#[derive(Debug, Clone)]
pub struct AnsiSink {
    output: String,
    color: bool,
    scale: f32,
    last_y: Option<f32>,
}

impl Default for AnsiSink {
    fn default() -> Self {
        Self::new(false)
    }
}

impl AnsiSink {
    /// `color` enables escape sequences; disable it when not writing to a tty.
    pub fn new(color: bool) -> Self {
        Self { output: String::new(), color, scale: 1.0, last_y: None }
    }

    /// Scale the draw calls were issued with.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    fn move_to(&mut self, y: f32) {
        if let Some(last) = self.last_y {
            if last != y {
                self.output.push('\n');
            }
        }
        self.last_y = Some(y);
    }

    fn write(&mut self, text: &str, color: KColor) {
        if self.color {
            self.output.push_str(&color_to_ansi_fg(color));
            self.output.push_str(text);
            self.output.push_str(ANSI_RESET);
        } else {
            self.output.push_str(text);
        }
    }

    /// The rendered text, ending with a newline if anything was drawn.
    pub fn finish(mut self) -> String {
        if self.last_y.is_some() {
            self.output.push('\n');
        }
        self.output
    }
}

impl RenderSink for AnsiSink {
    fn draw_text(&mut self, text: &str, _x: f32, y: f32, color: KColor) {
        self.move_to(y);
        self.write(text, color);
    }

    fn draw_icon(&mut self, shortcut: &str, icon: &InlineIcon, _x: f32, y: f32, color: KColor) {
        self.move_to(y - icon.top_offset * self.scale);
        self.write(&format!("[{}]", shortcut), color);
    }
}

/// Draw fitted lines starting at `origin`, one every `line_height * scale`
/// pixels. Returns the color in effect after the last line.
pub fn render_lines(
    sink: &mut dyn RenderSink,
    lines: &[Line],
    origin: Vector,
    scale: f32,
    line_height: u32,
    base: KColor,
) -> KColor {
    let mut color = base;
    for (row, line) in lines.iter().enumerate() {
        let y = origin.y + (row as u32 * line_height) as f32 * scale;
        for element in &line.elements {
            let x = origin.x + element.x as f32 * scale;
            match &element.content {
                ElementContent::Text(text) => sink.draw_text(text, x, y, element.color),
                ElementContent::Icon { shortcut, icon } => {
                    let icon_x = x + icon.left_offset * scale;
                    let icon_y = y + icon.top_offset * scale;
                    sink.draw_icon(shortcut, icon, icon_x, icon_y, element.color)
                }
            }
        }
        color = line.end_color;
    }
    color
}

/// Where descriptions are drawn: a base position plus named offsets.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextPosition {
    base: Vector,
    modifiers: IndexMap<String, Vector>,
}

impl TextPosition {
    pub fn new(base: Vector) -> Self {
        Self { base, modifiers: IndexMap::new() }
    }

    /// Add or replace a named offset.
    pub fn add_text_pos_modifier(&mut self, name: &str, offset: Vector) {
        self.modifiers.insert(name.to_string(), offset);
    }

    /// Remove a named offset. Returns false if it was not present.
    pub fn remove_text_pos_modifier(&mut self, name: &str) -> bool {
        self.modifiers.shift_remove(name).is_some()
    }

    /// Move the base position.
    pub fn alter_text_pos(&mut self, offset: Vector) {
        self.base = self.base + offset;
    }

    pub fn set_base(&mut self, base: Vector) {
        self.base = base;
    }

    /// Base position with every modifier applied.
    pub fn get_text_position(&self) -> Vector {
        self.modifiers.values().fold(self.base, |pos, offset| pos + *offset)
    }
}

/// Host-facing display state: text position, permanent text and the last
/// described object.
#[derive(Debug, Clone, Default)]
pub struct DisplayState {
    pub position: TextPosition,
    permanent: Option<DescriptionObject>,
    last_described: Option<DescriptionObject>,
}

impl DisplayState {
    pub fn new(base: Vector) -> Self {
        Self { position: TextPosition::new(base), ..Self::default() }
    }

    /// Show a description until [`hide_permanent_text`](Self::hide_permanent_text).
    pub fn display_permanent_text(&mut self, obj: DescriptionObject) {
        self.permanent = Some(obj);
    }

    pub fn hide_permanent_text(&mut self) {
        self.permanent = None;
    }

    pub fn is_displaying_text(&self) -> bool {
        self.permanent.is_some()
    }

    pub fn permanent_text(&self) -> Option<&DescriptionObject> {
        self.permanent.as_ref()
    }

    pub fn set_last_described(&mut self, obj: DescriptionObject) {
        self.last_described = Some(obj);
    }

    pub fn last_described(&self) -> Option<&DescriptionObject> {
        self.last_described.as_ref()
    }
}
