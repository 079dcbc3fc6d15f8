//! Word wrapping of styled runs into pixel-bounded lines.
//!
//! Units are whole words (a word may contain color changes), single icons,
//! spaces and hard line breaks. Spaces are held back until the next visible
//! unit lands on the same line, so trailing spaces are never counted and
//! spaces before a wrapped unit disappear with the wrap.

use crate::color::KColor;
use crate::font::str_width;
use crate::markup::StyledRun;
use crate::models::InlineIcon;

/// What a line element draws.
#[derive(Debug, Clone, PartialEq)]
pub enum ElementContent {
    Text(String),
    Icon { shortcut: String, icon: InlineIcon },
}

/// A positioned, colored piece of a line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineElement {
    pub content: ElementContent,
    /// Horizontal offset from the line start in pixels
    pub x: u32,
    pub color: KColor,
}

impl LineElement {
    pub fn width(&self) -> u32 {
        match &self.content {
            ElementContent::Text(text) => str_width(text),
            ElementContent::Icon { icon, .. } => icon.width,
        }
    }
}

/// A fitted line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub elements: Vec<LineElement>,
    /// Color in effect after the last element
    pub end_color: KColor,
    /// Visible width in pixels
    pub width: u32,
    /// The line as markup, prefixed with the color carried over from the
    /// previous line
    pub markup: String,
}

#[derive(Debug, Clone)]
enum Piece {
    Text(String),
    Icon { shortcut: String, icon: InlineIcon },
    Color { shortcut: String, color: KColor },
}

#[derive(Debug, Clone)]
enum Unit {
    Word { pieces: Vec<Piece>, width: u32 },
    Space(String),
    Color { shortcut: String, color: KColor },
    Break,
}

fn split_units(runs: &[StyledRun]) -> Vec<Unit> {
    let mut units = Vec::new();
    let mut word: Vec<Piece> = Vec::new();
    let mut word_text = String::new();

    fn flush_text(word: &mut Vec<Piece>, word_text: &mut String) {
        if !word_text.is_empty() {
            word.push(Piece::Text(std::mem::take(word_text)));
        }
    }

    fn flush_word(units: &mut Vec<Unit>, word: &mut Vec<Piece>, word_text: &mut String) {
        flush_text(word, word_text);
        if word.is_empty() {
            return;
        }
        let pieces = std::mem::take(word);
        let width = pieces
            .iter()
            .map(|p| match p {
                Piece::Text(t) => str_width(t),
                _ => 0,
            })
            .sum();
        // A word holding only color changes is not a visible unit.
        if pieces.iter().all(|p| matches!(p, Piece::Color { .. })) {
            for piece in pieces {
                if let Piece::Color { shortcut, color } = piece {
                    units.push(Unit::Color { shortcut, color });
                }
            }
        } else {
            units.push(Unit::Word { pieces, width });
        }
    }

    for run in runs {
        match run {
            StyledRun::Text(text) => {
                for c in text.chars() {
                    match c {
                        '\n' => {
                            flush_word(&mut units, &mut word, &mut word_text);
                            units.push(Unit::Break);
                        }
                        '\r' => {}
                        c if c.is_whitespace() => {
                            flush_word(&mut units, &mut word, &mut word_text);
                            match units.last_mut() {
                                Some(Unit::Space(s)) => s.push(c),
                                _ => units.push(Unit::Space(c.to_string())),
                            }
                        }
                        c => word_text.push(c),
                    }
                }
            }
            StyledRun::Icon { shortcut, icon } => {
                flush_word(&mut units, &mut word, &mut word_text);
                units.push(Unit::Word {
                    width: icon.width,
                    pieces: vec![Piece::Icon { shortcut: shortcut.clone(), icon: icon.clone() }],
                });
            }
            StyledRun::ColorChange { shortcut, color } => {
                if word.is_empty() && word_text.is_empty() {
                    units.push(Unit::Color { shortcut: shortcut.clone(), color: *color });
                } else {
                    flush_text(&mut word, &mut word_text);
                    word.push(Piece::Color { shortcut: shortcut.clone(), color: *color });
                }
            }
        }
    }
    flush_word(&mut units, &mut word, &mut word_text);
    units
}

/// Fits styled runs to a pixel width.
#[derive(Debug, Clone, Copy)]
pub struct LineFitter {
    base: KColor,
}

impl Default for LineFitter {
    fn default() -> Self {
        Self::new(KColor::WHITE)
    }
}

struct LineBuilder {
    lines: Vec<Line>,
    elements: Vec<LineElement>,
    x: u32,
    markup: String,
    pending_space: String,
    color: KColor,
    /// Last color markup applied, replayed at the start of each new line
    active_markup: Option<String>,
}

impl LineBuilder {
    fn new(base: KColor) -> Self {
        Self {
            lines: Vec::new(),
            elements: Vec::new(),
            x: 0,
            markup: String::new(),
            pending_space: String::new(),
            color: base,
            active_markup: None,
        }
    }

    fn has_content(&self) -> bool {
        !self.elements.is_empty()
    }

    fn finish_line(&mut self) {
        self.pending_space.clear();
        let markup = std::mem::take(&mut self.markup);
        self.lines.push(Line {
            elements: std::mem::take(&mut self.elements),
            end_color: self.color,
            width: self.x,
            markup,
        });
        self.x = 0;
        if let Some(active) = &self.active_markup {
            self.markup = format!("{{{{{}}}}}", active);
        }
    }

    fn push_text(&mut self, text: &str) {
        let width = str_width(text);
        match self.elements.last_mut() {
            Some(LineElement { content: ElementContent::Text(last), color, .. }) if *color == self.color => {
                last.push_str(text);
            }
            _ => self.elements.push(LineElement {
                content: ElementContent::Text(text.to_string()),
                x: self.x,
                color: self.color,
            }),
        }
        self.x += width;
        self.markup.push_str(text);
    }

    fn apply_color(&mut self, shortcut: &str, color: KColor) {
        self.color = color;
        self.active_markup = Some(shortcut.to_string());
        self.markup.push_str(&format!("{{{{{}}}}}", shortcut));
    }

    fn place_word(&mut self, pieces: Vec<Piece>) {
        if !self.pending_space.is_empty() {
            let space = std::mem::take(&mut self.pending_space);
            self.push_text(&space);
        }
        for piece in pieces {
            match piece {
                Piece::Text(text) => self.push_text(&text),
                Piece::Color { shortcut, color } => self.apply_color(&shortcut, color),
                Piece::Icon { shortcut, icon } => {
                    self.markup.push_str(&format!("{{{{{}}}}}", shortcut));
                    let width = icon.width;
                    self.elements.push(LineElement {
                        content: ElementContent::Icon { shortcut, icon },
                        x: self.x,
                        color: self.color,
                    });
                    self.x += width;
                }
            }
        }
    }
}

impl LineFitter {
    /// Fitter whose first line starts in `base` color.
    pub fn new(base: KColor) -> Self {
        Self { base }
    }

    /// Break `runs` into lines no wider than `max_width`.
    ///
    /// A unit wider than `max_width` is placed alone on its own line. Empty
    /// input produces no lines; each `\n` produces a line even when empty.
    pub fn fit(&self, runs: &[StyledRun], max_width: u32) -> Vec<Line> {
        let units = split_units(runs);
        if units.is_empty() {
            return Vec::new();
        }

        let mut builder = LineBuilder::new(self.base);
        for unit in units {
            match unit {
                Unit::Break => builder.finish_line(),
                Unit::Color { shortcut, color } => builder.apply_color(&shortcut, color),
                Unit::Space(space) => builder.pending_space.push_str(&space),
                Unit::Word { pieces, width } => {
                    let space_width = str_width(&builder.pending_space);
                    if builder.x + space_width + width > max_width {
                        if builder.has_content() {
                            builder.finish_line();
                        } else {
                            builder.pending_space.clear();
                        }
                    }
                    builder.place_word(pieces);
                }
            }
        }
        builder.finish_line();
        builder.lines
    }
}
