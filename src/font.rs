//! Glyph metrics for the description bitmap font.
//!
//! The font is fixed, so widths come from a static table rather than a
//! rasterizer. Widths include the one pixel of spacing after each glyph.

/// A glyph exactly one pixel wide, used to build pixel-precise gaps.
pub const PLACEHOLDER_CHAR: char = '\u{200A}';

/// Line height of the font in pixels.
pub const LINE_HEIGHT: u32 = 10;

/// Width in pixels of a single character.
///
/// ```
/// use eidtext::font::glyph_width;
///
/// assert_eq!(glyph_width('i'), 2);
/// assert_eq!(glyph_width(' '), 3);
/// assert_eq!(glyph_width('a'), 5);
/// assert_eq!(glyph_width('W'), 7);
/// ```
pub fn glyph_width(c: char) -> u32 {
    match c {
        '\n' | '\r' => 0,
        PLACEHOLDER_CHAR => 1,
        '.' | ',' | ':' | ';' | '!' | '\'' | '|' | 'i' | 'l' => 2,
        ' ' | 'j' | '(' | ')' | '[' | ']' | '`' | 'I' => 3,
        'f' | 't' | 'r' | '1' | '"' | '*' | '<' | '>' | '{' | '}' | '-' => 4,
        'm' | 'w' | 'M' | 'W' | '@' | '%' | '#' => 7,
        c if c.is_ascii_lowercase() || c.is_ascii_digit() => 5,
        _ => 6,
    }
}

/// Width in pixels of a plain string (markup is measured as text).
pub fn str_width(s: &str) -> u32 {
    s.chars().map(glyph_width).sum()
}

/// A string of `width` one-pixel glyphs.
pub fn generate_placeholder_string(width: u32) -> String {
    std::iter::repeat(PLACEHOLDER_CHAR).take(width as usize).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_str_width_sums_glyphs() {
        assert_eq!(str_width(""), 0);
        assert_eq!(str_width("hi"), 5 + 2);
        assert_eq!(str_width("Hi there"), 6 + 2 + 3 + 4 + 5 + 5 + 4 + 5);
    }

    #[test]
    fn test_newline_has_no_width() {
        assert_eq!(str_width("a\nb"), str_width("ab"));
    }

    #[test]
    fn test_placeholder_string_width() {
        let s = generate_placeholder_string(13);
        assert_eq!(s.chars().count(), 13);
        assert_eq!(str_width(&s), 13);
        assert!(generate_placeholder_string(0).is_empty());
    }

    #[test]
    fn test_unicode_defaults() {
        assert_eq!(glyph_width('ü'), 6);
        assert_eq!(glyph_width('↑'), 6);
    }
}
