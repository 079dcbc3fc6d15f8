//! Streaming JSON5 parsing for data pack objects
//!
//! Supports both single-line JSONL and multi-line JSON5 formats.
//! JSON5 adds support for comments, trailing commas, unquoted keys and
//! single-quoted strings.

use crate::models::{PackObject, Warning};
use std::io::Read;
use thiserror::Error;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub message: String,
    pub line: usize,
}

/// Result of parsing a pack stream.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub objects: Vec<PackObject>,
    pub warnings: Vec<Warning>,
}

/// Parse a single JSON5 string into a pack object.
pub fn parse_line(line: &str, line_number: usize) -> Result<PackObject, ParseError> {
    json5::from_str(line).map_err(|e| ParseError { message: e.to_string(), line: line_number })
}

/// Brace/bracket depth tracking across the lines of one object.
#[derive(Debug, Default)]
struct DepthTracker {
    braces: i32,
    brackets: i32,
    quote: Option<char>,
    escape_next: bool,
}

impl DepthTracker {
    fn feed(&mut self, line: &str) {
        let mut chars = line.chars().peekable();
        while let Some(ch) = chars.next() {
            if self.escape_next {
                self.escape_next = false;
                continue;
            }
            match (self.quote, ch) {
                (Some(_), '\\') => self.escape_next = true,
                (Some(q), c) if c == q => self.quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => self.quote = Some(ch),
                (None, '/') if chars.peek() == Some(&'/') => break,
                (None, '{') => self.braces += 1,
                (None, '}') => self.braces -= 1,
                (None, '[') => self.brackets += 1,
                (None, ']') => self.brackets -= 1,
                _ => {}
            }
        }
    }

    fn balanced(&self) -> bool {
        self.braces == 0 && self.brackets == 0
    }
}

/// Parse a stream of JSON5 objects into pack objects.
///
/// Objects may be one per line or span multiple lines. A malformed object
/// produces a warning and stops parsing, since the next object boundary
/// can no longer be found reliably.
pub fn parse_stream<R: Read>(reader: R) -> ParseResult {
    use std::io::BufRead;

    let mut result = ParseResult::default();
    let buf_reader = std::io::BufReader::new(reader);

    let mut accumulator = String::new();
    let mut start_line = 1;
    let mut tracker = DepthTracker::default();

    for (index, line) in buf_reader.lines().map_while(Result::ok).enumerate() {
        let current_line = index + 1;

        if accumulator.is_empty() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with("//") {
                continue;
            }
            start_line = current_line;
        } else {
            accumulator.push('\n');
        }
        accumulator.push_str(&line);
        tracker.feed(&line);

        if tracker.balanced() {
            match parse_line(&accumulator, start_line) {
                Ok(obj) => result.objects.push(obj),
                Err(e) => {
                    result.warnings.push(Warning::new(e.message, e.line));
                    return result;
                }
            }
            accumulator.clear();
            tracker = DepthTracker::default();
        }
    }

    if !accumulator.trim().is_empty() {
        match parse_line(&accumulator, start_line) {
            Ok(obj) => result.objects.push(obj),
            Err(e) => result.warnings.push(Warning::new(e.message, e.line)),
        }
    }

    result
}
