//! Markup tag extraction from description strings

/// A raw token produced by [`tokenize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawToken<'a> {
    /// Plain text between tags (never empty)
    Literal(&'a str),
    /// The shortcut name inside a `{{name}}` tag
    Tag(&'a str),
}

const TAG_OPEN: &str = "{{";
const TAG_CLOSE: &str = "}}";

/// Splits a description string into literal text and `{{tag}}` tokens.
///
/// Tokens are of the form `{{name}}` where name can contain any characters
/// except `}}`. An unterminated `{{` is returned as literal text.
///
/// The returned iterator borrows the input and can be cloned to restart
/// from the same position.
///
/// # Examples
///
/// ```
/// use eidtext::tokenizer::{tokenize, RawToken};
///
/// let tokens: Vec<_> = tokenize("a {{Heart}} b").collect();
/// assert_eq!(
///     tokens,
///     vec![RawToken::Literal("a "), RawToken::Tag("Heart"), RawToken::Literal(" b")]
/// );
///
/// let tokens: Vec<_> = tokenize("broken {{tag").collect();
/// assert_eq!(tokens, vec![RawToken::Literal("broken {{tag")]);
/// ```
pub fn tokenize(input: &str) -> Tokens<'_> {
    Tokens { rest: input }
}

/// Iterator over the tokens of a markup string.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = RawToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let Some(open) = self.rest.find(TAG_OPEN) else {
            // No further tags
            let text = self.rest;
            self.rest = "";
            return Some(RawToken::Literal(text));
        };

        if open > 0 {
            let text = &self.rest[..open];
            self.rest = &self.rest[open..];
            return Some(RawToken::Literal(text));
        }

        let after_open = &self.rest[TAG_OPEN.len()..];
        match after_open.find(TAG_CLOSE) {
            Some(close) => {
                let name = &after_open[..close];
                self.rest = &after_open[close + TAG_CLOSE.len()..];
                Some(RawToken::Tag(name))
            }
            None => {
                // Unclosed tag: the remainder is plain text
                let text = self.rest;
                self.rest = "";
                Some(RawToken::Literal(text))
            }
        }
    }
}

impl std::iter::FusedIterator for Tokens<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str) -> Vec<RawToken<'_>> {
        tokenize(input).collect()
    }

    #[test]
    fn test_simple_tags() {
        assert_eq!(
            collect("{{a}}{{b}}{{c}}"),
            vec![RawToken::Tag("a"), RawToken::Tag("b"), RawToken::Tag("c")]
        );
    }

    #[test]
    fn test_mixed_text_and_tags() {
        assert_eq!(
            collect("x{{a}}y"),
            vec![RawToken::Literal("x"), RawToken::Tag("a"), RawToken::Literal("y")]
        );
    }

    #[test]
    fn test_no_tags_is_single_literal() {
        for input in ["plain text", "single { brace", "closing }} only", "ünïcödé ↑"] {
            assert_eq!(collect(input), vec![RawToken::Literal(input)]);
        }
    }

    #[test]
    fn test_unclosed_tag() {
        assert_eq!(
            collect("a {{b}} c {{unclosed"),
            vec![
                RawToken::Literal("a "),
                RawToken::Tag("b"),
                RawToken::Literal(" c "),
                RawToken::Literal("{{unclosed"),
            ]
        );
    }

    #[test]
    fn test_empty_string() {
        assert!(collect("").is_empty());
    }

    #[test]
    fn test_empty_tag_name() {
        assert_eq!(collect("{{}}"), vec![RawToken::Tag("")]);
    }

    #[test]
    fn test_clone_restarts() {
        let mut tokens = tokenize("a{{b}}c");
        assert_eq!(tokens.next(), Some(RawToken::Literal("a")));
        let snapshot = tokens.clone();
        assert_eq!(tokens.collect::<Vec<_>>(), snapshot.collect::<Vec<_>>());
    }

    #[test]
    fn test_tag_with_spaces_and_symbols() {
        assert_eq!(
            collect("{{Color Red}}{{Crafting3}}"),
            vec![RawToken::Tag("Color Red"), RawToken::Tag("Crafting3")]
        );
    }
}
