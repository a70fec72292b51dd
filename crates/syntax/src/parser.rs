//! Recursive-descent tree builder over the token sequence.
//!
//! The whole token buffer is consumed in one call; there is no error
//! recovery and no partial tree. A bracket pre-pass locates each `[`'s
//! partner before the body is parsed, so an unterminated tuple reports the
//! opening bracket rather than the point where input ran out.

use tracing::debug;

use crate::element::{Element, Entry};
use crate::error::ParseError;
use crate::types::{Token, TokenKind};

pub struct ParseTreeBuilder {
    tokens: Vec<Token>,
    pos: usize,
}

/// Build the parse tree for a token sequence. The root is always a tuple:
/// the implicit, unbracketed document body ending at end of input.
pub fn build_parse_tree(tokens: Vec<Token>) -> Result<Element, ParseError> {
    ParseTreeBuilder::new(tokens).build()
}

impl ParseTreeBuilder {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn build(mut self) -> Result<Element, ParseError> {
        debug!(count = self.tokens.len(), "building parse tree");
        let end = self.tokens.len();
        let mut entries = Vec::new();
        while self.pos < end {
            if let Some(entry) = self.parse_entry(end)? {
                entries.push(entry);
            }
        }
        Ok(Element::tuple_at(entries, None))
    }

    /// Locate the partner of the opening bracket at `open`, counting nested
    /// pairs. Reaching end of input first means the tuple never closed.
    fn find_matching_bracket(&self, open: usize) -> Result<usize, ParseError> {
        let mut depth = 0usize;
        for (index, token) in self.tokens.iter().enumerate().skip(open) {
            match token.kind {
                TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseBracket => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(index);
                    }
                }
                _ => {}
            }
        }
        Err(ParseError::structural(
            "tuple did not end",
            self.tokens[open].location.clone(),
        ))
    }

    /// Parse a bracketed tuple starting at the current `[`.
    fn parse_tuple(&mut self) -> Result<Element, ParseError> {
        let open = self.pos;
        let close = self.find_matching_bracket(open)?;
        let location = self.tokens[open].location.clone();
        self.pos += 1;
        let mut entries = Vec::new();
        while self.pos < close {
            if let Some(entry) = self.parse_entry(close)? {
                entries.push(entry);
            }
        }
        self.pos = close + 1;
        Ok(Element::tuple_at(entries, Some(location)))
    }

    /// Parse one entry up to its separating comma or `end`: an optional
    /// leading tag, then the juxtaposed values of the statement. Comments
    /// are filtered out wherever they appear. Returns `None` for an entry
    /// with no values — tagged or not, it contributes nothing to the tuple.
    fn parse_entry(&mut self, end: usize) -> Result<Option<Entry>, ParseError> {
        let mut name = None;
        let mut values: Vec<Element> = Vec::new();

        self.skip_comments(end);

        // Exactly one Name or Number immediately followed by ':' names the
        // entry; numeric tags are stored as their decimal text.
        if self.pos + 1 < end
            && matches!(self.tokens[self.pos + 1].kind, TokenKind::Colon)
        {
            match &self.tokens[self.pos].kind {
                TokenKind::Name => {
                    name = Some(self.tokens[self.pos].text.clone());
                    self.pos += 2;
                }
                TokenKind::Number(value) => {
                    name = Some(value.to_string());
                    self.pos += 2;
                }
                // anything else before a ':' is rejected in the value loop
                _ => {}
            }
        }

        while self.pos < end {
            let token = &self.tokens[self.pos];
            match &token.kind {
                TokenKind::Comma => {
                    self.pos += 1;
                    break;
                }
                TokenKind::Comment => {
                    self.pos += 1;
                }
                TokenKind::Colon => {
                    return Err(ParseError::syntax(
                        "statement did not expect a colon",
                        token.location.clone(),
                    ));
                }
                TokenKind::CloseBracket => {
                    return Err(ParseError::structural(
                        "tuple too many closing braces",
                        token.location.clone(),
                    ));
                }
                TokenKind::OpenBracket => {
                    values.push(self.parse_tuple()?);
                }
                TokenKind::Name | TokenKind::Number(_) | TokenKind::Str(_) => {
                    if self.pos + 1 < end
                        && matches!(self.tokens[self.pos + 1].kind, TokenKind::Colon)
                    {
                        return Err(ParseError::tag(
                            "unexpected tag in tuple",
                            token.location.clone(),
                        ));
                    }
                    values.push(Element::from(token.clone()));
                    self.pos += 1;
                }
            }
        }

        if values.is_empty() {
            return Ok(None);
        }
        let location = values[0].location().cloned();
        let statement = Element::statement_at(
            values.into_iter().map(Entry::unnamed).collect(),
            location,
        );
        Ok(Some(Entry { name, value: statement }))
    }

    fn skip_comments(&mut self, end: usize) {
        while self.pos < end && matches!(self.tokens[self.pos].kind, TokenKind::Comment) {
            self.pos += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseErrorKind;
    use crate::lexer::tokenize;

    fn parse(source: &str) -> Element {
        build_parse_tree(tokenize(source, "test.txt").unwrap()).unwrap()
    }

    fn parse_err(source: &str) -> ParseError {
        build_parse_tree(tokenize(source, "test.txt").unwrap()).unwrap_err()
    }

    #[test]
    fn root_is_always_a_tuple() {
        assert!(parse("").is_empty_tuple());
        assert!(parse("11").is_tuple());
        assert_eq!(parse("11").len(), 1);
    }

    #[test]
    fn values_are_wrapped_in_statements() {
        let root = parse("hello world");
        let statement = root.at(0).unwrap();
        assert!(statement.is_statement());
        assert_eq!(statement.len(), 2);
        assert_eq!(statement.at(0).unwrap().as_name().unwrap(), "hello");
        assert_eq!(statement.at(1).unwrap().as_name().unwrap(), "world");
    }

    #[test]
    fn comments_never_become_elements() {
        let root = parse("(lead) one (mid) two (trail), (only a comment),");
        assert_eq!(root.len(), 1);
        assert_eq!(root.at(0).unwrap().len(), 2);
    }

    #[test]
    fn tagged_entries_keep_insertion_order() {
        let root = parse("a: 1, 2, b: 3");
        assert_eq!(root.len(), 3);
        assert!(root.contains_name("a"));
        assert!(root.contains_name("b"));
        assert_eq!(root.get("b").unwrap(), root.at(2).unwrap());
    }

    #[test]
    fn statement_locations_point_at_first_value() {
        let root = parse("one: two three");
        let statement = root.get("one").unwrap();
        let location = statement.location().unwrap();
        assert_eq!((location.line, location.column), (1, 6));
    }

    #[test]
    fn tuple_locations_point_at_open_bracket() {
        let root = parse("x: [1]");
        let tuple = root.get("x").unwrap().at(0).unwrap();
        let location = tuple.location().unwrap();
        assert_eq!((location.line, location.column), (1, 4));
        assert!(root.location().is_none());
    }

    #[test]
    fn colon_without_a_tag_is_a_syntax_error() {
        let err = parse_err("a: [1] : 2");
        assert_eq!(err.kind, ParseErrorKind::Syntax);
        assert_eq!(
            err.to_string(),
            "statement did not expect a colon at: (file: test.txt line: 1 column: 8)"
        );

        let err = parse_err(", : x");
        assert_eq!(err.kind, ParseErrorKind::Syntax);
    }

    #[test]
    fn second_tag_in_an_entry_is_a_tag_error() {
        let err = parse_err("a: b: c");
        assert_eq!(err.kind, ParseErrorKind::Tag);
        assert_eq!(
            err.to_string(),
            "unexpected tag in tuple at: (file: test.txt line: 1 column: 4)"
        );
    }
}
