use thiserror::Error;

use crate::types::SourceLocation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Malformed literal, unterminated string or comment.
    Lex,
    /// A colon in a position where no tag is possible.
    Syntax,
    /// An illegal token type used as a tag before a colon.
    Tag,
    /// Unbalanced tuple brackets.
    Structural,
}

/// A fatal error raised while tokenizing or building a parse tree. The
/// display format is a compatibility surface: consumers match on the
/// `"<description> at: (file: .. line: .. column: ..)"` string.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message} at: {location}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub location: SourceLocation,
}

impl ParseError {
    fn new(kind: ParseErrorKind, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            message: message.into(),
            location,
        }
    }

    pub(crate) fn lex(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(ParseErrorKind::Lex, message, location)
    }

    pub(crate) fn syntax(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(ParseErrorKind::Syntax, message, location)
    }

    pub(crate) fn tag(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(ParseErrorKind::Tag, message, location)
    }

    pub(crate) fn structural(message: impl Into<String>, location: SourceLocation) -> Self {
        Self::new(ParseErrorKind::Structural, message, location)
    }
}

/// A failure while navigating an already-built tree. Access errors are
/// local to the call that raised them; the tree itself is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("index {index} is out of range for {size} entries")]
    IndexOutOfRange { index: usize, size: usize },
    #[error("no entry named {name:?}")]
    KeyNotFound { name: String },
    #[error("expected a {expected} but found a {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("expected exactly one entry but found {size}")]
    WrongArity { size: usize },
}
