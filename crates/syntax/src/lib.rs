//! Parser for the tuplet notation: tuples of optionally-named,
//! comma-separated entries, each entry holding a juxtaposed statement of
//! values. Tokenizing and tree building are batch operations — a call
//! either yields a complete, independently-owned tree or a single fatal
//! error pinned to a source location.

pub mod decimal;
pub mod element;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod types;

// Re-export the most commonly used types and functions
pub use decimal::Decimal;
pub use element::{Element, Entry};
pub use error::{AccessError, ParseError, ParseErrorKind};
pub use lexer::tokenize;
pub use parser::build_parse_tree;
pub use types::{SourceLocation, Token, TokenKind};

/// Tokenize and build in one step.
pub fn parse_source(source: &str, file: &str) -> Result<Element, ParseError> {
    let tokens = lexer::tokenize(source, file)?;
    parser::build_parse_tree(tokens)
}
