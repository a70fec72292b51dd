use std::iter::Peekable;
use std::str::Chars;

use tracing::debug;

use crate::decimal::Decimal;
use crate::error::ParseError;
use crate::types::{SourceLocation, Token, TokenKind};

/// Characters that end a bare word.
fn is_word_break(ch: char) -> bool {
    ch.is_whitespace() || matches!(ch, '[' | ']' | ',' | ':' | '"' | '(' | ')')
}

pub struct Tokenizer<'a> {
    /// Source input
    input: Peekable<Chars<'a>>,
    /// The current character being processed
    current: Option<char>,
    /// Label attached to every token location
    file: &'a str,
    line: usize,
    column: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str, file: &'a str) -> Self {
        let mut chars = source.chars().peekable();
        let current = chars.next();
        Self {
            input: chars,
            current,
            file,
            line: 1,
            column: 1,
        }
    }

    /// Advance to the next character in the input
    fn advance(&mut self) {
        if let Some(ch) = self.current {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        self.current = self.input.next();
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.file, self.line, self.column)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(ch) if ch.is_whitespace()) {
            self.advance();
        }
    }

    /// Scan a single token; `None` at end of input.
    pub fn scan_token(&mut self) -> Result<Option<Token>, ParseError> {
        self.skip_whitespace();
        let location = self.location();
        let Some(ch) = self.current else {
            return Ok(None);
        };

        let token = match ch {
            '[' => self.punctuation(TokenKind::OpenBracket, location),
            ']' => self.punctuation(TokenKind::CloseBracket, location),
            ',' => self.punctuation(TokenKind::Comma, location),
            ':' => self.punctuation(TokenKind::Colon, location),
            '"' => self.scan_string(location)?,
            '(' => self.scan_comment(location)?,
            ')' => return Err(ParseError::lex("unexpected character", location)),
            _ => self.scan_word(location)?,
        };
        Ok(Some(token))
    }

    fn punctuation(&mut self, kind: TokenKind, location: SourceLocation) -> Token {
        let text = self.current.map(String::from).unwrap_or_default();
        self.advance();
        Token {
            kind,
            text,
            location,
        }
    }

    /// Scan a double-quoted string. Both views are retained: the raw slice
    /// (quotes and backslashes intact) in the token text, and the
    /// escape-resolved content in the token kind. Newlines are allowed.
    fn scan_string(&mut self, location: SourceLocation) -> Result<Token, ParseError> {
        let mut text = String::from('"');
        let mut value = String::new();
        self.advance();
        loop {
            let char_location = self.location();
            match self.current {
                None => return Err(ParseError::lex("unterminated string", location)),
                Some('"') => {
                    text.push('"');
                    self.advance();
                    break;
                }
                Some('\\') => {
                    text.push('\\');
                    self.advance();
                    let Some(escape) = self.current else {
                        return Err(ParseError::lex("unterminated string", location));
                    };
                    let resolved = match escape {
                        'n' => '\n',
                        't' => '\t',
                        'r' => '\r',
                        '\\' => '\\',
                        '"' => '"',
                        '\'' => '\'',
                        _ => {
                            return Err(ParseError::lex("invalid escape sequence", char_location))
                        }
                    };
                    text.push(escape);
                    value.push(resolved);
                    self.advance();
                }
                Some(ch) => {
                    text.push(ch);
                    value.push(ch);
                    self.advance();
                }
            }
        }
        Ok(Token {
            kind: TokenKind::Str(value),
            text,
            location,
        })
    }

    /// Scan a parenthesized comment. Comments do not nest; the first `)`
    /// closes the comment and the content is preserved un-subtokenized.
    fn scan_comment(&mut self, location: SourceLocation) -> Result<Token, ParseError> {
        let mut text = String::from('(');
        self.advance();
        loop {
            match self.current {
                None => return Err(ParseError::lex("unterminated comment", location)),
                Some(')') => {
                    text.push(')');
                    self.advance();
                    break;
                }
                Some(ch) => {
                    text.push(ch);
                    self.advance();
                }
            }
        }
        Ok(Token {
            kind: TokenKind::Comment,
            text,
            location,
        })
    }

    /// Scan a bare word. Digit-initial words must form a number literal:
    /// an integer, a fraction, or a `0b` binary integer.
    fn scan_word(&mut self, location: SourceLocation) -> Result<Token, ParseError> {
        let mut word = String::new();
        while let Some(ch) = self.current {
            if is_word_break(ch) {
                break;
            }
            word.push(ch);
            self.advance();
        }

        let kind = if word.starts_with(|ch: char| ch.is_ascii_digit()) {
            let value = parse_number(&word)
                .ok_or_else(|| ParseError::lex("malformed number literal", location.clone()))?;
            TokenKind::Number(value)
        } else {
            TokenKind::Name
        };
        Ok(Token {
            kind,
            text: word,
            location,
        })
    }
}

fn parse_number(word: &str) -> Option<Decimal> {
    if let Some(binary) = word.strip_prefix("0b") {
        return Decimal::from_binary_text(binary).ok();
    }
    word.parse().ok()
}

/// Tokenize the entire input, tracking 1-based line/column positions.
pub fn tokenize(source: &str, file: &str) -> Result<Vec<Token>, ParseError> {
    let mut tokenizer = Tokenizer::new(source, file);
    let mut tokens = Vec::new();
    while let Some(token) = tokenizer.scan_token()? {
        tokens.push(token);
    }
    debug!(file, count = tokens.len(), "tokenized");
    Ok(tokens)
}
