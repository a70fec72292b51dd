//! The tagged parse-tree node and its navigation API.
//!
//! An [`Element`] is exactly one of three things: a token leaf, a tuple of
//! optionally-named entries, or a statement of juxtaposed values. Positional
//! and name-based access are interchangeable: looking a tuple up by the
//! decimal rendering of a position reaches the same entry as the position
//! itself, unless an entry literally carries that name.

use std::fmt::Write as _;

use crate::decimal::Decimal;
use crate::error::AccessError;
use crate::types::{SourceLocation, Token, TokenKind};

/// One tuple slot: an optional name plus the element under it. Statement
/// entries never carry a name; naming happens one level up, at the tuple.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub name: Option<String>,
    pub value: Element,
}

impl Entry {
    pub fn unnamed(value: Element) -> Self {
        Self { name: None, value }
    }

    pub fn named(name: impl Into<String>, value: Element) -> Self {
        Self {
            name: Some(name.into()),
            value,
        }
    }
}

/// Cloning deep-copies the whole subtree; mutating a clone never affects
/// the element it was cloned from.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Token(Token),
    Tuple {
        entries: Vec<Entry>,
        location: Option<SourceLocation>,
    },
    Statement {
        entries: Vec<Entry>,
        location: Option<SourceLocation>,
    },
}

impl From<Token> for Element {
    fn from(token: Token) -> Self {
        Element::Token(token)
    }
}

impl Element {
    pub fn tuple(entries: Vec<Entry>) -> Self {
        Element::Tuple {
            entries,
            location: None,
        }
    }

    pub fn tuple_of(values: Vec<Element>) -> Self {
        Self::tuple(values.into_iter().map(Entry::unnamed).collect())
    }

    pub fn statement(values: Vec<Element>) -> Self {
        Element::Statement {
            entries: values.into_iter().map(Entry::unnamed).collect(),
            location: None,
        }
    }

    pub(crate) fn tuple_at(entries: Vec<Entry>, location: Option<SourceLocation>) -> Self {
        Element::Tuple { entries, location }
    }

    pub(crate) fn statement_at(entries: Vec<Entry>, location: Option<SourceLocation>) -> Self {
        Element::Statement { entries, location }
    }

    /// A short noun for error messages and diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Element::Token(token) => token.describe(),
            Element::Tuple { .. } => "tuple",
            Element::Statement { .. } => "statement",
        }
    }

    /// The source position this element was parsed from, when known.
    /// Tuples point at their opening bracket, statements at their first
    /// value; the implicit document root and hand-built trees have none.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Element::Token(token) => Some(&token.location),
            Element::Tuple { location, .. } | Element::Statement { location, .. } => {
                location.as_ref()
            }
        }
    }

    fn entries(&self) -> Result<&Vec<Entry>, AccessError> {
        match self {
            Element::Tuple { entries, .. } | Element::Statement { entries, .. } => Ok(entries),
            Element::Token(_) => Err(AccessError::TypeMismatch {
                expected: "tuple or statement",
                found: "token",
            }),
        }
    }

    fn entries_mut(&mut self) -> Result<&mut Vec<Entry>, AccessError> {
        match self {
            Element::Tuple { entries, .. } | Element::Statement { entries, .. } => Ok(entries),
            Element::Token(_) => Err(AccessError::TypeMismatch {
                expected: "tuple or statement",
                found: "token",
            }),
        }
    }

    // ---- variant predicates ----

    pub fn is_tuple(&self) -> bool {
        matches!(self, Element::Tuple { .. })
    }

    pub fn is_empty_tuple(&self) -> bool {
        matches!(self, Element::Tuple { entries, .. } if entries.is_empty())
    }

    pub fn is_statement(&self) -> bool {
        matches!(self, Element::Statement { .. })
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Element::Token(_))
    }

    // ---- leaf-kind predicates; false off a token leaf ----

    pub fn is_name(&self) -> bool {
        matches!(self, Element::Token(token) if matches!(token.kind, TokenKind::Name))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Element::Token(token) if matches!(token.kind, TokenKind::Number(_)))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Element::Token(token) if matches!(token.kind, TokenKind::Str(_)))
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Element::Token(token) if matches!(token.kind, TokenKind::Comment))
    }

    /// True for a value-bearing leaf: a name, a number, or a string.
    pub fn is_value(&self) -> bool {
        self.is_name() || self.is_number() || self.is_string()
    }

    /// True for any token leaf; the raw source slice is available.
    pub fn is_raw(&self) -> bool {
        self.is_token()
    }

    // ---- leaf accessors ----

    pub fn as_token(&self) -> Result<&Token, AccessError> {
        match self {
            Element::Token(token) => Ok(token),
            other => Err(AccessError::TypeMismatch {
                expected: "token",
                found: other.describe(),
            }),
        }
    }

    pub fn as_name(&self) -> Result<&str, AccessError> {
        match self {
            Element::Token(token) if matches!(token.kind, TokenKind::Name) => Ok(&token.text),
            other => Err(AccessError::TypeMismatch {
                expected: "name",
                found: other.describe(),
            }),
        }
    }

    pub fn as_number(&self) -> Result<&Decimal, AccessError> {
        match self {
            Element::Token(Token {
                kind: TokenKind::Number(value),
                ..
            }) => Ok(value),
            other => Err(AccessError::TypeMismatch {
                expected: "number",
                found: other.describe(),
            }),
        }
    }

    /// The interpreted view of a string leaf, escapes resolved.
    pub fn as_string(&self) -> Result<&str, AccessError> {
        match self {
            Element::Token(Token {
                kind: TokenKind::Str(value),
                ..
            }) => Ok(value),
            other => Err(AccessError::TypeMismatch {
                expected: "string",
                found: other.describe(),
            }),
        }
    }

    /// The raw view of a string leaf: the text between the quotes with
    /// escape sequences left unprocessed.
    pub fn as_escaped_string(&self) -> Result<&str, AccessError> {
        match self {
            Element::Token(token) if matches!(token.kind, TokenKind::Str(_)) => {
                Ok(&token.text[1..token.text.len() - 1])
            }
            other => Err(AccessError::TypeMismatch {
                expected: "string",
                found: other.describe(),
            }),
        }
    }

    /// The content of a comment leaf, parentheses stripped.
    pub fn as_comment(&self) -> Result<&str, AccessError> {
        match self {
            Element::Token(token) if matches!(token.kind, TokenKind::Comment) => {
                Ok(&token.text[1..token.text.len() - 1])
            }
            other => Err(AccessError::TypeMismatch {
                expected: "comment",
                found: other.describe(),
            }),
        }
    }

    /// The cooked text of a value-bearing leaf: a name or number yields its
    /// source text, a string its interpreted content.
    pub fn as_value(&self) -> Result<&str, AccessError> {
        match self {
            Element::Token(token) => match &token.kind {
                TokenKind::Name | TokenKind::Number(_) => Ok(&token.text),
                TokenKind::Str(value) => Ok(value),
                _ => Err(AccessError::TypeMismatch {
                    expected: "value",
                    found: token.describe(),
                }),
            },
            other => Err(AccessError::TypeMismatch {
                expected: "value",
                found: other.describe(),
            }),
        }
    }

    /// The raw source slice of any token leaf, delimiters included.
    pub fn as_raw(&self) -> Result<&str, AccessError> {
        self.as_token().map(|token| token.text.as_str())
    }

    // ---- navigation ----

    pub fn len(&self) -> usize {
        self.entries().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        match self {
            Element::Tuple { entries, .. } | Element::Statement { entries, .. } => entries.iter(),
            Element::Token(_) => [].iter(),
        }
    }

    /// The i-th entry's element, names ignored.
    pub fn at(&self, index: usize) -> Result<&Element, AccessError> {
        let entries = self.entries()?;
        entries
            .get(index)
            .map(|entry| &entry.value)
            .ok_or(AccessError::IndexOutOfRange {
                index,
                size: entries.len(),
            })
    }

    /// The first entry carrying `name`, or — when no entry does — the entry
    /// whose zero-based position renders as `name`.
    pub fn get(&self, name: &str) -> Result<&Element, AccessError> {
        let entries = self.entries()?;
        for entry in entries {
            if entry.name.as_deref() == Some(name) {
                return Ok(&entry.value);
            }
        }
        if let Some(index) = name
            .parse::<usize>()
            .ok()
            .filter(|index| index.to_string() == name)
        {
            if let Some(entry) = entries.get(index) {
                return Ok(&entry.value);
            }
        }
        Err(AccessError::KeyNotFound {
            name: name.to_string(),
        })
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.get(name).is_ok()
    }

    pub fn contains_index(&self, index: usize) -> bool {
        matches!(self.entries(), Ok(entries) if index < entries.len())
    }

    /// True iff every entry carries a name that is a member of `names`;
    /// an unnamed entry fails the check.
    pub fn only_contains(&self, names: &[&str]) -> Result<bool, AccessError> {
        match self {
            Element::Tuple { entries, .. } | Element::Statement { entries, .. } => {
                Ok(entries.iter().all(|entry| {
                    entry
                        .name
                        .as_deref()
                        .is_some_and(|name| names.contains(&name))
                }))
            }
            Element::Token(_) => Err(AccessError::WrongArity { size: 0 }),
        }
    }

    /// A new element of the same variant holding entries `[left, right)`.
    pub fn slice(&self, left: usize, right: usize) -> Result<Element, AccessError> {
        let entries = self.entries()?;
        if left > right || right > entries.len() {
            return Err(AccessError::IndexOutOfRange {
                index: right,
                size: entries.len(),
            });
        }
        Ok(self.with_entries(entries[left..right].to_vec()))
    }

    pub fn slice_from(&self, left: usize) -> Result<Element, AccessError> {
        self.slice(left, self.len())
    }

    fn with_entries(&self, entries: Vec<Entry>) -> Element {
        match self {
            Element::Statement { location, .. } => Element::Statement {
                entries,
                location: location.clone(),
            },
            _ => Element::Tuple {
                entries,
                location: self.location().cloned(),
            },
        }
    }

    pub fn front(&self) -> Result<&Element, AccessError> {
        self.at(0)
    }

    pub fn back(&self) -> Result<&Element, AccessError> {
        let entries = self.entries()?;
        entries
            .last()
            .map(|entry| &entry.value)
            .ok_or(AccessError::IndexOutOfRange { index: 0, size: 0 })
    }

    /// The sole entry's element; any other entry count is an error. Lets a
    /// caller chain from a one-entry wrapper straight down to its content.
    pub fn single(&self) -> Result<&Element, AccessError> {
        let entries = self.entries()?;
        match entries.as_slice() {
            [entry] => Ok(&entry.value),
            _ => Err(AccessError::WrongArity {
                size: entries.len(),
            }),
        }
    }

    // ---- mutation ----

    pub fn pop_front(&mut self) -> Result<Element, AccessError> {
        let entries = self.entries_mut()?;
        if entries.is_empty() {
            return Err(AccessError::IndexOutOfRange { index: 0, size: 0 });
        }
        Ok(entries.remove(0).value)
    }

    pub fn pop_back(&mut self) -> Result<Element, AccessError> {
        let entries = self.entries_mut()?;
        entries
            .pop()
            .map(|entry| entry.value)
            .ok_or(AccessError::IndexOutOfRange { index: 0, size: 0 })
    }

    pub fn pop_front_n(&mut self, count: usize) -> Result<(), AccessError> {
        let entries = self.entries_mut()?;
        if count > entries.len() {
            return Err(AccessError::IndexOutOfRange {
                index: count,
                size: entries.len(),
            });
        }
        entries.drain(..count);
        Ok(())
    }

    pub fn pop_back_n(&mut self, count: usize) -> Result<(), AccessError> {
        let entries = self.entries_mut()?;
        let len = entries.len();
        if count > len {
            return Err(AccessError::IndexOutOfRange {
                index: count,
                size: len,
            });
        }
        entries.truncate(len - count);
        Ok(())
    }

    pub fn push_front(&mut self, value: Element) -> Result<(), AccessError> {
        self.entries_mut()?.insert(0, Entry::unnamed(value));
        Ok(())
    }

    pub fn push_back(&mut self, value: Element) -> Result<(), AccessError> {
        self.entries_mut()?.push(Entry::unnamed(value));
        Ok(())
    }

    pub fn push_front_named(
        &mut self,
        name: impl Into<String>,
        value: Element,
    ) -> Result<(), AccessError> {
        self.named_entries_mut()?.insert(0, Entry::named(name, value));
        Ok(())
    }

    pub fn push_back_named(
        &mut self,
        name: impl Into<String>,
        value: Element,
    ) -> Result<(), AccessError> {
        self.named_entries_mut()?.push(Entry::named(name, value));
        Ok(())
    }

    /// Named entries only exist on tuples.
    fn named_entries_mut(&mut self) -> Result<&mut Vec<Entry>, AccessError> {
        match self {
            Element::Tuple { entries, .. } => Ok(entries),
            other => Err(AccessError::TypeMismatch {
                expected: "tuple",
                found: other.describe(),
            }),
        }
    }

    // ---- diagnostics ----

    /// A human-readable dump of the tree. Formatting is a presentation
    /// concern and not a compatibility surface.
    pub fn get_diagnostic_string(&self) -> String {
        let mut out = String::new();
        self.write_diagnostic(&mut out, None, 0);
        out
    }

    fn write_diagnostic(&self, out: &mut String, name: Option<&str>, depth: usize) {
        let indent = "  ".repeat(depth);
        let label = name.map(|name| format!("{name}: ")).unwrap_or_default();
        match self {
            Element::Token(token) => {
                let _ = writeln!(out, "{indent}{label}{} {}", token.describe(), token.text);
            }
            Element::Tuple { entries, .. } => {
                let _ = writeln!(out, "{indent}{label}tuple ({} entries)", entries.len());
                for entry in entries {
                    entry
                        .value
                        .write_diagnostic(out, entry.name.as_deref(), depth + 1);
                }
            }
            Element::Statement { entries, .. } => {
                let _ = writeln!(out, "{indent}{label}statement ({} values)", entries.len());
                for entry in entries {
                    entry.value.write_diagnostic(out, None, depth + 1);
                }
            }
        }
    }
}
