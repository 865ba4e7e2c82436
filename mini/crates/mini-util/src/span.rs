//! Source positions.
//!
//! The language has no module system and every diagnostic refers to a
//! single in-memory source buffer, so `Span` carries only what the lexer,
//! parser and evaluator need to point at a location: a byte range plus the
//! 1-based line/column the range starts at. There is no `FileId`/`SourceMap`
//! indirection here (unlike a multi-file compiler) because there is only
//! ever one file in play.

use std::fmt;

/// A byte range in the source text, with the 1-based line/column of its
/// start recorded alongside (recomputing line/column from a byte offset on
/// every diagnostic would mean re-scanning from the start of the file).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(start: u32, end: u32, line: u32, column: u32) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }

    /// A zero-width span at a single line/column, used for synthesized
    /// diagnostics (e.g. EOF) that have no backing byte range.
    pub fn point(line: u32, column: u32) -> Self {
        Self {
            start: 0,
            end: 0,
            line,
            column,
        }
    }

    /// The smallest span containing both `self` and `other`. Used when an
    /// AST node's span needs to cover a sub-expression that starts earlier
    /// or ends later (e.g. a binary expression spans lhs..rhs).
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
            line: self.line,
            column: self.column,
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
