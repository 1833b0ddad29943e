//! Source locations attached to AST nodes and diagnostics.

use std::fmt;

/// Start position and length of a piece of source text.
///
/// The parser that builds the AST fills these in; the core only carries
/// them through to diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line number (1-indexed, 0 when unknown).
    pub line: u32,
    /// Column number (1-indexed, 0 when unknown).
    pub col: u32,
    /// Length in bytes.
    pub len: u32,
}

impl Span {
    #[inline]
    pub fn new(line: u32, col: u32, len: u32) -> Self {
        Self { line, col, len }
    }

    /// A zero-length span at a position.
    #[inline]
    pub fn point(line: u32, col: u32) -> Self {
        Self { line, col, len: 0 }
    }

    /// Whether the span carries a real location.
    #[inline]
    pub fn is_known(&self) -> bool {
        self.line != 0
    }

    /// Extend `self` so it also covers `other`.
    ///
    /// Spans on different lines keep the start of `self` and add lengths.
    pub fn merge(self, other: Span) -> Span {
        if self.line != other.line {
            return Span {
                line: self.line,
                col: self.col,
                len: self.len + other.len,
            };
        }
        let start = self.col.min(other.col);
        let end = (self.col + self.len).max(other.col + other.len);
        Span {
            line: self.line,
            col: start,
            len: end - start,
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}
