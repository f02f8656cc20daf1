//! AST module for the Actus action language
//!
//! This module provides the node model for Actus programs: statements,
//! expressions, and types, all carrying source position information.
//!
//! Nodes are immutable once built. Leaves store their own start offset and
//! derive their end from their content; composites never store independent
//! offsets and instead delegate to their children, so the span of a composite
//! always covers exactly its constituent parts.

// ============================================================================
// IMPORTS
// ============================================================================

use serde::{Deserialize, Serialize};

// ============================================================================
// CORE DATA STRUCTURES
// ============================================================================

/// Represents a span in the source code.
///
/// Offsets are byte offsets into the source buffer the parser read. `end` is
/// exclusive.
///
/// # Examples
///
/// ```rust
/// use actus::ast::Span;
/// let span = Span::new(0, 5);
/// assert_eq!(span.start, 0);
/// assert_eq!(span.len(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Creates a span from its two offsets.
    pub const fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Creates a zero-width span at `offset`.
    pub const fn point(offset: usize) -> Self {
        Span {
            start: offset,
            end: offset,
        }
    }

    /// Length of the span in bytes. Inverted spans have length zero.
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Checks if another span is fully contained within this span.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actus::ast::Span;
    /// assert!(Span::new(0, 10).contains_span(Span::new(2, 4)));
    /// assert!(!Span::new(0, 10).contains_span(Span::new(8, 12)));
    /// ```
    pub fn contains_span(&self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Merges two spans into one covering both.
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Converts the span into a `Range` for slicing source text.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// Converts byte offsets into 1-based `(line, column)` pairs for the start
    /// and end of the span. Columns count characters, not bytes.
    ///
    /// Returns `None` if the span does not fit inside `source`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actus::ast::Span;
    /// let src = "IF x\nTHEN y";
    /// assert_eq!(Span::new(5, 9).byte_to_line_col(src), Some(((2, 1), (2, 5))));
    /// ```
    pub fn byte_to_line_col(&self, source: &str) -> Option<((usize, usize), (usize, usize))> {
        if self.end > source.len() || self.start > self.end {
            return None;
        }
        Some((line_col(source, self.start)?, line_col(source, self.end)?))
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        miette::SourceSpan::from(span.start..span.end)
    }
}

/// Position-tracking contract shared by every node.
///
/// Leaves answer from their stored start offset and their content; composites
/// answer by delegating to specific children.
pub trait Spanned {
    /// Offset of the first byte belonging to the node.
    fn start(&self) -> usize;

    /// Offset one past the last byte belonging to the node.
    fn end(&self) -> usize;

    /// The node's `[start, end)` span.
    fn span(&self) -> Span {
        Span::new(self.start(), self.end())
    }
}

impl<T: Spanned + ?Sized> Spanned for Box<T> {
    fn start(&self) -> usize {
        (**self).start()
    }

    fn end(&self) -> usize {
        (**self).end()
    }
}

// ============================================================================
// SPAN HELPERS (INTERNAL)
// ============================================================================

/// End of a composite: the furthest end among its present children, never
/// less than the composite's own start.
pub(crate) fn furthest_end(start: usize, ends: impl IntoIterator<Item = usize>) -> usize {
    ends.into_iter().fold(start, usize::max)
}

fn line_col(source: &str, offset: usize) -> Option<(usize, usize)> {
    let before = source.get(..offset)?;
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let col = before[line_start..].chars().count() + 1;
    Some((line, col))
}

// ============================================================================
// MODULE EXPORTS
// ============================================================================

pub mod builder;
pub mod expr;
pub mod program;
pub mod stmt;
pub mod types;

pub use expr::{
    ArrayLiteral, BooleanLiteral, CallExpression, Expression, Identifier, InfixExpression,
    NumberKind, NumberLiteral, StringLiteral,
};
pub use program::{Action, Declaration};
pub use stmt::{
    Block, CaseStatement, ExpressionStatement, ForEachStatement, ForStatement, FunctionDecl,
    IfStatement, Parameter, RecordDecl, ReturnStatement, SelectStatement, Statement,
    VariableDecl, WhileStatement,
};
pub use types::{ArrayType, BasicKind, BasicType, Type, TypeName};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_covers_both() {
        let merged = Span::new(4, 6).merge(Span::new(1, 3));
        assert_eq!(merged, Span::new(1, 6));
    }

    #[test]
    fn test_furthest_end_falls_back_to_start() {
        assert_eq!(furthest_end(7, []), 7);
        assert_eq!(furthest_end(7, [3, 9, 8]), 9);
        assert_eq!(furthest_end(7, [2]), 7);
    }

    #[test]
    fn test_line_col_out_of_range() {
        assert_eq!(Span::new(0, 40).byte_to_line_col("short"), None);
        assert_eq!(Span::new(3, 1).byte_to_line_col("short"), None);
    }

    #[test]
    fn test_line_col_counts_chars() {
        let src = "é = 1";
        // 'é' is two bytes; the '=' sits at byte 3 and column 3.
        assert_eq!(Span::new(3, 4).byte_to_line_col(src), Some(((1, 3), (1, 4))));
    }

    #[test]
    fn test_into_source_span() {
        let source_span: miette::SourceSpan = Span::new(2, 7).into();
        assert_eq!(source_span.offset(), 2);
        assert_eq!(source_span.len(), 5);
    }
}
