//! Actus Error Handling
//!
//! The node model and renderers are total and never fail. Errors here come
//! from auditing a built tree against its source text, and from tooling that
//! wants to point at a node in that text. Every error is a `miette`
//! diagnostic carrying its source and a label on the offending span.

use std::fmt;
use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use thiserror::Error;

use crate::ast::{Span, Spanned};

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// A named source buffer that errors can point into.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Convert to NamedSource for use with miette error reporting
    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }
}

// ============================================================================
// ERROR TYPES
// ============================================================================

/// The single error type: what went wrong, where, and how to help.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct ActusError {
    pub kind: ErrorKind,
    pub source_info: SourceInfo,
    pub diagnostic_info: DiagnosticInfo,
}

/// Everything a span audit can find wrong with a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    /// A leaf claims bytes outside the source, or splits a character.
    #[error("{node} span {span:?} lies outside the {source_len}-byte source")]
    OutOfBounds {
        node: String,
        span: Span,
        source_len: usize,
    },

    /// A leaf's text differs from the source slice it claims.
    #[error("{node} expected `{expected}` but the source reads `{found}`")]
    TextMismatch {
        node: String,
        expected: String,
        found: String,
    },

    /// A child starts before its previous sibling ends.
    #[error("{node} child at {span:?} starts before its previous sibling ends at {previous_end}")]
    OutOfOrder {
        node: String,
        span: Span,
        previous_end: usize,
    },

    /// Free-form message attached to a node, for tooling built on top.
    #[error("{message}")]
    Node { message: String },
}

/// Context-specific source information
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

impl ErrorKind {
    /// Error code suffix for diagnostic codes.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "out_of_bounds",
            Self::TextMismatch { .. } => "text_mismatch",
            Self::OutOfOrder { .. } => "out_of_order",
            Self::Node { .. } => "node",
        }
    }

    fn primary_label(&self) -> &'static str {
        match self {
            Self::OutOfBounds { .. } => "span outside source",
            Self::TextMismatch { .. } => "text differs here",
            Self::OutOfOrder { .. } => "out of source order",
            Self::Node { .. } => "here",
        }
    }

    fn default_help(&self) -> Option<String> {
        match self {
            Self::OutOfBounds { .. } | Self::TextMismatch { .. } => {
                Some("offsets must index the buffer the tree was parsed from".into())
            }
            Self::OutOfOrder { .. } => {
                Some("children must be listed in the order they appear in the source".into())
            }
            Self::Node { .. } => None,
        }
    }
}

impl Diagnostic for ActusError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.kind.primary_label().to_string()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

// ============================================================================
// ERROR CONSTRUCTION
// ============================================================================

/// Context-aware error creation - each context knows how to create appropriate errors
pub trait ErrorReporting {
    /// Create an error with context-appropriate enhancements
    fn report(&self, kind: ErrorKind, span: Span) -> ActusError;

    fn out_of_bounds(&self, node: &str, span: Span, source_len: usize) -> ActusError {
        self.report(
            ErrorKind::OutOfBounds {
                node: node.into(),
                span,
                source_len,
            },
            span,
        )
    }

    fn text_mismatch(&self, node: &str, expected: &str, found: &str, span: Span) -> ActusError {
        self.report(
            ErrorKind::TextMismatch {
                node: node.into(),
                expected: expected.into(),
                found: found.into(),
            },
            span,
        )
    }

    fn out_of_order(&self, node: &str, span: Span, previous_end: usize) -> ActusError {
        self.report(
            ErrorKind::OutOfOrder {
                node: node.into(),
                span,
                previous_end,
            },
            span,
        )
    }
}

/// Error creation context for one phase over one source.
pub struct ValidationContext {
    pub source: SourceContext,
    pub phase: String,
    named: Arc<NamedSource<String>>,
}

impl ValidationContext {
    pub fn new(source: SourceContext, phase: impl Into<String>) -> Self {
        let named = source.to_named_source();
        Self {
            source,
            phase: phase.into(),
            named,
        }
    }
}

impl ErrorReporting for ValidationContext {
    fn report(&self, kind: ErrorKind, span: Span) -> ActusError {
        let error_code = format!("actus::{}::{}", self.phase, kind.code_suffix());
        let help = kind.default_help();
        ActusError {
            kind,
            source_info: SourceInfo {
                source: Arc::clone(&self.named),
                primary_span: to_source_span(clamp(span, self.source.content.len())),
                phase: self.phase.clone(),
            },
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }
}

/// Builds a diagnostic that underlines `node` in `source`.
///
/// # Examples
///
/// ```rust
/// use actus::ast::builder::{ident, infix, number};
/// use actus::errors::{node_diagnostic, SourceContext};
/// let src = SourceContext::new("rule.act", "IF x + 5 THEN");
/// let expr = infix(ident("x", 3), "+", number("5", 7));
/// let err = node_diagnostic(&src, &expr, "condition is not a boolean", None);
/// assert_eq!(err.source_info.primary_span, miette::SourceSpan::from(3..8));
/// ```
pub fn node_diagnostic<N: Spanned + ?Sized>(
    source: &SourceContext,
    node: &N,
    message: impl Into<String>,
    help: Option<String>,
) -> ActusError {
    let mut error = ValidationContext::new(source.clone(), "diagnostic").report(
        ErrorKind::Node {
            message: message.into(),
        },
        node.span(),
    );
    error.diagnostic_info.help = help;
    error
}

/// Converts an AST span to a miette `SourceSpan`.
pub fn to_source_span(span: Span) -> SourceSpan {
    SourceSpan::from(span)
}

// Labels must stay inside the source or miette refuses to render the snippet.
fn clamp(span: Span, len: usize) -> Span {
    let start = span.start.min(len);
    Span::new(start, span.end.clamp(start, len))
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Report;

    fn context() -> ValidationContext {
        ValidationContext::new(SourceContext::new("rule.act", "WHILE i < 10 DO"), "spans")
    }

    #[test]
    fn test_error_code_includes_phase() {
        let err = context().out_of_order("InfixExpression", Span::new(6, 7), 9);
        assert_eq!(err.diagnostic_info.error_code, "actus::spans::out_of_order");
        assert!(err.diagnostic_info.help.is_some());
    }

    #[test]
    fn test_label_is_clamped_into_source() {
        let err = context().out_of_bounds("Identifier", Span::new(10, 40), 15);
        assert_eq!(err.source_info.primary_span, SourceSpan::from(10..15));
    }

    #[test]
    fn test_report_renders_label_and_help() {
        let err = context().text_mismatch("Identifier", "j", "i", Span::new(6, 7));
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("text differs here"));
        assert!(output.contains("expected `j` but the source reads `i`"));
        assert!(output.contains("buffer the tree was parsed from"));
    }

    #[test]
    fn test_display_uses_kind() {
        let err = context().out_of_bounds("Identifier", Span::new(10, 40), 15);
        assert_eq!(
            err.to_string(),
            "Identifier span Span { start: 10, end: 40 } lies outside the 15-byte source"
        );
    }
}
