//! Expression nodes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::types::Type;
use super::{furthest_end, Spanned};

/// The closed set of expression kinds.
///
/// # Examples
///
/// ```rust
/// use actus::ast::{Expression, Identifier, NumberLiteral, Spanned};
/// let expr = Expression::infix(
///     Expression::Identifier(Identifier::new("x", 0)),
///     "+",
///     Expression::Number(NumberLiteral::new("5", 4)),
/// );
/// assert_eq!(expr.start(), 0);
/// assert_eq!(expr.end(), 5);
/// assert_eq!(expr.to_string(), "(x + 5)");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    Identifier(Identifier),
    Number(NumberLiteral),
    String(StringLiteral),
    Boolean(BooleanLiteral),
    Infix(InfixExpression),
    Call(CallExpression),
    Array(ArrayLiteral),
}

/// A name: variable, function, record, or field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    pub start: usize,
    /// Declared type, shared with the declaration that introduced it. Not a
    /// child: it never contributes to the identifier's span.
    pub declared_type: Option<Arc<Type>>,
}

/// How a numeric literal's text reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NumberKind {
    Integer,
    Float,
}

/// A numeric literal, kept as its source text.
///
/// An empty text is how type facets mark "not given".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberLiteral {
    pub text: String,
    pub start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringLiteral {
    /// Content between the delimiters, as written.
    pub value: String,
    pub start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BooleanLiteral {
    pub value: bool,
    pub start: usize,
}

/// A binary operation such as `a + b` or `x = y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfixExpression {
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpression {
    pub callee: Box<Expression>,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayLiteral {
    pub elements: Vec<Expression>,
    /// Offset used as the whole span when there are no elements.
    pub anchor: usize,
}

// ============================================================================
// CONSTRUCTORS AND ACCESSORS
// ============================================================================

impl Expression {
    /// Builds an infix expression from its operands.
    pub fn infix(left: Expression, operator: impl Into<String>, right: Expression) -> Self {
        Expression::Infix(InfixExpression {
            left: Box::new(left),
            operator: operator.into(),
            right: Box::new(right),
        })
    }

    /// Builds a call expression.
    pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call(CallExpression {
            callee: Box::new(callee),
            arguments,
        })
    }

    /// Name of the variant, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expression::Identifier(_) => "Identifier",
            Expression::Number(_) => "NumberLiteral",
            Expression::String(_) => "StringLiteral",
            Expression::Boolean(_) => "BooleanLiteral",
            Expression::Infix(_) => "InfixExpression",
            Expression::Call(_) => "CallExpression",
            Expression::Array(_) => "ArrayLiteral",
        }
    }
}

impl Identifier {
    pub fn new(name: impl Into<String>, start: usize) -> Self {
        Identifier {
            name: name.into(),
            start,
            declared_type: None,
        }
    }

    /// Attaches the declared type shared with a declaration.
    #[must_use]
    pub fn with_type(mut self, ty: Arc<Type>) -> Self {
        self.declared_type = Some(ty);
        self
    }
}

impl NumberLiteral {
    pub fn new(text: impl Into<String>, start: usize) -> Self {
        NumberLiteral {
            text: text.into(),
            start,
        }
    }

    /// An empty literal, the "facet not given" marker.
    pub fn empty(start: usize) -> Self {
        NumberLiteral {
            text: String::new(),
            start,
        }
    }

    /// True when the literal carries text.
    pub fn is_present(&self) -> bool {
        !self.text.is_empty()
    }

    /// Classifies the text: a decimal point or exponent makes it a float.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use actus::ast::{NumberKind, NumberLiteral};
    /// assert_eq!(NumberLiteral::new("10", 0).kind(), NumberKind::Integer);
    /// assert_eq!(NumberLiteral::new("2.5", 0).kind(), NumberKind::Float);
    /// ```
    pub fn kind(&self) -> NumberKind {
        if self.text.contains(['.', 'e', 'E']) {
            NumberKind::Float
        } else {
            NumberKind::Integer
        }
    }

    /// Parses the text as an integer, if it is one.
    pub fn as_i64(&self) -> Option<i64> {
        match self.kind() {
            NumberKind::Integer => self.text.parse().ok(),
            NumberKind::Float => None,
        }
    }

    /// Parses the text as a float. Integers convert too.
    pub fn as_f64(&self) -> Option<f64> {
        self.text.parse().ok()
    }
}

impl StringLiteral {
    pub fn new(value: impl Into<String>, start: usize) -> Self {
        StringLiteral {
            value: value.into(),
            start,
        }
    }
}

impl BooleanLiteral {
    pub fn new(value: bool, start: usize) -> Self {
        BooleanLiteral { value, start }
    }

    /// The keyword as the printer writes it.
    pub fn keyword(&self) -> &'static str {
        if self.value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Source length of the keyword, in any letter case.
    pub fn text_len(&self) -> usize {
        self.keyword().len()
    }
}

impl ArrayLiteral {
    pub fn new(elements: Vec<Expression>, anchor: usize) -> Self {
        ArrayLiteral { elements, anchor }
    }
}

// ============================================================================
// POSITION TRACKING
// ============================================================================

impl Spanned for Expression {
    fn start(&self) -> usize {
        match self {
            Expression::Identifier(e) => e.start(),
            Expression::Number(e) => e.start(),
            Expression::String(e) => e.start(),
            Expression::Boolean(e) => e.start(),
            Expression::Infix(e) => e.start(),
            Expression::Call(e) => e.start(),
            Expression::Array(e) => e.start(),
        }
    }

    fn end(&self) -> usize {
        match self {
            Expression::Identifier(e) => e.end(),
            Expression::Number(e) => e.end(),
            Expression::String(e) => e.end(),
            Expression::Boolean(e) => e.end(),
            Expression::Infix(e) => e.end(),
            Expression::Call(e) => e.end(),
            Expression::Array(e) => e.end(),
        }
    }
}

impl Spanned for Identifier {
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.start.saturating_add(self.name.len())
    }
}

impl Spanned for NumberLiteral {
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.start.saturating_add(self.text.len())
    }
}

impl Spanned for StringLiteral {
    fn start(&self) -> usize {
        self.start
    }

    // Two delimiters around the content.
    fn end(&self) -> usize {
        self.start.saturating_add(self.value.len() + 2)
    }
}

impl Spanned for BooleanLiteral {
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.start.saturating_add(self.text_len())
    }
}

impl Spanned for InfixExpression {
    fn start(&self) -> usize {
        self.left.start()
    }

    fn end(&self) -> usize {
        furthest_end(self.start(), [self.left.end(), self.right.end()])
    }
}

impl Spanned for CallExpression {
    fn start(&self) -> usize {
        self.callee.start()
    }

    fn end(&self) -> usize {
        furthest_end(
            self.start(),
            std::iter::once(self.callee.end()).chain(self.arguments.iter().map(Spanned::end)),
        )
    }
}

impl Spanned for ArrayLiteral {
    fn start(&self) -> usize {
        self.elements.first().map_or(self.anchor, Spanned::start)
    }

    fn end(&self) -> usize {
        furthest_end(self.start(), self.elements.iter().map(Spanned::end))
    }
}
