//! Type nodes: basic types, arrays, and constrained numeric type names.

use serde::{Deserialize, Serialize};

use super::expr::NumberLiteral;
use super::{furthest_end, Spanned};

/// The closed set of type kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Type {
    Basic(BasicType),
    Array(ArrayType),
    Name(TypeName),
}

/// Tag of a basic type. Records are referred to by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasicKind {
    Integer,
    Float,
    String,
    Boolean,
    Date,
    Time,
    Record(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasicType {
    pub kind: BasicKind,
    pub start: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayType {
    pub element: Box<Type>,
}

/// A named type with up to four numeric facets, e.g. `Number (10, 2)`.
///
/// Each facet is present iff it is `Some` with non-empty text. No combination
/// of facets is forbidden; consistency of the values is left to semantic
/// analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeName {
    pub name: String,
    pub start: usize,
    /// Number of digits in the integer part.
    pub integer_digits: Option<NumberLiteral>,
    /// Number of digits in the decimal part.
    pub decimal_digits: Option<NumberLiteral>,
    pub min_value: Option<NumberLiteral>,
    pub max_value: Option<NumberLiteral>,
}

// ============================================================================
// CONSTRUCTORS AND ACCESSORS
// ============================================================================

impl Type {
    pub fn basic(kind: BasicKind, start: usize) -> Self {
        Type::Basic(BasicType { kind, start })
    }

    pub fn array(element: Type) -> Self {
        Type::Array(ArrayType {
            element: Box::new(element),
        })
    }

    /// Name of the variant, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Type::Basic(_) => "BasicType",
            Type::Array(_) => "ArrayType",
            Type::Name(_) => "TypeName",
        }
    }
}

impl BasicKind {
    /// The name the type is written with in source.
    pub fn name(&self) -> &str {
        match self {
            BasicKind::Integer => "Integer",
            BasicKind::Float => "Float",
            BasicKind::String => "String",
            BasicKind::Boolean => "Boolean",
            BasicKind::Date => "Date",
            BasicKind::Time => "Time",
            BasicKind::Record(name) => name,
        }
    }
}

impl TypeName {
    /// A bare type name with no facets.
    pub fn new(name: impl Into<String>, start: usize) -> Self {
        TypeName {
            name: name.into(),
            start,
            integer_digits: None,
            decimal_digits: None,
            min_value: None,
            max_value: None,
        }
    }

    #[must_use]
    pub fn with_digits(mut self, integer: NumberLiteral, decimal: Option<NumberLiteral>) -> Self {
        self.integer_digits = Some(integer);
        self.decimal_digits = decimal;
        self
    }

    #[must_use]
    pub fn with_range(mut self, min: NumberLiteral, max: Option<NumberLiteral>) -> Self {
        self.min_value = Some(min);
        self.max_value = max;
        self
    }

    pub fn integer_digits(&self) -> Option<&NumberLiteral> {
        present(&self.integer_digits)
    }

    pub fn decimal_digits(&self) -> Option<&NumberLiteral> {
        present(&self.decimal_digits)
    }

    pub fn min_value(&self) -> Option<&NumberLiteral> {
        present(&self.min_value)
    }

    pub fn max_value(&self) -> Option<&NumberLiteral> {
        present(&self.max_value)
    }

    /// Present facets in source order.
    pub fn facets(&self) -> impl Iterator<Item = &NumberLiteral> {
        [
            self.integer_digits(),
            self.decimal_digits(),
            self.min_value(),
            self.max_value(),
        ]
        .into_iter()
        .flatten()
    }
}

fn present(facet: &Option<NumberLiteral>) -> Option<&NumberLiteral> {
    facet.as_ref().filter(|lit| lit.is_present())
}

// ============================================================================
// POSITION TRACKING
// ============================================================================

impl Spanned for Type {
    fn start(&self) -> usize {
        match self {
            Type::Basic(t) => t.start(),
            Type::Array(t) => t.start(),
            Type::Name(t) => t.start(),
        }
    }

    fn end(&self) -> usize {
        match self {
            Type::Basic(t) => t.end(),
            Type::Array(t) => t.end(),
            Type::Name(t) => t.end(),
        }
    }
}

impl Spanned for BasicType {
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        self.start.saturating_add(self.kind.name().len())
    }
}

impl Spanned for ArrayType {
    fn start(&self) -> usize {
        self.element.start()
    }

    fn end(&self) -> usize {
        self.element.end()
    }
}

impl Spanned for TypeName {
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        furthest_end(
            self.start.saturating_add(self.name.len()),
            self.facets().map(Spanned::end),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_facet_counts_as_absent() {
        let ty = TypeName::new("Number", 0).with_digits(NumberLiteral::empty(8), None);
        assert!(ty.integer_digits().is_none());
        assert_eq!(ty.facets().count(), 0);
        assert_eq!(ty.end(), 6);
    }

    #[test]
    fn test_type_name_spans_to_last_facet() {
        // Number (10, 0: 100)
        let ty = TypeName::new("Number", 0)
            .with_digits(NumberLiteral::new("10", 8), None)
            .with_range(NumberLiteral::new("0", 12), Some(NumberLiteral::new("100", 15)));
        assert_eq!(ty.start(), 0);
        assert_eq!(ty.end(), 18);
    }

    #[test]
    fn test_record_kind_uses_record_name() {
        let ty = Type::basic(BasicKind::Record("Customer".into()), 4);
        assert_eq!(ty.end(), 12);
    }

    #[test]
    fn test_array_type_delegates_to_element() {
        let ty = Type::array(Type::basic(BasicKind::Date, 9));
        assert_eq!(ty.start(), 9);
        assert_eq!(ty.end(), 13);
    }
}
