//! Canonical type signatures.
//!
//! A constrained type name renders as its base name followed by at most one
//! parenthesised group:
//!
//! | facets given                  | rendering             |
//! |-------------------------------|-----------------------|
//! | none                          | `Number`              |
//! | integer digits                | `Number (10)`         |
//! | integer + decimal digits      | `Number (10, 2)`      |
//! | integer digits + min + max    | `Number (10, 0: 100)` |
//! | min + max                     | `Number (0: 100)`     |
//! | min                           | `Number (0)`          |
//!
//! Digits and range share the one group, so `Number (10, 2)` may read as
//! either "10 digits, 2 decimals" or "10 digits, minimum 2" to anything that
//! parses the text back. Consumers that need the facets should read them from
//! the node, not from this text.
//!
//! A decimal-digit count without an integer-digit count is not rendered, and
//! neither is a maximum without a minimum. Facets are only tested for presence;
//! nothing here parses or range-checks their values.

use std::fmt;

use crate::ast::{ArrayType, BasicType, Type, TypeName};

/// Renders any type in its canonical form.
///
/// # Examples
///
/// ```rust
/// use actus::ast::{BasicKind, Type};
/// use actus::render::signature;
/// assert_eq!(signature(&Type::basic(BasicKind::Date, 0)), "Date");
/// assert_eq!(signature(&Type::array(Type::basic(BasicKind::String, 0))), "ARRAY OF String");
/// ```
pub fn signature(ty: &Type) -> String {
    match ty {
        Type::Basic(basic) => basic_signature(basic),
        Type::Array(array) => array_signature(array),
        Type::Name(name) => type_name_signature(name),
    }
}

/// Renders a constrained type name in its canonical form.
///
/// # Examples
///
/// ```rust
/// use actus::ast::{NumberLiteral, TypeName};
/// use actus::render::type_name_signature;
/// let ty = TypeName::new("Number", 0)
///     .with_digits(NumberLiteral::new("10", 8), Some(NumberLiteral::new("2", 12)));
/// assert_eq!(type_name_signature(&ty), "Number (10, 2)");
/// ```
pub fn type_name_signature(ty: &TypeName) -> String {
    let mut out = ty.name.clone();
    let mut opened = false;

    if let Some(int) = ty.integer_digits() {
        out.push_str(" (");
        out.push_str(&int.text);
        if let Some(dec) = ty.decimal_digits() {
            out.push_str(", ");
            out.push_str(&dec.text);
        }
        opened = true;
    }

    if let Some(min) = ty.min_value() {
        out.push_str(if opened { ", " } else { " (" });
        out.push_str(&min.text);
        if let Some(max) = ty.max_value() {
            out.push_str(": ");
            out.push_str(&max.text);
        }
        opened = true;
    }

    if opened {
        out.push(')');
    }
    out
}

fn basic_signature(ty: &BasicType) -> String {
    ty.kind.name().to_string()
}

fn array_signature(ty: &ArrayType) -> String {
    format!("ARRAY OF {}", signature(&ty.element))
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&signature(self))
    }
}

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&type_name_signature(self))
    }
}
