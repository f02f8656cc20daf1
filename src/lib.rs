//! Actus: the syntax tree of a keyword-verbose business-rule action language.
//!
//! An action is a named program: a block of declarations followed by a body
//! of statements. This crate owns the node model a parser builds, the byte
//! ranges every node covers, and two renderers over it:
//!
//! - [`render::signature`]: the canonical text of a declared type, used as a
//!   comparison key by semantic tooling
//! - [`render::Printer`]: a debug rendering of any subtree
//!
//! Parsing, type checking, and evaluation live elsewhere.
//!
//! ```rust
//! use actus::ast::builder::{call, expr_stmt, ident, infix, number};
//! use actus::ast::{Action, Spanned};
//!
//! let action = Action::new("d'affection", 0).with_body(vec![
//!     expr_stmt(infix(ident("x", 0), "=", infix(number("10", 4), "+", number("5", 9)))),
//!     expr_stmt(call(ident("print", 11), vec![ident("x", 17)])),
//! ]);
//! assert_eq!(action.start(), 0);
//! assert_eq!(action.end(), 18);
//! assert_eq!(action.to_string(), "\t\td'affection\r\n(x = (10 + 5))\nprint(x)\n");
//! ```

pub use crate::ast::{Span, Spanned};
pub use crate::errors::{ActusError, ErrorKind, SourceContext};
pub use crate::render::{signature, Printer, RenderConfig};
pub use crate::validate::check_spans;

pub mod ast;
pub mod errors;
pub mod render;
pub mod validate;
pub mod visitor;
