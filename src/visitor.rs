//! AST Visitor Pattern
//!
//! Provides generic read-only traversal of an action. The visitor can mutate
//! its own state during traversal, but the tree stays immutable.
//!
//! Default `visit_*` methods call the matching `walk_*` function, which
//! descends into owned children in source order. Override `visit_*` to add
//! behavior at specific nodes, and call `walk_*` to keep descending.
//!
//! An identifier's declared type is a shared association, not a child, and is
//! never walked.
//!
//! # Example
//!
//! ```rust
//! use actus::ast::builder::{call, expr_stmt, ident, number};
//! use actus::ast::{Action, Expression};
//! use actus::visitor::{walk_expression, Visitor};
//!
//! struct CountNumbers {
//!     count: usize,
//! }
//!
//! impl<'ast> Visitor<'ast> for CountNumbers {
//!     fn visit_expression(&mut self, expr: &'ast Expression) {
//!         if matches!(expr, Expression::Number(_)) {
//!             self.count += 1;
//!         }
//!         walk_expression(self, expr);
//!     }
//! }
//!
//! let action = Action::new("demo", 0).with_body(vec![expr_stmt(call(
//!     ident("print", 0),
//!     vec![number("1", 6), number("2", 9)],
//! ))]);
//! let mut counter = CountNumbers { count: 0 };
//! counter.visit_action(&action);
//! assert_eq!(counter.count, 2);
//! ```

use crate::ast::{
    Action, Block, CaseStatement, Declaration, Expression, FunctionDecl, Parameter, RecordDecl,
    Statement, Type, VariableDecl,
};

// Visitor Trait

/// AST Visitor trait.
pub trait Visitor<'ast> {
    fn visit_action(&mut self, action: &'ast Action) {
        walk_action(self, action);
    }

    fn visit_declaration(&mut self, decl: &'ast Declaration) {
        walk_declaration(self, decl);
    }

    fn visit_statement(&mut self, stmt: &'ast Statement) {
        walk_statement(self, stmt);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        walk_block(self, block);
    }

    fn visit_case(&mut self, case: &'ast CaseStatement) {
        walk_case(self, case);
    }

    fn visit_parameter(&mut self, param: &'ast Parameter) {
        walk_parameter(self, param);
    }

    fn visit_expression(&mut self, expr: &'ast Expression) {
        walk_expression(self, expr);
    }

    fn visit_type(&mut self, ty: &'ast Type) {
        walk_type(self, ty);
    }
}

// Walk Functions

pub fn walk_action<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, action: &'ast Action) {
    for decl in &action.declarations {
        visitor.visit_declaration(decl);
    }
    visitor.visit_block(&action.body);
}

pub fn walk_declaration<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, decl: &'ast Declaration) {
    match decl {
        Declaration::Variable(d) => walk_variable(visitor, d),
        Declaration::Record(d) => walk_record(visitor, d),
        Declaration::Function(d) => walk_function(visitor, d),
    }
}

pub fn walk_statement<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, stmt: &'ast Statement) {
    match stmt {
        Statement::Expression(s) => visitor.visit_expression(&s.expression),
        Statement::Block(b) => visitor.visit_block(b),
        Statement::If(s) => {
            visitor.visit_expression(&s.condition);
            visitor.visit_block(&s.consequence);
            if let Some(alternative) = &s.alternative {
                visitor.visit_block(alternative);
            }
        }
        Statement::While(s) => {
            visitor.visit_expression(&s.condition);
            visitor.visit_block(&s.body);
        }
        Statement::For(s) => {
            visitor.visit_statement(&s.init);
            visitor.visit_expression(&s.condition);
            visitor.visit_statement(&s.update);
            visitor.visit_block(&s.body);
        }
        Statement::ForEach(s) => {
            // The loop variable is a bare name with no children.
            visitor.visit_expression(&s.iterable);
            visitor.visit_block(&s.body);
        }
        Statement::Select(s) => {
            visitor.visit_expression(&s.subject);
            for case in &s.cases {
                visitor.visit_case(case);
            }
        }
        Statement::Function(d) => walk_function(visitor, d),
        Statement::Record(d) => walk_record(visitor, d),
        Statement::Variable(d) => walk_variable(visitor, d),
        Statement::Return(s) => {
            if let Some(value) = &s.value {
                visitor.visit_expression(value);
            }
        }
    }
}

pub fn walk_block<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, block: &'ast Block) {
    for stmt in &block.statements {
        visitor.visit_statement(stmt);
    }
}

pub fn walk_case<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, case: &'ast CaseStatement) {
    visitor.visit_expression(&case.value);
    visitor.visit_block(&case.body);
}

pub fn walk_parameter<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, param: &'ast Parameter) {
    visitor.visit_type(&param.ty);
}

pub fn walk_expression<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, expr: &'ast Expression) {
    match expr {
        Expression::Identifier(_)
        | Expression::Number(_)
        | Expression::String(_)
        | Expression::Boolean(_) => {}
        Expression::Infix(e) => {
            visitor.visit_expression(&e.left);
            visitor.visit_expression(&e.right);
        }
        Expression::Call(e) => {
            visitor.visit_expression(&e.callee);
            for arg in &e.arguments {
                visitor.visit_expression(arg);
            }
        }
        Expression::Array(e) => {
            for element in &e.elements {
                visitor.visit_expression(element);
            }
        }
    }
}

pub fn walk_type<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, ty: &'ast Type) {
    match ty {
        Type::Basic(_) | Type::Name(_) => {}
        Type::Array(array) => visitor.visit_type(&array.element),
    }
}

// Declarations are reachable both from the declarations block and as
// statements; both paths share these helpers.

fn walk_function<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, decl: &'ast FunctionDecl) {
    for param in &decl.parameters {
        visitor.visit_parameter(param);
    }
    if let Some(return_type) = &decl.return_type {
        visitor.visit_type(return_type);
    }
    visitor.visit_block(&decl.body);
}

fn walk_record<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, decl: &'ast RecordDecl) {
    for field in &decl.fields {
        visitor.visit_parameter(field);
    }
}

fn walk_variable<'ast, V: Visitor<'ast> + ?Sized>(visitor: &mut V, decl: &'ast VariableDecl) {
    visitor.visit_type(&decl.ty);
    if let Some(init) = &decl.initializer {
        visitor.visit_expression(init);
    }
}
