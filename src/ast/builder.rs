//! # AST Builder Module
//!
//! ## Purpose
//! Terse constructors for parser collaborators and fixtures. Each helper takes
//! the node's payload plus the offsets a leaf must store; composites take only
//! their children.
//!
//! ## Core Principles
//! - Pure, stateless, composable
//! - Leaves carry offsets, composites derive theirs
//! - Required children are required parameters
//!
//! ## Invariants
//! - Never validates offsets; see `crate::validate` for auditing a built tree

use std::sync::Arc;

use super::expr::{
    ArrayLiteral, BooleanLiteral, Expression, Identifier, NumberLiteral, StringLiteral,
};
use super::stmt::{
    Block, CaseStatement, ForEachStatement, ForStatement, FunctionDecl, IfStatement, Parameter,
    RecordDecl, ReturnStatement, SelectStatement, Statement, VariableDecl, WhileStatement,
};
use super::types::{BasicKind, Type, TypeName};

// ----------------------------------------------------------------------------
// Expressions
// ----------------------------------------------------------------------------

pub fn ident(name: &str, start: usize) -> Expression {
    Expression::Identifier(Identifier::new(name, start))
}

/// An identifier carrying its declared type.
pub fn typed_ident(name: &str, start: usize, ty: Arc<Type>) -> Expression {
    Expression::Identifier(Identifier::new(name, start).with_type(ty))
}

pub fn number(text: &str, start: usize) -> Expression {
    Expression::Number(NumberLiteral::new(text, start))
}

pub fn string(value: &str, start: usize) -> Expression {
    Expression::String(StringLiteral::new(value, start))
}

pub fn boolean(value: bool, start: usize) -> Expression {
    Expression::Boolean(BooleanLiteral::new(value, start))
}

pub fn infix(left: Expression, operator: &str, right: Expression) -> Expression {
    Expression::infix(left, operator, right)
}

pub fn call(callee: Expression, arguments: Vec<Expression>) -> Expression {
    Expression::call(callee, arguments)
}

pub fn array(elements: Vec<Expression>, anchor: usize) -> Expression {
    Expression::Array(ArrayLiteral::new(elements, anchor))
}

// ----------------------------------------------------------------------------
// Statements
// ----------------------------------------------------------------------------

pub fn expr_stmt(expression: Expression) -> Statement {
    Statement::from(expression)
}

pub fn block(statements: Vec<Statement>, anchor: usize) -> Block {
    Block::new(statements, anchor)
}

pub fn if_stmt(condition: Expression, consequence: Block, alternative: Option<Block>) -> Statement {
    Statement::If(IfStatement {
        condition,
        consequence,
        alternative,
    })
}

pub fn while_stmt(condition: Expression, body: Block) -> Statement {
    Statement::While(WhileStatement { condition, body })
}

pub fn for_stmt(init: Statement, condition: Expression, update: Statement, body: Block) -> Statement {
    Statement::For(ForStatement {
        init: Box::new(init),
        condition,
        update: Box::new(update),
        body,
    })
}

pub fn for_each(variable: Identifier, iterable: Expression, body: Block) -> Statement {
    Statement::ForEach(ForEachStatement {
        variable,
        iterable,
        body,
    })
}

pub fn select(subject: Expression, cases: Vec<CaseStatement>) -> Statement {
    Statement::Select(SelectStatement { subject, cases })
}

pub fn case(value: Expression, body: Block) -> CaseStatement {
    CaseStatement { value, body }
}

pub fn ret(start: usize, value: Option<Expression>) -> Statement {
    Statement::Return(ReturnStatement { start, value })
}

// ----------------------------------------------------------------------------
// Declarations and types
// ----------------------------------------------------------------------------

pub fn param(name: Identifier, ty: Type) -> Parameter {
    Parameter { name, ty }
}

pub fn function(
    name: Identifier,
    parameters: Vec<Parameter>,
    return_type: Option<Type>,
    body: Block,
) -> FunctionDecl {
    FunctionDecl {
        name,
        parameters,
        return_type,
        body,
    }
}

pub fn record(name: Identifier, fields: Vec<Parameter>) -> RecordDecl {
    RecordDecl { name, fields }
}

pub fn variable(name: Identifier, ty: Type, initializer: Option<Expression>) -> VariableDecl {
    VariableDecl {
        name,
        ty,
        type_args: Vec::new(),
        initializer,
    }
}

pub fn basic(kind: BasicKind, start: usize) -> Type {
    Type::basic(kind, start)
}

/// A constrained type name. Empty strings mark facets that were not written;
/// facet literals are placed at the given offsets.
pub fn type_name(name: &str, start: usize, facets: [(&str, usize); 4]) -> TypeName {
    let [int, dec, min, max] = facets.map(|(text, at)| Some(NumberLiteral::new(text, at)));
    TypeName {
        name: name.to_string(),
        start,
        integer_digits: int,
        decimal_digits: dec,
        min_value: min,
        max_value: max,
    }
}
