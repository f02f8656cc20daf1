//! Statement nodes, including the declarations that may appear as statements.

use serde::{Deserialize, Serialize};

use super::expr::{Expression, Identifier, NumberLiteral};
use super::types::Type;
use super::{furthest_end, Spanned};

/// The closed set of statement kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    Expression(ExpressionStatement),
    Block(Block),
    If(IfStatement),
    While(WhileStatement),
    For(ForStatement),
    ForEach(ForEachStatement),
    Select(SelectStatement),
    Function(FunctionDecl),
    Record(RecordDecl),
    Variable(VariableDecl),
    Return(ReturnStatement),
}

/// An expression evaluated for its effect, e.g. `x = 10 + 5`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

/// An ordered sequence of statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub statements: Vec<Statement>,
    /// Offset used as the whole span when the block is empty.
    pub anchor: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStatement {
    pub condition: Expression,
    pub consequence: Block,
    pub alternative: Option<Block>,
}

/// Pre-test loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStatement {
    pub condition: Expression,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForStatement {
    pub init: Box<Statement>,
    pub condition: Expression,
    pub update: Box<Statement>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForEachStatement {
    pub variable: Identifier,
    pub iterable: Expression,
    pub body: Block,
}

/// `SELECT CASE` over a subject expression. Which case runs is up to the
/// consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectStatement {
    pub subject: Expression,
    pub cases: Vec<CaseStatement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseStatement {
    pub value: Expression,
    pub body: Block,
}

/// A typed name, used for function parameters and record fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: Identifier,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDecl {
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<Type>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordDecl {
    pub name: Identifier,
    pub fields: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDecl {
    pub name: Identifier,
    pub ty: Type,
    /// Precision literals written after the type, in order.
    pub type_args: Vec<NumberLiteral>,
    pub initializer: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStatement {
    /// Offset of the `RETURN` keyword.
    pub start: usize,
    pub value: Option<Expression>,
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl Block {
    pub fn new(statements: Vec<Statement>, anchor: usize) -> Self {
        Block { statements, anchor }
    }

    /// A block with no statements, anchored at `anchor`.
    pub fn empty(anchor: usize) -> Self {
        Block {
            statements: Vec::new(),
            anchor,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Statement {
    /// Name of the variant, for messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Statement::Expression(_) => "ExpressionStatement",
            Statement::Block(_) => "BlockStatement",
            Statement::If(_) => "IfStatement",
            Statement::While(_) => "WhileStatement",
            Statement::For(_) => "ForStatement",
            Statement::ForEach(_) => "ForEachStatement",
            Statement::Select(_) => "SelectStatement",
            Statement::Function(_) => "FunctionDecl",
            Statement::Record(_) => "RecordDecl",
            Statement::Variable(_) => "VariableDecl",
            Statement::Return(_) => "ReturnStatement",
        }
    }
}

impl ReturnStatement {
    pub const KEYWORD: &'static str = "RETURN";
}

impl From<Expression> for Statement {
    fn from(expression: Expression) -> Self {
        Statement::Expression(ExpressionStatement { expression })
    }
}

// ============================================================================
// POSITION TRACKING
// ============================================================================

impl Spanned for Statement {
    fn start(&self) -> usize {
        match self {
            Statement::Expression(s) => s.start(),
            Statement::Block(s) => s.start(),
            Statement::If(s) => s.start(),
            Statement::While(s) => s.start(),
            Statement::For(s) => s.start(),
            Statement::ForEach(s) => s.start(),
            Statement::Select(s) => s.start(),
            Statement::Function(s) => s.start(),
            Statement::Record(s) => s.start(),
            Statement::Variable(s) => s.start(),
            Statement::Return(s) => s.start(),
        }
    }

    fn end(&self) -> usize {
        match self {
            Statement::Expression(s) => s.end(),
            Statement::Block(s) => s.end(),
            Statement::If(s) => s.end(),
            Statement::While(s) => s.end(),
            Statement::For(s) => s.end(),
            Statement::ForEach(s) => s.end(),
            Statement::Select(s) => s.end(),
            Statement::Function(s) => s.end(),
            Statement::Record(s) => s.end(),
            Statement::Variable(s) => s.end(),
            Statement::Return(s) => s.end(),
        }
    }
}

impl Spanned for ExpressionStatement {
    fn start(&self) -> usize {
        self.expression.start()
    }

    fn end(&self) -> usize {
        self.expression.end()
    }
}

impl Spanned for Block {
    fn start(&self) -> usize {
        self.statements.first().map_or(self.anchor, Spanned::start)
    }

    fn end(&self) -> usize {
        furthest_end(self.start(), self.statements.iter().map(Spanned::end))
    }
}

impl Spanned for IfStatement {
    fn start(&self) -> usize {
        self.condition.start()
    }

    fn end(&self) -> usize {
        furthest_end(
            self.start(),
            [
                Some(self.condition.end()),
                Some(self.consequence.end()),
                self.alternative.as_ref().map(Spanned::end),
            ]
            .into_iter()
            .flatten(),
        )
    }
}

impl Spanned for WhileStatement {
    fn start(&self) -> usize {
        self.condition.start()
    }

    fn end(&self) -> usize {
        furthest_end(self.start(), [self.condition.end(), self.body.end()])
    }
}

impl Spanned for ForStatement {
    fn start(&self) -> usize {
        self.init.start()
    }

    fn end(&self) -> usize {
        furthest_end(
            self.start(),
            [
                self.init.end(),
                self.condition.end(),
                self.update.end(),
                self.body.end(),
            ],
        )
    }
}

impl Spanned for ForEachStatement {
    fn start(&self) -> usize {
        self.variable.start()
    }

    fn end(&self) -> usize {
        furthest_end(
            self.start(),
            [self.variable.end(), self.iterable.end(), self.body.end()],
        )
    }
}

impl Spanned for SelectStatement {
    fn start(&self) -> usize {
        self.subject.start()
    }

    fn end(&self) -> usize {
        furthest_end(
            self.start(),
            std::iter::once(self.subject.end()).chain(self.cases.iter().map(Spanned::end)),
        )
    }
}

impl Spanned for CaseStatement {
    fn start(&self) -> usize {
        self.value.start()
    }

    fn end(&self) -> usize {
        furthest_end(self.start(), [self.value.end(), self.body.end()])
    }
}

impl Spanned for Parameter {
    fn start(&self) -> usize {
        self.name.start()
    }

    fn end(&self) -> usize {
        furthest_end(self.start(), [self.name.end(), self.ty.end()])
    }
}

impl Spanned for FunctionDecl {
    fn start(&self) -> usize {
        self.name.start()
    }

    fn end(&self) -> usize {
        let ends = std::iter::once(self.name.end())
            .chain(self.parameters.iter().map(Spanned::end))
            .chain(self.return_type.as_ref().map(Spanned::end))
            .chain(std::iter::once(self.body.end()));
        furthest_end(self.start(), ends)
    }
}

impl Spanned for RecordDecl {
    fn start(&self) -> usize {
        self.name.start()
    }

    fn end(&self) -> usize {
        furthest_end(
            self.start(),
            std::iter::once(self.name.end()).chain(self.fields.iter().map(Spanned::end)),
        )
    }
}

impl Spanned for VariableDecl {
    fn start(&self) -> usize {
        self.name.start()
    }

    /// Ends at the initializer. Without one, the span degrades to the furthest
    /// child that is present: type arguments, the declared type, the name.
    fn end(&self) -> usize {
        let ends = [self.name.end(), self.ty.end()]
            .into_iter()
            .chain(self.type_args.iter().map(Spanned::end))
            .chain(self.initializer.as_ref().map(Spanned::end));
        furthest_end(self.start(), ends)
    }
}

impl Spanned for ReturnStatement {
    fn start(&self) -> usize {
        self.start
    }

    fn end(&self) -> usize {
        match &self.value {
            Some(value) => furthest_end(self.start, [value.end()]),
            None => self.start.saturating_add(Self::KEYWORD.len()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BasicKind, Span};

    fn ident(name: &str, start: usize) -> Expression {
        Expression::Identifier(Identifier::new(name, start))
    }

    #[test]
    fn test_empty_block_is_zero_width() {
        let block = Block::empty(30);
        assert_eq!(block.span(), Span::point(30));
    }

    #[test]
    fn test_if_with_empty_branches_still_covers_condition() {
        // IF (flag) THEN END IF
        let stmt = IfStatement {
            condition: ident("flag", 4),
            consequence: Block::empty(15),
            alternative: None,
        };
        assert_eq!(stmt.start(), 4);
        assert_eq!(stmt.end(), 15);
    }

    #[test]
    fn test_variable_without_initializer_ends_at_type() {
        // DECLARE x Integer
        let decl = VariableDecl {
            name: Identifier::new("x", 8),
            ty: Type::basic(BasicKind::Integer, 10),
            type_args: vec![],
            initializer: None,
        };
        assert_eq!(decl.span(), Span::new(8, 17));
    }

    #[test]
    fn test_variable_with_initializer_ends_there() {
        // DECLARE x Integer = 42
        let decl = VariableDecl {
            name: Identifier::new("x", 8),
            ty: Type::basic(BasicKind::Integer, 10),
            type_args: vec![],
            initializer: Some(Expression::Number(NumberLiteral::new("42", 20))),
        };
        assert_eq!(decl.end(), 22);
    }

    #[test]
    fn test_bare_return_covers_keyword() {
        let ret = ReturnStatement {
            start: 3,
            value: None,
        };
        assert_eq!(ret.span(), Span::new(3, 9));
    }

    #[test]
    fn test_record_without_fields_ends_at_name() {
        let record = RecordDecl {
            name: Identifier::new("Empty", 7),
            fields: vec![],
        };
        assert_eq!(record.span(), Span::new(7, 12));
    }
}
