//! The root node of a compiled unit.

use serde::{Deserialize, Serialize};

use super::stmt::{Block, FunctionDecl, RecordDecl, Statement, VariableDecl};
use super::{furthest_end, Spanned};

/// One compiled unit: its label, its declarations, and its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub name: String,
    /// Offset used as the whole span when the action has no content.
    pub anchor: usize,
    pub declarations: Vec<Declaration>,
    pub body: Block,
}

/// Declarations allowed in an action's declarations block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Declaration {
    Variable(VariableDecl),
    Record(RecordDecl),
    Function(FunctionDecl),
}

impl Action {
    pub fn new(name: impl Into<String>, anchor: usize) -> Self {
        Action {
            name: name.into(),
            anchor,
            declarations: Vec::new(),
            body: Block::empty(anchor),
        }
    }

    #[must_use]
    pub fn with_declarations(mut self, declarations: Vec<Declaration>) -> Self {
        self.declarations = declarations;
        self
    }

    #[must_use]
    pub fn with_body(mut self, statements: Vec<Statement>) -> Self {
        self.body.statements = statements;
        self
    }

    /// True when the action has neither declarations nor statements.
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty() && self.body.is_empty()
    }
}

impl From<Declaration> for Statement {
    fn from(decl: Declaration) -> Self {
        match decl {
            Declaration::Variable(d) => Statement::Variable(d),
            Declaration::Record(d) => Statement::Record(d),
            Declaration::Function(d) => Statement::Function(d),
        }
    }
}

impl Spanned for Declaration {
    fn start(&self) -> usize {
        match self {
            Declaration::Variable(d) => d.start(),
            Declaration::Record(d) => d.start(),
            Declaration::Function(d) => d.start(),
        }
    }

    fn end(&self) -> usize {
        match self {
            Declaration::Variable(d) => d.end(),
            Declaration::Record(d) => d.end(),
            Declaration::Function(d) => d.end(),
        }
    }
}

impl Spanned for Action {
    fn start(&self) -> usize {
        match self.declarations.first() {
            Some(decl) => decl.start(),
            None if self.body.is_empty() => self.anchor,
            None => self.body.start(),
        }
    }

    fn end(&self) -> usize {
        let ends = self
            .declarations
            .iter()
            .map(Spanned::end)
            .chain((!self.body.is_empty()).then(|| self.body.end()));
        furthest_end(self.start(), ends)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{Expression, Identifier, Span};

    #[test]
    fn test_empty_action_is_zero_width() {
        let action = Action::new("noop", 0);
        assert!(action.is_empty());
        assert_eq!(action.span(), Span::point(0));
    }

    #[test]
    fn test_action_spans_body() {
        let action = Action::new("greet", 0).with_body(vec![Statement::from(Expression::call(
            Expression::Identifier(Identifier::new("hello", 12)),
            vec![],
        ))]);
        assert_eq!(action.span(), Span::new(12, 17));
    }
}
