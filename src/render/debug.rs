//! Debug pretty-printer.
//!
//! Renders statements with the language's own uppercase keyword skeleton and
//! expressions fully parenthesised. The output is meant for tracing and test
//! fixtures; it is not guaranteed to parse back as source.
//!
//! A block is a flat list: each statement followed by the configured
//! separator, with no indentation. Keyword skeletons place the closing
//! keyword straight after the block, so `IF (c) THEN x; END IF` and
//! `IF (c) THEN END IF` both read naturally. No space is inserted before
//! `ELSE` or `END ...`: the block's separator is the only gap. With the
//! newline separator a loop renders as `WHILE (c) DO print(x)\nEND WHILE`,
//! and an empty body renders as `DO END WHILE`.

use std::fmt;

use super::signature::signature;
use super::{join, terminate_each, RenderConfig};
use crate::ast::{
    Action, Block, CaseStatement, Declaration, Expression, FunctionDecl, Parameter, RecordDecl,
    Statement, VariableDecl,
};

/// Renders nodes according to a [`RenderConfig`].
///
/// # Examples
///
/// ```rust
/// use actus::ast::builder::{block, expr_stmt, ident, infix, number, while_stmt};
/// use actus::render::{Printer, RenderConfig};
/// let stmt = while_stmt(
///     infix(ident("i", 6), "<", number("10", 10)),
///     block(vec![expr_stmt(infix(ident("i", 17), "=", infix(ident("i", 21), "+", number("1", 25))))], 17),
/// );
/// assert_eq!(
///     Printer::default().statement(&stmt),
///     "WHILE ((i < 10)) DO (i = (i + 1)); END WHILE"
/// );
/// assert_eq!(
///     Printer::new(RenderConfig::newline()).statement(&stmt),
///     "WHILE ((i < 10)) DO (i = (i + 1))\nEND WHILE"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Printer {
    config: RenderConfig,
}

impl Printer {
    pub fn new(config: RenderConfig) -> Self {
        Printer { config }
    }

    /// Renders a whole action: a tab-indented header line, then every
    /// declaration and every body statement on its own line.
    #[tracing::instrument(level = "trace", skip_all, fields(action = %action.name))]
    pub fn action(&self, action: &Action) -> String {
        let declarations = action.declarations.iter().map(|d| self.declaration(d));
        let statements = action.body.statements.iter().map(|s| self.statement(s));
        format!(
            "\t\t{}\r\n{}",
            action.name,
            terminate_each(declarations.chain(statements), "\n")
        )
    }

    pub fn declaration(&self, decl: &Declaration) -> String {
        match decl {
            Declaration::Variable(d) => self.variable(d),
            Declaration::Record(d) => self.record(d),
            Declaration::Function(d) => self.function(d),
        }
    }

    pub fn statement(&self, stmt: &Statement) -> String {
        match stmt {
            Statement::Expression(s) => self.expression(&s.expression),
            Statement::Block(b) => self.block(b),
            Statement::If(s) => {
                let mut out = format!(
                    "IF ({}) THEN {}",
                    self.expression(&s.condition),
                    self.block(&s.consequence)
                );
                if let Some(alternative) = &s.alternative {
                    out.push_str("ELSE ");
                    out.push_str(&self.block(alternative));
                }
                out.push_str("END IF");
                out
            }
            Statement::While(s) => format!(
                "WHILE ({}) DO {}END WHILE",
                self.expression(&s.condition),
                self.block(&s.body)
            ),
            Statement::For(s) => format!(
                "FOR {}; {}; {} DO {}END FOR",
                self.statement(&s.init),
                self.expression(&s.condition),
                self.statement(&s.update),
                self.block(&s.body)
            ),
            Statement::ForEach(s) => format!(
                "FOR EACH {} IN ({}) DO {}END FOR",
                s.variable.name,
                self.expression(&s.iterable),
                self.block(&s.body)
            ),
            Statement::Select(s) => format!(
                "SELECT CASE ({}) {}END SELECT",
                self.expression(&s.subject),
                s.cases.iter().map(|c| self.case(c)).collect::<String>()
            ),
            Statement::Function(d) => self.function(d),
            Statement::Record(d) => self.record(d),
            Statement::Variable(d) => self.variable(d),
            Statement::Return(s) => match &s.value {
                Some(value) => format!("RETURN {}", self.expression(value)),
                None => "RETURN".to_string(),
            },
        }
    }

    /// Each statement followed by the block separator. Empty blocks render as
    /// the empty string.
    pub fn block(&self, block: &Block) -> String {
        terminate_each(
            block.statements.iter().map(|s| self.statement(s)),
            self.config.block_separator.as_str(),
        )
    }

    pub fn case(&self, case: &CaseStatement) -> String {
        format!(
            "CASE ({}) {}",
            self.expression(&case.value),
            self.block(&case.body)
        )
    }

    pub fn parameter(&self, param: &Parameter) -> String {
        format!("{} {}", param.name.name, signature(&param.ty))
    }

    pub fn expression(&self, expr: &Expression) -> String {
        match expr {
            Expression::Identifier(id) => id.name.clone(),
            Expression::Number(lit) => lit.text.clone(),
            Expression::String(lit) => format!("\"{}\"", lit.value),
            Expression::Boolean(lit) => lit.keyword().to_string(),
            Expression::Infix(e) => format!(
                "({} {} {})",
                self.expression(&e.left),
                e.operator,
                self.expression(&e.right)
            ),
            Expression::Call(e) => format!(
                "{}({})",
                self.expression(&e.callee),
                join(e.arguments.iter().map(|a| self.expression(a)), ", ")
            ),
            Expression::Array(e) => format!(
                "[{}]",
                join(e.elements.iter().map(|a| self.expression(a)), ", ")
            ),
        }
    }

    // ------------------------------------------------------------------------
    // Declaration helpers
    // ------------------------------------------------------------------------

    fn function(&self, decl: &FunctionDecl) -> String {
        let return_type = decl
            .return_type
            .as_ref()
            .map(|ty| format!(" {}", signature(ty)))
            .unwrap_or_default();
        format!(
            "FUNCTION {}({}){} BEGIN {}END FUNCTION",
            decl.name.name,
            join(decl.parameters.iter().map(|p| self.parameter(p)), ", "),
            return_type,
            self.block(&decl.body)
        )
    }

    fn record(&self, decl: &RecordDecl) -> String {
        format!(
            "RECORD {}({}) END RECORD",
            decl.name.name,
            join(decl.fields.iter().map(|p| self.parameter(p)), ", ")
        )
    }

    fn variable(&self, decl: &VariableDecl) -> String {
        let mut out = format!("DECLARE {} {}", decl.name.name, signature(&decl.ty));
        if !decl.type_args.is_empty() {
            out.push('(');
            out.push_str(&join(decl.type_args.iter().map(|a| a.text.as_str()), ", "));
            out.push(')');
        }
        if let Some(init) = &decl.initializer {
            out.push_str(" = ");
            out.push_str(&self.expression(init));
        }
        out
    }
}

// ============================================================================
// DISPLAY (default configuration)
// ============================================================================

macro_rules! display_with_printer {
    ($($ty:ty => $method:ident),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&Printer::default().$method(self))
                }
            }
        )*
    };
}

display_with_printer! {
    Action => action,
    Declaration => declaration,
    Statement => statement,
    Block => block,
    CaseStatement => case,
    Parameter => parameter,
    Expression => expression,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::*;
    use crate::ast::{BasicKind, Identifier, NumberLiteral, Type};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_infix_is_always_parenthesised() {
        let expr = infix(ident("x", 0), "+", number("5", 4));
        assert_eq!(expr.to_string(), "(x + 5)");
        let nested = infix(infix(ident("a", 0), "*", ident("b", 4)), "-", ident("c", 9));
        assert_eq!(nested.to_string(), "((a * b) - c)");
    }

    #[test]
    fn test_call_with_and_without_arguments() {
        assert_eq!(call(ident("now", 0), vec![]).to_string(), "now()");
        let expr = call(ident("max", 0), vec![ident("a", 4), number("3", 7)]);
        assert_eq!(expr.to_string(), "max(a, 3)");
    }

    #[test]
    fn test_literals() {
        assert_eq!(string("hi", 0).to_string(), "\"hi\"");
        assert_eq!(boolean(true, 0).to_string(), "TRUE");
        assert_eq!(boolean(false, 0).to_string(), "FALSE");
        assert_eq!(array(vec![], 0).to_string(), "[]");
        assert_eq!(array(vec![number("1", 1), number("2", 4)], 0).to_string(), "[1, 2]");
    }

    #[test]
    fn test_empty_block_renders_empty() {
        assert_eq!(Block::empty(0).to_string(), "");
        assert_eq!(Printer::new(RenderConfig::newline()).block(&Block::empty(0)), "");
    }

    #[test]
    fn test_if_with_and_without_else() {
        let cond = infix(ident("n", 4), "<", number("2", 8));
        let then = block(vec![ret(16, Some(ident("n", 23)))], 16);
        let without = if_stmt(cond.clone(), then.clone(), None);
        assert_eq!(without.to_string(), "IF ((n < 2)) THEN RETURN n; END IF");

        let otherwise = block(vec![ret(30, Some(number("0", 37)))], 30);
        let with = if_stmt(cond, then, Some(otherwise));
        assert_eq!(with.to_string(), "IF ((n < 2)) THEN RETURN n; ELSE RETURN 0; END IF");
    }

    #[test]
    fn test_for_and_for_each() {
        let stmt = for_stmt(
            expr_stmt(infix(ident("i", 4), "=", number("0", 8))),
            infix(ident("i", 11), "<", number("3", 15)),
            expr_stmt(infix(ident("i", 18), "=", infix(ident("i", 22), "+", number("1", 26)))),
            block(vec![expr_stmt(call(ident("print", 31), vec![ident("i", 37)]))], 31),
        );
        assert_eq!(
            stmt.to_string(),
            "FOR (i = 0); (i < 3); (i = (i + 1)) DO print(i); END FOR"
        );

        let each = for_each(
            Identifier::new("item", 9),
            ident("items", 18),
            block(vec![], 27),
        );
        assert_eq!(each.to_string(), "FOR EACH item IN (items) DO END FOR");
    }

    #[test]
    fn test_select() {
        let stmt = select(
            ident("code", 12),
            vec![
                case(number("1", 22), block(vec![expr_stmt(call(ident("a", 25), vec![]))], 25)),
                case(number("2", 35), block(vec![], 38)),
            ],
        );
        assert_eq!(
            stmt.to_string(),
            "SELECT CASE (code) CASE (1) a(); CASE (2) END SELECT"
        );
    }

    #[test]
    fn test_function_and_record() {
        let number_10 = Type::Name(type_name("Number", 20, [("10", 28), ("", 0), ("", 0), ("", 0)]));
        let decl = function(
            Identifier::new("square", 9),
            vec![param(Identifier::new("n", 16), number_10.clone())],
            Some(number_10),
            block(vec![ret(40, Some(infix(ident("n", 47), "*", ident("n", 51))))], 40),
        );
        assert_eq!(
            Statement::Function(decl).to_string(),
            "FUNCTION square(n Number (10)) Number (10) BEGIN RETURN (n * n); END FUNCTION"
        );

        let rec = record(
            Identifier::new("Customer", 7),
            vec![
                param(Identifier::new("name", 17), basic(BasicKind::String, 22)),
                param(Identifier::new("born", 30), basic(BasicKind::Date, 35)),
            ],
        );
        assert_eq!(
            Statement::Record(rec).to_string(),
            "RECORD Customer(name String, born Date) END RECORD"
        );
    }

    #[test]
    fn test_function_without_parameters_or_return_type() {
        let decl = function(Identifier::new("tick", 9), vec![], None, Block::empty(20));
        assert_eq!(
            Declaration::Function(decl).to_string(),
            "FUNCTION tick() BEGIN END FUNCTION"
        );
    }

    #[test]
    fn test_variable_forms() {
        let mut decl = variable(Identifier::new("rate", 8), basic(BasicKind::Float, 13), None);
        assert_eq!(Declaration::Variable(decl.clone()).to_string(), "DECLARE rate Float");

        decl.type_args = vec![NumberLiteral::new("5", 19), NumberLiteral::new("2", 22)];
        decl.initializer = Some(number("1.25", 27));
        assert_eq!(
            Declaration::Variable(decl).to_string(),
            "DECLARE rate Float(5, 2) = 1.25"
        );
    }

    #[test]
    fn test_closing_keywords_follow_the_separator() {
        let printer = Printer::new(RenderConfig::newline());
        let then = block(vec![expr_stmt(call(ident("print", 13), vec![ident("x", 19)]))], 13);
        let otherwise = block(vec![expr_stmt(call(ident("stop", 27), vec![]))], 27);
        let stmt = if_stmt(ident("c", 3), then, Some(otherwise));
        assert_eq!(
            printer.statement(&stmt),
            "IF (c) THEN print(x)\nELSE stop()\nEND IF"
        );

        let empty = while_stmt(ident("c", 6), block(vec![], 11));
        assert_eq!(printer.statement(&empty), "WHILE (c) DO END WHILE");
    }

    #[test]
    fn test_bare_return() {
        assert_eq!(ret(0, None).to_string(), "RETURN");
    }
}
