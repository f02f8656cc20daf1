//! Span audit: checks a built tree against the source text it was parsed from.
//!
//! Parsers compute leaf offsets by hand, and every composite span is derived
//! from its leaves, so one wrong offset silently skews every enclosing node.
//! The audit walks the tree once and reports:
//!
//! - leaves whose span leaves the source or splits a character,
//! - leaves whose text differs from the bytes they claim,
//! - children that start before their previous sibling ends.
//!
//! The audit never panics and never stops at the first finding.
//!
//! # Example
//!
//! ```rust
//! use actus::ast::builder::{call, expr_stmt, ident, string};
//! use actus::ast::Action;
//! use actus::errors::SourceContext;
//! use actus::validate::check_spans;
//!
//! let source = SourceContext::new("greet.act", "print(\"hi\")");
//! let action = Action::new("greet", 0).with_body(vec![expr_stmt(call(
//!     ident("print", 0),
//!     vec![string("hi", 6)],
//! ))]);
//! assert!(check_spans(&action, &source).is_empty());
//! ```

use tracing::{debug, trace};

use crate::ast::{
    Action, Block, CaseStatement, Declaration, Expression, FunctionDecl, Identifier,
    NumberLiteral, Parameter, RecordDecl, ReturnStatement, Span, Spanned, Statement, Type,
    VariableDecl,
};
use crate::errors::{ActusError, ErrorReporting, SourceContext, ValidationContext};
use crate::visitor::{
    walk_action, walk_block, walk_case, walk_declaration, walk_expression, walk_parameter,
    walk_statement, walk_type, Visitor,
};

/// Audits every span in `action` against `source`.
///
/// Returns one error per finding, in traversal order. A consistent tree
/// yields an empty vector.
#[tracing::instrument(level = "debug", skip_all, fields(action = %action.name, source = %source.name))]
pub fn check_spans(action: &Action, source: &SourceContext) -> Vec<ActusError> {
    let mut audit = SpanAudit::new(source);
    audit.visit_action(action);
    debug!(findings = audit.errors.len(), "span audit complete");
    audit.errors
}

/// How a leaf's expected text is compared with the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Compare {
    Exact,
    IgnoreAsciiCase,
}

struct SpanAudit<'src> {
    context: ValidationContext,
    text: &'src str,
    errors: Vec<ActusError>,
}

impl<'src> SpanAudit<'src> {
    fn new(source: &'src SourceContext) -> Self {
        Self {
            context: ValidationContext::new(source.clone(), "spans"),
            text: &source.content,
            errors: Vec::new(),
        }
    }

    fn push(&mut self, error: ActusError) {
        trace!(code = %error.diagnostic_info.error_code, %error, "span finding");
        self.errors.push(error);
    }

    /// Returns the source slice under `span`, reporting when there is none.
    fn slice(&mut self, node: &str, span: Span) -> Option<&'src str> {
        let text = self.text;
        match text.get(span.range()) {
            Some(found) if span.start <= span.end => Some(found),
            _ => {
                let error = self.context.out_of_bounds(node, span, text.len());
                self.push(error);
                None
            }
        }
    }

    fn leaf(&mut self, node: &str, span: Span, expected: &str, compare: Compare) {
        let Some(found) = self.slice(node, span) else {
            return;
        };
        let matches = match compare {
            Compare::Exact => found == expected,
            Compare::IgnoreAsciiCase => found.eq_ignore_ascii_case(expected),
        };
        if !matches {
            let error = self.context.text_mismatch(node, expected, found, span);
            self.push(error);
        }
    }

    fn identifier(&mut self, ident: &Identifier) {
        self.leaf("Identifier", ident.span(), &ident.name, Compare::Exact);
    }

    fn number(&mut self, lit: &NumberLiteral) {
        if lit.is_present() {
            self.leaf("NumberLiteral", lit.span(), &lit.text, Compare::Exact);
        }
    }

    /// Checks that `spans` are in source order and do not overlap.
    fn order(&mut self, node: &str, spans: impl IntoIterator<Item = Span>) {
        let mut previous_end: Option<usize> = None;
        for span in spans {
            if let Some(end) = previous_end {
                if span.start < end {
                    let error = self.context.out_of_order(node, span, end);
                    self.push(error);
                }
            }
            previous_end = Some(previous_end.map_or(span.end, |end| end.max(span.end)));
        }
    }

    fn function(&mut self, decl: &FunctionDecl) {
        self.identifier(&decl.name);
        let spans = std::iter::once(decl.name.span())
            .chain(decl.parameters.iter().map(Spanned::span))
            .chain(decl.return_type.as_ref().map(Spanned::span))
            .chain(std::iter::once(decl.body.span()));
        self.order("FunctionDecl", spans);
    }

    fn record(&mut self, decl: &RecordDecl) {
        self.identifier(&decl.name);
        let spans = std::iter::once(decl.name.span()).chain(decl.fields.iter().map(Spanned::span));
        self.order("RecordDecl", spans);
    }

    fn variable(&mut self, decl: &VariableDecl) {
        self.identifier(&decl.name);
        for arg in &decl.type_args {
            self.number(arg);
        }
        let spans = [decl.name.span(), decl.ty.span()]
            .into_iter()
            .chain(decl.type_args.iter().filter(|a| a.is_present()).map(Spanned::span))
            .chain(decl.initializer.as_ref().map(Spanned::span));
        self.order("VariableDecl", spans);
    }

    fn return_keyword(&mut self, ret: &ReturnStatement) {
        let keyword = Span::new(ret.start, ret.start.saturating_add(ReturnStatement::KEYWORD.len()));
        self.leaf(
            "ReturnStatement",
            keyword,
            ReturnStatement::KEYWORD,
            Compare::IgnoreAsciiCase,
        );
        self.order(
            "ReturnStatement",
            std::iter::once(keyword).chain(ret.value.as_ref().map(Spanned::span)),
        );
    }
}

impl<'ast> Visitor<'ast> for SpanAudit<'_> {
    fn visit_action(&mut self, action: &'ast Action) {
        let spans = action
            .declarations
            .iter()
            .map(Spanned::span)
            .chain((!action.body.is_empty()).then(|| action.body.span()));
        self.order("Action", spans);
        walk_action(self, action);
    }

    fn visit_declaration(&mut self, decl: &'ast Declaration) {
        match decl {
            Declaration::Variable(d) => self.variable(d),
            Declaration::Record(d) => self.record(d),
            Declaration::Function(d) => self.function(d),
        }
        walk_declaration(self, decl);
    }

    fn visit_statement(&mut self, stmt: &'ast Statement) {
        let node = stmt.kind_name();
        match stmt {
            // Nothing to order: one child, or handled by `visit_block`.
            Statement::Expression(_) | Statement::Block(_) => {}
            Statement::If(s) => {
                let spans = [
                    Some(s.condition.span()),
                    Some(s.consequence.span()),
                    s.alternative.as_ref().map(Spanned::span),
                ]
                .into_iter()
                .flatten();
                self.order(node, spans);
            }
            Statement::While(s) => self.order(node, [s.condition.span(), s.body.span()]),
            Statement::For(s) => self.order(
                node,
                [s.init.span(), s.condition.span(), s.update.span(), s.body.span()],
            ),
            Statement::ForEach(s) => {
                self.identifier(&s.variable);
                self.order(node, [s.variable.span(), s.iterable.span(), s.body.span()]);
            }
            Statement::Select(s) => {
                let spans =
                    std::iter::once(s.subject.span()).chain(s.cases.iter().map(Spanned::span));
                self.order(node, spans);
            }
            Statement::Function(d) => self.function(d),
            Statement::Record(d) => self.record(d),
            Statement::Variable(d) => self.variable(d),
            Statement::Return(s) => self.return_keyword(s),
        }
        walk_statement(self, stmt);
    }

    fn visit_block(&mut self, block: &'ast Block) {
        self.order("Block", block.statements.iter().map(Spanned::span));
        walk_block(self, block);
    }

    fn visit_case(&mut self, case: &'ast CaseStatement) {
        self.order("CaseStatement", [case.value.span(), case.body.span()]);
        walk_case(self, case);
    }

    fn visit_parameter(&mut self, param: &'ast Parameter) {
        self.identifier(&param.name);
        self.order("Parameter", [param.name.span(), param.ty.span()]);
        walk_parameter(self, param);
    }

    fn visit_expression(&mut self, expr: &'ast Expression) {
        let node = expr.kind_name();
        match expr {
            Expression::Identifier(e) => self.identifier(e),
            Expression::Number(e) => self.leaf(node, e.span(), &e.text, Compare::Exact),
            Expression::String(e) => {
                // Delimiters are not checked; only the content between them.
                let span = e.span();
                if self.slice(node, span).is_some() {
                    let inner = Span::new(span.start.saturating_add(1), span.end.saturating_sub(1));
                    self.leaf(node, inner, &e.value, Compare::Exact);
                }
            }
            Expression::Boolean(e) => {
                self.leaf(node, e.span(), e.keyword(), Compare::IgnoreAsciiCase)
            }
            Expression::Infix(e) => self.order(node, [e.left.span(), e.right.span()]),
            Expression::Call(e) => {
                let spans =
                    std::iter::once(e.callee.span()).chain(e.arguments.iter().map(Spanned::span));
                self.order(node, spans);
            }
            Expression::Array(e) => self.order(node, e.elements.iter().map(Spanned::span)),
        }
        walk_expression(self, expr);
    }

    fn visit_type(&mut self, ty: &'ast Type) {
        let node = ty.kind_name();
        match ty {
            Type::Basic(t) => self.leaf(node, t.span(), t.kind.name(), Compare::Exact),
            Type::Name(t) => {
                let base = Span::new(t.start, t.start.saturating_add(t.name.len()));
                self.leaf(node, base, &t.name, Compare::Exact);
                for facet in t.facets() {
                    self.number(facet);
                }
                self.order(node, std::iter::once(base).chain(t.facets().map(Spanned::span)));
            }
            Type::Array(_) => {}
        }
        walk_type(self, ty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::builder::*;
    use crate::ast::{BasicKind, ForEachStatement};
    use crate::errors::ErrorKind;

    fn audit(text: &str, action: &Action) -> Vec<ActusError> {
        check_spans(action, &SourceContext::new("test.act", text))
    }

    fn kinds(errors: &[ActusError]) -> Vec<&'static str> {
        errors.iter().map(|e| e.kind.code_suffix()).collect()
    }

    #[test]
    fn test_consistent_tree_has_no_findings() {
        //          0         1         2
        //          0123456789012345678901234
        let text = "x = 10 + 5\nprint(x)";
        let action = Action::new("demo", 0).with_body(vec![
            expr_stmt(infix(
                ident("x", 0),
                "=",
                infix(number("10", 4), "+", number("5", 9)),
            )),
            expr_stmt(call(ident("print", 11), vec![ident("x", 17)])),
        ]);
        assert!(audit(text, &action).is_empty());
    }

    #[test]
    fn test_shifted_identifier_is_a_mismatch() {
        let text = "print(x)";
        let action =
            Action::new("demo", 0).with_body(vec![expr_stmt(call(ident("print", 1), vec![]))]);
        let errors = audit(text, &action);
        assert_eq!(kinds(&errors), vec!["text_mismatch"]);
        assert_eq!(
            errors[0].kind,
            ErrorKind::TextMismatch {
                node: "Identifier".into(),
                expected: "print".into(),
                found: "rint(".into(),
            }
        );
    }

    #[test]
    fn test_leaf_past_end_is_out_of_bounds() {
        let action = Action::new("demo", 0).with_body(vec![expr_stmt(ident("total", 3))]);
        let errors = audit("x = 1", &action);
        assert_eq!(kinds(&errors), vec!["out_of_bounds"]);
    }

    #[test]
    fn test_leaf_splitting_a_char_is_out_of_bounds() {
        // "é" is two bytes; offset 1 falls inside it.
        let action = Action::new("demo", 0).with_body(vec![expr_stmt(ident("x", 1))]);
        let errors = audit("éx", &action);
        assert_eq!(kinds(&errors), vec!["out_of_bounds"]);
    }

    #[test]
    fn test_boolean_ignores_case_but_string_does_not() {
        let text = "f(true, 'Hi')";
        let action = Action::new("demo", 0).with_body(vec![expr_stmt(call(
            ident("f", 0),
            vec![boolean(true, 2), string("hi", 8)],
        ))]);
        let errors = audit(text, &action);
        assert_eq!(kinds(&errors), vec!["text_mismatch"]);
        assert!(errors[0].to_string().contains("StringLiteral"));
    }

    #[test]
    fn test_swapped_operands_are_out_of_order() {
        let text = "a + b";
        let action = Action::new("demo", 0).with_body(vec![expr_stmt(infix(
            ident("b", 4),
            "+",
            ident("a", 0),
        ))]);
        let errors = audit(text, &action);
        assert_eq!(kinds(&errors), vec!["out_of_order"]);
        assert_eq!(errors[0].diagnostic_info.error_code, "actus::spans::out_of_order");
    }

    #[test]
    fn test_return_keyword_and_type_facets_are_checked() {
        //          0         1         2
        //          012345678901234567890123456
        let text = "DECLARE n Number (8, 2)\nreturn n";
        let decl = variable(
            Identifier::new("n", 8),
            Type::Name(type_name("Number", 10, [("8", 18), ("2", 21), ("", 0), ("", 0)])),
            None,
        );
        let action = Action::new("demo", 0)
            .with_declarations(vec![Declaration::Variable(decl)])
            .with_body(vec![ret(24, Some(ident("n", 31)))]);
        assert!(audit(text, &action).is_empty());
    }

    #[test]
    fn test_for_each_variable_is_audited() {
        let text = "FOR EACH item IN items DO";
        let stmt = Statement::ForEach(ForEachStatement {
            variable: Identifier::new("itme", 9),
            iterable: ident("items", 17),
            body: block(vec![], 25),
        });
        let action = Action::new("demo", 0).with_body(vec![stmt]);
        assert_eq!(kinds(&audit(text, &action)), vec!["text_mismatch"]);
    }

    #[test]
    fn test_collects_every_finding() {
        let text = "DECLARE d Date";
        let decl = variable(Identifier::new("e", 8), basic(BasicKind::Time, 10), None);
        let action = Action::new("demo", 0).with_declarations(vec![Declaration::Variable(decl)]);
        let errors = audit(text, &action);
        assert_eq!(kinds(&errors), vec!["text_mismatch", "text_mismatch"]);
    }

    #[test]
    fn test_return_near_offset_limit_is_out_of_bounds() {
        let action = Action::new("demo", 0).with_body(vec![ret(usize::MAX - 2, None)]);
        let errors = audit("RETURN", &action);
        assert_eq!(kinds(&errors), vec!["out_of_bounds"]);
    }

    #[test]
    fn test_leaves_near_offset_limit_are_out_of_bounds() {
        let expr = call(ident("f", usize::MAX - 1), vec![string("s", usize::MAX)]);
        let ty = Type::Name(type_name("Number", usize::MAX - 3, [("10", usize::MAX); 4]));
        let decl = variable(Identifier::new("n", usize::MAX - 5), ty, None);
        let action = Action::new("demo", 0)
            .with_declarations(vec![Declaration::Variable(decl)])
            .with_body(vec![expr_stmt(expr)]);
        let errors = audit("f(\"s\")", &action);
        assert!(!errors.is_empty());
        assert!(errors
            .iter()
            .all(|e| matches!(e.kind, ErrorKind::OutOfBounds { .. } | ErrorKind::OutOfOrder { .. })));
    }
}
