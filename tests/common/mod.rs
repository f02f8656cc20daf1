// tests/common/mod.rs
//
// Hand-built trees with offsets that match their source text, standing in for
// what a parser would produce.

#![allow(dead_code)]

use actus::ast::builder::*;
use actus::ast::{Action, BasicKind, Declaration, Identifier};
use actus::errors::SourceContext;

pub const AFFECTION_SOURCE: &str = "x = 10 + 5\nprint(x)";

pub const FIBONACCI_SOURCE: &str = "DECLARE
  FUNCTION fib(n Integer) Integer
  BEGIN
    IF n < 2 THEN
      RETURN n
    END IF
    RETURN fib(n - 1) + fib(n - 2)
  END FUNCTION
END DECLARE
x = fib(10)
WHILE x > 0 DO
  print(x)
  x = x - 1
END WHILE
";

pub fn source(name: &str, text: &str) -> SourceContext {
    SourceContext::new(name, text)
}

/// `x = 10 + 5` then `print(x)`.
pub fn affection() -> Action {
    Action::new("action d'affection", 0).with_body(vec![
        expr_stmt(infix(
            ident("x", 0),
            "=",
            infix(number("10", 4), "+", number("5", 9)),
        )),
        expr_stmt(call(ident("print", 11), vec![ident("x", 17)])),
    ])
}

/// A recursive function declaration followed by a counting loop.
pub fn fibonacci() -> Action {
    let condition = infix(ident("n", 57), "<", number("2", 61));
    let base_case = if_stmt(condition, block(vec![ret(74, Some(ident("n", 81)))], 74), None);
    let recursion = ret(
        98,
        Some(infix(
            call(ident("fib", 105), vec![infix(ident("n", 109), "-", number("1", 113))]),
            "+",
            call(ident("fib", 118), vec![infix(ident("n", 122), "-", number("2", 126))]),
        )),
    );
    let fib = function(
        Identifier::new("fib", 19),
        vec![param(Identifier::new("n", 23), basic(BasicKind::Integer, 25))],
        Some(basic(BasicKind::Integer, 34)),
        block(vec![base_case, recursion], 54),
    );

    let countdown = while_stmt(
        infix(ident("x", 174), ">", number("0", 178)),
        block(
            vec![
                expr_stmt(call(ident("print", 185), vec![ident("x", 191)])),
                expr_stmt(infix(
                    ident("x", 196),
                    "=",
                    infix(ident("x", 200), "-", number("1", 204)),
                )),
            ],
            185,
        ),
    );

    Action::new("fibonacci", 0)
        .with_declarations(vec![Declaration::Function(fib)])
        .with_body(vec![
            expr_stmt(infix(
                ident("x", 156),
                "=",
                call(ident("fib", 160), vec![number("10", 164)]),
            )),
            countdown,
        ])
}
