// Parenthesised prefix rendering of the syntax tree, for trace logs and tests.

use super::ast::{Expr, Stmt};
use super::value::Value;

pub fn print_stmt(stmt: &Stmt) -> String {
    match stmt {
        Stmt::Expression(expr) => parenthesize(";", &[expr]),
        Stmt::Print(expr) => parenthesize("print", &[expr]),
        Stmt::Var {
            name,
            initializer: Some(initializer),
        } => parenthesize(&format!("var {}", name.lexeme), &[initializer]),
        Stmt::Var {
            name,
            initializer: None,
        } => format!("(var {})", name.lexeme),
    }
}

pub fn print_expr(expr: &Expr) -> String {
    match expr {
        Expr::Literal(Value::String(s)) => format!("{s:?}"),
        Expr::Literal(value) => value.to_string(),
        Expr::Grouping(inner) => parenthesize("group", &[inner.as_ref()]),
        Expr::Unary { operator, right } => parenthesize(&operator.lexeme, &[right.as_ref()]),
        Expr::Binary {
            left,
            operator,
            right,
        }
        | Expr::Logical {
            left,
            operator,
            right,
        } => parenthesize(&operator.lexeme, &[left.as_ref(), right.as_ref()]),
        Expr::Variable(name) => name.lexeme.clone(),
        Expr::Assign { name, value } => parenthesize(&format!("= {}", name.lexeme), &[value.as_ref()]),
        Expr::Call {
            callee, arguments, ..
        } => {
            let mut parts = vec![callee.as_ref()];
            parts.extend(arguments);
            parenthesize("call", &parts)
        }
        Expr::Get { object, name } => parenthesize(&format!(". {}", name.lexeme), &[object.as_ref()]),
        Expr::Set {
            object,
            name,
            value,
        } => parenthesize(&format!("= .{}", name.lexeme), &[object.as_ref(), value.as_ref()]),
        Expr::This(_) => "this".to_string(),
        Expr::Super { method, .. } => format!("(super {})", method.lexeme),
    }
}

fn parenthesize(name: &str, exprs: &[&Expr]) -> String {
    let mut out = format!("({name}");
    for expr in exprs {
        out.push(' ');
        out.push_str(&print_expr(expr));
    }
    out.push(')');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{Token, TokenKind};
    use pretty_assertions::assert_eq;

    fn token(kind: TokenKind, lexeme: &str) -> Token {
        Token {
            kind,
            lexeme: lexeme.to_string(),
            literal: None,
            line: 1,
        }
    }

    #[test]
    fn prints_nested_expression() {
        let expr = Expr::Binary {
            left: Box::new(Expr::Unary {
                operator: token(TokenKind::Minus, "-"),
                right: Box::new(Expr::Literal(Value::Number(123.0))),
            }),
            operator: token(TokenKind::Star, "*"),
            right: Box::new(Expr::Grouping(Box::new(Expr::Literal(Value::Number(
                45.67,
            ))))),
        };
        assert_eq!(print_expr(&expr), "(* (- 123) (group 45.67))");
    }

    #[test]
    fn prints_unsupported_shapes() {
        let call = Expr::Call {
            callee: Box::new(Expr::Variable(token(TokenKind::Identifier, "f"))),
            paren: token(TokenKind::RightParen, ")"),
            arguments: vec![Expr::Literal(Value::Nil), Expr::This(token(TokenKind::This, "this"))],
        };
        assert_eq!(print_expr(&call), "(call f nil this)");

        let get = Expr::Get {
            object: Box::new(Expr::Variable(token(TokenKind::Identifier, "a"))),
            name: token(TokenKind::Identifier, "b"),
        };
        assert_eq!(print_expr(&get), "(. b a)");
    }

    #[test]
    fn prints_strings_quoted() {
        let stmt = Stmt::Print(Expr::Literal(Value::String("hi".into())));
        assert_eq!(print_stmt(&stmt), "(print \"hi\")");
    }
}
