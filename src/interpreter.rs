use super::ast::{Expr, Stmt};
use super::environment::Environment;
use super::error::RuntimeError;
use super::lexer::{Token, TokenKind};
use super::throw_runtime_error;
use super::value::Value;

use std::io::{self, Stdout, Write};

pub struct Interpreter<W: Write = Stdout> {
    env: Environment,
    out: W,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::with_output(io::stdout())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Interpreter<W> {
    /// `print` statements write to `out`; the global environment lives as long as the interpreter.
    pub fn with_output(out: W) -> Self {
        Interpreter {
            env: Environment::new(),
            out,
        }
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs statements in order, stopping at the first runtime error.
    /// Bindings made before the error stay in place.
    pub fn interpret(&mut self, statements: &[Stmt]) -> Result<(), RuntimeError> {
        let result = statements
            .iter()
            .try_for_each(|statement| self.execute(statement));
        // Output written before a failing statement must still reach the sink.
        let flushed = self.out.flush();
        result?;
        flushed?;
        Ok(())
    }

    fn execute(&mut self, statement: &Stmt) -> Result<(), RuntimeError> {
        match statement {
            Stmt::Expression(expr) => {
                self.evaluate(expr)?;
            }
            Stmt::Print(expr) => {
                let value = self.evaluate(expr)?;
                writeln!(self.out, "{value}")?;
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                tracing::trace!(name = %name.lexeme, %value, "define");
                self.env.define(name.lexeme.clone(), value);
            }
        }
        Ok(())
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Grouping(inner) => self.evaluate(inner),
            Expr::Unary { operator, right } => {
                let right = self.evaluate(right)?;
                self.evaluate_unary(operator, right)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                self.evaluate_binary(operator, left, right)
            }
            Expr::Variable(name) => self.env.get(name),
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                self.env.assign(name, value.clone())?;
                Ok(value)
            }
            Expr::Logical { operator, .. } => unsupported(operator),
            Expr::Call { paren, .. } => unsupported(paren),
            Expr::Get { name, .. } | Expr::Set { name, .. } => unsupported(name),
            Expr::This(keyword) | Expr::Super { keyword, .. } => unsupported(keyword),
        }
    }

    fn evaluate_unary(&self, operator: &Token, right: Value) -> Result<Value, RuntimeError> {
        match (operator.kind, right) {
            (TokenKind::Bang, right) => Ok(Value::Boolean(!right.is_truthy())),
            (TokenKind::Minus, Value::Number(n)) => Ok(Value::Number(-n)),
            (TokenKind::Minus, _) => throw_runtime_error!(operator, "Operand must be a number."),
            (kind, _) => throw_runtime_error!(operator, "Unknown unary operator {kind}."),
        }
    }

    fn evaluate_binary(
        &self,
        operator: &Token,
        left: Value,
        right: Value,
    ) -> Result<Value, RuntimeError> {
        match operator.kind {
            TokenKind::Plus => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(a), Value::String(b)) => Ok(Value::String(a + &b)),
                _ => throw_runtime_error!(operator, "Operands must be two numbers or two strings."),
            },
            TokenKind::Minus => number_op(operator, left, right, |a, b| Value::Number(a - b)),
            TokenKind::Star => number_op(operator, left, right, |a, b| Value::Number(a * b)),
            TokenKind::Slash => {
                let (a, b) = number_operands(operator, left, right)?;
                if b == 0.0 {
                    throw_runtime_error!(operator, "Cannot divide by zero");
                }
                Ok(Value::Number(a / b))
            }

            TokenKind::Greater => number_op(operator, left, right, |a, b| Value::Boolean(a > b)),
            TokenKind::GreaterEqual => {
                number_op(operator, left, right, |a, b| Value::Boolean(a >= b))
            }
            TokenKind::Less => number_op(operator, left, right, |a, b| Value::Boolean(a < b)),
            TokenKind::LessEqual => number_op(operator, left, right, |a, b| Value::Boolean(a <= b)),

            TokenKind::EqualEqual => Ok(Value::Boolean(left == right)),
            TokenKind::BangEqual => Ok(Value::Boolean(left != right)),

            kind => throw_runtime_error!(operator, "Unknown binary operator {kind}."),
        }
    }
}

fn number_operands(operator: &Token, left: Value, right: Value) -> Result<(f64, f64), RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok((a, b)),
        _ => throw_runtime_error!(operator, "Operands must be numbers."),
    }
}

fn number_op(
    operator: &Token,
    left: Value,
    right: Value,
    op: impl Fn(f64, f64) -> Value,
) -> Result<Value, RuntimeError> {
    let (a, b) = number_operands(operator, left, right)?;
    Ok(op(a, b))
}

fn unsupported(token: &Token) -> Result<Value, RuntimeError> {
    throw_runtime_error!(token, "Unsupported expression.")
}
