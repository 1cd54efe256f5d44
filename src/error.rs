use std::io;

use thiserror::Error;

use super::lexer::{Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexError {
    #[error("[line {line}] Error: Unexpected character '{ch}'.")]
    UnexpectedCharacter { line: usize, ch: char },
    #[error("[line {line}] Error: Unterminated string.")]
    UnterminatedString { line: usize },
    #[error("[line {line}] Error: Number literal '{lexeme}' is too large.")]
    NumberOutOfRange { line: usize, lexeme: String },
}

/// A syntax error anchored at the token where the parser gave up.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {}] Error{}: {}", .token.line, location(.token), .message)]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        Self {
            token: token.clone(),
            message: message.into(),
        }
    }
}

fn location(token: &Token) -> String {
    if token.kind == TokenKind::Eof {
        " at end".to_string()
    } else {
        format!(" at '{}'", token.lexeme)
    }
}

/// Anything that rejects a source text before it reaches the interpreter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{}\n[line {}]", .message, .token.line)]
    Operation { token: Token, message: String },
    #[error("Failed to write program output: {0}")]
    Output(#[from] io::Error),
}

impl RuntimeError {
    pub fn new(token: &Token, message: impl Into<String>) -> Self {
        RuntimeError::Operation {
            token: token.clone(),
            message: message.into(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            RuntimeError::Operation { message, .. } => message.clone(),
            RuntimeError::Output(e) => e.to_string(),
        }
    }
}

/// Returns early from the enclosing function with a `RuntimeError` at `$token`.
#[macro_export]
macro_rules! throw_runtime_error {
    ($token:expr, $($message:tt)+) => {
        return Err($crate::error::RuntimeError::new($token, format!($($message)+)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use pretty_assertions::assert_eq;

    fn first_token(source: &str) -> Token {
        let (tokens, _) = Lexer::new(source).scan_tokens();
        tokens[0].clone()
    }

    #[test]
    fn parse_error_at_lexeme() {
        let err = ParseError::new(&first_token("foo"), "Expected expression");
        assert_eq!(err.to_string(), "[line 1] Error at 'foo': Expected expression");
    }

    #[test]
    fn parse_error_at_end() {
        let err = ParseError::new(&first_token("\n\n"), "Expect ';' after value.");
        assert_eq!(err.to_string(), "[line 3] Error at end: Expect ';' after value.");
    }

    #[test]
    fn runtime_error_puts_line_after_message() {
        let err = RuntimeError::new(&first_token("-"), "Operand must be a number.");
        assert_eq!(err.to_string(), "Operand must be a number.\n[line 1]");
    }

    #[test]
    fn lex_errors_render_with_line() {
        let err = SyntaxError::from(LexError::UnexpectedCharacter { line: 4, ch: '#' });
        assert_eq!(err.to_string(), "[line 4] Error: Unexpected character '#'.");
        let err = LexError::NumberOutOfRange {
            line: 2,
            lexeme: "1e400".into(),
        };
        assert_eq!(err.to_string(), "[line 2] Error: Number literal '1e400' is too large.");
    }
}
