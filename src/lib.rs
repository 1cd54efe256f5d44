//! A small dynamically typed language: source text is scanned into tokens, parsed
//! into a syntax tree and evaluated directly by walking that tree.
//!
//! ```
//! use lox::{Lox, Outcome};
//!
//! let mut lox = Lox::with_output(Vec::new());
//! assert!(matches!(lox.run("var a = 20; print a + 22;"), Outcome::Completed));
//! assert_eq!(lox.output(), b"42\n");
//! ```

pub mod ast;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod printer;
pub mod value;

use std::io::{Stdout, Write};
use std::sync::Once;

use ast::Parser;
use error::{RuntimeError, SyntaxError};
use interpreter::Interpreter;
use lexer::Lexer;
use value::Value;

/// What happened to one chunk of source handed to [`Lox::run`].
#[derive(Debug)]
pub enum Outcome {
    Completed,
    /// Lexing or parsing failed; nothing was executed.
    SyntaxErrors(Vec<SyntaxError>),
    /// Execution stopped at this error; earlier statements had their effects.
    RuntimeError(RuntimeError),
}

/// A session: one interpreter whose global variables persist across `run` calls,
/// as they do between lines of the interactive prompt.
pub struct Lox<W: Write = Stdout> {
    interpreter: Interpreter<W>,
}

impl Lox {
    pub fn new() -> Self {
        Lox {
            interpreter: Interpreter::new(),
        }
    }
}

impl Default for Lox {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Lox<W> {
    pub fn with_output(out: W) -> Self {
        Lox {
            interpreter: Interpreter::with_output(out),
        }
    }

    pub fn output(&self) -> &W {
        self.interpreter.output()
    }

    /// Scans, parses and, only if both were clean, executes `source`.
    #[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
    pub fn run(&mut self, source: &str) -> Outcome {
        let (tokens, lex_errors) = Lexer::new(source).scan_tokens();
        let (statements, parse_errors) = Parser::new(tokens).parse();

        let errors: Vec<SyntaxError> = lex_errors
            .into_iter()
            .map(SyntaxError::from)
            .chain(parse_errors.into_iter().map(SyntaxError::from))
            .collect();
        if !errors.is_empty() {
            tracing::debug!(errors = errors.len(), "rejected before execution");
            return Outcome::SyntaxErrors(errors);
        }

        match self.interpreter.interpret(&statements) {
            Ok(()) => Outcome::Completed,
            Err(error) => {
                tracing::debug!(%error, "runtime error");
                Outcome::RuntimeError(error)
            }
        }
    }

    /// Evaluates `source` as a single bare expression. `None` means it is not one
    /// (or does not scan/parse cleanly), in which case nothing was evaluated.
    pub fn evaluate(&mut self, source: &str) -> Option<Result<Value, RuntimeError>> {
        let (tokens, lex_errors) = Lexer::new(source).scan_tokens();
        if !lex_errors.is_empty() {
            return None;
        }
        let expr = Parser::new(tokens).parse_expression().ok()?;
        Some(self.interpreter.evaluate(&expr))
    }
}

static TRACING_INIT: Once = Once::new();

/// Installs a stderr tracing subscriber filtered by `RUST_LOG`, e.g. `RUST_LOG=lox=trace`.
/// Does nothing when `RUST_LOG` is unset. Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}
