use super::error::ParseError;
use super::lexer::{Literal, Token, TokenKind};
use super::printer;
use super::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    // 1 + 2;
    Expression(Expr),
    // print "hello";
    Print(Expr),
    // var answer = 42;
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Value),
    Grouping(Box<Expr>),
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Variable(Token),
    Assign {
        name: Token,
        value: Box<Expr>,
    },

    // The shapes below are never produced by the parser yet; the interpreter
    // rejects them at runtime.
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        paren: Token,
        arguments: Vec<Expr>,
    },
    Get {
        object: Box<Expr>,
        name: Token,
    },
    Set {
        object: Box<Expr>,
        name: Token,
        value: Box<Expr>,
    },
    This(Token),
    Super {
        keyword: Token,
        method: Token,
    },
}

type ParseResult<T> = Result<T, ParseError>;

// program     → declaration* EOF
// declaration → varDecl | statement
// varDecl     → "var" IDENTIFIER ( "=" expression )? ";"
// statement   → printStmt | exprStmt
// expression  → assignment
// assignment  → IDENTIFIER "=" assignment | equality
// equality    → comparison ( ( "!=" | "==" ) comparison )*
// comparison  → term ( ( ">" | ">=" | "<" | "<=" ) term )*
// term        → factor ( ( "-" | "+" ) factor )*
// factor      → unary ( ( "/" | "*" ) unary )*
// unary       → ( "!" | "-" ) unary | primary
// primary     → NUMBER | STRING | "true" | "false" | "nil" | "(" expression ")" | IDENTIFIER
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
    errors: Vec<ParseError>,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            let line = tokens.last().map_or(1, |t| t.line);
            tokens.push(Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                literal: None,
                line,
            });
        }
        Self {
            tokens,
            current: 0,
            errors: Vec::new(),
        }
    }

    /// Parses a whole program. A malformed statement is reported and skipped up to
    /// the next statement boundary, so one mistake costs at most one statement.
    pub fn parse(mut self) -> (Vec<Stmt>, Vec<ParseError>) {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            match self.declaration() {
                Ok(statement) => {
                    tracing::trace!(ast = %printer::print_stmt(&statement), "parsed statement");
                    statements.push(statement);
                }
                Err(error) => {
                    self.errors.push(error);
                    self.synchronize();
                }
            }
        }
        tracing::debug!(
            statements = statements.len(),
            errors = self.errors.len(),
            "parsed program"
        );
        (statements, self.errors)
    }

    /// Parses exactly one expression followed by end of input.
    pub fn parse_expression(mut self) -> ParseResult<Expr> {
        let expr = self.expression()?;
        if !self.is_at_end() {
            return Err(ParseError::new(self.look_ahead(), "Expect end of expression."));
        }
        match self.errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(expr),
        }
    }

    fn declaration(&mut self) -> ParseResult<Stmt> {
        if self.match_kinds(&[TokenKind::Var]) {
            self.var_declaration()
        } else {
            self.statement()
        }
    }

    fn var_declaration(&mut self) -> ParseResult<Stmt> {
        let name = self.consume(TokenKind::Identifier, "Expect variable name.")?;
        let initializer = if self.match_kinds(&[TokenKind::Equal]) {
            Some(self.expression()?)
        } else {
            None
        };
        self.consume(
            TokenKind::Semicolon,
            "Expect ';' after variable declaration.",
        )?;
        Ok(Stmt::Var { name, initializer })
    }

    fn statement(&mut self) -> ParseResult<Stmt> {
        if self.match_kinds(&[TokenKind::Print]) {
            let value = self.expression()?;
            self.consume(TokenKind::Semicolon, "Expect ';' after value.")?;
            Ok(Stmt::Print(value))
        } else {
            let expr = self.expression()?;
            self.consume(TokenKind::Semicolon, "Expect ';' after expression.")?;
            Ok(Stmt::Expression(expr))
        }
    }

    fn expression(&mut self) -> ParseResult<Expr> {
        self.assignment()
    }

    fn assignment(&mut self) -> ParseResult<Expr> {
        let expr = self.equality()?;

        if self.match_kinds(&[TokenKind::Equal]) {
            let equals = self.previous().clone();
            let value = self.assignment()?;
            return match expr {
                Expr::Variable(name) => Ok(Expr::Assign {
                    name,
                    value: Box::new(value),
                }),
                // Reported, but the parser is not confused, so no resynchronisation.
                expr => {
                    self.errors
                        .push(ParseError::new(&equals, "Invalid assignment target."));
                    Ok(expr)
                }
            };
        }

        Ok(expr)
    }

    fn equality(&mut self) -> ParseResult<Expr> {
        self.binary(
            &[TokenKind::BangEqual, TokenKind::EqualEqual],
            Self::comparison,
        )
    }

    fn comparison(&mut self) -> ParseResult<Expr> {
        self.binary(
            &[
                TokenKind::Greater,
                TokenKind::GreaterEqual,
                TokenKind::Less,
                TokenKind::LessEqual,
            ],
            Self::term,
        )
    }

    fn term(&mut self) -> ParseResult<Expr> {
        self.binary(&[TokenKind::Minus, TokenKind::Plus], Self::factor)
    }

    fn factor(&mut self) -> ParseResult<Expr> {
        self.binary(&[TokenKind::Slash, TokenKind::Star], Self::unary)
    }

    // Shared shape of every binary precedence level: fold left-associatively while
    // the next token is one of this level's operators.
    fn binary(
        &mut self,
        operators: &[TokenKind],
        operand: fn(&mut Self) -> ParseResult<Expr>,
    ) -> ParseResult<Expr> {
        let mut expr = operand(self)?;
        while self.match_kinds(operators) {
            let operator = self.previous().clone();
            let right = operand(self)?;
            expr = Expr::Binary {
                left: Box::new(expr),
                operator,
                right: Box::new(right),
            };
        }
        Ok(expr)
    }

    fn unary(&mut self) -> ParseResult<Expr> {
        if self.match_kinds(&[TokenKind::Bang, TokenKind::Minus]) {
            let operator = self.previous().clone();
            let right = self.unary()?;
            return Ok(Expr::Unary {
                operator,
                right: Box::new(right),
            });
        }
        self.primary()
    }

    fn primary(&mut self) -> ParseResult<Expr> {
        let token = self.look_ahead().clone();
        let expr = match token.kind {
            TokenKind::False => Expr::Literal(Value::Boolean(false)),
            TokenKind::True => Expr::Literal(Value::Boolean(true)),
            TokenKind::Nil => Expr::Literal(Value::Nil),
            TokenKind::Number | TokenKind::String => match &token.literal {
                Some(Literal::Number(n)) => Expr::Literal(Value::Number(*n)),
                Some(Literal::String(s)) => Expr::Literal(Value::String(s.clone())),
                None => return Err(ParseError::new(&token, "Expected expression")),
            },
            TokenKind::Identifier => Expr::Variable(token),
            TokenKind::LeftParen => {
                self.advance();
                let expr = self.expression()?;
                self.consume(TokenKind::RightParen, "Expect ')' after expression.")?;
                return Ok(Expr::Grouping(Box::new(expr)));
            }
            _ => return Err(ParseError::new(&token, "Expected expression")),
        };
        self.advance();
        Ok(expr)
    }

    fn synchronize(&mut self) {
        self.advance();
        while !self.is_at_end() {
            if self.previous().kind == TokenKind::Semicolon {
                return;
            }
            match self.look_ahead().kind {
                TokenKind::Class
                | TokenKind::Fun
                | TokenKind::Var
                | TokenKind::For
                | TokenKind::If
                | TokenKind::While
                | TokenKind::Print
                | TokenKind::Return => return,
                _ => self.advance(),
            }
        }
    }

    fn match_kinds(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.iter().any(|kind| self.check(*kind)) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self, expected: TokenKind, message: &str) -> ParseResult<Token> {
        if self.check(expected) {
            self.advance();
            Ok(self.previous().clone())
        } else {
            Err(ParseError::new(self.look_ahead(), message))
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        !self.is_at_end() && self.look_ahead().kind == kind
    }

    fn advance(&mut self) {
        if !self.is_at_end() {
            self.current += 1;
        }
    }

    fn is_at_end(&self) -> bool {
        self.look_ahead().kind == TokenKind::Eof
    }

    fn look_ahead(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }
}
