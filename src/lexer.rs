use std::fmt;

use super::error::LexError;

// Variable convention for lexer:
// prefix:"consume" => returns the character at offset and moves offset by one;
// prefix:"look" => doesn't move offset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,

    // One or two character tokens.
    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    // Literals.
    Identifier,
    String,
    Number,

    // Keywords.
    And,
    Class,
    Else,
    False,
    For,
    Fun,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    Eof,
}

impl TokenKind {
    /// Exact keyword lookup; anything else scanned as a word stays an identifier.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "and" => TokenKind::And,
            "class" => TokenKind::Class,
            "else" => TokenKind::Else,
            "false" => TokenKind::False,
            "for" => TokenKind::For,
            "fun" => TokenKind::Fun,
            "if" => TokenKind::If,
            "nil" => TokenKind::Nil,
            "or" => TokenKind::Or,
            "print" => TokenKind::Print,
            "return" => TokenKind::Return,
            "super" => TokenKind::Super,
            "this" => TokenKind::This,
            "true" => TokenKind::True,
            "var" => TokenKind::Var,
            "while" => TokenKind::While,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::LeftParen => "LEFT_PAREN",
            TokenKind::RightParen => "RIGHT_PAREN",
            TokenKind::LeftBrace => "LEFT_BRACE",
            TokenKind::RightBrace => "RIGHT_BRACE",
            TokenKind::Comma => "COMMA",
            TokenKind::Dot => "DOT",
            TokenKind::Minus => "MINUS",
            TokenKind::Plus => "PLUS",
            TokenKind::Semicolon => "SEMICOLON",
            TokenKind::Slash => "SLASH",
            TokenKind::Star => "STAR",
            TokenKind::Bang => "BANG",
            TokenKind::BangEqual => "BANG_EQUAL",
            TokenKind::Equal => "EQUAL",
            TokenKind::EqualEqual => "EQUAL_EQUAL",
            TokenKind::Greater => "GREATER",
            TokenKind::GreaterEqual => "GREATER_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::LessEqual => "LESS_EQUAL",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::String => "STRING",
            TokenKind::Number => "NUMBER",
            TokenKind::And => "AND",
            TokenKind::Class => "CLASS",
            TokenKind::Else => "ELSE",
            TokenKind::False => "FALSE",
            TokenKind::For => "FOR",
            TokenKind::Fun => "FUN",
            TokenKind::If => "IF",
            TokenKind::Nil => "NIL",
            TokenKind::Or => "OR",
            TokenKind::Print => "PRINT",
            TokenKind::Return => "RETURN",
            TokenKind::Super => "SUPER",
            TokenKind::This => "THIS",
            TokenKind::True => "TRUE",
            TokenKind::Var => "VAR",
            TokenKind::While => "WHILE",
            TokenKind::Eof => "EOF",
        };
        f.write_str(name)
    }
}

/// Literal payload carried by `STRING` and `NUMBER` tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => write!(f, "{n:?}"),
            Literal::String(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.literal {
            Some(literal) => write!(f, "{} {} {}", self.kind, self.lexeme, literal),
            None => write!(f, "{} {} null", self.kind, self.lexeme),
        }
    }
}

pub struct Lexer {
    source: Vec<char>,
    start: usize,
    offset: usize,
    line: usize,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            start: 0,
            offset: 0,
            line: 1,
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Scans the whole source. The token list always ends with exactly one `EOF`;
    /// lexical errors are collected alongside instead of stopping the scan.
    pub fn scan_tokens(mut self) -> (Vec<Token>, Vec<LexError>) {
        while !self.is_at_end() {
            self.start = self.offset;
            self.scan_token();
        }

        self.tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            literal: None,
            line: self.line,
        });
        tracing::debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "scanned source"
        );
        (self.tokens, self.errors)
    }

    fn scan_token(&mut self) {
        let Some(ch) = self.consume() else {
            return;
        };
        match ch {
            '(' => self.add_token(TokenKind::LeftParen),
            ')' => self.add_token(TokenKind::RightParen),
            '{' => self.add_token(TokenKind::LeftBrace),
            '}' => self.add_token(TokenKind::RightBrace),
            ',' => self.add_token(TokenKind::Comma),
            '.' => self.add_token(TokenKind::Dot),
            '-' => self.add_token(TokenKind::Minus),
            '+' => self.add_token(TokenKind::Plus),
            ';' => self.add_token(TokenKind::Semicolon),
            '*' => self.add_token(TokenKind::Star),

            '!' => self.add_either('=', TokenKind::BangEqual, TokenKind::Bang),
            '=' => self.add_either('=', TokenKind::EqualEqual, TokenKind::Equal),
            '<' => self.add_either('=', TokenKind::LessEqual, TokenKind::Less),
            '>' => self.add_either('=', TokenKind::GreaterEqual, TokenKind::Greater),

            '/' => {
                if self.consume_if('/') {
                    // comment runs to end of line; the newline itself is left for the line counter.
                    self.consume_while(|c| c != '\n');
                } else {
                    self.add_token(TokenKind::Slash);
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => self.string(),
            ch if ch.is_ascii_digit() => self.number(),
            ch if ch.is_ascii_alphabetic() || ch == '_' => self.identifier(),

            ch => self.errors.push(LexError::UnexpectedCharacter {
                line: self.line,
                ch,
            }),
        }
    }

    fn string(&mut self) {
        while let Some(ch) = self.look_ahead() {
            if ch == '"' {
                break;
            }
            if ch == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.errors
                .push(LexError::UnterminatedString { line: self.line });
            return;
        }

        // closing quote
        self.advance();
        let value: String = self.source[self.start + 1..self.offset - 1].iter().collect();
        self.add_literal_token(TokenKind::String, Literal::String(value));
    }

    fn number(&mut self) {
        self.consume_while(|c| c.is_ascii_digit());

        // A trailing '.' without a digit after it belongs to the next token.
        if self.look_ahead() == Some('.') && self.look_ahead_at(1).is_some_and(|c| c.is_ascii_digit())
        {
            self.advance();
            self.consume_while(|c| c.is_ascii_digit());
        }

        let text = self.lexeme();
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => {
                self.add_literal_token(TokenKind::Number, Literal::Number(n))
            }
            // Only overflow lands here: a digit run with at most one inner dot always parses.
            _ => self.errors.push(LexError::NumberOutOfRange {
                line: self.line,
                lexeme: text,
            }),
        }
    }

    fn identifier(&mut self) {
        self.consume_while(|c| c.is_ascii_alphanumeric() || c == '_');
        let kind = TokenKind::keyword(&self.lexeme()).unwrap_or(TokenKind::Identifier);
        self.add_token(kind);
    }

    fn add_either(&mut self, expected: char, matched: TokenKind, otherwise: TokenKind) {
        let kind = if self.consume_if(expected) {
            matched
        } else {
            otherwise
        };
        self.add_token(kind);
    }

    fn add_token(&mut self, kind: TokenKind) {
        self.push_token(kind, None);
    }

    fn add_literal_token(&mut self, kind: TokenKind, literal: Literal) {
        self.push_token(kind, Some(literal));
    }

    fn push_token(&mut self, kind: TokenKind, literal: Option<Literal>) {
        let token = Token {
            kind,
            lexeme: self.lexeme(),
            literal,
            line: self.line,
        };
        tracing::trace!(%token, line = token.line, "token");
        self.tokens.push(token);
    }

    fn lexeme(&self) -> String {
        self.source[self.start..self.offset].iter().collect()
    }

    fn consume_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.look_ahead().is_some_and(&predicate) {
            self.advance();
        }
    }

    fn consume_if(&mut self, expected: char) -> bool {
        if self.look_ahead() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn consume(&mut self) -> Option<char> {
        let ch = self.look_ahead();
        if ch.is_some() {
            self.advance();
        }
        ch
    }

    fn advance(&mut self) {
        self.offset += 1;
    }

    fn look_ahead(&self) -> Option<char> {
        self.look_ahead_at(0)
    }

    fn look_ahead_at(&self, n: usize) -> Option<char> {
        self.source.get(self.offset + n).copied()
    }

    fn is_at_end(&self) -> bool {
        self.offset >= self.source.len()
    }
}
