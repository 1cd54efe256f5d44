use lox::environment::Environment;
use lox::lexer::{Lexer, Literal, Token, TokenKind};
use lox::value::Value;
use lox::{Lox, Outcome};
use proptest::prelude::*;

fn ident(name: &str) -> Token {
    Token {
        kind: TokenKind::Identifier,
        lexeme: name.to_string(),
        literal: None,
        line: 1,
    }
}

fn single_token(source: &str) -> Token {
    let (tokens, errors) = Lexer::new(source).scan_tokens();
    assert!(errors.is_empty(), "{errors:?}");
    assert_eq!(tokens.len(), 2, "{tokens:?}");
    assert_eq!(tokens[1].kind, TokenKind::Eof);
    tokens[0].clone()
}

#[test]
fn single_tokens_round_trip() {
    for (source, kind) in [
        ("==", TokenKind::EqualEqual),
        ("!=", TokenKind::BangEqual),
        ("<=", TokenKind::LessEqual),
        (">=", TokenKind::GreaterEqual),
        ("while", TokenKind::While),
        ("nil", TokenKind::Nil),
        ("_name", TokenKind::Identifier),
    ] {
        let token = single_token(source);
        assert_eq!(token.kind, kind);
        assert_eq!(token.lexeme, source);
        assert_eq!(token.literal, None);
    }

    let number = single_token("123.45");
    assert_eq!(number.kind, TokenKind::Number);
    assert_eq!(number.literal, Some(Literal::Number(123.45)));

    let string = single_token("\"abc\"");
    assert_eq!(string.kind, TokenKind::String);
    assert_eq!(string.lexeme, "\"abc\"");
    assert_eq!(string.literal, Some(Literal::String("abc".into())));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// Scanning any input terminates with exactly one trailing EOF.
    #[test]
    fn lexing_is_total(source in any::<String>()) {
        let (tokens, _) = Lexer::new(&source).scan_tokens();
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn integers_round_trip(n in 0u32..1_000_000) {
        let token = single_token(&n.to_string());
        prop_assert_eq!(token.literal, Some(Literal::Number(f64::from(n))));
    }

    #[test]
    fn identifiers_round_trip(name in "[A-Za-z_][A-Za-z0-9_]{0,12}") {
        let token = single_token(&name);
        let expected = TokenKind::keyword(&name).unwrap_or(TokenKind::Identifier);
        prop_assert_eq!(token.kind, expected);
        prop_assert_eq!(token.lexeme, name);
    }

    /// Define upserts, assign updates an existing binding, and neither touches other names.
    #[test]
    fn environment_define_and_assign(
        name in "[a-z]{1,8}",
        first in -1e6f64..1e6,
        second in -1e6f64..1e6,
    ) {
        let mut env = Environment::new();
        prop_assert!(env.assign(&ident(&name), Value::Number(first)).is_err());

        env.define(name.clone(), Value::Number(first));
        env.define(name.clone(), Value::Number(second));
        prop_assert_eq!(env.get(&ident(&name)).unwrap(), Value::Number(second));

        env.assign(&ident(&name), Value::Number(first)).unwrap();
        prop_assert_eq!(env.get(&ident(&name)).unwrap(), Value::Number(first));

        let other = format!("{name}_other");
        prop_assert!(env.get(&ident(&other)).is_err());
    }

    /// Subtraction chains fold to the left.
    #[test]
    fn subtraction_is_left_associative(a in 0u16..1000, b in 0u16..1000, c in 0u16..1000) {
        let mut lox = Lox::with_output(Vec::new());
        let outcome = lox.run(&format!("print {a} - {b} - {c};"));
        prop_assert!(matches!(outcome, Outcome::Completed));
        let expected = format!("{}\n", i32::from(a) - i32::from(b) - i32::from(c));
        prop_assert_eq!(String::from_utf8(lox.output().clone()).unwrap(), expected);
    }
}
