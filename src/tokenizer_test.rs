use crate::error::Error;
use crate::token::TokenKind;
use crate::tokenizer::Tokenizer;

fn kinds_of(source: &str) -> Vec<TokenKind> {
    let mut tokenizer = Tokenizer::new(source);
    let mut kinds = Vec::new();

    loop {
        let token = tokenizer.next_token().unwrap();
        if token.kind == TokenKind::Eof {
            return kinds;
        }
        kinds.push(token.kind);
    }
}

// Successes

#[test]
fn lex_all_symbols() {
    let mut tokenizer = Tokenizer::new("{ } ( ) [ ]");
    let expected = [
        TokenKind::OBrace,
        TokenKind::CBrace,
        TokenKind::OParen,
        TokenKind::CParen,
        TokenKind::OBracket,
        TokenKind::CBracket,
        TokenKind::Eof,
    ];

    for kind in expected {
        assert_eq!(tokenizer.next_token().unwrap().kind, kind);
    }
}

#[test]
fn lex_integers() {
    assert_eq!(
        kinds_of("12 -3 +45 0"),
        vec![TokenKind::Integer; 4],
    );
}

#[test]
fn lex_decimals() {
    assert_eq!(
        kinds_of("1.5 -0.25 +0.125 .5 3."),
        vec![TokenKind::Decimal; 5],
    );
}

#[test]
fn lex_words() {
    // no exponent support, no second point, no lone sign
    assert_eq!(
        kinds_of("1e5 12a 1.2.3 - . METAL1_3"),
        vec![TokenKind::String; 6],
    );
}

#[test]
fn lex_quoted_strings() {
    let mut tokenizer = Tokenizer::new("\"hello world\" \"\"");

    let token = tokenizer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.text, "hello world");

    let token = tokenizer.next_token().unwrap();
    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.text, "");
}

#[test]
fn lex_comments() {
    assert_eq!(
        kinds_of("1 // ( ) \"ignored\n2"),
        vec![TokenKind::Integer, TokenKind::Integer],
    );
}

#[test]
fn lex_lone_slash_is_dropped() {
    let mut tokenizer = Tokenizer::new("/word");
    let token = tokenizer.next_token().unwrap();

    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.text, "word");
}

#[test]
fn pushback_is_one_token_deep() {
    let mut tokenizer = Tokenizer::new("1 2");

    let first = tokenizer.next_token().unwrap();
    tokenizer.push_token(first);

    let replayed = tokenizer.next_token().unwrap();
    assert_eq!(replayed, first);

    let fresh = tokenizer.next_token().unwrap();
    assert_eq!(fresh.text, "2");
}

#[test]
fn reset_rewinds_and_clears_pushback() {
    let mut tokenizer = Tokenizer::new("1 2");

    tokenizer.next_token().unwrap();
    let second = tokenizer.next_token().unwrap();
    tokenizer.push_token(second);

    tokenizer.reset();

    let token = tokenizer.next_token().unwrap();
    assert_eq!(token.text, "1");
    assert_eq!(token.line, 1);
    assert_eq!(token.column, 1);
}

#[test]
fn positions_match_hand_computed_table() {
    let source = "{\n\"key\" \"value\"\n( 1 -2.5 tex\n}";
    let mut tokenizer = Tokenizer::new(source);

    // (kind, text, offset, line, column)
    let expected = [
        (TokenKind::OBrace, "{", 0, 1, 1),
        (TokenKind::String, "key", 3, 2, 1),
        (TokenKind::String, "value", 9, 2, 7),
        (TokenKind::OParen, "(", 16, 3, 1),
        (TokenKind::Integer, "1", 18, 3, 3),
        (TokenKind::Decimal, "-2.5", 20, 3, 5),
        (TokenKind::String, "tex", 25, 3, 10),
        (TokenKind::CBrace, "}", 29, 4, 1),
        (TokenKind::Eof, "", 30, 4, 2),
    ];

    for (kind, text, offset, line, column) in expected {
        let token = tokenizer.next_token().unwrap();
        assert_eq!(token.kind, kind);
        assert_eq!(token.text, text);
        assert_eq!(token.offset, offset);
        assert_eq!(token.line, line);
        assert_eq!(token.column, column);
    }
}

// Failures

#[test]
fn lex_unterminated_string() {
    let mut tokenizer = Tokenizer::new("ok \"no close");
    tokenizer.next_token().unwrap();

    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(err, Error::UnterminatedString { line: 1, column: 4 });
}

#[test]
fn lex_control_character() {
    let mut tokenizer = Tokenizer::new("\u{1}");

    let err = tokenizer.next_token().unwrap_err();
    assert_eq!(
        err,
        Error::UnexpectedCharacter {
            line: 1,
            column: 1,
            found: '\u{1}',
        },
    );
}

#[test]
#[should_panic(expected = "one token deep")]
fn double_pushback_panics() {
    let mut tokenizer = Tokenizer::new("1 2 3");

    let first = tokenizer.next_token().unwrap();
    let second = tokenizer.next_token().unwrap();

    tokenizer.push_token(first);
    tokenizer.push_token(second);
}
