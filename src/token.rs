use std::fmt;

use bitflags::bitflags;

/// The lexical category of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Integer,
    Decimal,
    String,
    OParen,
    CParen,
    OBrace,
    CBrace,
    OBracket,
    CBracket,
    Eof,
}

bitflags! {
    /// A set of token kinds, used to express what the grammar accepts at
    /// a given position.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct TokenSet: u16 {
        const INTEGER = 1 << 0;
        const DECIMAL = 1 << 1;
        const STRING = 1 << 2;
        const O_PAREN = 1 << 3;
        const C_PAREN = 1 << 4;
        const O_BRACE = 1 << 5;
        const C_BRACE = 1 << 6;
        const O_BRACKET = 1 << 7;
        const C_BRACKET = 1 << 8;
        const EOF = 1 << 9;
    }
}

const TOKEN_NAMES: [(TokenSet, &str); 10] = [
    (TokenSet::INTEGER, "integer"),
    (TokenSet::DECIMAL, "decimal"),
    (TokenSet::STRING, "string"),
    (TokenSet::O_PAREN, "'('"),
    (TokenSet::C_PAREN, "')'"),
    (TokenSet::O_BRACE, "'{'"),
    (TokenSet::C_BRACE, "'}'"),
    (TokenSet::O_BRACKET, "'['"),
    (TokenSet::C_BRACKET, "']'"),
    (TokenSet::EOF, "end of file"),
];

impl TokenKind {
    /// The singleton [`TokenSet`] containing this kind.
    pub fn set(self) -> TokenSet {
        match self {
            TokenKind::Integer => TokenSet::INTEGER,
            TokenKind::Decimal => TokenSet::DECIMAL,
            TokenKind::String => TokenSet::STRING,
            TokenKind::OParen => TokenSet::O_PAREN,
            TokenKind::CParen => TokenSet::C_PAREN,
            TokenKind::OBrace => TokenSet::O_BRACE,
            TokenKind::CBrace => TokenSet::C_BRACE,
            TokenKind::OBracket => TokenSet::O_BRACKET,
            TokenKind::CBracket => TokenSet::C_BRACKET,
            TokenKind::Eof => TokenSet::EOF,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::Integer => "integer",
            TokenKind::Decimal => "decimal",
            TokenKind::String => "string",
            TokenKind::OParen => "'('",
            TokenKind::CParen => "')'",
            TokenKind::OBrace => "'{'",
            TokenKind::CBrace => "'}'",
            TokenKind::OBracket => "'['",
            TokenKind::CBracket => "']'",
            TokenKind::Eof => "end of file",
        }
    }
}

impl From<TokenKind> for TokenSet {
    fn from(kind: TokenKind) -> TokenSet {
        kind.set()
    }
}

/// Renders a set of kinds for error messages, e.g. `integer, decimal, or '['`.
pub fn describe_set(set: TokenSet) -> String {
    let names: Vec<&str> = TOKEN_NAMES
        .iter()
        .filter(|(member, _)| set.contains(*member))
        .map(|(_, name)| *name)
        .collect();

    match names.as_slice() {
        [] => String::from("nothing"),
        [only] => String::from(*only),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => {
            let mut out = String::new();
            for name in init {
                out.push_str(name);
                out.push_str(", ");
            }
            out.push_str("or ");
            out.push_str(last);
            out
        }
    }
}

/// One lexed token. `text` borrows from the source; for quoted strings it
/// is the content between the quotes. Position fields always refer to the
/// token's first character in the source (the opening quote for strings).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub offset: usize,
    pub line: u64,
    pub column: u64,
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.kind == TokenKind::Eof {
            write!(f, "end of file")
        } else {
            write!(f, "`{}` at line {}", self.text, self.line)
        }
    }
}
