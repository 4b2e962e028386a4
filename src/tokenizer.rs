use crate::error::{Error, Result};
use crate::token::{Token, TokenKind};

/// Lexes map source text into a stream of [`Token`]s.
///
/// The stream supports exactly one token of pushback and can be rewound
/// to the start of the input with [`reset`](Tokenizer::reset). End of
/// input is reported as a token of kind [`TokenKind::Eof`] so the parser
/// can name it in "expected ..., found ..." diagnostics.
#[derive(Debug)]
pub struct Tokenizer<'a> {
    source: &'a str,
    pos: usize,
    line: u64,
    column: u64,
    pushed: Option<Token<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Tokenizer<'a> {
        Tokenizer {
            source,
            pos: 0,
            line: 1,
            column: 1,
            pushed: None,
        }
    }

    /// Rewinds to the start of the input and clears any pushed-back token.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.line = 1;
        self.column = 1;
        self.pushed = None;
    }

    /// Returns a previously read token to the stream; the next call to
    /// [`next_token`](Tokenizer::next_token) re-delivers it. At most one
    /// token may be buffered, and pushing a second before consuming the
    /// first is a contract violation.
    pub fn push_token(&mut self, token: Token<'a>) {
        assert!(self.pushed.is_none(), "token pushback is one token deep");
        self.pushed = Some(token);
    }

    /// Skips whitespace and `//` comments and returns the next token.
    pub fn next_token(&mut self) -> Result<Token<'a>> {
        if let Some(token) = self.pushed.take() {
            return Ok(token);
        }

        loop {
            let Some(byte) = self.peek() else {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: "",
                    offset: self.pos,
                    line: self.line,
                    column: self.column,
                });
            };

            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.bump();
                }
                b'/' => {
                    // a lone slash is discarded, like the legacy tools do
                    self.bump();
                    if self.peek() == Some(b'/') {
                        while let Some(b) = self.peek() {
                            if b == b'\n' || b == b'\r' {
                                break;
                            }
                            self.bump();
                        }
                    }
                }
                b'{' => return Ok(self.punctuation(TokenKind::OBrace)),
                b'}' => return Ok(self.punctuation(TokenKind::CBrace)),
                b'(' => return Ok(self.punctuation(TokenKind::OParen)),
                b')' => return Ok(self.punctuation(TokenKind::CParen)),
                b'[' => return Ok(self.punctuation(TokenKind::OBracket)),
                b']' => return Ok(self.punctuation(TokenKind::CBracket)),
                b'"' => return self.quoted(),
                _ if byte.is_ascii_control() => {
                    return Err(Error::UnexpectedCharacter {
                        line: self.line,
                        column: self.column,
                        found: char::from(byte),
                    });
                }
                _ => return Ok(self.bare()),
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn bump(&mut self) {
        if self.peek() == Some(b'\n') {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    fn punctuation(&mut self, kind: TokenKind) -> Token<'a> {
        let (offset, line, column) = (self.pos, self.line, self.column);
        self.bump();
        Token {
            kind,
            text: &self.source[offset..self.pos],
            offset,
            line,
            column,
        }
    }

    /// Reads to the closing quote with no escape processing. The token's
    /// text is the content between the quotes; its position is that of
    /// the opening quote.
    fn quoted(&mut self) -> Result<Token<'a>> {
        let (line, column) = (self.line, self.column);
        self.bump();
        let start = self.pos;

        loop {
            match self.peek() {
                None => return Err(Error::UnterminatedString { line, column }),
                Some(b'"') => {
                    let text = &self.source[start..self.pos];
                    self.bump();
                    return Ok(Token {
                        kind: TokenKind::String,
                        text,
                        offset: start,
                        line,
                        column,
                    });
                }
                Some(_) => self.bump(),
            }
        }
    }

    /// Reads a maximal run of non-whitespace bytes and classifies it.
    fn bare(&mut self) -> Token<'a> {
        let (start, line, column) = (self.pos, self.line, self.column);

        while let Some(b) = self.peek() {
            if is_space(b) {
                break;
            }
            self.bump();
        }

        let text = &self.source[start..self.pos];
        Token {
            kind: classify(text),
            text,
            offset: start,
            line,
            column,
        }
    }
}

fn is_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\r' | b'\n')
}

/// Bare tokens are tried as integer first, then decimal (must carry a
/// fractional point); anything else is a word.
fn classify(text: &str) -> TokenKind {
    let unsigned = match text.as_bytes().first() {
        Some(b'+') | Some(b'-') => &text[1..],
        _ => text,
    };

    if !unsigned.is_empty() && unsigned.bytes().all(|b| b.is_ascii_digit()) {
        return TokenKind::Integer;
    }

    if let Some((whole, fraction)) = unsigned.split_once('.') {
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !(whole.is_empty() && fraction.is_empty())
            && all_digits(whole)
            && all_digits(fraction)
        {
            return TokenKind::Decimal;
        }
    }

    TokenKind::String
}
