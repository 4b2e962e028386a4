use thiserror::Error;

use crate::token::{describe_set, Token, TokenKind, TokenSet};

pub type Result<T> = std::result::Result<T, Error>;

fn expected_names(set: &TokenSet) -> String {
    describe_set(*set)
}

/// Fatal lexical and structural failures. Either kind aborts the
/// enclosing parse call; partially built entities and brushes are dropped
/// before the error surfaces.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A byte that cannot begin any token.
    #[error("line {line}, column {column}: unexpected character `{found}`")]
    UnexpectedCharacter { line: u64, column: u64, found: char },

    /// A quoted string still open at end of input.
    #[error("line {line}, column {column}: unterminated quoted string")]
    UnterminatedString { line: u64, column: u64 },

    /// A token whose kind falls outside the expected set at its position.
    #[error(
        "line {line}, column {column}: expected {}, found {}",
        expected_names(.expected),
        .found.name()
    )]
    UnexpectedToken {
        line: u64,
        column: u64,
        expected: TokenSet,
        found: TokenKind,
    },
}

impl Error {
    pub(crate) fn unexpected(token: &Token, expected: TokenSet) -> Error {
        Error::UnexpectedToken {
            line: token.line,
            column: token.column,
            expected,
            found: token.kind,
        }
    }

    /// Source line the error refers to.
    pub fn line(&self) -> u64 {
        match self {
            Error::UnexpectedCharacter { line, .. }
            | Error::UnterminatedString { line, .. }
            | Error::UnexpectedToken { line, .. } => *line,
        }
    }

    /// Source column the error refers to.
    pub fn column(&self) -> u64 {
        match self {
            Error::UnexpectedCharacter { column, .. }
            | Error::UnterminatedString { column, .. }
            | Error::UnexpectedToken { column, .. } => *column,
        }
    }
}

/// Returned by the geometry kernel when a face set does not bound a valid
/// finite region. Recoverable: the offending brush is reported and
/// skipped, and parsing continues.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct GeometryError {
    pub message: String,
}

impl GeometryError {
    pub fn new(message: impl Into<String>) -> GeometryError {
        GeometryError {
            message: message.into(),
        }
    }
}
