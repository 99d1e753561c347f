use std::fmt::Display;

use crate::base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Location,
};

/// Represents an error that occurred during the lexical analysis of the source code.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    UnterminatedLiteral(#[from] UnterminatedLiteral),
    #[error(transparent)]
    MalformedNumericLiteral(#[from] MalformedNumericLiteral),
    #[error(transparent)]
    InvalidCharacter(#[from] InvalidCharacter),
}

impl Error {
    /// The location the error points at.
    #[must_use]
    pub fn location(&self) -> Location {
        match self {
            Self::UnterminatedLiteral(err) => err.location,
            Self::MalformedNumericLiteral(err) => err.location,
            Self::InvalidCharacter(err) => err.location,
        }
    }
}

/// Result type for lexing operations.
pub type LexResult<T> = Result<T, Error>;

/// The kinds of literal that need a closing delimiter.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DelimitedLiteral {
    /// A `"` string literal.
    String,
    /// A ```` ``` ```` docstring.
    Docstring,
}

/// The input ended before a string literal or docstring was closed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnterminatedLiteral {
    /// The kind of literal left open.
    pub literal: DelimitedLiteral,
    /// Location of the opening delimiter.
    pub location: Location,
    /// Text of the line containing the opening delimiter.
    pub line: String,
}

impl Display for UnterminatedLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (message, help) = match self.literal {
            DelimitedLiteral::String => (
                "found an unterminated string literal",
                "add a closing `\"` to end the string",
            ),
            DelimitedLiteral::Docstring => (
                "found an unterminated docstring",
                "add a closing ``` to end the docstring",
            ),
        };

        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, message),
            SourceCodeDisplay::new(&self.line, self.location, Some(help))
        )
    }
}

impl std::error::Error for UnterminatedLiteral {}

/// A floating point literal contains a second decimal point.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MalformedNumericLiteral {
    /// The digits read before the second decimal point.
    pub lexeme: String,
    /// Location of the second decimal point.
    pub location: Location,
    /// Text of the line containing the literal.
    pub line: String,
}

impl Display for MalformedNumericLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!(
                    "numeric literal `{}` already contains a decimal point",
                    self.lexeme
                )
            ),
            SourceCodeDisplay::new(&self.line, self.location, Option::<u8>::None)
        )
    }
}

impl std::error::Error for MalformedNumericLiteral {}

/// A character that cannot start any token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InvalidCharacter {
    /// The offending character.
    pub character: char,
    /// Location of the character.
    pub location: Location,
    /// Text of the line containing the character.
    pub line: String,
}

impl Display for InvalidCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format!("found invalid character `{}`", self.character.escape_debug())
            ),
            SourceCodeDisplay::new(&self.line, self.location, Option::<u8>::None)
        )
    }
}

impl std::error::Error for InvalidCharacter {}
