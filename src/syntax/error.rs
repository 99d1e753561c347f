//! Contains the error types that can occur while parsing the syntax of the language.

use std::fmt::Display;

use itertools::Itertools as _;
use strum::IntoEnumIterator;

use crate::{
    base::log::{Message, Severity},
    lexical::token::{KeywordKind, Token},
};

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, Error>;

/// An enumeration containing all kinds of syntactic errors that can occur while parsing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, thiserror::Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    UnexpectedSyntax(#[from] UnexpectedSyntax),
}

/// Enumeration containing all kinds of syntax that can be failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum SyntaxKind {
    Either(&'static [SyntaxKind]),
    Symbol(char),
    Keyword(KeywordKind),
    Identifier,
    Declaration,
    Expression,
    Statement,
    Type,
    ImportSegment,
    Pattern,
}

impl SyntaxKind {
    fn expected_binding_str(&self) -> String {
        match self {
            Self::Either(variants) => match variants {
                [] => "end of file".to_string(),
                [single] => single.expected_binding_str(),
                [init @ .., last] => format!(
                    "{}, or {}",
                    init.iter().map(Self::expected_binding_str).join(", "),
                    last.expected_binding_str()
                ),
            },
            Self::Identifier => "an identifier token".to_string(),
            Self::Symbol(char) => format!("a symbol token `{char}`"),
            Self::Keyword(keyword) => format!("a keyword token `{}`", keyword.as_str()),
            Self::Declaration => "a declaration".to_string(),
            Self::Expression => "an expression syntax".to_string(),
            Self::Statement => "a statement syntax".to_string(),
            Self::Type => "a type syntax".to_string(),
            Self::ImportSegment => "an identifier or `*`".to_string(),
            Self::Pattern => "a match pattern".to_string(),
        }
    }

    /// Keywords the expected syntax can start with.
    fn expected_keywords(&self) -> Vec<KeywordKind> {
        match self {
            Self::Keyword(keyword) => vec![*keyword],
            Self::Either(variants) => variants
                .iter()
                .flat_map(Self::expected_keywords)
                .collect(),
            Self::Declaration => vec![
                KeywordKind::Shadowtype,
                KeywordKind::Type,
                KeywordKind::Var,
                KeywordKind::Let,
                KeywordKind::Class,
                KeywordKind::Func,
                KeywordKind::Private,
            ],
            Self::Statement => vec![
                KeywordKind::Let,
                KeywordKind::Var,
                KeywordKind::While,
                KeywordKind::For,
                KeywordKind::Return,
                KeywordKind::Match,
            ],
            Self::Type => KeywordKind::iter()
                .filter(|keyword| keyword.is_primitive_type())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A syntax/token is expected but found an other invalid token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnexpectedSyntax {
    /// The kind of syntax that was expected.
    pub expected: SyntaxKind,

    /// The invalid token that was found, [`None`] at the end of the input.
    pub found: Option<Token>,
}

impl UnexpectedSyntax {
    /// Keywords spelled closely to the found identifier that would have been accepted.
    #[must_use]
    pub fn alternatives(&self) -> Vec<&'static str> {
        let Some(Token::Identifier(word)) = &self.found else {
            return Vec::new();
        };

        self.expected
            .expected_keywords()
            .into_iter()
            .map(KeywordKind::as_str)
            .filter_map(|keyword| {
                let normalized_distance = strsim::normalized_damerau_levenshtein(word, keyword);
                (normalized_distance > 0.7 || strsim::damerau_levenshtein(word, keyword) < 2)
                    .then_some((normalized_distance, keyword))
            })
            .sorted_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, keyword)| keyword)
            .dedup()
            .take(3)
            .collect()
    }
}

impl Display for UnexpectedSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let expected_binding = self.expected.expected_binding_str();
        let found_binding = match &self.found {
            Some(Token::Comment(..)) => "a comment token".to_string(),
            Some(Token::Docstring(..)) => "a docstring token".to_string(),
            Some(Token::Identifier(identifier)) => format!("an identifier token `{identifier}`"),
            Some(Token::Keyword(keyword)) => {
                format!("a keyword token `{}`", keyword.as_str())
            }
            Some(Token::Symbol(symbol)) => format!("a symbol token `{symbol}`"),
            Some(Token::IntConst(value)) => format!("an integer token `{value}`"),
            Some(Token::FloatConst(value)) => format!("a float token `{value}`"),
            Some(Token::StringConst(value)) => format!("a string token \"{value}\""),
            None => "EOF".to_string(),
        };

        let message = format!("expected {expected_binding}, but found {found_binding}");

        write!(f, "{}", Message::new(Severity::Error, message))?;

        let alternatives = self.alternatives();
        if !alternatives.is_empty() {
            write!(
                f,
                "\n\ndid you mean {}?",
                alternatives
                    .iter()
                    .map(|keyword| format!("`{keyword}`"))
                    .join(", ")
            )?;
        }

        Ok(())
    }
}

impl std::error::Error for UnexpectedSyntax {}
