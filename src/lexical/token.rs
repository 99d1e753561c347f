//! Contains the [`Token`] enum and its related types.

use std::{borrow::Cow, collections::HashMap, str::FromStr, sync::OnceLock};

use enum_as_inner::EnumAsInner;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter};

/// Is an enumeration representing keywords in `OcellusScript`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    Func,
    Class,
    Lambda,
    Takes,
    Returns,
    Return,
    String,
    Char,
    Integer,
    Float,
    List,
    Anything,
    Nothing,
    Callable,
    Boolean,
    Shadowtype,
    Type,
    Import,
    Private,
    Module,
    Where,
    And,
    Or,
    Not,
    Match,
    Var,
    Let,
    True,
    False,
    SelfValue,
    Super,
    While,
    For,
    In,
}

impl std::fmt::Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Is an error that is returned when a string cannot be parsed into a [`KeywordKind`] in [`FromStr`]
/// trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, thiserror::Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        static STRING_KEYWORD_MAP: OnceLock<HashMap<&'static str, KeywordKind>> = OnceLock::new();
        let map = STRING_KEYWORD_MAP.get_or_init(|| {
            let mut map = HashMap::new();

            for keyword in Self::iter() {
                map.insert(keyword.as_str(), keyword);
            }

            map
        });

        map.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the string representation of the keyword as a `&str`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Func => "func",
            Self::Class => "class",
            Self::Lambda => "lambda",
            Self::Takes => "takes",
            Self::Returns => "returns",
            Self::Return => "return",
            Self::String => "String",
            Self::Char => "Char",
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::List => "List",
            Self::Anything => "Anything",
            Self::Nothing => "Nothing",
            Self::Callable => "Callable",
            Self::Boolean => "Boolean",
            Self::Shadowtype => "shadowtype",
            Self::Type => "type",
            Self::Import => "import",
            Self::Private => "private",
            Self::Module => "module",
            Self::Where => "where",
            Self::And => "and",
            Self::Or => "or",
            Self::Not => "not",
            Self::Match => "match",
            Self::Var => "var",
            Self::Let => "let",
            Self::True => "true",
            Self::False => "false",
            Self::SelfValue => "self",
            Self::Super => "super",
            Self::While => "while",
            Self::For => "for",
            Self::In => "in",
        }
    }

    /// Whether the keyword names one of the built-in types.
    #[must_use]
    pub fn is_primitive_type(self) -> bool {
        matches!(
            self,
            Self::String
                | Self::Char
                | Self::Integer
                | Self::Float
                | Self::List
                | Self::Anything
                | Self::Nothing
                | Self::Callable
                | Self::Boolean
        )
    }

    /// Whether the keyword can stand on its own as a value inside an expression.
    #[must_use]
    pub fn is_literal_constant(self) -> bool {
        matches!(
            self,
            Self::True | Self::False | Self::SelfValue | Self::Super | Self::Nothing
        )
    }
}

/// Is an enumeration of the kinds a [`Token`] can have.
///
/// The display representation matches the names used in token dumps.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIter)]
#[allow(missing_docs)]
pub enum TokenKind {
    StringConst,
    IntConst,
    FloatConst,
    Comment,
    Docstring,
    Symbol,
    Identifier,
    Keyword,
}

/// Is an enumeration containing all kinds of tokens in the `OcellusScript` programming language.
///
/// Every variant carries exactly the payload of its kind.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
pub enum Token {
    /// Contents of a string literal, without the surrounding quotes.
    StringConst(String),
    /// Digits of an integer literal.
    IntConst(String),
    /// Digits and decimal point of a floating point literal.
    FloatConst(String),
    /// A line comment including its leading `#`.
    Comment(String),
    /// Contents of a docstring, without the backtick delimiters.
    Docstring(String),
    /// A single punctuation character.
    Symbol(char),
    /// A name that is not reserved.
    Identifier(String),
    /// A reserved word.
    Keyword(KeywordKind),
}

impl Token {
    /// Creates a token from its kind and lexeme.
    ///
    /// Identifiers spelled like a keyword become [`Token::Keyword`]. Returns [`None`] if the
    /// lexeme cannot belong to the kind, e.g. a multi-character symbol.
    #[must_use]
    pub fn from_parts(kind: TokenKind, lexeme: &str) -> Option<Self> {
        match kind {
            TokenKind::StringConst => Some(Self::StringConst(lexeme.to_string())),
            TokenKind::IntConst => Some(Self::IntConst(lexeme.to_string())),
            TokenKind::FloatConst => Some(Self::FloatConst(lexeme.to_string())),
            TokenKind::Comment => Some(Self::Comment(lexeme.to_string())),
            TokenKind::Docstring => Some(Self::Docstring(lexeme.to_string())),
            TokenKind::Symbol => {
                let mut chars = lexeme.chars();
                match (chars.next(), chars.next()) {
                    (Some(symbol), None) => Some(Self::Symbol(symbol)),
                    _ => None,
                }
            }
            TokenKind::Identifier => Some(Self::identifier_or_keyword(lexeme)),
            TokenKind::Keyword => KeywordKind::from_str(lexeme).ok().map(Self::Keyword),
        }
    }

    /// Creates a [`Token::Keyword`] if the word is reserved, otherwise a [`Token::Identifier`].
    #[must_use]
    pub fn identifier_or_keyword(word: &str) -> Self {
        KeywordKind::from_str(word)
            .map_or_else(|_| Self::Identifier(word.to_string()), Self::Keyword)
    }

    /// Returns the kind of the token.
    #[must_use]
    pub fn kind(&self) -> TokenKind {
        match self {
            Self::StringConst(..) => TokenKind::StringConst,
            Self::IntConst(..) => TokenKind::IntConst,
            Self::FloatConst(..) => TokenKind::FloatConst,
            Self::Comment(..) => TokenKind::Comment,
            Self::Docstring(..) => TokenKind::Docstring,
            Self::Symbol(..) => TokenKind::Symbol,
            Self::Identifier(..) => TokenKind::Identifier,
            Self::Keyword(..) => TokenKind::Keyword,
        }
    }

    /// Returns the text captured for the token.
    #[must_use]
    pub fn lexeme(&self) -> Cow<'_, str> {
        match self {
            Self::StringConst(text)
            | Self::IntConst(text)
            | Self::FloatConst(text)
            | Self::Comment(text)
            | Self::Docstring(text)
            | Self::Identifier(text) => Cow::Borrowed(text),
            Self::Symbol(symbol) => Cow::Owned(symbol.to_string()),
            Self::Keyword(keyword) => Cow::Borrowed(keyword.as_str()),
        }
    }

    /// Whether the token is the given symbol.
    #[must_use]
    pub fn is_symbol_char(&self, symbol: char) -> bool {
        matches!(self, Self::Symbol(s) if *s == symbol)
    }

    /// Whether the token is the given keyword.
    #[must_use]
    pub fn is_keyword_kind(&self, keyword: KeywordKind) -> bool {
        matches!(self, Self::Keyword(k) if *k == keyword)
    }
}
