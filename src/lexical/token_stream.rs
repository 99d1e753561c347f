//! Contains the [`TokenStream`] struct.

use std::fmt::Debug;

use derive_more::{Deref, From};

use crate::base::{self, source_file::SourceFile, Handler};

use super::{error::LexResult, lexer::Lexer, token::Token};

/// Is an ordered list of [`Token`]s.
///
/// This struct is the final output of the lexical analysis phase and is meant to be used by the
/// next stage of the compilation process. All tokens are read eagerly, so the parser can address
/// them by index.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deref, From)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl Debug for TokenStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.tokens.iter()).finish()
    }
}

impl FromIterator<Token> for TokenStream {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl TokenStream {
    /// Tokenizes the given source file.
    ///
    /// # Errors
    /// - The first lexical error; it is also passed to the handler.
    #[tracing::instrument(level = "debug", skip_all, fields(source_file = %source_file.path().display()))]
    pub fn tokenize(
        source_file: &SourceFile,
        handler: &impl Handler<base::Error>,
    ) -> LexResult<Self> {
        Self::tokenize_str(source_file.content(), handler)
    }

    /// Tokenizes the given source text.
    ///
    /// # Errors
    /// - The first lexical error; it is also passed to the handler.
    pub fn tokenize_str(source: &str, handler: &impl Handler<base::Error>) -> LexResult<Self> {
        match Lexer::new(source).tokenize_all() {
            Ok(tokens) => Ok(Self { tokens }),
            Err(err) => {
                tracing::error!("Fatal lexical error encountered while tokenizing source code");
                handler.receive(base::Error::LexicalError(err.clone()));
                Err(err)
            }
        }
    }

    /// Dissolves this struct into its tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> {
        self.tokens
    }
}
