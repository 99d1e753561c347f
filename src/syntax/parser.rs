//! Provides the [`Parser`] cursor that the syntax tree productions are written against.

use crate::lexical::token::{KeywordKind, Token};

use super::error::{Error, ParseResult, SyntaxKind, UnexpectedSyntax};

/// Provides a way to parse a token sequence into a syntax tree.
///
/// The parser keeps a cursor on the current token. Outside of [`Parser::advance_token`] with
/// `skip_comments` disabled the cursor never rests on a comment.
#[derive(Debug, Clone)]
pub struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
}

impl<'a> Parser<'a> {
    /// Creates a new parser positioned on the first significant token.
    #[must_use]
    pub fn new(tokens: &'a [Token]) -> Self {
        let mut parser = Self { tokens, cursor: 0 };
        parser.skip_comments();
        parser
    }

    fn skip_comments(&mut self) {
        while matches!(self.tokens.get(self.cursor), Some(Token::Comment(..))) {
            self.cursor += 1;
        }
    }

    /// Returns the current token, [`None`] at the end of the input.
    #[must_use]
    pub fn current(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    /// Moves past the current token and returns the new current token.
    ///
    /// Comment tokens are skipped transparently unless `skip_comments` is `false`.
    pub fn advance_token(&mut self, skip_comments: bool) -> Option<&'a Token> {
        if self.cursor < self.tokens.len() {
            self.cursor += 1;
        }
        if skip_comments {
            self.skip_comments();
        }
        self.current()
    }

    /// Moves past the current token, skipping comments.
    pub fn forward(&mut self) {
        self.advance_token(true);
    }

    /// Returns the significant token following the current one.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> {
        self.lookahead(1)
    }

    /// Returns the `n`th significant token counted from the current one, which is `0`.
    #[must_use]
    pub fn lookahead(&self, n: usize) -> Option<&'a Token> {
        if n == 0 {
            return self.current();
        }

        self.tokens
            .get(self.cursor + 1..)?
            .iter()
            .filter(|token| !matches!(token, Token::Comment(..)))
            .nth(n - 1)
    }

    /// Checks if the parser has consumed every token.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }

    /// Creates the error describing that `expected` was not found at the current token.
    #[must_use]
    pub fn unexpected(&self, expected: SyntaxKind) -> Error {
        Error::UnexpectedSyntax(UnexpectedSyntax {
            expected,
            found: self.current().cloned(),
        })
    }

    /// Consumes the current token if it is the given symbol.
    pub fn eat_symbol(&mut self, symbol: char) -> bool {
        let matched = self.current().is_some_and(|token| token.is_symbol_char(symbol));
        if matched {
            self.forward();
        }
        matched
    }

    /// Consumes the current token if it is the given keyword.
    pub fn eat_keyword(&mut self, keyword: KeywordKind) -> bool {
        let matched = self
            .current()
            .is_some_and(|token| token.is_keyword_kind(keyword));
        if matched {
            self.forward();
        }
        matched
    }

    /// Consumes the given symbol.
    ///
    /// # Errors
    /// - If the current token is not the symbol.
    pub fn expect_symbol(&mut self, symbol: char) -> ParseResult<()> {
        if self.eat_symbol(symbol) {
            Ok(())
        } else {
            Err(self.unexpected(SyntaxKind::Symbol(symbol)))
        }
    }

    /// Consumes the given keyword.
    ///
    /// # Errors
    /// - If the current token is not the keyword.
    pub fn expect_keyword(&mut self, keyword: KeywordKind) -> ParseResult<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.unexpected(SyntaxKind::Keyword(keyword)))
        }
    }

    /// Consumes an identifier and returns its name.
    ///
    /// # Errors
    /// - If the current token is not an identifier.
    pub fn expect_identifier(&mut self) -> ParseResult<String> {
        match self.current() {
            Some(Token::Identifier(name)) => {
                self.forward();
                Ok(name.clone())
            }
            _ => Err(self.unexpected(SyntaxKind::Identifier)),
        }
    }
}
