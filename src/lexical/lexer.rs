//! Contains the [`Lexer`], a character level state machine producing [`Token`]s.

use super::{
    error::{
        DelimitedLiteral, InvalidCharacter, LexResult, MalformedNumericLiteral,
        UnterminatedLiteral,
    },
    token::{Token, TokenKind},
};
use crate::base::source_file::Location;

/// Number of consecutive backticks delimiting a docstring.
const DOCSTRING_DELIMITER_LENGTH: usize = 3;

/// States of the tokenizing state machine.
///
/// Failures do not have a state of their own: they leave [`Lexer::advance`] as an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexerState {
    /// No character of the token has been read yet.
    Start,
    /// The kind of the token is known and characters are being accumulated.
    InToken,
    /// One or two backticks have been read, a docstring may be opening.
    MaybeDocstringStart,
    /// Inside a docstring, one or two backticks have been read, the docstring may be closing.
    MaybeDocstringEnd,
    /// The token is complete.
    Finish,
}

/// Converts `OcellusScript` source text into tokens, one token per call to [`Lexer::advance`].
///
/// The lexer reads characters through a cursor into the source, so unreading a character is a
/// matter of moving the cursor back.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    source: &'a str,
    chars: Vec<char>,
    cursor: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer at the beginning of the given source.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            cursor: 0,
        }
    }

    /// Whether there are characters left to read.
    #[must_use]
    pub fn has_more_chars(&self) -> bool {
        self.cursor < self.chars.len()
    }

    fn next_char(&mut self) -> Option<char> {
        let character = self.chars.get(self.cursor).copied()?;
        self.cursor += 1;
        Some(character)
    }

    /// Pushes the last read character back into the stream.
    fn unread(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Reads the next token.
    ///
    /// Whitespace between tokens is skipped. Returns `Ok(None)` once the input is exhausted.
    ///
    /// # Errors
    /// - [`UnterminatedLiteral`] if the input ends inside a string literal or docstring.
    /// - [`MalformedNumericLiteral`] if a floating point literal contains a second `.`.
    /// - [`InvalidCharacter`] if a character cannot start any token.
    pub fn advance(&mut self) -> LexResult<Option<Token>> {
        let mut state = LexerState::Start;
        let mut kind = TokenKind::Symbol;
        let mut lexeme = String::new();
        let mut token_start = self.cursor;
        let mut backticks = 0;

        while state != LexerState::Finish {
            let Some(character) = self.next_char() else {
                break;
            };

            match state {
                LexerState::Start => {
                    token_start = self.cursor - 1;

                    if character.is_whitespace() {
                        continue;
                    }

                    state = LexerState::InToken;
                    match character {
                        c if c.is_ascii_alphabetic() => {
                            kind = TokenKind::Identifier;
                            lexeme.push(c);
                        }
                        c if c.is_ascii_digit() => {
                            kind = TokenKind::IntConst;
                            lexeme.push(c);
                        }
                        '#' => {
                            kind = TokenKind::Comment;
                            lexeme.push('#');
                        }
                        '"' => kind = TokenKind::StringConst,
                        '`' => {
                            state = LexerState::MaybeDocstringStart;
                            backticks = 1;
                        }
                        c if c.is_ascii_punctuation() => {
                            kind = TokenKind::Symbol;
                            lexeme.push(c);
                        }
                        c => {
                            return Err(InvalidCharacter {
                                character: c,
                                location: self.location_of(token_start),
                                line: self.line_of(token_start),
                            }
                            .into())
                        }
                    }
                }

                LexerState::InToken => match kind {
                    TokenKind::Identifier => {
                        if character.is_ascii_alphabetic() || character == '_' {
                            lexeme.push(character);
                        } else {
                            self.unread();
                            state = LexerState::Finish;
                        }
                    }
                    TokenKind::IntConst => {
                        if character.is_ascii_digit() {
                            lexeme.push(character);
                        } else if character == '.' {
                            kind = TokenKind::FloatConst;
                            lexeme.push(character);
                        } else {
                            self.unread();
                            state = LexerState::Finish;
                        }
                    }
                    TokenKind::FloatConst => {
                        if character.is_ascii_digit() {
                            lexeme.push(character);
                        } else if character == '.' {
                            let position = self.cursor - 1;
                            return Err(MalformedNumericLiteral {
                                lexeme,
                                location: self.location_of(position),
                                line: self.line_of(position),
                            }
                            .into());
                        } else {
                            self.unread();
                            state = LexerState::Finish;
                        }
                    }
                    TokenKind::StringConst => {
                        if character == '"' {
                            state = LexerState::Finish;
                        } else {
                            lexeme.push(character);
                        }
                    }
                    TokenKind::Comment => {
                        if character == '\n' {
                            self.unread();
                            state = LexerState::Finish;
                        } else {
                            lexeme.push(character);
                        }
                    }
                    TokenKind::Docstring => {
                        if character == '`' {
                            state = LexerState::MaybeDocstringEnd;
                            backticks = 1;
                        } else {
                            lexeme.push(character);
                        }
                    }
                    TokenKind::Symbol | TokenKind::Keyword => {
                        self.unread();
                        state = LexerState::Finish;
                    }
                },

                LexerState::MaybeDocstringStart => {
                    if character == '`' {
                        backticks += 1;
                        if backticks == DOCSTRING_DELIMITER_LENGTH {
                            kind = TokenKind::Docstring;
                            state = LexerState::InToken;
                        }
                    } else {
                        // not a docstring, only the first backtick becomes a token
                        self.cursor = token_start + 1;
                        lexeme.push('`');
                        state = LexerState::Finish;
                    }
                }

                LexerState::MaybeDocstringEnd => {
                    if character == '`' {
                        backticks += 1;
                        if backticks == DOCSTRING_DELIMITER_LENGTH {
                            state = LexerState::Finish;
                        }
                    } else {
                        lexeme.extend(std::iter::repeat('`').take(backticks));
                        lexeme.push(character);
                        state = LexerState::InToken;
                    }
                }

                LexerState::Finish => unreachable!("loop exits on finish"),
            }
        }

        // the input may end before the token is finished
        match (state, kind) {
            (LexerState::Start, _) => return Ok(None),
            (LexerState::InToken, TokenKind::StringConst) => {
                return Err(self.unterminated(DelimitedLiteral::String, token_start))
            }
            (LexerState::InToken, TokenKind::Docstring) | (LexerState::MaybeDocstringEnd, _) => {
                return Err(self.unterminated(DelimitedLiteral::Docstring, token_start))
            }
            (LexerState::MaybeDocstringStart, _) => {
                self.cursor = token_start + 1;
                lexeme.push('`');
            }
            _ => (),
        }

        let token = match kind {
            TokenKind::Identifier => Token::identifier_or_keyword(&lexeme),
            TokenKind::IntConst => Token::IntConst(lexeme),
            TokenKind::FloatConst => Token::FloatConst(lexeme),
            TokenKind::StringConst => Token::StringConst(lexeme),
            TokenKind::Comment => Token::Comment(lexeme),
            TokenKind::Docstring => Token::Docstring(lexeme),
            TokenKind::Symbol | TokenKind::Keyword => {
                Token::Symbol(lexeme.chars().next().unwrap_or('`'))
            }
        };

        tracing::trace!(kind = %token.kind(), lexeme = %token.lexeme(), "read token");

        Ok(Some(token))
    }

    /// Reads every remaining token.
    ///
    /// # Errors
    /// - The first error returned by [`Lexer::advance`]; no partial token list is returned.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn tokenize_all(&mut self) -> LexResult<Vec<Token>> {
        let mut tokens = Vec::new();

        while let Some(token) = self.advance()? {
            tokens.push(token);
        }

        tracing::debug!("Read {} tokens", tokens.len());

        Ok(tokens)
    }

    fn unterminated(&self, literal: DelimitedLiteral, start: usize) -> super::Error {
        UnterminatedLiteral {
            literal,
            location: self.location_of(start),
            line: self.line_of(start),
        }
        .into()
    }

    /// Computes the line and column of the character at the given index.
    fn location_of(&self, index: usize) -> Location {
        self.chars[..index]
            .iter()
            .fold(Location::default(), |location, &character| {
                if character == '\n' {
                    Location {
                        line: location.line + 1,
                        column: 1,
                    }
                } else {
                    Location {
                        column: location.column + 1,
                        ..location
                    }
                }
            })
    }

    /// Returns the text of the line containing the character at the given index.
    fn line_of(&self, index: usize) -> String {
        let line = self.location_of(index).line;
        self.source
            .lines()
            .nth(line - 1)
            .unwrap_or_default()
            .to_string()
    }
}
