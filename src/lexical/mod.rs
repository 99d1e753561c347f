//! The lexical module is responsible for converting raw text into a stream of tokens that the parser can understand.

pub mod lexer;
pub mod token;
pub mod token_stream;

mod error;
pub use error::{
    DelimitedLiteral, Error, InvalidCharacter, LexResult, MalformedNumericLiteral,
    UnterminatedLiteral,
};
