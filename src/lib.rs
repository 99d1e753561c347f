//! The `OcellusScript` front end.
//!
//! `OcellusScript` is a small, statically typed language with modules, classes and pattern
//! matching. This crate turns its source text into tokens and a syntax tree.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod export;
pub mod lexical;
pub mod syntax;

use std::path::Path;

use base::{source_file::SourceFile, FileProvider, Handler, Result};
use syntax::syntax_tree::module::Module;

use crate::{base::Error, lexical::token_stream::TokenStream, syntax::parser::Parser};

/// Converts the given source code to tokens.
///
/// # Errors
/// - If an error occurs while tokenizing the source code.
pub fn tokenize_str(source: &str, handler: &impl Handler<Error>) -> Result<TokenStream> {
    Ok(TokenStream::tokenize_str(source, handler)?)
}

/// Parses the given source code.
///
/// # Errors
/// - If an error occurs while tokenizing the source code.
/// - If an error occurs while parsing the source code.
pub fn parse_str(source: &str, handler: &impl Handler<Error>) -> Result<Module> {
    let tokens = TokenStream::tokenize_str(source, handler)?;

    parse_tokens(&tokens, handler)
}

/// Parses an already tokenized source.
///
/// # Errors
/// - If an error occurs while parsing the tokens.
pub fn parse_tokens(
    tokens: &[lexical::token::Token],
    handler: &impl Handler<Error>,
) -> Result<Module> {
    let mut parser = Parser::new(tokens);

    Ok(parser.parse_module(handler)?)
}

/// Converts the source file at the given path to tokens.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If an error occurs while tokenizing the source code.
pub fn tokenize<F>(
    handler: &impl Handler<Error>,
    file_provider: &F,
    path: &Path,
) -> Result<TokenStream>
where
    F: FileProvider,
{
    let source_file = SourceFile::load(path, file_provider).map_err(|err| {
        handler.receive(err.clone());
        err
    })?;

    Ok(TokenStream::tokenize(&source_file, handler)?)
}

/// Parses the source file at the given path.
///
/// # Errors
/// - If an error occurs while reading the file.
/// - If an error occurs while tokenizing the source code.
/// - If an error occurs while parsing the source code.
pub fn parse<F>(handler: &impl Handler<Error>, file_provider: &F, path: &Path) -> Result<Module>
where
    F: FileProvider,
{
    let tokens = tokenize(handler, file_provider, path)?;

    parse_tokens(&tokens, handler)
}
