//! This module contains the syntax tree and parser for the `OcellusScript` language.

pub mod error;
pub mod parser;
#[allow(clippy::module_name_repetitions)]
pub mod syntax_tree;
