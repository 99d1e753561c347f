//! Renders the results of the front end for downstream tools.

pub mod token_dump;
pub mod xml;

pub use token_dump::render_token_dump;
pub use xml::render_module;
