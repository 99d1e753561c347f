//! Renders a token sequence as a token dump.

use std::fmt::Write as _;

use crate::lexical::token::Token;

/// First line of the token list.
pub const BEGIN_MARKER: &str = "@BEGIN TOKEN CONSTRUCT";
/// Last line of the token list.
pub const END_MARKER: &str = "@END TOKEN CONSTRUCT";

/// Renders the header in upper case followed by one `<kind> <lexeme>` line per token.
#[must_use]
pub fn render_token_dump(header: &str, tokens: &[Token]) -> String {
    let mut output = String::new();

    // writing into a `String` cannot fail
    let _ = writeln!(output, "{}", header.to_uppercase());
    let _ = writeln!(output, "{BEGIN_MARKER}");
    for token in tokens {
        let _ = writeln!(output, "{} {}", token.kind(), token.lexeme());
    }
    let _ = writeln!(output, "{END_MARKER}");

    output
}
