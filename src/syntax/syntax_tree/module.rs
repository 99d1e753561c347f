//! The module node of the syntax tree.

use std::{
    fmt::Display,
    sync::atomic::{AtomicUsize, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use chksum_md5 as md5;
use getset::{CopyGetters, Getters};

use crate::{
    base::{self, Handler},
    lexical::token::{KeywordKind, Token},
    syntax::{
        error::{ParseResult, SyntaxKind},
        parser::Parser,
    },
};

use super::declaration::{Class, DataType, Function, ShadowType, VariableDecl};

/// Module is the root of a parsed source file: its imports, its name and its declarations.
///
/// Syntax Synopsis:
///
/// ```ebnf
/// Module:
///     Import* ModuleHeader? Import* Declaration*
///     ;
/// ModuleHeader:
///     'module' Identifier 'where' ';'
///     ;
/// Declaration:
///     ShadowType | DataType | VariableDeclaration | Class | Function
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Module {
    /// The name of the module.
    #[get = "pub"]
    name: ModuleName,
    /// The imported modules in source order.
    #[get = "pub"]
    imports: Vec<ImportPath>,
    /// The shadow type declarations.
    #[get = "pub"]
    shadowtypes: Vec<ShadowType>,
    /// The data type declarations.
    #[get = "pub"]
    types: Vec<DataType>,
    /// The module level `var` and `let` declarations.
    #[get = "pub"]
    variables: Vec<VariableDecl>,
    /// The class declarations.
    #[get = "pub"]
    classes: Vec<Class>,
    /// The function declarations.
    #[get = "pub"]
    functions: Vec<Function>,
}

/// The name of a [`Module`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModuleName {
    /// Name given by a `module ... where;` header.
    Declared(String),
    /// Placeholder for a module without a header.
    ///
    /// Placeholders differ between parses of the same source and cannot be imported.
    Generated(String),
}

impl ModuleName {
    /// Creates a fresh placeholder name.
    #[must_use]
    pub fn generate() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|duration| duration.as_nanos())
            .unwrap_or_default();
        let seed = format!(
            "{nanos}\0{}\0{}",
            std::process::id(),
            COUNTER.fetch_add(1, Ordering::Relaxed)
        );

        Self::Generated(format!(
            "__module_{}",
            &md5::hash(seed).to_hex_lowercase()[..16]
        ))
    }

    /// Gets the name as a `&str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Declared(name) | Self::Generated(name) => name,
        }
    }

    /// Whether other modules can import the module by this name.
    #[must_use]
    pub fn is_importable(&self) -> bool {
        matches!(self, Self::Declared(..))
    }
}

impl Display for ModuleName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Syntax Synopsis:
///
/// ```ebnf
/// Import:
///     'import' Identifier (('.' | '!') Identifier)* (('.' | '!') '*')? ';'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ImportPath {
    /// The first name of the path.
    #[get = "pub"]
    root: String,
    /// The separated names after the root.
    #[get = "pub"]
    segments: Vec<ImportSegment>,
}

/// Renders the path as written, e.g. `std.io` or `std!*`.
impl Display for ImportPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.root)?;
        for segment in &self.segments {
            write!(f, "{}", segment.separator.as_char())?;
            match &segment.item {
                ImportItem::Name(name) => f.write_str(name)?,
                ImportItem::Wildcard => f.write_str("*")?,
            }
        }
        Ok(())
    }
}

/// A separator and the name following it in an [`ImportPath`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct ImportSegment {
    #[get_copy = "pub"]
    separator: ImportSeparator,
    #[get = "pub"]
    item: ImportItem,
}

#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportSeparator {
    Dot,
    Bang,
}

impl ImportSeparator {
    /// The symbol spelling the separator.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::Dot => '.',
            Self::Bang => '!',
        }
    }
}

#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ImportItem {
    Name(String),
    Wildcard,
}

impl<'a> Parser<'a> {
    /// Parses a [`Module`].
    ///
    /// # Errors
    /// - The first syntax error encountered; it is also passed to the handler.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn parse_module(&mut self, handler: &impl Handler<base::Error>) -> ParseResult<Module> {
        tracing::debug!("Parsing module");

        match self.parse_module_contents() {
            Ok(module) => Ok(module),
            Err(err) => {
                handler.receive(base::Error::ParseError(err.clone()));
                Err(err)
            }
        }
    }

    fn parse_module_contents(&mut self) -> ParseResult<Module> {
        let mut imports = self.parse_imports()?;

        let name = if self.eat_keyword(KeywordKind::Module) {
            let name = self.expect_identifier()?;
            self.expect_keyword(KeywordKind::Where)?;
            self.expect_symbol(';')?;

            tracing::debug!("Found module header '{name}'");
            ModuleName::Declared(name)
        } else {
            ModuleName::generate()
        };

        imports.extend(self.parse_imports()?);

        let mut module = Module {
            name,
            imports,
            shadowtypes: Vec::new(),
            types: Vec::new(),
            variables: Vec::new(),
            classes: Vec::new(),
            functions: Vec::new(),
        };
        let mut docstring = None;

        while let Some(token) = self.current() {
            match token {
                Token::Docstring(text) => {
                    if docstring.replace(text.clone()).is_some() {
                        tracing::debug!("Skipping docstring not followed by a class or function");
                    }
                    self.forward();
                    continue;
                }
                Token::Keyword(KeywordKind::Shadowtype) => {
                    module.shadowtypes.push(self.parse_shadowtype()?);
                }
                Token::Keyword(KeywordKind::Type) => {
                    module.types.push(self.parse_data_type()?);
                }
                Token::Keyword(KeywordKind::Var | KeywordKind::Let) => {
                    module.variables.push(self.parse_variable_declaration()?);
                }
                Token::Keyword(KeywordKind::Class) => {
                    module.classes.push(self.parse_class(docstring.take())?);
                }
                Token::Keyword(KeywordKind::Func | KeywordKind::Private) => {
                    module.functions.push(self.parse_function(docstring.take())?);
                }
                Token::Keyword(..) | Token::Identifier(..) => {
                    return Err(self.unexpected(SyntaxKind::Declaration));
                }
                _ => {
                    tracing::debug!(
                        "Stopping at '{}', which cannot start a declaration",
                        token.lexeme()
                    );
                    break;
                }
            }

            if docstring.take().is_some() {
                tracing::debug!("Skipping docstring not followed by a class or function");
            }
        }

        if docstring.is_some() {
            tracing::debug!("Skipping docstring at the end of the module");
        }

        Ok(module)
    }

    fn parse_imports(&mut self) -> ParseResult<Vec<ImportPath>> {
        let mut imports = Vec::new();

        while self.eat_keyword(KeywordKind::Import) {
            let import = self.parse_import_path()?;
            tracing::debug!("Found import '{import}'");
            imports.push(import);
        }

        Ok(imports)
    }

    fn parse_import_path(&mut self) -> ParseResult<ImportPath> {
        let root = self.expect_identifier()?;
        let mut segments = Vec::new();

        loop {
            let separator = if self.eat_symbol('.') {
                ImportSeparator::Dot
            } else if self.eat_symbol('!') {
                ImportSeparator::Bang
            } else {
                break;
            };

            match self.current() {
                Some(Token::Symbol('*')) => {
                    self.forward();
                    segments.push(ImportSegment {
                        separator,
                        item: ImportItem::Wildcard,
                    });
                    self.expect_symbol(';')?;
                    return Ok(ImportPath { root, segments });
                }
                Some(Token::Identifier(name)) => {
                    self.forward();
                    segments.push(ImportSegment {
                        separator,
                        item: ImportItem::Name(name.clone()),
                    });
                }
                _ => return Err(self.unexpected(SyntaxKind::ImportSegment)),
            }
        }

        if self.eat_symbol(';') {
            Ok(ImportPath { root, segments })
        } else {
            Err(self.unexpected(SyntaxKind::Either(&[
                SyntaxKind::Symbol('.'),
                SyntaxKind::Symbol('!'),
                SyntaxKind::Symbol(';'),
            ])))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        base::{SilentHandler, VoidHandler},
        lexical::lexer::Lexer,
    };

    fn parse(source: &str) -> ParseResult<Module> {
        let tokens = Lexer::new(source).tokenize_all().unwrap();
        Parser::new(&tokens).parse_module(&VoidHandler)
    }

    #[test]
    fn test_imports() {
        let module = parse("import std.io; import std!*; import core; module Main where;").unwrap();
        let imports = module
            .imports()
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();

        assert_eq!(imports, vec!["std.io", "std!*", "core"]);
        assert_eq!(
            module.imports()[1].segments()[0].separator(),
            ImportSeparator::Bang
        );
        assert_eq!(module.name(), &ModuleName::Declared("Main".to_string()));
    }

    #[test]
    fn test_wildcard_ends_path() {
        assert!(parse("import std!*.io;").is_err());
        assert!(parse("import std.;").is_err());
    }

    #[test]
    fn test_placeholder_names_differ() {
        let first = parse("let x = 1;").unwrap();
        let second = parse("let x = 1;").unwrap();

        assert!(!first.name().is_importable());
        assert!(first.name().as_str().starts_with("__module_"));
        assert_ne!(first.name(), second.name());
    }

    #[test]
    fn test_docstring_attachment() {
        let module = parse(
            "```Unused.``` let x = 1; ```Adds.``` func add takes a: Integer = a + 1; ```Point.``` class Point { }",
        )
        .unwrap();

        assert_eq!(module.variables().len(), 1);
        assert_eq!(module.functions()[0].docstring().as_deref(), Some("Adds."));
        assert_eq!(module.classes()[0].docstring().as_deref(), Some("Point."));
    }

    #[test]
    fn test_errors_are_reported() {
        let tokens = Lexer::new("import std.io").tokenize_all().unwrap();
        let handler = SilentHandler::new();
        let result = Parser::new(&tokens).parse_module(&handler);

        assert!(result.is_err());
        let received = handler.take();
        assert_eq!(received.len(), 1);
        assert!(matches!(received[0], base::Error::ParseError(..)));
    }

    #[test]
    fn test_declarations_end_at_non_word_token() {
        let module = parse("module Main where; let x = 1; 42 let y = 2;").unwrap();

        assert_eq!(module.variables().len(), 1);
        assert_eq!(module.variables()[0].name(), "x");
    }

    #[test]
    fn test_unexpected_word_is_an_error() {
        assert!(matches!(
            parse("module Main where; let x = 1; main"),
            Err(crate::syntax::error::Error::UnexpectedSyntax(err))
                if err.expected == SyntaxKind::Declaration
                    && err.found == Some(Token::Identifier("main".to_string()))
        ));
        assert!(parse("module Main where; return 1;").is_err());
    }
}
