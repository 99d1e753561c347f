//! Syntax tree nodes for declarations.

#![allow(missing_docs)]

use std::fmt::Display;

use getset::{CopyGetters, Getters};
use itertools::Itertools as _;

use crate::{
    lexical::token::{KeywordKind, Token},
    syntax::{
        error::{ParseResult, SyntaxKind},
        parser::Parser,
    },
};

use super::{expression::Expression, statement::Block};

/// Syntax Synopsis:
///
/// ```ebnf
/// ShadowType:
///     'shadowtype' Identifier '=' (Identifier | Keyword) ';'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ShadowType {
    #[get = "pub"]
    name: String,
    /// The name of the type being shadowed.
    #[get = "pub"]
    aliased_type: String,
}

/// Syntax Synopsis:
///
/// ```ebnf
/// DataType:
///     'type' Identifier '=' '{' DataTypeOption (',' DataTypeOption)* '}' ';'
///     ;
/// DataTypeOption:
///     Identifier ':' '(' TypeExpression ')'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct DataType {
    #[get = "pub"]
    name: String,
    #[get = "pub"]
    options: Vec<DataTypeOption>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct DataTypeOption {
    #[get = "pub"]
    name: String,
    #[get = "pub"]
    type_expression: TypeExpression,
}

/// The tokens written between the parentheses of a [`DataTypeOption`], kept as read.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct TypeExpression {
    #[get = "pub"]
    tokens: Vec<Token>,
}

impl Display for TypeExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = self.tokens.iter().map(|token| token.lexeme()).join(" ");
        f.write_str(&text)
    }
}

/// Syntax Synopsis:
///
/// ```ebnf
/// VariableDeclaration:
///     ('var' | 'let') Identifier (':' Type)? '=' Expression ';'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct VariableDecl {
    #[get = "pub"]
    name: String,
    /// Whether the declaration was made with `let`.
    #[get_copy = "pub"]
    is_constant: bool,
    #[get = "pub"]
    declared_type: Option<Type>,
    #[get = "pub"]
    initializer: Expression,
}

/// Syntax Synopsis:
///
/// ```ebnf
/// Type:
///     ('[' Type ']' | Identifier | PrimitiveTypeKeyword) '?'?
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Type {
    /// A user defined type.
    Named(String),
    /// A built-in type.
    Primitive(KeywordKind),
    /// A list with elements of the inner type.
    List(Box<Type>),
    /// The inner type or nothing.
    Optional(Box<Type>),
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Named(name) => f.write_str(name),
            Self::Primitive(keyword) => f.write_str(keyword.as_str()),
            Self::List(element) => write!(f, "[{element}]"),
            Self::Optional(inner) => write!(f, "{inner}?"),
        }
    }
}

/// Syntax Synopsis:
///
/// ```ebnf
/// Function:
///     Docstring? 'private'? 'func' Identifier Signature FunctionBody
///     ;
/// Signature:
///     ('takes' Parameter ('and' Parameter)*)? ('returns' Type)?
///     ;
/// Parameter:
///     Identifier ':' Type
///     ;
/// FunctionBody:
///     Block | '=' Expression ';'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct Function {
    #[get = "pub"]
    docstring: Option<String>,
    #[get_copy = "pub"]
    is_private: bool,
    #[get = "pub"]
    name: String,
    #[get = "pub"]
    signature: Signature,
    #[get = "pub"]
    body: FunctionBody,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Signature {
    #[get = "pub"]
    inputs: Vec<Parameter>,
    /// The declared return type, [`None`] meaning `Nothing`.
    #[get = "pub"]
    returns: Option<Type>,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Parameter {
    #[get = "pub"]
    name: String,
    #[get = "pub"]
    parameter_type: Type,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FunctionBody {
    Block(Block),
    /// The function evaluates to the expression after `=`.
    Expression(Expression),
}

/// Syntax Synopsis:
///
/// ```ebnf
/// Class:
///     Docstring? 'class' Identifier '{' (VariableDeclaration | Function)* '}'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Class {
    #[get = "pub"]
    docstring: Option<String>,
    #[get = "pub"]
    name: String,
    #[get = "pub"]
    fields: Vec<VariableDecl>,
    #[get = "pub"]
    methods: Vec<Function>,
}

impl<'a> Parser<'a> {
    /// Parses a [`ShadowType`].
    ///
    /// # Errors
    /// - If the tokens at the cursor do not form a shadow type declaration.
    pub fn parse_shadowtype(&mut self) -> ParseResult<ShadowType> {
        self.expect_keyword(KeywordKind::Shadowtype)?;
        let name = self.expect_identifier()?;
        self.expect_symbol('=')?;

        let aliased_type = match self.current() {
            Some(Token::Identifier(identifier)) => identifier.clone(),
            Some(Token::Keyword(keyword)) => keyword.as_str().to_string(),
            _ => {
                return Err(self.unexpected(SyntaxKind::Either(&[
                    SyntaxKind::Identifier,
                    SyntaxKind::Type,
                ])))
            }
        };
        self.forward();
        self.expect_symbol(';')?;

        tracing::debug!("Parsed shadowtype '{name}'");

        Ok(ShadowType { name, aliased_type })
    }

    /// Parses a [`DataType`].
    ///
    /// # Errors
    /// - If the tokens at the cursor do not form a data type declaration.
    pub fn parse_data_type(&mut self) -> ParseResult<DataType> {
        self.expect_keyword(KeywordKind::Type)?;
        let name = self.expect_identifier()?;
        self.expect_symbol('=')?;
        self.expect_symbol('{')?;

        let mut options = Vec::new();
        loop {
            let option_name = self.expect_identifier()?;
            self.expect_symbol(':')?;
            self.expect_symbol('(')?;
            let type_expression = self.parse_type_expression()?;

            options.push(DataTypeOption {
                name: option_name,
                type_expression,
            });

            if !self.eat_symbol(',') {
                break;
            }
        }

        self.expect_symbol('}')?;
        self.expect_symbol(';')?;

        tracing::debug!("Parsed type '{name}' with {} options", options.len());

        Ok(DataType { name, options })
    }

    /// Collects the tokens up to the `)` matching an already consumed `(`.
    fn parse_type_expression(&mut self) -> ParseResult<TypeExpression> {
        let mut tokens = Vec::new();
        let mut depth = 0_usize;

        loop {
            match self.current() {
                Some(Token::Symbol(')')) if depth == 0 => {
                    self.forward();
                    return Ok(TypeExpression { tokens });
                }
                Some(token) => {
                    if token.is_symbol_char('(') {
                        depth += 1;
                    } else if token.is_symbol_char(')') {
                        depth -= 1;
                    }
                    tokens.push(token.clone());
                    self.forward();
                }
                None => return Err(self.unexpected(SyntaxKind::Symbol(')'))),
            }
        }
    }

    /// Parses a [`VariableDecl`] introduced by `var` or `let`.
    ///
    /// # Errors
    /// - If the tokens at the cursor do not form a variable declaration.
    pub fn parse_variable_declaration(&mut self) -> ParseResult<VariableDecl> {
        let is_constant = if self.eat_keyword(KeywordKind::Let) {
            true
        } else if self.eat_keyword(KeywordKind::Var) {
            false
        } else {
            return Err(self.unexpected(SyntaxKind::Either(&[
                SyntaxKind::Keyword(KeywordKind::Var),
                SyntaxKind::Keyword(KeywordKind::Let),
            ])));
        };

        let name = self.expect_identifier()?;
        let declared_type = if self.eat_symbol(':') {
            Some(self.parse_type()?)
        } else {
            None
        };
        self.expect_symbol('=')?;
        let initializer = self.parse_expression()?;
        self.expect_symbol(';')?;

        tracing::debug!(
            "Parsed {} '{name}'",
            if is_constant { "constant" } else { "variable" }
        );

        Ok(VariableDecl {
            name,
            is_constant,
            declared_type,
            initializer,
        })
    }

    /// Parses a [`Type`] reference.
    ///
    /// # Errors
    /// - If the tokens at the cursor do not form a type.
    pub fn parse_type(&mut self) -> ParseResult<Type> {
        let base = match self.current() {
            Some(Token::Symbol('[')) => {
                self.forward();
                let element = self.parse_type()?;
                self.expect_symbol(']')?;
                Type::List(Box::new(element))
            }
            Some(Token::Identifier(name)) => {
                self.forward();
                Type::Named(name.clone())
            }
            Some(Token::Keyword(keyword)) if keyword.is_primitive_type() => {
                self.forward();
                Type::Primitive(*keyword)
            }
            _ => return Err(self.unexpected(SyntaxKind::Type)),
        };

        if self.eat_symbol('?') {
            Ok(Type::Optional(Box::new(base)))
        } else {
            Ok(base)
        }
    }

    /// Parses a [`Function`], attaching the docstring read before it.
    ///
    /// # Errors
    /// - If the tokens at the cursor do not form a function.
    pub fn parse_function(&mut self, docstring: Option<String>) -> ParseResult<Function> {
        let is_private = self.eat_keyword(KeywordKind::Private);
        self.expect_keyword(KeywordKind::Func)?;
        let name = self.expect_identifier()?;

        let mut inputs = Vec::new();
        if self.eat_keyword(KeywordKind::Takes) {
            loop {
                let parameter_name = self.expect_identifier()?;
                self.expect_symbol(':')?;
                let parameter_type = self.parse_type()?;
                inputs.push(Parameter {
                    name: parameter_name,
                    parameter_type,
                });

                if !self.eat_keyword(KeywordKind::And) {
                    break;
                }
            }
        }

        let returns = if self.eat_keyword(KeywordKind::Returns) {
            Some(self.parse_type()?)
        } else {
            None
        };

        let body = if self.eat_symbol('=') {
            let expression = self.parse_expression()?;
            self.expect_symbol(';')?;
            FunctionBody::Expression(expression)
        } else if self.current().is_some_and(|token| token.is_symbol_char('{')) {
            FunctionBody::Block(self.parse_block()?)
        } else {
            return Err(self.unexpected(SyntaxKind::Either(&[
                SyntaxKind::Symbol('{'),
                SyntaxKind::Symbol('='),
            ])));
        };

        tracing::debug!("Parsed function '{name}'");

        Ok(Function {
            docstring,
            is_private,
            name,
            signature: Signature { inputs, returns },
            body,
        })
    }

    /// Parses a [`Class`], attaching the docstring read before it.
    ///
    /// # Errors
    /// - If the tokens at the cursor do not form a class.
    pub fn parse_class(&mut self, docstring: Option<String>) -> ParseResult<Class> {
        self.expect_keyword(KeywordKind::Class)?;
        let name = self.expect_identifier()?;
        self.expect_symbol('{')?;

        let mut fields = Vec::new();
        let mut methods = Vec::new();
        let mut pending_docstring = None;

        loop {
            match self.current() {
                Some(Token::Symbol('}')) => {
                    self.forward();
                    break;
                }
                Some(Token::Docstring(text)) => {
                    if pending_docstring.replace(text.clone()).is_some() {
                        tracing::debug!("Skipping docstring not followed by a method");
                    }
                    self.forward();
                }
                Some(Token::Keyword(KeywordKind::Var | KeywordKind::Let)) => {
                    fields.push(self.parse_variable_declaration()?);
                    if pending_docstring.take().is_some() {
                        tracing::debug!("Skipping docstring not followed by a method");
                    }
                }
                Some(Token::Keyword(KeywordKind::Func | KeywordKind::Private)) => {
                    methods.push(self.parse_function(pending_docstring.take())?);
                }
                _ => {
                    return Err(self.unexpected(SyntaxKind::Either(&[
                        SyntaxKind::Keyword(KeywordKind::Var),
                        SyntaxKind::Keyword(KeywordKind::Let),
                        SyntaxKind::Keyword(KeywordKind::Func),
                        SyntaxKind::Symbol('}'),
                    ])))
                }
            }
        }

        tracing::debug!(
            "Parsed class '{name}' with {} fields and {} methods",
            fields.len(),
            methods.len()
        );

        Ok(Class {
            docstring,
            name,
            fields,
            methods,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        lexical::lexer::Lexer,
        syntax::{
            error::{Error, UnexpectedSyntax},
            syntax_tree::statement::Statement,
        },
    };

    fn lex(source: &str) -> Vec<Token> {
        Lexer::new(source).tokenize_all().unwrap()
    }

    #[test]
    fn test_parse_shadowtype() {
        let tokens = lex("shadowtype Age = Integer;");
        let shadowtype = Parser::new(&tokens).parse_shadowtype().unwrap();

        assert_eq!(shadowtype.name(), "Age");
        assert_eq!(shadowtype.aliased_type(), "Integer");
    }

    #[test]
    fn test_parse_data_type() {
        let tokens = lex("type Shape = { Circle: (Float), Rect: (Pair (Float) Float) };");
        let data_type = Parser::new(&tokens).parse_data_type().unwrap();

        assert_eq!(data_type.name(), "Shape");
        assert_eq!(data_type.options().len(), 2);
        assert_eq!(data_type.options()[0].name(), "Circle");
        assert_eq!(
            data_type.options()[0].type_expression().tokens(),
            &vec![Token::Keyword(KeywordKind::Float)]
        );
        assert_eq!(
            data_type.options()[1].type_expression().to_string(),
            "Pair ( Float ) Float"
        );
    }

    #[test]
    fn test_unclosed_type_expression() {
        let tokens = lex("type Shape = { Circle: (Float };");
        let err = Parser::new(&tokens).parse_data_type().unwrap_err();

        assert_eq!(
            err,
            Error::UnexpectedSyntax(UnexpectedSyntax {
                expected: SyntaxKind::Symbol(')'),
                found: None,
            })
        );
    }

    #[test]
    fn test_parse_variable_declaration() {
        let tokens = lex("var x = 1 + 2;");
        let declaration = Parser::new(&tokens).parse_variable_declaration().unwrap();
        assert_eq!(declaration.name(), "x");
        assert!(!declaration.is_constant());
        assert_eq!(declaration.initializer().to_string(), "(+ 1 2)");

        let tokens = lex("let names: [String]? = [];");
        let declaration = Parser::new(&tokens).parse_variable_declaration().unwrap();
        assert!(declaration.is_constant());
        assert_eq!(
            declaration.declared_type().as_ref().map(ToString::to_string),
            Some("[String]?".to_string())
        );
    }

    #[test]
    fn test_parse_function() {
        let tokens = lex("private func add takes a: Integer and b: Integer returns Integer = a + b;");
        let function = Parser::new(&tokens).parse_function(None).unwrap();

        assert!(function.is_private());
        assert_eq!(function.name(), "add");
        assert_eq!(function.signature().inputs().len(), 2);
        assert_eq!(function.signature().inputs()[1].name(), "b");
        assert_eq!(
            function.signature().returns(),
            &Some(Type::Primitive(KeywordKind::Integer))
        );
        assert!(matches!(function.body(), FunctionBody::Expression(e) if e.to_string() == "(+ a b)"));

        let tokens = lex("func main { return 0; }");
        let function = Parser::new(&tokens)
            .parse_function(Some("Entry point.".to_string()))
            .unwrap();
        assert_eq!(function.docstring().as_deref(), Some("Entry point."));
        assert!(function.signature().inputs().is_empty());
        assert_eq!(function.signature().returns(), &None);
        let FunctionBody::Block(block) = function.body() else {
            panic!("expected a block body");
        };
        assert!(matches!(block.statements()[0], Statement::Return(..)));
    }

    #[test]
    fn test_parse_class() {
        let tokens = lex(
            "class Point { var x: Float = 0.0; let origin = true; ```Length.``` func length returns Float = x; }",
        );
        let class = Parser::new(&tokens).parse_class(None).unwrap();

        assert_eq!(class.name(), "Point");
        assert_eq!(class.fields().len(), 2);
        assert_eq!(class.methods().len(), 1);
        assert_eq!(class.methods()[0].docstring().as_deref(), Some("Length."));
    }

    #[test]
    fn test_field_docstring_is_not_attached_to_method() {
        let tokens = lex("class C { ```Field doc.``` var x = 1; func f = 1; }");
        let class = Parser::new(&tokens).parse_class(None).unwrap();

        assert_eq!(class.fields().len(), 1);
        assert_eq!(class.methods()[0].docstring(), &None);
    }
}
