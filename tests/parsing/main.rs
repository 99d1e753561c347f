use std::path::Path;

use ocellus::{
    base::{Error, MemoryProvider, PrintHandler, SilentHandler, VoidHandler},
    lexical::token::{KeywordKind, Token},
    syntax::{
        error::{SyntaxKind, UnexpectedSyntax},
        syntax_tree::{
            declaration::{FunctionBody, Type},
            expression::{BinaryOperator, Expression},
            module::ModuleName,
            statement::{Pattern, Statement},
        },
    },
};

fn int(value: &str) -> Expression {
    Expression::Leaf(Token::IntConst(value.to_string()))
}

#[test]
fn parsing_geometry() {
    let source = include_str!("./geometry.ocls");
    let mut dir = MemoryProvider::new();
    dir.add_file("geometry.ocls", source);

    let parsed = ocellus::parse(&PrintHandler::default(), &dir, Path::new("geometry.ocls"))
        .expect("Failed to parse");

    assert_eq!(parsed.name(), &ModuleName::Declared("Geometry".to_string()));
    assert!(parsed.name().is_importable());

    let imports = parsed
        .imports()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    assert_eq!(imports, vec!["std.io", "std!*"]);

    let shadowtype = &parsed.shadowtypes()[0];
    assert_eq!(shadowtype.name(), "Age");
    assert_eq!(shadowtype.aliased_type(), "Integer");

    let shape = &parsed.types()[0];
    assert_eq!(shape.name(), "Shape");
    assert_eq!(shape.options().len(), 2);
    assert_eq!(shape.options()[1].type_expression().tokens().len(), 2);

    let variables = parsed.variables();
    assert_eq!(variables.len(), 3);
    assert_eq!(variables[0].initializer().to_string(), "(+ 1 (* 2 3))");
    assert_eq!(
        variables[1].declared_type(),
        &Some(Type::Primitive(KeywordKind::String))
    );
    assert_eq!(variables[2].initializer().to_string(), "[1, 2, 3]");

    let point = &parsed.classes()[0];
    assert_eq!(point.name(), "Point");
    assert_eq!(point.docstring().as_deref(), Some("A point in the plane."));
    assert_eq!(point.fields().len(), 2);
    assert_eq!(
        point.methods()[0].docstring().as_deref(),
        Some("Distance from the origin.")
    );

    let functions = parsed.functions();
    assert_eq!(functions.len(), 2);

    let classify = &functions[0];
    assert!(!classify.is_private());
    assert_eq!(classify.signature().inputs().len(), 2);
    assert_eq!(
        classify.signature().inputs()[1].parameter_type().to_string(),
        "Integer?"
    );
    let FunctionBody::Block(block) = classify.body() else {
        panic!("Expected a block body");
    };
    let Statement::Match(match_statement) = &block.statements()[0] else {
        panic!("Expected a match statement");
    };
    assert_eq!(match_statement.subject().to_string(), "area(shape)");
    assert_eq!(match_statement.cases().len(), 3);
    assert!(match_statement.cases()[1].guard().is_some());
    assert_eq!(match_statement.cases()[2].pattern(), &Pattern::Wildcard);

    let sum = &functions[1];
    assert!(sum.is_private());
    assert_eq!(sum.signature().inputs()[0].parameter_type().to_string(), "[Integer]");
    let FunctionBody::Block(block) = sum.body() else {
        panic!("Expected a block body");
    };
    let statements = block.statements();
    assert_eq!(statements.len(), 4);
    assert!(matches!(statements[1], Statement::For(..)));
    assert!(matches!(statements[2], Statement::While(..)));
    assert!(matches!(statements[3], Statement::Return(..)));
}

#[test]
fn parsing_invalid() {
    let source = include_str!("./invalid.ocls");
    let mut dir = MemoryProvider::new();
    dir.add_file("invalid.ocls", source);

    let handler = SilentHandler::new();
    ocellus::parse(&handler, &dir, Path::new("invalid.ocls"))
        .expect_err("Expecting parsing failure");

    let received = handler.take();
    assert_eq!(received.len(), 1);
    let Error::ParseError(ocellus::syntax::error::Error::UnexpectedSyntax(err)) = &received[0]
    else {
        panic!("Expected a syntax error, got {:?}", received[0]);
    };
    assert_eq!(err.expected, SyntaxKind::Keyword(KeywordKind::Where));
    assert_eq!(err.found, Some(Token::Identifier("wher".to_string())));
    assert_eq!(err.alternatives(), vec!["where"]);
}

#[test]
fn parsing_missing_file() {
    let handler = SilentHandler::new();
    let result = ocellus::parse(&handler, &MemoryProvider::new(), Path::new("missing.ocls"));

    assert!(matches!(result, Err(Error::IoError(..))));
    assert!(handler.has_received());
}

#[test]
fn parsing_precedence() {
    let module = ocellus::parse_str("var x = 1 + 2 * 3;", &VoidHandler).expect("Failed to parse");
    let initializer = module.variables()[0].initializer();

    let addition = initializer.as_binary().expect("Expected a binary expression");
    assert_eq!(addition.operator(), BinaryOperator::Add);
    assert_eq!(**addition.left(), int("1"));

    let multiplication = addition
        .right()
        .as_binary()
        .expect("Expected a binary expression");
    assert_eq!(multiplication.operator(), BinaryOperator::Multiply);
    assert_eq!(**multiplication.left(), int("2"));
    assert_eq!(**multiplication.right(), int("3"));
}

#[test]
fn parsing_imports() {
    let module = ocellus::parse_str("import std.io;", &VoidHandler).expect("Failed to parse");
    assert_eq!(module.imports()[0].to_string(), "std.io");

    let module = ocellus::parse_str("import std!*;", &VoidHandler).expect("Failed to parse");
    assert_eq!(module.imports()[0].to_string(), "std!*");

    let handler = SilentHandler::new();
    ocellus::parse_str("import std.io", &handler).expect_err("Expecting parsing failure");
    assert!(matches!(
        &handler.take()[..],
        [Error::ParseError(ocellus::syntax::error::Error::UnexpectedSyntax(UnexpectedSyntax {
            found: None,
            ..
        }))]
    ));
}

#[test]
fn parsing_variables() {
    let module = ocellus::parse_str("var x = 1 + 2; let y = 3;", &VoidHandler)
        .expect("Failed to parse");
    let variables = module.variables();

    assert_eq!(variables[0].name(), "x");
    assert!(!variables[0].is_constant());
    assert_eq!(variables[0].initializer().to_string(), "(+ 1 2)");

    assert_eq!(variables[1].name(), "y");
    assert!(variables[1].is_constant());
    assert_eq!(variables[1].initializer(), &int("3"));
    assert_eq!(variables[1].initializer().operation(), "value");
}

#[test]
fn parsing_module_names() {
    let source = "shadowtype Age = Integer;";
    let first = ocellus::parse_str(source, &VoidHandler).expect("Failed to parse");
    let second = ocellus::parse_str(source, &VoidHandler).expect("Failed to parse");
    assert_ne!(first.name(), second.name());
    assert!(!first.name().is_importable());

    let source = "module Named where; shadowtype Age = Integer;";
    let first = ocellus::parse_str(source, &VoidHandler).expect("Failed to parse");
    let second = ocellus::parse_str(source, &VoidHandler).expect("Failed to parse");
    assert_eq!(first.name(), second.name());
    assert_eq!(first.name().as_str(), "Named");
}

#[test]
fn parsing_prebuilt_tokens() {
    let tokens = vec![
        Token::Keyword(KeywordKind::Let),
        Token::Identifier("flag".to_string()),
        Token::Symbol('='),
        Token::Keyword(KeywordKind::Not),
        Token::Keyword(KeywordKind::True),
        Token::Symbol(';'),
    ];

    let module = ocellus::parse_tokens(&tokens, &VoidHandler).expect("Failed to parse");
    assert_eq!(module.variables()[0].initializer().to_string(), "(not true)");
}
