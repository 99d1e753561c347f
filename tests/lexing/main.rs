use ocellus::{
    base::{Error, SilentHandler, VoidHandler},
    lexical::{
        token::{KeywordKind, Token, TokenKind},
        DelimitedLiteral,
    },
};

fn tokenize(source: &str) -> Vec<Token> {
    ocellus::tokenize_str(source, &VoidHandler)
        .expect("Failed to tokenize")
        .dissolve()
}

#[test]
fn lexing_fixture() {
    let source = include_str!("./tokens.ocls");
    let tokens = tokenize(source);

    let expected = vec![
        Token::Keyword(KeywordKind::Module),
        Token::Identifier("Demo".to_string()),
        Token::Keyword(KeywordKind::Where),
        Token::Symbol(';'),
        Token::Comment("# greeting".to_string()),
        Token::Keyword(KeywordKind::Let),
        Token::Identifier("greeting".to_string()),
        Token::Symbol('='),
        Token::StringConst("hi there".to_string()),
        Token::Symbol(';'),
        Token::Keyword(KeywordKind::Let),
        Token::Identifier("pi".to_string()),
        Token::Symbol('='),
        Token::FloatConst("3.14".to_string()),
        Token::Symbol(';'),
        Token::Docstring("doc".to_string()),
    ];
    assert_eq!(tokens, expected);

    assert_eq!(tokenize(source), tokens, "Lexing must be deterministic");
}

#[test]
fn lexing_keywords() {
    assert_eq!(tokenize("module"), vec![Token::Keyword(KeywordKind::Module)]);
    assert_eq!(
        tokenize("modules"),
        vec![Token::Identifier("modules".to_string())]
    );
    assert_eq!(tokenize("self"), vec![Token::Keyword(KeywordKind::SelfValue)]);

    for token in tokenize("func class lambda takes returns return while for in") {
        assert_eq!(token.kind(), TokenKind::Keyword);
    }
}

#[test]
fn lexing_numbers() {
    assert_eq!(tokenize("3.14"), vec![Token::FloatConst("3.14".to_string())]);
    assert_eq!(tokenize("42"), vec![Token::IntConst("42".to_string())]);

    let handler = SilentHandler::new();
    ocellus::tokenize_str("1.2.3", &handler).expect_err("Expecting lexing failure");

    let received = handler.take();
    assert_eq!(received.len(), 1);
    let Error::LexicalError(ocellus::lexical::Error::MalformedNumericLiteral(err)) = &received[0]
    else {
        panic!("Expected a malformed numeric literal, got {:?}", received[0]);
    };
    assert_eq!(err.lexeme, "1.2");
}

#[test]
fn lexing_docstrings() {
    assert_eq!(
        tokenize("```doc```"),
        vec![Token::Docstring("doc".to_string())]
    );
    assert_eq!(
        tokenize("``x"),
        vec![
            Token::Symbol('`'),
            Token::Symbol('`'),
            Token::Identifier("x".to_string()),
        ]
    );
    assert_eq!(
        tokenize("```a `quoted` word```"),
        vec![Token::Docstring("a `quoted` word".to_string())]
    );
}

#[test]
fn lexing_unterminated() {
    let handler = SilentHandler::new();
    ocellus::tokenize_str("let x = \"open;", &handler).expect_err("Expecting lexing failure");

    let received = handler.take();
    assert!(matches!(
        &received[0],
        Error::LexicalError(ocellus::lexical::Error::UnterminatedLiteral(err))
            if err.literal == DelimitedLiteral::String
    ));

    let handler = SilentHandler::new();
    ocellus::tokenize_str("```never closed", &handler).expect_err("Expecting lexing failure");
    assert!(handler.has_received());
}
