//! Syntax tree nodes for expressions.

use std::fmt::Display;

use enum_as_inner::EnumAsInner;
use getset::{CopyGetters, Getters};
use itertools::Itertools as _;

use crate::{
    lexical::token::{KeywordKind, Token},
    syntax::{
        error::{ParseResult, SyntaxKind},
        parser::Parser,
    },
};

use super::ConsList;

/// Every operator spelling of the language, used to find the longest operator at the cursor.
const OPERATOR_SPELLINGS: [&str; 14] = [
    "and", "or", "==", "!=", "<=", ">=", "<", ">", "+", "-", "*", "/", "%", "->",
];

/// The binary precedence levels from the loosest to the tightest binding one.
const PRECEDENCE_LEVELS: [&[BinaryOperator]; 6] = [
    &[BinaryOperator::And, BinaryOperator::Or],
    &[BinaryOperator::Equal, BinaryOperator::NotEqual],
    &[BinaryOperator::LessEqual, BinaryOperator::GreaterEqual],
    &[BinaryOperator::Less, BinaryOperator::Greater],
    &[BinaryOperator::Add, BinaryOperator::Subtract],
    &[
        BinaryOperator::Multiply,
        BinaryOperator::Divide,
        BinaryOperator::Modulo,
    ],
];

/// Syntax Synopsis:
///
/// ```ebnf
/// Expression:
///     Boolean
///     ;
/// Boolean:
///     Equality (('and' | 'or') Equality)*
///     ;
/// Equality:
///     LowInequality (('==' | '!=') LowInequality)*
///     ;
/// LowInequality:
///     HighInequality (('<=' | '>=') HighInequality)*
///     ;
/// HighInequality:
///     Additive (('<' | '>') Additive)*
///     ;
/// Additive:
///     Multiplicative (('+' | '-') Multiplicative)*
///     ;
/// Multiplicative:
///     Basic (('*' | '/' | '%') Basic)*
///     ;
/// Basic:
///     '(' Expression ')'
///     | '[' (Expression (',' Expression)*)? ']'
///     | ('not' | '-') Basic
///     | Identifier '(' (Expression (',' Expression)*)? ')'
///     | Token
///     ;
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
pub enum Expression {
    Leaf(Token),
    Unary(UnaryExpression),
    Binary(BinaryExpression),
    FunctionCall(FunctionCall),
    ListLiteral(Option<ConsList<Box<Expression>>>),
}

impl Expression {
    /// Returns the tag of the node: the operator of unary and binary nodes, `value` for leaves,
    /// `call` for function calls and `list` for list literals.
    #[must_use]
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Leaf(..) => "value",
            Self::Unary(unary) => unary.operator.as_str(),
            Self::Binary(binary) => binary.operator.as_str(),
            Self::FunctionCall(..) => "call",
            Self::ListLiteral(..) => "list",
        }
    }
}

/// Renders the expression with explicit grouping, e.g. `(+ 1 (* 2 3))`.
impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Leaf(Token::StringConst(text)) => write!(f, "\"{text}\""),
            Self::Leaf(token) => f.write_str(&token.lexeme()),
            Self::Unary(unary) => write!(f, "({} {})", unary.operator.as_str(), unary.operand),
            Self::Binary(binary) => write!(
                f,
                "({} {} {})",
                binary.operator.as_str(),
                binary.left,
                binary.right
            ),
            Self::FunctionCall(call) => {
                write!(f, "{}({})", call.name, call.arguments.iter().join(", "))
            }
            Self::ListLiteral(elements) => write!(
                f,
                "[{}]",
                elements.iter().flat_map(ConsList::iter).join(", ")
            ),
        }
    }
}

/// Operators combining two operands.
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BinaryOperator {
    And,
    Or,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
    Less,
    Greater,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl BinaryOperator {
    /// Gets the spelling of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "and",
            Self::Or => "or",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
        }
    }

    /// Gets the operator spelled by `spelling`, if any.
    #[must_use]
    pub fn from_spelling(spelling: &str) -> Option<Self> {
        PRECEDENCE_LEVELS
            .iter()
            .flat_map(|level| level.iter())
            .copied()
            .find(|operator| operator.as_str() == spelling)
    }
}

/// Prefix operators.
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UnaryOperator {
    Not,
    Negate,
}

impl UnaryOperator {
    /// Gets the spelling of the operator.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Not => "not",
            Self::Negate => "-",
        }
    }
}

/// A prefix operator applied to an operand.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct UnaryExpression {
    /// The operator.
    #[get_copy = "pub"]
    operator: UnaryOperator,
    /// The operand.
    #[get = "pub"]
    operand: Box<Expression>,
}

/// An operator applied to two operands.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters, CopyGetters)]
pub struct BinaryExpression {
    /// The operator.
    #[get_copy = "pub"]
    operator: BinaryOperator,
    /// The left operand.
    #[get = "pub"]
    left: Box<Expression>,
    /// The right operand.
    #[get = "pub"]
    right: Box<Expression>,
}

/// Syntax Synopsis:
///
/// ```ebnf
/// FunctionCall:
///     Identifier '(' (Expression (',' Expression)*)? ')'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct FunctionCall {
    /// The name of the called function.
    #[get = "pub"]
    name: String,
    /// The arguments in order.
    #[get = "pub"]
    arguments: Vec<Expression>,
}

impl<'a> Parser<'a> {
    /// Parses an [`Expression`].
    ///
    /// # Errors
    /// - If the tokens at the cursor do not form an expression.
    pub fn parse_expression(&mut self) -> ParseResult<Expression> {
        self.parse_binary_level(0)
    }

    /// Finds the longest operator spelled at the cursor and the number of tokens it spans.
    ///
    /// Symbol tokens carry no positions, so adjacent symbols combine even when whitespace
    /// separates them in the source: `a < = b` reads as `a <= b`.
    fn resolve_operator(&self) -> Option<(&'static str, usize)> {
        match self.current()? {
            Token::Keyword(keyword) => OPERATOR_SPELLINGS
                .into_iter()
                .find(|spelling| *spelling == keyword.as_str())
                .map(|spelling| (spelling, 1)),
            Token::Symbol(first) => {
                let longest = OPERATOR_SPELLINGS
                    .iter()
                    .filter(|spelling| spelling.chars().all(|c| c.is_ascii_punctuation()))
                    .map(|spelling| spelling.len())
                    .max()
                    .unwrap_or(1);

                let mut symbols = vec![*first];
                while symbols.len() < longest {
                    match self.lookahead(symbols.len()) {
                        Some(Token::Symbol(symbol)) => symbols.push(*symbol),
                        _ => break,
                    }
                }

                (1..=symbols.len()).rev().find_map(|width| {
                    let candidate = symbols[..width].iter().collect::<String>();
                    OPERATOR_SPELLINGS
                        .into_iter()
                        .find(|spelling| *spelling == candidate)
                        .map(|spelling| (spelling, width))
                })
            }
            _ => None,
        }
    }

    fn parse_binary_level(&mut self, level: usize) -> ParseResult<Expression> {
        let Some(operators) = PRECEDENCE_LEVELS.get(level) else {
            return self.parse_basic();
        };

        let mut left = self.parse_binary_level(level + 1)?;

        while let Some((operator, width)) = self.resolve_operator().and_then(|(spelling, width)| {
            BinaryOperator::from_spelling(spelling)
                .filter(|operator| operators.contains(operator))
                .map(|operator| (operator, width))
        }) {
            tracing::trace!("Resolved operator `{}` at level {level}", operator.as_str());

            for _ in 0..width {
                self.forward();
            }

            let right = self.parse_binary_level(level + 1)?;
            left = Expression::Binary(BinaryExpression {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            });
        }

        Ok(left)
    }

    fn parse_basic(&mut self) -> ParseResult<Expression> {
        match self.current() {
            Some(Token::Symbol('(')) => {
                self.forward();
                let expression = self.parse_expression()?;
                self.expect_symbol(')')?;
                Ok(expression)
            }
            Some(Token::Symbol('[')) => {
                self.forward();
                let elements = self.parse_expression_list(']')?;
                Ok(Expression::ListLiteral(ConsList::from_vec(
                    elements.into_iter().map(Box::new).collect(),
                )))
            }
            Some(Token::Symbol('-')) => {
                self.forward();
                self.parse_unary(UnaryOperator::Negate)
            }
            Some(Token::Keyword(KeywordKind::Not)) => {
                self.forward();
                self.parse_unary(UnaryOperator::Not)
            }
            Some(Token::Identifier(name))
                if self.peek().is_some_and(|token| token.is_symbol_char('(')) =>
            {
                self.forward();
                self.forward();
                let arguments = self.parse_expression_list(')')?;
                Ok(Expression::FunctionCall(FunctionCall {
                    name: name.clone(),
                    arguments,
                }))
            }
            Some(token) => {
                self.forward();
                Ok(Expression::Leaf(token.clone()))
            }
            None => Err(self.unexpected(SyntaxKind::Expression)),
        }
    }

    fn parse_unary(&mut self, operator: UnaryOperator) -> ParseResult<Expression> {
        let operand = self.parse_basic()?;
        Ok(Expression::Unary(UnaryExpression {
            operator,
            operand: Box::new(operand),
        }))
    }

    /// Parses comma separated expressions up to and including the `close` symbol.
    fn parse_expression_list(&mut self, close: char) -> ParseResult<Vec<Expression>> {
        let mut expressions = Vec::new();

        if self.eat_symbol(close) {
            return Ok(expressions);
        }

        loop {
            expressions.push(self.parse_expression()?);

            if !self.eat_symbol(',') {
                self.expect_symbol(close)?;
                return Ok(expressions);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lexical::lexer::Lexer, syntax::error::Error};

    fn parse(source: &str) -> (ParseResult<Expression>, Option<Token>) {
        let tokens = Lexer::new(source).tokenize_all().unwrap();
        let mut parser = Parser::new(&tokens);
        let result = parser.parse_expression();
        (result, parser.current().cloned())
    }

    fn render(source: &str) -> String {
        let (result, rest) = parse(source);
        assert_eq!(rest, None, "unparsed input in `{source}`");
        result.unwrap().to_string()
    }

    #[test]
    fn test_multiplication_binds_tighter() {
        let (result, _) = parse("1 + 2 * 3");
        let expression = result.unwrap();

        let binary = expression.as_binary().unwrap();
        assert_eq!(binary.operator(), BinaryOperator::Add);
        assert_eq!(
            **binary.left(),
            Expression::Leaf(Token::IntConst("1".to_string()))
        );

        let right = binary.right().as_binary().unwrap();
        assert_eq!(right.operator(), BinaryOperator::Multiply);
        assert_eq!(
            **right.left(),
            Expression::Leaf(Token::IntConst("2".to_string()))
        );
        assert_eq!(
            **right.right(),
            Expression::Leaf(Token::IntConst("3".to_string()))
        );
    }

    #[test]
    fn test_precedence_levels() {
        assert_eq!(render("1 - 2 - 3"), "(- (- 1 2) 3)");
        assert_eq!(render("(1 + 2) * 3"), "(* (+ 1 2) 3)");
        assert_eq!(render("a <= b == c"), "(== (<= a b) c)");
        assert_eq!(render("a < b >= c"), "(>= (< a b) c)");
        assert_eq!(render("a and b or c == d"), "(or (and a b) (== c d))");
        assert_eq!(render("x % 2 != 0"), "(!= (% x 2) 0)");
    }

    #[test]
    fn test_longest_operator_wins() {
        assert_eq!(render("a<=b"), "(<= a b)");
        assert_eq!(render("a<-1"), "(< a (- 1))");
        assert_eq!(render("a == -b"), "(== a (- b))");
    }

    #[test]
    fn test_arrow_ends_expression() {
        let (result, rest) = parse("x -> { }");
        assert_eq!(result.unwrap().to_string(), "x");
        assert_eq!(rest, Some(Token::Symbol('-')));
    }

    #[test]
    fn test_basic_forms() {
        assert_eq!(render("not done"), "(not done)");
        assert_eq!(render("f(1, [2, 3], g())"), "f(1, [2, 3], g())");
        assert_eq!(render("[]"), "[]");
        assert_eq!(render("\"hi\""), "\"hi\"");

        let (result, _) = parse("[]");
        assert_eq!(result.unwrap(), Expression::ListLiteral(None));

        let (result, _) = parse("true");
        let expression = result.unwrap();
        assert_eq!(expression.operation(), "value");
        assert_eq!(
            expression.as_leaf(),
            Some(&Token::Keyword(KeywordKind::True))
        );
    }

    #[test]
    fn test_list_literal_is_cons_list() {
        let (result, _) = parse("[1, 2]");
        let list = result.unwrap().into_list_literal().unwrap().unwrap();

        assert_eq!(list.len(), 2);
        assert_eq!(
            **list.head(),
            Expression::Leaf(Token::IntConst("1".to_string()))
        );
    }

    #[test]
    fn test_incomplete_expression() {
        let (result, _) = parse("1 +");
        assert!(matches!(
            result,
            Err(Error::UnexpectedSyntax(err)) if err.expected == SyntaxKind::Expression && err.found.is_none()
        ));

        let (result, _) = parse("f(1, 2");
        assert!(matches!(
            result,
            Err(Error::UnexpectedSyntax(err)) if err.expected == SyntaxKind::Symbol(')')
        ));
    }

    #[test]
    fn test_spaced_symbols_form_one_operator() {
        assert_eq!(render("a < = b"), "(<= a b)");
        assert_eq!(render("a = = b"), "(== a b)");
        assert_eq!(render("a < b"), "(< a b)");
    }
}
