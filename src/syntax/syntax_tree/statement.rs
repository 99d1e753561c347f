//! Syntax tree nodes for statements.

use getset::Getters;

use crate::{
    lexical::token::{KeywordKind, Token},
    syntax::{
        error::{ParseResult, SyntaxKind},
        parser::Parser,
    },
};

use super::{declaration::VariableDecl, expression::Expression};

/// Syntax Synopsis:
///
/// ``` ebnf
/// Statement:
///     VariableDeclaration
///     | WhileLoop
///     | ForLoop
///     | Return
///     | Match
///     ;
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Statement {
    Variable(VariableDecl),
    While(WhileLoop),
    For(ForLoop),
    Return(Expression),
    Match(Match),
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Block:
///     '{' Statement* '}'
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Block {
    /// The statements within the block.
    #[get = "pub"]
    statements: Vec<Statement>,
}

impl Block {
    /// Dissolves the [`Block`] into its statements.
    #[must_use]
    pub fn dissolve(self) -> Vec<Statement> {
        self.statements
    }
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// WhileLoop:
///     'while' Expression Block
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct WhileLoop {
    /// The loop condition.
    #[get = "pub"]
    condition: Expression,
    /// The loop body.
    #[get = "pub"]
    block: Block,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// ForLoop:
///     'for' Identifier 'in' Expression Block
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct ForLoop {
    /// The name bound to each element.
    #[get = "pub"]
    binding: String,
    /// The iterated expression.
    #[get = "pub"]
    iterable: Expression,
    /// The loop body.
    #[get = "pub"]
    block: Block,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Match:
///     'match' Expression '{' MatchCase (',' MatchCase)* ','? '}'
///     ;
/// MatchCase:
///     Pattern ('where' Expression)? '->' Block
///     ;
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct Match {
    /// The matched expression.
    #[get = "pub"]
    subject: Expression,
    /// The cases in source order.
    #[get = "pub"]
    cases: Vec<MatchCase>,
}

#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Getters)]
pub struct MatchCase {
    #[get = "pub"]
    pattern: Pattern,
    /// The guard following `where`.
    #[get = "pub"]
    guard: Option<Expression>,
    #[get = "pub"]
    block: Block,
}

/// Syntax Synopsis:
///
/// ``` ebnf
/// Pattern:
///     '_' | Expression
///     ;
/// ```
#[allow(missing_docs)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pattern {
    Wildcard,
    Value(Expression),
}

impl<'a> Parser<'a> {
    /// Parses a [`Block`].
    ///
    /// # Errors
    /// - If the tokens at the cursor do not form a block.
    pub fn parse_block(&mut self) -> ParseResult<Block> {
        self.expect_symbol('{')?;

        let mut statements = Vec::new();
        while !self.eat_symbol('}') {
            statements.push(self.parse_statement()?);
        }

        Ok(Block { statements })
    }

    /// Parses a [`Statement`].
    ///
    /// # Errors
    /// - If the tokens at the cursor do not form a statement.
    pub fn parse_statement(&mut self) -> ParseResult<Statement> {
        match self.current() {
            // variable declaration
            Some(Token::Keyword(KeywordKind::Let | KeywordKind::Var)) => {
                self.parse_variable_declaration().map(Statement::Variable)
            }
            Some(Token::Keyword(KeywordKind::While)) => {
                self.forward();
                let condition = self.parse_expression()?;
                let block = self.parse_block()?;

                Ok(Statement::While(WhileLoop { condition, block }))
            }
            Some(Token::Keyword(KeywordKind::For)) => {
                self.forward();
                let binding = self.expect_identifier()?;
                self.expect_keyword(KeywordKind::In)?;
                let iterable = self.parse_expression()?;
                let block = self.parse_block()?;

                Ok(Statement::For(ForLoop {
                    binding,
                    iterable,
                    block,
                }))
            }
            Some(Token::Keyword(KeywordKind::Return)) => {
                self.forward();
                let value = self.parse_expression()?;
                self.expect_symbol(';')?;

                Ok(Statement::Return(value))
            }
            Some(Token::Keyword(KeywordKind::Match)) => self.parse_match().map(Statement::Match),
            _ => Err(self.unexpected(SyntaxKind::Statement)),
        }
    }

    fn parse_match(&mut self) -> ParseResult<Match> {
        self.expect_keyword(KeywordKind::Match)?;
        let subject = self.parse_expression()?;
        self.expect_symbol('{')?;

        let mut cases = vec![self.parse_match_case()?];
        loop {
            if self.eat_symbol('}') {
                break;
            }
            self.expect_symbol(',')?;
            if self.eat_symbol('}') {
                break;
            }
            cases.push(self.parse_match_case()?);
        }

        Ok(Match { subject, cases })
    }

    fn parse_match_case(&mut self) -> ParseResult<MatchCase> {
        let pattern = if self.eat_symbol('_') {
            Pattern::Wildcard
        } else if self.current().is_some() {
            Pattern::Value(self.parse_expression()?)
        } else {
            return Err(self.unexpected(SyntaxKind::Pattern));
        };

        let guard = if self.eat_keyword(KeywordKind::Where) {
            Some(self.parse_expression()?)
        } else {
            None
        };

        self.expect_symbol('-')?;
        self.expect_symbol('>')?;
        let block = self.parse_block()?;

        Ok(MatchCase {
            pattern,
            guard,
            block,
        })
    }
}
