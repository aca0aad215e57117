//! Parser infrastructure for IQL syntax.
//!
//! The parser consumes a token stream produced by the lexer and constructs
//! an AST. It is a hand-written recursive descent parser; the left-recursive
//! parts of the grammar (expressions, node statements, position markers) are
//! precedence-climbing loops. Parsing stops at the first error.
//!
//! Each public entry point parses one top-level rule and requires it to be
//! followed by the end of input.

pub mod base;
pub mod error;
mod expression;
mod literal;
mod loops;
mod marker;
mod node;
mod quantifier;
mod query;
mod reference;
mod statement;
pub mod trace;

use crate::ast::{
    Expression, GroupStatement, NodeStatement, PayloadStatement, ResultStatement,
    SelectionStatement, StructuralConstraint,
};
use crate::lexer::token::{Token, TokenKind};
use base::{ParseResult, TokenStream};
use error::ParseError;
use trace::{DefaultTrace, ParserTrace};

/// Parser limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting depth of grammar rules before parsing fails with a
    /// syntax error.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

/// IQL parser over a token slice.
///
/// A parser is single use: every entry point consumes it.
pub struct Parser<'a> {
    stream: TokenStream<'a>,
    config: ParserConfig,
    depth: usize,
    /// Set once the nesting limit is hit, even inside a speculative branch.
    overflow: Option<ParseError>,
    trace: DefaultTrace,
}

impl<'a> Parser<'a> {
    /// Creates a new parser with the default configuration.
    ///
    /// An `Eof` token is appended when `tokens` does not end with one.
    pub fn new(tokens: &'a [Token]) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(tokens: &'a [Token], config: ParserConfig) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            config,
            depth: 0,
            overflow: None,
            trace: DefaultTrace::default(),
        }
    }

    /// Parses a node statement followed by end of input.
    pub fn parse_standalone_node_statement(mut self) -> ParseResult<NodeStatement> {
        self.complete(Self::parse_node_statement)
    }

    /// Parses a structural constraint followed by end of input.
    pub fn parse_standalone_structural_constraint(mut self) -> ParseResult<StructuralConstraint> {
        self.complete(Self::parse_structural_constraint)
    }

    /// Parses a selection statement followed by end of input.
    pub fn parse_standalone_selective_statement(mut self) -> ParseResult<SelectionStatement> {
        self.complete(Self::parse_selection_statement)
    }

    /// Parses an expression followed by end of input.
    pub fn parse_standalone_expression(mut self) -> ParseResult<Expression> {
        self.complete(Self::parse_expression)
    }

    /// Parses `ALL` or `[WITH ...] [FILTER BY ...] FIND ...`.
    pub fn parse_payload_statement(mut self) -> ParseResult<PayloadStatement> {
        self.complete(Self::parse_payload)
    }

    /// Parses `GROUP BY ...`.
    pub fn parse_group_statement(mut self) -> ParseResult<GroupStatement> {
        self.complete(Self::parse_group)
    }

    /// Parses `[LIMIT ...] [ORDER BY ...]`. Empty input yields an empty
    /// result statement.
    pub fn parse_result_statement(mut self) -> ParseResult<ResultStatement> {
        self.complete(Self::parse_result)
    }

    /// Runs a top-level rule and requires the end of input after it.
    ///
    /// Hitting the nesting limit anywhere, speculative branches included,
    /// fails the whole parse with that error.
    fn complete<T>(&mut self, rule: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        let result = rule(self).and_then(|value| {
            self.stream.expect(TokenKind::Eof)?;
            Ok(value)
        });
        match self.overflow.take() {
            Some(err) => Err(err),
            None => result,
        }
    }

    /// Runs `parse` as a nested rule, enforcing the depth limit and emitting
    /// trace events.
    fn nested<T>(
        &mut self,
        rule: &'static str,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= self.config.max_depth {
            let err = self.stream.error_here(format!(
                "nesting limit exceeded (maximum depth is {})",
                self.config.max_depth
            ));
            self.overflow.get_or_insert_with(|| err.clone());
            return Err(err);
        }

        self.depth += 1;
        self.trace
            .rule_begin(rule, self.depth, self.stream.current());
        let result = parse(self);
        self.trace
            .rule_end(rule, self.depth, result.as_ref().err());
        self.depth -= 1;
        result
    }

    /// Runs `parse` speculatively: on failure the stream is rewound to where
    /// it started and the error is returned.
    fn attempt<T>(
        &mut self,
        rule: &'static str,
        parse: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        let mark = self.stream.mark();
        let result = parse(self);
        if result.is_err() {
            self.stream.rewind(mark);
            self.trace
                .rewind(rule, self.depth, self.stream.current());
        }
        result
    }

    /// Returns true if `rule` succeeds at the current position. The stream
    /// is always rewound.
    fn lookahead(&mut self, rule: impl FnOnce(&mut Self) -> bool) -> bool {
        let mark = self.stream.mark();
        let expected = self.stream.expected();
        let matched = rule(self);
        self.stream.rewind(mark);
        self.stream.expect_at_current(expected);
        matched
    }
}

/// Parses a node statement followed by end of input.
pub fn parse_standalone_node_statement(tokens: &[Token]) -> ParseResult<NodeStatement> {
    Parser::new(tokens).parse_standalone_node_statement()
}

/// Parses a structural constraint followed by end of input.
pub fn parse_standalone_structural_constraint(
    tokens: &[Token],
) -> ParseResult<StructuralConstraint> {
    Parser::new(tokens).parse_standalone_structural_constraint()
}

/// Parses a selection statement followed by end of input.
pub fn parse_standalone_selective_statement(tokens: &[Token]) -> ParseResult<SelectionStatement> {
    Parser::new(tokens).parse_standalone_selective_statement()
}

/// Parses an expression followed by end of input.
pub fn parse_standalone_expression(tokens: &[Token]) -> ParseResult<Expression> {
    Parser::new(tokens).parse_standalone_expression()
}

/// Parses a payload statement.
pub fn parse_payload_statement(tokens: &[Token]) -> ParseResult<PayloadStatement> {
    Parser::new(tokens).parse_payload_statement()
}

/// Parses a group statement.
pub fn parse_group_statement(tokens: &[Token]) -> ParseResult<GroupStatement> {
    Parser::new(tokens).parse_group_statement()
}

/// Parses a result statement.
pub fn parse_result_statement(tokens: &[Token]) -> ParseResult<ResultStatement> {
    Parser::new(tokens).parse_result_statement()
}
