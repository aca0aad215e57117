//! IQL parser with rich diagnostics.
//!
//! This library implements the syntactic layer of IQL, the query language of
//! the ICARUS2 corpus framework: structural search patterns over annotated
//! corpora embedded in a general expression language. Errors are reported
//! through miette.
//!
//! # Example
//!
//! ```
//! use iql_parser::ast::{NodeStatementKind, PayloadStatementKind, SelectionStatementKind};
//! use iql_parser::parse_payload;
//!
//! let outcome = parse_payload("FIND [$x: pos == \"NN\"] --> [$y]");
//! assert!(outcome.diagnostics.is_empty());
//!
//! let Some(PayloadStatementKind::Query { selection, .. }) = outcome.ast.map(|p| p.node) else {
//!     panic!("expected a query payload");
//! };
//! let SelectionStatementKind::Structural { constraint, .. } = selection.node else {
//!     panic!("expected a structural selection");
//! };
//! assert!(matches!(
//!     constraint.statements[0].node,
//!     NodeStatementKind::GraphFragment(_)
//! ));
//! ```
//!
//! Token-level entry points live in [`parser`]; the functions at the crate
//! root take source text and return rendered diagnostics.

pub mod ast;
pub mod diag;
pub mod lexer;
pub mod parser;

// Re-export syntax span primitives.
pub use ast::{Span, Spanned};

pub use diag::{Diag, DiagLabel, SourceFile, convert_diag_to_report};
pub use lexer::token::{Token, TokenKind, TokenSet};
pub use lexer::{Lexer, LexerResult, tokenize};
pub use parser::base::ParseResult;
pub use parser::error::{ParseError, ParseErrorKind};
pub use parser::{Parser, ParserConfig};

use ast::{
    Expression, GroupStatement, NodeStatement, PayloadStatement, ResultStatement,
    SelectionStatement, StructuralConstraint,
};
use diag::convert_diagnostics_to_reports;

/// Result of parsing source text.
///
/// `ast` is present only when lexing and parsing both succeeded; otherwise
/// `diagnostics` explains why.
#[derive(Debug)]
pub struct ParseOutcome<T> {
    pub ast: Option<T>,
    pub diagnostics: Vec<miette::Report>,
}

impl<T> ParseOutcome<T> {
    /// Returns true if a tree was produced without diagnostics.
    pub fn is_ok(&self) -> bool {
        self.ast.is_some() && self.diagnostics.is_empty()
    }
}

fn parse_source<T>(
    source: &str,
    config: ParserConfig,
    rule: impl for<'t> FnOnce(Parser<'t>) -> ParseResult<T>,
) -> ParseOutcome<T> {
    let file = SourceFile::new(source);
    let lexed = tokenize(source);
    if !lexed.is_clean() {
        return ParseOutcome {
            ast: None,
            diagnostics: convert_diagnostics_to_reports(&lexed.diagnostics, &file),
        };
    }

    match rule(Parser::with_config(&lexed.tokens, config)) {
        Ok(ast) => ParseOutcome {
            ast: Some(ast),
            diagnostics: Vec::new(),
        },
        Err(err) => ParseOutcome {
            ast: None,
            diagnostics: vec![convert_diag_to_report(&err.to_diag(), &file)],
        },
    }
}

/// Parses a payload statement: `ALL` or `[WITH ...] [FILTER BY ...] FIND ...`.
pub fn parse_payload(source: &str) -> ParseOutcome<PayloadStatement> {
    parse_payload_with_config(source, ParserConfig::default())
}

/// Like [`parse_payload`], with explicit parser limits.
pub fn parse_payload_with_config(
    source: &str,
    config: ParserConfig,
) -> ParseOutcome<PayloadStatement> {
    parse_source(source, config, |parser| parser.parse_payload_statement())
}

/// Parses a `GROUP BY ...` statement.
pub fn parse_group(source: &str) -> ParseOutcome<GroupStatement> {
    parse_source(source, ParserConfig::default(), |parser| {
        parser.parse_group_statement()
    })
}

/// Parses a `[LIMIT ...] [ORDER BY ...]` statement.
pub fn parse_result(source: &str) -> ParseOutcome<ResultStatement> {
    parse_source(source, ParserConfig::default(), |parser| {
        parser.parse_result_statement()
    })
}

pub fn parse_expression(source: &str) -> ParseOutcome<Expression> {
    parse_source(source, ParserConfig::default(), |parser| {
        parser.parse_standalone_expression()
    })
}

pub fn parse_node_statement(source: &str) -> ParseOutcome<NodeStatement> {
    parse_source(source, ParserConfig::default(), |parser| {
        parser.parse_standalone_node_statement()
    })
}

pub fn parse_structural_constraint(source: &str) -> ParseOutcome<StructuralConstraint> {
    parse_source(source, ParserConfig::default(), |parser| {
        parser.parse_standalone_structural_constraint()
    })
}

pub fn parse_selective_statement(source: &str) -> ParseOutcome<SelectionStatement> {
    parse_source(source, ParserConfig::default(), |parser| {
        parser.parse_standalone_selective_statement()
    })
}
