//! Common test utilities
//!
//! Shared helpers for the integration tests.
//!
//! # Diagnostic Helpers
//! - [`format_diagnostics`] - Format rendered reports for assertion messages
//! - [`assert_no_parse_errors`] - Assert that an outcome carries no diagnostics
//! - [`diagnostic_code`] - Stable code of the single reported diagnostic
//!
//! # Parsing Helpers
//! - [`payload`], [`expression`], [`node_statement`], [`structural`] - Parse
//!   source text, panicking on errors
//! - [`tokenize_cleanly`] - Tokenize source, panicking on lexer diagnostics
//! - [`expression_error`], [`statement_error`], [`payload_error`] - Parse
//!   source that must fail and return the raw [`ParseError`]

#![allow(dead_code)]

use iql_parser::ast::{Expression, NodeStatement, PayloadStatement, StructuralConstraint};
use iql_parser::{ParseError, ParseOutcome, Token, parser, tokenize};

// ============================================================================
// Diagnostic Formatting and Assertion Helpers
// ============================================================================

/// Format diagnostics for display in assertion messages.
pub fn format_diagnostics(diags: &[miette::Report]) -> String {
    diags
        .iter()
        .map(|diag| format!("{diag:?}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Assert that a parse outcome contains no diagnostics.
pub fn assert_no_parse_errors<T>(outcome: &ParseOutcome<T>, source: &str) {
    assert!(
        outcome.diagnostics.is_empty(),
        "unexpected diagnostics for `{source}`:\n{}",
        format_diagnostics(&outcome.diagnostics)
    );
}

/// Returns the code of the only diagnostic in `outcome`.
///
/// # Panics
/// Panics unless exactly one diagnostic was reported.
pub fn diagnostic_code<T>(outcome: &ParseOutcome<T>) -> String {
    assert_eq!(
        outcome.diagnostics.len(),
        1,
        "expected exactly one diagnostic:\n{}",
        format_diagnostics(&outcome.diagnostics)
    );
    outcome.diagnostics[0]
        .code()
        .map(|code| code.to_string())
        .unwrap_or_default()
}

// ============================================================================
// Parsing Helpers
// ============================================================================

fn unwrap_clean<T>(outcome: ParseOutcome<T>, source: &str) -> T {
    assert_no_parse_errors(&outcome, source);
    outcome
        .ast
        .unwrap_or_else(|| panic!("expected AST for source: {source}"))
}

pub fn payload(source: &str) -> PayloadStatement {
    unwrap_clean(iql_parser::parse_payload(source), source)
}

pub fn expression(source: &str) -> Expression {
    unwrap_clean(iql_parser::parse_expression(source), source)
}

pub fn node_statement(source: &str) -> NodeStatement {
    unwrap_clean(iql_parser::parse_node_statement(source), source)
}

pub fn structural(source: &str) -> StructuralConstraint {
    unwrap_clean(iql_parser::parse_structural_constraint(source), source)
}

/// Tokenize source code and return tokens, panicking if any diagnostics occur.
pub fn tokenize_cleanly(source: &str) -> Vec<Token> {
    let result = tokenize(source);
    assert!(
        result.is_clean(),
        "unexpected lexer diagnostics for `{source}`: {:?}",
        result.diagnostics
    );
    result.tokens
}

// ============================================================================
// Failure Helpers
// ============================================================================

pub fn expression_error(source: &str) -> ParseError {
    parser::parse_standalone_expression(&tokenize_cleanly(source))
        .expect_err(&format!("`{source}` should not parse"))
}

pub fn statement_error(source: &str) -> ParseError {
    parser::parse_standalone_node_statement(&tokenize_cleanly(source))
        .expect_err(&format!("`{source}` should not parse"))
}

pub fn payload_error(source: &str) -> ParseError {
    parser::parse_payload_statement(&tokenize_cleanly(source))
        .expect_err(&format!("`{source}` should not parse"))
}
