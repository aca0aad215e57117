//! Syntax errors raised by the parser.
//!
//! The parser stops at the first error. A [`ParseError`] records the
//! offending token and every token kind that would have been accepted in
//! its place, and converts into a [`Diag`] for rendering.

use crate::ast::Span;
use crate::diag::Diag;
use crate::lexer::token::{Token, TokenKind, TokenSet};
use smol_str::SmolStr;
use std::fmt;

/// Classification of a syntax error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    /// The current token matches no alternative of the current rule.
    Syntax,
    /// Every alternative of a speculative choice failed at the same token.
    AmbiguityExhausted,
    /// The input ended in the middle of a rule.
    UnexpectedEndOfInput,
}

impl ParseErrorKind {
    /// Diagnostic code used when rendering errors of this kind.
    pub fn code(self) -> &'static str {
        match self {
            ParseErrorKind::Syntax => "iql::syntax",
            ParseErrorKind::AmbiguityExhausted => "iql::ambiguity",
            ParseErrorKind::UnexpectedEndOfInput => "iql::unexpected_eof",
        }
    }
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::Syntax => write!(f, "syntax error"),
            ParseErrorKind::AmbiguityExhausted => write!(f, "no alternative matched"),
            ParseErrorKind::UnexpectedEndOfInput => write!(f, "unexpected end of input"),
        }
    }
}

/// A syntax error at a single token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Kind of the offending token.
    pub found: TokenKind,
    /// Text of the offending token.
    pub text: SmolStr,
    /// Span of the offending token.
    pub span: Span,
    /// Token kinds that would have been accepted instead.
    pub expected: TokenSet,
    pub message: String,
}

impl ParseError {
    /// Creates an error for an unexpected `token`, given the set of kinds
    /// that would have been accepted.
    pub fn unexpected(token: &Token, expected: TokenSet) -> Self {
        let kind = if token.kind == TokenKind::Eof {
            ParseErrorKind::UnexpectedEndOfInput
        } else {
            ParseErrorKind::Syntax
        };

        Self {
            kind,
            found: token.kind,
            text: token.text.clone(),
            span: token.span.clone(),
            expected,
            message: describe(token, expected),
        }
    }

    /// Replaces the generated message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Returns true if the offending token is the end of input.
    pub fn is_eof(&self) -> bool {
        self.found == TokenKind::Eof
    }

    /// Picks the error to report after every alternative of a choice point
    /// failed.
    ///
    /// The alternative that got furthest wins. When several failed at the
    /// same furthest token their expected sets are merged, and the result
    /// is [`ParseErrorKind::AmbiguityExhausted`] unless they all ran out of
    /// input.
    pub fn exhausted(
        first: ParseError,
        others: impl IntoIterator<Item = ParseError>,
    ) -> ParseError {
        let mut best = first;
        let mut tied = false;

        for error in others {
            if error.span.start > best.span.start {
                best = error;
                tied = false;
            } else if error.span.start == best.span.start {
                best.expected = best.expected.union(error.expected);
                if !error.is_eof() && best.is_eof() {
                    best.found = error.found;
                    best.text = error.text;
                    best.span = error.span;
                }
                tied = true;
            }
        }

        if tied {
            best.kind = if best.is_eof() {
                ParseErrorKind::UnexpectedEndOfInput
            } else {
                ParseErrorKind::AmbiguityExhausted
            };
            best.message = format!(
                "no alternative matches {}; expected {}",
                found_text(best.found, &best.text),
                expected_text(best.expected)
            );
        }
        best
    }

    /// Converts this error into a diagnostic.
    pub fn to_diag(&self) -> Diag {
        let label = match self.kind {
            ParseErrorKind::UnexpectedEndOfInput => "input ends here".to_string(),
            _ if self.expected.is_empty() => "unexpected token".to_string(),
            _ => format!("expected {}", expected_text(self.expected)),
        };

        let mut diag = Diag::error(self.message.clone())
            .with_label(self.span.clone(), label)
            .with_code(self.kind.code());

        if self.kind == ParseErrorKind::AmbiguityExhausted {
            diag = diag.with_note("every alternative failed at this token");
        }
        diag
    }
}

fn describe(token: &Token, expected: TokenSet) -> String {
    let found = found_text(token.kind, &token.text);
    if expected.is_empty() {
        format!("unexpected {found}")
    } else {
        format!("expected {}, found {found}", expected_text(expected))
    }
}

/// Describes a token for messages, quoting its text when it has one.
pub(crate) fn found_text(kind: TokenKind, text: &str) -> String {
    match kind {
        TokenKind::Identifier
        | TokenKind::PureDigits
        | TokenKind::Digits
        | TokenKind::Variable
        | TokenKind::Member
        | TokenKind::StringLiteral => format!("{kind} `{text}`"),
        TokenKind::Eof => kind.to_string(),
        _ => format!("`{kind}`"),
    }
}

fn expected_text(expected: TokenSet) -> String {
    if expected.len() == 1 {
        expected.to_string()
    } else {
        format!("one of {expected}")
    }
}
