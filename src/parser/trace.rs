//! Tracing for parsing operations.
//!
//! This provides human-readable traces on standard error each time a
//! grammar rule is entered or left, and each time a speculative attempt is
//! rewound. Traces are produced automatically under `cfg(test)`, which
//! places them in the captured output of any failing unit test.
//!
//! Outside of tests they can be enabled with the `parser-trace-stderr`
//! cargo feature.
//!
//! _These traces are not meant to be machine-readable!_
//! The format may change without notice.

use crate::lexer::token::Token;
use crate::parser::error::ParseError;

pub trait ParserTrace: Default {
    /// Called before a rule starts at token `at`, nested `depth` levels deep.
    fn rule_begin(&mut self, rule: &'static str, depth: usize, at: &Token);

    /// Called after a rule finished, with its error if it failed.
    fn rule_end(&mut self, rule: &'static str, depth: usize, error: Option<&ParseError>);

    /// Called when a speculative attempt of `rule` failed and the stream was
    /// rewound to `to`.
    fn rewind(&mut self, rule: &'static str, depth: usize, to: &Token);
}

/// Perform no tracing.
#[derive(Debug, PartialEq, Default)]
pub struct VoidTrace;

impl ParserTrace for VoidTrace {
    fn rule_begin(&mut self, _rule: &'static str, _depth: usize, _at: &Token) {}

    fn rule_end(&mut self, _rule: &'static str, _depth: usize, _error: Option<&ParseError>) {}

    fn rewind(&mut self, _rule: &'static str, _depth: usize, _to: &Token) {}
}

/// Human-readable [`ParserTrace`] writing an indented rule tree to standard
/// error.
#[derive(Debug, PartialEq, Default)]
pub struct HumanReadableTrace;

impl HumanReadableTrace {
    fn indent(depth: usize) -> String {
        "|  ".repeat(depth)
    }
}

impl ParserTrace for HumanReadableTrace {
    fn rule_begin(&mut self, rule: &'static str, depth: usize, at: &Token) {
        eprintln!(
            "{}[{rule}] at `{}` ({:?} {}..{})",
            Self::indent(depth),
            at.kind,
            at.text,
            at.span.start,
            at.span.end,
        );
    }

    fn rule_end(&mut self, rule: &'static str, depth: usize, error: Option<&ParseError>) {
        match error {
            None => eprintln!("{}[{rule}] ok", Self::indent(depth)),
            Some(err) => eprintln!(
                "{}[{rule}] !!! {}: {} at {}..{}",
                Self::indent(depth),
                err.kind,
                err.message,
                err.span.start,
                err.span.end,
            ),
        }
    }

    fn rewind(&mut self, rule: &'static str, depth: usize, to: &Token) {
        eprintln!(
            "{}[{rule}] <== rewound to `{}` at {}",
            Self::indent(depth),
            to.kind,
            to.span.start,
        );
    }
}

/// Trace used by [`Parser`](super::Parser).
#[cfg(any(test, feature = "parser-trace-stderr"))]
pub type DefaultTrace = HumanReadableTrace;

/// Trace used by [`Parser`](super::Parser).
#[cfg(not(any(test, feature = "parser-trace-stderr")))]
pub type DefaultTrace = VoidTrace;
