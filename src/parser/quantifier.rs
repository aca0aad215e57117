//! Quantifier parsing.
//!
//! ```text
//! quantifier       := simple ('|' simple)* | '<' simple ('|' simple)* '>'
//! simple           := (NOT | '!')
//!                   | (ALL | '*') ('?' | '+')?
//!                   | digits ('+' | '-')? ('?' | '!')? '^'?
//!                   | digits '..' digits ('?' | '!')? '^'?
//! ```

use crate::ast::{
    Quantifier, QuantifierMode, QuantifierSign, SimpleQuantifier, SimpleQuantifierKind, Spanned,
};
use crate::lexer::token::{TokenKind, TokenSet};
use crate::parser::Parser;
use crate::parser::base::ParseResult;

/// Tokens that can start a quantifier.
pub(super) const QUANTIFIER_START: TokenSet = TokenSet::new(&[
    TokenKind::Not,
    TokenKind::Bang,
    TokenKind::All,
    TokenKind::Star,
    TokenKind::PureDigits,
    TokenKind::Lt,
]);

impl<'a> Parser<'a> {
    pub(super) fn parse_quantifier(&mut self) -> ParseResult<Quantifier> {
        let start = self.stream.current().span.start;
        let bounded = self.stream.consume(TokenKind::Lt);

        let mut alternatives = vec![self.parse_simple_quantifier()?];
        while self.stream.consume(TokenKind::Pipe) {
            alternatives.push(self.parse_simple_quantifier()?);
        }

        if bounded {
            self.stream.expect(TokenKind::Gt)?;
        }

        Ok(Quantifier {
            alternatives,
            bounded,
            span: start..self.stream.previous_end(),
        })
    }

    fn parse_simple_quantifier(&mut self) -> ParseResult<SimpleQuantifier> {
        let first = self.stream.current().clone();

        let kind = match first.kind {
            TokenKind::Not | TokenKind::Bang => {
                self.stream.advance();
                SimpleQuantifierKind::Not
            }
            TokenKind::All | TokenKind::Star => {
                self.stream.advance();
                let mode = if self.stream.consume(TokenKind::Question) {
                    QuantifierMode::Reluctant
                } else if self.stream.consume(TokenKind::Plus) {
                    QuantifierMode::Possessive
                } else {
                    QuantifierMode::Greedy
                };
                SimpleQuantifierKind::All(mode)
            }
            TokenKind::PureDigits => {
                self.stream.advance();
                if self.stream.consume(TokenKind::DoubleDot) {
                    let high = self.stream.expect(TokenKind::PureDigits)?;
                    SimpleQuantifierKind::Range {
                        low: first.text.clone(),
                        high: high.text,
                        mode: self.parse_quantifier_mode(),
                        discontinuous: self.stream.consume(TokenKind::Caret),
                    }
                } else {
                    let sign = if self.stream.consume(TokenKind::Plus) {
                        Some(QuantifierSign::AtLeast)
                    } else if self.stream.consume(TokenKind::Minus) {
                        Some(QuantifierSign::AtMost)
                    } else {
                        None
                    };
                    SimpleQuantifierKind::Fixed {
                        value: first.text.clone(),
                        sign,
                        mode: self.parse_quantifier_mode(),
                        discontinuous: self.stream.consume(TokenKind::Caret),
                    }
                }
            }
            _ => {
                self.stream.expect_at_current(QUANTIFIER_START.union(TokenSet::single(TokenKind::Pipe)));
                return Err(self.stream.error_here(format!(
                    "expected a quantifier, found `{}`",
                    first.kind
                )));
            }
        };

        Ok(Spanned::new(kind, first.span.start..self.stream.previous_end()))
    }

    /// `?` makes a numeric quantifier reluctant, `!` makes it possessive.
    fn parse_quantifier_mode(&mut self) -> QuantifierMode {
        if self.stream.consume(TokenKind::Question) {
            QuantifierMode::Reluctant
        } else if self.stream.consume(TokenKind::Bang) {
            QuantifierMode::Possessive
        } else {
            QuantifierMode::Greedy
        }
    }
}
