//! Numeric literal parsing.
//!
//! Floating point numbers are not a single token: `1.5` arrives as digits,
//! `.`, digits and is only a float when the three tokens touch.

use crate::ast::{Span, Spanned};
use crate::lexer::token::{TokenKind, TokenSet};
use crate::parser::Parser;
use crate::parser::base::ParseResult;
use smol_str::SmolStr;

/// Token kinds carrying unsigned integer digits.
pub(super) const DIGITS: TokenSet = TokenSet::new(&[TokenKind::PureDigits, TokenKind::Digits]);

const SIGN: TokenSet = TokenSet::new(&[TokenKind::Plus, TokenKind::Minus]);

/// An unsigned or signed numeric literal, kept as source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Number {
    Integer(SmolStr),
    Float(SmolStr),
}

impl<'a> Parser<'a> {
    /// Returns true if the tokens at `k..k + 3` form an unsigned float.
    pub(super) fn at_unsigned_float(&self, k: usize) -> bool {
        DIGITS.contains(self.stream.peek_kind(k))
            && self.stream.peek_kind(k + 1) == TokenKind::Dot
            && DIGITS.contains(self.stream.peek_kind(k + 2))
            && self.stream.adjacent(k + 1)
            && self.stream.adjacent(k + 2)
    }

    /// `(PureDigits | Digits)`
    pub(super) fn parse_unsigned_integer(&mut self) -> ParseResult<Spanned<SmolStr>> {
        match self.stream.consume_any(DIGITS) {
            Some(token) => Ok(Spanned::new(token.text, token.span)),
            None => Err(self.stream.unexpected()),
        }
    }

    /// `digits '.' digits`, all adjacent.
    pub(super) fn parse_unsigned_float(&mut self) -> ParseResult<Spanned<SmolStr>> {
        if !self.at_unsigned_float(0) {
            self.stream.expect_at_current(DIGITS);
            return Err(self.stream.unexpected());
        }

        let whole = self.stream.advance();
        self.stream.advance();
        let fraction = self.stream.advance();
        let text = format!("{}.{}", whole.text, fraction.text);
        Ok(Spanned::new(SmolStr::new(text), whole.span.start..fraction.span.end))
    }

    /// Unsigned float if the next three tokens form one, unsigned integer
    /// otherwise.
    pub(super) fn parse_unsigned_number(&mut self) -> ParseResult<Spanned<Number>> {
        if self.at_unsigned_float(0) {
            Ok(self.parse_unsigned_float()?.map(Number::Float))
        } else {
            Ok(self.parse_unsigned_integer()?.map(Number::Integer))
        }
    }

    /// `sign? number`, where a sign must touch the digits that follow it.
    /// A `-` is kept in the text, a `+` is dropped.
    pub(super) fn parse_signed_number(&mut self) -> ParseResult<Spanned<Number>> {
        let Some(sign) = self.stream.consume_any(SIGN) else {
            return self.parse_unsigned_number();
        };

        if !self.stream.adjacent(0) {
            self.stream.expect_at_current(DIGITS);
            return Err(self
                .stream
                .error_here("a sign must be directly followed by digits"));
        }

        let number = self.parse_unsigned_number()?;
        let span: Span = sign.span.start..number.span.end;
        let negate = |text: SmolStr| match sign.kind {
            TokenKind::Minus => SmolStr::new(format!("-{text}")),
            _ => text,
        };

        Ok(Spanned::new(
            match number.node {
                Number::Integer(text) => Number::Integer(negate(text)),
                Number::Float(text) => Number::Float(negate(text)),
            },
            span,
        ))
    }
}
